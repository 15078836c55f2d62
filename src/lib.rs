//! Apex Line - trace a procedurally generated racetrack
//!
//! Core modules:
//! - `track`: Deterministic track generation (control points, spline, boundaries, ideal line)
//! - `scoring`: Scores a traced line against the ideal line and a time target
//! - `round`: Per-round state driven by pointer polling
//! - `config`: Data-driven generation and scoring parameters
//! - `renderer`: WebGPU rendering of the read-only point sequences

pub mod config;
pub mod error;
pub mod renderer;
pub mod round;
pub mod scoring;
pub mod track;

pub use config::{GameConfig, ScoringConfig};
pub use error::{ConfigError, RenderError};
pub use round::{PlayerTrace, PointerInput, PointerSource, RoundState};
pub use scoring::{ScoreOutcome, ScoreResult, score_attempt};
pub use track::{Boundaries, ControlPoint, Track, build_track};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Render ticks per second (elapsed time is counted in ticks)
    pub const FRAME_RATE: f32 = 60.0;

    /// Canvas extent (square, origin top-left)
    pub const CANVAS_SIZE: f32 = 800.0;
    /// Grid cells the canvas is split into (must be a perfect square)
    pub const BOXES: u32 = 16;

    /// Chance that a grid cell contributes a control point
    pub const POINT_PROBABILITY: f32 = 0.5;
    /// Chance that a control point is flagged as a corner
    pub const CORNER_PROBABILITY: f32 = 0.3;

    /// Full track width (boundaries sit at ± half of this)
    pub const TRACK_WIDTH: f32 = 25.0;
    /// Centerline samples per control point span
    pub const SEGMENTS_PER_SPAN: usize = 100;
    /// Heading change (radians) above which a centerline sample is a corner
    pub const MIN_CORNER_ANGLE: f32 = 0.5;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Heading of a vector in radians
#[inline]
pub fn heading(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

/// Sum of consecutive point distances (open polyline)
pub fn polyline_length(points: &[Vec2]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Smallest distance from `p` to any sample in `samples` (infinite if empty)
pub fn nearest_distance(p: Vec2, samples: &[Vec2]) -> f32 {
    samples
        .iter()
        .map(|s| p.distance(*s))
        .fold(f32::INFINITY, f32::min)
}

/// Shared fixtures for unit tests
#[cfg(test)]
pub(crate) mod test_util {
    use super::polar_to_cartesian;
    use glam::Vec2;
    use std::f32::consts::TAU;

    /// Middle of the default canvas
    pub const CENTER: Vec2 = Vec2::new(400.0, 400.0);

    /// `samples` evenly spaced points on a circle around [`CENTER`], counter-clockwise from +X
    pub fn circle(radius: f32, samples: usize) -> Vec<Vec2> {
        (0..samples)
            .map(|i| CENTER + polar_to_cartesian(radius, TAU * i as f32 / samples as f32))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(3.0 * PI + 0.5) - (-PI + 0.5)).abs() < 0.0001);
        // 3π lands a hair under π in f32, so either end of the range is acceptable
        assert!((normalize_angle(3.0 * PI).abs() - PI).abs() < 0.0001);
        assert!((normalize_angle(-PI / 2.0) - (-PI / 2.0)).abs() < 0.0001);
        assert!((normalize_angle(2.0 * PI + 0.25) - 0.25).abs() < 0.0001);
    }

    #[test]
    fn test_polyline_length() {
        let points = [Vec2::ZERO, Vec2::new(3.0, 4.0), Vec2::new(3.0, 10.0)];
        assert!((polyline_length(&points) - 11.0).abs() < 0.0001);
        assert_eq!(polyline_length(&points[..1]), 0.0);
    }

    #[test]
    fn test_nearest_distance() {
        let samples = [Vec2::new(10.0, 0.0), Vec2::new(0.0, 2.0)];
        assert!((nearest_distance(Vec2::ZERO, &samples) - 2.0).abs() < 0.0001);
        assert!(nearest_distance(Vec2::ZERO, &[]).is_infinite());
    }
}
