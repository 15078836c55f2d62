//! Track assembly
//!
//! Folds the generation stages into one read-only [`Track`] per round.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::boundary::extrude_boundaries;
use super::closed::loop_length;
use super::racing_line::ideal_racing_line;
use super::sampler::{ControlPoint, sample_control_points};
use super::sort::sort_by_angle;
use super::spline::catmull_rom_loop;
use crate::config::GameConfig;

/// Track edges, index-aligned with the centerline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Boundaries {
    pub inner: Vec<Vec2>,
    pub outer: Vec<Vec2>,
}

/// A generated closed racetrack.
///
/// `centerline`, `boundaries.inner`, `boundaries.outer` and `ideal_line` all have the same
/// length and are implicitly closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Spline anchors in loop order
    pub control_points: Vec<ControlPoint>,
    pub centerline: Vec<Vec2>,
    pub boundaries: Boundaries,
    pub ideal_line: Vec<Vec2>,
    /// Runs across the track at index 0: (outer, inner)
    pub start_line: (Vec2, Vec2),
}

impl Track {
    /// Build the track from already-ordered control points
    pub fn from_control_points(control_points: Vec<ControlPoint>, config: &GameConfig) -> Self {
        let anchors: Vec<Vec2> = control_points.iter().map(|cp| cp.pos).collect();
        let centerline = catmull_rom_loop(&anchors, config.segments_per_span);
        let (inner, outer) = extrude_boundaries(&centerline, config.track_width);
        let ideal_line = ideal_racing_line(&centerline, &inner, &outer, config.min_corner_angle);

        let start_line = match (outer.first(), inner.first()) {
            (Some(&o), Some(&i)) => (o, i),
            _ => (Vec2::ZERO, Vec2::ZERO),
        };

        Self {
            control_points,
            centerline,
            boundaries: Boundaries { inner, outer },
            ideal_line,
            start_line,
        }
    }

    /// Number of samples per loop
    pub fn len(&self) -> usize {
        self.centerline.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centerline.is_empty()
    }

    /// Closed arc length of the centerline
    pub fn length(&self) -> f32 {
        loop_length(&self.centerline)
    }
}

/// Generate a full track: sample, sort by angle, spline, extrude, ideal line.
///
/// Deterministic for a deterministic `rng`.
pub fn build_track<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Track {
    let mut control_points = sample_control_points(config, rng);
    sort_by_angle(&mut control_points, |cp| cp.pos);
    log::debug!("{} control points sorted", control_points.len());

    let track = Track::from_control_points(control_points, config);
    log::debug!(
        "Track built: {} samples, length {:.1}",
        track.len(),
        track.length()
    );
    track
}
