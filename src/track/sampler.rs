//! Jittered control point sampling over a grid of cells

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// Minimum number of points the spline can loop through without degenerating
pub const MIN_CONTROL_POINTS: usize = 3;
/// Points synthesized when the grid yields too few
pub const FALLBACK_POINT_COUNT: usize = 4;

/// A spline anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub pos: Vec2,
    /// Rolled per point but not consumed by generation
    pub is_corner: bool,
}

impl ControlPoint {
    pub fn new(pos: Vec2, is_corner: bool) -> Self {
        Self { pos, is_corner }
    }
}

/// Sample control points: one optional, uniformly placed point per grid cell.
///
/// Cells are visited row by row. Each cell rolls for inclusion, then x, then y, then the
/// corner flag. If fewer than [`MIN_CONTROL_POINTS`] survive, they are replaced by
/// [`FALLBACK_POINT_COUNT`] points spread over the whole canvas.
pub fn sample_control_points<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Vec<ControlPoint> {
    let sections = config.sections();
    let spacing = config.cell_size();
    let mut points = Vec::with_capacity(config.boxes as usize);

    for y in 0..sections {
        for x in 0..sections {
            if rng.random::<f32>() < config.point_probability {
                let cell_x = x as f32 * spacing;
                let cell_y = y as f32 * spacing;
                let px = rng.random_range(cell_x..cell_x + spacing);
                let py = rng.random_range(cell_y..cell_y + spacing);
                let is_corner = rng.random::<f32>() < config.corner_probability;
                points.push(ControlPoint::new(Vec2::new(px, py), is_corner));
            }
        }
    }

    if points.len() < MIN_CONTROL_POINTS {
        log::debug!(
            "Only {} control points sampled, using {} fallback points",
            points.len(),
            FALLBACK_POINT_COUNT
        );
        points.clear();
        for _ in 0..FALLBACK_POINT_COUNT {
            let px = rng.random_range(0.0..config.canvas_size);
            let py = rng.random_range(0.0..config.canvas_size);
            points.push(ControlPoint::new(Vec2::new(px, py), false));
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_every_cell_included() {
        let config = GameConfig {
            point_probability: 1.0,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(7);
        let points = sample_control_points(&config, &mut rng);
        assert_eq!(points.len(), 16);

        // Row-major: point k lies inside cell (k % 4, k / 4)
        let spacing = config.cell_size();
        for (k, cp) in points.iter().enumerate() {
            let cx = (k % 4) as f32 * spacing;
            let cy = (k / 4) as f32 * spacing;
            assert!(cp.pos.x >= cx && cp.pos.x < cx + spacing);
            assert!(cp.pos.y >= cy && cp.pos.y < cy + spacing);
        }
    }

    #[test]
    fn test_fallback_when_no_points() {
        let config = GameConfig {
            point_probability: 0.0,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(42);
        let points = sample_control_points(&config, &mut rng);
        assert_eq!(points.len(), FALLBACK_POINT_COUNT);
        for cp in &points {
            assert!(!cp.is_corner);
            assert!(cp.pos.x >= 0.0 && cp.pos.x < config.canvas_size);
            assert!(cp.pos.y >= 0.0 && cp.pos.y < config.canvas_size);
        }
    }

    #[test]
    fn test_fallback_discards_sparse_sample() {
        // A single cell can never reach three points
        let config = GameConfig {
            boxes: 1,
            point_probability: 1.0,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(3);
        assert_eq!(sample_control_points(&config, &mut rng).len(), FALLBACK_POINT_COUNT);
    }

    #[test]
    fn test_corner_flags() {
        let mut config = GameConfig {
            point_probability: 1.0,
            corner_probability: 1.0,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(sample_control_points(&config, &mut rng).iter().all(|cp| cp.is_corner));

        config.corner_probability = 0.0;
        assert!(sample_control_points(&config, &mut rng).iter().all(|cp| !cp.is_corner));
    }

    #[test]
    fn test_same_seed_same_points() {
        let config = GameConfig::default();
        let a = sample_control_points(&config, &mut Pcg32::seed_from_u64(99));
        let b = sample_control_points(&config, &mut Pcg32::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
