//! Closed Catmull-Rom spline through the sorted control points

use glam::Vec2;

use super::closed::at;

/// Standard uniform Catmull-Rom: passes through `p1` at `t = 0` and `p2` at `t = 1`
#[inline]
pub fn catmull_rom_point(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

/// Dense closed centerline through `points`.
///
/// Each control point `i` starts a span over the window `(i-1, i, i+1, i+2)` sampled at
/// `t = j / segments_per_span` for `j` in `0..segments_per_span`; a span's `t = 1` end is
/// the next span's first sample. The result has `points.len() * segments_per_span` samples.
pub fn catmull_rom_loop(points: &[Vec2], segments_per_span: usize) -> Vec<Vec2> {
    if points.is_empty() || segments_per_span == 0 {
        return Vec::new();
    }

    let mut curve = Vec::with_capacity(points.len() * segments_per_span);
    for i in 0..points.len() as isize {
        let p0 = at(points, i - 1);
        let p1 = at(points, i);
        let p2 = at(points, i + 1);
        let p3 = at(points, i + 2);

        for j in 0..segments_per_span {
            let t = j as f32 / segments_per_span as f32;
            curve.push(catmull_rom_point(p0, p1, p2, p3, t));
        }
    }
    curve
}
