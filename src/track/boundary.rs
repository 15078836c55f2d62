//! Inner/outer boundary extrusion along the centerline normals

use glam::Vec2;

use super::closed::at;

/// Used only when every centerline segment has zero length
const FALLBACK_NORMAL: Vec2 = Vec2::Y;

/// Left-perpendicular unit normal of the segment `a -> b`, if it has length
#[inline]
fn segment_normal(a: Vec2, b: Vec2) -> Option<Vec2> {
    let dir = (b - a).try_normalize()?;
    Some(Vec2::new(-dir.y, dir.x))
}

/// Offset every centerline point by ± `track_width / 2` along its outgoing segment normal.
///
/// Returns `(inner, outer)` index-aligned with `centerline`: inner is `p - n * w/2`, outer is
/// `p + n * w/2`. A zero-length segment reuses the previous segment's normal; leading
/// zero-length segments borrow the first valid normal in the loop.
pub fn extrude_boundaries(centerline: &[Vec2], track_width: f32) -> (Vec<Vec2>, Vec<Vec2>) {
    let n = centerline.len() as isize;
    let half_width = track_width / 2.0;

    let first_valid = (0..n).find_map(|i| segment_normal(at(centerline, i), at(centerline, i + 1)));
    let mut last_normal = first_valid.unwrap_or(FALLBACK_NORMAL);
    let mut degenerate = 0usize;

    let mut inner = Vec::with_capacity(centerline.len());
    let mut outer = Vec::with_capacity(centerline.len());
    for i in 0..n {
        let p = at(centerline, i);
        let normal = match segment_normal(p, at(centerline, i + 1)) {
            Some(normal) => normal,
            None => {
                degenerate += 1;
                last_normal
            }
        };
        last_normal = normal;

        inner.push(p - normal * half_width);
        outer.push(p + normal * half_width);
    }

    if degenerate > 0 {
        log::warn!("{} zero-length centerline segments reused the previous normal", degenerate);
    }

    (inner, outer)
}
