//! Apex-seeking ideal racing line
//!
//! Not a curvature-optimal line: corners dive to the inner boundary, the sample right
//! after a corner swings to the outer boundary, and straights follow the centerline.

use glam::Vec2;

use super::closed::at;
use crate::{heading, normalize_angle};

/// Fewer detected corners than this and the ideal line is the centerline
pub const MIN_CORNERS: usize = 2;

/// Absolute heading change at index `i` of a closed polyline, in [0, π].
///
/// `None` when either adjacent segment has zero length (no heading).
pub fn turn_magnitude(points: &[Vec2], i: isize) -> Option<f32> {
    let prev = at(points, i - 1);
    let cur = at(points, i);
    let next = at(points, i + 1);
    if prev == cur || cur == next {
        return None;
    }
    let incoming = heading(cur - prev);
    let outgoing = heading(next - cur);
    Some(normalize_angle(outgoing - incoming).abs())
}

/// Flags each centerline index whose turn magnitude exceeds `min_angle_diff`
pub fn detect_corners(centerline: &[Vec2], min_angle_diff: f32) -> Vec<bool> {
    (0..centerline.len() as isize)
        .map(|i| turn_magnitude(centerline, i).is_some_and(|turn| turn > min_angle_diff))
        .collect()
}

/// Build the ideal line, index-aligned with `centerline`.
///
/// `inner` and `outer` must have the same length as `centerline`.
pub fn ideal_racing_line(
    centerline: &[Vec2],
    inner: &[Vec2],
    outer: &[Vec2],
    min_angle_diff: f32,
) -> Vec<Vec2> {
    let corners = detect_corners(centerline, min_angle_diff);
    let corner_count = corners.iter().filter(|&&c| c).count();
    if corner_count < MIN_CORNERS {
        log::debug!("{} corners detected, ideal line follows the centerline", corner_count);
        return centerline.to_vec();
    }
    log::debug!("{} corners detected", corner_count);

    (0..centerline.len() as isize)
        .map(|i| {
            let idx = i as usize;
            if corners[idx] {
                inner[idx]
            } else if at(&corners, i - 1) {
                outer[idx]
            } else {
                centerline[idx]
            }
        })
        .collect()
}
