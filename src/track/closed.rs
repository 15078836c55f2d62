//! Wrap-aware access to closed point sequences
//!
//! Centerline, boundaries and ideal line are loops: index `len - 1` connects back to `0`.

use glam::Vec2;

/// Element at `index` of a closed sequence, wrapping in both directions.
///
/// Panics if `seq` is empty.
#[inline]
pub fn at<T: Copy>(seq: &[T], index: isize) -> T {
    let len = seq.len() as isize;
    seq[index.rem_euclid(len) as usize]
}

/// Perimeter of a closed polyline (includes the closing segment)
pub fn loop_length(points: &[Vec2]) -> f32 {
    if points.len() < 2 {
        return 0.0;
    }
    (0..points.len() as isize)
        .map(|i| at(points, i).distance(at(points, i + 1)))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_wraps_both_ways() {
        let seq = [10, 20, 30];
        assert_eq!(at(&seq, 0), 10);
        assert_eq!(at(&seq, 3), 10);
        assert_eq!(at(&seq, -1), 30);
        assert_eq!(at(&seq, 5), 30);
        assert_eq!(at(&seq, -4), 30);
    }

    #[test]
    fn test_loop_length_square() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        assert!((loop_length(&square) - 40.0).abs() < 0.0001);
        assert_eq!(loop_length(&square[..1]), 0.0);
    }
}
