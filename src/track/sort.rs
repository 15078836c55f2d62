//! Angular ordering around the centroid

use glam::Vec2;

use crate::heading;

/// Arithmetic mean of the points (origin if empty)
pub fn centroid(points: &[Vec2]) -> Vec2 {
    if points.is_empty() {
        return Vec2::ZERO;
    }
    points.iter().copied().sum::<Vec2>() / points.len() as f32
}

/// Sort items by the angle of `pos(item)` around the centroid, ascending in (-π, π].
///
/// The sort is stable, so items with equal angles keep their input order.
pub fn sort_by_angle<T, F>(items: &mut [T], pos: F)
where
    F: Fn(&T) -> Vec2,
{
    let positions: Vec<Vec2> = items.iter().map(&pos).collect();
    let center = centroid(&positions);
    items.sort_by(|a, b| {
        let angle_a = heading(pos(a) - center);
        let angle_b = heading(pos(b) - center);
        angle_a.total_cmp(&angle_b)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_centroid() {
        let points = [Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(2.0, 6.0)];
        assert!((centroid(&points) - Vec2::new(2.0, 2.0)).length() < 0.0001);
    }

    #[test]
    fn test_square_sorted_counterclockwise_from_negative_x() {
        let mut points = vec![
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, -1.0),
            Vec2::new(-1.0, 1.0),
            Vec2::new(1.0, -1.0),
        ];
        sort_by_angle(&mut points, |p| *p);
        assert_eq!(
            points,
            vec![
                Vec2::new(-1.0, -1.0),
                Vec2::new(1.0, -1.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(-1.0, 1.0),
            ]
        );
    }

    #[test]
    fn test_equal_angles_keep_input_order() {
        // Both (2, 0) and (4, 0) sit at angle 0 from the centroid (0, 0)
        let mut points = vec![
            (Vec2::new(4.0, 0.0), 'a'),
            (Vec2::new(-3.0, 0.0), 'b'),
            (Vec2::new(2.0, 0.0), 'c'),
            (Vec2::new(-3.0, 0.0), 'd'),
        ];
        sort_by_angle(&mut points, |(p, _)| *p);
        let order: Vec<char> = points.iter().map(|(_, tag)| *tag).collect();
        assert_eq!(order, vec!['a', 'c', 'b', 'd']);
    }

    proptest! {
        #[test]
        fn prop_angles_non_decreasing(
            raw in prop::collection::vec((0.0f32..800.0, 0.0f32..800.0), 3..40)
        ) {
            let mut points: Vec<Vec2> = raw.iter().map(|&(x, y)| Vec2::new(x, y)).collect();
            let center = centroid(&points);
            sort_by_angle(&mut points, |p| *p);
            let angles: Vec<f32> = points.iter().map(|p| heading(*p - center)).collect();
            for pair in angles.windows(2) {
                prop_assert!(pair[0] <= pair[1]);
            }
        }
    }
}
