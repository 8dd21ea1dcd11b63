use glam::Vec2;

use crate::components::Aabb;

/// Slab test. Returns the distance along `dir` (normalised) to the first
/// boundary crossing, or `None` when the ray misses or the box lies behind
/// the origin.
pub fn ray_aabb_intersection(origin: Vec2, dir: Vec2, aabb: &Aabb) -> Option<f32> {
    let min = aabb.min();
    let max = aabb.max();
    let inv_dir = Vec2::new(1.0 / dir.x, 1.0 / dir.y);

    let t1 = (min.x - origin.x) * inv_dir.x;
    let t2 = (max.x - origin.x) * inv_dir.x;
    let t3 = (min.y - origin.y) * inv_dir.y;
    let t4 = (max.y - origin.y) * inv_dir.y;

    let tmin = t1.min(t2).max(t3.min(t4));
    let tmax = t1.max(t2).min(t3.max(t4));

    if tmax < 0.0 || tmin > tmax {
        return None;
    }
    // Origin inside the box: report the exit point.
    Some(if tmin < 0.0 { tmax } else { tmin })
}

/// Nearest hit distance among `boxes` within `max_distance`.
pub fn raycast_boxes<'a>(
    boxes: impl IntoIterator<Item = &'a Aabb>,
    origin: Vec2,
    direction: Vec2,
    max_distance: f32,
) -> Option<f32> {
    let dir = direction.normalize_or_zero();
    if dir == Vec2::ZERO {
        return None;
    }

    let mut best: Option<f32> = None;
    for aabb in boxes {
        if let Some(t) = ray_aabb_intersection(origin, dir, aabb) {
            if t >= 0.0 && t <= max_distance {
                let is_closer = best.map_or(true, |b| t < b);
                if is_closer {
                    best = Some(t);
                }
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box_at(x: f32, y: f32) -> Aabb {
        Aabb::new(Vec2::new(x, y), Vec2::splat(1.0))
    }

    #[test]
    fn ray_hits_box_ahead() {
        let t = ray_aabb_intersection(Vec2::ZERO, Vec2::X, &unit_box_at(5.0, 0.0));
        assert_eq!(t, Some(4.0));
    }

    #[test]
    fn ray_misses_box_behind() {
        assert_eq!(
            ray_aabb_intersection(Vec2::ZERO, Vec2::X, &unit_box_at(-5.0, 0.0)),
            None
        );
    }

    #[test]
    fn raycast_picks_nearest_within_range() {
        let boxes = [unit_box_at(9.0, 0.0), unit_box_at(4.0, 0.0), unit_box_at(4.0, 5.0)];
        assert_eq!(raycast_boxes(&boxes, Vec2::ZERO, Vec2::X, 20.0), Some(3.0));
        assert_eq!(raycast_boxes(&boxes, Vec2::ZERO, Vec2::X, 2.0), None);
    }

    #[test]
    fn downward_ray_finds_floor() {
        let floor = Aabb::from_corners(Vec2::new(-50.0, -10.0), Vec2::new(50.0, 0.0));
        let t = raycast_boxes([&floor], Vec2::new(3.0, 8.0), Vec2::NEG_Y, 20.0);
        assert_eq!(t, Some(8.0));
    }
}
