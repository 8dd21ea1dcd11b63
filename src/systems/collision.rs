use glam::Vec2;

use crate::components::{Aabb, Body};
use crate::scene::Level;

/// Distance probed around a body when refreshing its contact flags.
const CONTACT_SKIN: f32 = 0.5;

/// Integrate `body.velocity` over `dt` against the level's static solids.
///
/// Resolves one axis at a time (x, then y) so a body pressed into a corner
/// keeps sliding along the free axis. Velocity along a blocked axis is zeroed.
/// Contact flags are refreshed afterwards from the resting position, which
/// keeps them stable for `dt = 0`.
pub fn move_and_slide(body: &mut Body, level: &Level, dt: f32) {
    let motion = body.velocity * dt;

    if motion.x != 0.0 {
        body.position.x += motion.x;
        for solid in level.solids() {
            if !body.aabb().overlaps(solid) {
                continue;
            }
            body.position.x = if motion.x > 0.0 {
                solid.min().x - body.half_size.x
            } else {
                solid.max().x + body.half_size.x
            };
            body.velocity.x = 0.0;
        }
    }

    if motion.y != 0.0 {
        body.position.y += motion.y;
        for solid in level.solids() {
            if !body.aabb().overlaps(solid) {
                continue;
            }
            body.position.y = if motion.y > 0.0 {
                solid.min().y - body.half_size.y
            } else {
                solid.max().y + body.half_size.y
            };
            body.velocity.y = 0.0;
        }
    }

    probe_contacts(body, level);
}

/// Recompute floor/wall/ceiling flags by nudging the body's box one skin
/// width in each direction.
///
/// Floor contact requires the body not to be moving up, so the step that
/// launches a jump already reports the body as airborne.
pub fn probe_contacts(body: &mut Body, level: &Level) {
    let aabb = body.aabb();
    let touches = |offset: Vec2| {
        let probe: Aabb = aabb.translated(offset);
        level.solids().iter().any(|solid| probe.overlaps(solid))
    };

    body.on_floor = body.velocity.y <= 0.0 && touches(Vec2::new(0.0, -CONTACT_SKIN));
    body.on_ceiling = body.velocity.y >= 0.0 && touches(Vec2::new(0.0, CONTACT_SKIN));

    let wall_left = touches(Vec2::new(-CONTACT_SKIN, 0.0));
    let wall_right = touches(Vec2::new(CONTACT_SKIN, 0.0));
    body.on_wall = wall_left || wall_right;
    body.wall_normal = if wall_right {
        -1.0
    } else if wall_left {
        1.0
    } else {
        0.0
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> Level {
        Level::new(vec![
            // floor, top at y = 0
            Aabb::from_corners(Vec2::new(-200.0, -20.0), Vec2::new(200.0, 0.0)),
            // wall on the right, inner face at x = 100
            Aabb::from_corners(Vec2::new(100.0, 0.0), Vec2::new(120.0, 200.0)),
        ])
    }

    #[test]
    fn falling_body_lands_on_floor() {
        let level = room();
        let mut body = Body::new(Vec2::new(0.0, 40.0), Vec2::new(10.0, 16.0));
        body.velocity = Vec2::new(0.0, -600.0);

        for _ in 0..10 {
            move_and_slide(&mut body, &level, 1.0 / 60.0);
        }

        assert_eq!(body.position.y, 16.0);
        assert_eq!(body.velocity.y, 0.0);
        assert!(body.on_floor);
        assert!(!body.on_wall);
    }

    #[test]
    fn running_into_wall_stops_and_reports_normal() {
        let level = room();
        let mut body = Body::new(Vec2::new(80.0, 16.0), Vec2::new(10.0, 16.0));
        body.velocity = Vec2::new(300.0, -1.0);

        for _ in 0..10 {
            move_and_slide(&mut body, &level, 1.0 / 60.0);
        }

        assert_eq!(body.position.x, 90.0);
        assert!(body.on_wall);
        assert_eq!(body.wall_normal, -1.0);
        assert!(body.on_floor);
    }

    #[test]
    fn contacts_are_stable_without_motion() {
        let level = room();
        let mut body = Body::new(Vec2::new(0.0, 16.0), Vec2::new(10.0, 16.0));
        move_and_slide(&mut body, &level, 0.0);
        assert!(body.on_floor);
        move_and_slide(&mut body, &level, 0.0);
        assert!(body.on_floor);
    }

    #[test]
    fn rising_body_is_not_on_floor() {
        let level = room();
        let mut body = Body::new(Vec2::new(0.0, 16.0), Vec2::new(10.0, 16.0));
        body.velocity.y = 320.0;
        move_and_slide(&mut body, &level, 1.0 / 60.0);
        assert!(!body.on_floor);
        assert!(body.position.y > 16.0);
    }
}
