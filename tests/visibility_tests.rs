mod common;

use common::{assert_sorted_fan, default_world, vertical_wall, world_with};
use proptest::prelude::*;
use shadowcast2d::error::VisibilityError;
use shadowcast2d::obstacle::vertex_count;
use shadowcast2d::visibility::{fan_triangles, visibility_polygon};
use shadowcast2d::{cast_visibility, intersect, Obstacle, Point, Segment, VisibilityParams};

#[test]
fn default_level_ray_count() {
    let world = default_world();
    let viewer = Point::new(320.0, 240.0);
    let rays = world.visibility_from(viewer).unwrap();

    assert_eq!(vertex_count(world.obstacles()), 14);
    assert_eq!(rays.len(), 28);
    assert_sorted_fan(viewer, &rays);
}

#[test]
fn free_function_matches_world() {
    let world = default_world();
    let from_world = world.visibility_from(Point::new(200.0, 300.0)).unwrap();
    let direct = cast_visibility(200.0, 300.0, world.obstacles(), &VisibilityParams::default()).unwrap();
    assert_eq!(from_world, direct);
}

#[test]
fn rays_never_pass_through_walls() {
    let world = default_world();
    let viewer = Point::new(320.0, 240.0);
    let rays = world.visibility_from(viewer).unwrap();

    for ray in &rays {
        // Shorten each ray slightly; what is left must not cross any wall
        let end = ray.end();
        let inner = Segment::from_points(
            viewer,
            Point::new(viewer.x + (end.x - viewer.x) * 0.999, viewer.y + (end.y - viewer.y) * 0.999),
        );
        for obstacle in world.obstacles() {
            for wall in obstacle.segments() {
                assert_eq!(intersect(&inner, wall), None, "ray {:?} crosses {:?}", ray, wall);
            }
        }
    }
}

#[test]
fn shadow_behind_wall() {
    // A wall right of the viewer hides the outer wall behind it
    let world = world_with(vec![vertical_wall(400.0, 200.0, 280.0)]);
    let viewer = Point::new(320.0, 240.0);
    let rays = world.visibility_from(viewer).unwrap();

    let straight = rays
        .iter()
        .filter(|r| r.angle().abs() < 0.46)
        .collect::<Vec<_>>();
    assert!(!straight.is_empty());
    for ray in straight {
        assert!(ray.x2 <= 400.0 + 1e-9, "ray reached {}", ray.x2);
    }

    // Probes just past the wall's ends reach the outer wall
    let past_ends = rays
        .iter()
        .filter(|r| r.angle().abs() < 0.5 && r.x2 > 600.0)
        .count();
    assert_eq!(past_ends, 2);
}

#[test]
fn polygon_and_fan_follow_rays() {
    let world = default_world();
    let viewer = Point::new(320.0, 240.0);
    let rays = world.visibility_from(viewer).unwrap();

    let polygon = visibility_polygon(&rays);
    let fan = fan_triangles(viewer, &rays);
    assert_eq!(polygon.len(), rays.len());
    assert_eq!(fan.len(), rays.len());
    assert_eq!(fan[0][1], polygon[1]);
    assert_eq!(fan[rays.len() - 1][1], polygon[0]);
}

#[test]
fn unenclosed_viewer_is_reported() {
    let obstacles = vec![Obstacle::rect(45.0, 50.0, 70.0, 20.0).unwrap()];
    let result = cast_visibility(320.0, 240.0, &obstacles, &VisibilityParams::default());
    assert!(matches!(result, Err(VisibilityError::RayEscaped { .. })));
}

proptest! {
    #[test]
    fn ray_count_is_twice_vertex_count(x in 21.0f64..619.0, y in 21.0f64..459.0) {
        let world = default_world();
        let viewer = Point::new(x, y);
        let rays = world.visibility_from(viewer).unwrap();

        prop_assert_eq!(rays.len(), 2 * vertex_count(world.obstacles()));
        for pair in rays.windows(2) {
            prop_assert!(pair[0].angle() <= pair[1].angle());
        }
    }

    #[test]
    fn casting_is_idempotent(x in 21.0f64..619.0, y in 21.0f64..459.0) {
        let world = default_world();
        let first = world.visibility_from(Point::new(x, y)).unwrap();
        let second = world.visibility_from(Point::new(x, y)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn crossing_segments_meet_at_crossing_point(
        px in -100.0f64..100.0,
        py in -100.0f64..100.0,
        angle in 0.0f64..std::f64::consts::PI,
        turn in 0.3f64..2.8,
        lengths in prop::array::uniform4(1.0f64..50.0),
    ) {
        let p = Point::new(px, py);
        let spoke = |a: f64, len: f64| Point::new(px + len * a.cos(), py + len * a.sin());
        let other = angle + turn;
        let a = Segment::from_points(spoke(angle, -lengths[0]), spoke(angle, lengths[1]));
        let b = Segment::from_points(spoke(other, -lengths[2]), spoke(other, lengths[3]));

        let hit = intersect(&a, &b);
        prop_assert!(hit.is_some());
        let hit = hit.unwrap();
        prop_assert!((hit.x - p.x).abs() < 1e-6);
        prop_assert!((hit.y - p.y).abs() < 1e-6);
    }

    #[test]
    fn parallel_segments_never_meet(
        x in -100.0f64..100.0,
        y in -100.0f64..100.0,
        angle in 0.0f64..std::f64::consts::PI,
        gap in 0.5f64..20.0,
    ) {
        let (dx, dy) = (angle.cos() * 30.0, angle.sin() * 30.0);
        let (nx, ny) = (-angle.sin() * gap, angle.cos() * gap);
        let a = Segment::new(x, y, x + dx, y + dy);
        let b = Segment::new(x + nx, y + ny, x + nx + dx, y + ny + dy);
        prop_assert_eq!(intersect(&a, &b), None);
    }
}
