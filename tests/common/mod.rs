#![allow(dead_code)]

use shadowcast2d::{Obstacle, Playfield, Point, Segment, VisibilityParams, World};

/// Collision half-extent used across the integration tests
pub const HALF_EXTENT: f64 = 6.0;

/// Movement speed used across the integration tests
pub const SPEED: f64 = 4.0;

/// Outer wall, angled wall and two rectangles on a 640x480 playfield
pub fn default_world() -> World {
    World::default_level(Playfield::default(), VisibilityParams::default())
        .expect("default level is valid")
}

/// Default playfield with the outer wall plus `extra` obstacles
pub fn world_with(extra: Vec<Obstacle>) -> World {
    let playfield = Playfield::default();
    let mut obstacles = vec![playfield.outer_wall().expect("outer wall")];
    obstacles.extend(extra);
    World::new(playfield, obstacles, VisibilityParams::default()).expect("world is enclosed")
}

/// Vertical wall from (x, y1) to (x, y2)
pub fn vertical_wall(x: f64, y1: f64, y2: f64) -> Obstacle {
    Obstacle::from_segments(vec![Segment::new(x, y1, x, y2)]).expect("wall")
}

/// Every ray starts at the viewer and the list is sorted by angle
pub fn assert_sorted_fan(viewer: Point, rays: &[Segment]) {
    for ray in rays {
        assert_eq!(ray.start(), viewer, "ray does not start at the viewer");
    }
    for pair in rays.windows(2) {
        assert!(
            pair[0].angle() <= pair[1].angle(),
            "rays out of order: {} > {}",
            pair[0].angle(),
            pair[1].angle()
        );
    }
}
