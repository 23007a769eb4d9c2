use crate::movement::{tick, DirectionalInput, DEFAULT_MOVEMENT_SPEED};
use crate::segment::Point;
use crate::world::World;

/// Default half-size of the viewer's collision square
pub const DEFAULT_HALF_EXTENT: f64 = 6.0;

/// The moving point the world is seen from
#[derive(Clone, Debug, PartialEq)]
pub struct Viewer {
    /// Centre of the viewer
    pub px: f64,
    pub py: f64,

    /// Half the side of the square used for collision queries
    pub half_extent: f64,

    /// Distance covered per tick along one axis
    pub speed: f64,
}

impl Viewer {
    pub fn new(px: f64, py: f64, half_extent: f64, speed: f64) -> Self {
        Viewer {
            px,
            py,
            half_extent,
            speed,
        }
    }

    /// Viewer with default size and speed at (px, py)
    pub fn at(px: f64, py: f64) -> Self {
        Viewer::new(px, py, DEFAULT_HALF_EXTENT, DEFAULT_MOVEMENT_SPEED)
    }

    pub fn position(&self) -> Point {
        Point::new(self.px, self.py)
    }

    /// Apply one tick of input (call once per frame)
    /// Returns true if the viewer moved
    pub fn update(&mut self, input: &DirectionalInput, world: &World) -> bool {
        let next = tick(self.position(), input, self.speed, self.half_extent, world);
        let moved = next != self.position();
        self.px = next.x;
        self.py = next.y;
        moved
    }

    /// Collision square as (left, top, right, bottom)
    pub fn get_bounds(&self) -> (f64, f64, f64, f64) {
        (
            self.px - self.half_extent,
            self.py - self.half_extent,
            self.px + self.half_extent,
            self.py + self.half_extent,
        )
    }
}
