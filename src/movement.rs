use crate::collision::is_colliding;
use crate::segment::Point;
use crate::world::World;

/// Default distance covered per tick along one axis
pub const DEFAULT_MOVEMENT_SPEED: f64 = 4.0;

/// Direction keys held during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionalInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionalInput {
    /// Unit step per axis: -1, 0 or 1. Opposite keys cancel out.
    pub fn axes(&self) -> (i8, i8) {
        let x = self.right as i8 - self.left as i8;
        let y = self.down as i8 - self.up as i8;
        (x, y)
    }

    pub fn is_idle(&self) -> bool {
        self.axes() == (0, 0)
    }
}

/// Intended movement for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Delta {
    pub dx: f64,
    pub dy: f64,
}

impl Delta {
    /// Scale the input axes by `speed`, dividing diagonals by √2 so every
    /// direction covers the same distance
    pub fn from_input(input: &DirectionalInput, speed: f64) -> Self {
        let (ax, ay) = input.axes();
        let mut delta = Delta {
            dx: ax as f64 * speed,
            dy: ay as f64 * speed,
        };
        if ax != 0 && ay != 0 {
            delta.dx /= std::f64::consts::SQRT_2;
            delta.dy /= std::f64::consts::SQRT_2;
        }
        delta
    }

    pub fn magnitude(&self) -> f64 {
        (self.dx * self.dx + self.dy * self.dy).sqrt()
    }
}

/// Advance `current` by one tick of `input`
///
/// X and Y are resolved separately: each axis step is kept only if the entity
/// would not collide there. Moving diagonally into a wall therefore slides
/// along it instead of stopping dead. The result is clamped inside the
/// playfield padding.
pub fn tick(
    current: Point,
    input: &DirectionalInput,
    speed: f64,
    half_extent: f64,
    world: &World,
) -> Point {
    let delta = Delta::from_input(input, speed);
    let obstacles = world.obstacles();
    let mut next = current;

    if delta.dx != 0.0 && !is_colliding(next.x + delta.dx, next.y, half_extent, obstacles) {
        next.x += delta.dx;
    }
    if delta.dy != 0.0 && !is_colliding(next.x, next.y + delta.dy, half_extent, obstacles) {
        next.y += delta.dy;
    }

    world.playfield().clamp(next)
}
