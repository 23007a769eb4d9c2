use crate::segment::Point;

/// Follow camera: keeps the viewer in the middle of the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// World coordinate shown at the top-left of the screen
    pub position: Point,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Camera {
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        Camera {
            position: Point::new(0.0, 0.0),
            viewport_width,
            viewport_height,
        }
    }

    /// Centre the viewport on `target`
    pub fn follow(&mut self, target: Point) {
        self.position.x = target.x - self.viewport_width / 2.0;
        self.position.y = target.y - self.viewport_height / 2.0;
    }

    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point::new(screen.x + self.position.x, screen.y + self.position.y)
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        Point::new(world.x - self.position.x, world.y - self.position.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_centres_target() {
        let mut camera = Camera::new(640.0, 480.0);
        camera.follow(Point::new(100.0, 50.0));
        assert_eq!(camera.position, Point::new(-220.0, -190.0));
        assert_eq!(camera.world_to_screen(Point::new(100.0, 50.0)), Point::new(320.0, 240.0));
    }

    #[test]
    fn test_screen_world_inverse() {
        let mut camera = Camera::new(640.0, 480.0);
        camera.follow(Point::new(400.0, 300.0));
        let world = camera.screen_to_world(Point::new(10.0, 20.0));
        assert_eq!(camera.world_to_screen(world), Point::new(10.0, 20.0));
    }
}
