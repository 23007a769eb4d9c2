use serde::{Deserialize, Serialize};

/// Determinants smaller than this are treated as parallel lines
const PARALLEL_EPSILON: f64 = 1e-12;

/// A point in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Squared Euclidean distance to another point
    pub fn distance_squared(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Line segment between two endpoints
///
/// Rays cast by the visibility solver are segments too: `x1, y1` is the
/// viewer and `x2, y2` is where the ray stopped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Segment {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Segment { x1, y1, x2, y2 }
    }

    pub fn from_points(start: Point, end: Point) -> Self {
        Segment::new(start.x, start.y, end.x, end.y)
    }

    /// Segment of `length` starting at `origin` and pointing along `angle` (radians)
    pub fn from_angle(origin: Point, length: f64, angle: f64) -> Self {
        Segment {
            x1: origin.x,
            y1: origin.y,
            x2: origin.x + length * angle.cos(),
            y2: origin.y + length * angle.sin(),
        }
    }

    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    /// Direction of the segment, atan2(dy, dx), in (-π, π]
    pub fn angle(&self) -> f64 {
        (self.y2 - self.y1).atan2(self.x2 - self.x1)
    }

    pub fn length(&self) -> f64 {
        self.start().distance_squared(&self.end()).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.start().is_finite() && self.end().is_finite()
    }
}

/// Intersection point of two segments
///
/// Solves the 2x2 system with the determinant form from
/// <https://en.wikipedia.org/wiki/Line%E2%80%93line_intersection#Given_two_points_on_each_line>.
/// Both parameters must lie in the closed interval [0, 1], so touching an
/// endpoint counts as a hit. Parallel and collinear segments never intersect.
pub fn intersect(a: &Segment, b: &Segment) -> Option<Point> {
    let denom = (a.x1 - a.x2) * (b.y1 - b.y2) - (a.y1 - a.y2) * (b.x1 - b.x2);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = ((a.x1 - b.x1) * (b.y1 - b.y2) - (a.y1 - b.y1) * (b.x1 - b.x2)) / denom;
    if !(0.0..=1.0).contains(&t) {
        return None;
    }

    let u = -((a.x1 - a.x2) * (a.y1 - b.y1) - (a.y1 - a.y2) * (a.x1 - b.x1)) / denom;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    Some(Point::new(a.x1 + t * (a.x2 - a.x1), a.y1 + t * (a.y2 - a.y1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_angle_and_length() {
        let seg = Segment::new(0.0, 0.0, 3.0, 4.0);
        assert_relative_eq!(seg.length(), 5.0);
        assert_relative_eq!(seg.angle(), (4.0f64).atan2(3.0));

        let left = Segment::new(0.0, 0.0, -1.0, 0.0);
        assert_relative_eq!(left.angle(), PI);
    }

    #[test]
    fn test_from_angle() {
        let ray = Segment::from_angle(Point::new(1.0, 1.0), 2.0, PI / 2.0);
        assert_relative_eq!(ray.x2, 1.0, epsilon = 1e-12);
        assert_relative_eq!(ray.y2, 3.0);
        assert_relative_eq!(ray.length(), 2.0);
    }

    #[test]
    fn test_crossing_segments() {
        let a = Segment::new(0.0, 0.0, 10.0, 10.0);
        let b = Segment::new(0.0, 10.0, 10.0, 0.0);
        let p = intersect(&a, &b).expect("segments cross");
        assert_relative_eq!(p.x, 5.0);
        assert_relative_eq!(p.y, 5.0);
    }

    #[test]
    fn test_parallel_segments() {
        let a = Segment::new(0.0, 0.0, 10.0, 0.0);
        let b = Segment::new(0.0, 1.0, 10.0, 1.0);
        assert_eq!(intersect(&a, &b), None);

        // Collinear overlap is still "parallel"
        let c = Segment::new(5.0, 0.0, 15.0, 0.0);
        assert_eq!(intersect(&a, &c), None);
    }

    #[test]
    fn test_outside_extent() {
        // Lines cross at (5, 5) but the second segment stops short of it
        let a = Segment::new(0.0, 0.0, 10.0, 10.0);
        let b = Segment::new(0.0, 10.0, 4.0, 6.0);
        assert_eq!(intersect(&a, &b), None);
    }

    #[test]
    fn test_endpoint_touch_counts() {
        let a = Segment::new(0.0, 0.0, 10.0, 0.0);
        let b = Segment::new(10.0, -5.0, 10.0, 5.0);
        let p = intersect(&a, &b).expect("touching at endpoint");
        assert_relative_eq!(p.x, 10.0);
        assert_relative_eq!(p.y, 0.0);
    }
}
