use crate::error::ObstacleError;
use crate::segment::{intersect, Point, Segment};

/// A static barrier made of line segments
///
/// Either a closed polygon (each segment starts where the previous one ends
/// and the last one returns to the first) or an open path such as a single
/// angled wall. Obstacles block both sight and movement.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    segments: Vec<Segment>,
}

impl Obstacle {
    /// Wrap an explicit segment list
    pub fn from_segments(segments: Vec<Segment>) -> Result<Self, ObstacleError> {
        if segments.is_empty() {
            return Err(ObstacleError::Empty);
        }
        if segments.iter().any(|s| !s.is_finite()) {
            return Err(ObstacleError::NonFinite);
        }
        Ok(Obstacle { segments })
    }

    /// Axis-aligned rectangle with its top-left corner at (x, y)
    ///
    /// Winds down the left edge, along the bottom, up the right edge and back
    /// along the top.
    pub fn rect(x: f64, y: f64, w: f64, h: f64) -> Result<Self, ObstacleError> {
        Self::from_segments(vec![
            Segment::new(x, y, x, y + h),
            Segment::new(x, y + h, x + w, y + h),
            Segment::new(x + w, y + h, x + w, y),
            Segment::new(x + w, y, x, y),
        ])
    }

    /// Path through `points` that stays open at the end
    pub fn open_path(points: &[Point]) -> Result<Self, ObstacleError> {
        if points.len() < 2 {
            return Err(ObstacleError::Empty);
        }
        let segments = points
            .windows(2)
            .map(|w| Segment::from_points(w[0], w[1]))
            .collect();
        Self::from_segments(segments)
    }

    /// Polygon through `points`, closed back to the first point
    pub fn closed_path(points: &[Point]) -> Result<Self, ObstacleError> {
        if points.len() < 2 {
            return Err(ObstacleError::Empty);
        }
        let mut segments: Vec<Segment> = points
            .windows(2)
            .map(|w| Segment::from_points(w[0], w[1]))
            .collect();
        let first = points[0];
        let last = points[points.len() - 1];
        if first != last {
            segments.push(Segment::from_points(last, first));
        }
        let obstacle = Self::from_segments(segments)?;
        obstacle.check_cycle()?;
        Ok(obstacle)
    }

    /// Segments that were checked to form a connected cycle
    pub fn closed_from_segments(segments: Vec<Segment>) -> Result<Self, ObstacleError> {
        let obstacle = Self::from_segments(segments)?;
        obstacle.check_cycle()?;
        Ok(obstacle)
    }

    fn check_cycle(&self) -> Result<(), ObstacleError> {
        let n = self.segments.len();
        for i in 0..n {
            let prev = &self.segments[(i + n - 1) % n];
            if self.segments[i].start() != prev.end() {
                return Err(ObstacleError::Disconnected { index: i });
            }
        }
        Ok(())
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// True when the last segment ends where the first one starts
    pub fn is_closed(&self) -> bool {
        let first = &self.segments[0];
        let last = &self.segments[self.segments.len() - 1];
        self.segments.len() > 1 && last.end() == first.start()
    }

    /// Vertices the visibility solver aims at
    ///
    /// The end of every segment, plus the start of the first segment for open
    /// paths. Closed polygons already collected that point as the end of
    /// their last segment.
    pub fn vertices(&self) -> Vec<Point> {
        let mut points: Vec<Point> = self.segments.iter().map(Segment::end).collect();
        let first = self.segments[0].start();
        if points.last() != Some(&first) {
            points.push(first);
        }
        points
    }

    /// Even-odd point-in-polygon test against the segment outline
    pub fn contains(&self, p: Point) -> bool {
        let mut inside = false;
        for s in &self.segments {
            if (s.y1 > p.y) != (s.y2 > p.y) {
                let cross_x = (s.x2 - s.x1) * (p.y - s.y1) / (s.y2 - s.y1) + s.x1;
                if p.x < cross_x {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// True if any of `probes` touches one of this obstacle's segments
    pub fn touches_any(&self, probes: &[Segment]) -> bool {
        self.segments
            .iter()
            .any(|wall| probes.iter().any(|probe| intersect(probe, wall).is_some()))
    }

    /// Smallest axis-aligned box around the obstacle: (min_x, min_y, max_x, max_y)
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        self.segments.iter().fold(
            (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
            |(min_x, min_y, max_x, max_y), s| {
                (
                    min_x.min(s.x1).min(s.x2),
                    min_y.min(s.y1).min(s.y2),
                    max_x.max(s.x1).max(s.x2),
                    max_y.max(s.y1).max(s.y2),
                )
            },
        )
    }
}

/// Total number of vertices across a set of obstacles
pub fn vertex_count(obstacles: &[Obstacle]) -> usize {
    obstacles.iter().map(|o| o.vertices().len()).sum()
}
