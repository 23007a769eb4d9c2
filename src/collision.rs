use crate::obstacle::Obstacle;
use crate::segment::Segment;

/// Four edges of the axis-aligned square of `half_extent` centred on (x, y)
pub fn bounding_square(x: f64, y: f64, half_extent: f64) -> [Segment; 4] {
    let left = x - half_extent;
    let right = x + half_extent;
    let top = y - half_extent;
    let bottom = y + half_extent;

    [
        Segment::new(left, top, right, top),
        Segment::new(right, top, right, bottom),
        Segment::new(right, bottom, left, bottom),
        Segment::new(left, bottom, left, top),
    ]
}

/// Whether an entity centred on (x, y) would touch any obstacle
///
/// Exact test: every edge of the entity's bounding square is intersected with
/// every obstacle segment. Touching counts as colliding.
pub fn is_colliding(x: f64, y: f64, half_extent: f64, obstacles: &[Obstacle]) -> bool {
    let edges = bounding_square(x, y, half_extent);
    obstacles.iter().any(|o| o.touches_any(&edges))
}
