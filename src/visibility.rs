use crate::error::VisibilityError;
use crate::obstacle::Obstacle;
use crate::segment::{intersect, Point, Segment};

/// Default angular offset of the two probe rays around each vertex (radians)
pub const DEFAULT_PROBE_OFFSET: f64 = 0.005;

/// Default probe ray length, longer than any distance inside the playfield
pub const DEFAULT_RAY_LENGTH: f64 = 1000.0;

/// Tunables for the ray caster
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityParams {
    /// Each vertex is bracketed by probes at `angle - probe_offset` and `angle + probe_offset`
    pub probe_offset: f64,
    /// Length of every probe ray
    pub ray_length: f64,
}

impl Default for VisibilityParams {
    fn default() -> Self {
        VisibilityParams {
            probe_offset: DEFAULT_PROBE_OFFSET,
            ray_length: DEFAULT_RAY_LENGTH,
        }
    }
}

/// Cast the rays that outline everything visible from (viewer_x, viewer_y)
///
/// Two probe rays are cast per obstacle vertex, slightly either side of it, so
/// the visibility polygon gets a sharp corner instead of a ray that grazes the
/// vertex itself. Each probe stops at the nearest wall it hits. The result is
/// sorted by angle so consecutive rays bound one triangle of the lit fan.
///
/// A probe that hits nothing means the obstacles do not enclose the viewer,
/// which is reported as `RayEscaped`.
pub fn cast_visibility(
    viewer_x: f64,
    viewer_y: f64,
    obstacles: &[Obstacle],
    params: &VisibilityParams,
) -> Result<Vec<Segment>, VisibilityError> {
    let viewer = Point::new(viewer_x, viewer_y);
    let mut rays = Vec::new();

    for obstacle in obstacles {
        for vertex in obstacle.vertices() {
            let angle = Segment::from_points(viewer, vertex).angle();

            for offset in [-params.probe_offset, params.probe_offset] {
                let probe_angle = angle + offset;
                let probe = Segment::from_angle(viewer, params.ray_length, probe_angle);
                let hit = nearest_hit(&viewer, &probe, obstacles)
                    .ok_or(VisibilityError::RayEscaped { angle: probe_angle })?;
                rays.push(Segment::from_points(viewer, hit));
            }
        }
    }

    rays.sort_by(|a, b| a.angle().total_cmp(&b.angle()));
    Ok(rays)
}

/// Intersection of `probe` with any wall that lies closest to `viewer`
fn nearest_hit(viewer: &Point, probe: &Segment, obstacles: &[Obstacle]) -> Option<Point> {
    obstacles
        .iter()
        .flat_map(|o| o.segments())
        .filter_map(|wall| intersect(probe, wall))
        .min_by(|a, b| {
            viewer
                .distance_squared(a)
                .total_cmp(&viewer.distance_squared(b))
        })
}

/// Endpoints of the sorted rays, i.e. the outline of the visible region
pub fn visibility_polygon(rays: &[Segment]) -> Vec<Point> {
    rays.iter().map(Segment::end).collect()
}

/// Triangles of the lit fan: (viewer, next ray end, this ray end)
///
/// The last ray pairs with the first so the fan closes all the way round.
pub fn fan_triangles(viewer: Point, rays: &[Segment]) -> Vec<[Point; 3]> {
    let n = rays.len();
    rays.iter()
        .enumerate()
        .map(|(i, ray)| [viewer, rays[(i + 1) % n].end(), ray.end()])
        .collect()
}
