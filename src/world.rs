use log::{debug, trace, warn};

use crate::collision::is_colliding;
use crate::error::{Result, VisibilityError, WorldError};
use crate::obstacle::{vertex_count, Obstacle};
use crate::segment::{Point, Segment};
use crate::viewer::Viewer;
use crate::visibility::{cast_visibility, VisibilityParams};

/// Screen-sized area the viewer moves in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f64,
    pub height: f64,
    /// Border between the screen edge and the outer wall
    pub padding: f64,
}

impl Default for Playfield {
    fn default() -> Self {
        Playfield {
            width: 640.0,
            height: 480.0,
            padding: 20.0,
        }
    }
}

impl Playfield {
    /// Bounds a position is clamped to: (min_x, min_y, max_x, max_y)
    ///
    /// One unit inside the padding so the viewer never sits exactly on the
    /// outer wall.
    pub fn playable_bounds(&self) -> (f64, f64, f64, f64) {
        (
            self.padding + 1.0,
            self.padding + 1.0,
            self.width - self.padding - 1.0,
            self.height - self.padding - 1.0,
        )
    }

    pub fn clamp(&self, p: Point) -> Point {
        let (min_x, min_y, max_x, max_y) = self.playable_bounds();
        Point::new(p.x.clamp(min_x, max_x), p.y.clamp(min_y, max_y))
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Outer wall running along the inside of the padding
    pub fn outer_wall(&self) -> Result<Obstacle> {
        Ok(Obstacle::rect(
            self.padding,
            self.padding,
            self.width - 2.0 * self.padding,
            self.height - 2.0 * self.padding,
        )?)
    }

    fn validate(&self) -> Result<(), WorldError> {
        let (min_x, min_y, max_x, max_y) = self.playable_bounds();
        let finite = [self.width, self.height, self.padding].iter().all(|v| v.is_finite());
        if !finite || self.padding < 0.0 || min_x >= max_x || min_y >= max_y {
            return Err(WorldError::InvalidPlayfield {
                width: self.width,
                height: self.height,
                padding: self.padding,
            });
        }
        Ok(())
    }
}

/// Static obstacles plus the playfield they live in
///
/// Built once at startup and never changed afterwards. Construction checks
/// that some closed obstacle encloses the whole playable area and that probe
/// rays are long enough to cross it, so every probe cast from a reachable
/// position hits a wall.
#[derive(Debug, Clone)]
pub struct World {
    playfield: Playfield,
    obstacles: Vec<Obstacle>,
    params: VisibilityParams,
}

impl World {
    pub fn new(
        playfield: Playfield,
        obstacles: Vec<Obstacle>,
        params: VisibilityParams,
    ) -> Result<Self, WorldError> {
        playfield.validate()?;
        if !params.probe_offset.is_finite() || params.probe_offset <= 0.0 {
            return Err(WorldError::InvalidProbeOffset {
                probe_offset: params.probe_offset,
            });
        }

        let enclosure = find_enclosure(&playfield, &obstacles).ok_or(WorldError::NotEnclosed)?;
        let (min_x, min_y, max_x, max_y) = enclosure.bounds();
        let required = ((max_x - min_x).powi(2) + (max_y - min_y).powi(2)).sqrt();
        if params.ray_length <= required {
            return Err(WorldError::RayTooShort {
                ray_length: params.ray_length,
                required,
            });
        }

        debug!(
            "World built: {} obstacles, {} vertices, {} rays per frame",
            obstacles.len(),
            vertex_count(&obstacles),
            2 * vertex_count(&obstacles)
        );

        Ok(World {
            playfield,
            obstacles,
            params,
        })
    }

    /// Outer wall, one angled wall and two rectangles
    pub fn default_level(playfield: Playfield, params: VisibilityParams) -> Result<Self> {
        let obstacles = vec![
            playfield.outer_wall()?,
            Obstacle::from_segments(vec![Segment::new(50.0, 110.0, 100.0, 150.0)])?,
            Obstacle::rect(45.0, 50.0, 70.0, 20.0)?,
            Obstacle::rect(150.0, 50.0, 30.0, 60.0)?,
        ];
        Ok(World::new(playfield, obstacles, params)?)
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn params(&self) -> &VisibilityParams {
        &self.params
    }

    /// Check that `viewer` can move in this world from where it stands
    ///
    /// Speed must be finite and not negative, and the collision square must
    /// be wider than one step so a step cannot jump over a thin wall. The
    /// start must lie in the playable area and must not touch an obstacle.
    pub fn check_viewer(&self, viewer: &Viewer) -> Result<(), WorldError> {
        if !viewer.speed.is_finite() || viewer.speed < 0.0 {
            return Err(WorldError::InvalidSpeed { speed: viewer.speed });
        }
        if !viewer.half_extent.is_finite() || viewer.half_extent <= viewer.speed / 2.0 {
            return Err(WorldError::InvalidHalfExtent {
                half_extent: viewer.half_extent,
                speed: viewer.speed,
            });
        }

        let (min_x, min_y, max_x, max_y) = self.playfield.playable_bounds();
        let (x, y) = (viewer.px, viewer.py);
        if !(min_x..=max_x).contains(&x) || !(min_y..=max_y).contains(&y) {
            return Err(WorldError::StartOutOfBounds { x, y });
        }
        if is_colliding(x, y, viewer.half_extent, &self.obstacles) {
            return Err(WorldError::StartBlocked { x, y });
        }
        Ok(())
    }

    /// Validated viewer, moved to the playfield centre if its start is unusable
    ///
    /// Bad speed or size is still an error, as is a blocked centre.
    pub fn place_viewer(&self, viewer: Viewer) -> Result<Viewer, WorldError> {
        match self.check_viewer(&viewer) {
            Ok(()) => Ok(viewer),
            Err(e @ (WorldError::StartOutOfBounds { .. } | WorldError::StartBlocked { .. })) => {
                warn!("{}; starting at the playfield centre", e);
                let center = self.playfield.center();
                let moved = Viewer::new(center.x, center.y, viewer.half_extent, viewer.speed);
                self.check_viewer(&moved)?;
                Ok(moved)
            }
            Err(e) => Err(e),
        }
    }

    /// Sorted visibility rays from `viewer`
    pub fn visibility_from(&self, viewer: Point) -> Result<Vec<Segment>, VisibilityError> {
        let rays = cast_visibility(viewer.x, viewer.y, &self.obstacles, &self.params)?;
        trace!("Cast {} rays from ({:.1}, {:.1})", rays.len(), viewer.x, viewer.y);
        Ok(rays)
    }
}

/// First closed obstacle that fully contains the playable area
///
/// The playable rectangle is inside a polygon when all four of its corners
/// are inside and none of its edges crosses the polygon outline.
fn find_enclosure<'a>(playfield: &Playfield, obstacles: &'a [Obstacle]) -> Option<&'a Obstacle> {
    let (min_x, min_y, max_x, max_y) = playfield.playable_bounds();
    let corners = [
        Point::new(min_x, min_y),
        Point::new(max_x, min_y),
        Point::new(max_x, max_y),
        Point::new(min_x, max_y),
    ];
    let edges: Vec<Segment> = (0..4)
        .map(|i| Segment::from_points(corners[i], corners[(i + 1) % 4]))
        .collect();

    obstacles.iter().find(|o| {
        o.is_closed() && corners.iter().all(|c| o.contains(*c)) && !o.touches_any(&edges)
    })
}
