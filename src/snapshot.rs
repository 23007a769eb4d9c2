use serde::{Deserialize, Serialize};

use crate::error::{Result, SnapshotError};
use crate::segment::{Point, Segment};
use crate::world::World;

/// One frame of visibility output, for debugging outside the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub viewer: Point,
    #[serde(rename = "rayCount")]
    pub ray_count: usize,
    pub rays: Vec<Segment>,
}

impl FrameSnapshot {
    pub fn new(viewer: Point, rays: Vec<Segment>) -> Self {
        FrameSnapshot {
            viewer,
            ray_count: rays.len(),
            rays,
        }
    }

    /// Cast rays from `viewer` in `world` and record them
    pub fn capture(world: &World, viewer: Point) -> Result<Self> {
        let rays = world.visibility_from(viewer)?;
        Ok(FrameSnapshot::new(viewer, rays))
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}
