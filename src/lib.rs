pub mod camera;
pub mod collision;
pub mod config;
pub mod error;
pub mod logging;
pub mod movement;
pub mod obstacle;
pub mod segment;
pub mod snapshot;
pub mod viewer;
pub mod visibility;
pub mod world;

pub use collision::is_colliding;
pub use error::{Error, Result};
pub use movement::{tick, Delta, DirectionalInput};
pub use obstacle::Obstacle;
pub use segment::{intersect, Point, Segment};
pub use viewer::Viewer;
pub use visibility::{cast_visibility, VisibilityParams};
pub use world::{Playfield, World};
