#[derive(Debug, thiserror::Error, PartialEq)]
#[non_exhaustive]
pub enum ObstacleError {
    #[error("An obstacle needs at least one segment")]
    Empty,

    #[error("Segment {index} does not start where the previous segment ends")]
    Disconnected { index: usize },

    #[error("Obstacle coordinates must be finite")]
    NonFinite,
}

#[derive(Debug, thiserror::Error, PartialEq)]
#[non_exhaustive]
pub enum WorldError {
    #[error("Playfield of {width}x{height} with padding {padding} leaves no playable area")]
    InvalidPlayfield { width: f64, height: f64, padding: f64 },

    #[error("No closed obstacle encloses the playable area")]
    NotEnclosed,

    #[error("Ray length {ray_length} is too short, rays must be longer than {required}")]
    RayTooShort { ray_length: f64, required: f64 },

    #[error("Probe offset {probe_offset} must be finite and greater than zero")]
    InvalidProbeOffset { probe_offset: f64 },

    #[error("Viewer speed {speed} must be finite and not negative")]
    InvalidSpeed { speed: f64 },

    #[error("Viewer half-extent {half_extent} must be finite and greater than half the speed ({speed})")]
    InvalidHalfExtent { half_extent: f64, speed: f64 },

    #[error("Viewer start ({x}, {y}) lies outside the playable area")]
    StartOutOfBounds { x: f64, y: f64 },

    #[error("Viewer start ({x}, {y}) overlaps an obstacle")]
    StartBlocked { x: f64, y: f64 },
}

#[derive(Debug, thiserror::Error, PartialEq)]
#[non_exhaustive]
pub enum VisibilityError {
    /// A probe ray left the world without hitting anything. Obstacles must
    /// enclose every position the viewer can reach.
    #[error("Probe ray at angle {angle:.4} rad hit no obstacle, the obstacle set does not enclose the viewer")]
    RayEscaped { angle: f64 },
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SnapshotError {
    #[error("Snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("Obstacle error: {0}")]
    Obstacle(#[from] ObstacleError),

    #[error("World error: {0}")]
    World(#[from] WorldError),

    #[error("Visibility error: {0}")]
    Visibility(#[from] VisibilityError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
