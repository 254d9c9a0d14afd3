//! Errors raised while building a [`RiskyPathEnv`](crate::RiskyPathEnv).
use crate::Pos;
use thiserror::Error;

/// Invalid configuration of the environment.
///
/// All of these are detected eagerly when the environment is built.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Width or height below the minimum of 6.
    #[error("Invalid grid dimensions {width}x{height}, both must be at least 6")]
    InvalidDimensions {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },

    /// Width times height does not fit the cell index type.
    #[error("Grid dimensions {width}x{height} are too large")]
    GridTooLarge {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },

    /// The agent does not start strictly inside the outer walls.
    #[error("Agent start position {0} is not in the interior of the grid")]
    StartNotInterior(Pos),

    /// The agent starts on a goal tile.
    #[error("Agent start position {0} is a goal position")]
    StartOnGoal(Pos),

    /// The agent starts on a lava tile.
    #[error("Agent start position {0} is a lava position")]
    StartOnLava(Pos),

    /// The agent starts on an interior wall.
    #[error("Agent start position {0} is a wall position")]
    StartOnWall(Pos),

    /// A tile placement outside the interior of the grid.
    #[error("Tile placement {0} is outside the interior of the grid")]
    PlacementOutOfBounds(Pos),

    /// Lava and risky tiles placed on the same cell.
    #[error("Lava and risky tiles overlap at {0}")]
    HazardConflict(Pos),

    /// An interior wall placed on the same cell as another tile.
    #[error("Interior wall overlaps another placement at {0}")]
    WallConflict(Pos),

    /// Nonzero risky tile reward while risky tiles are disabled.
    #[error("Risky tile reward must be 0 if risky tiles are not active, got {0}")]
    RiskyRewardWithoutRiskyTiles(f32),

    /// Slip probability outside `[0, 1)`.
    #[error("Slip probability must be in [0, 1), got {0}")]
    InvalidSlipProbability(f64),

    /// A step budget of zero.
    #[error("Maximum number of steps must be positive")]
    InvalidMaxSteps,

    /// An action index outside the four moves.
    #[error("Unknown action index {0}, expected 0..=3")]
    UnknownAction(u8),
}
