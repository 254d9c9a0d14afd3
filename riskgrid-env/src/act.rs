//! Actions and facing directions.
use crate::error::ConfigError;
use riskgrid_core::Act;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Facing direction of the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards decreasing `x`.
    West,
    /// Towards decreasing `y`.
    North,
    /// Towards increasing `x`.
    East,
    /// Towards increasing `y`.
    South,
}

impl Direction {
    /// Unit vector `(dx, dy)` of the direction.
    pub fn vec(self) -> (i32, i32) {
        match self {
            Direction::West => (-1, 0),
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
        }
    }
}

/// Action of [`RiskyPathEnv`](crate::RiskyPathEnv): a move in one of four directions.
///
/// The discriminants are the action indices used by learning algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum RiskyPathAct {
    /// Move west.
    West = 0,
    /// Move north.
    North = 1,
    /// Move east.
    East = 2,
    /// Move south.
    South = 3,
}

impl RiskyPathAct {
    /// Number of actions.
    pub const N_ACTIONS: usize = 4;

    /// All actions in index order.
    pub const ALL: [RiskyPathAct; 4] = [
        RiskyPathAct::West,
        RiskyPathAct::North,
        RiskyPathAct::East,
        RiskyPathAct::South,
    ];

    /// The direction the agent faces after taking this action.
    pub fn direction(self) -> Direction {
        match self {
            RiskyPathAct::West => Direction::West,
            RiskyPathAct::North => Direction::North,
            RiskyPathAct::East => Direction::East,
            RiskyPathAct::South => Direction::South,
        }
    }

    /// Action index.
    pub fn index(self) -> u8 {
        self as u8
    }
}

impl Act for RiskyPathAct {}

impl TryFrom<u8> for RiskyPathAct {
    type Error = ConfigError;

    fn try_from(ix: u8) -> Result<Self, Self::Error> {
        RiskyPathAct::ALL
            .get(ix as usize)
            .copied()
            .ok_or(ConfigError::UnknownAction(ix))
    }
}
