//! Tensor observation of the full grid.
use crate::{Grid, Pos, Tile};
use ndarray::Array3;
use riskgrid_core::Obs;

/// Channel of the agent position.
pub const CH_AGENT: usize = 0;
/// Channel of walls.
pub const CH_WALL: usize = 1;
/// Channel of lava.
pub const CH_LAVA: usize = 2;
/// Channel of goals.
pub const CH_GOAL: usize = 3;
/// Channel of risky tiles, present only if risky tiles are active.
pub const CH_RISKY: usize = 4;

/// Shape and bounds of [`TensorObs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TensorObsSpace {
    /// `[width, height, channels]`.
    pub shape: [usize; 3],

    /// Lower bound of every element.
    pub low: u8,

    /// Upper bound of every element.
    pub high: u8,
}

impl TensorObsSpace {
    /// Space for a grid of the given size; 5 channels with risky tiles, 4 otherwise.
    pub fn new(width: i32, height: i32, risky_active: bool) -> Self {
        let n_channels = if risky_active { 5 } else { 4 };
        Self {
            shape: [width as usize, height as usize, n_channels],
            low: 0,
            high: 1,
        }
    }

    /// Number of channels.
    pub fn n_channels(&self) -> usize {
        self.shape[2]
    }

    /// Returns `true` if `obs` has this shape and all elements are within bounds.
    pub fn contains(&self, obs: &TensorObs) -> bool {
        obs.shape() == self.shape && obs.0.iter().all(|&v| v >= self.low && v <= self.high)
    }
}

/// Indicator array of shape `[width, height, channels]`, indexed `[x, y, channel]`.
///
/// Channels are agent, wall, lava, goal and, if risky tiles are active, risky.
#[derive(Debug, Clone, PartialEq)]
pub struct TensorObs(Array3<u8>);

impl TensorObs {
    /// Encodes the grid and the agent position.
    pub fn encode(grid: &Grid, agent_pos: Pos, space: &TensorObsSpace) -> Self {
        let mut data = Array3::<u8>::zeros(space.shape);
        data[[agent_pos.x as usize, agent_pos.y as usize, CH_AGENT]] = 1;

        let risky_active = space.n_channels() > CH_RISKY;
        for (pos, tile) in grid.iter() {
            let ch = match tile {
                Tile::Wall => CH_WALL,
                Tile::Lava => CH_LAVA,
                Tile::Goal => CH_GOAL,
                Tile::Risky if risky_active => CH_RISKY,
                Tile::Risky | Tile::Empty => continue,
            };
            data[[pos.x as usize, pos.y as usize, ch]] = 1;
        }

        Self(data)
    }

    /// The underlying array.
    pub fn array(&self) -> &Array3<u8> {
        &self.0
    }

    /// Consumes the observation and returns the underlying array.
    pub fn into_array(self) -> Array3<u8> {
        self.0
    }

    /// `[width, height, channels]`.
    pub fn shape(&self) -> [usize; 3] {
        let s = self.0.shape();
        [s[0], s[1], s[2]]
    }

    /// Values as `f32` in row-major order, for feeding learning algorithms.
    pub fn to_f32_vec(&self) -> Vec<f32> {
        self.0.iter().map(|&v| v as f32).collect()
    }
}

impl Obs for TensorObs {
    fn len(&self) -> usize {
        self.0.len()
    }
}
