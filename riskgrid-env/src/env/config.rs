//! Configuration of [`RiskyPathEnv`](super::RiskyPathEnv).
use crate::{
    check_dimensions, default_lava_positions, default_risky_positions, error::ConfigError,
    transition::TransitionResolver, Grid, GridBuilder, Pos, RewardSpec,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    default::Default,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configurations of [`RiskyPathEnv`](super::RiskyPathEnv).
///
/// The default is an 11x11 room with the agent at `(2, 9)`, a goal at
/// `(1, 3)` and the default lava layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskyPathEnvConfig {
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) agent_start_pos: Pos,
    pub(crate) goal_positions: Vec<Pos>,
    /// Walls inside the room, in addition to the outer ring.
    #[serde(default)]
    pub(crate) wall_positions: Vec<Pos>,
    /// `None` selects [`default_lava_positions`].
    pub(crate) lava_positions: Option<Vec<Pos>>,
    pub(crate) risky_active: bool,
    /// `None` selects [`default_risky_positions`] when risky tiles are active.
    pub(crate) risky_positions: Option<Vec<Pos>>,
    pub(crate) reward_spec: RewardSpec,
    pub(crate) slip_proba: f64,
    pub(crate) wall_rebound: bool,
    pub(crate) max_steps: usize,
    pub(crate) seed: u64,
}

impl Default for RiskyPathEnvConfig {
    fn default() -> Self {
        Self {
            width: 11,
            height: 11,
            agent_start_pos: Pos::new(2, 9),
            goal_positions: vec![Pos::new(1, 3)],
            wall_positions: vec![],
            lava_positions: None,
            risky_active: false,
            risky_positions: None,
            reward_spec: RewardSpec::default(),
            slip_proba: 0.0,
            wall_rebound: false,
            max_steps: 150,
            seed: 1337,
        }
    }
}

impl RiskyPathEnvConfig {
    /// Sets the size of the grid, walls included.
    pub fn size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the start position of the agent.
    pub fn agent_start_pos(mut self, pos: impl Into<Pos>) -> Self {
        self.agent_start_pos = pos.into();
        self
    }

    /// Sets the goal positions.
    pub fn goal_positions(mut self, positions: Vec<Pos>) -> Self {
        self.goal_positions = positions;
        self
    }

    /// Sets the interior wall positions.
    pub fn wall_positions(mut self, positions: Vec<Pos>) -> Self {
        self.wall_positions = positions;
        self
    }

    /// Sets the lava positions. `None` selects the default layout.
    pub fn lava_positions(mut self, positions: Option<Vec<Pos>>) -> Self {
        self.lava_positions = positions;
        self
    }

    /// Activates or deactivates risky tiles.
    pub fn risky_active(mut self, v: bool) -> Self {
        self.risky_active = v;
        self
    }

    /// Sets the risky tile positions. `None` selects the default layout.
    pub fn risky_positions(mut self, positions: Option<Vec<Pos>>) -> Self {
        self.risky_positions = positions;
        self
    }

    /// Sets the reward specification.
    pub fn reward_spec(mut self, reward_spec: RewardSpec) -> Self {
        self.reward_spec = reward_spec;
        self
    }

    /// Sets the slip probability.
    pub fn slip_proba(mut self, v: f64) -> Self {
        self.slip_proba = v;
        self
    }

    /// Enables or disables rebound on blocked moves.
    pub fn wall_rebound(mut self, v: bool) -> Self {
        self.wall_rebound = v;
        self
    }

    /// Sets the maximum number of steps per episode.
    pub fn max_steps(mut self, v: usize) -> Self {
        self.max_steps = v;
        self
    }

    /// Sets the default random seed, used by [`RiskyPathEnv::new`](super::RiskyPathEnv::new).
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    /// Returns the default random seed.
    pub fn get_seed(&self) -> u64 {
        self.seed
    }

    /// Returns `true` if risky tiles are active.
    pub fn is_risky_active(&self) -> bool {
        self.risky_active
    }

    /// Lava positions with the default layout resolved.
    pub fn resolved_lava_positions(&self) -> Vec<Pos> {
        match &self.lava_positions {
            Some(positions) => positions.clone(),
            None => default_lava_positions(self.width, self.height),
        }
    }

    /// Risky positions with the default layout resolved; empty if risky tiles are inactive.
    pub fn resolved_risky_positions(&self) -> Vec<Pos> {
        match (&self.risky_positions, self.risky_active) {
            (_, false) => vec![],
            (Some(positions), true) => positions.clone(),
            (None, true) => default_risky_positions(self.width, self.height),
        }
    }

    /// Checks the configuration without building the grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.width, self.height);
        check_dimensions(width, height)?;

        let start = self.agent_start_pos;
        if start.x <= 0 || start.y <= 0 || start.x >= width - 1 || start.y >= height - 1 {
            return Err(ConfigError::StartNotInterior(start));
        }
        if self.wall_positions.contains(&start) {
            return Err(ConfigError::StartOnWall(start));
        }
        if self.goal_positions.contains(&start) {
            return Err(ConfigError::StartOnGoal(start));
        }
        if self.resolved_lava_positions().contains(&start) {
            return Err(ConfigError::StartOnLava(start));
        }

        if self.reward_spec.risky_tile_reward != 0.0 && !self.risky_active {
            return Err(ConfigError::RiskyRewardWithoutRiskyTiles(
                self.reward_spec.risky_tile_reward,
            ));
        }
        TransitionResolver::new(self.slip_proba, self.wall_rebound)?;
        if self.max_steps == 0 {
            return Err(ConfigError::InvalidMaxSteps);
        }

        Ok(())
    }

    /// Builder of the grid described by this configuration.
    pub fn grid_builder(&self) -> GridBuilder {
        GridBuilder::new(self.width, self.height)
            .walls(self.wall_positions.iter().copied())
            .lava(self.resolved_lava_positions())
            .risky(self.resolved_risky_positions())
            .goals(self.goal_positions.iter().copied())
    }

    /// Validates the configuration and builds the grid.
    pub fn build_grid(&self) -> Result<Grid, ConfigError> {
        self.validate()?;
        self.grid_builder().build()
    }

    /// Constructs [`RiskyPathEnvConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`RiskyPathEnvConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
