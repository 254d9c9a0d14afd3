//! The RiskyPath environment.
mod config;
use crate::{
    transition::{self, TransitionResolver},
    Direction, EpisodeState, Grid, Pos, RewardSpec, RiskyPathAct, RiskyPathInfo, TensorObs,
    TensorObsSpace, Tile,
};
use anyhow::Result;
pub use config::RiskyPathEnvConfig;
use log::{debug, info, trace};
use rand::{rngs::StdRng, SeedableRng};
use riskgrid_core::{
    record::{Record, RecordValue},
    Env, Step,
};

/// A room surrounded by walls with lava, goals and optional risky tiles.
///
/// The agent moves in one of four directions per step. A move may slip with
/// a configured probability, and blocked moves may rebound to a random open
/// neighbour. Goals and lava end the episode, or, with absorbing states,
/// keep the agent in place and keep paying their absorbing rewards.
///
/// ```
/// use riskgrid_core::Env as _;
/// use riskgrid_env::{RiskyPathAct, RiskyPathEnv, RiskyPathEnvConfig};
///
/// let mut env = RiskyPathEnv::new(&RiskyPathEnvConfig::default()).unwrap();
/// env.reset(None).unwrap();
///
/// // The default layout has a column of lava west of the start position.
/// let (step, _) = env.step(&RiskyPathAct::West);
/// assert!(step.is_terminated);
/// assert_eq!(step.reward, -1.0);
/// ```
pub struct RiskyPathEnv {
    config: RiskyPathEnvConfig,
    grid: Grid,
    resolver: TransitionResolver,
    reward_spec: RewardSpec,
    obs_space: TensorObsSpace,
    agent_pos: Pos,
    agent_dir: Direction,
    episode: EpisodeState,
    rng: StdRng,
}

impl RiskyPathEnv {
    /// Builds the environment with the seed in the configuration.
    pub fn new(config: &RiskyPathEnvConfig) -> Result<Self> {
        Self::build(config, config.get_seed() as i64)
    }

    /// The configuration the environment was built with.
    pub fn config(&self) -> &RiskyPathEnvConfig {
        &self.config
    }

    /// The static terrain.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Current position of the agent.
    pub fn agent_pos(&self) -> Pos {
        self.agent_pos
    }

    /// Current facing of the agent.
    pub fn agent_dir(&self) -> Direction {
        self.agent_dir
    }

    /// Steps taken in the current episode.
    pub fn step_count(&self) -> usize {
        self.episode.step_count()
    }

    /// Whether the last step ended the episode.
    pub fn is_done(&self) -> bool {
        self.episode.is_done()
    }

    /// Whether the agent can leave its current cell.
    pub fn can_move(&self) -> bool {
        transition::can_move(&self.grid, self.agent_pos)
    }

    /// Shape and bounds of [`RiskyPathEnv::tensor_obs`].
    pub fn tensor_obs_space(&self) -> TensorObsSpace {
        self.obs_space
    }

    /// Encodes the current state of the environment.
    pub fn tensor_obs(&self) -> TensorObs {
        TensorObs::encode(&self.grid, self.agent_pos, &self.obs_space)
    }

    fn reset_agent(&mut self) {
        self.agent_pos = self.config.agent_start_pos;
        self.agent_dir = Direction::North;
        self.episode.reset();
    }
}

impl Env for RiskyPathEnv {
    type Config = RiskyPathEnvConfig;
    type Obs = TensorObs;
    type Act = RiskyPathAct;
    type Info = RiskyPathInfo;

    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized,
    {
        let grid = config.build_grid()?;
        let resolver = TransitionResolver::new(config.slip_proba, config.wall_rebound)?;
        let obs_space =
            TensorObsSpace::new(config.width, config.height, config.is_risky_active());

        info!(
            "Built {}x{} RiskyPath environment (slip_proba = {}, wall_rebound = {}, seed = {})",
            config.width, config.height, config.slip_proba, config.wall_rebound, seed
        );

        Ok(Self {
            config: config.clone(),
            grid,
            resolver,
            reward_spec: config.reward_spec,
            obs_space,
            agent_pos: config.agent_start_pos,
            agent_dir: Direction::North,
            episode: EpisodeState::new(config.max_steps),
            rng: StdRng::seed_from_u64(seed as u64),
        })
    }

    fn reset(&mut self, _is_done: Option<&Vec<i8>>) -> Result<Self::Obs> {
        self.reset_agent();
        Ok(self.tensor_obs())
    }

    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs> {
        debug!("Reset with index {}", ix);
        self.reset(None)
    }

    fn step(&mut self, act: &Self::Act) -> (Step<Self>, Record)
    where
        Self: Sized,
    {
        self.episode.tick();
        let previous_pos = self.agent_pos;

        let t = self
            .resolver
            .resolve(&self.grid, self.agent_pos, *act, &mut self.rng);
        self.agent_pos = t.pos;
        self.agent_dir = t.dir;

        let tile = self.grid.get(self.agent_pos);
        let outcome = self.reward_spec.evaluate(tile);
        let (is_terminated, is_truncated) = self.episode.finish_step(outcome.terminated);

        let info = RiskyPathInfo {
            agent_pos: self.agent_pos,
            previous_pos,
            actual_movement_vec: self.agent_pos.displacement_from(previous_pos),
            intended_movement_vec: t.dir.vec(),
            slipped: t.slipped,
            current_cell_type: match tile {
                Tile::Empty => None,
                tile => Some(tile),
            },
        };
        trace!(
            "step {}: {:?} {} -> {}, reward = {}",
            self.episode.step_count(),
            act,
            previous_pos,
            self.agent_pos,
            outcome.reward
        );
        if is_terminated || is_truncated {
            debug!(
                "Episode ended at step {} on {} (terminated = {}, truncated = {})",
                self.episode.step_count(),
                tile,
                is_terminated,
                is_truncated
            );
        }

        let mut record = Record::from(&info);
        record.insert(
            "step_count",
            RecordValue::Scalar(self.episode.step_count() as f32),
        );

        let step = Step::new(
            self.tensor_obs(),
            *act,
            outcome.reward,
            is_terminated,
            is_truncated,
            info,
        );

        (step, record)
    }
}
