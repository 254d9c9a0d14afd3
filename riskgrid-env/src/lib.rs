#![warn(missing_docs)]
//! RiskyPath grid world for riskgrid.
//!
//! An agent walks through a room enclosed by walls towards a goal, avoiding
//! lava and, optionally, risky tiles. Each step is one of four moves; moves
//! can slip with a configured probability and blocked moves can rebound to a
//! random open neighbour. The reward design, including absorbing goal and lava
//! states, is set with [`RewardSpec`].
//!
//! Here is an example of running the default environment with a random policy.
//!
//! ```no_run
//! use anyhow::Result;
//! use riskgrid_core::{DefaultEvaluator, Evaluator as _, Policy};
//! use riskgrid_env::{RiskyPathAct, RiskyPathEnv, RiskyPathEnvConfig, TensorObs};
//!
//! struct RandomPolicy;
//!
//! impl Policy<RiskyPathEnv> for RandomPolicy {
//!     fn sample(&mut self, _: &TensorObs) -> RiskyPathAct {
//!         RiskyPathAct::ALL[fastrand::usize(..RiskyPathAct::N_ACTIONS)]
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     let env_config = RiskyPathEnvConfig::default().slip_proba(0.1);
//!     let record = DefaultEvaluator::<RiskyPathEnv>::new(&env_config, 0, 5)?
//!         .evaluate(&mut RandomPolicy)?;
//!     println!("{:?}", record.get_scalar("Episode return")?);
//!     Ok(())
//! }
//! ```
mod act;
mod env;
mod episode;
pub mod error;
mod grid;
mod info;
mod obs;
mod reward;
pub mod transition;
pub use act::{Direction, RiskyPathAct};
pub use env::{RiskyPathEnv, RiskyPathEnvConfig};
pub use episode::EpisodeState;
pub use error::ConfigError;
pub use grid::{
    check_dimensions, default_lava_positions, default_risky_positions, Grid, GridBuilder, Pos,
    Tile, MIN_GRID_SIZE,
};
pub use info::RiskyPathInfo;
pub use obs::{TensorObs, TensorObsSpace, CH_AGENT, CH_GOAL, CH_LAVA, CH_RISKY, CH_WALL};
pub use reward::{RewardSpec, TileOutcome};
