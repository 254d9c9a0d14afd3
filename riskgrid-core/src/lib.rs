#![warn(missing_docs)]
//! Core interfaces of riskgrid.
//!
//! This crate defines the interaction between environments and policies
//! independently of any concrete environment:
//!
//! * [`Env`] - an MDP, built from a configuration and a random seed
//! * [`Obs`], [`Act`] and [`Info`] - what flows between an environment and a policy
//! * [`Step`] - the outcome of a single environment step
//! * [`Policy`] - a mapping from observations to actions
//! * [`record`] - key/value records emitted alongside steps
//! * [`Evaluator`] - runs a policy for a number of episodes
pub mod error;
pub mod record;
pub mod util;

mod base;
pub use base::{Act, Configurable, Env, Info, Obs, Policy, Step};

mod evaluator;
pub use evaluator::{DefaultEvaluator, Evaluator};
