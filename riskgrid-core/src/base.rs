//! Core functionalities.
mod env;
mod policy;
mod step;
pub use env::Env;
pub use policy::{Configurable, Policy};
use std::fmt::Debug;
pub use step::{Info, Step};

/// An observation of an environment.
///
/// Environments in this library are not vectorized, so an observation
/// object always holds a single observation.
pub trait Obs: Clone + Debug {
    /// Returns the number of elements of the observation.
    fn len(&self) -> usize;
}

/// An action on an environment.
pub trait Act: Clone + Debug {
    /// Returns the number of elements of the action.
    fn len(&self) -> usize {
        1
    }
}
