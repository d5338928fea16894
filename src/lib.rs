/// Best-action selection
pub mod argmax;

/// Trainer configuration
pub mod config;

/// Implementations of strategies for time-decaying hyperparameters
pub mod decay;

/// Data structures
pub mod ds;

/// Environment
pub mod env;

/// Exploration policies
pub mod exploration;

/// Experience replay
pub mod memory;

/// Named policy strategies
pub mod policy;

/// The episode-driven training loop
pub mod trainer;

/// Testing environments
#[cfg(feature = "gym")]
pub mod gym;

mod error;
mod util;

pub use argmax::{argmax, argmax_tensor};
pub use error::{Error, Result};
