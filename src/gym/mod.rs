pub mod frozen_lake;

pub use frozen_lake::{FLAction, FrozenLake};

use crate::env::Registry;

/// A [`Registry`] with the built-in environments
pub fn registry() -> Registry<FrozenLake> {
    Registry::new().with("FrozenLake-v1", FrozenLake::new)
}
