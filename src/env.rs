use std::{collections::BTreeMap, fmt};

use crate::error::{Error, Result};

/// Represents a Markov decision process, defining the dynamics of an environment
/// in which an agent can operate.
///
/// This base trait represents the common case of a discrete-time MDP with one agent.
pub trait Environment {
    /// A representation of the state of the environment to be passed to an agent
    type State;

    /// A representation of an action that an agent can take to affect the environment
    type Action;

    /// Update the environment in response to an action taken by an agent, producing a new state and associated reward
    ///
    /// **Returns** `(next_state, reward)`, where `next_state` is `None` if the episode has terminated
    fn step(&mut self, action: Self::Action) -> (Option<Self::State>, f64);

    /// Reset the environment to an initial state
    ///
    /// **Returns** the state
    fn reset(&mut self) -> Self::State;

    /// Choose a random action
    fn random_action(&self) -> Self::Action;
}

/// An environment with a finite set of actions
pub trait DiscreteActionSpace: Environment {
    /// Get the available actions for the current state
    ///
    /// The returned vec should never be empty, instead specify an action that represents doing nothing if necessary.
    fn actions(&self) -> Vec<Self::Action>;
}

type Constructor<E> = Box<dyn Fn() -> E>;

/// Resolves environment identifiers like `"FrozenLake-v1"` to fresh environment instances
pub struct Registry<E> {
    constructors: BTreeMap<String, Constructor<E>>,
}

impl<E> Registry<E> {
    pub fn new() -> Self {
        Self {
            constructors: BTreeMap::new(),
        }
    }

    /// Register a constructor under `id`, replacing any previous one
    pub fn register(&mut self, id: impl Into<String>, constructor: impl Fn() -> E + 'static) {
        self.constructors.insert(id.into(), Box::new(constructor));
    }

    /// Builder form of [`register`](Self::register)
    pub fn with(mut self, id: impl Into<String>, constructor: impl Fn() -> E + 'static) -> Self {
        self.register(id, constructor);
        self
    }

    /// Construct the environment registered under `id`
    pub fn make(&self, id: &str) -> Result<E> {
        self.constructors
            .get(id)
            .map(|constructor| constructor())
            .ok_or_else(|| Error::UnknownEnvironment(id.to_string()))
    }

    /// Registered identifiers in sorted order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }
}

impl<E> Default for Registry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Registry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.ids()).finish()
    }
}
