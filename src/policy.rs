use rand::{thread_rng, Rng};
use strum::{AsRefStr, EnumString, VariantNames};

use crate::{
    argmax::argmax,
    decay::{self, Decay},
    error::{Error, Result},
    exploration::{Choice, EpsilonGreedy, Softmax},
};

/// The policy strategies a [`Trainer`](crate::trainer::Trainer) can dispatch to by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, VariantNames)]
#[strum(serialize_all = "snake_case")]
pub enum PolicyKind {
    /// Always take the highest-valued action
    Greedy,
    /// See [`EpsilonGreedy`]
    EpsilonGreedy,
    /// See [`Softmax`]
    Softmax,
    /// Uniformly random action
    Random,
}

impl PolicyKind {
    /// Resolve a policy name such as `"epsilon_greedy"`
    pub fn resolve(name: &str) -> Result<Self> {
        name.parse()
            .map_err(|_| Error::UnknownPolicy(name.to_string()))
    }
}

/// The exploration strategies owned by a [`Harness`](crate::trainer::Harness)
pub struct Policies {
    pub epsilon_greedy: EpsilonGreedy<Box<dyn Decay>>,
    pub softmax: Softmax<Box<dyn Decay>>,
}

impl Default for Policies {
    fn default() -> Self {
        let epsilon = decay::Exponential::new(1e-3, 1.0, 0.01)
            .expect("default epsilon decay parameters are valid");
        Self {
            epsilon_greedy: EpsilonGreedy::new(Box::new(epsilon)),
            softmax: Softmax::new(Box::new(decay::Constant::new(1.0))),
        }
    }
}

impl Policies {
    /// Choose an action index from `values` using the strategy `kind` at the given episode
    pub fn choose(&self, kind: PolicyKind, episode: usize, values: &[f64]) -> Result<usize> {
        if values.is_empty() {
            return Err(Error::NoActions);
        }
        let random = || thread_rng().gen_range(0..values.len());
        match kind {
            // values is non-empty here, so argmax only fails when every value is NaN
            PolicyKind::Greedy => argmax(values).ok_or(Error::NanValues),
            PolicyKind::EpsilonGreedy => match self.epsilon_greedy.choose(episode) {
                Choice::Explore => Ok(random()),
                Choice::Exploit => argmax(values).ok_or(Error::NanValues),
            },
            PolicyKind::Softmax => self.softmax.choose(episode as f64, values),
            PolicyKind::Random => Ok(random()),
        }
    }
}
