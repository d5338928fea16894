use std::collections::BTreeMap;

use crate::{
    error::{Error, Result},
    util::ensure_interval,
};

/// A named configuration value supplied in addition to the fixed [`TrainerConfig`] fields
#[derive(Debug, Clone, PartialEq)]
pub enum Extra {
    Float(f64),
    Int(i64),
    Bool(bool),
    Text(String),
}

impl From<f64> for Extra {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<i64> for Extra {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for Extra {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Extra {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Extra {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Types that can be read out of an [`Extra`]
pub trait FromExtra: Sized {
    const EXPECTED: &'static str;

    fn from_extra(extra: &Extra) -> Option<Self>;
}

impl FromExtra for f64 {
    const EXPECTED: &'static str = "float";

    fn from_extra(extra: &Extra) -> Option<Self> {
        match *extra {
            Extra::Float(x) => Some(x),
            // integers widen to floats
            Extra::Int(x) => Some(x as f64),
            _ => None,
        }
    }
}

impl FromExtra for i64 {
    const EXPECTED: &'static str = "integer";

    fn from_extra(extra: &Extra) -> Option<Self> {
        match *extra {
            Extra::Int(x) => Some(x),
            _ => None,
        }
    }
}

impl FromExtra for usize {
    const EXPECTED: &'static str = "non-negative integer";

    fn from_extra(extra: &Extra) -> Option<Self> {
        match *extra {
            Extra::Int(x) => x.try_into().ok(),
            _ => None,
        }
    }
}

impl FromExtra for bool {
    const EXPECTED: &'static str = "bool";

    fn from_extra(extra: &Extra) -> Option<Self> {
        match *extra {
            Extra::Bool(x) => Some(x),
            _ => None,
        }
    }
}

impl FromExtra for String {
    const EXPECTED: &'static str = "string";

    fn from_extra(extra: &Extra) -> Option<Self> {
        match extra {
            Extra::Text(x) => Some(x.clone()),
            _ => None,
        }
    }
}

/// String-keyed extension values with typed access
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extras {
    values: BTreeMap<String, Extra>,
}

impl Extras {
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Extra>) -> Option<Extra> {
        self.values.insert(key.into(), value.into())
    }

    /// Get the value under `key` as a `T`
    ///
    /// ### Errors
    /// - [`Error::MissingExtra`] if nothing is stored under `key`
    /// - [`Error::ExtraType`] if the stored value is not a `T`
    pub fn get<T: FromExtra>(&self, key: &str) -> Result<T> {
        let extra = self
            .values
            .get(key)
            .ok_or_else(|| Error::MissingExtra(key.to_string()))?;
        T::from_extra(extra).ok_or_else(|| Error::ExtraType {
            key: key.to_string(),
            expected: T::EXPECTED,
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<Extra>> FromIterator<(K, V)> for Extras {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut extras = Self::default();
        for (k, v) in iter {
            extras.insert(k, v);
        }
        extras
    }
}

/// Configuration for a [`Harness`](crate::trainer::Harness)
#[derive(Debug, Clone, PartialEq)]
pub struct TrainerConfig {
    /// Identifier used to resolve the environment from a [`Registry`](crate::env::Registry)
    pub env_id: String,
    /// Number of episodes run by one call to `train`
    pub num_episodes: usize,
    /// Initial learning rate
    pub alpha: f64,
    /// Discount factor, must be between 0 and 1
    pub gamma: f64,
    /// Name of the policy strategy, see [`PolicyKind`](crate::policy::PolicyKind)
    pub policy: String,
    /// Print progress every `report_freq` episodes
    pub report_freq: usize,
    pub extras: Extras,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            env_id: String::from("FrozenLake-v1"),
            num_episodes: 1000,
            alpha: 0.1,
            gamma: 0.99,
            policy: String::from("epsilon_greedy"),
            report_freq: 100,
            extras: Extras::default(),
        }
    }
}

impl TrainerConfig {
    pub fn new(
        env_id: impl Into<String>,
        num_episodes: usize,
        alpha: f64,
        gamma: f64,
        policy: impl Into<String>,
    ) -> Self {
        Self {
            env_id: env_id.into(),
            num_episodes,
            alpha,
            gamma,
            policy: policy.into(),
            ..Default::default()
        }
    }

    pub fn with_report_freq(mut self, report_freq: usize) -> Self {
        self.report_freq = report_freq;
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Extra>) -> Self {
        self.extras.insert(key, value);
        self
    }

    /// Check the numeric fields
    ///
    /// The policy name is not checked here, an unknown name is reported by the first policy call.
    pub fn validate(&self) -> Result<()> {
        if self.num_episodes == 0 {
            return Err(Error::InvalidConfig {
                field: "num_episodes",
                reason: "must be positive".into(),
            });
        }
        if self.report_freq == 0 {
            return Err(Error::InvalidConfig {
                field: "report_freq",
                reason: "must be positive".into(),
            });
        }
        ensure_interval!(self.gamma, 0.0, 1.0)
    }
}
