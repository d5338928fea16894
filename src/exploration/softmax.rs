use rand::{
    distributions::{Distribution, WeightedIndex},
    thread_rng,
};

use crate::{
    decay::Decay,
    error::{Error, Result},
};

/// Softmax exploration policy (also known as Boltzmann exploration) with time-decaying temperature
#[derive(Debug, Clone)]
pub struct Softmax<D: Decay> {
    temperature: D,
}

impl<D: Decay> Softmax<D> {
    pub fn new(decay: D) -> Self {
        Self {
            temperature: decay,
        }
    }

    /// Action probabilities for the given values at time `t`
    pub fn probabilities(&self, t: f64, values: &[f64]) -> Vec<f64> {
        let tau = self.temperature.evaluate(t);
        // shift by the max so large values don't overflow
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exponentials = values.iter().map(|x| ((x - max) / tau).exp());
        let sum: f64 = exponentials.clone().sum();
        exponentials.map(|x| x / sum).collect()
    }

    /// Sample an action index with probability proportional to `exp(value / temperature)`
    pub fn choose(&self, t: f64, values: &[f64]) -> Result<usize> {
        if values.is_empty() {
            return Err(Error::NoActions);
        }
        if values.iter().any(|x| x.is_nan()) {
            return Err(Error::NanValues);
        }
        let dist = WeightedIndex::new(self.probabilities(t, values)).map_err(|_| {
            Error::InvalidConfig {
                field: "temperature",
                reason: "produced invalid softmax weights".into(),
            }
        })?;
        Ok(dist.sample(&mut thread_rng()))
    }
}
