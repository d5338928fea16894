use rand::{thread_rng, Rng};

use crate::decay::Decay;

use super::Choice;

/// Epsilon greedy exploration policy with time-decaying epsilon threshold
#[derive(Debug, Clone)]
pub struct EpsilonGreedy<D: Decay> {
    epsilon: D,
}

impl<D: Decay> EpsilonGreedy<D> {
    /// Initialize epsilon greedy policy with a decay strategy
    pub fn new(decay: D) -> Self {
        Self { epsilon: decay }
    }

    /// The exploration threshold for the given episode
    pub fn epsilon(&self, episode: usize) -> f64 {
        self.epsilon.evaluate(episode as f64)
    }

    /// Invoke epsilon greedy policy for current episode
    pub fn choose(&self, episode: usize) -> Choice {
        if thread_rng().gen::<f64>() >= self.epsilon(episode) {
            Choice::Exploit
        } else {
            Choice::Explore
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::decay;

    use super::*;

    #[test]
    fn extreme_thresholds() {
        let greedy = EpsilonGreedy::new(decay::Constant::new(0.0));
        let explorer = EpsilonGreedy::new(decay::Constant::new(1.0));
        for episode in 0..100 {
            assert_eq!(greedy.choose(episode), Choice::Exploit, "epsilon 0 never explores");
            assert_eq!(explorer.choose(episode), Choice::Explore, "epsilon 1 always explores");
        }
    }

    #[test]
    fn epsilon_follows_decay() {
        let policy = EpsilonGreedy::new(decay::Linear::new(0.1, 1.0, 0.2).unwrap());
        assert_eq!(policy.epsilon(0), 1.0);
        assert_eq!(policy.epsilon(100), 0.2);
    }
}
