use log::{debug, trace};

use crate::{
    config::{FromExtra, TrainerConfig},
    decay::Decay,
    env::{Environment, Registry},
    error::Result,
    policy::{Policies, PolicyKind},
};

/// Format the progress line printed every `report_freq` episodes
pub fn progress_line(episode: usize, total_reward: f64) -> String {
    format!("episode:{episode:>5} total reward:{total_reward:>5.2}")
}

/// The state shared by every [`Trainer`]: environment, configuration, policy strategies, and the reward log
///
/// A concrete trainer owns a `Harness` and exposes it through [`Trainer::harness`] and
/// [`Trainer::harness_mut`].
pub struct Harness<E: Environment> {
    env: E,
    config: TrainerConfig,
    alpha: f64,
    alpha_schedule: Option<Box<dyn Decay>>,
    policies: Policies,
    state: Option<E::State>,
    episode: usize,
    rewards: Option<Vec<f64>>,
}

impl<E: Environment> Harness<E> {
    /// Wrap an environment
    ///
    /// ### Errors
    /// [`Error::InvalidConfig`](crate::Error::InvalidConfig) if `config` fails
    /// [validation](TrainerConfig::validate)
    pub fn new(env: E, config: TrainerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            env,
            alpha: config.alpha,
            config,
            alpha_schedule: None,
            policies: Policies::default(),
            state: None,
            episode: 0,
            rewards: None,
        })
    }

    /// Resolve `config.env_id` through `registry` and wrap the resulting environment
    pub fn from_registry(registry: &Registry<E>, config: TrainerConfig) -> Result<Self> {
        let env = registry.make(&config.env_id)?;
        Self::new(env, config)
    }

    /// Replace the default policy strategies
    pub fn with_policies(mut self, policies: Policies) -> Self {
        self.policies = policies;
        self
    }

    /// Recompute the learning rate from `schedule` at the start of every episode
    pub fn with_alpha_schedule(mut self, schedule: impl Decay + 'static) -> Self {
        self.alpha_schedule = Some(Box::new(schedule));
        self
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Typed access to an extra configuration value
    pub fn extra<T: FromExtra>(&self, key: &str) -> Result<T> {
        self.config.extras.get(key)
    }

    /// The current learning rate
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
    }

    /// The discount factor
    pub fn gamma(&self) -> f64 {
        self.config.gamma
    }

    pub fn state(&self) -> Option<&E::State> {
        self.state.as_ref()
    }

    pub fn set_state(&mut self, state: Option<E::State>) {
        self.state = state;
    }

    /// Index of the episode currently being trained
    pub fn episode(&self) -> usize {
        self.episode
    }

    pub fn policies(&self) -> &Policies {
        &self.policies
    }

    /// The reward log of the last completed training run, or `None` if training has not completed
    pub fn rewards(&self) -> Option<&[f64]> {
        self.rewards.as_deref()
    }

    /// Resolve the configured policy name and choose an action index from `values`
    ///
    /// ### Errors
    /// - [`Error::UnknownPolicy`](crate::Error::UnknownPolicy) if the policy name is not a [`PolicyKind`]
    /// - [`Error::NoActions`](crate::Error::NoActions) if `values` is empty
    pub fn select(&self, values: &[f64]) -> Result<usize> {
        let kind = PolicyKind::resolve(&self.config.policy)?;
        self.policies.choose(kind, self.episode, values)
    }

    fn apply_alpha_schedule(&mut self, episode: usize) {
        if let Some(schedule) = &self.alpha_schedule {
            self.alpha = schedule.evaluate(episode as f64);
            trace!("episode {episode}: alpha = {}", self.alpha);
        }
    }
}

/// An episode-driven training loop, agnostic to the learning rule
///
/// Implementors supply the per-episode body ([`run_episode`](Self::run_episode)), the evaluation
/// routine ([`test`](Self::test)), and the action values the configured policy chooses from.
/// [`train`](Self::train) drives the loop.
///
/// ### Example
/// ```ignore
/// struct Bandit {
///     harness: Harness<KArmed>,
///     values: Vec<f64>,
/// }
///
/// impl Trainer for Bandit {
///     type Env = KArmed;
///     /* harness accessors */
///     fn action_values(&self) -> Vec<f64> {
///         self.values.clone()
///     }
///     fn run_episode(&mut self) -> Result<f64> {
///         let action = self.policy()?;
///         let (_, reward) = self.harness.env_mut().step(action);
///         self.values[action] += self.harness.alpha() * (reward - self.values[action]);
///         Ok(reward)
///     }
///     /* test */
/// }
/// ```
pub trait Trainer {
    type Env: Environment;

    fn harness(&self) -> &Harness<Self::Env>;

    fn harness_mut(&mut self) -> &mut Harness<Self::Env>;

    /// Values of each action in the current state, indexed by action
    fn action_values(&self) -> Vec<f64>;

    /// Run exactly one episode and return its total reward
    fn run_episode(&mut self) -> Result<f64>;

    /// Evaluate the trained policy starting from `init_state`, or from the environment's reset state if `None`
    ///
    /// **Returns** the total reward of the evaluation episode
    fn test(&mut self, init_state: Option<<Self::Env as Environment>::State>) -> Result<f64>;

    /// Choose an action index with the configured policy
    fn policy(&self) -> Result<usize> {
        self.harness().select(&self.action_values())
    }

    /// Adjust the learning rate before an episode
    ///
    /// Applies the harness's learning rate schedule if one is set, otherwise does nothing.
    fn schedule_alpha(&mut self, episode: usize) {
        self.harness_mut().apply_alpha_schedule(episode);
    }

    /// Called by [`train`](Self::train) every `report_freq` episodes, starting with episode 0
    ///
    /// Prints the [`progress_line`] to stdout by default.
    fn report(&mut self, episode: usize, total_reward: f64) {
        println!("{}", progress_line(episode, total_reward));
    }

    /// Run `num_episodes` episodes and record the total reward of each
    ///
    /// The reward log is only replaced once every episode has completed. If an episode fails the
    /// error is returned and the previous log is kept.
    fn train(&mut self) -> Result<()> {
        let TrainerConfig {
            num_episodes,
            report_freq,
            ..
        } = *self.harness().config();
        debug!(
            "training {num_episodes} episodes on `{}`",
            self.harness().config().env_id
        );

        let mut rewards = Vec::with_capacity(num_episodes);
        for episode in 0..num_episodes {
            self.harness_mut().episode = episode;
            self.schedule_alpha(episode);
            let total_reward = self.run_episode()?;
            rewards.push(total_reward);

            if episode % report_freq == 0 {
                self.report(episode, total_reward);
            }
        }

        debug!(
            "training finished, mean reward {:.4}",
            rewards.iter().sum::<f64>() / num_episodes as f64
        );
        self.harness_mut().rewards = Some(rewards);
        Ok(())
    }

    /// Alias for [`train`](Self::train)
    fn go(&mut self) -> Result<()> {
        self.train()
    }

    /// See [`Harness::rewards`]
    fn rewards(&self) -> Option<&[f64]> {
        self.harness().rewards()
    }
}
