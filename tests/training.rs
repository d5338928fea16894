use predl::{
    argmax,
    config::TrainerConfig,
    decay,
    env::Environment,
    exploration::{EpsilonGreedy, Softmax},
    gym::{self, FLAction, FrozenLake},
    memory::{BoundedMemory, Exp},
    policy::Policies,
    trainer::{Harness, Trainer},
    Error, Result,
};

const NUM_ACTIONS: usize = 4;
const BATCH_SIZE: usize = 8;

/// Tabular Q-learning with a small replay memory
struct QTableTrainer {
    harness: Harness<FrozenLake>,
    q_table: Vec<[f64; NUM_ACTIONS]>,
    memory: BoundedMemory<Exp<FrozenLake>>,
    max_steps: usize,
}

fn update(q_table: &mut [[f64; NUM_ACTIONS]], alpha: f64, gamma: f64, exp: &Exp<FrozenLake>) {
    let max_next = exp
        .next_state
        .map(|s| q_table[s].iter().copied().fold(f64::NEG_INFINITY, f64::max))
        .unwrap_or(0.0);
    let q = &mut q_table[exp.state][exp.action as usize];
    *q += alpha * (exp.reward + gamma * max_next - *q);
}

impl QTableTrainer {
    fn new(config: TrainerConfig, policies: Policies) -> Result<Self> {
        let harness = Harness::from_registry(&gym::registry(), config)?.with_policies(policies);
        let max_steps = harness.extra("max_steps")?;
        let memory = BoundedMemory::bounded(harness.extra("replay_size")?);
        Ok(Self {
            harness,
            q_table: vec![[0.0; NUM_ACTIONS]; FrozenLake::NUM_STATES],
            memory,
            max_steps,
        })
    }
}

impl Trainer for QTableTrainer {
    type Env = FrozenLake;

    fn harness(&self) -> &Harness<FrozenLake> {
        &self.harness
    }

    fn harness_mut(&mut self) -> &mut Harness<FrozenLake> {
        &mut self.harness
    }

    fn action_values(&self) -> Vec<f64> {
        self.harness
            .state()
            .map(|&s| self.q_table[s].to_vec())
            .unwrap_or_default()
    }

    fn run_episode(&mut self) -> Result<f64> {
        let (alpha, gamma) = (self.harness.alpha(), self.harness.gamma());
        let mut next_state = Some(self.harness.env_mut().reset());
        let mut total_reward = 0.0;

        for _ in 0..self.max_steps {
            let Some(state) = next_state else { break };
            self.harness.set_state(Some(state));
            let action = FLAction::from(self.policy()?);
            let (next, reward) = self.harness.env_mut().step(action);

            let exp = Exp {
                state,
                action,
                next_state: next,
                reward,
            };
            update(&mut self.q_table, alpha, gamma, &exp);
            self.memory.add(exp);

            next_state = next;
            total_reward += reward;
        }

        if let Some(batch) = self.memory.sample_batch(BATCH_SIZE) {
            for exp in batch {
                update(&mut self.q_table, alpha, gamma, exp);
            }
        }

        Ok(total_reward)
    }

    fn test(&mut self, init_state: Option<usize>) -> Result<f64> {
        let env = self.harness.env_mut();
        let mut next_state = Some(match init_state {
            Some(pos) => env.reset_to(pos),
            None => env.reset(),
        });
        let mut total_reward = 0.0;

        for _ in 0..self.max_steps {
            let Some(state) = next_state else { break };
            let action = argmax(&self.q_table[state]).ok_or(Error::NoActions)?;
            let (next, reward) = self.harness.env_mut().step(FLAction::from(action));
            next_state = next;
            total_reward += reward;
        }

        Ok(total_reward)
    }
}

fn config(num_episodes: usize, policy: &str) -> TrainerConfig {
    TrainerConfig::new("FrozenLake-v1", num_episodes, 0.5, 0.9, policy)
        .with_report_freq(500)
        .with_extra("max_steps", 100i64)
        .with_extra("replay_size", 256i64)
}

fn exploring_policies() -> Policies {
    Policies {
        epsilon_greedy: EpsilonGreedy::new(Box::new(decay::Constant::new(0.5))),
        softmax: Softmax::new(Box::new(decay::Constant::new(1.0))),
    }
}

#[test]
fn q_table_learns_frozen_lake() {
    let mut trainer = QTableTrainer::new(config(2000, "epsilon_greedy"), exploring_policies()).unwrap();
    assert!(trainer.rewards().is_none(), "untrained");

    trainer.go().unwrap();

    let rewards = trainer.rewards().expect("trained");
    assert_eq!(rewards.len(), 2000, "one reward per episode");
    assert!(rewards.iter().all(|&r| r == 0.0 || r == 1.0));
    assert!(rewards.iter().any(|&r| r == 1.0), "goal reached during training");
    assert_eq!(trainer.memory.len(), 256, "replay memory filled to capacity");

    assert_eq!(trainer.test(None), Ok(1.0), "greedy policy reaches the goal");
    assert_eq!(trainer.test(Some(14)), Ok(1.0), "from next to the goal");
}

#[test]
fn unknown_policy_fails_on_first_episode() {
    let mut trainer = QTableTrainer::new(config(10, "ucb"), Policies::default())
        .expect("policy name is not checked at construction");
    assert_eq!(trainer.train(), Err(Error::UnknownPolicy("ucb".into())));
    assert!(trainer.rewards().is_none());
}

#[test]
fn missing_extras_fail_construction() {
    let config = TrainerConfig::new("FrozenLake-v1", 10, 0.5, 0.9, "random");
    assert_eq!(
        QTableTrainer::new(config, Policies::default()).err(),
        Some(Error::MissingExtra("max_steps".into()))
    );
}

#[test]
fn unknown_environment() {
    let mut config = config(10, "random");
    config.env_id = "Taxi-v3".into();
    assert_eq!(
        QTableTrainer::new(config, Policies::default()).err(),
        Some(Error::UnknownEnvironment("Taxi-v3".into()))
    );
}

#[test]
fn softmax_and_random_policies_train() {
    for policy in ["softmax", "random", "greedy"] {
        let mut trainer = QTableTrainer::new(config(50, policy), Policies::default()).unwrap();
        trainer.train().unwrap();
        assert_eq!(trainer.rewards().map(<[f64]>::len), Some(50), "{policy}");
    }
}
