use std::error::Error;

use predl::{
    argmax,
    config::TrainerConfig,
    decay,
    env::Environment,
    gym::{self, FLAction, FrozenLake},
    trainer::{Harness, Trainer},
};

const NUM_EPISODES: usize = 5000;
const MAX_STEPS: usize = 100;

struct QTableAgent {
    harness: Harness<FrozenLake>,
    q_table: Vec<[f64; 4]>,
}

impl QTableAgent {
    /// One episode of Q-learning, or a greedy rollout when `learn` is false
    fn rollout(&mut self, start: usize, learn: bool) -> predl::Result<f64> {
        let (alpha, gamma) = (self.harness.alpha(), self.harness.gamma());
        let mut next_state = Some(start);
        let mut total_reward = 0.0;

        for _ in 0..MAX_STEPS {
            let Some(state) = next_state else { break };
            self.harness.set_state(Some(state));
            let action = if learn {
                self.policy()?
            } else {
                argmax(&self.q_table[state]).unwrap_or_default()
            };

            let (next, reward) = self.harness.env_mut().step(FLAction::from(action));
            if learn {
                let max_next = next
                    .map(|s| self.q_table[s].iter().copied().fold(f64::MIN, f64::max))
                    .unwrap_or(0.0);
                let q = &mut self.q_table[state][action];
                *q += alpha * (reward + gamma * max_next - *q);
            }

            next_state = next;
            total_reward += reward;
        }

        Ok(total_reward)
    }
}

impl Trainer for QTableAgent {
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

    fn run_episode(&mut self) -> predl::Result<f64> {
        let start = self.harness.env_mut().reset();
        self.rollout(start, true)
    }

    fn test(&mut self, init_state: Option<usize>) -> predl::Result<f64> {
        let env = self.harness.env_mut();
        let start = match init_state {
            Some(pos) => env.reset_to(pos),
            None => env.reset(),
        };
        self.rollout(start, false)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = TrainerConfig::new("FrozenLake-v1", NUM_EPISODES, 0.7, 0.95, "epsilon_greedy")
        .with_report_freq(500);
    let harness = Harness::from_registry(&gym::registry(), config)?
        .with_alpha_schedule(decay::Step::new(0.5, 0.7, 0.1, 1000.0)?);

    let mut agent = QTableAgent {
        harness,
        q_table: vec![[0.0; 4]; FrozenLake::NUM_STATES],
    };
    agent.go()?;

    let rewards = agent.rewards().unwrap_or_default();
    let wins = rewards.iter().filter(|&&r| r > 0.0).count();
    println!("reached the goal in {wins} of {} training episodes", rewards.len());
    println!("greedy test reward: {:.2}", agent.test(None)?);

    Ok(())
}
