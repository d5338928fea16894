use rand::{seq::SliceRandom, thread_rng};
use strum::{FromRepr, VariantArray};

use crate::env::{DiscreteActionSpace, Environment};

const SIZE: usize = 4;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Square {
    Frozen,
    Hole,
    Start,
    Goal,
}

/// Moves on the lake, numbered like the Python [gymnasium](https://gymnasium.farama.org/) version
#[derive(FromRepr, VariantArray, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum FLAction {
    Left = 0,
    Down = 1,
    Right = 2,
    Up = 3,
}

impl From<usize> for FLAction {
    fn from(value: usize) -> Self {
        Self::from_repr(value).expect("FLAction::from is only called with valid values [0, 3]")
    }
}

/// A deterministic 4x4 frozen lake
///
/// The agent starts in the top left corner and must reach the goal in the bottom right corner
/// without falling into a hole. Moving into an edge leaves the agent in place. Reaching the goal
/// gives a reward of 1, every other transition gives 0. Falling into a hole or reaching the goal
/// ends the episode.
#[derive(Debug, Clone)]
pub struct FrozenLake {
    map: [Square; SIZE * SIZE],
    pos: usize,
    steps: usize,
}

impl Default for FrozenLake {
    fn default() -> Self {
        Self::new()
    }
}

impl FrozenLake {
    pub fn new() -> Self {
        use Square::{Frozen as F, Goal as G, Hole as H, Start as S};
        #[rustfmt::skip]
        let map = [
            S, F, F, F,
            F, H, F, H,
            F, F, F, H,
            H, F, F, G,
        ];
        Self {
            map,
            pos: 0,
            steps: 0,
        }
    }

    pub const NUM_STATES: usize = SIZE * SIZE;

    pub fn square(&self, pos: usize) -> Square {
        self.map[pos]
    }

    /// Steps taken since the last reset
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Reset the environment with the agent placed at `pos` instead of the start square
    ///
    /// **Panics** if `pos` is off the map
    pub fn reset_to(&mut self, pos: usize) -> usize {
        assert!(pos < Self::NUM_STATES, "Invalid position: {pos}");
        self.pos = pos;
        self.steps = 0;
        pos
    }
}

impl Environment for FrozenLake {
    type State = usize;
    type Action = FLAction;

    fn step(&mut self, action: Self::Action) -> (Option<Self::State>, f64) {
        self.steps += 1;

        let (row, col) = (self.pos / SIZE, self.pos % SIZE);
        self.pos = match action {
            FLAction::Left if col > 0 => self.pos - 1,
            FLAction::Down if row < SIZE - 1 => self.pos + SIZE,
            FLAction::Right if col < SIZE - 1 => self.pos + 1,
            FLAction::Up if row > 0 => self.pos - SIZE,
            _ => self.pos,
        };

        match self.map[self.pos] {
            Square::Hole => (None, 0.0),
            Square::Goal => (None, 1.0),
            Square::Frozen | Square::Start => (Some(self.pos), 0.0),
        }
    }

    fn reset(&mut self) -> Self::State {
        self.reset_to(0)
    }

    fn random_action(&self) -> Self::Action {
        *FLAction::VARIANTS
            .choose(&mut thread_rng())
            .expect("FLAction has variants")
    }
}

impl DiscreteActionSpace for FrozenLake {
    fn actions(&self) -> Vec<Self::Action> {
        FLAction::VARIANTS.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frozen_lake_functional() {
        let mut env = FrozenLake::new();
        assert_eq!(env.reset(), 0);
        assert_eq!(env.actions().len(), 4, "every action always available");

        assert_eq!(env.step(FLAction::Up), (Some(0), 0.0), "edge blocks movement");
        assert_eq!(env.step(FLAction::Left), (Some(0), 0.0));
        assert_eq!(env.step(FLAction::Right), (Some(1), 0.0));
        assert_eq!(env.step(FLAction::Down), (None, 0.0), "fell into hole");
        assert_eq!(env.steps(), 4);

        assert_eq!(env.reset(), 0);
        assert_eq!(env.steps(), 0, "reset clears step count");
        let path = [
            FLAction::Down,
            FLAction::Down,
            FLAction::Right,
            FLAction::Right,
            FLAction::Down,
        ];
        for action in path {
            assert!(env.step(action).0.is_some());
        }
        assert_eq!(env.step(FLAction::Right), (None, 1.0), "reached goal");
    }

    #[test]
    fn actions() {
        assert_eq!(FLAction::from(2), FLAction::Right);

        let env = FrozenLake::new();
        for _ in 0..20 {
            assert!(env.actions().contains(&env.random_action()));
        }
    }

    #[test]
    fn reset_to_square() {
        let mut env = FrozenLake::new();
        assert_eq!(env.reset_to(14), 14);
        assert_eq!(env.step(FLAction::Right), (None, 1.0));
    }
}
