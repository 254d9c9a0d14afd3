//! Reward specification and the reward and termination rules.
use crate::Tile;
use serde::{Deserialize, Serialize};

/// Reward design of the environment.
///
/// When deserialized, all seven fields must be given and no other field is
/// accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RewardSpec {
    /// Added at every step.
    pub step_penalty: f32,

    /// Reward for reaching a goal, ending the episode.
    pub goal_reward: f32,

    /// If `true`, goal and lava tiles do not end the episode. The agent is
    /// frozen on them and collects the absorbing rewards every step.
    pub absorbing_states: bool,

    /// Reward for every step spent on a goal with absorbing states.
    pub absorbing_reward_goal: f32,

    /// Reward for every step spent on lava with absorbing states.
    pub absorbing_reward_lava: f32,

    /// Reward for standing on a risky tile. Must be 0 unless risky tiles are active.
    pub risky_tile_reward: f32,

    /// Reward for stepping into lava, ending the episode.
    pub lava_reward: f32,
}

impl Default for RewardSpec {
    fn default() -> Self {
        Self {
            step_penalty: 0.0,
            goal_reward: 1.0,
            absorbing_states: false,
            absorbing_reward_goal: 0.0,
            absorbing_reward_lava: -1.0,
            risky_tile_reward: 0.0,
            lava_reward: -1.0,
        }
    }
}

/// Reward and termination of a single step, before the step limit is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileOutcome {
    /// Step penalty plus the tile reward.
    pub reward: f32,

    /// `true` if the tile ends the episode.
    pub terminated: bool,
}

impl RewardSpec {
    /// Sets the step penalty.
    pub fn step_penalty(mut self, v: f32) -> Self {
        self.step_penalty = v;
        self
    }

    /// Sets the goal reward.
    pub fn goal_reward(mut self, v: f32) -> Self {
        self.goal_reward = v;
        self
    }

    /// Enables or disables absorbing states.
    pub fn absorbing_states(mut self, v: bool) -> Self {
        self.absorbing_states = v;
        self
    }

    /// Sets the absorbing reward on goals.
    pub fn absorbing_reward_goal(mut self, v: f32) -> Self {
        self.absorbing_reward_goal = v;
        self
    }

    /// Sets the absorbing reward on lava.
    pub fn absorbing_reward_lava(mut self, v: f32) -> Self {
        self.absorbing_reward_lava = v;
        self
    }

    /// Sets the risky tile reward.
    pub fn risky_tile_reward(mut self, v: f32) -> Self {
        self.risky_tile_reward = v;
        self
    }

    /// Sets the lava reward.
    pub fn lava_reward(mut self, v: f32) -> Self {
        self.lava_reward = v;
        self
    }

    /// Computes the reward and termination for the agent standing on `tile`.
    pub fn evaluate(&self, tile: Tile) -> TileOutcome {
        let mut reward = self.step_penalty;
        let mut terminated = false;

        match tile {
            Tile::Goal if self.absorbing_states => reward += self.absorbing_reward_goal,
            Tile::Goal => {
                reward += self.goal_reward;
                terminated = true;
            }
            Tile::Lava if self.absorbing_states => reward += self.absorbing_reward_lava,
            Tile::Lava => {
                reward += self.lava_reward;
                terminated = true;
            }
            Tile::Risky => reward += self.risky_tile_reward,
            Tile::Empty | Tile::Wall => {}
        }

        TileOutcome { reward, terminated }
    }
}
