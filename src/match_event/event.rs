// Shots and how likely they are to go in.
use rand::Rng;
use serde::Serialize;

use crate::types::{PlayerId, TeamId};

// Decides how likely a shot is to be a goal, given the summed ratings of both groups on ice.
pub trait ShotModel {
    fn goal_probability(&self, offence_total: f64, defence_total: f64) -> f64;
}

// The chance of a goal falls off along a logistic curve as the defence gets better than the offence.
#[derive(Debug)]
#[derive(Clone, Copy, PartialEq)]
pub struct LogisticShotModel {
    pub scale: f64,
}

impl Default for LogisticShotModel {
    fn default() -> Self {
        Self { scale: 0.05 }
    }
}

impl ShotModel for LogisticShotModel {
    fn goal_probability(&self, offence_total: f64, defence_total: f64) -> f64 {
        let advantage = defence_total - offence_total;
        1.0 / (1.0 + (self.scale * advantage).exp())
    }
}

#[derive(Debug, Serialize)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ShotResult {
    Goal,
    Miss,
}

// Get the result of a shot. A goal happens when a uniform draw falls under the goal probability.
pub fn simulate_shot<R: Rng + ?Sized>(model: &dyn ShotModel, offence_total: f64, defence_total: f64, rng: &mut R) -> ShotResult {
    let probability = model.goal_probability(offence_total, defence_total);
    let luck: f64 = rng.random();

    if luck < probability { ShotResult::Goal } else { ShotResult::Miss }
}

// A shot that went in, for the game summary.
#[derive(Debug, Serialize)]
#[derive(Clone, PartialEq)]
pub struct Goal {
    pub minute: u32,
    pub team_id: TeamId,
    pub scorer_id: PlayerId,
    pub assister_ids: Vec<PlayerId>,
}
