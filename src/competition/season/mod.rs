// A season holds the regular season schedule of one year.
pub mod knockout_round;
pub mod ranking;
pub mod schedule_generator;

use rand::Rng;

use crate::{
    error::Result,
    types::{Matchup, TeamId}
};

#[derive(Debug)]
#[derive(Default, Clone, PartialEq)]
pub struct Season {
    pub year: u16,
    schedule: Vec<Vec<Matchup>>,
}

impl Season {
    // Build a season with a fresh schedule. The teams must be in alignment order.
    pub fn build<R: Rng + ?Sized>(year: u16, teams: &[TeamId], rng: &mut R) -> Result<Self> {
        Ok(Self {
            year: year,
            schedule: schedule_generator::generate_schedule(teams, rng)?,
        })
    }

    // Get the game of the given day and index.
    pub fn get_game(&self, day: usize, index: usize) -> Option<Matchup> {
        self.get_day(day)?.get(index).copied()
    }

    pub fn get_day(&self, day: usize) -> Option<&[Matchup]> {
        self.schedule.get(day).map(Vec::as_slice)
    }

    pub fn get_days(&self) -> usize {
        self.schedule.len()
    }
}
