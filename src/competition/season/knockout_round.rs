// The playoff bracket: seeded best-of-seven series in four rounds.

use log::debug;
use serde::Serialize;
use serde_json::json;

use crate::{
    error::{LeagueError, Result},
    stats::{Era, TeamStat},
    team::Team,
    types::{Matchup, StatValue, TeamId}
};

pub const SERIES_LENGTH: usize = 7;
pub const WINS_REQUIRED: StatValue = 4;
pub const ROUNDS: u8 = 4;
pub const SEEDS_PER_CONFERENCE: usize = 8;

#[derive(Debug, Serialize)]
#[derive(Default, Clone, PartialEq)]
pub struct PlayoffBracket {
    // Remaining teams of each conference in seed order.
    seeds: [Vec<TeamId>; 2],
    round: u8,

    // Every playoff day so far, by day since the start of the playoffs.
    // A decided series leaves None in its remaining slots.
    schedule: Vec<Vec<Option<Matchup>>>,
    pairs: Vec<KnockoutPair>,
}

// Basics.
impl PlayoffBracket {
    pub fn build(american: Vec<TeamId>, national: Vec<TeamId>) -> Result<Self> {
        let mut bracket = Self {
            seeds: [american, national],
            round: 1,
            schedule: Vec::new(),
            pairs: Vec::new(),
        };

        bracket.draw_pairs()?;
        bracket.generate_matchdays();
        return Ok(bracket);
    }

    pub fn get_round(&self) -> u8 {
        self.round
    }

    // Get the remaining teams of a conference in seed order.
    pub fn get_remaining(&self, conference: usize) -> &[TeamId] {
        &self.seeds[conference]
    }

    pub fn get_pairs(&self) -> &[KnockoutPair] {
        &self.pairs
    }

    // Get the game to be played, if any.
    pub fn get_game(&self, playoff_day: usize, index: usize) -> Option<Matchup> {
        self.schedule.get(playoff_day)?.get(index).copied().flatten()
    }

    pub fn get_day(&self, playoff_day: usize) -> Option<&[Option<Matchup>]> {
        self.schedule.get(playoff_day).map(Vec::as_slice)
    }

    // How many game slots each day of the current round has.
    pub fn get_games_per_day(&self) -> usize {
        self.pairs.len()
    }

    // The champion is the last team standing.
    pub fn get_champion(&self) -> Option<TeamId> {
        match (self.seeds[0].as_slice(), self.seeds[1].as_slice()) {
            ([champion], []) | ([], [champion]) if self.round == ROUNDS => Some(*champion),
            _ => None,
        }
    }

    // Check if every series of the round has been decided.
    pub fn is_round_over(&self) -> bool {
        self.pairs.iter().all(|pair| pair.is_over)
    }

    // Get the wins of a team in the ongoing round.
    pub fn get_series_wins(&self, team: &Team) -> StatValue {
        team.get_stat(Era::Playoff, TeamStat::Wins) - WINS_REQUIRED * (self.round as StatValue - 1)
    }

    // Get relevant information for a competition screen.
    pub fn get_comp_screen_json(&self, teams: &[Team]) -> serde_json::Value {
        let team_json = |id: TeamId| match teams.get(id as usize) {
            Some(team) => json!({
                "id": id,
                "name": team.name,
                "wins": self.get_series_wins(team),
            }),
            None => json!({ "id": id }),
        };

        let pairs: Vec<serde_json::Value> = self.pairs.iter()
            .map(|pair| json!({
                "home": team_json(pair.home),
                "away": team_json(pair.away),
                "is_over": pair.is_over,
            }))
            .collect();

        json!({
            "round": self.round,
            "pairs": pairs,
        })
    }
}

// Functional.
impl PlayoffBracket {
    // Pair the best remaining seed with the worst, the second best with the second worst, and so on.
    // The final pairs the conference champions.
    fn draw_pairs(&mut self) -> Result<()> {
        let expected = SEEDS_PER_CONFERENCE >> (self.round - 1);
        for (conference, seeds) in self.seeds.iter().enumerate() {
            if seeds.len() != expected {
                return Err(LeagueError::BracketInconsistent(format!(
                    "conference {conference} has {} teams in round {}, expected {expected}", seeds.len(), self.round
                )));
            }
        }

        self.pairs = match self.round {
            ROUNDS => vec![KnockoutPair::build(self.seeds[0][0], self.seeds[1][0])],
            _ => self.seeds.iter()
                .flat_map(|seeds| (0..seeds.len() / 2).map(|i| KnockoutPair::build(seeds[i], seeds[seeds.len() - 1 - i])))
                .collect(),
        };

        Ok(())
    }

    // Add the days of the round to the schedule. Every game is hosted by the better seed.
    fn generate_matchdays(&mut self) {
        let day: Vec<Option<Matchup>> = self.pairs.iter().map(|pair| Some(pair.get_matchup())).collect();
        for _ in 0..SERIES_LENGTH {
            self.schedule.push(day.clone());
        }
    }

    // Check the series of the round for winners.
    // The loser is out, and the rest of the series is taken off the schedule from the given day on.
    pub fn update(&mut self, teams: &[Team], playoff_day: usize) -> Result<Vec<[TeamId; 2]>> {
        let mut decided = Vec::new();

        for i in 0..self.pairs.len() {
            if self.pairs[i].is_over { continue; }

            let Some([winner, loser]) = self.get_winner_loser(&self.pairs[i], teams)? else { continue };
            self.pairs[i].is_over = true;

            let conference = self.seeds.iter()
                .position(|seeds| seeds.contains(&loser))
                .ok_or_else(|| LeagueError::BracketInconsistent(format!("team {loser} is not in the bracket")))?;
            self.seeds[conference].retain(|id| *id != loser);

            self.clean_up_games(self.pairs[i].get_matchup(), playoff_day);
            debug!("team {winner} eliminated team {loser} in round {}", self.round);
            decided.push([winner, loser]);
        }

        return Ok(decided);
    }

    // Get the victor and the loser of the pair, or None if neither has won.
    fn get_winner_loser(&self, pair: &KnockoutPair, teams: &[Team]) -> Result<Option<[TeamId; 2]>> {
        let team = |id: TeamId| teams.get(id as usize).ok_or(LeagueError::UnknownTeam(id));
        let home_wins = self.get_series_wins(team(pair.home)?);
        let away_wins = self.get_series_wins(team(pair.away)?);

        if home_wins >= WINS_REQUIRED {
            return Ok(Some([pair.home, pair.away]));
        }
        if away_wins >= WINS_REQUIRED {
            return Ok(Some([pair.away, pair.home]));
        }

        return Ok(None);
    }

    // Remove the remaining games of a series.
    fn clean_up_games(&mut self, matchup: Matchup, playoff_day: usize) {
        for day in self.schedule.iter_mut().skip(playoff_day) {
            for slot in day.iter_mut() {
                if *slot == Some(matchup) {
                    *slot = None;
                }
            }
        }
    }

    // Move on to the next round with the teams that are left.
    pub fn advance_round(&mut self) -> Result<()> {
        if self.round >= ROUNDS {
            return Err(LeagueError::BracketInconsistent(format!("there is no round after round {ROUNDS}")));
        }

        self.round += 1;
        if let Err(e) = self.draw_pairs() {
            self.round -= 1;
            return Err(e);
        }

        self.generate_matchdays();
        return Ok(());
    }
}

// Two teams facing each other in a series.
#[derive(Debug, Serialize)]
#[derive(Default, Clone, PartialEq)]
pub struct KnockoutPair {
    pub home: TeamId,
    pub away: TeamId,
    pub is_over: bool,
}

impl KnockoutPair {
    fn build(home: TeamId, away: TeamId) -> Self {
        Self {
            home: home,
            away: away,
            is_over: false,
        }
    }

    pub fn get_matchup(&self) -> Matchup {
        [self.home, self.away]
    }
}
