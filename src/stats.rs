// Statistics kept for players and teams, over several eras.
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{error::LeagueError, types::StatValue};

// A time horizon for statistics.
#[derive(Debug, Serialize, Deserialize)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Era {
    Game,
    Season,
    Playoff,
    Career,
}

impl Era {
    pub const ALL: [Era; 4] = [Era::Game, Era::Season, Era::Playoff, Era::Career];

    fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Era::Game => "game",
            Era::Season => "season",
            Era::Playoff => "playoff",
            Era::Career => "career",
        }
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Era {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Era::ALL.into_iter()
            .find(|era| era.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| LeagueError::UnknownEra(s.to_string()))
    }
}

// A closed vocabulary of stat names for one kind of entity.
pub trait StatKind: Copy + Eq + fmt::Debug + 'static {
    const ALL: &'static [Self];

    fn index(self) -> usize;
    fn name(self) -> &'static str;

    // Look up a stat by its display name.
    fn parse(s: &str) -> Result<Self, LeagueError> {
        Self::ALL.iter()
            .copied()
            .find(|stat| stat.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| LeagueError::UnknownStat(s.to_string()))
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerStat {
    Goals,
    Assists,
    Minutes,
    Shots,
    Saves,
    GoalsAllowed,
}

impl StatKind for PlayerStat {
    const ALL: &'static [Self] = &[
        PlayerStat::Goals,
        PlayerStat::Assists,
        PlayerStat::Minutes,
        PlayerStat::Shots,
        PlayerStat::Saves,
        PlayerStat::GoalsAllowed,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            PlayerStat::Goals => "Goals",
            PlayerStat::Assists => "Assists",
            PlayerStat::Minutes => "Minutes",
            PlayerStat::Shots => "Shots",
            PlayerStat::Saves => "Saves",
            PlayerStat::GoalsAllowed => "Goals Allowed",
        }
    }
}

impl FromStr for PlayerStat {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum TeamStat {
    Wins,
    Losses,
    Ties,
    GoalsFor,
    GoalsAgainst,
}

impl StatKind for TeamStat {
    const ALL: &'static [Self] = &[
        TeamStat::Wins,
        TeamStat::Losses,
        TeamStat::Ties,
        TeamStat::GoalsFor,
        TeamStat::GoalsAgainst,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            TeamStat::Wins => "Wins",
            TeamStat::Losses => "Losses",
            TeamStat::Ties => "Ties",
            TeamStat::GoalsFor => "Goals For",
            TeamStat::GoalsAgainst => "Goals Against",
        }
    }
}

impl FromStr for TeamStat {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Counters for every era and every stat of one entity.
#[derive(Debug)]
#[derive(Clone, PartialEq)]
pub struct StatLedger<S: StatKind> {
    counters: [Vec<StatValue>; 4],
    kind: std::marker::PhantomData<S>,
}

impl<S: StatKind> Default for StatLedger<S> {
    fn default() -> Self {
        Self {
            counters: std::array::from_fn(|_| vec![0; S::ALL.len()]),
            kind: std::marker::PhantomData,
        }
    }
}

impl<S: StatKind> StatLedger<S> {
    pub fn build() -> Self {
        Self::default()
    }

    // Add to a counter. Negative amounts are corrections.
    pub fn add(&mut self, era: Era, stat: S, amount: StatValue) {
        self.counters[era.index()][stat.index()] += amount;
    }

    pub fn get(&self, era: Era, stat: S) -> StatValue {
        self.counters[era.index()][stat.index()]
    }

    // Move everything from one era to another, leaving the first one at zero.
    pub fn roll_up(&mut self, from: Era, to: Era) {
        if from == to { return; }

        let moved = std::mem::replace(&mut self.counters[from.index()], vec![0; S::ALL.len()]);
        for (counter, amount) in self.counters[to.index()].iter_mut().zip(moved) {
            *counter += amount;
        }
    }

    // Zero every counter of an era.
    pub fn reset(&mut self, era: Era) {
        self.counters[era.index()].iter_mut().for_each(|counter| *counter = 0);
    }

    // Get a counter with string names, for callers that do not know the types.
    pub fn get_by_name(&self, era: &str, stat: &str) -> Result<StatValue, LeagueError> {
        let era: Era = era.parse()?;
        let stat = S::parse(stat)?;
        Ok(self.get(era, stat))
    }
}

impl StatLedger<PlayerStat> {
    pub fn statline(&self, era: Era) -> PlayerStatLine {
        let goals = self.get(era, PlayerStat::Goals);
        let assists = self.get(era, PlayerStat::Assists);
        let saves = self.get(era, PlayerStat::Saves);
        let goals_allowed = self.get(era, PlayerStat::GoalsAllowed);

        PlayerStatLine {
            goals,
            assists,
            points: goals + assists,
            shots: self.get(era, PlayerStat::Shots),
            minutes: self.get(era, PlayerStat::Minutes),
            saves,
            goals_allowed,
            shots_faced: saves + goals_allowed,
        }
    }
}

impl StatLedger<TeamStat> {
    pub fn statline(&self, era: Era) -> TeamStatLine {
        let wins = self.get(era, TeamStat::Wins);
        let ties = self.get(era, TeamStat::Ties);

        TeamStatLine {
            wins,
            losses: self.get(era, TeamStat::Losses),
            ties,
            points: 2 * wins + ties,
            goals_for: self.get(era, TeamStat::GoalsFor),
            goals_against: self.get(era, TeamStat::GoalsAgainst),
        }
    }
}

// Summary of a player's stats for one era.
#[derive(Debug, Serialize)]
#[derive(Default, Clone, PartialEq)]
pub struct PlayerStatLine {
    pub goals: StatValue,
    pub assists: StatValue,
    pub points: StatValue,
    pub shots: StatValue,
    pub minutes: StatValue,
    pub saves: StatValue,
    pub goals_allowed: StatValue,
    pub shots_faced: StatValue,
}

// Summary of a team's stats for one era.
#[derive(Debug, Serialize)]
#[derive(Default, Clone, PartialEq)]
pub struct TeamStatLine {
    pub wins: StatValue,
    pub losses: StatValue,
    pub ties: StatValue,
    pub points: StatValue,
    pub goals_for: StatValue,
    pub goals_against: StatValue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_accumulates_on_prior_value() {
        let mut ledger: StatLedger<PlayerStat> = StatLedger::build();
        ledger.add(Era::Game, PlayerStat::Goals, 2);
        ledger.add(Era::Game, PlayerStat::Goals, 3);

        assert_eq!(ledger.get(Era::Game, PlayerStat::Goals), 5);
        assert_eq!(ledger.get(Era::Season, PlayerStat::Goals), 0);
        assert_eq!(ledger.get(Era::Game, PlayerStat::Assists), 0);
    }

    #[test]
    fn roll_up_moves_and_zeroes() {
        let mut ledger: StatLedger<TeamStat> = StatLedger::build();
        ledger.add(Era::Season, TeamStat::Wins, 4);
        ledger.add(Era::Game, TeamStat::Wins, 1);
        ledger.add(Era::Game, TeamStat::GoalsFor, 3);

        ledger.roll_up(Era::Game, Era::Season);

        for stat in TeamStat::ALL {
            assert_eq!(ledger.get(Era::Game, *stat), 0);
        }
        assert_eq!(ledger.get(Era::Season, TeamStat::Wins), 5);
        assert_eq!(ledger.get(Era::Season, TeamStat::GoalsFor), 3);
    }

    #[test]
    fn roll_up_into_itself_changes_nothing() {
        let mut ledger: StatLedger<PlayerStat> = StatLedger::build();
        ledger.add(Era::Career, PlayerStat::Saves, 7);
        ledger.roll_up(Era::Career, Era::Career);

        assert_eq!(ledger.get(Era::Career, PlayerStat::Saves), 7);
    }

    #[test]
    fn names_resolve_or_fail() {
        assert_eq!("Goals Allowed".parse::<PlayerStat>(), Ok(PlayerStat::GoalsAllowed));
        assert_eq!("goals for".parse::<TeamStat>(), Ok(TeamStat::GoalsFor));
        assert_eq!("Playoff".parse::<Era>(), Ok(Era::Playoff));

        assert_eq!("Hits".parse::<PlayerStat>(), Err(LeagueError::UnknownStat("Hits".to_string())));
        assert_eq!("preseason".parse::<Era>(), Err(LeagueError::UnknownEra("preseason".to_string())));

        let ledger: StatLedger<TeamStat> = StatLedger::build();
        assert!(matches!(ledger.get_by_name("season", "Goals"), Err(LeagueError::UnknownStat(_))));
        assert_eq!(ledger.get_by_name("season", "Wins"), Ok(0));
    }

    #[test]
    fn statlines_derive_points() {
        let mut player: StatLedger<PlayerStat> = StatLedger::build();
        player.add(Era::Season, PlayerStat::Goals, 3);
        player.add(Era::Season, PlayerStat::Assists, 4);
        player.add(Era::Season, PlayerStat::Saves, 20);
        player.add(Era::Season, PlayerStat::GoalsAllowed, 2);

        let line = player.statline(Era::Season);
        assert_eq!(line.points, 7);
        assert_eq!(line.shots_faced, 22);

        let mut team: StatLedger<TeamStat> = StatLedger::build();
        team.add(Era::Season, TeamStat::Wins, 10);
        team.add(Era::Season, TeamStat::Ties, 3);
        assert_eq!(team.statline(Era::Season).points, 23);
    }
}
