// The league calendar.
use std::fmt;

use serde::Serialize;

// The regular season takes days 0 to 79.
pub const SEASON_DAYS: u16 = 80;
pub const GAMES_PER_SEASON_DAY: u16 = 16;

// Each playoff round takes a week, and a series can be decided after its fourth game.
pub const ROUND_DAYS: u16 = 7;
pub const DAYS_BEFORE_DECISION: u16 = 4;
pub const PLAYOFF_ROUNDS: u16 = 4;

// The day the year ends and the next one starts.
pub const YEAR_END_DAY: u16 = SEASON_DAYS + ROUND_DAYS * PLAYOFF_ROUNDS;

// The part of the year a day belongs to.
#[derive(Debug, Serialize)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    RegularSeason,
    Playoffs(u8),
}

impl Phase {
    pub fn get_games_per_day(self) -> u16 {
        match self {
            Phase::RegularSeason => GAMES_PER_SEASON_DAY,
            Phase::Playoffs(round) => GAMES_PER_SEASON_DAY >> round,
        }
    }
}

// Something the league must do when the calendar crosses a boundary.
#[derive(Debug)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum CalendarEvent {
    StartPlayoffs,
    // Series of the ongoing round may have been decided. The day is counted from the start of the playoffs.
    UpdatePlayoffs(usize),
    StartRound(u8),
    EndYear,
}

// A point in league time: the year, the day of the year and the game of the day.
#[derive(Debug, Serialize)]
#[derive(Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LeagueDate {
    pub year: u16,
    pub day: u16,
    pub game: u16,
}

// Basics.
impl LeagueDate {
    pub fn build(year: u16, day: u16, game: u16) -> Self {
        LeagueDate { year: year, day: day, game: game }
    }

    pub fn get_phase(&self) -> Phase {
        Self::get_phase_of_day(self.day)
    }

    fn get_phase_of_day(day: u16) -> Phase {
        if day < SEASON_DAYS {
            return Phase::RegularSeason;
        }

        let round = (day - SEASON_DAYS) / ROUND_DAYS + 1;
        Phase::Playoffs(round.min(PLAYOFF_ROUNDS) as u8)
    }

    // Get the day counted from the start of the playoffs.
    pub fn get_playoff_day(&self) -> Option<usize> {
        self.day.checked_sub(SEASON_DAYS).map(usize::from)
    }
}

impl fmt::Display for LeagueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "year {}, day {}, game {}", self.year, self.day, self.game)
    }
}

// Functional.
impl LeagueDate {
    // Move on to the next game. Return what the league must do after crossing into a new day.
    pub fn advance(&mut self) -> Vec<CalendarEvent> {
        let phase = self.get_phase();
        if self.game + 1 < phase.get_games_per_day() {
            self.game += 1;
            return Vec::new();
        }

        self.game = 0;
        self.day += 1;

        let mut events = Vec::new();
        match phase {
            Phase::RegularSeason => {
                if self.day == SEASON_DAYS {
                    events.push(CalendarEvent::StartPlayoffs);
                }
            },
            Phase::Playoffs(round) => {
                let round_start = SEASON_DAYS + ROUND_DAYS * (round as u16 - 1);

                if self.day >= round_start + DAYS_BEFORE_DECISION {
                    events.push(CalendarEvent::UpdatePlayoffs(usize::from(self.day - SEASON_DAYS)));
                }

                if self.day == YEAR_END_DAY {
                    events.push(CalendarEvent::EndYear);
                    *self = Self::build(self.year + 1, 0, 0);
                }
                else if self.day == round_start + ROUND_DAYS {
                    events.push(CalendarEvent::StartRound(round + 1));
                }
            },
        }

        return events;
    }
}
