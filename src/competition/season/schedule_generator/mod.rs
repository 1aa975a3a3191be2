// Regular season schedule for a league of two conferences with four divisions of four teams each.
use rand::{seq::SliceRandom, Rng};

use crate::{
    error::{LeagueError, Result},
    types::{Matchup, TeamId}
};

pub const TEAMS_IN_DIVISION: usize = 4;
pub const DIVISIONS: usize = 8;
pub const LEAGUE_SIZE: usize = TEAMS_IN_DIVISION * DIVISIONS;

// How many times each kind of round is played.
const DIVISION_ROUNDS: usize = 4;
const CONFERENCE_ROUNDS: usize = 3;
const INTERCONFERENCE_ROUNDS: usize = 2;

// Days of slot pairs. Slots are positions in the alignment order of the league.
type SlotDays = Vec<Vec<[usize; 2]>>;

// Everyone plays everyone once, over three days.
fn get_intradivision(d: [usize; 4]) -> SlotDays {
    vec![
        vec![[d[0], d[1]], [d[2], d[3]]],
        vec![[d[0], d[2]], [d[1], d[3]]],
        vec![[d[0], d[3]], [d[1], d[2]]],
    ]
}

// Everyone in one group plays everyone in the other once, over four days.
// Day k pairs the i-th of the first group with the (i + k)-th of the second.
fn get_interdivision(d1: [usize; 4], d2: [usize; 4]) -> SlotDays {
    (0..4).map(|k| (0..4).map(|i| [d1[i], d2[(i + k) % 4]]).collect()).collect()
}

fn get_division(index: usize) -> [usize; 4] {
    std::array::from_fn(|i| index * TEAMS_IN_DIVISION + i)
}

// Put the days of every division matchup side by side.
fn merge_division_matchups(division_matchups: SlotDays, days_per_matchup: usize) -> SlotDays {
    let mut days: SlotDays = vec![Vec::new(); division_matchups.len() * days_per_matchup];

    for (counter, matchup) in division_matchups.into_iter().enumerate() {
        for [d1, d2] in matchup {
            for (i, games) in get_interdivision(get_division(d1), get_division(d2)).into_iter().enumerate() {
                days[i + days_per_matchup * counter].extend(games);
            }
        }
    }

    return days;
}

// Each division plays itself, 3 days.
fn get_division_round() -> SlotDays {
    let mut days: SlotDays = vec![Vec::new(); 3];
    for division in 0..DIVISIONS {
        for (i, games) in get_intradivision(get_division(division)).into_iter().enumerate() {
            days[i].extend(games);
        }
    }

    return days;
}

// Each division plays the other divisions of its conference, 12 days.
fn get_conference_round() -> SlotDays {
    let american = get_intradivision([0, 1, 2, 3]);
    let national = get_intradivision([4, 5, 6, 7]);
    let division_matchups: SlotDays = american.into_iter()
        .zip(national)
        .map(|(a, n)| a.into_iter().chain(n).collect())
        .collect();

    merge_division_matchups(division_matchups, 4)
}

// Each division plays every division of the other conference, 16 days.
fn get_interconference_round() -> SlotDays {
    merge_division_matchups(get_interdivision([0, 1, 2, 3], [4, 5, 6, 7]), 4)
}

// Swap home and away of every game.
fn flip(days: &SlotDays) -> SlotDays {
    days.iter()
        .map(|games| games.iter().map(|[home, away]| [*away, *home]).collect())
        .collect()
}

// Add a round several times over. Every other repetition is played the other way around.
fn repeat_round(schedule: &mut SlotDays, round: SlotDays, times: usize) {
    let flipped = flip(&round);
    for i in 0..times {
        match i % 2 {
            0 => schedule.extend(round.iter().cloned()),
            _ => schedule.extend(flipped.iter().cloned()),
        }
    }
}

// The full 80-day schedule in slot numbers, in the order the rounds are generated.
pub fn generate_slot_schedule() -> SlotDays {
    let mut schedule = Vec::new();
    repeat_round(&mut schedule, get_division_round(), DIVISION_ROUNDS);
    repeat_round(&mut schedule, get_conference_round(), CONFERENCE_ROUNDS);
    repeat_round(&mut schedule, get_interconference_round(), INTERCONFERENCE_ROUNDS);

    return schedule;
}

// Generate a schedule for the teams, given in alignment order.
// The days are shuffled, the games within a day are not.
pub fn generate_schedule<R: Rng + ?Sized>(teams: &[TeamId], rng: &mut R) -> Result<Vec<Vec<Matchup>>> {
    if teams.len() != LEAGUE_SIZE {
        return Err(LeagueError::WrongTeamCount { required: LEAGUE_SIZE, found: teams.len() });
    }

    let mut schedule: Vec<Vec<Matchup>> = generate_slot_schedule().into_iter()
        .map(|games| games.into_iter().map(|[home, away]| [teams[home], teams[away]]).collect())
        .collect();

    schedule.shuffle(rng);
    Ok(schedule)
}
