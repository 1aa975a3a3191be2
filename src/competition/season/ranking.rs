// Functions for ranking teams and players.

use std::cmp::Ordering;

use crate::{
    person::player::Player,
    stats::{Era, PlayerStat, TeamStat},
    team::Team,
    types::{PlayerId, StatValue, TeamId}
};

// What a ranking is based on.
#[derive(Debug)]
#[derive(Eq, Hash, PartialEq)]
#[derive(Clone, Copy)]
pub enum RankCriteria {
    Wins,
    Points,
    GoalDifference,
    GoalsScored,
}

type CmpFunc = fn (&Team, &Team, Era) -> Ordering;

// Compare functions here.

fn compare_wins(a: &Team, b: &Team, era: Era) -> Ordering {
    b.get_stat(era, TeamStat::Wins).cmp(&a.get_stat(era, TeamStat::Wins))
}

fn compare_points(a: &Team, b: &Team, era: Era) -> Ordering {
    b.statline(era).points.cmp(&a.statline(era).points)
}

fn compare_goal_difference(a: &Team, b: &Team, era: Era) -> Ordering {
    let difference = |team: &Team| team.get_stat(era, TeamStat::GoalsFor) - team.get_stat(era, TeamStat::GoalsAgainst);
    difference(b).cmp(&difference(a))
}

fn compare_goals_scored(a: &Team, b: &Team, era: Era) -> Ordering {
    b.get_stat(era, TeamStat::GoalsFor).cmp(&a.get_stat(era, TeamStat::GoalsFor))
}

impl RankCriteria {
    fn get_sort_function(self) -> CmpFunc {
        match self {
            RankCriteria::Wins => compare_wins,
            RankCriteria::Points => compare_points,
            RankCriteria::GoalDifference => compare_goal_difference,
            RankCriteria::GoalsScored => compare_goals_scored,
        }
    }
}

// Sort teams by the criteria in order of priority.
// The sort is stable, so teams that cannot be told apart keep the order they were given in.
pub fn rank_teams<'a>(teams: &[&'a Team], criteria: &[RankCriteria], era: Era) -> Vec<&'a Team> {
    let mut ranked = teams.to_vec();
    ranked.sort_by(|a, b| {
        criteria.iter()
            .map(|criterion| criterion.get_sort_function()(a, b, era))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });

    return ranked;
}

// Order teams by their regular season wins, with no tiebreakers.
pub fn order_teams_by_record<'a>(teams: &[&'a Team]) -> Vec<&'a Team> {
    rank_teams(teams, &[RankCriteria::Wins], Era::Season)
}

// Get the eight playoff seeds of a conference, given its divisions.
// Division winners take the first four seeds, the best of the rest the last four.
pub fn get_playoff_seeds(divisions: &[Vec<&Team>]) -> Vec<TeamId> {
    let mut division_winners = Vec::new();
    let mut others = Vec::new();

    for division in divisions {
        let mut ranked = order_teams_by_record(division).into_iter();
        division_winners.extend(ranked.next());
        others.extend(ranked);
    }

    let mut seeds: Vec<TeamId> = order_teams_by_record(&division_winners).iter().map(|team| team.id).collect();
    seeds.extend(order_teams_by_record(&others).iter().take(4).map(|team| team.id));

    return seeds;
}

// Get the players with the most of a stat, best first. Ties keep the player order.
pub fn get_leaders(players: &[Player], era: Era, stat: PlayerStat, n: usize) -> Vec<(PlayerId, StatValue)> {
    let mut leaders: Vec<(PlayerId, StatValue)> = players.iter()
        .map(|player| (player.id, player.get_stat(era, stat)))
        .collect();

    leaders.sort_by(|a, b| b.1.cmp(&a.1));
    leaders.truncate(n);
    return leaders;
}
