use rand::{seq::IndexedRandom, Rng};

use crate::{
    error::{LeagueError, Result},
    person::player::{position::PositionId, Player},
    team::{lineup::{LineId, LineUp}, Team},
    types::{PlayerId, TeamId}
};
use super::event::Goal;

#[derive(Debug)]
#[derive(Default, Clone)]
pub struct TeamGameData {
    pub team_id: TeamId,
    pub lineup: LineUp,
    pub shots: u16,
    pub goals: Vec<Goal>,
}

// Basics.
impl TeamGameData {
    pub fn build(team: &Team) -> Self {
        let mut team_data = TeamGameData::default();
        team_data.team_id = team.id;
        team_data.lineup = team.roster.lineup.clone();
        return team_data;
    }

    // Get the goalkeeper in net for the team.
    pub fn get_goalkeeper(&self) -> Result<PlayerId> {
        self.lineup.get_goalkeeper().ok_or(LeagueError::InsufficientDepth {
            position: PositionId::Goalkeeper,
            found: 0,
            required: 1,
        })
    }
}

// Functional.
impl TeamGameData {
    // Pick a random forward line and a random defence pair to go on ice.
    pub fn change_players_on_ice<R: Rng + ?Sized>(&self, rng: &mut R) -> PlayersOnIce {
        let mut players_on_ice = PlayersOnIce::default();

        for lines in [&LineId::FORWARD_LINES[..], &LineId::DEFENCE_PAIRS[..]] {
            if let Some(line) = lines.choose(rng) {
                players_on_ice.skater_ids.extend(self.lineup.get_players(*line));
            }
        }

        return players_on_ice;
    }
}

// The players on ice for one minute.
#[derive(Debug)]
#[derive(Default, Clone, PartialEq)]
pub struct PlayersOnIce {
    pub skater_ids: Vec<PlayerId>,
    pub gk_id: Option<PlayerId>,
}

impl PlayersOnIce {
    // Every player on ice, the goalkeeper last.
    pub fn get_ids(&self) -> Vec<PlayerId> {
        let mut ids = self.skater_ids.clone();
        ids.extend(self.gk_id);
        return ids;
    }

    // Sum of the ratings of everyone on ice.
    pub fn get_total_rating(&self, players: &[Player]) -> f64 {
        self.get_ids().into_iter()
            .filter_map(|id| players.get(id as usize))
            .map(|player| player.rating as f64)
            .sum()
    }
}
