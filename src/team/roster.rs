use log::warn;

use crate::{
    error::{LeagueError, Result},
    person::player::{position::PositionId, Player},
    types::PlayerId
};
use super::lineup::{LineId, LineUp};

// The players of a team by position, best first, and the lines they form.
#[derive(Debug)]
#[derive(Default, Clone, PartialEq)]
pub struct Roster {
    buckets: [Vec<PlayerId>; 5],
    pub lineup: LineUp,
}

// Players are looked up by their ID in the player table.
fn rating_of(players: &[Player], id: PlayerId) -> u8 {
    players.get(id as usize).map_or(0, |player| player.rating)
}

// Basics.
impl Roster {
    pub fn get_position(&self, position: PositionId) -> &[PlayerId] {
        &self.buckets[position as usize]
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.buckets.iter().any(|bucket| bucket.contains(&id))
    }

    // Every player, forwards first and goalkeepers last.
    pub fn full_roster(&self) -> Vec<PlayerId> {
        PositionId::ALL.iter()
            .flat_map(|position| self.get_position(*position).iter().copied())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Functional.
impl Roster {
    // Add a player to their position. Players not on a line are scratched.
    pub fn add_player(&mut self, player: &Player, players: &[Player]) {
        let bucket = &mut self.buckets[player.position_id as usize];
        bucket.push(player.id);
        Self::sort_bucket(bucket, players);

        self.lineup.scratch_if_unassigned(player.id);
    }

    // Take a player off the roster and out of every line.
    // Return false if the player was not there.
    pub fn remove_player(&mut self, id: PlayerId, position: PositionId) -> bool {
        let bucket = &mut self.buckets[position as usize];
        let Some(index) = bucket.iter().position(|player_id| *player_id == id) else {
            return false;
        };

        bucket.remove(index);
        self.lineup.vacate(id);
        return true;
    }

    // Sort every position again, after ratings have changed.
    pub fn resort(&mut self, players: &[Player]) {
        for bucket in self.buckets.iter_mut() {
            Self::sort_bucket(bucket, players);
        }
    }

    // Best first. The sort is stable so equal ratings keep their order of arrival.
    fn sort_bucket(bucket: &mut [PlayerId], players: &[Player]) {
        bucket.sort_by_key(|id| std::cmp::Reverse(rating_of(players, *id)));
    }

    // Check that every position has enough players for the default lines.
    fn check_depth(&self) -> Result<()> {
        for position in PositionId::ALL {
            let found = self.get_position(position).len();
            let required = position.get_position().lineup_need;
            if found < required {
                return Err(LeagueError::InsufficientDepth { position, found, required });
            }
        }
        Ok(())
    }

    // Build the lines from the best players of each position.
    // Nothing changes if a position is too thin.
    pub fn generate_default_lines(&mut self) -> Result<()> {
        if let Err(e) = self.check_depth() {
            warn!("cannot generate default lines: {e}");
            return Err(e);
        }

        let centres = self.get_position(PositionId::Centre);
        let left_wingers = self.get_position(PositionId::LeftWinger);
        let right_wingers = self.get_position(PositionId::RightWinger);
        let defenders = self.get_position(PositionId::Defender);
        let goalkeepers = self.get_position(PositionId::Goalkeeper);

        let mut lineup = LineUp::default();
        for (i, line) in LineId::FORWARD_LINES.into_iter().enumerate() {
            lineup.set_line(line, &[centres[i], left_wingers[i], right_wingers[i]]);
        }
        for (i, pair) in LineId::DEFENCE_PAIRS.into_iter().enumerate() {
            lineup.set_line(pair, &defenders[i * 2..i * 2 + 2]);
        }
        lineup.set_line(LineId::G, &goalkeepers[..1]);

        for id in self.full_roster() {
            lineup.scratch_if_unassigned(id);
        }

        self.lineup = lineup;
        Ok(())
    }
}
