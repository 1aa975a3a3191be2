use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::PlayerId;

// Labels of the lines a team dresses.
#[derive(Debug, Serialize, Deserialize)]
#[derive(Eq, Hash, PartialEq)]
#[derive(Clone, Copy)]
pub enum LineId {
    L1,
    L2,
    L3,
    L4,
    D1,
    D2,
    D3,
    G,
    Scratch,
}

impl LineId {
    pub const ALL: [LineId; 9] = [
        LineId::L1, LineId::L2, LineId::L3, LineId::L4,
        LineId::D1, LineId::D2, LineId::D3,
        LineId::G,
        LineId::Scratch,
    ];

    pub const FORWARD_LINES: [LineId; 4] = [LineId::L1, LineId::L2, LineId::L3, LineId::L4];
    pub const DEFENCE_PAIRS: [LineId; 3] = [LineId::D1, LineId::D2, LineId::D3];

    fn index(self) -> usize {
        self as usize
    }

    // How many players the line takes when full. Scratch has no limit.
    pub fn size(self) -> usize {
        match self {
            LineId::L1 | LineId::L2 | LineId::L3 | LineId::L4 => 3,
            LineId::D1 | LineId::D2 | LineId::D3 => 2,
            LineId::G => 1,
            LineId::Scratch => 0,
        }
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// The lines of a team. Slots hold handles to rostered players.
// A vacated slot stays in place as None so slot positions do not move.
#[derive(Debug, Serialize)]
#[derive(Default, Clone, PartialEq)]
pub struct LineUp {
    lines: [Vec<Option<PlayerId>>; 9],
}

// Basics.
impl LineUp {
    pub fn get_line(&self, id: LineId) -> &[Option<PlayerId>] {
        &self.lines[id.index()]
    }

    // Get the players of a line without the vacated slots.
    pub fn get_players(&self, id: LineId) -> Vec<PlayerId> {
        self.get_line(id).iter().flatten().copied().collect()
    }

    // Get the goalkeeper who plays.
    pub fn get_goalkeeper(&self) -> Option<PlayerId> {
        self.get_line(LineId::G).iter().flatten().next().copied()
    }

    // Find the line a player is on.
    pub fn get_line_of(&self, player_id: PlayerId) -> Option<LineId> {
        LineId::ALL.into_iter().find(|id| self.get_line(*id).contains(&Some(player_id)))
    }

    // Make sure every line is filled.
    pub fn is_full(&self) -> bool {
        LineId::ALL.into_iter()
            .filter(|id| *id != LineId::Scratch)
            .all(|id| {
                let line = self.get_line(id);
                line.len() == id.size() && line.iter().all(Option::is_some)
            })
    }
}

// Functional.
impl LineUp {
    // Replace the contents of a line.
    // The given players leave their previous lines, and whoever is pushed out goes to Scratch.
    pub fn set_line(&mut self, id: LineId, players: &[PlayerId]) {
        let displaced: Vec<PlayerId> = self.get_players(id).into_iter()
            .filter(|player_id| !players.contains(player_id))
            .collect();

        for player_id in players {
            self.vacate(*player_id);
        }

        self.lines[id.index()] = players.iter().map(|player_id| Some(*player_id)).collect();
        self.lines[LineId::Scratch.index()].extend(displaced.into_iter().map(Some));
    }

    // Put a player on Scratch unless they are on a line already.
    pub fn scratch_if_unassigned(&mut self, player_id: PlayerId) {
        if self.get_line_of(player_id).is_none() {
            self.lines[LineId::Scratch.index()].push(Some(player_id));
        }
    }

    // Take the player out of every line, leaving an empty slot behind.
    // Scratch is not a real line, so the player is simply dropped from it.
    pub fn vacate(&mut self, player_id: PlayerId) {
        for (i, line) in self.lines.iter_mut().enumerate() {
            if i == LineId::Scratch.index() {
                line.retain(|slot| *slot != Some(player_id));
                continue;
            }

            for slot in line.iter_mut() {
                if *slot == Some(player_id) {
                    *slot = None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_line_moves_players_and_scratches_the_displaced() {
        let mut lineup = LineUp::default();
        for id in 0..5 {
            lineup.scratch_if_unassigned(id);
        }

        lineup.set_line(LineId::L1, &[0, 1, 2]);
        assert_eq!(lineup.get_players(LineId::L1), vec![0, 1, 2]);
        assert_eq!(lineup.get_players(LineId::Scratch), vec![3, 4]);

        lineup.set_line(LineId::L1, &[3, 1, 2]);
        assert_eq!(lineup.get_line_of(0), Some(LineId::Scratch));
        assert_eq!(lineup.get_line_of(3), Some(LineId::L1));
        assert_eq!(lineup.get_players(LineId::Scratch), vec![4, 0]);
    }

    #[test]
    fn moving_a_player_between_lines_leaves_a_hole() {
        let mut lineup = LineUp::default();
        lineup.set_line(LineId::D1, &[10, 11]);
        lineup.set_line(LineId::D2, &[11, 12]);

        assert_eq!(lineup.get_line(LineId::D1), &[Some(10), None]);
        assert_eq!(lineup.get_line(LineId::D2), &[Some(11), Some(12)]);
    }

    #[test]
    fn vacate_keeps_slot_positions() {
        let mut lineup = LineUp::default();
        lineup.set_line(LineId::L2, &[4, 5, 6]);
        lineup.set_line(LineId::G, &[9]);
        lineup.scratch_if_unassigned(7);

        lineup.vacate(5);
        lineup.vacate(7);
        lineup.vacate(9);

        assert_eq!(lineup.get_line(LineId::L2), &[Some(4), None, Some(6)]);
        assert!(lineup.get_line(LineId::Scratch).is_empty());
        assert_eq!(lineup.get_goalkeeper(), None);
        assert!(!lineup.is_full());
    }
}
