use std::{collections::HashMap, fmt};

use lazy_static::lazy_static;
use rand::Rng;
use serde::{Deserialize, Serialize};

lazy_static! {
    pub static ref POSITIONS: HashMap<PositionId, Position> = {
        HashMap::from([
            (PositionId::Centre, Position::build(PositionId::Centre, "C", 4)),
            (PositionId::LeftWinger, Position::build(PositionId::LeftWinger, "LW", 4)),
            (PositionId::RightWinger, Position::build(PositionId::RightWinger, "RW", 4)),
            (PositionId::Defender, Position::build(PositionId::Defender, "D", 6)),
            (PositionId::Goalkeeper, Position::build(PositionId::Goalkeeper, "G", 2)),
        ])
    };
}

#[derive(Debug, Serialize, Deserialize)]
#[derive(Eq, Hash, PartialEq, PartialOrd, Ord)]
#[derive(Clone, Copy)]
#[repr(u8)]
pub enum PositionId {
    Centre = 0,
    LeftWinger = 1,
    RightWinger = 2,
    Defender = 3,
    Goalkeeper = 4,
}

impl PositionId {
    // Roster order: forwards first, goalkeepers last.
    pub const ALL: [PositionId; 5] = [
        PositionId::Centre,
        PositionId::LeftWinger,
        PositionId::RightWinger,
        PositionId::Defender,
        PositionId::Goalkeeper,
    ];

    // Get a random position, weighted by how many a full roster needs.
    pub fn get_random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let total_weight: usize = Self::ALL.iter().map(|id| id.get_position().lineup_need).sum();
        let random = rng.random_range(0..total_weight);

        let mut counter = 0;
        for id in Self::ALL {
            counter += id.get_position().lineup_need;
            if random < counter {
                return id;
            }
        }

        return Self::Centre;
    }

    pub fn get_position(&self) -> &'static Position {
        &POSITIONS[self]
    }

    pub fn abbreviation(&self) -> &'static str {
        self.get_position().abbreviation
    }
}

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

#[derive(Debug)]
#[derive(Clone)]
pub struct Position {
    pub id: PositionId,
    pub abbreviation: &'static str,

    // How many of these are needed to fill the default lines.
    pub lineup_need: usize,
}

impl Position {
    pub fn build(id: PositionId, abbreviation: &'static str, lineup_need: usize) -> Self {
        Self {
            id: id,
            abbreviation: abbreviation,
            lineup_need: lineup_need,
        }
    }
}
