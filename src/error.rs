// Errors that the league can run into.
use thiserror::Error;

use crate::{person::player::position::PositionId, types::{PlayerId, TeamId}};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LeagueError {
    // Configuration errors. The operation is aborted and prior state is kept.
    #[error("not enough {position}: found {found}, need at least {required}")]
    InsufficientDepth { position: PositionId, found: usize, required: usize },

    #[error("team name {0:?} is already in use")]
    DuplicateTeamName(String),

    #[error("a league needs exactly {required} teams, got {found}")]
    WrongTeamCount { required: usize, found: usize },

    #[error("invalid attribute: {0}")]
    InvalidAttribute(String),

    // Lookup errors.
    #[error("unknown stat {0:?}")]
    UnknownStat(String),

    #[error("unknown era {0:?}")]
    UnknownEra(String),

    #[error("no player with id {0}")]
    UnknownPlayer(PlayerId),

    #[error("no team with id {0}")]
    UnknownTeam(TeamId),

    #[error("player {player} is not on the roster of team {team}")]
    PlayerNotOnRoster { player: PlayerId, team: TeamId },

    #[error("player {player} already plays for team {team}")]
    PlayerAlreadyRostered { player: PlayerId, team: TeamId },

    // Exhaustion.
    #[error("no names remaining")]
    NoNamesRemaining,

    // The bracket is never repaired once this happens.
    #[error("playoff bracket is inconsistent: {0}")]
    BracketInconsistent(String),
}

pub type Result<T> = std::result::Result<T, LeagueError>;
