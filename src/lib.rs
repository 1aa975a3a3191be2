pub mod competition;
pub mod database;
pub mod error;
pub mod match_event;
pub mod names;
pub mod person;
pub mod stats;
pub mod team;
pub mod time;
pub mod types;

pub use competition::League;
pub use error::{LeagueError, Result};
