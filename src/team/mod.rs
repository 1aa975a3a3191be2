pub mod lineup;
pub mod roster;

use serde_json::json;

use crate::{
    error::{LeagueError, Result},
    person::player::Player,
    stats::{Era, StatLedger, TeamStat, TeamStatLine},
    types::{PlayerId, StatValue, TeamId}
};
use self::roster::Roster;

#[derive(Debug)]
#[derive(Default, Clone)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub roster: Roster,
    pub stats: StatLedger<TeamStat>,
}

// Basics.
impl Team {
    pub fn build(id: TeamId, name: &str) -> Self {
        let mut team = Team::default();
        team.id = id;
        team.name = name.to_string();

        return team;
    }

    // Get the players of the team, forwards first and goalkeepers last.
    pub fn full_roster(&self) -> Vec<PlayerId> {
        self.roster.full_roster()
    }

    // Get relevant information for a team screen.
    pub fn get_team_screen_package(&self, players: &[Player], era: Era) -> serde_json::Value {
        let roster: Vec<serde_json::Value> = self.full_roster().into_iter()
            .filter_map(|id| players.get(id as usize))
            .map(|player| player.get_team_screen_json(era))
            .collect();

        json!({
            "id": self.id,
            "name": self.name,
            "stats": self.statline(era),
            "lineup": self.roster.lineup,
            "roster": roster,
        })
    }
}

// Functional.
impl Team {
    pub fn add_stat(&mut self, era: Era, stat: TeamStat, amount: StatValue) {
        self.stats.add(era, stat, amount);
    }

    pub fn get_stat(&self, era: Era, stat: TeamStat) -> StatValue {
        self.stats.get(era, stat)
    }

    pub fn statline(&self, era: Era) -> TeamStatLine {
        self.stats.statline(era)
    }

    // Take a player off the team. The player keeps their stats.
    pub fn remove_player(&mut self, player: &Player) -> Result<()> {
        if !self.roster.remove_player(player.id, player.position_id) {
            return Err(LeagueError::PlayerNotOnRoster { player: player.id, team: self.id });
        }
        Ok(())
    }

    // Make sure the team can dress a full lineup, building the default lines if not.
    pub fn prepare_for_game(&mut self) -> Result<()> {
        if !self.roster.lineup.is_full() {
            self.roster.generate_default_lines()?;
        }
        Ok(())
    }

    // Close the year: the yearly stats go to the career totals and the positions are sorted again.
    pub fn end_year(&mut self, players: &[Player]) {
        self.stats.roll_up(Era::Season, Era::Career);
        self.stats.roll_up(Era::Playoff, Era::Career);
        self.roster.resort(players);
    }
}
