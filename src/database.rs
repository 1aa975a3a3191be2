// The league database. Players and teams live here and refer to each other by ID.
use rand::Rng;

use crate::{
    error::{LeagueError, Result},
    names::{NameRegistry, NameSupply},
    person::{player::{position::PositionId, Player}, Person},
    team::Team,
    types::{convert, PlayerId, Rating, TeamId}
};

// Ages and ratings of generated players.
const RANDOM_AGE_RANGE: std::ops::RangeInclusive<u8> = 18..=40;
const RANDOM_RATING_RANGE: std::ops::Range<Rating> = 40..90;

#[derive(Debug)]
#[derive(Default, Clone)]
pub struct Database {
    pub players: Vec<Player>,
    pub teams: Vec<Team>,
    names: NameRegistry,
}

// Basics.
impl Database {
    pub fn player(&self, id: PlayerId) -> Result<&Player> {
        self.players.get(id as usize).ok_or(LeagueError::UnknownPlayer(id))
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player> {
        self.players.get_mut(id as usize).ok_or(LeagueError::UnknownPlayer(id))
    }

    pub fn team(&self, id: TeamId) -> Result<&Team> {
        self.teams.get(id as usize).ok_or(LeagueError::UnknownTeam(id))
    }

    pub fn team_mut(&mut self, id: TeamId) -> Result<&mut Team> {
        self.teams.get_mut(id as usize).ok_or(LeagueError::UnknownTeam(id))
    }

    pub fn team_ids(&self) -> Vec<TeamId> {
        (0..self.teams.len()).map(convert::int::<usize, TeamId>).collect()
    }
}

// Functional.
impl Database {
    // Create a player without a team. A name already in use gets a suffix.
    pub fn add_player(&mut self, name: &str, age: u8, rating: Rating, position_id: PositionId) -> Result<PlayerId> {
        let id = PlayerId::try_from(self.players.len())
            .map_err(|_| LeagueError::InvalidAttribute(format!("the league cannot hold more than {} players", self.players.len())))?;
        let mut player = Player::build(id, Person::build(name, age)?, rating, position_id)?;
        player.person.name = self.names.claim_player_name(name);

        self.players.push(player);
        Ok(id)
    }

    // Create a team without players.
    pub fn add_team(&mut self, name: &str) -> Result<TeamId> {
        let id = TeamId::try_from(self.teams.len())
            .map_err(|_| LeagueError::InvalidAttribute(format!("the league cannot hold more than {} teams", self.teams.len())))?;
        let name = self.names.claim_team_name(name)?;

        self.teams.push(Team::build(id, &name));
        Ok(id)
    }

    // Put a player on the roster of a team.
    pub fn sign_player(&mut self, player_id: PlayerId, team_id: TeamId) -> Result<()> {
        self.team(team_id)?;
        let player = self.player(player_id)?;
        if let Some(team) = player.team_id {
            return Err(LeagueError::PlayerAlreadyRostered { player: player_id, team });
        }

        let team = &mut self.teams[team_id as usize];
        team.roster.add_player(&self.players[player_id as usize], &self.players);
        self.players[player_id as usize].team_id = Some(team_id);
        Ok(())
    }

    // Take a player off the roster of a team. Lines the player was on get an empty slot.
    pub fn release_player(&mut self, player_id: PlayerId, team_id: TeamId) -> Result<()> {
        let player = self.players.get(player_id as usize).ok_or(LeagueError::UnknownPlayer(player_id))?;
        let team = self.teams.get_mut(team_id as usize).ok_or(LeagueError::UnknownTeam(team_id))?;
        team.remove_player(player)?;

        self.players[player_id as usize].team_id = None;
        Ok(())
    }

    // Create a random player. The position is random too unless given.
    pub fn build_random_player<N: NameSupply + ?Sized, R: Rng>(&mut self, supply: &mut N, position_id: Option<PositionId>, rng: &mut R) -> Result<PlayerId> {
        let name = supply.player_name(rng)?;
        self.add_random_player(&name, position_id, rng)
    }

    fn add_random_player<R: Rng>(&mut self, name: &str, position_id: Option<PositionId>, rng: &mut R) -> Result<PlayerId> {
        let position_id = match position_id {
            Some(id) => id,
            None => PositionId::get_random(rng),
        };
        let age = rng.random_range(RANDOM_AGE_RANGE);
        let rating = rng.random_range(RANDOM_RATING_RANGE);

        self.add_player(name, age, rating, position_id)
    }

    // Create a random team with a full roster and default lines.
    // All names are drawn first so that a name shortage creates nothing.
    pub fn build_random_team<N: NameSupply + ?Sized, R: Rng>(&mut self, supply: &mut N, rng: &mut R) -> Result<TeamId> {
        let team_name = supply.team_name()?;

        let mut signings = Vec::new();
        for position in PositionId::ALL {
            for _ in 0..position.get_position().lineup_need {
                signings.push((supply.player_name(rng)?, position));
            }
        }

        let team_id = self.add_team(&team_name)?;
        for (name, position) in signings {
            let player_id = self.add_random_player(&name, Some(position), rng)?;
            self.sign_player(player_id, team_id)?;
        }

        self.teams[team_id as usize].roster.generate_default_lines()?;
        Ok(team_id)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    use crate::{names::NamePool, team::lineup::LineId};
    use super::*;

    #[test]
    fn random_team_has_full_lines() {
        let mut rng = ChaCha20Rng::seed_from_u64(8);
        let mut pool = NamePool::default_pool(&mut rng);
        let mut db = Database::default();

        let team_id = db.build_random_team(&mut pool, &mut rng).unwrap();
        let team = db.team(team_id).unwrap();

        assert_eq!(team.full_roster().len(), 20);
        assert!(team.roster.lineup.is_full());
        for id in team.full_roster() {
            let player = db.player(id).unwrap();
            assert_eq!(player.team_id, Some(team_id));
            assert!((18..=40).contains(&player.person.age));
            assert!((40..90).contains(&player.rating));
        }
    }

    #[test]
    fn no_team_names_creates_nothing() {
        let mut rng = ChaCha20Rng::seed_from_u64(8);
        let mut pool = NamePool::from_text("Aho\nLaine\n", "", &mut rng);
        let mut db = Database::default();

        assert_eq!(db.build_random_team(&mut pool, &mut rng), Err(LeagueError::NoNamesRemaining));
        assert!(db.teams.is_empty());
        assert!(db.players.is_empty());
    }

    #[test]
    fn duplicate_names() {
        let mut db = Database::default();
        let first = db.add_player("Saku Koivu", 30, 80, PositionId::Centre).unwrap();
        let second = db.add_player("Saku Koivu", 19, 55, PositionId::Centre).unwrap();

        assert_eq!(db.player(first).unwrap().name(), "Saku Koivu");
        assert_eq!(db.player(second).unwrap().name(), "Saku Koivu Jr");

        db.add_team("Kotkat").unwrap();
        assert_eq!(db.add_team("Kotkat"), Err(LeagueError::DuplicateTeamName("Kotkat".to_string())));
        assert_eq!(db.teams.len(), 1);
    }

    #[test]
    fn signing_and_releasing() {
        let mut db = Database::default();
        let player = db.add_player("Jari Kurri", 25, 85, PositionId::RightWinger).unwrap();
        let team = db.add_team("Sudet").unwrap();
        let other = db.add_team("Karhut").unwrap();

        db.sign_player(player, team).unwrap();
        assert_eq!(db.sign_player(player, other), Err(LeagueError::PlayerAlreadyRostered { player, team }));
        assert_eq!(db.team(team).unwrap().roster.lineup.get_line_of(player), Some(LineId::Scratch));

        assert_eq!(db.release_player(player, other), Err(LeagueError::PlayerNotOnRoster { player, team: other }));
        db.release_player(player, team).unwrap();
        assert_eq!(db.player(player).unwrap().team_id, None);
        assert!(db.team(team).unwrap().full_roster().is_empty());
        assert_eq!(db.team(team).unwrap().roster.lineup.get_line_of(player), None);
    }

    #[test]
    fn team_table_has_a_limit() {
        let mut db = Database::default();
        for i in 0..256 {
            db.add_team(&format!("Team {i}")).unwrap();
        }

        assert!(matches!(db.add_team("One Too Many"), Err(LeagueError::InvalidAttribute(_))));
        assert_eq!(db.teams.len(), 256);
        assert_eq!(db.team(255).unwrap().name, "Team 255");
    }

    #[test]
    fn invalid_player_is_not_created() {
        let mut db = Database::default();
        assert!(db.add_player("Nobody", 0, 50, PositionId::Defender).is_err());
        assert!(db.add_player("Nobody", 20, 100, PositionId::Defender).is_err());
        assert!(db.players.is_empty());
        assert_eq!(db.add_player("Nobody", 20, 50, PositionId::Defender), Ok(0));
    }
}
