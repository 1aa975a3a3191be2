pub mod position;

use rand::Rng;
use serde_json::json;

use crate::{
    error::{LeagueError, Result},
    stats::{Era, PlayerStat, PlayerStatLine, StatLedger},
    types::{PlayerId, Rating, StatValue, TeamId}
};
use super::Person;
use self::position::PositionId;

// The best rating a player can have.
pub const MAX_RATING: Rating = 99;

// How much a rating can move in a year, in either direction.
const YEARLY_RATING_CHANGE: i16 = 5;

#[derive(Debug)]
#[derive(Clone)]
pub struct Player {
    pub id: PlayerId,
    pub person: Person,
    pub rating: Rating,
    pub position_id: PositionId,

    // The team the player currently plays for. Set and cleared by the roster operations only.
    pub team_id: Option<TeamId>,
    pub stats: StatLedger<PlayerStat>,
}

// Basics.
impl Player {
    pub fn build(id: PlayerId, person: Person, rating: Rating, position_id: PositionId) -> Result<Self> {
        if rating > MAX_RATING {
            return Err(LeagueError::InvalidAttribute(format!("rating {rating} of {} is above {MAX_RATING}", person.name)));
        }

        Ok(Self {
            id: id,
            person: person,
            rating: rating,
            position_id: position_id,
            team_id: None,
            stats: StatLedger::build(),
        })
    }

    pub fn name(&self) -> &str {
        &self.person.name
    }

    // Get relevant information of the player for team screen.
    pub fn get_team_screen_json(&self, era: Era) -> serde_json::Value {
        json!({
            "id": self.id,
            "name": self.person.name,
            "age": self.person.age,
            "position": self.position_id.abbreviation(),
            "rating": self.rating,
            "stats": self.statline(era),
        })
    }
}

// Functional.
impl Player {
    pub fn add_stat(&mut self, era: Era, stat: PlayerStat, amount: StatValue) {
        self.stats.add(era, stat, amount);
    }

    pub fn get_stat(&self, era: Era, stat: PlayerStat) -> StatValue {
        self.stats.get(era, stat)
    }

    pub fn statline(&self, era: Era) -> PlayerStatLine {
        self.stats.statline(era)
    }

    // Get a year older. The rating takes a random step and the yearly stats go to the career totals.
    pub fn age_year<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.person.age_year();

        let change = rng.random_range(-YEARLY_RATING_CHANGE..=YEARLY_RATING_CHANGE);
        let rating = (self.rating as i16 + change).clamp(0, MAX_RATING as i16);
        self.rating = rating as Rating;

        self.stats.roll_up(Era::Season, Era::Career);
        self.stats.roll_up(Era::Playoff, Era::Career);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    use super::*;

    fn player(rating: Rating) -> Player {
        Player::build(0, Person::build("Teemu Testinen", 25).unwrap(), rating, PositionId::Centre).unwrap()
    }

    #[test]
    fn build_rejects_illegal_values() {
        assert!(Person::build("Old Timer", 0).is_err());
        assert!(Person::build("", 20).is_err());
        assert!(Player::build(0, Person::build("Too Good", 20).unwrap(), 100, PositionId::Goalkeeper).is_err());
    }

    #[test]
    fn aging_keeps_rating_in_range() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let mut low = player(0);
        let mut high = player(MAX_RATING);

        for _ in 0..50 {
            low.age_year(&mut rng);
            high.age_year(&mut rng);
            assert!(low.rating <= MAX_RATING);
            assert!(high.rating <= MAX_RATING);
        }
        assert_eq!(low.person.age, 75);
    }

    #[test]
    fn aging_moves_yearly_stats_to_career() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let mut p = player(60);
        p.add_stat(Era::Career, PlayerStat::Goals, 10);
        p.add_stat(Era::Season, PlayerStat::Goals, 7);
        p.add_stat(Era::Season, PlayerStat::Minutes, 900);
        p.add_stat(Era::Playoff, PlayerStat::Goals, 2);

        let before = p.rating as i16;
        p.age_year(&mut rng);

        assert_eq!(p.get_stat(Era::Career, PlayerStat::Goals), 19);
        assert_eq!(p.get_stat(Era::Career, PlayerStat::Minutes), 900);
        assert_eq!(p.get_stat(Era::Season, PlayerStat::Goals), 0);
        assert_eq!(p.get_stat(Era::Playoff, PlayerStat::Goals), 0);
        assert!((p.rating as i16 - before).abs() <= YEARLY_RATING_CHANGE);
    }
}
