pub mod event;
pub mod team;

use rand::Rng;
use serde::Serialize;

use crate::{
    database::Database,
    error::{LeagueError, Result},
    stats::{Era, PlayerStat, TeamStat},
    types::{PlayerId, TeamId}
};
use self::{
    event::{simulate_shot, Goal, ShotModel, ShotResult},
    team::{PlayersOnIce, TeamGameData}
};

// Whether a game counts towards the regular season or the playoffs.
#[derive(Debug, Serialize)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum GameType {
    Season,
    Playoff,
}

impl GameType {
    // The era where the game's stats end up.
    pub fn era(self) -> Era {
        match self {
            GameType::Season => Era::Season,
            GameType::Playoff => Era::Playoff,
        }
    }
}

#[derive(Debug)]
#[derive(Clone)]
pub struct Game {
    home: TeamGameData,
    away: TeamGameData,
    game_type: GameType,
    rules: Rules,
    clock: Clock,
}

// Basics.
impl Game {
    pub fn build(home: TeamId, away: TeamId, game_type: GameType) -> Self {
        let mut game = Game {
            home: TeamGameData::default(),
            away: TeamGameData::default(),
            game_type: game_type,
            rules: Rules::build_for(game_type),
            clock: Clock::default(),
        };
        game.home.team_id = home;
        game.away.team_id = away;

        return game;
    }
}

// Functional.
impl Game {
    // Play the game from the opening faceoff to the final result.
    pub fn play<R: Rng>(&mut self, db: &mut Database, model: &dyn ShotModel, rng: &mut R) -> Result<GameSummary> {
        self.do_pre_game_tasks(db)?;
        self.simulate(db, model, rng);
        Ok(self.do_post_game_tasks(db))
    }

    // Both teams must be able to dress a full lineup before the game starts.
    // Nothing is changed if either of them cannot.
    fn do_pre_game_tasks(&mut self, db: &mut Database) -> Result<()> {
        if self.home.team_id == self.away.team_id {
            return Err(LeagueError::InvalidAttribute(format!("team {} cannot play against itself", self.home.team_id)));
        }
        let mut prepared = Vec::new();
        for team_id in [self.home.team_id, self.away.team_id] {
            let mut team = db.team(team_id)?.clone();
            team.prepare_for_game()?;
            prepared.push(team);
        }

        for team in prepared {
            db.team_mut(team.id)?.roster = team.roster;
        }

        self.home = TeamGameData::build(db.team(self.home.team_id)?);
        self.away = TeamGameData::build(db.team(self.away.team_id)?);
        self.clock = Clock::default();
        Ok(())
    }

    // Simulate a game of ice hockey.
    fn simulate<R: Rng>(&mut self, db: &mut Database, model: &dyn ShotModel, rng: &mut R) {
        // Regular time.
        while !self.is_regular_time_over() {
            self.play_period(db, model, rng);
        }

        // Overtime.
        while !self.is_overtime_over(db) {
            self.play_minute(db, model, rng);
            self.clock.advance();
        }
    }

    fn play_period<R: Rng>(&mut self, db: &mut Database, model: &dyn ShotModel, rng: &mut R) {
        while !self.is_period_over() {
            self.play_minute(db, model, rng);
            self.clock.advance();
        }

        self.clock.next_period();
    }

    // One team attacks and gets exactly one shot at goal.
    fn play_minute<R: Rng>(&mut self, db: &mut Database, model: &dyn ShotModel, rng: &mut R) {
        let minute = self.get_game_minutes() + 1;
        let (offence, defence) = match rng.random_bool(0.5) {
            true => (&mut self.home, &mut self.away),
            false => (&mut self.away, &mut self.home),
        };

        let (attackers, defenders) = Self::get_lines(offence, defence, rng);
        let result = simulate_shot(
            model,
            attackers.get_total_rating(&db.players),
            defenders.get_total_rating(&db.players),
            rng,
        );

        let shot = Shot {
            attackers: attackers,
            defenders: defenders,
            result: result,
            minute: minute,
        };
        Self::process_result(db, offence, defence, shot, rng);
    }

    // Get the players on ice for a shot. The defending goalkeeper is the last defender.
    fn get_lines<R: Rng + ?Sized>(offence: &TeamGameData, defence: &TeamGameData, rng: &mut R) -> (PlayersOnIce, PlayersOnIce) {
        let attackers = offence.change_players_on_ice(rng);
        let mut defenders = defence.change_players_on_ice(rng);
        defenders.gk_id = defence.lineup.get_goalkeeper();

        return (attackers, defenders);
    }

    // Write the shot down in the game stats of everyone involved.
    fn process_result<R: Rng + ?Sized>(
        db: &mut Database,
        offence: &mut TeamGameData,
        defence: &mut TeamGameData,
        shot: Shot,
        rng: &mut R,
    ) {
        let Shot { attackers, defenders, result, minute } = shot;

        let mut add = |id: PlayerId, stat: PlayerStat| {
            if let Some(player) = db.players.get_mut(id as usize) {
                player.add_stat(Era::Game, stat, 1);
            }
        };

        for id in attackers.get_ids().into_iter().chain(defenders.get_ids()).chain(offence.lineup.get_goalkeeper()) {
            add(id, PlayerStat::Minutes);
        }

        let mut skaters = attackers.skater_ids;
        if skaters.is_empty() { return; }

        let shooter = skaters.remove(rng.random_range(0..skaters.len()));
        add(shooter, PlayerStat::Shots);
        offence.shots += 1;

        match result {
            ShotResult::Goal => {
                add(shooter, PlayerStat::Goals);
                if let Some(gk_id) = defenders.gk_id {
                    add(gk_id, PlayerStat::GoalsAllowed);
                }

                let assists = rng.random_range(0..3).min(skaters.len());
                let mut assister_ids = Vec::new();
                for _ in 0..assists {
                    let assister = skaters.remove(rng.random_range(0..skaters.len()));
                    add(assister, PlayerStat::Assists);
                    assister_ids.push(assister);
                }

                if let Some(team) = db.teams.get_mut(offence.team_id as usize) {
                    team.add_stat(Era::Game, TeamStat::GoalsFor, 1);
                }
                if let Some(team) = db.teams.get_mut(defence.team_id as usize) {
                    team.add_stat(Era::Game, TeamStat::GoalsAgainst, 1);
                }

                offence.goals.push(Goal {
                    minute: minute,
                    team_id: offence.team_id,
                    scorer_id: shooter,
                    assister_ids: assister_ids,
                });
            },
            ShotResult::Miss => {
                if let Some(gk_id) = defenders.gk_id {
                    add(gk_id, PlayerStat::Saves);
                }
            },
        }
    }

    fn get_goals_for(&self, db: &Database, team_id: TeamId) -> i32 {
        db.teams.get(team_id as usize).map_or(0, |team| team.get_stat(Era::Game, TeamStat::GoalsFor))
    }

    // Give out the result and move the game stats of both teams and their players to the wider era.
    fn do_post_game_tasks(&mut self, db: &mut Database) -> GameSummary {
        let home_goals = self.get_goals_for(db, self.home.team_id);
        let away_goals = self.get_goals_for(db, self.away.team_id);

        let (home_result, away_result) = match home_goals.cmp(&away_goals) {
            std::cmp::Ordering::Greater => (TeamStat::Wins, TeamStat::Losses),
            std::cmp::Ordering::Less => (TeamStat::Losses, TeamStat::Wins),
            std::cmp::Ordering::Equal => (TeamStat::Ties, TeamStat::Ties),
        };

        let era = self.game_type.era();
        for (team_id, result) in [(self.home.team_id, home_result), (self.away.team_id, away_result)] {
            let Some(team) = db.teams.get_mut(team_id as usize) else { continue };
            team.add_stat(Era::Game, result, 1);
            team.stats.roll_up(Era::Game, era);

            for id in team.full_roster() {
                if let Some(player) = db.players.get_mut(id as usize) {
                    player.stats.roll_up(Era::Game, era);
                }
            }
        }

        let mut goals: Vec<Goal> = self.home.goals.iter().chain(self.away.goals.iter()).cloned().collect();
        goals.sort_by_key(|goal| goal.minute);

        GameSummary {
            home_id: self.home.team_id,
            away_id: self.away.team_id,
            game_type: self.game_type,
            home_goals: home_goals,
            away_goals: away_goals,
            home_shots: self.home.shots,
            away_shots: self.away.shots,
            overtime: self.has_overtime(),
            minutes_played: self.get_game_minutes(),
            goals: goals,
        }
    }
}

// Clock-related functions.
impl Game {
    // Get the amount of minutes that have passed in the game.
    fn get_game_minutes(&self) -> u32 {
        (self.clock.periods_completed as u32) * self.rules.period_length + self.clock.period_minutes
    }

    // Check if the regular time of the game is over.
    fn is_regular_time_over(&self) -> bool {
        self.clock.periods_completed >= self.rules.periods
    }

    // Check if the currently ongoing period is over.
    fn is_period_over(&self) -> bool {
        self.clock.period_minutes >= self.rules.period_length
    }

    // Check if the overtime is over.
    fn is_overtime_over(&self, db: &Database) -> bool {
        // Always ends if teams are not tied.
        if self.get_goals_for(db, self.home.team_id) != self.get_goals_for(db, self.away.team_id) {
            return true;
        }

        return self.get_minutes_expired_in_overtime() >= self.rules.overtime_length;
    }

    // How much overtime has been played so far.
    fn get_minutes_expired_in_overtime(&self) -> u32 {
        self.get_game_minutes().saturating_sub(self.rules.get_regular_time())
    }

    // Check if the game has or had overtime.
    fn has_overtime(&self) -> bool {
        self.get_minutes_expired_in_overtime() > 0
    }
}

#[derive(Debug)]
#[derive(Clone, PartialEq)]
pub struct Rules {
    periods: u8,
    period_length: u32,
    overtime_length: u32,
}

// Basics.
impl Rules {
    pub fn build(periods: u8, period_length: u32, overtime_length: u32) -> Self {
        Rules {
            periods: periods,
            period_length: period_length,
            overtime_length: overtime_length,
        }
    }

    // Season games have a short sudden death, playoff games practically never stop before a goal.
    pub fn build_for(game_type: GameType) -> Self {
        match game_type {
            GameType::Season => Self::build(3, 20, 5),
            GameType::Playoff => Self::build(3, 20, 10000),
        }
    }
}

// Functional.
impl Rules {
    // Get the total regular time of the game in minutes.
    fn get_regular_time(&self) -> u32 {
        (self.periods as u32) * self.period_length
    }
}

#[derive(Debug)]
#[derive(Default, Clone, PartialEq)]
struct Clock {
    periods_completed: u8,
    period_minutes: u32,
}

impl Clock {
    // Advance time by one minute.
    fn advance(&mut self) {
        self.period_minutes += 1;
    }

    // Move on to the next period.
    fn next_period(&mut self) {
        self.period_minutes = 0;
        self.periods_completed += 1;
    }
}

// One shot at goal and who was on ice for it.
#[derive(Debug)]
#[derive(Clone, PartialEq)]
struct Shot {
    attackers: PlayersOnIce,
    defenders: PlayersOnIce,
    result: ShotResult,
    minute: u32,
}

// What happened in a game.
#[derive(Debug, Serialize)]
#[derive(Clone, PartialEq)]
pub struct GameSummary {
    pub home_id: TeamId,
    pub away_id: TeamId,
    pub game_type: GameType,
    pub home_goals: i32,
    pub away_goals: i32,
    pub home_shots: u16,
    pub away_shots: u16,
    pub overtime: bool,
    pub minutes_played: u32,
    pub goals: Vec<Goal>,
}

impl GameSummary {
    // Get the winner of the game, if there was one.
    pub fn get_winner(&self) -> Option<TeamId> {
        match self.home_goals.cmp(&self.away_goals) {
            std::cmp::Ordering::Greater => Some(self.home_id),
            std::cmp::Ordering::Less => Some(self.away_id),
            std::cmp::Ordering::Equal => None,
        }
    }

    // Home and away score, with OT if the game needed overtime.
    pub fn get_score(&self) -> String {
        let ot = match self.overtime {
            true => " OT",
            _ => ""
        };

        format!("{} - {}{}", self.home_goals, self.away_goals, ot)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    use crate::{
        names::NamePool,
        person::player::position::PositionId,
        types::StatValue,
        team::lineup::LineId
    };
    use super::{*, event::LogisticShotModel};

    struct Always(f64);

    impl ShotModel for Always {
        fn goal_probability(&self, _: f64, _: f64) -> f64 {
            self.0
        }
    }

    fn two_teams(seed: u64) -> (Database, ChaCha20Rng) {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut pool = NamePool::default_pool(&mut rng);
        let mut db = Database::default();
        db.build_random_team(&mut pool, &mut rng).unwrap();
        db.build_random_team(&mut pool, &mut rng).unwrap();
        (db, rng)
    }

    fn player_total(db: &Database, era: Era, stat: PlayerStat) -> StatValue {
        db.players.iter().map(|player| player.get_stat(era, stat)).sum()
    }

    fn team_total(db: &Database, era: Era, stat: TeamStat) -> StatValue {
        db.teams.iter().map(|team| team.get_stat(era, stat)).sum()
    }

    #[test]
    fn a_minute_has_one_shot_and_twelve_minute_credits() {
        let (mut db, mut rng) = two_teams(1);
        let mut game = Game::build(0, 1, GameType::Season);
        game.do_pre_game_tasks(&mut db).unwrap();

        game.play_minute(&mut db, &LogisticShotModel::default(), &mut rng);

        assert_eq!(player_total(&db, Era::Game, PlayerStat::Minutes), 12);
        assert_eq!(player_total(&db, Era::Game, PlayerStat::Shots), 1);
        assert_eq!(
            player_total(&db, Era::Game, PlayerStat::Goals) + player_total(&db, Era::Game, PlayerStat::Saves),
            1
        );
        assert_eq!(
            player_total(&db, Era::Game, PlayerStat::Goals),
            player_total(&db, Era::Game, PlayerStat::GoalsAllowed)
        );
    }

    #[test]
    fn a_game_gives_one_result_and_matching_goals() {
        for seed in 0..10 {
            let (mut db, mut rng) = two_teams(seed);
            let summary = Game::build(0, 1, GameType::Season)
                .play(&mut db, &LogisticShotModel::default(), &mut rng)
                .unwrap();

            let home = db.team(0).unwrap();
            let away = db.team(1).unwrap();
            assert_eq!(home.get_stat(Era::Season, TeamStat::GoalsFor), away.get_stat(Era::Season, TeamStat::GoalsAgainst));
            assert_eq!(away.get_stat(Era::Season, TeamStat::GoalsFor), home.get_stat(Era::Season, TeamStat::GoalsAgainst));
            assert_eq!(home.get_stat(Era::Season, TeamStat::GoalsFor), summary.home_goals);

            let results = (
                home.get_stat(Era::Season, TeamStat::Wins),
                home.get_stat(Era::Season, TeamStat::Losses),
                home.get_stat(Era::Season, TeamStat::Ties),
                away.get_stat(Era::Season, TeamStat::Wins),
                away.get_stat(Era::Season, TeamStat::Losses),
                away.get_stat(Era::Season, TeamStat::Ties),
            );
            assert!(matches!(results, (1, 0, 0, 0, 1, 0) | (0, 1, 0, 1, 0, 0) | (0, 0, 1, 0, 0, 1)));

            // Every shot is credited in the season and nothing is left in the game era.
            assert_eq!(player_total(&db, Era::Season, PlayerStat::Shots), summary.minutes_played as StatValue);
            assert_eq!(player_total(&db, Era::Season, PlayerStat::Minutes), 12 * summary.minutes_played as StatValue);
            assert_eq!(player_total(&db, Era::Game, PlayerStat::Minutes), 0);
            assert_eq!(team_total(&db, Era::Game, TeamStat::GoalsFor), 0);
            assert_eq!(summary.goals.len() as StatValue, summary.home_goals + summary.away_goals);
            assert!(summary.minutes_played >= 60 && summary.minutes_played <= 65);
        }
    }

    #[test]
    fn scoreless_season_game_ends_in_a_tie_after_overtime() {
        let (mut db, mut rng) = two_teams(2);
        let summary = Game::build(0, 1, GameType::Season).play(&mut db, &Always(0.0), &mut rng).unwrap();

        assert_eq!(summary.minutes_played, 65);
        assert!(summary.overtime);
        assert_eq!(summary.get_winner(), None);
        assert_eq!(summary.get_score(), "0 - 0 OT");
        assert_eq!(team_total(&db, Era::Season, TeamStat::Ties), 2);
        assert_eq!(player_total(&db, Era::Season, PlayerStat::Saves), 65);
    }

    #[test]
    fn playoff_game_always_has_a_winner() {
        for seed in 0..5 {
            let (mut db, mut rng) = two_teams(seed);
            let summary = Game::build(1, 0, GameType::Playoff)
                .play(&mut db, &LogisticShotModel::default(), &mut rng)
                .unwrap();

            assert!(summary.get_winner().is_some());
            assert_eq!(team_total(&db, Era::Playoff, TeamStat::Wins), 1);
            assert_eq!(team_total(&db, Era::Season, TeamStat::Wins), 0);
        }
    }

    #[test]
    fn every_shot_going_in_ends_overtime_at_once() {
        let (mut db, mut rng) = two_teams(3);
        let summary = Game::build(0, 1, GameType::Season).play(&mut db, &Always(1.0), &mut rng).unwrap();

        assert_eq!(summary.goals.len() as u32, summary.minutes_played);
        assert_eq!(player_total(&db, Era::Season, PlayerStat::Saves), 0);
        assert!(summary.get_winner().is_some());
        assert!(summary.minutes_played == 60 || summary.minutes_played == 61);
    }

    #[test]
    fn incomplete_lineup_is_rebuilt_before_the_game() {
        let (mut db, mut rng) = two_teams(4);
        let goalkeeper = db.team(0).unwrap().roster.lineup.get_goalkeeper().unwrap();
        db.team_mut(0).unwrap().roster.lineup.vacate(goalkeeper);
        assert!(!db.team(0).unwrap().roster.lineup.is_full());

        Game::build(0, 1, GameType::Season).play(&mut db, &LogisticShotModel::default(), &mut rng).unwrap();
        assert!(db.team(0).unwrap().roster.lineup.is_full());
        assert_eq!(db.team(0).unwrap().roster.lineup.get_line_of(goalkeeper), Some(LineId::G));
    }

    #[test]
    fn thin_roster_cannot_play() {
        let (mut db, mut rng) = two_teams(5);
        let goalkeepers = db.team(1).unwrap().roster.get_position(PositionId::Goalkeeper).to_vec();
        db.release_player(goalkeepers[0], 1).unwrap();

        let result = Game::build(0, 1, GameType::Season).play(&mut db, &LogisticShotModel::default(), &mut rng);
        assert!(matches!(result, Err(LeagueError::InsufficientDepth { position: PositionId::Goalkeeper, .. })));
        assert_eq!(player_total(&db, Era::Season, PlayerStat::Minutes), 0);
        assert_eq!(team_total(&db, Era::Season, TeamStat::Ties) + team_total(&db, Era::Season, TeamStat::Wins), 0);
    }
}
