// The league runs the calendar and everything that happens on it.
pub mod season;

use log::{debug, error, info};
use ordinal::ToOrdinal as _;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde_json::json;

use crate::{
    database::Database,
    error::{LeagueError, Result},
    match_event::{event::{LogisticShotModel, ShotModel}, Game, GameSummary, GameType},
    names::NameSupply,
    person::player::Player,
    stats::{Era, PlayerStat, PlayerStatLine, TeamStat, TeamStatLine},
    team::Team,
    time::{CalendarEvent, LeagueDate, Phase},
    types::{Matchup, PlayerId, StatValue, TeamId}
};
use self::season::{
    knockout_round::PlayoffBracket,
    ranking::{self, RankCriteria},
    schedule_generator::{LEAGUE_SIZE, TEAMS_IN_DIVISION},
    Season
};

pub const CONFERENCE_NAMES: [&str; 2] = ["American", "National"];
pub const DIVISION_NAMES: [&str; 4] = ["North", "South", "East", "West"];

const TEAMS_IN_CONFERENCE: usize = LEAGUE_SIZE / 2;
const STANDINGS_CRITERIA: [RankCriteria; 2] = [RankCriteria::Points, RankCriteria::GoalDifference];

pub struct League {
    pub db: Database,
    date: LeagueDate,
    season: Season,
    playoffs: Option<PlayoffBracket>,
    rng: ChaCha20Rng,
    shot_model: Box<dyn ShotModel>,

    // Teams in alignment order: the first half is the American conference, the second the National one,
    // and every four teams in a row make a division.
    alignment: Vec<TeamId>,
    champions: Vec<(u16, TeamId)>,

    // Set when a calendar transition fails. The league cannot go on after that.
    halted: Option<LeagueError>,
}

// Basics.
impl League {
    // Build a league from teams already in the database, given in alignment order.
    pub fn build(db: Database, alignment: Vec<TeamId>, seed: u64) -> Result<Self> {
        Self::build_with_rng(db, alignment, ChaCha20Rng::seed_from_u64(seed))
    }

    fn build_with_rng(db: Database, alignment: Vec<TeamId>, mut rng: ChaCha20Rng) -> Result<Self> {
        if alignment.len() != LEAGUE_SIZE {
            return Err(LeagueError::WrongTeamCount { required: LEAGUE_SIZE, found: alignment.len() });
        }
        for (i, id) in alignment.iter().enumerate() {
            db.team(*id)?;
            if alignment[..i].contains(id) {
                return Err(LeagueError::InvalidAttribute(format!("team {id} is aligned twice")));
            }
        }

        let date = LeagueDate::default();
        let season = Season::build(date.year, &alignment, &mut rng)?;

        Ok(Self {
            db: db,
            date: date,
            season: season,
            playoffs: None,
            rng: rng,
            shot_model: Box::new(LogisticShotModel::default()),
            alignment: alignment,
            champions: Vec::new(),
            halted: None,
        })
    }

    // Create a full league of random teams. Teams are aligned in the order they were created.
    pub fn create_random_league<N: NameSupply + ?Sized>(supply: &mut N, seed: u64) -> Result<Self> {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut db = Database::default();

        let mut alignment = Vec::new();
        for _ in 0..LEAGUE_SIZE {
            alignment.push(db.build_random_team(supply, &mut rng)?);
        }

        info!("created a league of {} teams and {} players", db.teams.len(), db.players.len());
        Self::build_with_rng(db, alignment, rng)
    }

    // Replace the way shots are decided.
    pub fn set_shot_model(&mut self, model: Box<dyn ShotModel>) {
        self.shot_model = model;
    }

    pub fn get_date(&self) -> LeagueDate {
        self.date
    }

    pub fn get_season(&self) -> &Season {
        &self.season
    }

    pub fn get_playoffs(&self) -> Option<&PlayoffBracket> {
        self.playoffs.as_ref()
    }

    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    // Champions of past years, oldest first.
    pub fn get_champions(&self) -> &[(u16, TeamId)] {
        &self.champions
    }

    // Get the teams of a division. Divisions are numbered across the league, 0 to 7.
    pub fn get_division(&self, division: usize) -> Result<Vec<&Team>> {
        let start = division * TEAMS_IN_DIVISION;
        let ids = self.alignment.get(start..start + TEAMS_IN_DIVISION)
            .ok_or_else(|| LeagueError::InvalidAttribute(format!("there is no division {division}")))?;

        ids.iter().map(|id| self.db.team(*id)).collect()
    }

    fn get_conference_divisions(&self, conference: usize) -> Result<Vec<Vec<&Team>>> {
        let divisions_in_conference = TEAMS_IN_CONFERENCE / TEAMS_IN_DIVISION;
        (0..divisions_in_conference)
            .map(|i| self.get_division(conference * divisions_in_conference + i))
            .collect()
    }
}

// Queries.
impl League {
    pub fn player_stat(&self, player_id: PlayerId, era: Era, stat: PlayerStat) -> Result<StatValue> {
        Ok(self.db.player(player_id)?.get_stat(era, stat))
    }

    pub fn team_stat(&self, team_id: TeamId, era: Era, stat: TeamStat) -> Result<StatValue> {
        Ok(self.db.team(team_id)?.get_stat(era, stat))
    }

    pub fn player_statline(&self, player_id: PlayerId, era: Era) -> Result<PlayerStatLine> {
        Ok(self.db.player(player_id)?.statline(era))
    }

    pub fn team_statline(&self, team_id: TeamId, era: Era) -> Result<TeamStatLine> {
        Ok(self.db.team(team_id)?.statline(era))
    }

    pub fn full_roster(&self, team_id: TeamId) -> Result<Vec<PlayerId>> {
        Ok(self.db.team(team_id)?.full_roster())
    }

    // Rank a group of teams by regular season points, then goal difference.
    fn rank_by_points<'a>(teams: &[&'a Team]) -> Vec<&'a Team> {
        ranking::rank_teams(teams, &STANDINGS_CRITERIA, Era::Season)
    }

    // The whole league, best first.
    pub fn standings(&self) -> Result<Vec<TeamId>> {
        let teams: Vec<&Team> = self.alignment.iter()
            .map(|id| self.db.team(*id))
            .collect::<Result<_>>()?;

        Ok(Self::rank_by_points(&teams).iter().map(|team| team.id).collect())
    }

    // The players with the most of a stat in an era, best first.
    pub fn leaders(&self, era: Era, stat: PlayerStat, n: usize) -> Vec<(PlayerId, StatValue)> {
        ranking::get_leaders(&self.db.players, era, stat, n)
    }
}

// Packages for a presentation layer.
impl League {
    // Division tables of both conferences.
    pub fn standings_package(&self) -> Result<serde_json::Value> {
        let mut conferences = Vec::new();
        for (conference, conference_name) in CONFERENCE_NAMES.iter().enumerate() {
            let mut divisions = Vec::new();
            for (division, division_name) in self.get_conference_divisions(conference)?.iter().zip(DIVISION_NAMES) {
                let teams: Vec<serde_json::Value> = Self::rank_by_points(division).iter().enumerate()
                    .map(|(i, team)| json!({
                        "rank": (i + 1).to_ordinal_string(),
                        "id": team.id,
                        "name": team.name,
                        "stats": team.statline(Era::Season),
                    }))
                    .collect();

                divisions.push(json!({
                    "name": division_name,
                    "teams": teams,
                }));
            }

            conferences.push(json!({
                "name": conference_name,
                "divisions": divisions,
            }));
        }

        Ok(json!({
            "date": self.date,
            "conferences": conferences,
            "playoffs": self.playoffs.as_ref().map(|bracket| bracket.get_comp_screen_json(&self.db.teams)),
        }))
    }

    pub fn team_screen_package(&self, team_id: TeamId, era: Era) -> Result<serde_json::Value> {
        Ok(self.db.team(team_id)?.get_team_screen_package(&self.db.players, era))
    }

    pub fn leaders_package(&self, era: Era, stat: PlayerStat, n: usize) -> Result<serde_json::Value> {
        let mut leaders = Vec::new();
        for (i, (player_id, value)) in self.leaders(era, stat, n).into_iter().enumerate() {
            let player: &Player = self.db.player(player_id)?;
            let team = match player.team_id {
                Some(id) => Some(self.db.team(id)?.name.clone()),
                None => None,
            };

            leaders.push(json!({
                "rank": (i + 1).to_ordinal_string(),
                "id": player_id,
                "name": player.name(),
                "position": player.position_id.abbreviation(),
                "team": team,
                "value": value,
            }));
        }

        Ok(json!({
            "era": era.name(),
            "stat": stat,
            "leaders": leaders,
        }))
    }
}

// Functional.
impl League {
    // Get the game in the current calendar slot, if there is one.
    pub fn get_next_game(&self) -> Option<(Matchup, GameType)> {
        match self.date.get_phase() {
            Phase::RegularSeason => self.season
                .get_game(self.date.day as usize, self.date.game as usize)
                .map(|matchup| (matchup, GameType::Season)),
            Phase::Playoffs(_) => {
                let playoff_day = self.date.get_playoff_day()?;
                self.playoffs.as_ref()?
                    .get_game(playoff_day, self.date.game as usize)
                    .map(|matchup| (matchup, GameType::Playoff))
            },
        }
    }

    // Play the game in the current calendar slot and move on to the next slot.
    // A slot emptied by a decided series plays nothing and returns None.
    // A failed calendar transition halts the league, and every later call returns the same error.
    pub fn play_next_game(&mut self) -> Result<Option<GameSummary>> {
        if let Some(e) = &self.halted {
            return Err(e.clone());
        }

        let summary = match self.get_next_game() {
            Some(([home, away], game_type)) => {
                let mut game = Game::build(home, away, game_type);
                Some(game.play(&mut self.db, self.shot_model.as_ref(), &mut self.rng)?)
            },
            None => None,
        };

        for event in self.date.advance() {
            if let Err(e) = self.handle_event(event) {
                error!("league halted at {}: {e}", self.date);
                self.halted = Some(e.clone());
                return Err(e);
            }
        }

        Ok(summary)
    }

    // Play every slot before the given date. Return the amount of games played.
    pub fn simulate_to_date(&mut self, target: LeagueDate) -> Result<usize> {
        let mut games = 0;
        while self.date < target {
            if self.play_next_game()?.is_some() {
                games += 1;
            }
        }

        return Ok(games);
    }

    fn handle_event(&mut self, event: CalendarEvent) -> Result<()> {
        match event {
            CalendarEvent::StartPlayoffs => self.start_playoffs(),
            CalendarEvent::UpdatePlayoffs(playoff_day) => {
                let bracket = self.playoffs.as_mut().ok_or_else(Self::no_bracket)?;
                for [winner, loser] in bracket.update(&self.db.teams, playoff_day)? {
                    debug!("series decided on playoff day {playoff_day}: {winner} beat {loser}");
                }
                Ok(())
            },
            CalendarEvent::StartRound(round) => {
                self.playoffs.as_mut().ok_or_else(Self::no_bracket)?.advance_round()?;
                info!("year {}: playoff round {round} starts", self.season.year);
                Ok(())
            },
            CalendarEvent::EndYear => self.end_year(),
        }
    }

    fn no_bracket() -> LeagueError {
        LeagueError::BracketInconsistent("the playoffs have not started".to_string())
    }

    // Seed both conferences by the regular season and build the bracket.
    fn start_playoffs(&mut self) -> Result<()> {
        let american = ranking::get_playoff_seeds(&self.get_conference_divisions(0)?);
        let national = ranking::get_playoff_seeds(&self.get_conference_divisions(1)?);

        self.playoffs = Some(PlayoffBracket::build(american, national)?);
        info!("year {}: the regular season is over, playoffs start", self.season.year);
        Ok(())
    }

    // Crown the champion and get everyone ready for the next year.
    fn end_year(&mut self) -> Result<()> {
        let year = self.season.year;
        let champion = self.playoffs.as_ref()
            .and_then(PlayoffBracket::get_champion)
            .ok_or_else(|| LeagueError::BracketInconsistent(format!("year {year} ended without a champion")))?;

        info!("year {year}: {} are the champions", self.db.team(champion)?.name);
        self.champions.push((year, champion));

        for player in self.db.players.iter_mut() {
            player.age_year(&mut self.rng);
        }
        for team in self.db.teams.iter_mut() {
            team.end_year(&self.db.players);
        }

        self.playoffs = None;
        self.season = Season::build(self.date.year, &self.alignment, &mut self.rng)?;
        info!("year {} starts", self.date.year);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::names::NamePool;
    use super::*;

    fn league(seed: u64) -> League {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut supply = NamePool::default_pool(&mut rng);
        League::create_random_league(&mut supply, seed).unwrap()
    }

    #[test]
    fn random_league_is_full() {
        let league = league(1);
        assert_eq!(league.db.teams.len(), 32);
        assert_eq!(league.db.players.len(), 32 * 20);
        assert_eq!(league.get_season().get_days(), 80);
        assert_eq!(league.get_date(), LeagueDate::build(0, 0, 0));
    }

    #[test]
    fn wrong_alignment_is_refused() {
        let league = league(2);
        let db = league.db.clone();

        let short: Vec<TeamId> = (0..31).collect();
        assert!(matches!(League::build(db.clone(), short, 0), Err(LeagueError::WrongTeamCount { required: 32, found: 31 })));

        let mut doubled: Vec<TeamId> = (0..32).collect();
        doubled[31] = 0;
        assert!(matches!(League::build(db, doubled, 0), Err(LeagueError::InvalidAttribute(_))));
    }

    #[test]
    fn first_game_comes_from_the_season_schedule() {
        let mut league = league(3);
        let (matchup, game_type) = league.get_next_game().unwrap();
        assert_eq!(game_type, GameType::Season);
        assert_eq!(Some(matchup), league.get_season().get_game(0, 0));

        let summary = league.play_next_game().unwrap().unwrap();
        assert_eq!([summary.home_id, summary.away_id], matchup);
        assert_eq!(league.get_date(), LeagueDate::build(0, 0, 1));

        let played: StatValue = matchup.iter()
            .map(|id| {
                let line = league.team_statline(*id, Era::Season).unwrap();
                line.wins + line.losses + line.ties
            })
            .sum();
        assert_eq!(played, 2);
    }

    #[test]
    fn season_end_builds_the_bracket() {
        let mut league = league(4);
        let games = league.simulate_to_date(LeagueDate::build(0, 80, 0)).unwrap();
        assert_eq!(games, 80 * 16);

        let bracket = league.get_playoffs().unwrap();
        assert_eq!(bracket.get_round(), 1);
        assert_eq!(bracket.get_pairs().len(), 8);

        // The top seed of each conference won its division.
        for conference in 0..2 {
            let top = bracket.get_remaining(conference)[0];
            assert!(league.alignment[conference * 16..(conference + 1) * 16].contains(&top));
        }

        let (_, game_type) = league.get_next_game().unwrap();
        assert_eq!(game_type, GameType::Playoff);
    }

    #[test]
    fn standings_follow_points() {
        let mut league = league(5);
        league.simulate_to_date(LeagueDate::build(0, 10, 0)).unwrap();

        let points: Vec<StatValue> = league.standings().unwrap().iter()
            .map(|id| league.team_statline(*id, Era::Season).unwrap().points)
            .collect();
        assert_eq!(points.len(), 32);
        assert!(points.windows(2).all(|pair| pair[0] >= pair[1]));

        let package = league.standings_package().unwrap();
        assert_eq!(package["conferences"][1]["name"], "National");
        assert_eq!(package["conferences"][0]["divisions"][3]["name"], "West");
        assert_eq!(package["conferences"][0]["divisions"][0]["teams"][0]["rank"], "1st");
        assert!(package["playoffs"].is_null());
    }

    #[test]
    fn leaders_package_names_the_players() {
        let mut league = league(6);
        league.simulate_to_date(LeagueDate::build(0, 2, 0)).unwrap();

        let leaders = league.leaders(Era::Season, PlayerStat::Minutes, 5);
        assert_eq!(leaders.len(), 5);
        assert!(leaders[0].1 >= leaders[4].1);

        let package = league.leaders_package(Era::Season, PlayerStat::Minutes, 5).unwrap();
        assert_eq!(package["era"], "season");
        assert_eq!(package["leaders"][1]["rank"], "2nd");
        assert_eq!(package["leaders"][0]["id"], leaders[0].0);
        assert!(package["leaders"][0]["team"].is_string());
    }

    struct Never;

    impl ShotModel for Never {
        fn goal_probability(&self, _: f64, _: f64) -> f64 {
            0.0
        }
    }

    #[test]
    fn undecided_round_halts_the_league() {
        let mut league = league(8);
        league.date = LeagueDate::build(0, 79, 15);
        league.play_next_game().unwrap();
        assert!(league.get_playoffs().is_some());

        // Nobody can win a game, so no series is over when the round ends.
        league.set_shot_model(Box::new(Never));
        league.date = LeagueDate::build(0, 86, 6);
        let summary = league.play_next_game().unwrap().unwrap();
        assert_eq!(summary.get_winner(), None);

        let failure = league.play_next_game();
        assert!(matches!(failure, Err(LeagueError::BracketInconsistent(_))));
        assert!(league.is_halted());
        let date = league.get_date();

        assert_eq!(league.play_next_game().map(|_| ()), failure.clone().map(|_| ()));
        assert_eq!(league.simulate_to_date(LeagueDate::build(2, 0, 0)), Err(failure.unwrap_err()));
        assert_eq!(league.get_date(), date);
        assert_eq!(league.get_season().year, 0);
        assert!(league.get_champions().is_empty());
    }

    #[test]
    fn unknown_entities_are_reported() {
        let league = league(7);
        assert_eq!(league.player_stat(9999, Era::Career, PlayerStat::Goals), Err(LeagueError::UnknownPlayer(9999)));
        assert_eq!(league.full_roster(200), Err(LeagueError::UnknownTeam(200)));
        assert!(league.get_division(8).is_err());
        assert_eq!(league.full_roster(0).unwrap().len(), 20);
    }
}
