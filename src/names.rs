// Names for generated players and teams.
use std::collections::HashSet;

use lazy_static::lazy_static;
use rand::{seq::{IndexedRandom, SliceRandom}, Rng, RngCore};

use crate::error::{LeagueError, Result};

lazy_static! {
    static ref TEAM_NAMES: Vec<&'static str> = vec![
        "Ruiske", "Atomi", "Uupuneet", "SantaClaus", "HardCore", "Ikirouta",
        "Kelarotat", "Vety", "Saappaat", "Siat", "Turmio", "Sirkus", "Polkka",
        "Teurastus", "Lumivyöry", "Pakkanen", "Revontulet", "Karhut", "Ahmat",
        "Hirvet", "Kotkat", "Sudet", "Ilvekset", "Haukat", "Myrsky", "Ukkonen",
        "Jäänmurtajat", "Tervaskannot", "Kiekkoveljet", "Routa", "Tykit",
        "Saunojat", "Metsot", "Kuikat", "Pöllöt", "Majavat", "Norpat", "Kontiot",
        "Salamat", "Tähdet",
    ];

    static ref PLAYER_NAMES: Vec<&'static str> = vec![
        "Aho", "Anton", "Eero", "Erkki", "Heikki", "Hakala", "Ilkka", "Jari",
        "Jokinen", "Kalle", "Kari", "Korpela", "Lauri", "Laine", "Lehto",
        "Markku", "Mikko", "Niemi", "Nieminen", "Olli", "Pekka", "Peltonen",
        "Raimo", "Rantanen", "Saku", "Salo", "Seppo", "Teemu", "Toivonen",
        "Tuomas", "Urho", "Vesa", "Virtanen", "Ville", "Väinö", "Aki", "Hannu",
        "Mäkelä", "Koivu", "Selänne",
    ];
}

// Where generated entities get their names from.
pub trait NameSupply {
    fn player_name(&mut self, rng: &mut dyn RngCore) -> Result<String>;
    fn team_name(&mut self) -> Result<String>;
}

// Names kept in memory. Player names are two random words from the same list,
// team names are used up one by one.
#[derive(Debug)]
#[derive(Default, Clone, PartialEq)]
pub struct NamePool {
    player_names: Vec<String>,
    team_names: Vec<String>,
}

// Basics.
impl NamePool {
    pub fn build<R: Rng + ?Sized>(player_names: Vec<String>, mut team_names: Vec<String>, rng: &mut R) -> Self {
        team_names.shuffle(rng);
        Self {
            player_names: player_names,
            team_names: team_names,
        }
    }

    // Build a pool from text with one name per line. Blank lines are ignored.
    pub fn from_text<R: Rng + ?Sized>(player_names: &str, team_names: &str, rng: &mut R) -> Self {
        Self::build(Self::lines(player_names), Self::lines(team_names), rng)
    }

    // The names that ship with the program.
    pub fn default_pool<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::build(
            PLAYER_NAMES.iter().map(|name| name.to_string()).collect(),
            TEAM_NAMES.iter().map(|name| name.to_string()).collect(),
            rng,
        )
    }

    fn lines(text: &str) -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn team_names_left(&self) -> usize {
        self.team_names.len()
    }
}

impl NameSupply for NamePool {
    fn player_name(&mut self, rng: &mut dyn RngCore) -> Result<String> {
        let forename = self.player_names.choose(rng).ok_or(LeagueError::NoNamesRemaining)?;
        let surname = self.player_names.choose(rng).ok_or(LeagueError::NoNamesRemaining)?;
        Ok(format!("{forename} {surname}"))
    }

    fn team_name(&mut self) -> Result<String> {
        self.team_names.pop().ok_or(LeagueError::NoNamesRemaining)
    }
}

// Names in use in a league.
#[derive(Debug)]
#[derive(Default, Clone, PartialEq)]
pub struct NameRegistry {
    players: HashSet<String>,
    teams: HashSet<String>,
}

impl NameRegistry {
    // Reserve a player name. A taken name gets " Jr" appended until it is free.
    pub fn claim_player_name(&mut self, name: &str) -> String {
        let mut name = name.to_string();
        while self.players.contains(&name) {
            name.push_str(" Jr");
        }

        self.players.insert(name.clone());
        return name;
    }

    // Reserve a team name. Two teams cannot share one.
    pub fn claim_team_name(&mut self, name: &str) -> Result<String> {
        if !self.teams.insert(name.to_string()) {
            return Err(LeagueError::DuplicateTeamName(name.to_string()));
        }
        Ok(name.to_string())
    }
}
