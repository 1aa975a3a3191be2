use clap::Parser;
use log::info;
use ordinal::ToOrdinal as _;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use ice_hockey_league_lib::{
    names::NamePool,
    stats::{Era, PlayerStat},
    time::{LeagueDate, SEASON_DAYS},
    League, Result
};

#[derive(Debug, Parser)]
#[command(name = "ice-hockey-league", about = "Simulate seasons of a 32-team ice hockey league")]
struct Args {
    #[arg(long, default_value_t = 0, help = "Seed for every random draw of the run")]
    seed: u64,

    #[arg(long, default_value_t = 1, help = "How many full years to simulate")]
    seasons: u16,

    #[arg(long, default_value_t = 10, help = "How many scoring leaders to show each year")]
    leaders: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut rng = ChaCha20Rng::seed_from_u64(args.seed);
    let mut supply = NamePool::default_pool(&mut rng);
    let mut league = League::create_random_league(&mut supply, args.seed)?;

    for _ in 0..args.seasons {
        let year = league.get_date().year;
        info!("simulating year {year}");

        league.simulate_to_date(LeagueDate::build(year, SEASON_DAYS, 0))?;
        print_standings(&league, year)?;
        print_leaders(&league, args.leaders)?;

        league.simulate_to_date(LeagueDate::build(year + 1, 0, 0))?;
        if let Some((_, champion)) = league.get_champions().last() {
            println!("Champion of year {year}: {}\n", league.db.team(*champion)?.name);
        }
    }

    Ok(())
}

fn print_standings(league: &League, year: u16) -> Result<()> {
    println!("Regular season standings, year {year}");
    for (i, team_id) in league.standings()?.into_iter().enumerate() {
        let team = league.db.team(team_id)?;
        let line = team.statline(Era::Season);
        println!(
            "{:>5} {:<16} {:>3} {:>3} {:>3} {:>4} {:>4}-{:<4}",
            (i + 1).to_ordinal_string(), team.name, line.wins, line.losses, line.ties, line.points,
            line.goals_for, line.goals_against
        );
    }
    println!();
    Ok(())
}

fn print_leaders(league: &League, n: usize) -> Result<()> {
    for stat in [PlayerStat::Goals, PlayerStat::Assists] {
        println!("{stat:?} leaders");
        for (player_id, value) in league.leaders(Era::Season, stat, n) {
            let player = league.db.player(player_id)?;
            println!("{:>4} {:<24} {}", value, player.name(), player.position_id.abbreviation());
        }
        println!();
    }
    Ok(())
}
