use std::collections::HashMap;
use std::path::PathBuf;

use clap::Parser;
use dealer::{format_standings, play_game, Recorder, Table};
use nines::{HeuristicPolicy, InteractivePolicy, Policy};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Names of the players, in seating order
    #[clap(num_args(2..), value_delimiter = ' ')]
    players: Vec<String>,

    /// Play this seat yourself on the terminal, all others use the
    /// built-in strategy
    #[arg(short, long)]
    interactive: Option<String>,

    /// How many games to play
    #[arg(short, long, default_value_t = 1)]
    num_games: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Record the game's events as JSON files into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn seat_policies(args: &Args) -> Vec<(String, Box<dyn Policy>)> {
    args.players
        .iter()
        .map(|name| {
            let policy: Box<dyn Policy> = if args.interactive.as_deref() == Some(name.as_str()) {
                Box::new(InteractivePolicy::stdio())
            } else {
                Box::new(HeuristicPolicy::new())
            };
            (name.clone(), policy)
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    anyhow::ensure!(args.players.len() >= 2, "a game needs at least two players");
    if let Some(name) = &args.interactive {
        anyhow::ensure!(
            args.players.contains(name),
            "interactive player '{}' is not at the table",
            name
        );
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut recorder = if let Some(dir_path) = &args.record_games_to_directory {
        Some(Recorder::new(dir_path.clone())?)
    } else {
        None
    };

    let mut wins: HashMap<String, usize> = HashMap::new();
    for game_idx in 0..args.num_games {
        let mut table = Table::deal(seat_policies(&args), &mut rng)?;
        let standings = play_game(&mut table, &mut recorder)?;
        print!("{}", format_standings(&standings));
        if let Some(winner) = standings.winner() {
            debug!(winner = %winner.name, game_idx);
            *wins.entry(winner.name.clone()).or_default() += 1;
        }
    }

    if args.num_games > 1 {
        eprintln!("End result:");
        for name in &args.players {
            eprintln!("- {} wins by {}", wins.get(name).copied().unwrap_or(0), name);
        }
    }

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
