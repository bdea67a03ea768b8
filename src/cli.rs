use clap::Parser;
use colored::Colorize;

use crate::display::{print_error, print_report};
use crate::error::OddsResult;
use crate::input::Scenario;
use crate::simulation::{calculate_odds, default_workers, SimulationConfig, DEFAULT_SIMULATIONS};

#[derive(Parser)]
#[command(
    name = "holdem",
    version = "1.0.0",
    about = "Texas Hold'em odds: win/tie/lose and hand-type probabilities for every player."
)]
struct Cli {
    /// Hole cards, two per player (e.g. As Ts Kd Kc). Use ? ? for an unknown hand.
    #[arg(required = true, num_args = 1..)]
    cards: Vec<String>,

    /// Board cards: flop, turn or river (e.g. "Js 3c Qs")
    #[arg(short, long)]
    board: Option<String>,

    /// Random boards per run (or per unknown-hand candidate) when no board is given
    #[arg(short = 'n', long, default_value_t = DEFAULT_SIMULATIONS)]
    sims: usize,

    /// Worker threads
    #[arg(short, long, env = "HOLDEM_WORKERS", default_value_t = default_workers())]
    workers: usize,

    /// Seed for reproducible random boards
    #[arg(long)]
    seed: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

pub fn run() {
    let cli = Cli::parse();
    if let Err(e) = dispatch(cli) {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

pub fn run_with_args(args: Vec<String>) -> OddsResult<()> {
    dispatch(Cli::parse_from(args))
}

fn dispatch(cli: Cli) -> OddsResult<()> {
    let board_tokens: Vec<String> = cli.board.into_iter().collect();
    let scenario = Scenario::parse(&cli.cards, &board_tokens)?;

    let mut config = SimulationConfig::new(cli.sims, cli.workers);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    if !cli.json {
        let hands: Vec<String> = scenario.hands.iter().map(|h| h.to_string()).collect();
        println!();
        println!(
            "  {} on {} workers...",
            hands.join(" vs ").bold(),
            config.workers.to_string().bold()
        );
    }

    let report = calculate_odds(&scenario.hands, &scenario.board, &config)?;
    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        print_report(&report);
    }
    Ok(())
}
