//! CLI frontend for the Chutes and Ladders simulator.

mod commands;

use std::process;

use clap::{Parser, Subcommand};

use cnl_stats::DEFAULT_HISTOGRAM_MAX;
use commands::RunOptions;

#[derive(Parser)]
#[command(
    name = "cnl",
    about = "Monte-Carlo reports for single-player Chutes and Ladders",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    options: RunOptions,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the chutes and ladders of the board
    Board,

    /// Simulate games and summarize how many turns they take
    Turns {
        /// Highest turn count with its own histogram bucket
        #[arg(
            long,
            default_value_t = DEFAULT_HISTOGRAM_MAX,
            value_parser = clap::value_parser!(u32).range(1..=100_000)
        )]
        max_turns: u32,
    },

    /// Run several batches and compare their statistics
    Sets {
        /// Number of batches (each of --games games)
        #[arg(long, default_value = "100")]
        sets: usize,
    },

    /// Mean game length by how often one link was taken
    Link {
        /// Start square of the link (default: the longest chute)
        square: Option<u8>,
    },

    /// Average uses per game of every chute and ladder
    Compare,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.options.verbose);

    let options = &cli.options;
    let result = match cli.command {
        Commands::Board => commands::board::run(options),
        Commands::Turns { max_turns } => commands::turns::run(options, max_turns),
        Commands::Sets { sets } => commands::sets::run(options, sets),
        Commands::Link { square } => commands::link::run(options, square),
        Commands::Compare => commands::compare::run(options),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise warnings, or debug output with `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}
