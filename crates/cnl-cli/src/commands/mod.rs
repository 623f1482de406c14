pub mod board;
pub mod compare;
pub mod link;
pub mod sets;
pub mod turns;

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use serde::Serialize;

use cnl_core::{BatchRunner, Board, ChuteVariant, SimConfig};

/// Options shared by every report.
#[derive(Args, Debug)]
pub struct RunOptions {
    /// Number of games to simulate
    #[arg(short = 'n', long, default_value = "10000", global = true)]
    pub games: usize,

    /// RNG seed for a reproducible run (default: random, reported)
    #[arg(short, long, global = true)]
    pub seed: Option<u64>,

    /// Start square of the chute ending on 26: 47 or 48
    #[arg(long, default_value = "47", global = true)]
    pub variant: u8,

    /// Spread games across all cores
    #[arg(long, global = true)]
    pub parallel: bool,

    /// Give up after this many seconds
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<f64>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Write the report to a file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl RunOptions {
    fn variant(&self) -> Result<ChuteVariant, String> {
        ChuteVariant::from_start(self.variant).ok_or_else(|| {
            format!(
                "unsupported variant: {}. Use: 47, 48",
                self.variant
            )
        })
    }

    /// The standard board for the selected variant.
    pub fn board(&self) -> Result<Board, String> {
        Ok(Board::standard_variant(self.variant()?))
    }

    /// Simulation settings from the command line.
    pub fn config(&self) -> Result<SimConfig, String> {
        let mut config = SimConfig::default()
            .with_variant(self.variant()?)
            .with_parallel(self.parallel);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(secs) = self.timeout {
            let timeout = Duration::try_from_secs_f64(secs)
                .map_err(|_| format!("invalid timeout: {secs}"))?;
            config = config.with_timeout(timeout);
        }
        Ok(config)
    }

    /// A batch runner on the selected board.
    pub fn runner(&self) -> Result<BatchRunner, String> {
        BatchRunner::new(self.config()?).map_err(|e| e.to_string())
    }
}

/// Print or save a report, as JSON or as rendered text.
fn emit<T: Serialize>(
    options: &RunOptions,
    report: &T,
    render: impl FnOnce() -> String,
) -> Result<(), String> {
    if options.output.is_some() {
        colored::control::set_override(false);
    }

    let content = if options.json {
        let mut json = serde_json::to_string_pretty(report)
            .map_err(|e| format!("JSON serialization error: {e}"))?;
        json.push('\n');
        json
    } else {
        render()
    };

    if let Some(path) = &options.output {
        std::fs::write(path, &content)
            .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
        println!("  Exported to {}", path.display());
    } else {
        print!("{content}");
    }

    Ok(())
}

/// Format a float with two decimals.
fn fixed(value: f64) -> String {
    format!("{value:.2}")
}
