use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;

use cnl_stats::{StatsError, TurnHistogram, TurnSummary, turn_histogram};

use super::{RunOptions, fixed};

/// Width of the longest histogram bar.
const BAR_WIDTH: u64 = 50;

#[derive(Serialize)]
struct TurnsReport {
    seed: u64,
    games: usize,
    anomalies: usize,
    summary: TurnSummary,
    histogram: TurnHistogram,
}

pub fn run(options: &RunOptions, max_turns: u32) -> Result<(), String> {
    let runner = options.runner()?;
    let counts = runner
        .run_turn_counts(options.games)
        .map_err(|e| e.to_string())?;
    if counts.turns.is_empty() {
        return Err(StatsError::NoCompletedGames {
            anomalies: counts.anomalies,
        }
        .to_string());
    }

    let report = TurnsReport {
        seed: counts.seed,
        games: options.games,
        anomalies: counts.anomalies,
        summary: TurnSummary::from_turns(&counts.turns).map_err(|e| e.to_string())?,
        histogram: turn_histogram(&counts.turns, max_turns).map_err(|e| e.to_string())?,
    };

    super::emit(options, &report, || render(&report))
}

fn render(report: &TurnsReport) -> String {
    let s = &report.summary;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Statistic", "Turns"]);
    table.add_row(vec!["Mean".to_string(), fixed(s.mean)]);
    table.add_row(vec!["Median".to_string(), fixed(s.median)]);
    table.add_row(vec!["Mode".to_string(), s.mode.to_string()]);
    table.add_row(vec!["Std. deviation".to_string(), fixed(s.std_dev)]);
    table.add_row(vec!["Shortest".to_string(), s.min.to_string()]);
    table.add_row(vec!["Longest".to_string(), s.max.to_string()]);

    let mut out = String::new();
    out.push_str(&format!(
        "  {} {}\n",
        "Turns to finish".bold(),
        format!("({} games, seed={})", report.games, report.seed).dimmed()
    ));
    if report.anomalies > 0 {
        out.push_str(&format!(
            "  {} {} games hit the turn cap and were left out\n",
            "WARN".yellow().bold(),
            report.anomalies
        ));
    }
    out.push('\n');
    out.push_str(&format!("{table}\n\n"));

    out.push_str(&format!("  {}\n\n", "Distribution".bold().underline()));
    let h = &report.histogram;
    let peak = h.counts.iter().copied().max().unwrap_or(0).max(h.overflow).max(1);
    for (turns, games) in h.occupied() {
        let bar = "#".repeat((games * BAR_WIDTH).div_ceil(peak) as usize);
        out.push_str(&format!("  {turns:>4} {games:>7} {bar}\n"));
    }
    if h.overflow > 0 {
        out.push_str(&format!(
            "  {:>4} {:>7} {}\n",
            format!(">{}", h.max_turns),
            h.overflow,
            "(longer games)".dimmed()
        ));
    }
    out
}
