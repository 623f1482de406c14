use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;

use cnl_core::LinkKind;
use cnl_stats::{AggregateStats, LinkFrequency, link_frequencies};

use super::{RunOptions, fixed};

#[derive(Serialize)]
struct CompareReport {
    seed: u64,
    stats: AggregateStats,
    links: Vec<LinkFrequency>,
}

pub fn run(options: &RunOptions) -> Result<(), String> {
    let runner = options.runner()?;
    let batch = runner.run(options.games).map_err(|e| e.to_string())?;

    let report = CompareReport {
        seed: batch.seed(),
        stats: AggregateStats::from_records(batch.records()).map_err(|e| e.to_string())?,
        links: link_frequencies(batch.records(), runner.board()).map_err(|e| e.to_string())?,
    };

    super::emit(options, &report, || {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["From", "To", "Kind", "Total", "Per game"]);
        for link in &report.links {
            table.add_row(vec![
                link.from.to_string(),
                link.to.to_string(),
                link.kind.to_string(),
                link.total.to_string(),
                fixed(link.per_game),
            ]);
        }

        let mut out = String::new();
        out.push_str(&format!(
            "  {} {}\n",
            "Link usage".bold(),
            format!("({} games, seed={})", report.stats.games, report.seed).dimmed()
        ));
        out.push_str(&format!(
            "  Mean game length: {} turns\n",
            fixed(report.stats.turns.mean)
        ));
        let ladders = per_game(&report.links, LinkKind::Ladder);
        let chutes = per_game(&report.links, LinkKind::Chute);
        out.push_str(&format!(
            "  Per game: {} ladders, {} chutes\n",
            fixed(ladders).green(),
            fixed(chutes).red()
        ));
        if report.stats.anomalies > 0 {
            out.push_str(&format!(
                "  {} {} games hit the turn cap and were left out\n",
                "WARN".yellow().bold(),
                report.stats.anomalies
            ));
        }
        out.push('\n');
        out.push_str(&format!("{table}\n"));
        out
    })
}

/// Average links of one kind taken per game.
fn per_game(links: &[LinkFrequency], kind: LinkKind) -> f64 {
    links
        .iter()
        .filter(|l| l.kind == kind)
        .map(|l| l.per_game)
        .sum()
}
