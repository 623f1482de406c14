use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;

use cnl_core::{Link, LinkKind};
use cnl_stats::{ConditionalTurns, average_traversals_per_game, conditional_mean_turns};

use super::{RunOptions, fixed};

#[derive(Serialize)]
struct LinkReport {
    seed: u64,
    #[serde(flatten)]
    link: Link,
    kind: LinkKind,
    games: usize,
    anomalies: usize,
    per_game: f64,
    by_traversals: Vec<ConditionalTurns>,
}

pub fn run(options: &RunOptions, square: Option<u8>) -> Result<(), String> {
    let board = options.board()?;
    let link = match square {
        Some(from) => board
            .link_destination(from)
            .map(|to| Link { from, to })
            .ok_or_else(|| format!("no chute or ladder starts on square {from}"))?,
        None => board
            .longest_chute()
            .ok_or("the board has no chutes")?,
    };

    let batch = options
        .runner()?
        .run(options.games)
        .map_err(|e| e.to_string())?;
    let records = batch.records();

    let report = LinkReport {
        seed: batch.seed(),
        link,
        kind: link.kind(),
        games: batch.len(),
        anomalies: batch.anomalies(),
        per_game: average_traversals_per_game(records, link.from).map_err(|e| e.to_string())?,
        by_traversals: conditional_mean_turns(records, link.from).map_err(|e| e.to_string())?,
    };

    super::emit(options, &report, || {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Times taken", "Games", "Mean turns"]);
        for row in &report.by_traversals {
            table.add_row(vec![
                row.traversals.to_string(),
                row.games.to_string(),
                row.mean_turns.map_or_else(|| "no data".to_string(), fixed),
            ]);
        }

        let mut out = String::new();
        out.push_str(&format!(
            "  {} {}\n",
            format!("{} {} -> {}", report.kind, link.from, link.to).bold(),
            format!("({} games, seed={})", report.games, report.seed).dimmed()
        ));
        out.push_str(&format!(
            "  Taken {} times per game on average\n\n",
            fixed(report.per_game)
        ));
        out.push_str(&format!("{table}\n"));
        out
    })
}
