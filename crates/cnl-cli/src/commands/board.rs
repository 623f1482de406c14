use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;

use cnl_core::{Link, LinkKind};

use super::RunOptions;

#[derive(Serialize)]
struct LinkRow {
    #[serde(flatten)]
    link: Link,
    kind: LinkKind,
    delta: i16,
}

#[derive(Serialize)]
struct BoardReport {
    variant: u8,
    final_position: u8,
    links: Vec<LinkRow>,
}

pub fn run(options: &RunOptions) -> Result<(), String> {
    let board = options.board()?;

    let report = BoardReport {
        variant: options.variant,
        final_position: board.final_position(),
        links: board
            .links()
            .map(|link| LinkRow {
                link,
                kind: link.kind(),
                delta: link.delta(),
            })
            .collect(),
    };

    super::emit(options, &report, || {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["From", "To", "Kind", "Squares"]);
        for row in &report.links {
            table.add_row(vec![
                row.link.from.to_string(),
                row.link.to.to_string(),
                row.kind.to_string(),
                format!("{:+}", row.delta),
            ]);
        }

        let ladders = report
            .links
            .iter()
            .filter(|r| r.kind == LinkKind::Ladder)
            .count();
        let chutes = report.links.len() - ladders;

        let mut out = String::new();
        out.push_str(&format!(
            "  {} {}\n\n",
            "Board".bold(),
            format!(
                "(variant {}, final square {})",
                report.variant, report.final_position
            )
            .dimmed()
        ));
        out.push_str(&format!("{table}\n\n"));
        out.push_str(&format!("  {ladders} ladders, {chutes} chutes\n"));
        if let Some(longest) = board.longest_chute() {
            out.push_str(&format!(
                "  Longest chute: {} -> {} ({} squares)\n",
                longest.from,
                longest.to,
                -longest.delta()
            ));
        }
        out
    })
}
