use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use cnl_stats::{SetStudy, StatSeries};

use super::{RunOptions, fixed};

pub fn run(options: &RunOptions, sets: usize) -> Result<(), String> {
    let runner = options.runner()?;
    let study = SetStudy::run(&runner, sets, options.games).map_err(|e| e.to_string())?;

    super::emit(options, &study, || {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Statistic", "Min", "Q1", "Median", "Q3", "Max"]);
        let rows: [(&str, &StatSeries); 4] = [
            ("Mean", &study.mean),
            ("Median", &study.median),
            ("Mode", &study.mode),
            ("Std. deviation", &study.std_dev),
        ];
        for (name, series) in rows {
            let b = series.summary;
            table.add_row(vec![
                name.to_string(),
                fixed(b.min),
                fixed(b.q1),
                fixed(b.median),
                fixed(b.q3),
                fixed(b.max),
            ]);
        }

        let mut out = String::new();
        out.push_str(&format!(
            "  {} {}\n\n",
            format!("{} sets of {} games", study.sets, study.games_per_set).bold(),
            format!("(base seed={})", study.base_seed).dimmed()
        ));
        out.push_str(&format!("{table}\n"));
        if study.anomalies > 0 {
            out.push_str(&format!(
                "\n  {} {} games hit the turn cap and were left out\n",
                "WARN".yellow().bold(),
                study.anomalies
            ));
        }
        out
    })
}
