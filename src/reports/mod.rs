use cipherforge::optimizer::runner::TrialSummary;
use cipherforge::optimizer::SearchOutcome;
use cipherforge::scorer::NgramTable;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, columns: std::ops::Range<usize>) {
    for i in columns {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

pub fn print_outcome(outcome: &SearchOutcome) {
    let best = &outcome.best;
    let mut table = new_table();

    table.add_row(vec![
        Cell::new("Key").add_attribute(Attribute::Bold),
        Cell::new(best.key.to_string()).fg(Color::Cyan),
    ]);
    table.add_row(vec![
        Cell::new("Score"),
        Cell::new(format!("{:.2}", best.score)).fg(Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Found at"),
        Cell::new(format!("{} / {}", best.iteration_found, outcome.iterations)),
    ]);
    table.add_row(vec![
        Cell::new("Acceptance"),
        Cell::new(format!("{:.1}%", outcome.acceptance_rate() * 100.0)),
    ]);
    table.add_row(vec![
        Cell::new("Stopped"),
        Cell::new(format!(
            "{} (T = {:.4})",
            outcome.termination, outcome.final_temperature
        )),
    ]);
    table.add_row(vec![Cell::new("Chain"), Cell::new(outcome.chain)]);

    if let Some(acc) = best.accuracy {
        let color = if acc >= 0.9 { Color::Green } else { Color::Red };
        table.add_row(vec![
            Cell::new("Accuracy").add_attribute(Attribute::Bold),
            Cell::new(format!("{:.1}%", acc * 100.0)).fg(color),
        ]);
    }
    if outcome.insufficient_signal {
        table.add_row(vec![
            Cell::new("Warning").fg(Color::Yellow),
            Cell::new("ciphertext too short for the n-gram order; result is unreliable")
                .fg(Color::Yellow),
        ]);
    }

    println!("\n=== 🏆 BEST DECRYPTION ===");
    println!("{}", table);
}

pub fn print_trial_summaries(summaries: &[TrialSummary]) {
    let mut table = new_table();

    table.add_row(vec![
        Cell::new("n").add_attribute(Attribute::Bold),
        Cell::new("Length"),
        Cell::new("Runs"),
        Cell::new("Perfect").fg(Color::Green),
        Cell::new(">=90%").fg(Color::Green),
        Cell::new("Avg Acc").fg(Color::Cyan),
        Cell::new("Avg Time (s)"),
    ]);
    align_right(&mut table, 0..7);

    for s in summaries {
        table.add_row(vec![
            Cell::new(s.ngram).add_attribute(Attribute::Bold),
            Cell::new(s.length),
            Cell::new(s.runs),
            Cell::new(s.perfect).fg(Color::Green),
            Cell::new(s.successes).fg(Color::Green),
            Cell::new(format!("{:.3}", s.average_accuracy)).fg(Color::Cyan),
            Cell::new(format!("{:.2}", s.average_time)),
        ]);
    }

    if let Some(first) = summaries.first() {
        println!("\nMessage: {}", first.message);
    }
    println!("{}", table);
}

pub fn print_ngram_table(table: &NgramTable, top: usize) {
    let mut out = new_table();
    let total = table.total().max(1) as f64;

    out.add_row(vec![
        Cell::new("Rank").add_attribute(Attribute::Bold),
        Cell::new("N-gram"),
        Cell::new("Count"),
        Cell::new("Share").fg(Color::Cyan),
    ]);
    align_right(&mut out, 2..4);

    for (rank, (id, count)) in table.sorted().into_iter().take(top).enumerate() {
        out.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(format!("{:?}", table.decode(id))),
            Cell::new(count),
            Cell::new(format!("{:.2}%", count as f64 / total * 100.0)).fg(Color::Cyan),
        ]);
    }

    println!(
        "\n{} distinct {}-grams, {} total",
        table.len(),
        table.order(),
        table.total()
    );
    println!("{}", out);
}
