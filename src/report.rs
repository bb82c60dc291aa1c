//! 自動入力結果の表示

use ledger_autofill_common::{AutofillReport, FieldOutcome, RenderHints};

/// フィールドごとの結果を表示
pub fn print_report(report: &AutofillReport, hints: &RenderHints, verbose: bool) {
    for entry in &report.fields {
        let skipped = !entry.outcome.is_annotated();
        if skipped && !verbose {
            continue;
        }

        let destination = entry.destination.as_deref().unwrap_or("-");
        let mark = match entry.outcome {
            FieldOutcome::Applied { .. } => "✔",
            FieldOutcome::SkippedUnmatched { .. } => "⚠",
            _ => "-",
        };
        let confidence = entry
            .confidence
            .map(|c| format!(" [{} {}]", c.tier, c.label()))
            .unwrap_or_default();

        println!("  {} {} → {}: {}{}", mark, entry.source, destination, entry.outcome, confidence);

        if let Some(note) = hints.get(destination).and_then(|h| h.unmatched_note()) {
            println!("      {}", note);
        }
    }

    println!(
        "✔ {}件中 {}件を入力",
        report.fields.len(),
        report.applied_count()
    );
}
