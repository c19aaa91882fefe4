//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the search code stays clean and testable
//! - output changes are localized

use crate::domain::{Criterion, CriterionChoice, SubsetRecord, SubsetTable};
use crate::report::predictor_path;

/// Width of the predictor-label column.
const LABEL_WIDTH: usize = 36;

/// Format the run header: dataset shape and full-model diagnostics.
pub fn format_run_summary(source: &str, response: &str, table: &SubsetTable) -> String {
    let mut out = String::new();

    out.push_str("=== subsets - Best Subsets Regression ===\n");
    out.push_str(&format!("Data: {source}\n"));
    out.push_str(&format!("Response: {response}\n"));
    out.push_str(&format!(
        "Observations: n={} | candidate predictors: K={}\n",
        table.n, table.n_predictors
    ));
    out.push_str(&format!(
        "Search: sizes 1..={} | nbest={}\n",
        table.max_size, table.best_per_size
    ));
    out.push_str(&format!(
        "Full model: RSS={:.4} MSE={:.6} | TSS={:.4}\n",
        table.rss_full, table.mse_full, table.tss
    ));

    out
}

/// Format the result table, one line per retained subset.
///
/// Rank-1 rows preferred by a criterion are tagged in the last column.
pub fn format_table(table: &SubsetTable, choice: &CriterionChoice) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:>4} {:>4} {:<LABEL_WIDTH$} {:>8} {:>8} {:>10} {:>9} {:>10} {:>10} {}\n",
            "size", "rank", "predictors", "R2", "adjR2", "RSS", "Cp", "AICc", "BIC", "best"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<4} {:-<4} {:-<LABEL_WIDTH$} {:-<8} {:-<8} {:-<10} {:-<9} {:-<10} {:-<10} {:-<4}\n",
            "", "", "", "", "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for r in &table.records {
        out.push_str(
            format!(
                "{:>4} {:>4} {:<LABEL_WIDTH$} {:>8.4} {:>8.4} {:>10.4} {:>9.3} {:>10} {:>10.3} {}\n",
                r.size,
                r.rank,
                truncate(&table.label(r), LABEL_WIDTH),
                r.r2,
                r.adj_r2,
                r.rss,
                r.cp,
                r.aicc.map(|v| format!("{v:.3}")).unwrap_or_else(|| "-".to_string()),
                r.bic,
                best_tags(r, choice),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Format the per-criterion choice and the detailed model for `criterion`.
pub fn format_choice(table: &SubsetTable, choice: &CriterionChoice, criterion: Criterion) -> String {
    let mut out = String::new();

    out.push_str("Preferred size by criterion:\n");
    for c in Criterion::ALL {
        out.push_str(&format!("- {:<6} {}\n", c.display_name(), fmt_size(choice.get(c))));
    }
    out.push_str(&format!("- {:<6} {}\n", "Cp<=p", fmt_size(choice.cp_within_p)));

    let Some(rec) = choice.get(criterion).and_then(|size| table.best_at(size)) else {
        return out;
    };

    out.push_str(&format!("\nChosen model ({}):\n", criterion.display_name()));
    out.push_str(&format!("- predictors: {}\n", table.label(rec)));
    if let Some(intercept) = rec.coefficients.first() {
        out.push_str(&format!("- {:<16} {:>12.6}\n", "(Intercept)", intercept));
    }
    for (j, coef) in rec.predictors.iter().zip(rec.coefficients.iter().skip(1)) {
        out.push_str(&format!("- {:<16} {:>12.6}\n", truncate(&column_name(table, *j), 16), coef));
    }

    out
}

/// Format the sequence of additions (and swaps) across sizes.
pub fn format_path(table: &SubsetTable) -> String {
    let mut out = String::new();
    out.push_str("Predictor path:\n");
    for step in predictor_path(table) {
        let names = |cols: &[usize]| {
            cols.iter()
                .map(|&j| column_name(table, j))
                .collect::<Vec<_>>()
                .join(", ")
        };
        if step.is_nested() {
            out.push_str(&format!("  {:>3}: + {}\n", step.size, names(step.added.as_slice())));
        } else {
            out.push_str(&format!(
                "  {:>3}: + {} / - {}\n",
                step.size,
                names(step.added.as_slice()),
                names(step.removed.as_slice())
            ));
        }
    }
    out
}

fn best_tags(r: &SubsetRecord, choice: &CriterionChoice) -> String {
    if r.rank != 1 {
        return String::new();
    }
    Criterion::ALL
        .iter()
        .filter(|&&c| choice.get(c) == Some(r.size))
        .map(|c| c.display_name())
        .collect::<Vec<_>>()
        .join(",")
}

fn column_name(table: &SubsetTable, j: usize) -> String {
    table
        .predictor_names
        .get(j)
        .cloned()
        .unwrap_or_else(|| format!("x{}", j + 1))
}

fn fmt_size(size: Option<usize>) -> String {
    size.map(|s| format!("p={s}")).unwrap_or_else(|| "-".to_string())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
