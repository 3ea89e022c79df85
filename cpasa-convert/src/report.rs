use colored::Colorize;
use serde::Serialize;

use crate::stats::{render_line, TranslationStats};
use crate::validate::PolicySummary;

/// Machine-readable run report.
#[derive(Debug, Clone, Serialize)]
pub struct TranslateReport {
    pub output: String,
    pub policy: PolicySummary,
    pub stats: TranslationStats,
}

/// Render translation statistics for terminal output.
pub fn render_stats_text(stats: &TranslationStats) -> String {
    let mut out = vec!["Translation Statistics:".bold().to_string()];
    out.push(format!("Total rules processed: {}", stats.total));
    out.push(
        format!("Successfully translated: {}", stats.successful)
            .green()
            .to_string(),
    );
    out.push(paint_failures(
        format!("Failed translations: {}", stats.failed),
        stats.failed,
    ));
    out.push(format!("Skipped rules: {}", stats.skipped));
    out.push(paint_failures(
        format!("Object resolution errors: {}", stats.object_errors),
        stats.object_errors,
    ));
    out.push(paint_failures(
        format!("Translation errors: {}", stats.translation_errors),
        stats.translation_errors,
    ));
    out.push(render_line(stats).cyan().to_string());
    out.join("\n")
}

fn paint_failures(line: String, count: usize) -> String {
    if count > 0 {
        line.red().to_string()
    } else {
        line
    }
}
