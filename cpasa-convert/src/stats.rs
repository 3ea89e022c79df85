use serde::Serialize;

/// Per-run translation counters.
///
/// `failed` always equals `object_errors + translation_errors`; the split
/// tells operators whether to look at the objects export or the rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TranslationStats {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub skipped: usize,
    pub object_errors: usize,
    pub translation_errors: usize,
}

impl TranslationStats {
    pub(crate) fn record_object_error(&mut self) {
        self.object_errors += 1;
        self.failed += 1;
    }

    pub(crate) fn record_translation_error(&mut self) {
        self.translation_errors += 1;
        self.failed += 1;
    }
}

pub fn render_line(stats: &TranslationStats) -> String {
    format!(
        "translate_summary total={} successful={} failed={} skipped={} object_errors={} translation_errors={}",
        stats.total,
        stats.successful,
        stats.failed,
        stats.skipped,
        stats.object_errors,
        stats.translation_errors
    )
}
