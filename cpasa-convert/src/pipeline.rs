//! Checkpoint → ASA NAT translation pipeline.
//!
//! ## Stages
//!
//! 1. **Validate** — reject policies that are not a list or whose rule and
//!    section entries lack key fields
//! 2. **Index sections** — collect user-defined section names
//! 3. **Filter** — count every `nat-rule`, skip disabled and auto-generated ones
//! 4. **Resolve** — replace object uids with addresses via the catalog
//! 5. **Classify** — choose static, pool, or no-NAT translation
//! 6. **Render** — produce the ASA statements for the rule
//!
//! Rules are handled strictly in input order because section headers and
//! counters depend on the previous rule. A rule that fails at any step is
//! counted and logged; only a structurally invalid policy stops the run.
//!
//! The translator holds no run state. Each call to [`Translator::translate`]
//! starts from fresh counters, so a translator can be reused.

use std::fmt::{self, Display, Formatter};
use std::path::Path;

use json_record_core::{records, ParseError, Record, WriteError};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::catalog::ObjectCatalog;
use crate::classify::classify;
use crate::config::TranslateConfig;
use crate::model::{self, rule_label, rule_uid, NAT_RULE};
use crate::output;
use crate::render::{render, Fragment, RenderError};
use crate::section::{section_header, SectionIndex};
use crate::stats::TranslationStats;
use crate::validate::{validate_policy, PolicySummary, ValidationError};

/// Pipeline progress, traced at debug level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Loaded,
    Validated,
    SectionsIndexed,
    RulesFiltered,
    Resolved,
    Classified,
    Rendered,
    Saved,
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Loaded => "loaded",
            Stage::Validated => "validated",
            Stage::SectionsIndexed => "sections_indexed",
            Stage::RulesFiltered => "rules_filtered",
            Stage::Resolved => "resolved",
            Stage::Classified => "classified",
            Stage::Rendered => "rendered",
            Stage::Saved => "saved",
        };
        f.write_str(name)
    }
}

fn enter(stage: Stage) {
    debug!(stage = %stage, "pipeline stage");
}

/// One element of the generated output, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputItem {
    SectionHeader(String),
    Rule(Fragment),
}

/// Result of one translation run.
#[derive(Debug, Clone)]
pub struct Translation {
    pub items: Vec<OutputItem>,
    pub stats: TranslationStats,
    pub policy: PolicySummary,
}

impl Translation {
    /// Translated rule fragments, without section headers.
    pub fn fragments(&self) -> impl Iterator<Item = &Fragment> {
        self.items.iter().filter_map(|item| match item {
            OutputItem::Rule(fragment) => Some(fragment),
            OutputItem::SectionHeader(_) => None,
        })
    }

    /// Render the complete ASA document.
    pub fn document(&self) -> String {
        output::document(&self.items)
    }

    /// Write the ASA document to `path`.
    pub fn save(&self, path: &Path) -> Result<(), WriteError> {
        output::save(&self.items, path)?;
        enter(Stage::Saved);
        info!(
            rules = self.stats.successful,
            path = %path.display(),
            "saved ASA rules"
        );
        Ok(())
    }
}

/// Fatal pipeline errors.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("failed to read policy entries: {0}")]
    Records(#[from] ParseError),
}

/// Translates Checkpoint NAT policies against one object catalog.
#[derive(Debug, Clone)]
pub struct Translator {
    catalog: ObjectCatalog,
    config: TranslateConfig,
}

impl Translator {
    pub fn new(catalog: ObjectCatalog, config: TranslateConfig) -> Self {
        Self { catalog, config }
    }

    /// Translate a decoded policy document.
    pub fn translate(&self, policy: &Value) -> Result<Translation, PipelineError> {
        enter(Stage::Loaded);
        let summary = validate_policy(policy)?;
        enter(Stage::Validated);

        let entries = records(policy.clone())?;
        let sections = SectionIndex::build(&entries, &self.config.sections);
        enter(Stage::SectionsIndexed);

        let mut run = Run::default();
        for rule in entries.iter().filter(|e| e.entry_type() == Some(NAT_RULE)) {
            self.translate_rule(rule, &sections, &mut run);
        }
        enter(Stage::Rendered);

        info!(
            total = run.stats.total,
            successful = run.stats.successful,
            failed = run.stats.failed,
            skipped = run.stats.skipped,
            "translation finished"
        );
        Ok(Translation {
            items: run.items,
            stats: run.stats,
            policy: summary,
        })
    }

    fn translate_rule(&self, rule: &Record, sections: &SectionIndex, run: &mut Run) {
        run.stats.total += 1;
        let label = rule_label(rule);

        if let Some(reason) = skip_reason(rule) {
            info!(rule = %label, "skipped: {reason}");
            run.stats.skipped += 1;
            return;
        }
        enter(Stage::RulesFiltered);

        let resolved = match self.catalog.resolve_rule_fields(rule) {
            Ok(resolved) => resolved,
            Err(err) => {
                error!(rule = %label, "object resolution error: {err}");
                run.stats.record_object_error();
                return;
            }
        };
        enter(Stage::Resolved);

        let section = sections.label_for(rule);
        if run.current_section.as_deref() != Some(section) {
            run.items
                .push(OutputItem::SectionHeader(section_header(section)));
            run.current_section = Some(section.to_string());
        }

        let method = classify(&resolved);
        enter(Stage::Classified);

        match render(method, &resolved, &self.config.asa) {
            Ok(fragment) => {
                let fragment = fragment.with_comment(rule_comment(&resolved, &label));
                run.items.push(OutputItem::Rule(fragment));
                run.stats.successful += 1;
                info!(rule = %label, method = %method, "translated");
            }
            Err(err @ RenderError::MissingFields { .. }) => {
                warn!(rule = %label, method = %method, "translation failed: {err}");
                run.stats.record_translation_error();
            }
            Err(err) => {
                error!(
                    rule = %label,
                    uid = rule_uid(rule),
                    method = %method,
                    "translation failed with error: {err}"
                );
                run.stats.record_translation_error();
            }
        }
    }
}

/// Mutable state of a single run.
#[derive(Default)]
struct Run {
    items: Vec<OutputItem>,
    stats: TranslationStats,
    current_section: Option<String>,
}

fn skip_reason(rule: &Record) -> Option<&'static str> {
    if !rule.is_truthy(model::ENABLED, true) {
        return Some("rule is disabled");
    }
    if rule.is_truthy(model::AUTO_GENERATED, false) {
        return Some("auto-generated rule");
    }
    None
}

fn rule_comment(rule: &Record, label: &str) -> String {
    let comment = rule
        .get_text(model::COMMENTS)
        .unwrap_or_else(|| "NA".to_string());
    format!("Rule {label}: {comment} | UUID: {}", rule_uid(rule))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::{OutputItem, PipelineError, Translator};
    use crate::catalog::ObjectCatalog;
    use crate::config::TranslateConfig;
    use crate::stats::TranslationStats;

    fn translator() -> Translator {
        let catalog = ObjectCatalog::from_value(json!([
            {"uid": "obj-A", "type": "host", "ipv4-address": "10.1.1.1"},
            {"uid": "obj-B", "type": "host", "ipv4-address": "172.16.1.1"},
            {"uid": "pool", "type": "network", "subnet4": "192.0.2.0"}
        ]))
        .expect("catalog");
        Translator::new(catalog, TranslateConfig::default())
    }

    #[test]
    fn end_to_end_static_rule_in_named_section() {
        let policy = json!([
            {"uid": "s1", "type": "nat-section", "name": "DMZ Rules"},
            {
                "uid": "r1", "type": "nat-rule", "method": "static", "rule-number": 1,
                "original-source": "obj-A", "translated-source": "obj-B", "section-uid": "s1"
            }
        ]);
        let out = translator().translate(&policy).expect("translates");
        let doc = out.document();

        assert_eq!(
            doc,
            "! Generated ASA NAT Rules from Checkpoint R81.x\n\
             ! ============================================\n\
             \n\
             ! Checkpoint NAT Section: DMZ Rules\n\
             ! Rule 0001: NA | UUID: r1\n\
             access-list NAT_ACL_0001 extended permit any 10.1.1.1 any\n\
             static (inside,outside) 172.16.1.1 10.1.1.1 netmask 255.255.255.255\n\
             \n"
        );
        assert!(!doc.contains("obj-A"));
        assert_eq!(out.stats.successful, 1);
    }

    #[test]
    fn skipped_rules_never_render() {
        let policy = json!([
            {"uid": "r1", "type": "nat-rule", "method": "static", "enabled": false,
             "original-source": "obj-A", "translated-source": "obj-B"},
            {"uid": "r2", "type": "nat-rule", "method": "static", "auto-generated": true,
             "original-source": "obj-A", "translated-source": "obj-B"}
        ]);
        let out = translator().translate(&policy).expect("translates");
        assert!(out.items.is_empty());
        assert_eq!(
            out.stats,
            TranslationStats {
                total: 2,
                skipped: 2,
                ..TranslationStats::default()
            }
        );
    }

    #[test]
    fn skip_flags_use_truthiness_not_strict_booleans() {
        let policy = json!([
            {"uid": "r1", "type": "nat-rule", "method": "no-nat", "enabled": 0},
            {"uid": "r2", "type": "nat-rule", "method": "no-nat", "auto-generated": "true"},
            {"uid": "r3", "type": "nat-rule", "method": "no-nat", "enabled": null},
            {"uid": "r4", "type": "nat-rule", "method": "no-nat", "rule-number": 4,
             "enabled": 1, "auto-generated": 0}
        ]);
        let out = translator().translate(&policy).expect("translates");
        assert_eq!(out.stats.skipped, 3);
        assert_eq!(out.stats.successful, 1);
    }

    #[test]
    fn one_bad_rule_does_not_stop_the_batch() {
        let policy = json!([
            {"uid": "r1", "type": "nat-rule", "method": "hide", "rule-number": 1},
            {"uid": "r2", "type": "nat-rule", "method": "static", "rule-number": 2,
             "original-source": {"nested": true}},
            {"uid": "r3", "type": "nat-rule", "method": "no-nat", "rule-number": "x"},
            {"uid": "r4", "type": "nat-rule", "method": "hide", "rule-number": 4,
             "original-source": "obj-A", "translated-source": "pool", "Comments": "outbound"}
        ]);
        let out = translator().translate(&policy).expect("translates");
        assert_eq!(
            out.stats,
            TranslationStats {
                total: 4,
                successful: 1,
                failed: 3,
                skipped: 0,
                object_errors: 1,
                translation_errors: 2,
            }
        );
        let fragment = out.fragments().next().expect("one fragment");
        assert_eq!(
            fragment.comment.as_deref(),
            Some("Rule 0004: outbound | UUID: r4")
        );
        assert_eq!(
            fragment.statements[1],
            "global (outside) NAT_POOL_0004 192.0.2.0 netmask 255.255.255.0"
        );
    }

    #[test]
    fn headers_follow_section_changes_in_input_order() {
        let policy = json!([
            {"uid": "a", "type": "nat-section", "name": "A"},
            {"uid": "b", "type": "nat-section", "name": "B"},
            {"uid": "r1", "type": "nat-rule", "method": "no-nat", "rule-number": 1, "section-uid": "a"},
            {"uid": "r2", "type": "nat-rule", "method": "no-nat", "rule-number": 2, "section-uid": "a"},
            {"uid": "r3", "type": "nat-rule", "method": "no-nat", "rule-number": 3, "section-uid": "b"},
            {"uid": "r4", "type": "nat-rule", "method": "no-nat", "rule-number": 4, "section-uid": "a"},
            {"uid": "r5", "type": "nat-rule", "method": "no-nat", "rule-number": 5}
        ]);
        let out = translator().translate(&policy).expect("translates");
        let headers = out
            .items
            .iter()
            .filter_map(|item| match item {
                OutputItem::SectionHeader(h) => Some(h.as_str()),
                OutputItem::Rule(_) => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(
            headers,
            vec![
                "! Checkpoint NAT Section: A",
                "! Checkpoint NAT Section: B",
                "! Checkpoint NAT Section: A",
                "! Checkpoint NAT Section: Default Section",
            ]
        );
        assert!(matches!(out.items[0], OutputItem::SectionHeader(_)));
        assert_eq!(out.items.len(), 9);
    }

    #[test]
    fn invalid_policy_is_fatal() {
        let err = translator()
            .translate(&json!([{"uid": "r1", "type": "nat-rule"}]))
            .expect_err("missing method");
        assert!(matches!(err, PipelineError::Validation(_)));
    }

    #[test]
    fn repeated_runs_start_from_fresh_counters() {
        let policy = json!([
            {"uid": "r1", "type": "nat-rule", "method": "no-nat", "rule-number": 1}
        ]);
        let t = translator();
        let first = t.translate(&policy).expect("first");
        let second = t.translate(&policy).expect("second");
        assert_eq!(first.stats, second.stats);
        assert_eq!(second.stats.total, 1);
    }
}
