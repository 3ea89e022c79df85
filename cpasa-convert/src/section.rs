//! NAT section registry.
//!
//! Checkpoint groups rules into named sections. Rules point at their section
//! through `section-uid`. Sections that Checkpoint generates itself (named
//! with the automatic-rules prefix) are deliberately left out of the registry
//! so their rules fall under the default label.

use std::collections::BTreeMap;

use json_record_core::Record;
use tracing::info;

use crate::config::SectionSettings;
use crate::model::{self, NAT_SECTION};

/// `uid → name` for user-defined sections.
#[derive(Debug, Clone)]
pub struct SectionIndex {
    names: BTreeMap<String, String>,
    default_label: String,
}

impl SectionIndex {
    /// Index every `nat-section` entry in `entries`.
    pub fn build(entries: &[Record], settings: &SectionSettings) -> Self {
        let mut names = BTreeMap::new();
        for entry in entries.iter().filter(|e| e.entry_type() == Some(NAT_SECTION)) {
            let Some(uid) = entry.get_text(model::UID) else {
                continue;
            };
            let name = entry
                .get_text(model::NAME)
                .unwrap_or_else(|| "Unnamed Section".to_string());
            if name.starts_with(&settings.auto_generated_prefix) {
                info!(section = %name, "skipping auto-generated section");
                continue;
            }
            names.insert(uid, name);
        }
        Self {
            names,
            default_label: settings.default_label.clone(),
        }
    }

    /// Display name for a section uid, or the default label.
    pub fn label(&self, uid: Option<&str>) -> &str {
        uid.and_then(|uid| self.names.get(uid))
            .map(String::as_str)
            .unwrap_or(&self.default_label)
    }

    /// Section label for a rule.
    pub fn label_for(&self, rule: &Record) -> &str {
        self.label(rule.get_str(model::SECTION_UID))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Section header line emitted when the section changes.
pub fn section_header(name: &str) -> String {
    format!("! Checkpoint NAT Section: {name}")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{section_header, SectionIndex};
    use crate::config::SectionSettings;
    use json_record_core::Record;

    fn entries(value: serde_json::Value) -> Vec<Record> {
        serde_json::from_value(value).expect("records")
    }

    #[test]
    fn auto_generated_sections_fall_back_to_default_label() {
        let index = SectionIndex::build(
            &entries(json!([
                {"uid": "s1", "type": "nat-section", "name": "DMZ Rules"},
                {"uid": "s2", "type": "nat-section", "name": "Automatic Generated rules: Machine Hide NAT"},
                {"uid": "r1", "type": "nat-rule", "name": "not a section"}
            ])),
            &SectionSettings::default(),
        );
        assert_eq!(index.len(), 1);
        assert_eq!(index.label(Some("s1")), "DMZ Rules");
        assert_eq!(index.label(Some("s2")), "Default Section");
        assert_eq!(index.label(Some("r1")), "Default Section");
        assert_eq!(index.label(None), "Default Section");
    }

    #[test]
    fn header_format() {
        assert_eq!(section_header("DMZ Rules"), "! Checkpoint NAT Section: DMZ Rules");
    }
}
