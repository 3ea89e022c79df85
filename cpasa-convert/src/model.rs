//! Field names and small accessors shared by the policy and object records.
//!
//! Checkpoint exports are loose JSON: every field is optional and values are
//! either literals or object uids. Records stay as [`Record`] key/value maps
//! and the helpers here give the few typed views the translator needs.

use json_record_core::Record;
use serde_json::Value;
use thiserror::Error;

pub const UID: &str = "uid";
pub const TYPE: &str = "type";
pub const NAME: &str = "name";
pub const METHOD: &str = "method";
pub const RULE_NUMBER: &str = "rule-number";
pub const ENABLED: &str = "enabled";
pub const AUTO_GENERATED: &str = "auto-generated";
pub const SECTION_UID: &str = "section-uid";
pub const COMMENTS: &str = "Comments";

pub const ORIGINAL_SOURCE: &str = "original-source";
pub const ORIGINAL_DESTINATION: &str = "original-destination";
pub const ORIGINAL_SERVICE: &str = "original-service";
pub const TRANSLATED_SOURCE: &str = "translated-source";
pub const TRANSLATED_DESTINATION: &str = "translated-destination";
pub const TRANSLATED_SERVICE: &str = "translated-service";

/// Rule fields that may hold object uids.
pub const REFERENCE_FIELDS: [&str; 6] = [
    ORIGINAL_SOURCE,
    ORIGINAL_DESTINATION,
    ORIGINAL_SERVICE,
    TRANSLATED_SOURCE,
    TRANSLATED_DESTINATION,
    TRANSLATED_SERVICE,
];

pub const NAT_RULE: &str = "nat-rule";
pub const NAT_SECTION: &str = "nat-section";

/// `rule-number` holds something other than an integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("rule-number {0} is not an integer")]
pub struct InvalidRuleNumber(pub String);

/// Read `rule-number`, defaulting to 0 when absent or null.
pub fn rule_number(rule: &Record) -> Result<i64, InvalidRuleNumber> {
    match rule.get(RULE_NUMBER) {
        None | Some(Value::Null) => Ok(0),
        Some(value) => value
            .as_i64()
            .ok_or_else(|| InvalidRuleNumber(value.to_string())),
    }
}

/// Zero-padded rule number used in names and log lines, e.g. `0007`.
pub fn padded(number: i64) -> String {
    format!("{number:04}")
}

/// Rule label for log lines. Falls back to the raw value when it is not numeric.
pub fn rule_label(rule: &Record) -> String {
    match rule_number(rule) {
        Ok(number) => padded(number),
        Err(InvalidRuleNumber(raw)) => raw,
    }
}

/// Rule uid for log lines.
pub fn rule_uid(rule: &Record) -> &str {
    rule.get_str(UID).unwrap_or("unknown")
}
