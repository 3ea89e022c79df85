//! NAT method classification.
//!
//! Checkpoint tags each rule with a `method`. The translator maps those onto
//! the three ASA constructs it can emit. Unrecognised or missing methods fall
//! back to static translation with a warning so the rule is still attempted.

use std::fmt::{self, Display, Formatter};

use json_record_core::Record;
use serde::Serialize;
use tracing::warn;

use crate::model;

/// Translation method a rule is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NatMethod {
    /// One-to-one `static` mapping.
    Static,
    /// Dynamic `global` pool with a `nat` index (Checkpoint "hide").
    Pool,
    /// `nat 0` exemption.
    NoNat,
}

impl NatMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            NatMethod::Static => "static",
            NatMethod::Pool => "pool",
            NatMethod::NoNat => "no_nat",
        }
    }
}

impl Display for NatMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick the translation method for a rule.
///
/// Never fails: any method string outside `no-nat`, `hide`, and `static`
/// (including a missing one) yields [`NatMethod::Static`].
pub fn classify(rule: &Record) -> NatMethod {
    let method = rule
        .get_str(model::METHOD)
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match method.as_str() {
        "no-nat" => NatMethod::NoNat,
        "hide" => NatMethod::Pool,
        "static" => NatMethod::Static,
        _ => {
            log_unhandled_rule(
                rule,
                &format!("could not determine NAT type for method '{method}', defaulting to static"),
            );
            NatMethod::Static
        }
    }
}

/// Warn about a rule the translator could not handle as written.
pub fn log_unhandled_rule(rule: &Record, reason: &str) {
    warn!(
        "Unhandled rule {} (UID: {}, Method: {}) - {}",
        model::rule_label(rule),
        model::rule_uid(rule),
        rule.get_str(model::METHOD).unwrap_or("unknown"),
        reason
    );
}
