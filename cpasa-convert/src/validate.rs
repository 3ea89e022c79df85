//! Structural validation of a NAT policy export.
//!
//! Runs before any rule is translated. The policy must be a JSON list, and
//! the two entry types the translator consumes must carry their key fields:
//!
//! | Entry type    | Required fields          |
//! |---------------|--------------------------|
//! | `nat-rule`    | `uid`, `type`, `method`  |
//! | `nat-section` | `uid`, `type`, `name`    |
//!
//! Entries of any other type are counted and otherwise ignored. Every
//! problem is collected so a broken export can be fixed in one pass.

use std::fmt::{self, Display, Formatter};

use json_record_core::kind_name;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::model::{self, NAT_RULE, NAT_SECTION};

/// One structural problem in the policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyFinding {
    /// Position of the entry in the policy list.
    pub index: usize,
    pub code: String,
    pub message: String,
}

impl Display for PolicyFinding {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "entry #{} [{}] {}", self.index, self.code, self.message)
    }
}

/// Entry counts of a policy that passed validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PolicySummary {
    pub rules: usize,
    pub sections: usize,
    pub ignored: usize,
}

/// Reasons a policy is rejected.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid Checkpoint NAT policy: expected a list of entries, found {0}")]
    NotAList(&'static str),
    #[error("invalid Checkpoint NAT policy structure ({} problem(s)): {}", .0.len(), render_findings(.0))]
    Invalid(Vec<PolicyFinding>),
}

fn render_findings(findings: &[PolicyFinding]) -> String {
    findings
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validate a decoded policy document.
pub fn validate_policy(policy: &Value) -> Result<PolicySummary, ValidationError> {
    let Some(entries) = policy.as_array() else {
        return Err(ValidationError::NotAList(kind_name(policy)));
    };

    let findings = policy_findings(entries);
    if !findings.is_empty() {
        return Err(ValidationError::Invalid(findings));
    }

    let mut summary = PolicySummary::default();
    for entry in entries {
        match entry.get(model::TYPE).and_then(Value::as_str) {
            Some(NAT_RULE) => summary.rules += 1,
            Some(NAT_SECTION) => summary.sections += 1,
            _ => summary.ignored += 1,
        }
    }
    Ok(summary)
}

/// Collect every structural problem in the policy entries.
pub fn policy_findings(entries: &[Value]) -> Vec<PolicyFinding> {
    let mut out = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        let Some(fields) = entry.as_object() else {
            out.push(PolicyFinding {
                index,
                code: "entry_not_object".to_string(),
                message: format!("policy entry is {}, expected an object", kind_name(entry)),
            });
            continue;
        };

        let entry_type = fields.get(model::TYPE).and_then(Value::as_str);
        let Some(required) = entry_type.and_then(required_fields) else {
            continue;
        };
        for field in required {
            if !fields.contains_key(*field) {
                out.push(PolicyFinding {
                    index,
                    code: "missing_required_field".to_string(),
                    message: format!(
                        "{} entry is missing required field '{field}'",
                        entry_type.unwrap_or_default()
                    ),
                });
            }
        }
    }
    out
}

fn required_fields(entry_type: &str) -> Option<&'static [&'static str]> {
    match entry_type {
        NAT_RULE => Some(&[model::UID, model::TYPE, model::METHOD]),
        NAT_SECTION => Some(&[model::UID, model::TYPE, model::NAME]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{validate_policy, PolicySummary, ValidationError};

    #[test]
    fn accepts_well_formed_policy_and_counts_entries() {
        let policy = json!([
            {"uid": "s1", "type": "nat-section", "name": "DMZ"},
            {"uid": "r1", "type": "nat-rule", "method": "static"},
            {"uid": "p1", "type": "access-rule"},
            {"name": "untyped"}
        ]);
        assert_eq!(
            validate_policy(&policy).expect("valid"),
            PolicySummary {
                rules: 1,
                sections: 1,
                ignored: 2
            }
        );
    }

    #[test]
    fn rejects_non_list() {
        let err = validate_policy(&json!({"nat-policy": []})).expect_err("object");
        assert!(matches!(err, ValidationError::NotAList("an object")));
    }

    #[test]
    fn reports_each_missing_field() {
        let policy = json!([
            {"uid": "r1", "type": "nat-rule"},
            {"type": "nat-section"},
            "stray"
        ]);
        let ValidationError::Invalid(findings) = validate_policy(&policy).expect_err("invalid")
        else {
            panic!("expected field findings");
        };
        let summary = findings
            .iter()
            .map(|f| (f.index, f.code.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(
            summary,
            vec![
                (0, "missing_required_field"),
                (1, "missing_required_field"),
                (1, "missing_required_field"),
                (2, "entry_not_object"),
            ]
        );
        assert!(findings[0].message.contains("'method'"));
    }

    #[test]
    fn unknown_entry_types_are_not_checked() {
        let policy = json!([{"type": "place-holder"}]);
        assert!(validate_policy(&policy).is_ok());
    }
}
