//! ASA statement rendering.
//!
//! Each translation method has its own renderer. A renderer takes a rule
//! whose object references are already resolved and returns the block of
//! ASA statements for it, or an error saying why the rule cannot be
//! expressed. Errors are per-rule; the caller records them and moves on.
//!
//! | Method  | Statements                                   |
//! |---------|----------------------------------------------|
//! | static  | `access-list`, `static`                      |
//! | pool    | `access-list`, `global`, `nat (inside) 1`    |
//! | no_nat  | `access-list`, `nat (inside,outside) 0`      |
//!
//! All three share the access-list builder in [`acl`].

pub mod acl;
pub mod no_nat;
pub mod pool;
pub mod static_nat;

use json_record_core::Record;
use thiserror::Error;

use crate::classify::NatMethod;
use crate::config::AsaSettings;
use crate::model::InvalidRuleNumber;

/// One rule's worth of ASA configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Free-text line emitted as a `!` comment above the statements.
    pub comment: Option<String>,
    /// Statements in emission order.
    pub statements: Vec<String>,
}

impl Fragment {
    pub fn new(statements: Vec<String>) -> Self {
        Self {
            comment: None,
            statements,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Why a rule could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The rule lacks the fields its method needs.
    #[error("{method} NAT rule missing required fields: {detail}")]
    MissingFields { method: NatMethod, detail: String },
    /// ACL or pool names could not be built.
    #[error(transparent)]
    InvalidRuleNumber(#[from] InvalidRuleNumber),
}

/// Renderer signature shared by every method.
pub type Renderer = fn(&Record, &AsaSettings) -> Result<Fragment, RenderError>;

/// Renderer for a classified method.
pub fn renderer_for(method: NatMethod) -> Renderer {
    match method {
        NatMethod::Static => static_nat::render,
        NatMethod::Pool => pool::render,
        NatMethod::NoNat => no_nat::render,
    }
}

/// Render a resolved rule with the renderer for `method`.
pub fn render(
    method: NatMethod,
    rule: &Record,
    asa: &AsaSettings,
) -> Result<Fragment, RenderError> {
    renderer_for(method)(rule, asa)
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::test_support::rule;
    use super::{render, RenderError};
    use crate::classify::NatMethod;
    use crate::config::AsaSettings;

    #[test]
    fn dispatches_by_method() {
        let r = rule(json!({
            "rule-number": 3,
            "original-source": "10.0.0.0",
            "translated-source": "192.0.2.10"
        }));
        let asa = AsaSettings::default();

        let stat = render(NatMethod::Static, &r, &asa).expect("static");
        let pool = render(NatMethod::Pool, &r, &asa).expect("pool");
        let exempt = render(NatMethod::NoNat, &r, &asa).expect("no-nat");

        assert!(stat.statements[1].starts_with("static "));
        assert!(pool.statements[1].starts_with("global "));
        assert!(exempt.statements[1].starts_with("nat (inside,outside) 0 "));
    }

    #[test]
    fn non_integer_rule_number_is_reported() {
        let r = rule(json!({"rule-number": "seven", "original-source": "10.0.0.1"}));
        let err = render(NatMethod::NoNat, &r, &AsaSettings::default()).expect_err("bad number");
        assert!(matches!(err, RenderError::InvalidRuleNumber(_)));
    }
}
