//! Access-list construction shared by every renderer.

use json_record_core::Record;

use crate::model::{self, padded, rule_number, InvalidRuleNumber};

/// Which side of the rule an access-list matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSet {
    Original,
    Translated,
}

impl FieldSet {
    /// Source, destination, and service keys for this side.
    fn keys(self) -> [&'static str; 3] {
        match self {
            FieldSet::Original => [
                model::ORIGINAL_SOURCE,
                model::ORIGINAL_DESTINATION,
                model::ORIGINAL_SERVICE,
            ],
            FieldSet::Translated => [
                model::TRANSLATED_SOURCE,
                model::TRANSLATED_DESTINATION,
                model::TRANSLATED_SERVICE,
            ],
        }
    }
}

/// A rendered `access-list` line together with its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessList {
    pub name: String,
    pub statement: String,
}

/// `NAT_ACL_0007` for rule 7.
pub fn acl_name(number: i64) -> String {
    format!("NAT_ACL_{}", padded(number))
}

/// `NAT_POOL_0007` for rule 7.
pub fn pool_name(number: i64) -> String {
    format!("NAT_POOL_{}", padded(number))
}

/// Build the access-list for a rule from one side of its fields.
///
/// Missing or empty fields become `any`.
pub fn build_access_list(rule: &Record, fields: FieldSet) -> Result<AccessList, InvalidRuleNumber> {
    let name = acl_name(rule_number(rule)?);
    let [source, destination, service] =
        fields.keys().map(|key| rule.get_text(key).unwrap_or_else(|| "any".to_string()));

    let statement = format!("access-list {name} extended permit {service} {source} {destination}");
    Ok(AccessList { name, statement })
}
