//! Dynamic pool translation (Checkpoint "hide").
//!
//! Emits the access-list, then a `global` pool built from the translated
//! source, then the `nat` statement binding the two under index 1.

use json_record_core::Record;

use super::acl::{build_access_list, pool_name, FieldSet};
use super::{Fragment, RenderError};
use crate::classify::NatMethod;
use crate::config::AsaSettings;
use crate::model::{self, rule_number};

/// NAT id tying the `global` pool to its `nat` statement.
pub const POOL_NAT_ID: u32 = 1;

pub fn render(rule: &Record, asa: &AsaSettings) -> Result<Fragment, RenderError> {
    let Some(translated_source) = rule.get_text(model::TRANSLATED_SOURCE) else {
        return Err(RenderError::MissingFields {
            method: NatMethod::Pool,
            detail: "translated-source".to_string(),
        });
    };

    let pool = pool_name(rule_number(rule)?);
    let acl = build_access_list(rule, FieldSet::Original)?;
    let global = format!(
        "global ({}) {pool} {translated_source} netmask {}",
        asa.outside_interface, asa.pool_netmask
    );
    let nat = format!(
        "nat ({}) {POOL_NAT_ID} access-list {}",
        asa.inside_interface, acl.name
    );

    Ok(Fragment::new(vec![acl.statement, global, nat]))
}
