//! NAT exemption (`nat 0`).

use json_record_core::Record;

use super::acl::{build_access_list, FieldSet};
use super::{Fragment, RenderError};
use crate::config::AsaSettings;

/// NAT id ASA reserves for exemption.
pub const EXEMPT_NAT_ID: u32 = 0;

pub fn render(rule: &Record, asa: &AsaSettings) -> Result<Fragment, RenderError> {
    let acl = build_access_list(rule, FieldSet::Original)?;
    let nat = format!(
        "nat ({},{}) {EXEMPT_NAT_ID} access-list {}",
        asa.inside_interface, asa.outside_interface, acl.name
    );
    Ok(Fragment::new(vec![acl.statement, nat]))
}
