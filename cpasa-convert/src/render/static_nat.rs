//! One-to-one `static` translation.
//!
//! A source pair (original and translated source) takes priority. Without
//! one, a destination pair is used and the access-list is built from the
//! translated side. Only one branch is ever emitted.

use json_record_core::Record;

use super::acl::{build_access_list, FieldSet};
use super::{Fragment, RenderError};
use crate::classify::NatMethod;
use crate::config::AsaSettings;
use crate::model;

pub fn render(rule: &Record, asa: &AsaSettings) -> Result<Fragment, RenderError> {
    let original_source = rule.get_text(model::ORIGINAL_SOURCE);
    let translated_source = rule.get_text(model::TRANSLATED_SOURCE);
    let original_destination = rule.get_text(model::ORIGINAL_DESTINATION);
    let translated_destination = rule.get_text(model::TRANSLATED_DESTINATION);

    if let (Some(original), Some(translated)) = (&original_source, &translated_source) {
        let acl = build_access_list(rule, FieldSet::Original)?;
        return Ok(Fragment::new(vec![
            acl.statement,
            static_statement(asa, translated, original),
        ]));
    }

    if let (Some(original), Some(translated)) = (&original_destination, &translated_destination) {
        let acl = build_access_list(rule, FieldSet::Translated)?;
        return Ok(Fragment::new(vec![
            acl.statement,
            static_statement(asa, original, translated),
        ]));
    }

    Err(RenderError::MissingFields {
        method: NatMethod::Static,
        detail: format!(
            "source {}/{}, destination {}/{}",
            shown(&original_source),
            shown(&translated_source),
            shown(&original_destination),
            shown(&translated_destination)
        ),
    })
}

fn static_statement(asa: &AsaSettings, mapped: &str, real: &str) -> String {
    format!(
        "static ({},{}) {mapped} {real} netmask {}",
        asa.inside_interface, asa.outside_interface, asa.host_netmask
    )
}

fn shown(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("<missing>")
}
