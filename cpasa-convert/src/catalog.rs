//! Object catalog: resolves Checkpoint object uids to addresses.
//!
//! Policy rules never carry addresses directly. Each address or service
//! field holds the uid of an entry in a separate objects export, and the
//! catalog turns those uids into the literal values ASA statements need.
//!
//! ## Resolution
//!
//! - `host` → `ipv4-address`
//! - `network` → `subnet4`
//! - `group` → every member resolved in turn, joined with spaces
//! - anything else → the entry's `name`, with a warning
//!
//! Groups may nest and may (in broken exports) contain themselves. The
//! current resolution chain is tracked so a cycle contributes nothing
//! instead of recursing forever.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use json_record_core::{kind_name, parse_file, records, ParseError, Record};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::model::{self, REFERENCE_FIELDS};

/// Kind of catalog entry, taken from its `type` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectKind {
    Host,
    Network,
    Group,
    Other(String),
}

impl ObjectKind {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "host" => ObjectKind::Host,
            "network" => ObjectKind::Network,
            "group" => ObjectKind::Group,
            other => ObjectKind::Other(other.to_string()),
        }
    }
}

/// One named network entity from the objects export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectEntry {
    pub uid: String,
    pub kind: ObjectKind,
    pub name: Option<String>,
    pub ipv4_address: Option<String>,
    pub subnet4: Option<String>,
    pub members: Vec<String>,
}

impl ObjectEntry {
    /// Build an entry from a record. Returns `None` when the record has no uid.
    pub fn from_record(record: &Record) -> Option<Self> {
        let uid = record.get_text(model::UID)?;
        Some(Self {
            uid,
            kind: ObjectKind::parse(record.get_str(model::TYPE).unwrap_or_default()),
            name: record.get_text(model::NAME),
            ipv4_address: record.get_text("ipv4-address"),
            subnet4: record.get_text("subnet4"),
            members: member_uids(record.get("members")),
        })
    }
}

/// Group members are usually plain uids, but some exports inline the member
/// object instead; accept both.
fn member_uids(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(uid) => Some(uid.trim().to_string()),
            Value::Object(map) => map.get(model::UID).and_then(Value::as_str).map(str::to_string),
            _ => None,
        })
        .filter(|uid| !uid.is_empty())
        .collect()
}

/// Errors raised while building a catalog.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("objects file is not a list of objects (found {0})")]
    NotAList(&'static str),
    #[error("failed to read objects file: {0}")]
    Read(#[from] ParseError),
}

/// Hard faults while resolving the reference fields of one rule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("field '{field}' holds {kind}, expected an object uid or literal")]
    MalformedReference { field: String, kind: &'static str },
}

/// Immutable uid → entry mapping.
#[derive(Debug, Clone, Default)]
pub struct ObjectCatalog {
    objects: BTreeMap<String, ObjectEntry>,
}

impl ObjectCatalog {
    /// Build a catalog from already-parsed records.
    ///
    /// Records without a uid are skipped. When a uid repeats, the first
    /// entry wins.
    pub fn load(entries: &[Record]) -> Self {
        let mut objects = BTreeMap::new();
        for (idx, record) in entries.iter().enumerate() {
            let Some(entry) = ObjectEntry::from_record(record) else {
                debug!(index = idx, "skipping object without uid");
                continue;
            };
            if objects.contains_key(&entry.uid) {
                warn!(uid = %entry.uid, "duplicate object uid, keeping first definition");
                continue;
            }
            objects.insert(entry.uid.clone(), entry);
        }
        debug!(objects = objects.len(), "object catalog loaded");
        Self { objects }
    }

    /// Build a catalog from a decoded objects document.
    pub fn from_value(value: Value) -> Result<Self, CatalogLoadError> {
        if !value.is_array() {
            return Err(CatalogLoadError::NotAList(kind_name(&value)));
        }
        let entries = records(value)?;
        Ok(Self::load(&entries))
    }

    /// Read and build a catalog from an objects file.
    pub fn load_file(path: &Path) -> Result<Self, CatalogLoadError> {
        Self::from_value(parse_file(path)?)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Resolve a uid to its concrete value.
    ///
    /// Returns `None` when the uid is unknown, the entry carries no usable
    /// value, or a group resolves to nothing.
    pub fn resolve(&self, uid: &str) -> Option<String> {
        let Some(entry) = self.objects.get(uid) else {
            warn!(uid, "object not found in catalog");
            return None;
        };
        if entry.kind != ObjectKind::Group {
            return leaf_value(entry);
        }
        let values = self.expand_group(entry);
        if values.is_empty() {
            return None;
        }
        Some(values.join(" "))
    }

    /// Flatten a group into its distinct leaf values, first-seen order.
    ///
    /// Walks the membership graph with an explicit stack so nesting depth is
    /// bounded by the heap, not the call stack. `chain` holds the groups
    /// currently open on the stack; a member already in it is a cycle and
    /// contributes nothing. Finished groups are kept in `done` so a group
    /// reachable along several paths is only walked once per call.
    fn expand_group<'a>(&'a self, root: &'a ObjectEntry) -> Vec<String> {
        let mut chain: BTreeSet<&str> = BTreeSet::from([root.uid.as_str()]);
        let mut done: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        let mut stack = vec![GroupFrame::open(root)];

        while let Some(frame) = stack.last_mut() {
            let Some(member) = frame.members.next() else {
                let Some(finished) = stack.pop() else {
                    break;
                };
                chain.remove(finished.uid);
                match stack.last_mut() {
                    Some(parent) => parent.absorb(&finished.values),
                    None => return finished.values,
                }
                done.insert(finished.uid, finished.values);
                continue;
            };

            if let Some(values) = done.get(member.as_str()) {
                frame.absorb(values);
                continue;
            }
            let Some(entry) = self.objects.get(member) else {
                warn!(uid = %member, group = frame.uid, "group member not found in catalog");
                continue;
            };
            if entry.kind != ObjectKind::Group {
                if let Some(value) = leaf_value(entry) {
                    frame.absorb(&[value]);
                }
                continue;
            }
            if !chain.insert(entry.uid.as_str()) {
                warn!(uid = %member, group = frame.uid, "group membership cycle, ignoring repeated member");
                continue;
            }
            stack.push(GroupFrame::open(entry));
        }
        Vec::new()
    }

    /// Replace object uids in a rule's address and service fields.
    ///
    /// Fields that fail to resolve keep their original value. Only a
    /// reference that is not a scalar at all is treated as a hard fault.
    pub fn resolve_rule_fields(&self, rule: &Record) -> Result<Record, ResolveError> {
        let mut resolved = rule.clone();
        for field in REFERENCE_FIELDS {
            let raw = match rule.get(field) {
                None | Some(Value::Null) => continue,
                Some(Value::String(s)) => s.trim(),
                Some(Value::Number(_)) => continue,
                Some(other) => {
                    return Err(ResolveError::MalformedReference {
                        field: field.to_string(),
                        kind: kind_name(other),
                    })
                }
            };
            if raw.is_empty() || raw.eq_ignore_ascii_case("any") {
                continue;
            }
            match self.resolve(raw) {
                Some(value) => resolved = resolved.with_field(field, value),
                None => warn!(
                    rule = %model::rule_label(rule),
                    field,
                    reference = raw,
                    "keeping unresolved reference"
                ),
            }
        }
        Ok(resolved)
    }
}

/// One open group on the expansion stack.
struct GroupFrame<'a> {
    uid: &'a str,
    members: std::slice::Iter<'a, String>,
    values: Vec<String>,
}

impl<'a> GroupFrame<'a> {
    fn open(entry: &'a ObjectEntry) -> Self {
        Self {
            uid: entry.uid.as_str(),
            members: entry.members.iter(),
            values: Vec::new(),
        }
    }

    fn absorb(&mut self, values: &[String]) {
        for value in values {
            if !self.values.contains(value) {
                self.values.push(value.clone());
            }
        }
    }
}

fn leaf_value(entry: &ObjectEntry) -> Option<String> {
    match &entry.kind {
        ObjectKind::Host => entry.ipv4_address.clone(),
        ObjectKind::Network => entry.subnet4.clone(),
        ObjectKind::Group => None,
        ObjectKind::Other(kind) => match &entry.name {
            Some(name) => {
                warn!(uid = %entry.uid, kind = %kind, "using name for object of unknown type");
                Some(name.clone())
            }
            None => {
                warn!(uid = %entry.uid, kind = %kind, "object of unknown type has no name");
                None
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use serde_json::json;

    use super::{CatalogLoadError, ObjectCatalog, ResolveError};
    use json_record_core::Record;

    fn catalog(value: serde_json::Value) -> ObjectCatalog {
        ObjectCatalog::from_value(value).expect("catalog")
    }

    fn sample() -> ObjectCatalog {
        catalog(json!([
            {"uid": "h1", "type": "host", "name": "host-one", "ipv4-address": "10.0.0.1"},
            {"uid": "n1", "type": "network", "name": "net-one", "subnet4": "10.1.0.0"},
            {"uid": "g1", "type": "group", "members": ["h1", "n1"]},
            {"uid": "g2", "type": "group", "members": ["n1", "h1"]},
            {"uid": "cp", "type": "CpmiAnyObject", "name": "Any"},
            {"uid": "anon", "type": "service-tcp"},
            {"uid": "bare", "type": "host", "name": "no-address"},
            {"type": "host", "ipv4-address": "10.9.9.9"}
        ]))
    }

    #[test]
    fn host_and_network_resolve_to_address_fields_not_names() {
        let c = sample();
        assert_eq!(c.resolve("h1").as_deref(), Some("10.0.0.1"));
        assert_eq!(c.resolve("n1").as_deref(), Some("10.1.0.0"));
        assert_eq!(c.resolve("bare"), None);
    }

    #[test]
    fn group_resolution_is_order_independent_as_a_set() {
        let c = sample();
        let tokens = |uid: &str| {
            let mut v = c
                .resolve(uid)
                .expect("group resolves")
                .split(' ')
                .map(str::to_string)
                .collect::<Vec<_>>();
            v.sort();
            v
        };
        assert_eq!(tokens("g1"), vec!["10.0.0.1", "10.1.0.0"]);
        assert_eq!(tokens("g1"), tokens("g2"));
    }

    #[test]
    fn unknown_type_falls_back_to_name() {
        let c = sample();
        assert_eq!(c.resolve("cp").as_deref(), Some("Any"));
        assert_eq!(c.resolve("anon"), None);
        assert_eq!(c.resolve("missing"), None);
    }

    #[test]
    fn entries_without_uid_are_skipped() {
        assert_eq!(sample().len(), 7);
    }

    #[test]
    fn self_referencing_group_terminates() {
        let c = catalog(json!([
            {"uid": "h1", "type": "host", "ipv4-address": "10.0.0.1"},
            {"uid": "loop", "type": "group", "members": ["loop", "h1"]}
        ]));
        assert_eq!(c.resolve("loop").as_deref(), Some("10.0.0.1"));
    }

    #[test]
    fn indirect_group_cycle_terminates() {
        let c = catalog(json!([
            {"uid": "h1", "type": "host", "ipv4-address": "10.0.0.1"},
            {"uid": "h2", "type": "host", "ipv4-address": "10.0.0.2"},
            {"uid": "a", "type": "group", "members": ["b", "h1"]},
            {"uid": "b", "type": "group", "members": ["a", "h2"]}
        ]));
        let mut tokens = c
            .resolve("a")
            .expect("resolves")
            .split(' ')
            .map(str::to_string)
            .collect::<Vec<_>>();
        tokens.sort();
        assert_eq!(tokens, vec!["10.0.0.1", "10.0.0.2"]);
    }

    #[test]
    fn diamond_membership_is_not_mistaken_for_a_cycle() {
        let c = catalog(json!([
            {"uid": "h1", "type": "host", "ipv4-address": "10.0.0.1"},
            {"uid": "inner", "type": "group", "members": ["h1"]},
            {"uid": "left", "type": "group", "members": ["inner"]},
            {"uid": "right", "type": "group", "members": ["inner"]},
            {"uid": "top", "type": "group", "members": ["left", "right"]}
        ]));
        assert_eq!(c.resolve("top").as_deref(), Some("10.0.0.1"));
    }

    #[test]
    fn very_deep_group_chain_resolves_without_recursion() {
        let depth = 100_000;
        let mut entries: Vec<serde_json::Value> = (0..depth)
            .map(|i| json!({"uid": format!("g{i}"), "type": "group", "members": [format!("g{}", i + 1)]}))
            .collect();
        entries.push(json!({"uid": format!("g{depth}"), "type": "host", "ipv4-address": "10.0.0.1"}));
        let c = catalog(serde_json::Value::Array(entries));
        assert_eq!(c.resolve("g0").as_deref(), Some("10.0.0.1"));
    }

    #[test]
    fn shared_subgroups_are_expanded_once() {
        let depth = 64;
        let mut entries: Vec<serde_json::Value> = (0..depth)
            .map(|i| {
                let next = format!("g{}", i + 1);
                json!({"uid": format!("g{i}"), "type": "group", "members": [next.clone(), next]})
            })
            .collect();
        entries.push(json!({"uid": format!("g{depth}"), "type": "host", "ipv4-address": "10.0.0.1"}));
        let c = catalog(serde_json::Value::Array(entries));

        let started = Instant::now();
        assert_eq!(c.resolve("g0").as_deref(), Some("10.0.0.1"));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn group_keeps_multi_word_member_values_whole() {
        let c = catalog(json!([
            {"uid": "ws", "type": "CpmiGatewayCluster", "name": "Web Servers"},
            {"uid": "wc", "type": "CpmiGatewayCluster", "name": "Web Clients"},
            {"uid": "h1", "type": "host", "ipv4-address": "10.0.0.1"},
            {"uid": "inner", "type": "group", "members": ["h1", "wc"]},
            {"uid": "g", "type": "group", "members": ["ws", "inner", "wc", "h1"]}
        ]));
        assert_eq!(
            c.resolve("g").as_deref(),
            Some("Web Servers 10.0.0.1 Web Clients")
        );
    }

    #[test]
    fn inline_member_objects_are_accepted() {
        let c = catalog(json!([
            {"uid": "h1", "type": "host", "ipv4-address": "10.0.0.1"},
            {"uid": "g", "type": "group", "members": [{"uid": "h1", "name": "h1"}]}
        ]));
        assert_eq!(c.resolve("g").as_deref(), Some("10.0.0.1"));
    }

    #[test]
    fn duplicate_uid_keeps_first_entry() {
        let c = catalog(json!([
            {"uid": "h1", "type": "host", "ipv4-address": "10.0.0.1"},
            {"uid": "h1", "type": "host", "ipv4-address": "10.0.0.2"}
        ]));
        assert_eq!(c.resolve("h1").as_deref(), Some("10.0.0.1"));
    }

    #[test]
    fn non_list_document_fails_to_load() {
        let err = ObjectCatalog::from_value(json!({"objects": []})).expect_err("not a list");
        assert!(matches!(err, CatalogLoadError::NotAList("an object")));
    }

    #[test]
    fn rule_fields_resolve_or_keep_original() {
        let c = sample();
        let rule: Record = serde_json::from_value(json!({
            "uid": "r1",
            "original-source": "h1",
            "translated-source": "unknown-uid",
            "original-destination": "Any",
            "Comments": "h1"
        }))
        .expect("record");

        let resolved = c.resolve_rule_fields(&rule).expect("resolves");
        assert_eq!(resolved.get_str("original-source"), Some("10.0.0.1"));
        assert_eq!(resolved.get_str("translated-source"), Some("unknown-uid"));
        assert_eq!(resolved.get_str("original-destination"), Some("Any"));
        assert_eq!(resolved.get_str("Comments"), Some("h1"));
        assert_eq!(rule.get_str("original-source"), Some("h1"));
    }

    #[test]
    fn structured_reference_is_a_hard_fault() {
        let c = sample();
        let rule: Record = serde_json::from_value(json!({
            "uid": "r1",
            "original-source": {"uid": "h1"}
        }))
        .expect("record");

        assert_eq!(
            c.resolve_rule_fields(&rule),
            Err(ResolveError::MalformedReference {
                field: "original-source".to_string(),
                kind: "an object",
            })
        );
    }
}
