//! Checkpoint to Cisco ASA NAT policy translation.
//!
//! Checkpoint keeps NAT rules and the network objects they use in two
//! separate exports. Rules refer to objects only by uid, carry a `method`
//! that decides the kind of translation, and sit in named sections. This
//! library resolves the references, classifies each rule, and renders the
//! legacy ASA `access-list` / `static` / `global` / `nat` statements for it.
//!
//! # Architecture
//!
//! - [`catalog`] — Object catalog and uid resolution (hosts, networks, nested groups)
//! - [`validate`] — Structural checks on the policy export
//! - [`classify`] — Rule → translation method (static, pool, no-NAT)
//! - [`render`] — Per-method ASA statement renderers and the shared ACL builder
//! - [`section`] — Section name registry and header lines
//! - [`pipeline`] — Orchestrates a run, tracks statistics, isolates per-rule failures
//! - [`output`] — Banner and document layout, atomic save
//! - [`stats`] / [`report`] — Run counters and their terminal/JSON rendering
//! - [`config`] — TOML settings (interface names, masks, section labels)
//! - [`model`] — Field names and small typed accessors over raw records
//!
//! # Examples
//!
//! ```ignore
//! use cpasa_convert::catalog::ObjectCatalog;
//! use cpasa_convert::config::default_config;
//! use cpasa_convert::pipeline::Translator;
//! use json_record_core::parse_file;
//!
//! let catalog = ObjectCatalog::load_file("objects.json".as_ref())?;
//! let policy = parse_file("nat-policy.json".as_ref())?;
//! let translation = Translator::new(catalog, default_config()).translate(&policy)?;
//! translation.save("asa-nat.txt".as_ref())?;
//! println!("translated {} of {}", translation.stats.successful, translation.stats.total);
//! ```
//!
//! # Built on json-record-core
//!
//! Generic JSON record handling and atomic file output live in
//! `json-record-core`. Everything vendor-specific is in this crate.

pub mod catalog;
pub mod classify;
pub mod config;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod section;
pub mod stats;
pub mod validate;
