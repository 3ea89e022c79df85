//! ASA configuration document rendering.

use std::path::Path;

use json_record_core::{write_text_file, WriteError};

use crate::pipeline::OutputItem;
use crate::render::Fragment;

/// Fixed banner at the top of every generated file.
pub const BANNER: [&str; 2] = [
    "! Generated ASA NAT Rules from Checkpoint R81.x",
    "! ============================================",
];

/// Render output items as an ASA configuration document.
///
/// Banner, blank line, then headers and fragments in emission order. Each
/// fragment is followed by a blank line.
pub fn document(items: &[OutputItem]) -> String {
    let mut out = String::new();
    for line in BANNER {
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');

    for item in items {
        match item {
            OutputItem::SectionHeader(header) => {
                out.push_str(header);
                out.push('\n');
            }
            OutputItem::Rule(fragment) => out.push_str(&format_fragment(fragment)),
        }
    }
    out
}

/// `! comment`, then each statement on its own line, then a blank line.
pub fn format_fragment(fragment: &Fragment) -> String {
    let mut lines = Vec::with_capacity(fragment.statements.len() + 2);
    if let Some(comment) = &fragment.comment {
        lines.push(format!("! {comment}"));
    }
    lines.extend(fragment.statements.iter().cloned());
    lines.push(String::new());
    lines.join("\n") + "\n"
}

/// Write the rendered document atomically.
pub fn save(items: &[OutputItem], path: &Path) -> Result<(), WriteError> {
    write_text_file(path, &document(items))
}
