use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Context, Result};

/// Refuse to write the ASA output over the rules or objects export.
pub fn ensure_output_distinct(output: &Path, rules: &Path, objects: &Path) -> Result<()> {
    let target = comparable_path(output)
        .with_context(|| format!("failed to resolve output path {}", output.display()))?;

    for (role, input) in [("rules", rules), ("objects", objects)] {
        let source = comparable_path(input)
            .with_context(|| format!("failed to resolve {role} path {}", input.display()))?;
        if target == source {
            bail!(
                "refusing to overwrite input file: output {} is the {role} export {}",
                output.display(),
                input.display()
            );
        }
    }
    Ok(())
}

/// Absolute, symlink-free form of `path` for equality checks.
///
/// The output usually does not exist yet, so `.` and `..` are folded
/// lexically first and only the longest existing ancestor is canonicalized.
fn comparable_path(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return path
            .canonicalize()
            .with_context(|| format!("canonicalize {}", path.display()));
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().context("current_dir")?.join(path)
    };
    let folded = fold_dots(&absolute);

    let mut existing = folded.as_path();
    let mut missing = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_owned());
                existing = parent;
            }
            _ => break,
        }
    }

    let mut resolved = if existing.exists() {
        existing
            .canonicalize()
            .with_context(|| format!("canonicalize {}", existing.display()))?
    } else {
        existing.to_path_buf()
    };
    resolved.extend(missing.iter().rev());
    Ok(resolved)
}

fn fold_dots(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
