use std::fs;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::record::{ModuleRecord, TypeDecl};

/// File name a bundle uses to declare its module and exported types.
pub const BUNDLE_MANIFEST: &str = "bundle.json";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read bundle manifest: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse bundle manifest: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("bundle manifest has no module name")]
    MissingName,
}

/// Reads a bundle manifest, keeping whatever type declarations parse.
///
/// A damaged entry in `types` drops only that entry and marks the record
/// partial, so callers can tell a complete type list from a truncated
/// one. A manifest without a module name is rejected outright.
pub fn read_bundle_manifest(path: &Path) -> Result<ModuleRecord, ManifestError> {
    let raw = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&raw)?;
    let name = value
        .get("name")
        .and_then(Value::as_str)
        .ok_or(ManifestError::MissingName)?;

    let mut types = Vec::new();
    let mut dropped = 0usize;
    match value.get("types") {
        None => {}
        Some(Value::Array(entries)) => {
            for entry in entries {
                match serde_json::from_value::<TypeDecl>(entry.clone()) {
                    Ok(decl) => types.push(decl),
                    Err(_) => dropped += 1,
                }
            }
        }
        Some(_) => dropped += 1,
    }

    if dropped > 0 {
        Ok(ModuleRecord::partial(name, types))
    } else {
        Ok(ModuleRecord::new(name, types))
    }
}
