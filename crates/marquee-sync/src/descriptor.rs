use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Build-boundary module descriptor consumed by the host build pipeline.
///
/// Field order is part of the contract: the host diffs these files
/// textually, and a pass that changes nothing must reproduce the file
/// byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDescriptor {
    pub name: String,
    pub references: Vec<String>,
    pub include_platforms: Vec<String>,
    pub exclude_platforms: Vec<String>,
    pub allow_unsafe_code: bool,
    pub override_references: bool,
    pub precompiled_references: Vec<String>,
    pub auto_referenced: bool,
    pub define_constraints: Vec<String>,
    pub version_defines: Vec<String>,
}

impl ModuleDescriptor {
    /// Descriptor for a generated optional module: all platforms, no
    /// unsafe code, gated behind a single define constraint.
    pub fn submodule(name: impl Into<String>, references: Vec<String>, define: &str) -> Self {
        Self {
            name: name.into(),
            references,
            include_platforms: Vec::new(),
            exclude_platforms: Vec::new(),
            allow_unsafe_code: false,
            override_references: false,
            precompiled_references: Vec::new(),
            auto_referenced: true,
            define_constraints: vec![define.to_string()],
            version_defines: Vec::new(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn write_to(&self, path: &Path) -> io::Result<()> {
        let json = self.to_json().map_err(io::Error::from)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, json)
    }
}
