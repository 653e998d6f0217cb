use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::platform::{PlatformRegistry, TargetGroup};
use crate::settings::StoreError;

#[derive(Debug, Default, Serialize, Deserialize)]
struct ProjectConfigData {
    #[serde(default)]
    scripting_defines: BTreeMap<TargetGroup, String>,
}

/// Per-target-group scripting defines of a host project, stored the way
/// the host stores them: one semicolon-delimited string per group.
#[derive(Debug)]
pub struct ProjectConfig {
    path: PathBuf,
    data: ProjectConfigData,
    dirty: bool,
}

impl ProjectConfig {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let data = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        } else {
            ProjectConfigData::default()
        };
        Ok(Self {
            path,
            data,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn defines(&self, group: TargetGroup) -> &str {
        self.data
            .scripting_defines
            .get(&group)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn has_define(&self, group: TargetGroup, symbol: &str) -> bool {
        self.defines(group).split(';').any(|entry| entry == symbol)
    }

    /// Appends `symbol` for every eligible group missing it. Returns how
    /// many groups changed.
    pub fn add_define<R: PlatformRegistry>(&mut self, registry: &R, symbol: &str) -> usize {
        let mut changed = 0;
        for group in registry.groups() {
            if !registry.is_eligible(group) {
                continue;
            }
            if self.has_define(group, symbol) {
                continue;
            }
            let current = self.defines(group);
            let next = if current.is_empty() {
                symbol.to_string()
            } else {
                format!("{current};{symbol}")
            };
            self.data.scripting_defines.insert(group, next);
            self.dirty = true;
            changed += 1;
        }
        if changed > 0 {
            tracing::info!(symbol, groups = changed, "added global define");
        }
        changed
    }

    /// Strips `symbol` from every eligible group carrying it, keeping
    /// the remaining symbols in their original order. Returns how many
    /// groups changed.
    pub fn remove_define<R: PlatformRegistry>(&mut self, registry: &R, symbol: &str) -> usize {
        let mut changed = 0;
        for group in registry.groups() {
            if !registry.is_eligible(group) {
                continue;
            }
            if !self.has_define(group, symbol) {
                continue;
            }
            let next = self
                .defines(group)
                .split(';')
                .filter(|entry| *entry != symbol)
                .collect::<Vec<_>>()
                .join(";");
            self.data.scripting_defines.insert(group, next);
            self.dirty = true;
            changed += 1;
        }
        if changed > 0 {
            tracing::info!(symbol, groups = changed, "removed global define");
        }
        changed
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn flush_if_dirty(&mut self) -> Result<bool, StoreError> {
        if !self.dirty {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, json)?;
        self.dirty = false;
        Ok(true)
    }
}
