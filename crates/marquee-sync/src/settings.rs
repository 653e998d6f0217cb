use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read settings file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse settings file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Detection results from the last completed pass, plus the host-side
/// bookkeeping flags that survive restarts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionSettings {
    #[serde(default)]
    pub juicebox_detected: bool,
    #[serde(default)]
    pub scrollworks_detected: bool,
    /// A mutation has been made that the host has not acknowledged yet.
    #[serde(default)]
    pub write_pending: bool,
    /// Generated descriptors changed; the host owes a script reload.
    #[serde(default)]
    pub refresh_pending: bool,
}

fn default_true() -> bool {
    true
}

/// Sticky run request. Survives restarts and host reloads until a pass
/// consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorSettings {
    #[serde(default = "default_true")]
    pub run_module_sync: bool,
}

impl Default for ProcessorSettings {
    fn default() -> Self {
        Self {
            run_module_sync: true,
        }
    }
}

/// JSON-backed settings record with deferred writes. Mutations mark the
/// record dirty; nothing touches disk until `flush`.
#[derive(Debug)]
pub struct SettingsFile<T> {
    path: PathBuf,
    data: T,
    dirty: bool,
}

impl<T> SettingsFile<T>
where
    T: Default + Serialize + DeserializeOwned,
{
    /// Loads the record at `path`, or starts from the default when the
    /// file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let data = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        } else {
            T::default()
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

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn update(&mut self, mutate: impl FnOnce(&mut T)) {
        mutate(&mut self.data);
        self.dirty = true;
    }

    pub fn flush(&mut self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, json)?;
        self.dirty = false;
        Ok(())
    }

    pub fn flush_if_dirty(&mut self) -> Result<bool, StoreError> {
        if !self.dirty {
            return Ok(false);
        }
        self.flush()?;
        Ok(true)
    }
}

impl SettingsFile<DetectionSettings> {
    /// Host-side acknowledgement: clears the pending flags and reports
    /// whether a script reload was still owed.
    pub fn acknowledge_host_refresh(&mut self) -> Result<bool, StoreError> {
        let reload_owed = self.data.refresh_pending;
        if self.data.refresh_pending || self.data.write_pending {
            self.data.refresh_pending = false;
            self.data.write_pending = false;
            self.dirty = true;
            self.flush()?;
        }
        Ok(reload_owed)
    }
}
