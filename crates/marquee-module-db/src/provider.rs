use std::collections::BTreeMap;
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::manifest::{read_bundle_manifest, BUNDLE_MANIFEST};
use crate::record::{ModuleRecord, ModuleSnapshot};

/// Source of module snapshots. The synchronizer takes exactly one
/// snapshot per pass and never re-queries mid-run.
pub trait ModuleProvider {
    fn snapshot(&self) -> ModuleSnapshot;
}

#[derive(Debug, Clone)]
pub struct BundleScanConfig {
    pub roots: Vec<PathBuf>,
    pub max_depth: usize,
}

impl Default for BundleScanConfig {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            max_depth: 4,
        }
    }
}

impl BundleScanConfig {
    pub fn for_roots(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            ..Self::default()
        }
    }
}

/// Discovers installed bundles by walking the configured roots for
/// manifest files. An unreadable manifest skips that bundle, never the
/// whole scan.
#[derive(Debug, Default)]
pub struct InstalledBundleProvider {
    config: BundleScanConfig,
}

impl InstalledBundleProvider {
    pub fn new(config: BundleScanConfig) -> Self {
        Self { config }
    }
}

impl ModuleProvider for InstalledBundleProvider {
    fn snapshot(&self) -> ModuleSnapshot {
        let mut modules: BTreeMap<String, ModuleRecord> = BTreeMap::new();

        for root in &self.config.roots {
            if !root.exists() {
                continue;
            }
            let walker = WalkDir::new(root).max_depth(self.config.max_depth).into_iter();
            for entry in walker {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) => {
                        if let Some(io) = err.io_error() {
                            log::debug!("skipping entry while scanning {}: {}", root.display(), io);
                        }
                        continue;
                    }
                };
                if !entry.file_type().is_file() || !entry.file_name().eq(BUNDLE_MANIFEST) {
                    continue;
                }
                match read_bundle_manifest(entry.path()) {
                    Ok(record) => {
                        if record.partial {
                            log::debug!(
                                "partial type list for module {} at {}",
                                record.name,
                                entry.path().display()
                            );
                        }
                        modules.insert(record.name.clone(), record);
                    }
                    Err(err) => {
                        log::debug!(
                            "skipping bundle manifest {}: {}",
                            entry.path().display(),
                            err
                        );
                    }
                }
            }
        }

        ModuleSnapshot::new(modules.into_values().collect())
    }
}

/// Fixed module set for tests and simulated hosts.
#[derive(Debug, Clone, Default)]
pub struct StaticModuleProvider {
    modules: Vec<ModuleRecord>,
}

impl StaticModuleProvider {
    pub fn new(modules: Vec<ModuleRecord>) -> Self {
        Self { modules }
    }

    pub fn push(&mut self, record: ModuleRecord) {
        self.modules.push(record);
    }
}

impl ModuleProvider for StaticModuleProvider {
    fn snapshot(&self) -> ModuleSnapshot {
        ModuleSnapshot::new(self.modules.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::fs::{create_dir_all, File};
    use std::io::Write;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn write_manifest(dir: &std::path::Path, body: &str) {
        create_dir_all(dir).unwrap();
        let mut file = File::create(dir.join(BUNDLE_MANIFEST)).unwrap();
        write!(file, "{}", body).unwrap();
    }

    #[test]
    fn snapshot_collects_manifests_from_all_roots() {
        let dir = tempdir().unwrap();
        let plugins = dir.path().join("plugins");
        let modules = dir.path().join("modules");
        write_manifest(
            &plugins.join("juicebox"),
            &serde_json::json!({
                "name": "juicebox-runtime",
                "types": [{ "namespace": "juicebox", "name": "Tween" }]
            })
            .to_string(),
        );
        write_manifest(
            &modules.join("marquee"),
            &serde_json::json!({
                "name": "marquee-runtime",
                "types": [{ "namespace": "marquee", "name": "EntityController" }]
            })
            .to_string(),
        );
        write_manifest(&plugins.join("broken"), "{ not json");
        File::create(plugins.join("juicebox/readme.txt")).unwrap();

        let provider =
            InstalledBundleProvider::new(BundleScanConfig::for_roots(vec![plugins, modules]));
        let snapshot = provider.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.contains_namespace("juicebox"));
        assert!(snapshot.contains_namespace("marquee"));
    }

    #[test]
    fn duplicate_module_names_collapse_to_one_record() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("a");
        let second = dir.path().join("b");
        let body = serde_json::json!({
            "name": "juicebox-runtime",
            "types": [{ "namespace": "juicebox", "name": "Tween" }]
        })
        .to_string();
        write_manifest(&first.join("juicebox"), &body);
        write_manifest(&second.join("juicebox"), &body);

        let provider =
            InstalledBundleProvider::new(BundleScanConfig::for_roots(vec![first, second]));
        assert_eq!(provider.snapshot().len(), 1);
    }

    #[test]
    fn missing_roots_are_ignored() {
        let dir = tempdir().unwrap();
        let provider = InstalledBundleProvider::new(BundleScanConfig::for_roots(vec![
            dir.path().join("does-not-exist"),
        ]));
        assert!(provider.snapshot().is_empty());
    }
}
