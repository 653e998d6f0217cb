use std::path::{Path, PathBuf};

/// Module identifier of the toolkit runtime.
pub const MODULE_BASE: &str = "marquee";
/// Identifier of the generated UI module bound to Juicebox.
pub const MODULE_UI: &str = "marquee.ui";
/// Identifier of the generated scroller module bound to Scrollworks.
pub const MODULE_UI_SCROLLER: &str = "marquee.ui.scroller";

/// Define gating the UI module.
pub const DEFINE_UI: &str = "MARQUEE_UI";
/// Define gating the scroller module.
pub const DEFINE_UI_SCROLLER: &str = "MARQUEE_UI_SCROLLER";

/// Marker namespace of the toolkit runtime itself.
pub const NAMESPACE_MARQUEE: &str = "marquee";
/// Marker namespace of the Juicebox animation plugin.
pub const NAMESPACE_JUICEBOX: &str = "juicebox";
/// Marker namespace of the Scrollworks virtualized-list plugin.
pub const NAMESPACE_SCROLLWORKS: &str = "scrollworks";

/// Filesystem layout of a host project the synchronizer operates on.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn plugins_dir(&self) -> PathBuf {
        self.root.join("plugins")
    }

    pub fn modules_dir(&self) -> PathBuf {
        self.root.join("modules")
    }

    pub fn settings_dir(&self) -> PathBuf {
        self.root.join("settings")
    }

    pub fn detection_settings_path(&self) -> PathBuf {
        self.settings_dir().join("detection.json")
    }

    pub fn processor_settings_path(&self) -> PathBuf {
        self.settings_dir().join("processors.json")
    }

    pub fn project_config_path(&self) -> PathBuf {
        self.settings_dir().join("project.json")
    }

    /// Present while the host editor is compiling or in a play session.
    pub fn lockfile_path(&self) -> PathBuf {
        self.root.join("Temp/editor.lock")
    }

    pub fn module_dir(&self, module: &str) -> PathBuf {
        self.modules_dir().join(module)
    }

    /// Where `module`'s generated descriptor lives.
    pub fn descriptor_path(&self, module: &str) -> PathBuf {
        self.module_dir(module).join(format!("{module}.module.json"))
    }

    /// Roots searched for installed bundle manifests.
    pub fn bundle_roots(&self) -> Vec<PathBuf> {
        vec![self.plugins_dir(), self.modules_dir()]
    }
}
