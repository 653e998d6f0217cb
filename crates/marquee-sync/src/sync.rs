use std::fs;
use std::path::PathBuf;

use marquee_module_db::ModuleProvider;

use crate::defines::ProjectConfig;
use crate::descriptor::ModuleDescriptor;
use crate::error::SyncError;
use crate::gate::HostGate;
use crate::layout::{
    ProjectLayout, DEFINE_UI, DEFINE_UI_SCROLLER, MODULE_BASE, MODULE_UI, MODULE_UI_SCROLLER,
    NAMESPACE_JUICEBOX, NAMESPACE_MARQUEE, NAMESPACE_SCROLLWORKS,
};
use crate::platform::PlatformRegistry;
use crate::settings::{DetectionSettings, ProcessorSettings, SettingsFile};

/// Optional third-party plugins the toolkit can bind against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionalPlugin {
    Juicebox,
    Scrollworks,
}

impl OptionalPlugin {
    pub const ALL: [OptionalPlugin; 2] = [OptionalPlugin::Juicebox, OptionalPlugin::Scrollworks];

    /// Marker namespace whose presence proves the plugin is installed.
    pub fn namespace(self) -> &'static str {
        match self {
            OptionalPlugin::Juicebox => NAMESPACE_JUICEBOX,
            OptionalPlugin::Scrollworks => NAMESPACE_SCROLLWORKS,
        }
    }

    /// Identifier of the generated module bound to this plugin.
    pub fn module_id(self) -> &'static str {
        match self {
            OptionalPlugin::Juicebox => MODULE_UI,
            OptionalPlugin::Scrollworks => MODULE_UI_SCROLLER,
        }
    }

    /// Global define toggled alongside this plugin's presence.
    pub fn define(self) -> &'static str {
        match self {
            OptionalPlugin::Juicebox => DEFINE_UI,
            OptionalPlugin::Scrollworks => DEFINE_UI_SCROLLER,
        }
    }
}

/// Why a triggered pass did not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The host is compiling or in a play session.
    HostBusy,
    /// No run request is pending.
    NotRequested,
}

#[derive(Debug, Clone, Default)]
pub struct PluginState {
    pub detected: bool,
    pub changed: bool,
    /// Name of the installed module declaring the marker namespace.
    pub module: Option<String>,
}

/// What a completed pass observed and touched.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub juicebox: PluginState,
    pub scrollworks: PluginState,
    pub descriptors_written: Vec<PathBuf>,
    pub descriptors_removed: Vec<PathBuf>,
    pub define_groups_changed: usize,
}

impl RunReport {
    pub fn plugin(&self, plugin: OptionalPlugin) -> &PluginState {
        match plugin {
            OptionalPlugin::Juicebox => &self.juicebox,
            OptionalPlugin::Scrollworks => &self.scrollworks,
        }
    }

    fn plugin_mut(&mut self, plugin: OptionalPlugin) -> &mut PluginState {
        match plugin {
            OptionalPlugin::Juicebox => &mut self.juicebox,
            OptionalPlugin::Scrollworks => &mut self.scrollworks,
        }
    }
}

#[derive(Debug)]
pub enum RunOutcome {
    Skipped(SkipReason),
    Completed(RunReport),
}

/// Persisted state as the operator surface reports it.
#[derive(Debug, Clone)]
pub struct SyncStatus {
    pub detection: DetectionSettings,
    pub run_requested: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SyncState {
    Idle,
    Running,
}

/// Drives one synchronization pass over a host project: detect the
/// optional plugins, regenerate the descriptors of the modules they
/// gate, and align the global defines with what was found.
pub struct Synchronizer<P, R, G> {
    layout: ProjectLayout,
    provider: P,
    platforms: R,
    gate: G,
    state: SyncState,
}

impl<P, R, G> Synchronizer<P, R, G>
where
    P: ModuleProvider,
    R: PlatformRegistry,
    G: HostGate,
{
    pub fn new(layout: ProjectLayout, provider: P, platforms: R, gate: G) -> Self {
        Self {
            layout,
            provider,
            platforms,
            gate,
            state: SyncState::Idle,
        }
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Arms the sticky run request consumed by the next completed pass.
    pub fn request_run(&mut self) -> Result<(), SyncError> {
        let mut processors =
            SettingsFile::<ProcessorSettings>::open(self.layout.processor_settings_path())?;
        processors.update(|settings| settings.run_module_sync = true);
        processors.flush()?;
        Ok(())
    }

    pub fn status(&self) -> Result<SyncStatus, SyncError> {
        let detection =
            SettingsFile::<DetectionSettings>::open(self.layout.detection_settings_path())?;
        let processors =
            SettingsFile::<ProcessorSettings>::open(self.layout.processor_settings_path())?;
        Ok(SyncStatus {
            detection: detection.data().clone(),
            run_requested: processors.data().run_module_sync,
        })
    }

    /// Clears the pending host flags, reporting whether a script reload
    /// was owed. Called by whatever drives the host after a pass.
    pub fn acknowledge_host_refresh(&self) -> Result<bool, SyncError> {
        let mut detection =
            SettingsFile::<DetectionSettings>::open(self.layout.detection_settings_path())?;
        Ok(detection.acknowledge_host_refresh()?)
    }

    /// Runs one pass if one is due. A busy host or an unarmed request
    /// skips without touching any state, so the request survives for a
    /// later trigger.
    pub fn execute(&mut self) -> Result<RunOutcome, SyncError> {
        if self.state == SyncState::Running {
            return Ok(RunOutcome::Skipped(SkipReason::HostBusy));
        }
        if self.gate.is_busy() {
            tracing::debug!("host busy, deferring module sync");
            return Ok(RunOutcome::Skipped(SkipReason::HostBusy));
        }
        let mut processors =
            SettingsFile::<ProcessorSettings>::open(self.layout.processor_settings_path())?;
        if !processors.data().run_module_sync {
            return Ok(RunOutcome::Skipped(SkipReason::NotRequested));
        }

        self.state = SyncState::Running;
        let result = self.run_pass(&mut processors);
        self.state = SyncState::Idle;
        result
    }

    fn run_pass(
        &mut self,
        processors: &mut SettingsFile<ProcessorSettings>,
    ) -> Result<RunOutcome, SyncError> {
        let snapshot = self.provider.snapshot();

        if !snapshot.contains_namespace(NAMESPACE_MARQUEE) {
            self.revert_to_safe(processors);
            return Err(SyncError::MandatoryModuleMissing);
        }

        let mut detection =
            SettingsFile::<DetectionSettings>::open(self.layout.detection_settings_path())?;
        let mut report = RunReport::default();

        for plugin in OptionalPlugin::ALL {
            let module = snapshot
                .module_declaring(plugin.namespace())
                .map(str::to_owned);
            let detected = module.is_some();
            let previous = match plugin {
                OptionalPlugin::Juicebox => detection.data().juicebox_detected,
                OptionalPlugin::Scrollworks => detection.data().scrollworks_detected,
            };
            if detected != previous {
                detection.update(|settings| {
                    match plugin {
                        OptionalPlugin::Juicebox => settings.juicebox_detected = detected,
                        OptionalPlugin::Scrollworks => settings.scrollworks_detected = detected,
                    }
                    settings.write_pending = true;
                });
            }
            let state = report.plugin_mut(plugin);
            state.detected = detected;
            state.changed = detected != previous;
            state.module = module;
        }

        for plugin in OptionalPlugin::ALL {
            let path = self.layout.descriptor_path(plugin.module_id());
            let (module, changed) = {
                let state = report.plugin(plugin);
                (state.module.clone(), state.changed)
            };
            match module {
                Some(module) => {
                    if changed || !path.exists() {
                        let descriptor = submodule_descriptor(plugin, &module);
                        if let Err(err) = descriptor.write_to(&path) {
                            self.revert_to_safe(processors);
                            return Err(SyncError::DescriptorWrite { path, source: err });
                        }
                        tracing::debug!(module = plugin.module_id(), "wrote module descriptor");
                        report.descriptors_written.push(path);
                    }
                }
                None => {
                    if path.exists() {
                        if let Err(err) = fs::remove_file(&path) {
                            self.revert_to_safe(processors);
                            return Err(SyncError::DescriptorRemove { path, source: err });
                        }
                        tracing::debug!(module = plugin.module_id(), "removed module descriptor");
                        report.descriptors_removed.push(path);
                    }
                }
            }
        }

        if !report.descriptors_written.is_empty() || !report.descriptors_removed.is_empty() {
            detection.update(|settings| {
                settings.refresh_pending = true;
                settings.write_pending = true;
            });
        }
        detection.flush_if_dirty()?;

        let mut config = ProjectConfig::open(self.layout.project_config_path())?;
        for plugin in OptionalPlugin::ALL {
            let changed = if report.plugin(plugin).detected {
                config.add_define(&self.platforms, plugin.define())
            } else {
                config.remove_define(&self.platforms, plugin.define())
            };
            report.define_groups_changed += changed;
        }
        config.flush_if_dirty()?;

        processors.update(|settings| settings.run_module_sync = false);
        processors.flush()?;

        tracing::info!(
            juicebox = report.juicebox.detected,
            scrollworks = report.scrollworks.detected,
            written = report.descriptors_written.len(),
            removed = report.descriptors_removed.len(),
            "module sync pass completed"
        );
        Ok(RunOutcome::Completed(report))
    }

    /// Removes both optional defines and disarms the run request.
    /// Secondary failures are logged; the caller reports the primary
    /// error.
    fn revert_to_safe(&mut self, processors: &mut SettingsFile<ProcessorSettings>) {
        match ProjectConfig::open(self.layout.project_config_path()) {
            Ok(mut config) => {
                for plugin in OptionalPlugin::ALL {
                    config.remove_define(&self.platforms, plugin.define());
                }
                if let Err(err) = config.flush_if_dirty() {
                    tracing::warn!(?err, "failed to flush defines while reverting");
                }
            }
            Err(err) => tracing::warn!(?err, "failed to open project config while reverting"),
        }
        processors.update(|settings| settings.run_module_sync = false);
        if let Err(err) = processors.flush() {
            tracing::warn!(?err, "failed to disarm run request while reverting");
        }
    }
}

fn submodule_descriptor(plugin: OptionalPlugin, plugin_module: &str) -> ModuleDescriptor {
    match plugin {
        OptionalPlugin::Juicebox => ModuleDescriptor::submodule(
            MODULE_UI,
            vec![MODULE_BASE.to_string(), plugin_module.to_string()],
            DEFINE_UI,
        ),
        OptionalPlugin::Scrollworks => ModuleDescriptor::submodule(
            MODULE_UI_SCROLLER,
            vec![
                MODULE_BASE.to_string(),
                MODULE_UI.to_string(),
                plugin_module.to_string(),
            ],
            DEFINE_UI_SCROLLER,
        ),
    }
}
