use std::fs;
use std::path::PathBuf;

use marquee_module_db::{BundleScanConfig, InstalledBundleProvider};
use marquee_sync::{
    EditorPlatformRegistry, LockfileGate, ModuleDescriptor, PlatformRegistry, PlatformSupport,
    ProjectConfig, ProjectLayout, RunOutcome, RunReport, SkipReason, SyncError, Synchronizer,
    TargetGroup, MODULE_UI, MODULE_UI_SCROLLER,
};
use pretty_assertions::assert_eq;
use tempfile::{tempdir, TempDir};

struct TestProject {
    dir: TempDir,
}

impl TestProject {
    fn new() -> Self {
        Self {
            dir: tempdir().unwrap(),
        }
    }

    fn with_runtime() -> Self {
        let project = Self::new();
        project.install_runtime();
        project
    }

    fn layout(&self) -> ProjectLayout {
        ProjectLayout::new(self.dir.path())
    }

    fn install_runtime(&self) {
        self.write_bundle(
            "modules/marquee",
            "marquee-runtime",
            &[("marquee", "EntityController")],
        );
    }

    fn install_plugin(&self, slot: &str, name: &str, namespace: &str) {
        self.write_bundle(&format!("plugins/{slot}"), name, &[(namespace, "Marker")]);
    }

    fn write_bundle(&self, dir: &str, name: &str, types: &[(&str, &str)]) {
        let dir = self.dir.path().join(dir);
        fs::create_dir_all(&dir).unwrap();
        let types: Vec<_> = types
            .iter()
            .map(|(namespace, type_name)| {
                serde_json::json!({ "namespace": namespace, "name": type_name })
            })
            .collect();
        fs::write(
            dir.join("bundle.json"),
            serde_json::json!({ "name": name, "types": types }).to_string(),
        )
        .unwrap();
    }

    fn remove_bundle(&self, dir: &str) {
        fs::remove_dir_all(self.dir.path().join(dir)).unwrap();
    }

    fn sync(&self) -> Synchronizer<InstalledBundleProvider, EditorPlatformRegistry, LockfileGate> {
        let layout = self.layout();
        let provider =
            InstalledBundleProvider::new(BundleScanConfig::for_roots(layout.bundle_roots()));
        let gate = LockfileGate::new(layout.lockfile_path());
        Synchronizer::new(layout, provider, EditorPlatformRegistry::default(), gate)
    }

    fn descriptor_path(&self, module: &str) -> PathBuf {
        self.layout().descriptor_path(module)
    }

    fn config(&self) -> ProjectConfig {
        ProjectConfig::open(self.layout().project_config_path()).unwrap()
    }
}

fn complete(
    sync: &mut Synchronizer<InstalledBundleProvider, EditorPlatformRegistry, LockfileGate>,
) -> RunReport {
    match sync.execute().unwrap() {
        RunOutcome::Completed(report) => report,
        other => panic!("expected a completed pass, got {other:?}"),
    }
}

#[test]
fn fresh_project_with_no_plugins_detects_nothing() {
    let project = TestProject::with_runtime();
    let mut sync = project.sync();

    let report = complete(&mut sync);
    assert!(!report.juicebox.detected);
    assert!(!report.scrollworks.detected);
    assert!(report.descriptors_written.is_empty());
    assert_eq!(report.define_groups_changed, 0);

    assert!(!project.descriptor_path(MODULE_UI).exists());
    assert!(!project.descriptor_path(MODULE_UI_SCROLLER).exists());
    assert!(!project.layout().detection_settings_path().exists());
    assert!(!project.layout().project_config_path().exists());
}

#[test]
fn detecting_juicebox_generates_the_ui_module() {
    let project = TestProject::with_runtime();
    project.install_plugin("juicebox", "juicebox-runtime", "juicebox");
    let mut sync = project.sync();

    let report = complete(&mut sync);
    assert!(report.juicebox.detected);
    assert!(report.juicebox.changed);
    assert_eq!(report.juicebox.module.as_deref(), Some("juicebox-runtime"));
    assert!(!report.scrollworks.detected);

    let raw = fs::read_to_string(project.descriptor_path(MODULE_UI)).unwrap();
    let expected = ModuleDescriptor::submodule(
        MODULE_UI,
        vec!["marquee".to_string(), "juicebox-runtime".to_string()],
        "MARQUEE_UI",
    );
    assert_eq!(raw, expected.to_json().unwrap());
    assert!(!project.descriptor_path(MODULE_UI_SCROLLER).exists());

    let config = project.config();
    for group in TargetGroup::ALL {
        assert!(config.has_define(group, "MARQUEE_UI"));
        assert!(!config.has_define(group, "MARQUEE_UI_SCROLLER"));
    }

    let status = sync.status().unwrap();
    assert!(status.detection.juicebox_detected);
    assert!(status.detection.refresh_pending);
    assert!(status.detection.write_pending);
    assert!(!status.run_requested);
}

#[test]
fn repeated_passes_are_byte_stable() {
    let project = TestProject::with_runtime();
    project.install_plugin("juicebox", "juicebox-runtime", "juicebox");
    project.install_plugin("scrollworks", "scrollworks-runtime", "scrollworks");
    let mut sync = project.sync();
    complete(&mut sync);

    let descriptor_before = fs::read(project.descriptor_path(MODULE_UI)).unwrap();
    let scroller_before = fs::read(project.descriptor_path(MODULE_UI_SCROLLER)).unwrap();
    let config_before = fs::read(project.layout().project_config_path()).unwrap();
    let detection_before = fs::read(project.layout().detection_settings_path()).unwrap();

    sync.request_run().unwrap();
    let report = complete(&mut sync);
    assert!(report.descriptors_written.is_empty());
    assert!(report.descriptors_removed.is_empty());
    assert_eq!(report.define_groups_changed, 0);

    assert_eq!(
        fs::read(project.descriptor_path(MODULE_UI)).unwrap(),
        descriptor_before
    );
    assert_eq!(
        fs::read(project.descriptor_path(MODULE_UI_SCROLLER)).unwrap(),
        scroller_before
    );
    assert_eq!(
        fs::read(project.layout().project_config_path()).unwrap(),
        config_before
    );
    assert_eq!(
        fs::read(project.layout().detection_settings_path()).unwrap(),
        detection_before
    );
}

#[test]
fn unloading_scrollworks_removes_its_module_and_define() {
    let project = TestProject::with_runtime();
    project.install_plugin("juicebox", "juicebox-runtime", "juicebox");
    project.install_plugin("scrollworks", "scrollworks-runtime", "scrollworks");
    let mut sync = project.sync();
    complete(&mut sync);
    assert!(project.descriptor_path(MODULE_UI_SCROLLER).exists());
    let ui_descriptor = fs::read(project.descriptor_path(MODULE_UI)).unwrap();

    project.remove_bundle("plugins/scrollworks");
    sync.request_run().unwrap();
    let report = complete(&mut sync);
    assert!(!report.scrollworks.detected);
    assert!(report.scrollworks.changed);
    assert_eq!(report.descriptors_removed.len(), 1);

    assert!(!project.descriptor_path(MODULE_UI_SCROLLER).exists());
    assert_eq!(
        fs::read(project.descriptor_path(MODULE_UI)).unwrap(),
        ui_descriptor
    );

    let config = project.config();
    for group in TargetGroup::ALL {
        assert!(config.has_define(group, "MARQUEE_UI"));
        assert!(!config.has_define(group, "MARQUEE_UI_SCROLLER"));
    }
}

#[test]
fn missing_runtime_reverts_defines_and_disarms_the_request() {
    let project = TestProject::with_runtime();
    project.install_plugin("juicebox", "juicebox-runtime", "juicebox");
    let mut sync = project.sync();
    complete(&mut sync);
    assert!(project.config().has_define(TargetGroup::Standalone, "MARQUEE_UI"));

    project.remove_bundle("modules/marquee");
    sync.request_run().unwrap();
    let err = sync.execute().unwrap_err();
    assert!(matches!(err, SyncError::MandatoryModuleMissing));
    assert!(err.to_string().contains("runtime module"));

    let config = project.config();
    for group in TargetGroup::ALL {
        assert!(!config.has_define(group, "MARQUEE_UI"));
        assert!(!config.has_define(group, "MARQUEE_UI_SCROLLER"));
    }
    let status = sync.status().unwrap();
    assert!(!status.run_requested);
}

#[test]
fn busy_host_defers_and_keeps_the_request() {
    let project = TestProject::with_runtime();
    let lock = project.layout().lockfile_path();
    fs::create_dir_all(lock.parent().unwrap()).unwrap();
    fs::write(&lock, "").unwrap();

    let mut sync = project.sync();
    match sync.execute().unwrap() {
        RunOutcome::Skipped(SkipReason::HostBusy) => {}
        other => panic!("expected a busy skip, got {other:?}"),
    }
    let status = sync.status().unwrap();
    assert!(status.run_requested);

    fs::remove_file(&lock).unwrap();
    complete(&mut sync);
}

#[test]
fn consumed_requests_do_not_rerun() {
    let project = TestProject::with_runtime();
    let mut sync = project.sync();
    complete(&mut sync);

    match sync.execute().unwrap() {
        RunOutcome::Skipped(SkipReason::NotRequested) => {}
        other => panic!("expected a skip, got {other:?}"),
    }
}

#[test]
fn outcome_is_independent_of_scan_order() {
    let first = TestProject::with_runtime();
    first.install_plugin("aaa-juicebox", "juicebox-runtime", "juicebox");
    first.install_plugin("zzz-scrollworks", "scrollworks-runtime", "scrollworks");
    let second = TestProject::with_runtime();
    second.install_plugin("zzz-juicebox", "juicebox-runtime", "juicebox");
    second.install_plugin("aaa-scrollworks", "scrollworks-runtime", "scrollworks");

    complete(&mut first.sync());
    complete(&mut second.sync());

    for module in [MODULE_UI, MODULE_UI_SCROLLER] {
        assert_eq!(
            fs::read(first.descriptor_path(module)).unwrap(),
            fs::read(second.descriptor_path(module)).unwrap()
        );
    }
    assert_eq!(
        fs::read(first.layout().project_config_path()).unwrap(),
        fs::read(second.layout().project_config_path()).unwrap()
    );
}

#[test]
fn partial_manifests_still_count_for_detection() {
    let project = TestProject::with_runtime();
    let dir = project.dir.path().join("plugins/juicebox");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("bundle.json"),
        serde_json::json!({
            "name": "juicebox-runtime",
            "types": [
                { "namespace": "juicebox", "name": "Tween" },
                { "namespace": 42 }
            ]
        })
        .to_string(),
    )
    .unwrap();

    let report = complete(&mut project.sync());
    assert!(report.juicebox.detected);
    assert!(project.descriptor_path(MODULE_UI).exists());
}

#[test]
fn existing_defines_keep_their_order_on_removal() {
    let project = TestProject::with_runtime();
    let config_path = project.layout().project_config_path();
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(
        &config_path,
        serde_json::json!({
            "scripting_defines": { "standalone": "ALPHA;MARQUEE_UI;BETA" }
        })
        .to_string(),
    )
    .unwrap();

    let report = complete(&mut project.sync());
    assert_eq!(report.define_groups_changed, 1);

    let config = project.config();
    assert_eq!(config.defines(TargetGroup::Standalone), "ALPHA;BETA");
}

#[test]
fn unsupported_groups_are_left_alone() {
    struct NoConsoles;
    impl PlatformRegistry for NoConsoles {
        fn support(&self, group: TargetGroup) -> PlatformSupport {
            match group {
                TargetGroup::Switch => PlatformSupport::Unsupported,
                _ => PlatformSupport::Supported,
            }
        }
    }

    let project = TestProject::with_runtime();
    project.install_plugin("juicebox", "juicebox-runtime", "juicebox");
    let layout = project.layout();
    let provider =
        InstalledBundleProvider::new(BundleScanConfig::for_roots(layout.bundle_roots()));
    let gate = LockfileGate::new(layout.lockfile_path());
    let mut sync = Synchronizer::new(layout, provider, NoConsoles, gate);

    match sync.execute().unwrap() {
        RunOutcome::Completed(report) => assert_eq!(report.define_groups_changed, 5),
        other => panic!("expected a completed pass, got {other:?}"),
    }
    let config = project.config();
    assert!(config.has_define(TargetGroup::Standalone, "MARQUEE_UI"));
    assert!(!config.has_define(TargetGroup::Switch, "MARQUEE_UI"));
}
