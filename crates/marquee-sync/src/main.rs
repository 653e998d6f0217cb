use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use marquee_module_db::{BundleScanConfig, InstalledBundleProvider, ModuleProvider};
use marquee_sync::{
    EditorPlatformRegistry, HostGate, LockfileGate, PlatformRegistry, ProjectLayout, RunOutcome,
    SkipReason, Synchronizer,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "marquee-sync",
    about = "Module and define synchronization for Marquee host projects"
)]
struct Args {
    /// Host project directory.
    #[arg(long, default_value = ".")]
    project: PathBuf,

    /// Additional roots to scan for installed bundles.
    #[arg(long = "scan-root", value_name = "PATH")]
    scan_roots: Vec<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the persisted detection state and pending work.
    Status,
    /// Arm a run request and execute a pass immediately.
    Run,
    /// Execute a pass only if a request is already pending.
    Startup,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .ok();

    let args = Args::parse();
    let layout = ProjectLayout::new(&args.project);
    let mut roots = layout.bundle_roots();
    roots.extend(args.scan_roots.iter().cloned());
    let provider = InstalledBundleProvider::new(BundleScanConfig::for_roots(roots));
    let gate = LockfileGate::new(layout.lockfile_path());
    let mut sync = Synchronizer::new(layout, provider, EditorPlatformRegistry::default(), gate);

    match args.command {
        Command::Status => print_status(&sync),
        Command::Run => {
            sync.request_run().context("failed to arm the run request")?;
            run_pass(&mut sync)
        }
        Command::Startup => run_pass(&mut sync),
    }
}

fn print_status<P, R, G>(sync: &Synchronizer<P, R, G>) -> Result<()>
where
    P: ModuleProvider,
    R: PlatformRegistry,
    G: HostGate,
{
    let status = sync.status().context("failed to read sync state")?;
    println!("Juicebox: {}", presence(status.detection.juicebox_detected));
    println!(
        "Scrollworks: {}",
        presence(status.detection.scrollworks_detected)
    );
    println!(
        "Run requested: {}",
        if status.run_requested { "yes" } else { "no" }
    );
    println!(
        "Host reload pending: {}",
        if status.detection.refresh_pending {
            "yes"
        } else {
            "no"
        }
    );
    Ok(())
}

fn run_pass<P, R, G>(sync: &mut Synchronizer<P, R, G>) -> Result<()>
where
    P: ModuleProvider,
    R: PlatformRegistry,
    G: HostGate,
{
    match sync.execute().context("module sync failed")? {
        RunOutcome::Skipped(SkipReason::HostBusy) => {
            println!("Skipped: the host is busy.");
        }
        RunOutcome::Skipped(SkipReason::NotRequested) => {
            println!("Nothing to do: no run request is pending.");
        }
        RunOutcome::Completed(report) => {
            println!("Juicebox: {}", presence(report.juicebox.detected));
            println!("Scrollworks: {}", presence(report.scrollworks.detected));
            for path in &report.descriptors_written {
                println!("  Wrote {}", path.display());
            }
            for path in &report.descriptors_removed {
                println!("  Removed {}", path.display());
            }
            if report.define_groups_changed > 0 {
                println!(
                    "  Updated defines in {} target groups",
                    report.define_groups_changed
                );
            }
            let reload_owed = sync
                .acknowledge_host_refresh()
                .context("failed to acknowledge the pass")?;
            if reload_owed {
                println!("Reload the host scripts to pick up the module changes.");
            }
        }
    }
    Ok(())
}

fn presence(detected: bool) -> &'static str {
    if detected {
        "detected"
    } else {
        "not detected"
    }
}
