use crate::cli::{GlobalOptions, Session};
use modman::core::ModmanResult;
use modman::package::installer::{BatchInstaller, BatchReport, InstallMode};
use std::path::PathBuf;

pub fn run(
    options: &GlobalOptions,
    paths: Vec<PathBuf>,
    needed: bool,
    update_needed: bool,
) -> ModmanResult<()> {
    let mode = match (needed, update_needed) {
        (_, true) => InstallMode::UpdateOrInstall,
        (true, false) => InstallMode::IfMissing,
        (false, false) => InstallMode::Strict,
    };

    let session = Session::open(options, true)?;
    let mut registry = session.services.registry_store.load()?;

    let report = BatchInstaller::from_services(&session.services, &mut registry).install(&paths, mode);
    finish(report, "install")
}

/// Print the failing package, if any, and turn the report into a result
pub(crate) fn finish(report: BatchReport, verb: &str) -> ModmanResult<()> {
    if let Some((path, _)) = &report.failure {
        eprintln!("Failed to {} {}", verb, path.display());
    } else if report.committed() > 0 {
        println!("\n✓ Done: {} package(s) written", report.committed());
    }
    report.into_result().map(|_| ())
}
