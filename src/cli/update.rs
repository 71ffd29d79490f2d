use crate::cli::install::finish;
use crate::cli::{GlobalOptions, Session};
use modman::core::ModmanResult;
use modman::package::installer::BatchInstaller;
use std::path::PathBuf;

pub fn run(options: &GlobalOptions, paths: Vec<PathBuf>) -> ModmanResult<()> {
    let session = Session::open(options, true)?;
    let mut registry = session.services.registry_store.load()?;

    let report = BatchInstaller::from_services(&session.services, &mut registry).update(&paths);
    finish(report, "update")
}
