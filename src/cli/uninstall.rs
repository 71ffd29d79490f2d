use crate::cli::{GlobalOptions, Session};
use modman::core::ModmanResult;
use modman::package::uninstaller::Uninstaller;

pub fn run(options: &GlobalOptions, ids: Vec<String>) -> ModmanResult<()> {
    let session = Session::open(options, true)?;
    let store = session.services.registry_store.as_ref();
    let mut registry = store.load()?;

    Uninstaller::new(&mut registry, store).uninstall(&ids)?;
    Ok(())
}
