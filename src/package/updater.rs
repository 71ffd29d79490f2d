//! Releasing an installed record ahead of reinstalling the same mod

use crate::core::{ModmanError, ModmanResult};
use crate::di::traits::RegistryStore;
use crate::package::registry::{InstalledRecord, Registry};

/// Remove the record for `unique_id`, delete its files and save.
///
/// Fails with `NotInstalled` when no record has that id. The record stays
/// removed even if the following install fails.
pub fn release_installed(
    registry: &mut Registry,
    store: &dyn RegistryStore,
    unique_id: &str,
) -> ModmanResult<InstalledRecord> {
    let position = registry
        .position_of(unique_id)
        .ok_or_else(|| ModmanError::NotInstalled(unique_id.to_string()))?;

    let record = registry.remove_at(position)?;
    println!("-> Removing {}", record.display_name);
    store.save(registry)?;
    Ok(record)
}
