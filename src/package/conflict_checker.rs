use crate::core::{ModmanError, ModmanResult, Version};
use crate::package::manifest::ModDescriptor;
use crate::package::registry::Registry;
use crate::package::resolver::PlannedFile;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::debug;

/// Checks a prospective install against the runtime library, the registry
/// and the rest of the batch
pub struct ConflictChecker;

impl ConflictChecker {
    /// Fail if the package needs a newer runtime library than the one
    /// installed. A package with a requirement fails when no library is
    /// installed at all.
    pub fn check_runtime(descriptor: &ModDescriptor, installed: Option<Version>) -> ModmanResult<()> {
        let Some(required) = descriptor.required_runtime_version else {
            return Ok(());
        };

        match installed {
            Some(installed) if installed >= required => Ok(()),
            installed => Err(ModmanError::RuntimeVersionTooLow {
                package: descriptor.display_name.clone(),
                required: required.to_string(),
                installed: installed
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "none".to_string()),
            }),
        }
    }

    /// Drop planned files whose destination was already claimed earlier in
    /// the batch or earlier in this package.
    pub fn drop_claimed(planned: Vec<PlannedFile>, claimed: &HashSet<PathBuf>) -> Vec<PlannedFile> {
        let mut seen = HashSet::new();
        planned
            .into_iter()
            .filter(|file| {
                if claimed.contains(&file.destination) {
                    debug!("{} already installed in this batch", file.destination.display());
                    return false;
                }
                if !seen.insert(file.destination.clone()) {
                    debug!("{} declared twice, keeping the first", file.destination.display());
                    return false;
                }
                true
            })
            .collect()
    }

    /// Fail if any destination is owned by a record other than `unique_id`'s.
    pub fn check_collisions(
        descriptor: &ModDescriptor,
        planned: &[PlannedFile],
        registry: &Registry,
    ) -> ModmanResult<()> {
        for file in planned {
            if let Some(owner) = registry.owner_of(&file.destination) {
                if owner.unique_id != descriptor.unique_id {
                    return Err(ModmanError::FileCollision {
                        package: descriptor.display_name.clone(),
                        owner: owner.display_name.clone(),
                        path: file.destination.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
