//! Trait definitions for dependency injection

use crate::core::{ModmanResult, Version};
use crate::package::registry::Registry;
use crate::runtime::RuntimeUpdate;
use async_trait::async_trait;
use std::path::Path;

/// An opened package container (a `.sporemod` archive).
pub trait PackageContainer: Send {
    /// Names of every file entry, in archive order. Directory entries are
    /// not listed.
    fn entries(&self) -> Vec<String>;

    /// Read one entry. Lookup is case-insensitive on the full archive path.
    fn read_entry(&mut self, archive_path: &str) -> ModmanResult<Vec<u8>>;

    /// Find the stored name of an entry, ignoring case.
    fn find_entry(&self, archive_path: &str) -> Option<String> {
        self.entries()
            .into_iter()
            .find(|name| name.eq_ignore_ascii_case(archive_path))
    }
}

/// Trait for opening package containers
///
/// Implementations must report a file that is not a container at all as
/// `ModmanError::CorruptPackage`.
pub trait ArchiveReader: Send + Sync {
    fn open_container(&self, path: &Path) -> ModmanResult<Box<dyn PackageContainer>>;
}

/// Trait for reading the installed runtime library's version
pub trait VersionProbe: Send + Sync {
    /// Returns `Ok(None)` when no library is installed at `library_path`.
    fn installed_runtime_version(&self, library_path: &Path) -> ModmanResult<Option<Version>>;
}

/// Trait for fetching the latest runtime library
///
/// A failed fetch is the `Err` arm; the installed library is left untouched.
#[async_trait]
pub trait RuntimeFetcher: Send + Sync {
    async fn fetch_latest_runtime(&self, library_path: &Path) -> ModmanResult<RuntimeUpdate>;
}

/// Trait for durable registry storage, loaded and saved as a unit
pub trait RegistryStore: Send + Sync {
    /// Load the registry. A store with no persisted state loads as empty.
    fn load(&self) -> ModmanResult<Registry>;

    fn save(&self, registry: &Registry) -> ModmanResult<()>;
}
