//! Service container for dependency injection

use super::traits::{ArchiveReader, RegistryStore, RuntimeFetcher, VersionProbe};
use crate::config::{Config, Directories};
use crate::core::ModmanResult;
use crate::package::extractor::ZipArchiveReader;
use crate::package::registry::YamlRegistryStore;
use crate::runtime::fetcher::HttpRuntimeFetcher;
use crate::runtime::probe::FileVersionProbe;
use std::path::Path;
use std::sync::Arc;

/// Holds the collaborators and directories one command runs against.
///
/// Production code builds it with [`ServiceContainer::new`]; tests inject
/// doubles through [`ServiceContainer::with_providers`].
#[derive(Clone)]
pub struct ServiceContainer {
    pub directories: Directories,
    pub archive_reader: Arc<dyn ArchiveReader>,
    pub version_probe: Arc<dyn VersionProbe>,
    pub runtime_fetcher: Arc<dyn RuntimeFetcher>,
    pub registry_store: Arc<dyn RegistryStore>,
}

impl ServiceContainer {
    /// Create a service container with production implementations
    ///
    /// `config_path` is the file the config was loaded from; the registry
    /// defaults to a file beside it.
    ///
    /// # Errors
    ///
    /// Returns an error if the directories cannot be resolved or the HTTP
    /// client cannot be built.
    pub fn new(config: &Config, config_path: &Path) -> ModmanResult<Self> {
        Ok(Self {
            directories: config.directories()?,
            archive_reader: Arc::new(ZipArchiveReader::new()),
            version_probe: Arc::new(FileVersionProbe::new()),
            runtime_fetcher: Arc::new(HttpRuntimeFetcher::new(
                &config.runtime_update_url,
                &config.runtime_archive_entry,
            )?),
            registry_store: Arc::new(YamlRegistryStore::new(config.registry_file(config_path))),
        })
    }

    /// Create a service container with custom provider implementations
    pub fn with_providers(
        directories: Directories,
        archive_reader: Arc<dyn ArchiveReader>,
        version_probe: Arc<dyn VersionProbe>,
        runtime_fetcher: Arc<dyn RuntimeFetcher>,
        registry_store: Arc<dyn RegistryStore>,
    ) -> Self {
        Self {
            directories,
            archive_reader,
            version_probe,
            runtime_fetcher,
            registry_store,
        }
    }
}
