//! Mock implementations of service traits for testing

use super::traits::{ArchiveReader, PackageContainer, RegistryStore, RuntimeFetcher, VersionProbe};
use crate::core::{ModmanError, ModmanResult, Version};
use crate::package::registry::Registry;
use crate::runtime::RuntimeUpdate;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

type Files = Vec<(String, Vec<u8>)>;

/// In-memory archive reader
///
/// # Example
///
/// ```
/// use modman::di::mocks::MockArchiveReader;
/// use modman::di::ArchiveReader;
/// use std::path::Path;
///
/// let reader = MockArchiveReader::new();
/// reader.add_container(Path::new("/mods/a.sporemod"), vec![("a.dll", b"MZ".to_vec())]);
///
/// let container = reader.open_container(Path::new("/mods/a.sporemod")).unwrap();
/// assert_eq!(container.entries(), vec!["a.dll".to_string()]);
/// ```
#[derive(Clone, Default)]
pub struct MockArchiveReader {
    /// `None` marks a file that is not a container
    containers: Arc<Mutex<HashMap<PathBuf, Option<Files>>>>,
}

impl MockArchiveReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_container(&self, path: &Path, files: Vec<(&str, Vec<u8>)>) {
        let files = files
            .into_iter()
            .map(|(name, data)| (name.to_string(), data))
            .collect();
        self.containers
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), Some(files));
    }

    pub fn add_corrupt(&self, path: &Path) {
        self.containers
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), None);
    }
}

impl ArchiveReader for MockArchiveReader {
    fn open_container(&self, path: &Path) -> ModmanResult<Box<dyn PackageContainer>> {
        match self.containers.lock().unwrap().get(path) {
            Some(Some(files)) => Ok(Box::new(MockContainer {
                files: files.clone(),
            })),
            Some(None) => Err(ModmanError::CorruptPackage {
                path: path.to_path_buf(),
                reason: "mock corrupt container".to_string(),
            }),
            None => Err(ModmanError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no mock container for {}", path.display()),
            ))),
        }
    }
}

/// Container backed by a list of in-memory files
pub struct MockContainer {
    files: Files,
}

impl PackageContainer for MockContainer {
    fn entries(&self) -> Vec<String> {
        self.files.iter().map(|(name, _)| name.clone()).collect()
    }

    fn read_entry(&mut self, archive_path: &str) -> ModmanResult<Vec<u8>> {
        self.files
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(archive_path))
            .map(|(_, data)| data.clone())
            .ok_or_else(|| ModmanError::MissingEntryFile {
                package: "mock".to_string(),
                file: archive_path.to_string(),
            })
    }
}

/// Version probe returning a fixed answer
#[derive(Clone)]
pub struct MockVersionProbe {
    pub version: Option<Version>,
    calls: Arc<Mutex<usize>>,
}

impl MockVersionProbe {
    /// No runtime library installed
    pub fn absent() -> Self {
        Self {
            version: None,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_version(version: Version) -> Self {
        Self {
            version: Some(version),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl VersionProbe for MockVersionProbe {
    fn installed_runtime_version(&self, _library_path: &Path) -> ModmanResult<Option<Version>> {
        *self.calls.lock().unwrap() += 1;
        Ok(self.version)
    }
}

/// Runtime fetcher returning a canned outcome
#[derive(Clone)]
pub struct MockRuntimeFetcher {
    outcome: Result<RuntimeUpdate, String>,
    requested: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockRuntimeFetcher {
    /// Reports the installed library as already current
    pub fn new() -> Self {
        Self::with_outcome(RuntimeUpdate::Unchanged(Version::new(1, 0, 0)))
    }

    pub fn with_outcome(outcome: RuntimeUpdate) -> Self {
        Self {
            outcome: Ok(outcome),
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Library paths passed to `fetch_latest_runtime`, in call order
    pub fn requested(&self) -> Vec<PathBuf> {
        self.requested.lock().unwrap().clone()
    }
}

impl Default for MockRuntimeFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RuntimeFetcher for MockRuntimeFetcher {
    async fn fetch_latest_runtime(&self, library_path: &Path) -> ModmanResult<RuntimeUpdate> {
        self.requested
            .lock()
            .unwrap()
            .push(library_path.to_path_buf());
        self.outcome.clone().map_err(ModmanError::RuntimeUpdate)
    }
}

/// Registry store kept in memory
#[derive(Clone, Default)]
pub struct MockRegistryStore {
    registry: Arc<Mutex<Registry>>,
    saves: Arc<Mutex<usize>>,
    fail_saves: bool,
}

impl MockRegistryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: Registry) -> Self {
        Self {
            registry: Arc::new(Mutex::new(registry)),
            ..Self::default()
        }
    }

    /// Every `save` fails with `RegistryIo`
    pub fn failing_saves() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    /// The last saved registry (or the initial one)
    pub fn saved(&self) -> Registry {
        self.registry.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }
}

impl RegistryStore for MockRegistryStore {
    fn load(&self) -> ModmanResult<Registry> {
        Ok(self.registry.lock().unwrap().clone())
    }

    fn save(&self, registry: &Registry) -> ModmanResult<()> {
        if self.fail_saves {
            return Err(ModmanError::RegistryIo("mock save failure".to_string()));
        }
        *self.registry.lock().unwrap() = registry.clone();
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}
