//! The installed-mods registry
//!
//! Records are addressed by their current position. Removing a record
//! renumbers every record after it; positions are only meaningful within
//! one invocation.

use crate::core::path::ensure_dir;
use crate::core::{ModmanError, ModmanResult};
use crate::di::traits::RegistryStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// On-disk format version of the registry file
pub const REGISTRY_FORMAT_VERSION: u32 = 1;

/// How the installed package was shipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Container with a `modinfo.xml` manifest
    Package,
    /// Container without a manifest
    Archive,
    /// A bare `.package` file
    SingleFile,
}

/// One installed mod and every file it placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstalledRecord {
    pub unique_id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub source_kind: SourceKind,
    #[serde(default)]
    pub installed_paths: BTreeSet<PathBuf>,
    pub installed_at: DateTime<Utc>,
}

/// Ordered collection of installed records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    records: Vec<InstalledRecord>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<InstalledRecord>) -> Self {
        Self { records }
    }

    pub fn list(&self) -> &[InstalledRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&InstalledRecord> {
        self.records.get(position)
    }

    pub fn append(&mut self, record: InstalledRecord) {
        self.records.push(record);
    }

    /// Position of the record with the given unique id
    pub fn position_of(&self, unique_id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.unique_id == unique_id)
    }

    /// The record owning `path`, if any
    pub fn owner_of(&self, path: &Path) -> Option<&InstalledRecord> {
        self.records
            .iter()
            .find(|r| r.installed_paths.contains(path))
    }

    /// Remove the record at `position` and delete its files.
    ///
    /// File deletion is best-effort: a missing file is ignored and any other
    /// failure is logged. Later records move down one position.
    pub fn remove_at(&mut self, position: usize) -> ModmanResult<InstalledRecord> {
        if position >= self.records.len() {
            return Err(ModmanError::InvalidRange(format!(
                "{} is not a valid id ({} mods installed)",
                position,
                self.records.len()
            )));
        }

        let record = self.records.remove(position);
        for path in &record.installed_paths {
            remove_file_best_effort(path);
        }
        Ok(record)
    }

    /// Drop the most recently appended record without touching its files.
    pub(crate) fn take_last(&mut self) -> Option<InstalledRecord> {
        self.records.pop()
    }
}

pub(crate) fn remove_file_best_effort(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => debug!("Removed {}", path.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("Already gone: {}", path.display())
        }
        Err(e) => warn!("Failed to remove {}: {}", path.display(), e),
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct RegistryFile {
    version: u32,
    #[serde(default)]
    mods: Vec<InstalledRecord>,
}

/// Registry persisted as a YAML file.
pub struct YamlRegistryStore {
    path: PathBuf,
}

impl YamlRegistryStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl RegistryStore for YamlRegistryStore {
    fn load(&self) -> ModmanResult<Registry> {
        if !self.path.exists() {
            return Ok(Registry::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            ModmanError::RegistryIo(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        if content.trim().is_empty() {
            return Ok(Registry::new());
        }

        let file: RegistryFile = serde_yaml::from_str(&content).map_err(|e| {
            ModmanError::RegistryIo(format!("Failed to parse {}: {}", self.path.display(), e))
        })?;
        if file.version != REGISTRY_FORMAT_VERSION {
            return Err(ModmanError::RegistryIo(format!(
                "Unsupported registry version {} in {}",
                file.version,
                self.path.display()
            )));
        }

        Ok(Registry::from_records(file.mods))
    }

    fn save(&self, registry: &Registry) -> ModmanResult<()> {
        let io_err = |e: std::io::Error| {
            ModmanError::RegistryIo(format!("Failed to write {}: {}", self.path.display(), e))
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                ensure_dir(parent).map_err(|e| ModmanError::RegistryIo(e.to_string()))?;
            }
        }

        let file = RegistryFile {
            version: REGISTRY_FORMAT_VERSION,
            mods: registry.list().to_vec(),
        };
        let content = serde_yaml::to_string(&file)
            .map_err(|e| ModmanError::RegistryIo(format!("Failed to serialize registry: {}", e)))?;

        // Write beside the target and rename over it
        let tmp = self.path.with_extension("yaml.tmp");
        fs::write(&tmp, content).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        debug!("Saved registry ({} mods) to {}", registry.len(), self.path.display());
        Ok(())
    }
}
