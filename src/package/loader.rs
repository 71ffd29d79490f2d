//! Turns a package path into a descriptor plus a handle to its bytes

use crate::core::{ModmanError, ModmanResult};
use crate::di::traits::{ArchiveReader, PackageContainer};
use crate::package::manifest::{
    parse_manifest, AdvisoryFlags, EntryKind, FileEntry, ModDescriptor, TargetGame,
    MANIFEST_FILE_NAME,
};
use crate::package::registry::SourceKind;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Package type, decided by the lower-cased file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageType {
    /// `.sporemod` zip container
    ModArchive,
    /// Bare `.package` data file
    SingleFile,
}

impl PackageType {
    pub fn from_path(path: &Path) -> ModmanResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "sporemod" => Ok(PackageType::ModArchive),
            "package" => Ok(PackageType::SingleFile),
            _ => Err(ModmanError::UnsupportedPackageType(path.display().to_string())),
        }
    }
}

enum Payload {
    Container(Box<dyn PackageContainer>),
    File(PathBuf),
}

/// A validated package ready to be installed
pub struct LoadedPackage {
    pub path: PathBuf,
    pub descriptor: ModDescriptor,
    payload: Payload,
}

impl LoadedPackage {
    /// Read the bytes of one of this package's entries
    pub fn read(&mut self, entry: &FileEntry) -> ModmanResult<Vec<u8>> {
        match &mut self.payload {
            Payload::Container(container) => container.read_entry(&entry.archive_path),
            Payload::File(path) => Ok(fs::read(path)?),
        }
    }
}

/// Loads packages through an [`ArchiveReader`]
pub struct PackageLoader<'a> {
    reader: &'a dyn ArchiveReader,
}

impl<'a> PackageLoader<'a> {
    pub fn new(reader: &'a dyn ArchiveReader) -> Self {
        Self { reader }
    }

    /// Parse and validate the package at `path`.
    ///
    /// Every file the manifest declares must exist in the container.
    pub fn load(&self, path: &Path) -> ModmanResult<LoadedPackage> {
        let package_type = PackageType::from_path(path)?;

        if !path.is_file() {
            return Err(ModmanError::Path(format!(
                "{} is not a regular file",
                path.display()
            )));
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        match package_type {
            PackageType::SingleFile => {
                let file_name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or_default()
                    .to_string();
                Ok(LoadedPackage {
                    path: path.to_path_buf(),
                    descriptor: single_file_descriptor(&stem, &file_name),
                    payload: Payload::File(path.to_path_buf()),
                })
            }
            PackageType::ModArchive => {
                let mut container = self.reader.open_container(path)?;
                let descriptor = match container.find_entry(MANIFEST_FILE_NAME) {
                    Some(manifest_name) => {
                        let bytes = container.read_entry(&manifest_name)?;
                        let descriptor = parse_manifest(&bytes)?;
                        verify_entries(&descriptor, container.as_ref())?;
                        descriptor
                    }
                    None => {
                        debug!("{} has no {}, treating as legacy archive", path.display(), MANIFEST_FILE_NAME);
                        legacy_descriptor(&stem, &container.entries())
                    }
                };

                Ok(LoadedPackage {
                    path: path.to_path_buf(),
                    descriptor,
                    payload: Payload::Container(container),
                })
            }
        }
    }
}

fn verify_entries(descriptor: &ModDescriptor, container: &dyn PackageContainer) -> ModmanResult<()> {
    for entry in &descriptor.entries {
        if container.find_entry(&entry.archive_path).is_none() {
            return Err(ModmanError::MissingEntryFile {
                package: descriptor.display_name.clone(),
                file: entry.archive_path.clone(),
            });
        }
    }
    Ok(())
}

/// Descriptor for a container without a manifest. `.dll` files go to the
/// library directory, `.package` files to the expansion data directory and
/// everything else is ignored.
pub fn legacy_descriptor(stem: &str, entries: &[String]) -> ModDescriptor {
    let files = entries
        .iter()
        .filter_map(|name| {
            let extension = Path::new(name)
                .extension()
                .and_then(|e| e.to_str())
                .map(str::to_ascii_lowercase)?;
            let target_game = match extension.as_str() {
                "dll" => TargetGame::Unspecified,
                "package" => TargetGame::Expansion,
                _ => return None,
            };
            Some(FileEntry {
                archive_path: name.clone(),
                target_game,
                kind: EntryKind::LegacyFile,
            })
        })
        .collect();

    ModDescriptor {
        unique_id: stem.to_string(),
        display_name: stem.to_string(),
        description: None,
        required_runtime_version: None,
        has_custom_installer: true,
        flags: AdvisoryFlags::default(),
        source_kind: SourceKind::Archive,
        entries: files,
    }
}

fn single_file_descriptor(stem: &str, file_name: &str) -> ModDescriptor {
    ModDescriptor {
        unique_id: stem.to_string(),
        display_name: stem.to_string(),
        description: None,
        required_runtime_version: None,
        has_custom_installer: true,
        flags: AdvisoryFlags::default(),
        source_kind: SourceKind::SingleFile,
        entries: vec![FileEntry {
            archive_path: file_name.to_string(),
            target_game: TargetGame::Expansion,
            kind: EntryKind::SingleFilePackage,
        }],
    }
}
