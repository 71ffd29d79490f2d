use crate::core::{ModmanError, ModmanResult};
use crate::di::traits::{ArchiveReader, PackageContainer};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// Largest entry a package may contain, uncompressed
pub const MAX_ENTRY_SIZE: u64 = 1024 * 1024 * 1024;

/// Opens `.sporemod` packages as zip archives
#[derive(Debug, Clone)]
pub struct ZipArchiveReader {
    max_entry_size: u64,
}

impl ZipArchiveReader {
    pub fn new() -> Self {
        Self::with_max_entry_size(MAX_ENTRY_SIZE)
    }

    pub fn with_max_entry_size(max_entry_size: u64) -> Self {
        Self { max_entry_size }
    }
}

impl Default for ZipArchiveReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveReader for ZipArchiveReader {
    fn open_container(&self, path: &Path) -> ModmanResult<Box<dyn PackageContainer>> {
        let file = File::open(path)?;
        let corrupt = |e: zip::result::ZipError| ModmanError::CorruptPackage {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };
        let mut archive = ZipArchive::new(file).map_err(corrupt)?;

        let mut names = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let entry = archive.by_index(i).map_err(corrupt)?;
            if !entry.is_dir() {
                names.push(entry.name().to_string());
            }
        }

        Ok(Box::new(ZipContainer {
            path: path.to_path_buf(),
            archive,
            names,
            max_entry_size: self.max_entry_size,
        }))
    }
}

/// An opened zip package
pub struct ZipContainer {
    path: PathBuf,
    archive: ZipArchive<File>,
    names: Vec<String>,
    max_entry_size: u64,
}

impl PackageContainer for ZipContainer {
    fn entries(&self) -> Vec<String> {
        self.names.clone()
    }

    fn read_entry(&mut self, archive_path: &str) -> ModmanResult<Vec<u8>> {
        let name = self.find_entry(archive_path).ok_or_else(|| ModmanError::MissingEntryFile {
            package: self.path.display().to_string(),
            file: archive_path.to_string(),
        })?;

        let corrupt = |e: &dyn std::fmt::Display| ModmanError::CorruptPackage {
            path: self.path.clone(),
            reason: format!("{}: {}", name, e),
        };

        let limit = self.max_entry_size;
        let too_large = || corrupt(&format!("larger than {} bytes", limit));

        let entry = self.archive.by_name(&name).map_err(|e| corrupt(&e))?;
        // The header size is untrusted: cap both the check and the read
        if entry.size() > limit {
            return Err(too_large());
        }
        let mut data = Vec::new();
        entry
            .take(limit + 1)
            .read_to_end(&mut data)
            .map_err(|e| corrupt(&e))?;
        if data.len() as u64 > limit {
            return Err(too_large());
        }
        Ok(data)
    }
}
