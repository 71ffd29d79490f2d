use crate::core::ModmanResult;
use crate::package::registry::remove_file_best_effort;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A destination written by the current package, and where the file it
/// replaced was moved to
#[derive(Debug)]
struct Written {
    path: PathBuf,
    backup: Option<PathBuf>,
}

/// Tracks the files one package has written so a failed install can remove
/// them again. Files already present at a destination are moved aside and
/// restored on rollback.
#[derive(Debug, Default)]
pub struct RollbackManager {
    written: Vec<Written>,
}

impl RollbackManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a destination before writing to it, moving any existing file
    /// out of the way
    pub fn track(&mut self, path: &Path) -> ModmanResult<()> {
        let backup = if path.is_file() {
            let backup = backup_path(path);
            fs::rename(path, &backup)?;
            debug!("Backed up {} to {}", path.display(), backup.display());
            Some(backup)
        } else {
            None
        };

        self.written.push(Written {
            path: path.to_path_buf(),
            backup,
        });
        Ok(())
    }

    pub fn has_backup(&self) -> bool {
        !self.written.is_empty()
    }

    /// Keep the written files and drop the backups
    pub fn commit(&mut self) {
        for written in self.written.drain(..) {
            if let Some(backup) = written.backup {
                remove_file_best_effort(&backup);
            }
        }
    }

    /// Remove every tracked file and restore what it replaced, newest first
    pub fn rollback(&mut self) {
        for written in self.written.drain(..).rev() {
            remove_file_best_effort(&written.path);
            if let Some(backup) = written.backup {
                if let Err(e) = fs::rename(&backup, &written.path) {
                    warn!(
                        "Failed to restore {} from {}: {}",
                        written.path.display(),
                        backup.display(),
                        e
                    );
                }
            }
        }
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".modman-backup");
    path.with_file_name(name)
}

/// Run `f`, undoing whatever it tracked if it fails
pub fn with_rollback<F, T>(f: F) -> ModmanResult<T>
where
    F: FnOnce(&mut RollbackManager) -> ModmanResult<T>,
{
    let mut rollback = RollbackManager::new();
    match f(&mut rollback) {
        Ok(result) => {
            rollback.commit();
            Ok(result)
        }
        Err(e) => {
            if rollback.has_backup() {
                warn!("Install failed, removing partially written files");
                rollback.rollback();
            }
            Err(e)
        }
    }
}
