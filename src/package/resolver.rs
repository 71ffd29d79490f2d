//! Decides, per file entry, whether and where it gets installed

use crate::config::Directories;
use crate::package::manifest::{DataGame, EntryKind, FileEntry, ModDescriptor, TargetGame};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Optional component not selected by default
    NotSelected,
    /// A compatibility entry whose target file is not installed
    MissingRedirectTarget(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Install to this full destination path
    Install(PathBuf),
    Skip(SkipReason),
}

/// An entry resolved to `Install`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub entry: FileEntry,
    pub destination: PathBuf,
}

fn data_dir(dirs: &Directories, game: DataGame) -> &Path {
    match game {
        DataGame::Base => &dirs.base_data_dir,
        DataGame::Expansion => &dirs.expansion_data_dir,
    }
}

fn target_dir(dirs: &Directories, game: TargetGame) -> &Path {
    match game.data_game() {
        Some(data) => data_dir(dirs, data),
        None => &dirs.library_dir,
    }
}

/// Resolve one entry of `descriptor`.
pub fn resolve_entry(descriptor: &ModDescriptor, entry: &FileEntry, dirs: &Directories) -> Resolution {
    let dir = match &entry.kind {
        EntryKind::Prerequisite | EntryKind::LegacyFile => target_dir(dirs, entry.target_game),
        EntryKind::SingleFilePackage => &dirs.expansion_data_dir,
        EntryKind::CompatibilityRedirect { targets } => {
            if let Some(missing) = targets
                .iter()
                .find(|t| !data_dir(dirs, t.game).join(&t.file_name).is_file())
            {
                return Resolution::Skip(SkipReason::MissingRedirectTarget(missing.file_name.clone()));
            }
            // The entry's own game wins over the first redirect target's game
            match (entry.target_game.data_game(), targets.first()) {
                (Some(game), _) => data_dir(dirs, game),
                (None, Some(target)) => data_dir(dirs, target.game),
                (None, None) => &dirs.library_dir,
            }
        }
        EntryKind::Component {
            default_selected, ..
        } => {
            if !descriptor.has_custom_installer || !default_selected {
                return Resolution::Skip(SkipReason::NotSelected);
            }
            target_dir(dirs, entry.target_game)
        }
    };

    Resolution::Install(dir.join(entry.file_name()))
}

/// Every entry of `descriptor` that resolves to `Install`, in manifest order.
pub fn plan_install(descriptor: &ModDescriptor, dirs: &Directories) -> Vec<PlannedFile> {
    descriptor
        .entries
        .iter()
        .filter_map(|entry| match resolve_entry(descriptor, entry, dirs) {
            Resolution::Install(destination) => Some(PlannedFile {
                entry: entry.clone(),
                destination,
            }),
            Resolution::Skip(reason) => {
                debug!("Skipping {} ({:?})", entry.archive_path, reason);
                None
            }
        })
        .collect()
}
