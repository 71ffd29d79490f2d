pub mod conflict_checker;
pub mod extractor;
pub mod installer;
pub mod loader;
pub mod manifest;
pub mod registry;
pub mod resolver;
pub mod rollback;
pub mod uninstaller;
pub mod updater;

pub use conflict_checker::ConflictChecker;
pub use extractor::ZipArchiveReader;
pub use installer::{BatchInstaller, BatchReport, InstallMode, PackageOutcome};
pub use loader::{LoadedPackage, PackageLoader, PackageType};
pub use manifest::{parse_manifest, EntryKind, FileEntry, ModDescriptor, TargetGame};
pub use registry::{InstalledRecord, Registry, SourceKind, YamlRegistryStore};
pub use resolver::{plan_install, resolve_entry, PlannedFile, Resolution};
pub use rollback::{with_rollback, RollbackManager};
pub use uninstaller::{Selection, Uninstaller};
