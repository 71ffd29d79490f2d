//! Batch installation of mod packages
//!
//! Packages are processed one at a time in the order given. Each package is
//! committed (files written, registry saved) before the next one starts. The
//! first failing package stops the batch; packages committed before it stay
//! installed.

use crate::config::Directories;
use crate::core::{ModmanError, ModmanResult, Version};
use crate::di::traits::{ArchiveReader, RegistryStore, VersionProbe};
use crate::di::ServiceContainer;
use crate::package::conflict_checker::ConflictChecker;
use crate::package::loader::PackageLoader;
use crate::package::registry::{InstalledRecord, Registry};
use crate::package::resolver::plan_install;
use crate::package::rollback::with_rollback;
use crate::package::updater::release_installed;
use chrono::Utc;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// How `install` treats a mod that is already in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallMode {
    /// Fail with `AlreadyInstalled`
    Strict,
    /// Skip it
    IfMissing,
    /// Replace it
    UpdateOrInstall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Install(InstallMode),
    Update,
}

/// What happened to one package of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageOutcome {
    Installed { unique_id: String, files: usize },
    Updated { unique_id: String, files: usize },
    /// Already in the registry and left alone
    AlreadyInstalled { unique_id: String },
    /// Same unique id as an earlier package of this batch
    DuplicateInBatch { unique_id: String },
}

/// Result of a batch: the outcome of every processed package and the
/// failure that stopped it, if any
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<(PathBuf, PackageOutcome)>,
    pub failure: Option<(PathBuf, ModmanError)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    /// Number of packages that wrote files
    pub fn committed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| {
                matches!(
                    o,
                    PackageOutcome::Installed { .. } | PackageOutcome::Updated { .. }
                )
            })
            .count()
    }

    pub fn into_result(self) -> ModmanResult<Vec<(PathBuf, PackageOutcome)>> {
        match self.failure {
            Some((_, e)) => Err(e),
            None => Ok(self.outcomes),
        }
    }
}

/// Installs and updates packages against one registry
pub struct BatchInstaller<'a> {
    dirs: &'a Directories,
    registry: &'a mut Registry,
    loader: PackageLoader<'a>,
    probe: &'a dyn VersionProbe,
    store: &'a dyn RegistryStore,
    runtime_version: Option<Option<Version>>,
    claimed: HashSet<PathBuf>,
    seen: HashSet<String>,
}

impl<'a> BatchInstaller<'a> {
    pub fn new(
        dirs: &'a Directories,
        registry: &'a mut Registry,
        reader: &'a dyn ArchiveReader,
        probe: &'a dyn VersionProbe,
        store: &'a dyn RegistryStore,
    ) -> Self {
        Self {
            dirs,
            registry,
            loader: PackageLoader::new(reader),
            probe,
            store,
            runtime_version: None,
            claimed: HashSet::new(),
            seen: HashSet::new(),
        }
    }

    pub fn from_services(services: &'a ServiceContainer, registry: &'a mut Registry) -> Self {
        Self::new(
            &services.directories,
            registry,
            services.archive_reader.as_ref(),
            services.version_probe.as_ref(),
            services.registry_store.as_ref(),
        )
    }

    pub fn install(&mut self, paths: &[PathBuf], mode: InstallMode) -> BatchReport {
        self.run(paths, Operation::Install(mode))
    }

    /// Replace installed mods. Each package must already be installed.
    pub fn update(&mut self, paths: &[PathBuf]) -> BatchReport {
        self.run(paths, Operation::Update)
    }

    fn run(&mut self, paths: &[PathBuf], operation: Operation) -> BatchReport {
        let mut report = BatchReport::default();
        for path in paths {
            match self.process(path, operation) {
                Ok(outcome) => report.outcomes.push((path.clone(), outcome)),
                Err(e) => {
                    debug!("{} failed: {}", path.display(), e);
                    report.failure = Some((path.clone(), e));
                    break;
                }
            }
        }
        report
    }

    fn process(&mut self, path: &Path, operation: Operation) -> ModmanResult<PackageOutcome> {
        let mut package = self.loader.load(path)?;
        let descriptor = package.descriptor.clone();
        let unique_id = descriptor.unique_id.clone();

        if !self.seen.insert(unique_id.clone()) {
            println!("Skipping {}: already processed in this batch", descriptor.display_name);
            return Ok(PackageOutcome::DuplicateInBatch { unique_id });
        }

        let installed = self.registry.position_of(&unique_id).is_some();
        let replace = match (operation, installed) {
            (Operation::Install(InstallMode::Strict), true) => {
                return Err(ModmanError::AlreadyInstalled(unique_id));
            }
            (Operation::Install(InstallMode::IfMissing), true) => {
                println!("Skipping {}: already installed", descriptor.display_name);
                return Ok(PackageOutcome::AlreadyInstalled { unique_id });
            }
            (Operation::Update, false) => return Err(ModmanError::NotInstalled(unique_id)),
            (_, installed) => installed,
        };

        if descriptor.required_runtime_version.is_some() {
            let runtime = self.runtime_version()?;
            ConflictChecker::check_runtime(&descriptor, runtime)?;
        }

        if replace {
            release_installed(self.registry, self.store, &unique_id)?;
        }

        let planned = ConflictChecker::drop_claimed(plan_install(&descriptor, self.dirs), &self.claimed);
        ConflictChecker::check_collisions(&descriptor, &planned, self.registry)?;

        println!("-> Installing {}", descriptor.display_name);
        for warning in descriptor.flags.warnings() {
            println!("--> Warning: {}", warning);
        }

        let registry = &mut *self.registry;
        let store = self.store;
        let record = with_rollback(|rollback| {
            for file in &planned {
                let data = package.read(&file.entry)?;
                rollback.track(&file.destination)?;
                fs::write(&file.destination, data)?;
                debug!("Installed {} to {}", file.entry.archive_path, file.destination.display());
            }

            let record = InstalledRecord {
                unique_id: descriptor.unique_id.clone(),
                display_name: descriptor.display_name.clone(),
                description: descriptor.description.clone(),
                source_kind: descriptor.source_kind,
                installed_paths: planned.iter().map(|f| f.destination.clone()).collect(),
                installed_at: Utc::now(),
            };
            registry.append(record.clone());
            if let Err(e) = store.save(registry) {
                registry.take_last();
                return Err(e);
            }
            Ok(record)
        })?;

        let files = record.installed_paths.len();
        self.claimed.extend(record.installed_paths);

        Ok(if replace {
            PackageOutcome::Updated { unique_id, files }
        } else {
            PackageOutcome::Installed { unique_id, files }
        })
    }

    fn runtime_version(&mut self) -> ModmanResult<Option<Version>> {
        if let Some(version) = self.runtime_version {
            return Ok(version);
        }
        let version = self
            .probe
            .installed_runtime_version(&self.dirs.runtime_library)?;
        if version.is_none() {
            warn!(
                "Runtime library {} is not installed",
                self.dirs.runtime_library.display()
            );
        }
        self.runtime_version = Some(version);
        Ok(version)
    }
}
