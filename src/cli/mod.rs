pub mod config;
pub mod install;
pub mod list;
pub mod uninstall;
pub mod update;
pub mod update_runtime;

use modman::config::{Config, DirectoryOverrides};
use modman::core::path::config_file;
use modman::core::ModmanResult;
use modman::di::ServiceContainer;
use std::path::PathBuf;
use tracing::warn;

/// Options shared by every command
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub overrides: DirectoryOverrides,
    pub save_paths: bool,
}

/// Everything a command needs: the effective config and the services
/// built from it
pub struct Session {
    pub config: Config,
    pub config_path: PathBuf,
    pub services: ServiceContainer,
}

impl Session {
    /// Load the config, apply command-line overrides (persisting them with
    /// `--save-paths`) and build the services.
    ///
    /// With `require_dirs`, every destination directory must exist.
    pub fn open(options: &GlobalOptions, require_dirs: bool) -> ModmanResult<Self> {
        let config_path = config_file()?;
        let mut config = Config::load_from(&config_path)?;
        config.apply_overrides(&options.overrides)?;

        if options.save_paths {
            if options.overrides.is_empty() {
                warn!("--save-paths given without any directory flag, nothing saved");
            } else {
                config.save_to(&config_path)?;
                println!("✓ Saved paths to {}", config_path.display());
            }
        }

        let services = ServiceContainer::new(&config, &config_path)?;
        if require_dirs {
            services.directories.validate()?;
        }

        Ok(Self {
            config,
            config_path,
            services,
        })
    }
}
