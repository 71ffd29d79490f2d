use crate::core::path::{default_registry_file, ensure_dir};
use crate::core::{ModmanError, ModmanResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted settings: destination directories, registry location and
/// where the runtime library is fetched from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory receiving library (`.dll`) files. Defaults to `../ModLibs`
    /// relative to the executable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_dir: Option<PathBuf>,

    /// Base game data directory. Defaults to `../../Data`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_data_dir: Option<PathBuf>,

    /// Expansion data directory. Defaults to `../../DataEP1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expansion_data_dir: Option<PathBuf>,

    /// Directory holding the runtime library. Defaults to `../CoreLibs`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_dir: Option<PathBuf>,

    /// File name of the runtime library inside `runtime_dir`
    #[serde(default = "default_runtime_library")]
    pub runtime_library: String,

    /// Zip archive containing the latest runtime library
    #[serde(default = "default_runtime_update_url")]
    pub runtime_update_url: String,

    /// Entry inside the update archive that becomes the runtime library
    #[serde(default = "default_runtime_archive_entry")]
    pub runtime_archive_entry: String,

    /// Installed-mods registry file. Defaults to `installed.yaml` beside the
    /// config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_path: Option<PathBuf>,
}

fn default_runtime_library() -> String {
    "SporeModAPI.dll".to_string()
}

fn default_runtime_update_url() -> String {
    "https://github.com/emd4600/Spore-ModAPI/releases/latest/download/SporeModAPIdlls.zip"
        .to_string()
}

fn default_runtime_archive_entry() -> String {
    "SporeModAPI.combined.dll".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            library_dir: None,
            base_data_dir: None,
            expansion_data_dir: None,
            runtime_dir: None,
            runtime_library: default_runtime_library(),
            runtime_update_url: default_runtime_update_url(),
            runtime_archive_entry: default_runtime_archive_entry(),
            registry_path: None,
        }
    }
}

/// Directory overrides given on the command line for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryOverrides {
    pub library_dir: Option<PathBuf>,
    pub base_data_dir: Option<PathBuf>,
    pub expansion_data_dir: Option<PathBuf>,
    pub runtime_dir: Option<PathBuf>,
}

impl DirectoryOverrides {
    pub fn is_empty(&self) -> bool {
        self.library_dir.is_none()
            && self.base_data_dir.is_none()
            && self.expansion_data_dir.is_none()
            && self.runtime_dir.is_none()
    }
}

/// The effective destination directories for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directories {
    pub library_dir: PathBuf,
    pub base_data_dir: PathBuf,
    pub expansion_data_dir: PathBuf,
    pub runtime_dir: PathBuf,
    /// Full path of the runtime library
    pub runtime_library: PathBuf,
}

impl Directories {
    /// Fail with a `Path` error naming the first directory that does not exist.
    pub fn validate(&self) -> ModmanResult<()> {
        let checks = [
            ("library", &self.library_dir),
            ("base data", &self.base_data_dir),
            ("expansion data", &self.expansion_data_dir),
            ("runtime", &self.runtime_dir),
        ];
        for (label, dir) in checks {
            if !dir.is_dir() {
                return Err(ModmanError::Path(format!(
                    "The {} directory ({}) does not exist",
                    label,
                    dir.display()
                )));
            }
        }
        Ok(())
    }
}

impl Config {
    /// Load config from `path`, normally `core::path::config_file()`.
    ///
    /// A missing file yields the defaults; nothing is written.
    pub fn load_from(path: &Path) -> ModmanResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ModmanError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> ModmanResult<()> {
        let config_dir = path
            .parent()
            .ok_or_else(|| ModmanError::Path("Invalid config path".to_string()))?;
        ensure_dir(config_dir)?;

        let content = serde_yaml::to_string(self)
            .map_err(|e| ModmanError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)?;
        Ok(())
    }

    /// Merge command-line overrides into this config, making them absolute.
    pub fn apply_overrides(&mut self, overrides: &DirectoryOverrides) -> ModmanResult<()> {
        if let Some(dir) = &overrides.library_dir {
            self.library_dir = Some(absolute(dir)?);
        }
        if let Some(dir) = &overrides.base_data_dir {
            self.base_data_dir = Some(absolute(dir)?);
        }
        if let Some(dir) = &overrides.expansion_data_dir {
            self.expansion_data_dir = Some(absolute(dir)?);
        }
        if let Some(dir) = &overrides.runtime_dir {
            self.runtime_dir = Some(absolute(dir)?);
        }
        Ok(())
    }

    /// Resolve the effective directories, falling back to locations relative
    /// to the running executable.
    pub fn directories(&self) -> ModmanResult<Directories> {
        let exe_dir = executable_dir()?;
        let resolve = |configured: &Option<PathBuf>, default: &[&str]| -> PathBuf {
            match configured {
                Some(dir) => dir.clone(),
                None => default.iter().fold(exe_dir.clone(), |acc, part| acc.join(part)),
            }
        };

        let runtime_dir = resolve(&self.runtime_dir, &["..", "CoreLibs"]);
        Ok(Directories {
            library_dir: resolve(&self.library_dir, &["..", "ModLibs"]),
            base_data_dir: resolve(&self.base_data_dir, &["..", "..", "Data"]),
            expansion_data_dir: resolve(&self.expansion_data_dir, &["..", "..", "DataEP1"]),
            runtime_library: runtime_dir.join(&self.runtime_library),
            runtime_dir,
        })
    }

    /// Registry file location, given the config file it was loaded from
    pub fn registry_file(&self, config_path: &Path) -> PathBuf {
        match &self.registry_path {
            Some(path) => path.clone(),
            None => default_registry_file(config_path),
        }
    }
}

fn executable_dir() -> ModmanResult<PathBuf> {
    let exe = std::env::current_exe()
        .map_err(|e| ModmanError::Path(format!("Failed to locate executable: {}", e)))?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| ModmanError::Path("Executable has no parent directory".to_string()))
}

fn absolute(path: &Path) -> ModmanResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir()
        .map_err(|e| ModmanError::Path(format!("Failed to get current directory: {}", e)))?;
    Ok(cwd.join(path))
}
