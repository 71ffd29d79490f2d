use std::path::PathBuf;
use thiserror::Error;

pub type ModmanResult<T> = Result<T, ModmanError>;

#[derive(Error, Debug)]
pub enum ModmanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The package path has an extension no installer understands.
    #[error("\"{0}\" is an unsupported package type")]
    UnsupportedPackageType(String),

    /// The package claims to be a container but its bytes are not one.
    #[error("{path} is not a valid mod archive: {reason}")]
    CorruptPackage { path: PathBuf, reason: String },

    #[error("Invalid modinfo.xml: {0}")]
    InvalidManifest(String),

    #[error("Package '{package}' does not contain declared file \"{file}\"")]
    MissingEntryFile { package: String, file: String },

    #[error("Invalid version \"{0}\": expected three numeric components (A.B.C)")]
    MalformedVersion(String),

    #[error("\"{package}\" requires runtime library {required} but {installed} is installed")]
    RuntimeVersionTooLow {
        package: String,
        required: String,
        installed: String,
    },

    #[error("An already installed mod ({owner}) contains a file ({}) that '{package}' wants to install", path.display())]
    FileCollision {
        package: String,
        owner: String,
        path: PathBuf,
    },

    #[error("A mod with the same unique name ({0}) has already been installed")]
    AlreadyInstalled(String),

    #[error("No installed mod found with the unique name ({0})")]
    NotInstalled(String),

    #[error("Invalid id or range: {0}")]
    InvalidRange(String),

    #[error("Registry error: {0}")]
    RegistryIo(String),

    #[error("Runtime library update failed: {0}")]
    RuntimeUpdate(String),
}
