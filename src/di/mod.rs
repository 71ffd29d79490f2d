//! Dependency injection infrastructure for Modman
//!
//! The installation engine talks to the file system through these traits so
//! tests can swap in the doubles from [`mocks`].
//!
//! # Example (Testing)
//! ```
//! use modman::config::Directories;
//! use modman::di::{mocks::*, ServiceContainer};
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! let dirs = Directories {
//!     library_dir: PathBuf::from("/game/ModLibs"),
//!     base_data_dir: PathBuf::from("/game/Data"),
//!     expansion_data_dir: PathBuf::from("/game/DataEP1"),
//!     runtime_dir: PathBuf::from("/game/CoreLibs"),
//!     runtime_library: PathBuf::from("/game/CoreLibs/SporeModAPI.dll"),
//! };
//! let container = ServiceContainer::with_providers(
//!     dirs,
//!     Arc::new(MockArchiveReader::new()),
//!     Arc::new(MockVersionProbe::absent()),
//!     Arc::new(MockRuntimeFetcher::new()),
//!     Arc::new(MockRegistryStore::new()),
//! );
//! assert!(container.registry_store.load().unwrap().is_empty());
//! ```

pub mod container;
pub mod mocks;
pub mod traits;

// Re-export key types
pub use container::ServiceContainer;
pub use traits::{ArchiveReader, PackageContainer, RegistryStore, RuntimeFetcher, VersionProbe};
