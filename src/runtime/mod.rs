//! The runtime library: reading its version and fetching updates

pub mod fetcher;
pub mod probe;

use crate::core::Version;

/// Outcome of a successful runtime library fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeUpdate {
    /// The installed library is as new as the download; nothing written
    Unchanged(Version),
    Updated { from: Version, to: Version },
    /// No library was installed before
    FetchedFirstTime(Version),
}

pub use fetcher::HttpRuntimeFetcher;
pub use probe::{parse_file_version, FileVersionProbe};
