use crate::core::error::{ModmanError, ModmanResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A three-component version (`A.B.C`), ordered lexicographically by component.
///
/// Used for the runtime library version and the minimum runtime version
/// a package declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a strict `A.B.C` version string.
    ///
    /// Exactly three dot-separated, non-empty, all-digit components are
    /// accepted. Surrounding whitespace is trimmed.
    pub fn parse(s: &str) -> ModmanResult<Self> {
        let trimmed = s.trim();
        let parts: Vec<&str> = trimmed.split('.').collect();
        if parts.len() != 3 {
            return Err(ModmanError::MalformedVersion(s.to_string()));
        }

        let mut numbers = [0u64; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            *slot = parse_component(part).ok_or_else(|| ModmanError::MalformedVersion(s.to_string()))?;
        }

        Ok(Self::new(numbers[0], numbers[1], numbers[2]))
    }

    /// Parse a version with one to four components, keeping the first three.
    ///
    /// Windows file versions carry four components (`2.5.300.0`); missing
    /// trailing components count as zero.
    pub fn parse_lenient(s: &str) -> ModmanResult<Self> {
        let [major, minor, patch, _] = Self::parse_parts(s)?;
        Ok(Self::new(major, minor, patch))
    }

    /// All four components of a one to four component version, zero-padded.
    pub fn parse_parts(s: &str) -> ModmanResult<[u64; 4]> {
        let parts: Vec<&str> = s.trim().split('.').collect();
        if parts.len() > 4 {
            return Err(ModmanError::MalformedVersion(s.to_string()));
        }

        let mut numbers = [0u64; 4];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            *slot = parse_component(part).ok_or_else(|| ModmanError::MalformedVersion(s.to_string()))?;
        }
        Ok(numbers)
    }
}

fn parse_component(part: &str) -> Option<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl FromStr for Version {
    type Err = ModmanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
