use crate::core::{ModmanError, ModmanResult, Version};
use crate::di::traits::VersionProbe;
use std::fs;
use std::io::{Error, ErrorKind};
use std::path::Path;

/// Libraries larger than this are refused
pub const MAX_LIBRARY_SIZE: u64 = 64 * 1024 * 1024;

/// UTF-16LE `FileVersion` key of a version resource, its terminator and padding
const FILE_VERSION_KEY: [u8; 25] = [
    0x46, 0x00, 0x69, 0x00, 0x6C, 0x00, 0x65, 0x00, 0x56, 0x00, 0x65, 0x00, 0x72, 0x00, 0x73,
    0x00, 0x69, 0x00, 0x6F, 0x00, 0x6E, 0x00, 0x00, 0x00, 0x00,
];

/// Reads the version embedded in a library's version resource
#[derive(Debug, Clone, Default)]
pub struct FileVersionProbe;

impl FileVersionProbe {
    pub fn new() -> Self {
        Self
    }
}

impl VersionProbe for FileVersionProbe {
    fn installed_runtime_version(&self, library_path: &Path) -> ModmanResult<Option<Version>> {
        let metadata = match fs::metadata(library_path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if !metadata.is_file() {
            return Ok(None);
        }
        if metadata.len() > MAX_LIBRARY_SIZE {
            return Err(ModmanError::Io(Error::new(
                ErrorKind::InvalidData,
                format!(
                    "{} is larger than {} bytes",
                    library_path.display(),
                    MAX_LIBRARY_SIZE
                ),
            )));
        }

        let bytes = fs::read(library_path)?;
        parse_file_version(&bytes).map(Some)
    }
}

/// Extract the `FileVersion` string from library bytes.
///
/// The version follows the key after one more padding byte and is read as
/// the non-zero bytes up to a double zero. Four-component versions keep
/// their first three components.
pub fn parse_file_version(bytes: &[u8]) -> ModmanResult<Version> {
    let not_found = || {
        ModmanError::Io(Error::new(
            ErrorKind::InvalidData,
            "no FileVersion resource found",
        ))
    };

    let start = bytes
        .windows(FILE_VERSION_KEY.len())
        .position(|window| window == FILE_VERSION_KEY)
        .ok_or_else(not_found)?;

    let after_key = start + FILE_VERSION_KEY.len();
    if bytes.len() - after_key <= 1 {
        return Err(not_found());
    }

    let mut text = String::new();
    let mut i = after_key + 1;
    while i < bytes.len() {
        let byte = bytes[i];
        let next = bytes.get(i + 1).copied().unwrap_or(0);
        if byte == 0 && next == 0 {
            break;
        }
        if byte != 0 {
            text.push(byte as char);
        }
        i += 1;
    }

    Version::parse_lenient(&text)
}

#[cfg(test)]
pub(crate) fn fake_library(version: &str) -> Vec<u8> {
    let mut bytes = b"MZ\x90\x00 some header bytes ".to_vec();
    bytes.extend_from_slice(&FILE_VERSION_KEY);
    bytes.push(0);
    for unit in version.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes.extend_from_slice(b"trailing data");
    bytes
}
