//! `modinfo.xml` parsing
//!
//! Produces a [`ModDescriptor`] from the manifest bytes. Checking that the
//! declared files exist inside the package is done by the loader, which has
//! the container at hand.

use crate::core::{ModmanError, ModmanResult, Version};
use crate::package::registry::SourceKind;
use roxmltree::{Document, Node};
use std::path::Path;

/// Name of the manifest entry inside a container (matched ignoring case)
pub const MANIFEST_FILE_NAME: &str = "modinfo.xml";

/// Newest `installerSystemVersion` this installer understands
pub const MAX_INSTALLER_SYSTEM_VERSION: [u64; 4] = [1, 0, 1, 2];

/// Which game a file belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetGame {
    /// Routes to the library directory
    Unspecified,
    Base,
    Expansion,
}

impl TargetGame {
    /// Map a declared game identifier, ignoring case. Unknown identifiers
    /// are `Unspecified`.
    pub fn from_identifier(identifier: &str) -> Self {
        match identifier.trim().to_ascii_lowercase().as_str() {
            "spore" | "corespore" | "coresporedata" => TargetGame::Base,
            "galacticadventures" | "galacticadventuresdata" => TargetGame::Expansion,
            _ => TargetGame::Unspecified,
        }
    }

    pub fn data_game(self) -> Option<DataGame> {
        match self {
            TargetGame::Unspecified => None,
            TargetGame::Base => Some(DataGame::Base),
            TargetGame::Expansion => Some(DataGame::Expansion),
        }
    }
}

/// A game with a data directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataGame {
    Base,
    Expansion,
}

/// A file that must already be installed for a compatibility entry to apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    pub file_name: String,
    pub game: DataGame,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Prerequisite,
    CompatibilityRedirect {
        /// Never empty
        targets: Vec<RedirectTarget>,
    },
    Component {
        name: String,
        group_id: Option<String>,
        default_selected: bool,
    },
    LegacyFile,
    SingleFilePackage,
}

/// One file shipped inside a package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub archive_path: String,
    pub target_game: TargetGame,
    pub kind: EntryKind,
}

impl FileEntry {
    /// File name the entry is installed under
    pub fn file_name(&self) -> &str {
        Path::new(&self.archive_path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.archive_path)
    }
}

/// Flags that warrant a warning but never block a non-interactive install
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvisoryFlags {
    pub experimental: bool,
    pub requires_galaxy_reset: bool,
    pub causes_save_data_dependency: bool,
}

impl AdvisoryFlags {
    pub fn warnings(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.experimental {
            out.push("This mod is experimental");
        }
        if self.requires_galaxy_reset {
            out.push("This mod requires a galaxy reset");
        }
        if self.causes_save_data_dependency {
            out.push("This mod causes save data dependency");
        }
        out
    }
}

/// Parsed representation of one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModDescriptor {
    pub unique_id: String,
    pub display_name: String,
    pub description: Option<String>,
    pub required_runtime_version: Option<Version>,
    pub has_custom_installer: bool,
    pub flags: AdvisoryFlags,
    pub source_kind: SourceKind,
    pub entries: Vec<FileEntry>,
}

/// Parse a manifest document.
pub fn parse_manifest(bytes: &[u8]) -> ModmanResult<ModDescriptor> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| ModmanError::InvalidManifest(format!("not valid UTF-8: {}", e)))?;
    let text = text.trim_start_matches('\u{feff}');
    if text.trim().is_empty() {
        return Err(ModmanError::InvalidManifest("document is empty".to_string()));
    }

    let document = Document::parse(text).map_err(|e| ModmanError::InvalidManifest(e.to_string()))?;
    let root = document.root_element();

    let unique_id = attribute(root, "unique")
        .ok_or_else(|| ModmanError::InvalidManifest("missing 'unique' attribute".to_string()))?;
    let display_name = attribute(root, "displayName").unwrap_or_else(|| unique_id.clone());

    if let Some(text) = attribute(root, "installerSystemVersion") {
        let version = Version::parse_parts(&text).map_err(|_| {
            ModmanError::InvalidManifest(format!("installerSystemVersion \"{}\" is invalid", text))
        })?;
        if version > MAX_INSTALLER_SYSTEM_VERSION {
            return Err(ModmanError::InvalidManifest(format!(
                "installerSystemVersion \"{}\" is unsupported",
                text
            )));
        }
    }

    let required_runtime_version = match attribute(root, "dllsBuild") {
        Some(text) => Some(
            Version::parse_lenient(&text)
                .map_err(|e| ModmanError::InvalidManifest(format!("dllsBuild: {}", e)))?,
        ),
        None => None,
    };

    let mut entries = Vec::new();
    for child in root.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "prerequisite" => {
                for (file, game) in declared_files(child) {
                    entries.push(FileEntry {
                        archive_path: file,
                        target_game: game,
                        kind: EntryKind::Prerequisite,
                    });
                }
            }
            "compatFile" => entries.extend(parse_compat_file(child)?),
            "component" => entries.extend(parse_component(child, None)),
            "componentGroup" => {
                let group_id = attribute(child, "unique").or_else(|| attribute(child, "displayName"));
                for component in child
                    .children()
                    .filter(|n| n.is_element() && n.tag_name().name() == "component")
                {
                    entries.extend(parse_component(component, group_id.clone()));
                }
            }
            _ => {}
        }
    }

    Ok(ModDescriptor {
        unique_id,
        display_name,
        description: attribute(root, "description"),
        required_runtime_version,
        has_custom_installer: bool_attribute(root, "hasCustomInstaller").unwrap_or(true),
        flags: AdvisoryFlags {
            experimental: bool_attribute(root, "isExperimental").unwrap_or(false),
            requires_galaxy_reset: bool_attribute(root, "requiresGalaxyReset").unwrap_or(false),
            causes_save_data_dependency: bool_attribute(root, "causesSaveDataDependency")
                .unwrap_or(false),
        },
        source_kind: SourceKind::Package,
        entries,
    })
}

fn parse_component(node: Node, group_id: Option<String>) -> Vec<FileEntry> {
    let name = attribute(node, "displayName")
        .or_else(|| attribute(node, "unique"))
        .unwrap_or_default();
    let default_selected = bool_attribute(node, "defaultChecked").unwrap_or(false);

    declared_files(node)
        .into_iter()
        .map(|(file, game)| FileEntry {
            archive_path: file,
            target_game: game,
            kind: EntryKind::Component {
                name: name.clone(),
                group_id: group_id.clone(),
                default_selected,
            },
        })
        .collect()
}

fn parse_compat_file(node: Node) -> ModmanResult<Vec<FileEntry>> {
    let names = split_list(&attribute(node, "compatTargetFileName").unwrap_or_default());
    if names.is_empty() {
        return Err(ModmanError::InvalidManifest(
            "compatFile without compatTargetFileName".to_string(),
        ));
    }
    let games = split_list(&attribute(node, "compatTargetGame").unwrap_or_default());

    let mut targets = Vec::with_capacity(names.len());
    for (i, file_name) in names.into_iter().enumerate() {
        let declared = games.get(i).map(String::as_str).unwrap_or("");
        let game = TargetGame::from_identifier(declared).data_game().ok_or_else(|| {
            ModmanError::InvalidManifest(format!(
                "compatTargetGame \"{}\" for \"{}\" is not a known game",
                declared, file_name
            ))
        })?;
        targets.push(RedirectTarget { file_name, game });
    }

    Ok(declared_files(node)
        .into_iter()
        .map(|(file, game)| FileEntry {
            archive_path: file,
            target_game: game,
            kind: EntryKind::CompatibilityRedirect {
                targets: targets.clone(),
            },
        })
        .collect())
}

/// The `?`-separated file list in the element text, paired with the
/// `?`-separated `game` attribute.
fn declared_files(node: Node) -> Vec<(String, TargetGame)> {
    let files = split_list(node.text().unwrap_or(""));
    let games = split_list(&attribute(node, "game").unwrap_or_default());

    files
        .into_iter()
        .enumerate()
        .map(|(i, file)| {
            let game = games
                .get(i)
                .map(|g| TargetGame::from_identifier(g))
                .unwrap_or(TargetGame::Unspecified);
            (file, game)
        })
        .collect()
}

fn split_list(text: &str) -> Vec<String> {
    text.split('?')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn attribute(node: Node, name: &str) -> Option<String> {
    node.attribute(name)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn bool_attribute(node: Node, name: &str) -> Option<bool> {
    attribute(node, name).map(|v| v.eq_ignore_ascii_case("true"))
}
