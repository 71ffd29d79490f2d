//! End-to-end tests driving the `modman` binary against a throwaway game
//! layout.

use assert_cmd::Command;
use assert_fs::{prelude::*, TempDir};
use predicates::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod config;
pub mod install;
pub mod list;
pub mod runtime;
pub mod uninstall;
pub mod update;

/// Isolated config, registry and game directories for one test
pub struct TestContext {
    pub temp: TempDir,
    pub config_file: PathBuf,
    pub library_dir: PathBuf,
    pub base_data_dir: PathBuf,
    pub expansion_data_dir: PathBuf,
    pub runtime_dir: PathBuf,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Create the game layout and a config file pointing at it
    pub fn new() -> Self {
        let ctx = Self::bare();
        for dir in [
            &ctx.library_dir,
            &ctx.base_data_dir,
            &ctx.expansion_data_dir,
            &ctx.runtime_dir,
        ] {
            std::fs::create_dir_all(dir).unwrap();
        }

        let config = format!(
            "library_dir: {}\nbase_data_dir: {}\nexpansion_data_dir: {}\nruntime_dir: {}\n",
            ctx.library_dir.display(),
            ctx.base_data_dir.display(),
            ctx.expansion_data_dir.display(),
            ctx.runtime_dir.display(),
        );
        std::fs::create_dir_all(ctx.config_file.parent().unwrap()).unwrap();
        std::fs::write(&ctx.config_file, config).unwrap();
        ctx
    }

    /// Paths only; nothing is created on disk
    pub fn bare() -> Self {
        let temp = TempDir::new().unwrap();
        let game = temp.child("game").to_path_buf();
        Self {
            config_file: temp.child("config").child("config.yaml").to_path_buf(),
            library_dir: game.join("ModLibs"),
            base_data_dir: game.join("Data"),
            expansion_data_dir: game.join("DataEP1"),
            runtime_dir: game.join("CoreLibs"),
            temp,
        }
    }

    /// A `modman` command using this context's config file
    pub fn modman(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("modman").unwrap();
        cmd.current_dir(&self.temp);
        cmd.env("MODMAN_CONFIG", &self.config_file);
        cmd.env_remove("RUST_LOG");
        cmd
    }

    pub fn registry_file(&self) -> PathBuf {
        self.config_file.with_file_name("installed.yaml")
    }

    /// Write a `.sporemod` archive into the temp dir and return its path
    pub fn sporemod(&self, name: &str, modinfo: Option<&str>, files: &[(&str, &[u8])]) -> PathBuf {
        let path = self.temp.child(name).to_path_buf();
        let file = std::fs::File::create(&path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = zip::write::FileOptions::default();
        if let Some(xml) = modinfo {
            zip.start_file("ModInfo.xml", options).unwrap();
            zip.write_all(xml.as_bytes()).unwrap();
        }
        for (entry, bytes) in files {
            zip.start_file(*entry, options).unwrap();
            zip.write_all(bytes).unwrap();
        }
        zip.finish().unwrap();
        path
    }

    /// Write a bare `.package` file into the temp dir and return its path
    pub fn single_file(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.temp.child(name).to_path_buf();
        std::fs::write(&path, bytes).unwrap();
        path
    }

    /// Place a runtime library reporting `version` in the runtime dir
    pub fn install_runtime(&self, version: &str) {
        std::fs::write(self.runtime_dir.join("SporeModAPI.dll"), fake_library(version)).unwrap();
    }
}

/// Library bytes carrying a `FileVersion` resource string
pub fn fake_library(version: &str) -> Vec<u8> {
    let mut bytes = b"MZ\x90\x00".to_vec();
    for unit in "FileVersion".encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    for unit in version.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes
}

pub fn cool_mod_xml() -> &'static str {
    r#"<mod unique="cool_mod" displayName="Cool Mod" description="Makes things cool">
        <prerequisite>Cool.dll</prerequisite>
        <prerequisite game="spore">CoolBase.package</prerequisite>
        <prerequisite game="GalacticAdventures">CoolEp1.package</prerequisite>
    </mod>"#
}

/// A `.sporemod` declaring a library and one file per data directory
pub fn cool_mod(ctx: &TestContext) -> PathBuf {
    ctx.sporemod(
        "CoolMod.sporemod",
        Some(cool_mod_xml()),
        &[
            ("Cool.dll", b"dll v1"),
            ("CoolBase.package", b"base v1"),
            ("CoolEp1.package", b"ep1 v1"),
        ],
    )
}

pub fn assert_file(path: &Path, contents: &[u8]) {
    assert!(path.is_file(), "{} should exist", path.display());
    assert_eq!(std::fs::read(path).unwrap(), contents);
}

#[test]
fn test_help_lists_commands() {
    let ctx = TestContext::new();
    ctx.modman()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("uninstall"))
        .stdout(predicate::str::contains("list-installed"))
        .stdout(predicate::str::contains("update-runtime"));
}
