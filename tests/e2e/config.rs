use super::*;

#[test]
fn test_directory_flags_override_config() {
    let ctx = TestContext::bare();
    let game = ctx.temp.child("elsewhere");
    for dir in ["ModLibs", "Data", "DataEP1", "CoreLibs"] {
        game.child(dir).create_dir_all().unwrap();
    }
    let package = ctx.single_file("Tweaks.package", b"tweaks");

    ctx.modman()
        .arg("install")
        .arg(&package)
        .arg("--library-dir")
        .arg(game.child("ModLibs").path())
        .arg("--base-data-dir")
        .arg(game.child("Data").path())
        .arg("--expansion-data-dir")
        .arg(game.child("DataEP1").path())
        .arg("--runtime-dir")
        .arg(game.child("CoreLibs").path())
        .assert()
        .success();

    game.child("DataEP1").child("Tweaks.package").assert(predicate::path::is_file());
    // Flags are not remembered without --save-paths
    assert!(!ctx.config_file.exists());
}

#[test]
fn test_save_paths_persists_flags() {
    let ctx = TestContext::bare();
    let library = ctx.temp.child("libs");

    ctx.modman()
        .args(["config", "show", "--save-paths", "--library-dir"])
        .arg(library.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved paths"));

    let saved = std::fs::read_to_string(&ctx.config_file).unwrap();
    assert!(saved.contains("library_dir"));

    ctx.modman()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains(library.path().display().to_string()));
}

#[test]
fn test_config_show_reports_registry_location() {
    let ctx = TestContext::new();
    ctx.modman()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("installed.yaml"))
        .stdout(predicate::str::contains("SporeModAPI.dll"));
}

#[test]
fn test_invalid_config_file() {
    let ctx = TestContext::new();
    std::fs::write(&ctx.config_file, "library_dir: [unclosed").unwrap();

    ctx.modman()
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_save_paths_without_flags_writes_nothing() {
    let ctx = TestContext::bare();

    ctx.modman()
        .args(["config", "show", "--save-paths"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved paths").not())
        .stderr(predicate::str::contains("nothing saved"));

    assert!(!ctx.config_file.exists());
}
