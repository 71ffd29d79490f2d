use super::*;

#[test]
fn test_install_places_files_by_game() {
    let ctx = TestContext::new();
    let package = cool_mod(&ctx);

    ctx.modman()
        .arg("install")
        .arg(&package)
        .assert()
        .success()
        .stdout(predicate::str::contains("-> Installing Cool Mod"));

    assert_file(&ctx.library_dir.join("Cool.dll"), b"dll v1");
    assert_file(&ctx.base_data_dir.join("CoolBase.package"), b"base v1");
    assert_file(&ctx.expansion_data_dir.join("CoolEp1.package"), b"ep1 v1");
    assert!(ctx.registry_file().is_file());
}

#[test]
fn test_install_twice_fails() {
    let ctx = TestContext::new();
    let package = cool_mod(&ctx);

    ctx.modman().arg("install").arg(&package).assert().success();
    ctx.modman()
        .arg("install")
        .arg(&package)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already been installed"));
}

#[test]
fn test_install_needed_skips_installed() {
    let ctx = TestContext::new();
    let package = cool_mod(&ctx);

    ctx.modman().arg("install").arg(&package).assert().success();
    ctx.modman()
        .args(["install", "--needed"])
        .arg(&package)
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipping Cool Mod"));
}

#[test]
fn test_install_flags_conflict() {
    let ctx = TestContext::new();
    let package = cool_mod(&ctx);

    ctx.modman()
        .args(["install", "-n", "-u"])
        .arg(&package)
        .assert()
        .failure();
}

#[test]
fn test_install_single_file_goes_to_expansion_data() {
    let ctx = TestContext::new();
    let package = ctx.single_file("Tweaks.package", b"tweaks");

    ctx.modman().arg("install").arg(&package).assert().success();

    assert_file(&ctx.expansion_data_dir.join("Tweaks.package"), b"tweaks");
    ctx.modman()
        .arg("list-installed")
        .assert()
        .success()
        .stdout(predicate::str::contains("[0] Tweaks"));
}

#[test]
fn test_install_legacy_archive_without_modinfo() {
    let ctx = TestContext::new();
    let package = ctx.sporemod(
        "Legacy.sporemod",
        None,
        &[("Legacy.dll", b"dll"), ("Legacy.package", b"pkg"), ("readme.txt", b"hi")],
    );

    ctx.modman().arg("install").arg(&package).assert().success();

    assert_file(&ctx.library_dir.join("Legacy.dll"), b"dll");
    assert_file(&ctx.expansion_data_dir.join("Legacy.package"), b"pkg");
    assert!(!ctx.library_dir.join("readme.txt").exists());
    assert!(!ctx.expansion_data_dir.join("readme.txt").exists());
}

#[test]
fn test_install_unsupported_extension() {
    let ctx = TestContext::new();
    let package = ctx.single_file("mod.zip", b"zip?");

    ctx.modman()
        .arg("install")
        .arg(&package)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unsupported package type"));
}

#[test]
fn test_install_missing_declared_file_installs_nothing() {
    let ctx = TestContext::new();
    let package = ctx.sporemod(
        "Broken.sporemod",
        Some(cool_mod_xml()),
        &[("Cool.dll", b"dll v1")],
    );

    ctx.modman()
        .arg("install")
        .arg(&package)
        .assert()
        .failure()
        .stderr(predicate::str::contains("CoolBase.package"));

    assert!(!ctx.library_dir.join("Cool.dll").exists());
    assert!(!ctx.registry_file().exists());
}

#[test]
fn test_install_requires_runtime_library() {
    let ctx = TestContext::new();
    let xml = r#"<mod unique="needs_api" displayName="Needs API" dllsBuild="2.5.100">
        <prerequisite>Needs.dll</prerequisite>
    </mod>"#;
    let package = ctx.sporemod("Needs.sporemod", Some(xml), &[("Needs.dll", b"dll")]);

    ctx.modman()
        .arg("install")
        .arg(&package)
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires runtime library 2.5.100"));

    ctx.install_runtime("2.5.100.0");
    ctx.modman().arg("install").arg(&package).assert().success();
    assert_file(&ctx.library_dir.join("Needs.dll"), b"dll");
}

#[test]
fn test_install_collision_with_other_mod() {
    let ctx = TestContext::new();
    let first = cool_mod(&ctx);
    let xml = r#"<mod unique="copycat" displayName="Copycat">
        <prerequisite>Cool.dll</prerequisite>
    </mod>"#;
    let second = ctx.sporemod("Copycat.sporemod", Some(xml), &[("Cool.dll", b"impostor")]);

    ctx.modman().arg("install").arg(&first).assert().success();
    ctx.modman()
        .arg("install")
        .arg(&second)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cool Mod"));

    assert_file(&ctx.library_dir.join("Cool.dll"), b"dll v1");
}

#[test]
fn test_batch_stops_at_first_failure() {
    let ctx = TestContext::new();
    let good = cool_mod(&ctx);
    let bad = ctx.single_file("bad.txt", b"?");
    let after = ctx.single_file("After.package", b"after");

    ctx.modman()
        .arg("install")
        .arg(&good)
        .arg(&bad)
        .arg(&after)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to install"));

    // Earlier packages stay installed, later ones are never attempted
    assert_file(&ctx.library_dir.join("Cool.dll"), b"dll v1");
    assert!(!ctx.expansion_data_dir.join("After.package").exists());
}

#[test]
fn test_install_with_missing_directory_fails() {
    let ctx = TestContext::new();
    std::fs::remove_dir_all(&ctx.base_data_dir).unwrap();
    let package = cool_mod(&ctx);

    ctx.modman()
        .arg("install")
        .arg(&package)
        .assert()
        .failure()
        .stderr(predicate::str::contains("base data"));
}
