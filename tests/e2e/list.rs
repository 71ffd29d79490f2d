use super::*;

#[test]
fn test_list_empty_registry() {
    let ctx = TestContext::new();
    ctx.modman()
        .arg("list-installed")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_list_shows_positions_and_descriptions() {
    let ctx = TestContext::new();
    let first = cool_mod(&ctx);
    let second = ctx.single_file("Tweaks.package", b"tweaks");

    ctx.modman().arg("install").arg(&first).arg(&second).assert().success();

    ctx.modman()
        .arg("list-installed")
        .assert()
        .success()
        .stdout(predicate::str::contains("[0] Cool Mod\n  Makes things cool\n[1] Tweaks\n"));
}

#[test]
fn test_list_json() {
    let ctx = TestContext::new();
    let package = cool_mod(&ctx);
    ctx.modman().arg("install").arg(&package).assert().success();

    let output = ctx.modman().args(["list-installed", "--json"]).output().unwrap();
    assert!(output.status.success());

    let records: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(records[0]["unique_id"], "cool_mod");
    assert_eq!(records[0]["installed_paths"].as_array().unwrap().len(), 3);
}

#[test]
fn test_list_with_corrupt_registry_fails() {
    let ctx = TestContext::new();
    std::fs::write(ctx.registry_file(), "records: [not, a, record").unwrap();

    ctx.modman()
        .arg("list-installed")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Registry error"));
}
