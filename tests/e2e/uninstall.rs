use super::*;

fn install_three(ctx: &TestContext) {
    let a = ctx.single_file("Alpha.package", b"a");
    let b = ctx.single_file("Beta.package", b"b");
    let c = ctx.single_file("Gamma.package", b"c");
    ctx.modman().arg("install").arg(&a).arg(&b).arg(&c).assert().success();
}

#[test]
fn test_uninstall_by_position() {
    let ctx = TestContext::new();
    install_three(&ctx);

    ctx.modman()
        .args(["uninstall", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-> Removing Beta"));

    assert!(!ctx.expansion_data_dir.join("Beta.package").exists());
    assert!(ctx.expansion_data_dir.join("Alpha.package").exists());
    ctx.modman()
        .arg("list-installed")
        .assert()
        .success()
        .stdout(predicate::str::contains("[0] Alpha\n[1] Gamma\n"));
}

#[test]
fn test_uninstall_range() {
    let ctx = TestContext::new();
    install_three(&ctx);

    ctx.modman().args(["uninstall", "0-1"]).assert().success();

    ctx.modman()
        .arg("list-installed")
        .assert()
        .success()
        .stdout(predicate::str::diff("[0] Gamma\n"));
}

#[test]
fn test_uninstall_list_removes_highest_first() {
    let ctx = TestContext::new();
    install_three(&ctx);

    ctx.modman()
        .args(["uninstall", "0", "2"])
        .assert()
        .success()
        .stdout(predicate::str::diff("-> Removing Gamma\n-> Removing Alpha\n"));
}

#[test]
fn test_uninstall_out_of_range_changes_nothing() {
    let ctx = TestContext::new();
    install_three(&ctx);

    ctx.modman()
        .args(["uninstall", "1", "7"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid id or range"));

    assert!(ctx.expansion_data_dir.join("Beta.package").exists());
}

#[test]
fn test_uninstall_rejects_garbage() {
    let ctx = TestContext::new();
    install_three(&ctx);

    for arg in ["abc", "2-1", "1-"] {
        ctx.modman().args(["uninstall", arg]).assert().failure();
    }
}

#[test]
fn test_uninstall_tolerates_missing_files() {
    let ctx = TestContext::new();
    install_three(&ctx);
    std::fs::remove_file(ctx.expansion_data_dir.join("Alpha.package")).unwrap();

    ctx.modman().args(["uninstall", "0"]).assert().success();
}
