use super::*;

fn cool_mod_v2(ctx: &TestContext) -> PathBuf {
    let xml = r#"<mod unique="cool_mod" displayName="Cool Mod" description="Even cooler">
        <prerequisite>Cool.dll</prerequisite>
        <prerequisite>CoolExtra.dll</prerequisite>
    </mod>"#;
    ctx.sporemod(
        "CoolMod2.sporemod",
        Some(xml),
        &[("Cool.dll", b"dll v2"), ("CoolExtra.dll", b"extra")],
    )
}

#[test]
fn test_update_replaces_files() {
    let ctx = TestContext::new();
    let v1 = cool_mod(&ctx);
    let v2 = cool_mod_v2(&ctx);

    ctx.modman().arg("install").arg(&v1).assert().success();
    ctx.modman()
        .arg("update")
        .arg(&v2)
        .assert()
        .success()
        .stdout(predicate::str::contains("-> Removing Cool Mod"))
        .stdout(predicate::str::contains("-> Installing Cool Mod"));

    assert_file(&ctx.library_dir.join("Cool.dll"), b"dll v2");
    assert_file(&ctx.library_dir.join("CoolExtra.dll"), b"extra");
    assert!(!ctx.base_data_dir.join("CoolBase.package").exists());
    assert!(!ctx.expansion_data_dir.join("CoolEp1.package").exists());

    ctx.modman()
        .arg("list-installed")
        .assert()
        .success()
        .stdout(predicate::str::diff("[0] Cool Mod\n  Even cooler\n"));
}

#[test]
fn test_update_not_installed_fails() {
    let ctx = TestContext::new();
    let v2 = cool_mod_v2(&ctx);

    ctx.modman()
        .arg("update")
        .arg(&v2)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No installed mod found"));
}

#[test]
fn test_install_update_needed_installs_or_replaces() {
    let ctx = TestContext::new();
    let v1 = cool_mod(&ctx);
    let v2 = cool_mod_v2(&ctx);

    ctx.modman().args(["install", "-u"]).arg(&v1).assert().success();
    ctx.modman().args(["install", "-u"]).arg(&v2).assert().success();

    assert_file(&ctx.library_dir.join("Cool.dll"), b"dll v2");
}
