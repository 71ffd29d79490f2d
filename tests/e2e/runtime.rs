use super::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn runtime_archive(version: &str) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    zip.start_file("SporeModAPI.combined.dll", zip::write::FileOptions::default())
        .unwrap();
    zip.write_all(&fake_library(version)).unwrap();
    zip.finish().unwrap().into_inner()
}

async fn serve_runtime(ctx: &TestContext, version: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/modapi.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(runtime_archive(version)))
        .mount(&server)
        .await;

    let mut config = std::fs::read_to_string(&ctx.config_file).unwrap();
    config.push_str(&format!("runtime_update_url: {}/modapi.zip\n", server.uri()));
    std::fs::write(&ctx.config_file, config).unwrap();
    server
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_runtime_first_time_then_unchanged() {
    let ctx = TestContext::new();
    let _server = serve_runtime(&ctx, "2.5.300.0").await;

    ctx.modman()
        .arg("update-runtime")
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed SporeModAPI.dll 2.5.300"));
    assert!(ctx.runtime_dir.join("SporeModAPI.dll").is_file());

    ctx.modman()
        .arg("update-modapi")
        .assert()
        .success()
        .stdout(predicate::str::contains("already up to date"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_runtime_replaces_older_library() {
    let ctx = TestContext::new();
    ctx.install_runtime("2.5.100.0");
    let _server = serve_runtime(&ctx, "2.5.300.0").await;

    ctx.modman()
        .arg("update-runtime")
        .assert()
        .success()
        .stdout(predicate::str::contains("from 2.5.100 to 2.5.300"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_runtime_server_error() {
    let ctx = TestContext::new();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let mut config = std::fs::read_to_string(&ctx.config_file).unwrap();
    config.push_str(&format!("runtime_update_url: {}/modapi.zip\n", server.uri()));
    std::fs::write(&ctx.config_file, config).unwrap();

    ctx.modman()
        .arg("update-runtime")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Runtime library update failed"));
    assert!(!ctx.runtime_dir.join("SporeModAPI.dll").exists());
}
