use std::process::{Command, Output};
use tempfile::TempDir;
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Runs the binary from an empty directory so no `.env` file can supply a token.
fn run_gloss(server: &MockServer, token: Option<&str>) -> Output {
    let dir = TempDir::new().unwrap();

    let mut command = Command::new(env!("CARGO_BIN_EXE_gloss"));
    command
        .current_dir(dir.path())
        .env_remove("GITHUB_TOKEN")
        .args(["response-times", "--server", &server.uri(), "--org", "example-org"]);
    if let Some(token) = token {
        command.env("GITHUB_TOKEN", token);
    }

    command.output().unwrap()
}

async fn unreachable_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(0)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_missing_token_exits_before_any_request() {
    let server = unreachable_server().await;

    let output = run_gloss(&server, None);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1), "stderr: {stderr}");
    assert!(stderr.contains("Please set GITHUB_TOKEN"), "stderr: {stderr}");
    assert!(output.stdout.is_empty());
    server.verify().await;
}

#[tokio::test]
async fn test_empty_token_counts_as_missing() {
    let server = unreachable_server().await;

    let output = run_gloss(&server, Some(""));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1), "stderr: {stderr}");
    assert!(stderr.contains("Please set GITHUB_TOKEN"), "stderr: {stderr}");
    server.verify().await;
}
