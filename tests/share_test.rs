use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;
use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

const KEY_A: &str =
    "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIM59yMN1QJmhrpf1+X4zOuvlRIkT2CEIlVxaj3qkSZ6Z alice@laptop";
const KEY_B: &str =
    "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIJmk4Ib+l6bv96eLOcWGQvAZOvh/BO8pcX8ZiQwksJ1M bob@desktop";

/// Run sshare isolated from the user's agent and config.
fn sshare(home: &assert_fs::TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("sshare");
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("SSH_AUTH_SOCK")
        .env_remove("SSHARE_GITHUB_TOKEN")
        .env_remove("SSHARE_PASTEBIN_TOKEN");
    cmd
}

/// Start a mock store on its own runtime; keep the runtime alive for the test.
fn mock_server(mocks: Vec<Mock>) -> (tokio::runtime::Runtime, MockServer) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        for mock in mocks {
            mock.mount(&server).await;
        }
        server
    });
    (rt, server)
}

fn transfer_mock() -> Mock {
    Mock::given(matchers::method("PUT"))
        .and(matchers::path("/authorized_keys"))
        .and(matchers::header("Max-Downloads", "3"))
        .and(matchers::header("Max-Days", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Url-Delete", "https://t.example/Ab12/authorized_keys/tok123")
                .set_body_string("https://t.example/Ab12/authorized_keys\n"),
        )
}

#[test]
fn share_raw_keys_to_transfer_store() {
    let home = assert_fs::TempDir::new().unwrap();
    let (rt, server) = mock_server(vec![transfer_mock()]);

    sshare(&home)
        .args(["--no-agent", "-k", KEY_A, "-k", KEY_B])
        .args(["--url", &server.uri(), "-m", "3", "-d", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Download URL: https://t.example/Ab12/authorized_keys",
        ))
        .stdout(predicate::str::contains("Delete token: tok123"));

    let requests = rt.block_on(server.received_requests()).unwrap();
    assert_eq!(requests.len(), 1);
    let body = String::from_utf8_lossy(&requests[0].body);
    assert_eq!(body, format!("{KEY_A}\n{KEY_B}\n"));
}

#[test]
fn share_key_file_with_settings_from_config() {
    let home = assert_fs::TempDir::new().unwrap();
    let (_rt, server) = mock_server(vec![transfer_mock()]);

    let key_file = home.child("id_ed25519.pub");
    key_file.write_str(&format!("{KEY_A}\n")).unwrap();
    let config = home.child("custom.toml");
    config
        .write_str(&format!(
            "[transfer]\nurl = \"{}\"\nmax_downloads = 3\nmax_days = 1\n",
            server.uri()
        ))
        .unwrap();

    sshare(&home)
        .args(["--no-agent", "--config"])
        .arg(config.path())
        .arg("-f")
        .arg(key_file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 key(s) selected"));
}

#[test]
fn failing_store_reports_upload_error() {
    let home = assert_fs::TempDir::new().unwrap();
    let (_rt, server) = mock_server(vec![
        Mock::given(matchers::method("PUT")).respond_with(ResponseTemplate::new(500)),
    ]);

    sshare(&home)
        .args(["--no-agent", "-k", KEY_A, "--url", &server.uri()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Upload failed"));
}

#[test]
fn rejects_non_http_url() {
    let home = assert_fs::TempDir::new().unwrap();

    sshare(&home)
        .args(["--no-agent", "-k", KEY_A, "--url", "ftp://t.example"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid URL"));
}

#[test]
fn fails_when_no_keys_are_found() {
    let home = assert_fs::TempDir::new().unwrap();

    sshare(&home)
        .args(["--no-agent", "--url", "http://127.0.0.1:9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No keys were selected"));
}

#[test]
fn warns_when_no_agent_is_configured() {
    let home = assert_fs::TempDir::new().unwrap();

    sshare(&home)
        .args(["--url", "http://127.0.0.1:9"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("No SSH agent path has been provided"));
}

#[test]
fn rejects_invalid_key() {
    let home = assert_fs::TempDir::new().unwrap();

    sshare(&home)
        .args(["--no-agent", "-k", "ssh-ed25519 not-base64"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid public key"));
}

#[test]
fn rejects_zero_retention() {
    let home = assert_fs::TempDir::new().unwrap();

    sshare(&home)
        .args(["--no-agent", "-k", KEY_A, "-d", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1 day"));
}

#[test]
fn missing_key_file_fails() {
    let home = assert_fs::TempDir::new().unwrap();

    sshare(&home)
        .args(["--no-agent", "-f"])
        .arg(home.path().join("missing.pub"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Key file not found"));
}

#[test]
fn pastebin_requires_dev_token() {
    let home = assert_fs::TempDir::new().unwrap();

    sshare(&home)
        .args(["--no-agent", "-k", KEY_A, "--store", "pastebin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("developer token is required"));
}

#[test]
fn pastebin_rejects_unknown_expiry() {
    let home = assert_fs::TempDir::new().unwrap();

    sshare(&home)
        .args(["--no-agent", "-k", KEY_A, "--store", "pastebin"])
        .args(["--pastebin-token", "dev", "--expiry", "fortnight"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown paste expiry"));
}

#[test]
fn share_to_pastebin() {
    let home = assert_fs::TempDir::new().unwrap();
    let (rt, server) = mock_server(vec![
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/api/api_post.php"))
            .respond_with(ResponseTemplate::new(200).set_body_string("https://paste.example/XyZ123")),
    ]);

    sshare(&home)
        .args(["--no-agent", "-k", KEY_A, "--store", "pastebin"])
        .args(["--pastebin-token", "dev", "--visibility", "private"])
        .args(["--url", &server.uri()])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{}/XyZ123", server.uri())))
        .stdout(predicate::str::contains(format!("Raw URL: {}/raw/XyZ123", server.uri())));

    let requests = rt.block_on(server.received_requests()).unwrap();
    let body = String::from_utf8_lossy(&requests[0].body).to_string();
    assert!(body.contains("api_paste_private=2"));
    assert!(body.contains("api_dev_key=dev"));
}
