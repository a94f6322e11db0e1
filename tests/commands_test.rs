use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

const KEY_A: &str =
    "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIM59yMN1QJmhrpf1+X4zOuvlRIkT2CEIlVxaj3qkSZ6Z alice@laptop";
const KEY_A_FINGERPRINT: &str = "SHA256:wKHTa8fJmnZDCL3XXEX+sEA2fi/JhPYSRoSgZ3HMSZo";

fn sshare(home: &assert_fs::TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("sshare");
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("SSH_AUTH_SOCK")
        .env_remove("SSHARE_GITHUB_TOKEN")
        .env_remove("SSHARE_PASTEBIN_TOKEN")
        .env_remove("SSHARE_PASTEBIN_PASSWORD");
    cmd
}

fn mock_server(mock: Mock) -> (tokio::runtime::Runtime, MockServer) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        mock.mount(&server).await;
        server
    });
    (rt, server)
}

// ─── list ───────────────────────────────────────────────────────────

#[test]
fn list_prints_name_and_fingerprint() {
    let home = assert_fs::TempDir::new().unwrap();

    sshare(&home)
        .args(["list", "--no-agent", "-k", KEY_A])
        .assert()
        .success()
        .stdout(predicate::str::contains("alice@laptop"))
        .stdout(predicate::str::contains(KEY_A_FINGERPRINT))
        .stdout(predicate::str::contains("1 key(s) found"));
}

#[test]
fn list_without_sources_finds_nothing() {
    let home = assert_fs::TempDir::new().unwrap();

    sshare(&home)
        .args(["list", "--no-agent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No keys found"));
}

// ─── delete ─────────────────────────────────────────────────────────

#[test]
fn delete_sends_token_to_locator() {
    let home = assert_fs::TempDir::new().unwrap();
    let (rt, server) = mock_server(
        Mock::given(matchers::method("DELETE"))
            .and(matchers::path("/Ab12/authorized_keys/tok123"))
            .respond_with(ResponseTemplate::new(200)),
    );
    let locator = format!("{}/Ab12/authorized_keys", server.uri());

    sshare(&home)
        .args(["delete", &locator, "tok123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted"));

    assert_eq!(rt.block_on(server.received_requests()).unwrap().len(), 1);
}

#[test]
fn delete_reports_rejected_token() {
    let home = assert_fs::TempDir::new().unwrap();
    let (_rt, server) = mock_server(
        Mock::given(matchers::method("DELETE")).respond_with(ResponseTemplate::new(404)),
    );
    let locator = format!("{}/Ab12/authorized_keys", server.uri());

    sshare(&home)
        .args(["delete", &locator, "wrong"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Delete failed"));
}

#[test]
fn delete_on_pastebin_is_unsupported() {
    let home = assert_fs::TempDir::new().unwrap();
    let (rt, server) =
        mock_server(Mock::given(matchers::any()).respond_with(ResponseTemplate::new(200)));
    let url = server.uri();

    sshare(&home)
        .args(["delete", "--store", "pastebin", "--url", &url, "--pastebin-token", "dev"])
        .args([&format!("{url}/XyZ"), "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pastebin does not support deletion"));

    assert!(rt.block_on(server.received_requests()).unwrap().is_empty());
}

#[test]
fn delete_uses_store_from_config_file() {
    let home = assert_fs::TempDir::new().unwrap();
    let config = home.path().join("sshare.toml");
    std::fs::write(&config, "[defaults]\nstore = \"pastebin\"\n[pastebin]\ndev_token = \"dev\"\n").unwrap();

    sshare(&home)
        .args(["delete", "https://paste.example/XyZ", "abc", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("pastebin does not support deletion"));
}

// ─── login ──────────────────────────────────────────────────────────

#[test]
fn login_prints_user_key() {
    let home = assert_fs::TempDir::new().unwrap();
    let (_rt, server) = mock_server(
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/api/api_login.php"))
            .respond_with(ResponseTemplate::new(200).set_body_string("userkey42")),
    );

    sshare(&home)
        .args(["login", "--username", "alice", "--password", "secret"])
        .args(["--pastebin-token", "dev", "--url", &server.uri()])
        .assert()
        .success()
        .stdout(predicate::str::contains("userkey42"));
}

#[test]
fn login_reports_bad_credentials() {
    let home = assert_fs::TempDir::new().unwrap();
    let (_rt, server) = mock_server(
        Mock::given(matchers::method("POST")).respond_with(ResponseTemplate::new(401)),
    );

    sshare(&home)
        .args(["login", "--username", "alice", "--password", "nope"])
        .args(["--pastebin-token", "dev", "--url", &server.uri()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Pastebin login failed"));
}

// ─── config ─────────────────────────────────────────────────────────

#[test]
fn explicit_missing_config_fails() {
    let home = assert_fs::TempDir::new().unwrap();

    sshare(&home)
        .args(["list", "--no-agent", "--config"])
        .arg(home.path().join("missing.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}
