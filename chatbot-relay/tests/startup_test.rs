//! Runs the compiled binary to check startup behaviour.

use std::net::TcpListener;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

const REQUIRED: [(&str, &str); 4] = [
    ("SUPERVITY_ORG_ID", "org-42"),
    ("SUPERVITY_API_TOKEN", "token-abc"),
    ("SUPERVITY_API_ORG", "acme"),
    ("SUPERVITY_COLLECTION_NAME", "handbook"),
];

const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/public");

/// Empty working directory, so no local `.env` or `configuration` file is
/// picked up by the binary under test.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("chatbot-relay-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn free_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

#[test]
fn exits_with_code_1_when_any_credential_is_missing() {
    let workdir = scratch_dir("missing-credential");
    for (missing, _) in REQUIRED {
        let port = free_port();
        let mut command = Command::new(env!("CARGO_BIN_EXE_chatbot-relay"));
        command
            .env_clear()
            .current_dir(&workdir)
            .env("STATIC_DIR", STATIC_DIR)
            .env("PORT", port.to_string())
            .env("HOST", "127.0.0.1");
        for (name, value) in REQUIRED.iter().filter(|(name, _)| *name != missing) {
            command.env(name, value);
        }

        let output = command.output().expect("Failed to run chatbot-relay");

        assert_eq!(output.status.code(), Some(1), "without {missing}");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains(missing), "stderr should name {missing}: {stderr}");

        // Nothing may have been left bound to the configured port.
        assert!(TcpListener::bind(("127.0.0.1", port)).is_ok());
    }
}

#[test]
fn starts_and_serves_health_with_complete_configuration() {
    let workdir = scratch_dir("complete");
    let port = free_port();
    let mut child = Command::new(env!("CARGO_BIN_EXE_chatbot-relay"))
        .env_clear()
        .current_dir(&workdir)
        .envs(REQUIRED)
        .env("STATIC_DIR", STATIC_DIR)
        .env("PORT", port.to_string())
        .env("HOST", "127.0.0.1")
        .spawn()
        .expect("Failed to start chatbot-relay");

    let mut connected = false;
    for _ in 0..50 {
        if std::net::TcpStream::connect(("127.0.0.1", port)).is_ok() {
            connected = true;
            break;
        }
        std::thread::sleep(Duration::from_millis(100));
    }

    child.kill().ok();
    child.wait().ok();
    assert!(connected, "server never accepted connections on port {port}");
}
