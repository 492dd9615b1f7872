use std::process::{Command, Output};

use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_bronze-ingest");

/// Runs the binary from an empty directory so no `.env` file is picked up.
fn run(args: &[&str], env: &[(&str, &str)]) -> Output {
    let dir = TempDir::new().unwrap();
    let mut cmd = Command::new(BIN);
    cmd.current_dir(dir.path()).args(args).env("RUST_LOG", "error");
    for var in [
        "POSTGRES_HOST",
        "POSTGRES_PORT",
        "POSTGRES_USER",
        "POSTGRES_PASSWORD",
        "POSTGRES_DB",
        "POSTGRES_POOL_SIZE",
    ] {
        cmd.env_remove(var);
    }
    cmd.envs(env.iter().copied());
    cmd.output().unwrap()
}

#[test]
fn missing_host_fails_before_anything_else() {
    let out = run(
        &["run", "--symbols", "AAPL"],
        &[("POSTGRES_USER", "ingest"), ("POSTGRES_DB", "market")],
    );

    assert!(!out.status.success());
    assert!(out.stdout.is_empty(), "no summary is printed");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("POSTGRES_HOST"), "stderr: {stderr}");
}

#[test]
fn setup_also_requires_db_settings() {
    let out = run(&["setup"], &[("POSTGRES_HOST", "localhost")]);

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("POSTGRES_USER"), "stderr: {stderr}");
}

#[test]
fn inverted_dates_are_rejected_before_connecting() {
    let out = run(
        &["run", "--start", "2024-06-01", "--end", "2024-01-01"],
        &[
            ("POSTGRES_HOST", "127.0.0.1"),
            ("POSTGRES_PORT", "1"),
            ("POSTGRES_USER", "ingest"),
            ("POSTGRES_DB", "market"),
        ],
    );

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("after end date"), "stderr: {stderr}");
}

#[test]
fn blank_symbol_is_rejected() {
    let out = run(
        &["run", "--symbols", "AAPL, ,MSFT"],
        &[
            ("POSTGRES_HOST", "127.0.0.1"),
            ("POSTGRES_USER", "ingest"),
            ("POSTGRES_DB", "market"),
        ],
    );

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("blank"), "stderr: {stderr}");
}
