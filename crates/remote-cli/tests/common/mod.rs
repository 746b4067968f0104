use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Run the CLI binary with an isolated HOME so saved configuration never
/// touches the real user directory.
pub fn run_cli(args: &[&str], home: &Path) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_panel-remote"));
    cmd.args(args);
    cmd.env("HOME", home);
    cmd.env("XDG_CONFIG_HOME", home.join("config"));
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI off the async runtime so the mock Panel keeps serving.
pub async fn run_cli_async(args: &[&str], home: &Path) -> Output {
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    let home: PathBuf = home.to_path_buf();
    tokio::task::spawn_blocking(move || {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        run_cli(&args, &home)
    })
    .await
    .expect("CLI task panicked")
}

/// Save a configuration pointing at `panel_url`.
pub fn configure(home: &Path, panel_url: &str) {
    let output = run_cli(
        &[
            "configure",
            "--url",
            panel_url,
            "--token-id",
            "node-id",
            "--token",
            "node-secret",
        ],
        home,
    );
    assert_success(&output);
}

pub fn assert_success(output: &Output) {
    if !output.status.success() {
        panic!(
            "CLI command failed\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
