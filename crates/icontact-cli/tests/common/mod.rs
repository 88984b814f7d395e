use std::path::Path;
use std::process::{Command, Output};

pub const API_KEY: &str = "cli-key";
pub const SHARED_SECRET: &str = "cli-secret";
pub const USERNAME: &str = "jdoe";
pub const PASSWORD: &str = "password";
/// Call path of the login for USERNAME with PASSWORD.
pub const LOGIN_PATH: &str = "/auth/login/jdoe/5f4dcc3b5aa765d61d8327deb882cf99";

const ENV_VARS: &[&str] = &[
    "ICONTACT_API_KEY",
    "ICONTACT_SHARED_SECRET",
    "ICONTACT_USERNAME",
    "ICONTACT_PASSWORD",
    "ICONTACT_PASSWORD_MD5",
    "ICONTACT_API_URL",
    "ICONTACT_TIMEOUT_SECS",
    "RUST_LOG",
];

/// A CLI command isolated from the caller's environment and session.
fn isolated_command(args: &[&str], home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_icontact"));
    cmd.args(args);
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.env("HOME", home);
    cmd.env("XDG_DATA_HOME", home.join("data"));
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Run the CLI without any account configuration.
pub fn run_cli_bare(args: &[&str], home: &Path) -> Output {
    isolated_command(args, home)
        .output()
        .expect("Failed to execute CLI")
}

/// Run the CLI with the test account configured through the environment.
pub fn run_cli_with_env(args: &[&str], home: &Path, api_url: &str) -> Output {
    let mut cmd = isolated_command(args, home);
    cmd.env("ICONTACT_API_KEY", API_KEY);
    cmd.env("ICONTACT_SHARED_SECRET", SHARED_SECRET);
    cmd.env("ICONTACT_USERNAME", USERNAME);
    cmd.env("ICONTACT_PASSWORD", PASSWORD);
    cmd.env("ICONTACT_API_URL", api_url);
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI with the test account and expect success.
pub fn run_cli_with_env_success(args: &[&str], home: &Path, api_url: &str) -> String {
    let output = run_cli_with_env(args, home, api_url);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Location of the stored session under an isolated HOME.
pub fn session_file(home: &Path) -> std::path::PathBuf {
    home.join("data").join("icontact").join("session.json")
}
