//! Shared test utilities for integration tests
//!
//! Snapshot fixtures written into temp directories, plus environment isolation
//! for tests that load configuration or run the binary.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Mutex;
use tempfile::TempDir;

/// Serializes tests that change process environment variables.
static XDG_ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Environment variable state to restore after test
struct EnvState {
    home: Option<String>,
    xdg_config_home: Option<String>,
    wmiq_config: Option<String>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            home: std::env::var("HOME").ok(),
            xdg_config_home: std::env::var("XDG_CONFIG_HOME").ok(),
            wmiq_config: std::env::var("WMIQ_CONFIG").ok(),
        }
    }

    fn restore(self) {
        restore_var("HOME", self.home);
        restore_var("XDG_CONFIG_HOME", self.xdg_config_home);
        restore_var("WMIQ_CONFIG", self.wmiq_config);
    }
}

fn restore_var(key: &str, value: Option<String>) {
    match value {
        Some(orig) => std::env::set_var(key, orig),
        None => std::env::remove_var(key),
    }
}

/// Run `f` with HOME and XDG_CONFIG_HOME pointed into `test_dir` and
/// `WMIQ_CONFIG` unset, restoring the environment afterwards.
pub fn with_xdg_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = XDG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let test_home = test_dir.path().join("home");
    std::fs::create_dir_all(&test_home).unwrap();

    std::env::set_var("HOME", &test_home);
    std::env::set_var("XDG_CONFIG_HOME", test_dir.path());
    std::env::remove_var("WMIQ_CONFIG");

    let result = f();

    env_state.restore();

    result
}

/// A directory of host snapshots.
pub struct SnapshotFixture {
    dir: TempDir,
}

impl SnapshotFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn add_json(&self, host: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(format!("{}.json", host));
        std::fs::write(&path, contents).unwrap();
        path
    }

    pub fn add_toml(&self, host: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(format!("{}.toml", host));
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// A host answering `SELECT Name, ProcessId FROM Win32_Process` with one
    /// object per process name.
    pub fn add_processes(&self, host: &str, processes: &[(&str, u32)]) -> PathBuf {
        let objects: Vec<String> = processes
            .iter()
            .map(|(name, pid)| {
                format!(
                    r#"[{{"name": "Name", "value": {{"type": "string", "value": "{}"}}}}, {{"name": "ProcessId", "value": {{"type": "uint32", "value": {}}}}}]"#,
                    name, pid
                )
            })
            .collect();
        self.add_json(
            host,
            &format!(
                r#"{{"queries": {{"{}": [{}]}}}}"#,
                PROCESS_QUERY,
                objects.join(", ")
            ),
        )
    }
}

pub const PROCESS_QUERY: &str = "SELECT Name, ProcessId FROM Win32_Process";

/// The `wmiq` binary with configuration and log locations isolated under `home`.
pub fn wmiq_command(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_wmiq"));
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_STATE_HOME", home.join("state"))
        .env_remove("WMIQ_CONFIG")
        .env_remove("WMIQ_LOG")
        .env_remove("WMIQ_LOG_FORMAT")
        .env_remove("WMIQ_LOG_OUTPUT");
    cmd
}

/// Lines written to stdout.
pub fn stdout_lines(output: &std::process::Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}
