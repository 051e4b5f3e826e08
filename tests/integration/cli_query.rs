//! End-to-end tests for the `wmiq` binary

use std::fs;
use std::process::Stdio;
use tempfile::TempDir;

use crate::integration::{stdout_lines, wmiq_command, SnapshotFixture, PROCESS_QUERY};

fn fixture() -> SnapshotFixture {
    let fixture = SnapshotFixture::new();
    fixture.add_processes("alpha", &[("System", 4), ("lsass.exe", 680)]);
    fixture.add_processes("beta", &[("explorer.exe", 4242)]);
    fixture
}

#[test]
fn test_query_prints_objects() {
    let home = TempDir::new().unwrap();
    let fixture = fixture();
    let output = wmiq_command(home.path())
        .arg("query")
        .arg(PROCESS_QUERY)
        .arg("--snapshot-dir")
        .arg(fixture.path())
        .args(["--hosts", "beta"])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        stdout_lines(&output),
        vec!["", "Name : explorer.exe", "ProcessId : 4,242"]
    );
}

#[test]
fn test_align_with_show_types_exits_with_configuration_status() {
    let home = TempDir::new().unwrap();
    let fixture = fixture();
    let output = wmiq_command(home.path())
        .arg("query")
        .arg(PROCESS_QUERY)
        .arg("--snapshot-dir")
        .arg(fixture.path())
        .args(["--align", "--show-types"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--align"));
}

#[test]
fn test_max_items_across_hosts() {
    let home = TempDir::new().unwrap();
    let fixture = fixture();
    let output = wmiq_command(home.path())
        .arg("query")
        .arg(PROCESS_QUERY)
        .arg("--snapshot-dir")
        .arg(fixture.path())
        .args(["--hosts", "beta", "alpha", "--max-items", "2", "--showhost"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let lines = stdout_lines(&output);
    let hosts: Vec<&str> = lines
        .iter()
        .filter_map(|line| line.strip_prefix("Host: "))
        .collect();
    assert_eq!(hosts, vec!["beta", "alpha"]);
    assert!(!lines.iter().any(|line| line.contains("lsass.exe")));
}

#[test]
fn test_unreachable_host_aborts_by_default() {
    let home = TempDir::new().unwrap();
    let fixture = fixture();
    let output = wmiq_command(home.path())
        .arg("query")
        .arg(PROCESS_QUERY)
        .arg("--snapshot-dir")
        .arg(fixture.path())
        .args(["--hosts", "beta", "gamma", "alpha", "--noformat"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout_lines(&output),
        vec!["Name : explorer.exe", "ProcessId : 4242"]
    );
    assert!(String::from_utf8_lossy(&output.stderr).contains("gamma"));
}

#[test]
fn test_keep_going_reports_failures() {
    let home = TempDir::new().unwrap();
    let fixture = fixture();
    let output = wmiq_command(home.path())
        .arg("query")
        .arg(PROCESS_QUERY)
        .arg("--snapshot-dir")
        .arg(fixture.path())
        .args(["--hosts", "beta", "gamma", "alpha", "--no-format", "--keep-going"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 6, "beta and both alpha objects are printed");
    assert!(lines.iter().all(|line| !line.is_empty()), "no separator lines");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("1 of 3 hosts failed"), "stderr={}", stderr);
}

#[test]
fn test_credentials_must_come_in_pairs() {
    let home = TempDir::new().unwrap();
    let fixture = fixture();
    let output = wmiq_command(home.path())
        .arg("query")
        .arg(PROCESS_QUERY)
        .arg("--snapshot-dir")
        .arg(fixture.path())
        .args(["--hosts", "alpha", "--user", "admin"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_hosts_file_and_config_file() {
    let home = TempDir::new().unwrap();
    let fixture = fixture();
    let hosts_file = home.path().join("hosts.txt");
    fs::write(&hosts_file, "alpha  # domain controller\n").unwrap();
    let config_file = home.path().join("wmiq.toml");
    fs::write(
        &config_file,
        format!(
            "[query]\nshow_host = true\n\n[connection]\nsnapshot_dir = {:?}\n",
            fixture.path().to_str().unwrap()
        ),
    )
    .unwrap();

    let output = wmiq_command(home.path())
        .arg("--config")
        .arg(&config_file)
        .arg("query")
        .arg(PROCESS_QUERY)
        .arg("--hosts-file")
        .arg(&hosts_file)
        .arg("--max-items")
        .arg("1")
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        stdout_lines(&output),
        vec!["", "Host: alpha", "Name : System", "ProcessId : 4"]
    );
}

#[test]
fn test_missing_snapshot_dir_is_configuration_error() {
    let home = TempDir::new().unwrap();
    let output = wmiq_command(home.path())
        .arg("query")
        .arg(PROCESS_QUERY)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_closed_stdout_ends_quietly() {
    let home = TempDir::new().unwrap();
    let fixture = SnapshotFixture::new();
    // Far more output than a pipe buffer holds, so writes hit the closed pipe.
    let names: Vec<String> = (0..20_000).map(|i| format!("worker-{}.exe", i)).collect();
    let processes: Vec<(&str, u32)> = names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i as u32))
        .collect();
    fixture.add_processes("alpha", &processes);

    let mut child = wmiq_command(home.path())
        .arg("query")
        .arg(PROCESS_QUERY)
        .arg("--snapshot-dir")
        .arg(fixture.path())
        .args(["--hosts", "alpha"])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    drop(child.stdout.take());
    let output = child.wait_with_output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(
        output.stderr.is_empty(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
}
