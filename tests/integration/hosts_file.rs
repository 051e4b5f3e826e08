//! Host list files feeding a query run

use std::fs;
use tempfile::TempDir;
use wmiq::connection::SnapshotConnector;
use wmiq::error::QueryError;
use wmiq::hosts::load_host_list;
use wmiq::query::{QueryOrchestrator, QueryRequest, RenderOptions};

use crate::integration::{SnapshotFixture, PROCESS_QUERY};

#[test]
fn test_comments_and_blank_lines_ignored() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("hosts.txt");
    fs::write(&path, "host1\n# comment\n\nhost2  # trailing comment\n").unwrap();

    assert_eq!(load_host_list(&path).unwrap(), vec!["host1", "host2"]);
}

#[test]
fn test_file_hosts_follow_explicit_hosts() {
    let fixture = SnapshotFixture::new();
    fixture.add_processes("web01", &[("nginx.exe", 10)]);
    fixture.add_processes("web02", &[("nginx.exe", 20)]);
    fixture.add_processes("db01", &[("sqlservr.exe", 30)]);

    let temp = TempDir::new().unwrap();
    let path = temp.path().join("hosts.txt");
    fs::write(&path, "# web tier\nweb02\n  web01\n").unwrap();

    let request = QueryRequest::new(PROCESS_QUERY)
        .with_hosts(["db01"])
        .with_hosts_file(&path)
        .with_options(RenderOptions {
            show_host: true,
            apply_formatting: false,
            ..RenderOptions::default()
        });
    let orchestrator = QueryOrchestrator::new(SnapshotConnector::new(fixture.path()));
    let mut lines: Vec<String> = Vec::new();
    orchestrator.run_query(&request, &mut lines).unwrap();

    let hosts: Vec<&str> = lines
        .iter()
        .filter_map(|line| line.strip_prefix("Host: "))
        .collect();
    assert_eq!(hosts, vec!["db01", "web02", "web01"]);
}

#[test]
fn test_missing_hosts_file_is_configuration_error() {
    let fixture = SnapshotFixture::new();
    fixture.add_processes("db01", &[("sqlservr.exe", 30)]);
    let temp = TempDir::new().unwrap();

    let request = QueryRequest::new(PROCESS_QUERY)
        .with_hosts(["db01"])
        .with_hosts_file(temp.path().join("missing.txt"));
    let orchestrator = QueryOrchestrator::new(SnapshotConnector::new(fixture.path()));
    let mut lines: Vec<String> = Vec::new();
    let err = orchestrator.run_query(&request, &mut lines).unwrap_err();

    assert!(matches!(err, QueryError::HostsFile { .. }));
    assert!(err.is_configuration());
    assert!(lines.is_empty(), "no host is queried when the host list is unreadable");
}

#[test]
fn test_empty_hosts_file_means_local_machine() {
    let fixture = SnapshotFixture::new();
    fixture.add_processes("localhost", &[("Idle", 0)]);
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("hosts.txt");
    fs::write(&path, "# nothing yet\n\n").unwrap();

    let request = QueryRequest::new(PROCESS_QUERY).with_hosts_file(&path);
    let orchestrator = QueryOrchestrator::new(SnapshotConnector::new(fixture.path()));
    let mut lines: Vec<String> = Vec::new();
    let summary = orchestrator.run_query(&request, &mut lines).unwrap();
    assert_eq!(summary.hosts_queried, 1);
    assert_eq!(summary.objects_rendered, 1);
}
