//! Snapshot connector: serves recorded query results from disk.
//!
//! Each host has one snapshot file in the snapshot directory, named
//! `<host>.json` or `<host>.toml` (the local machine is `localhost`). A
//! snapshot maps query text to the objects it returned:
//!
//! ```toml
//! user = "admin"   # optional; remote connections must log in as this user
//!
//! [queries]
//! "SELECT Name FROM Win32_Service" = [
//!     [ { name = "Name", value = { type = "string", value = "Spooler" } } ],
//! ]
//! ```
//!
//! Query text is matched case-insensitively with whitespace collapsed. An
//! optional `default` list answers any query not listed.

use crate::connection::{Connection, Connector, ResultStream};
use crate::error::ConnectionError;
use crate::hosts::HostTarget;
use crate::value::PropertySet;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const EXTENSIONS: &[&str] = &["json", "toml"];

/// Recorded results for one host.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Snapshot {
    /// User a remote connection must present.
    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub queries: BTreeMap<String, Vec<PropertySet>>,

    /// Answer for queries not listed in `queries`.
    #[serde(default)]
    pub default: Option<Vec<PropertySet>>,
}

impl Snapshot {
    /// Objects recorded for `query`.
    pub fn lookup(&self, query: &str) -> Option<&[PropertySet]> {
        let wanted = normalize_query(query);
        self.queries
            .iter()
            .find(|(recorded, _)| normalize_query(recorded) == wanted)
            .map(|(_, objects)| objects.as_slice())
            .or(self.default.as_deref())
    }

    /// Load a snapshot file; the format follows the extension.
    pub fn load(path: &Path) -> Result<Self, ConnectionError> {
        let content = fs::read_to_string(path)?;
        let invalid = |message: String| ConnectionError::InvalidSnapshot {
            path: path.to_path_buf(),
            message,
        };
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&content).map_err(|e| invalid(e.to_string())),
            _ => serde_json::from_str(&content).map_err(|e| invalid(e.to_string())),
        }
    }
}

fn normalize_query(query: &str) -> String {
    query
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Connector backed by a directory of snapshot files.
#[derive(Debug, Clone)]
pub struct SnapshotConnector {
    dir: PathBuf,
}

impl SnapshotConnector {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Snapshot file for `host`, if one exists.
    pub fn snapshot_path(&self, host: &str) -> Option<PathBuf> {
        if host.is_empty() || host.contains(['/', '\\']) || host == "." || host == ".." {
            return None;
        }
        EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{}.{}", host, ext)))
            .find(|path| path.is_file())
    }
}

impl Connector for SnapshotConnector {
    fn open(&self, target: &HostTarget) -> Result<Box<dyn Connection + '_>, ConnectionError> {
        let host = target.name();
        let path = self.snapshot_path(host).ok_or_else(|| {
            ConnectionError::Unreachable(format!(
                "no snapshot for {} in {}",
                host,
                self.dir.display()
            ))
        })?;
        debug!(host, path = %path.display(), "Opening snapshot");
        let snapshot = Snapshot::load(&path)?;

        if let (Some(required), false) = (snapshot.user.as_deref(), target.is_local()) {
            match target.credentials() {
                Some(creds) if creds.user() == required => {}
                Some(creds) => {
                    return Err(ConnectionError::AccessDenied(format!(
                        "user {} may not log in to {}",
                        creds.user(),
                        host
                    )))
                }
                None => {
                    return Err(ConnectionError::AccessDenied(format!(
                        "{} requires credentials",
                        host
                    )))
                }
            }
        }

        Ok(Box::new(SnapshotConnection {
            host: host.to_string(),
            snapshot,
        }))
    }
}

struct SnapshotConnection {
    host: String,
    snapshot: Snapshot,
}

impl Connection for SnapshotConnection {
    fn execute(&mut self, query: &str) -> Result<ResultStream<'_>, ConnectionError> {
        let objects = self.snapshot.lookup(query).ok_or_else(|| {
            ConnectionError::QueryRejected(format!(
                "{} has no recorded result for \"{}\"",
                self.host, query
            ))
        })?;
        debug!(host = %self.host, objects = objects.len(), "Executing snapshot query");
        Ok(Box::new(objects.iter().cloned().map(Ok)))
    }
}
