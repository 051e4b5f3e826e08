//! Host targets and hosts-file loading.
//!
//! A hosts file lists one hostname per line. Everything from the first `#` is
//! a comment; surrounding whitespace is ignored and blank lines are skipped.

use crate::error::QueryError;
use std::fmt;
use std::fs;
use std::path::Path;

const COMMENT_MARKER: char = '#';

/// Name shown for the local machine.
pub const LOCAL_MACHINE: &str = "localhost";

/// The endpoint a query runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Host {
    LocalMachine,
    Named(String),
}

impl Host {
    pub fn name(&self) -> &str {
        match self {
            Host::LocalMachine => LOCAL_MACHINE,
            Host::Named(name) => name,
        }
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Login used for remote hosts. The password is never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    user: String,
    password: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    /// Pair up optional user and password; both or neither must be present.
    pub fn from_parts(
        user: Option<String>,
        password: Option<String>,
    ) -> Result<Option<Self>, QueryError> {
        match (user, password) {
            (Some(user), Some(password)) => Ok(Some(Self::new(user, password))),
            (None, None) => Ok(None),
            _ => Err(QueryError::Config(
                "Both --user and --password must be specified together".to_string(),
            )),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A host plus the credentials to open it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostTarget {
    host: Host,
    credentials: Option<Credentials>,
}

impl HostTarget {
    /// The local machine; always opened without credentials.
    pub fn local() -> Self {
        Self {
            host: Host::LocalMachine,
            credentials: None,
        }
    }

    pub fn named(name: impl Into<String>, credentials: Option<Credentials>) -> Self {
        Self {
            host: Host::Named(name.into()),
            credentials,
        }
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn name(&self) -> &str {
        self.host.name()
    }

    pub fn is_local(&self) -> bool {
        self.host == Host::LocalMachine
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }
}

/// Parse hosts-file text into hostnames, in file order.
pub fn parse_host_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .filter_map(|line| {
            let entry = match line.find(COMMENT_MARKER) {
                Some(idx) => &line[..idx],
                None => line,
            };
            let entry = entry.trim();
            (!entry.is_empty()).then(|| entry.to_string())
        })
        .collect()
}

/// Read and parse a hosts file. An unreadable file is an error.
pub fn load_host_list(path: &Path) -> Result<Vec<String>, QueryError> {
    let contents = fs::read_to_string(path).map_err(|source| QueryError::HostsFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_host_list(&contents))
}
