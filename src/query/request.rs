//! Query request and rendering options.

use crate::error::QueryError;
use crate::hosts::{load_host_list, Credentials, HostTarget};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// What to do when a host cannot be connected to or queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostErrorPolicy {
    /// Stop the run at the first failing host.
    #[default]
    Abort,
    /// Record the failure and move on to the next host.
    Continue,
}

/// How objects are rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Precede each object with a `Host: {name}` line.
    pub show_host: bool,
    /// Append ` [{type}]` after each property name.
    pub show_types: bool,
    /// Heuristics, digit grouping, markers and blank lines between objects.
    pub apply_formatting: bool,
    /// Left-justify names to the longest name within each object.
    pub align: bool,
    /// Ceiling on objects rendered across all hosts. `None` is unbounded.
    pub max_items: Option<usize>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_host: false,
            show_types: false,
            apply_formatting: true,
            align: false,
            max_items: None,
        }
    }
}

impl RenderOptions {
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.align && self.show_types {
            return Err(QueryError::Config(
                "--align cannot be combined with --show-types".to_string(),
            ));
        }
        Ok(())
    }
}

/// One invocation: query text, where to run it, and how to render it.
#[derive(Clone, Default)]
pub struct QueryRequest {
    pub query: String,
    /// Hosts named explicitly, in order.
    pub hosts: Vec<String>,
    /// File listing further hosts, appended after `hosts`.
    pub hosts_file: Option<PathBuf>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub options: RenderOptions,
    pub on_host_error: HostErrorPolicy,
}

impl fmt::Debug for QueryRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryRequest")
            .field("query", &self.query)
            .field("hosts", &self.hosts)
            .field("hosts_file", &self.hosts_file)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("options", &self.options)
            .field("on_host_error", &self.on_host_error)
            .finish()
    }
}

impl QueryRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hosts = hosts.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_hosts_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.hosts_file = Some(path.into());
        self
    }

    pub fn with_credentials(
        mut self,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.user = Some(user.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_policy(mut self, policy: HostErrorPolicy) -> Self {
        self.on_host_error = policy;
        self
    }

    /// Check everything that can be checked without touching a host.
    pub fn validate(&self) -> Result<Option<Credentials>, QueryError> {
        if self.query.trim().is_empty() {
            return Err(QueryError::Config("No query text specified".to_string()));
        }
        self.options.validate()?;
        Credentials::from_parts(self.user.clone(), self.password.clone())
    }

    /// Validate, then build the host list: explicit hosts, then hosts-file
    /// entries, falling back to the local machine when both are empty.
    pub fn resolve_hosts(&self) -> Result<Vec<HostTarget>, QueryError> {
        let credentials = self.validate()?;

        let mut names = self.hosts.clone();
        if let Some(path) = &self.hosts_file {
            names.extend(load_host_list(path)?);
        }

        if names.is_empty() {
            return Ok(vec![HostTarget::local()]);
        }
        Ok(names
            .into_iter()
            .map(|name| HostTarget::named(name, credentials.clone()))
            .collect())
    }
}
