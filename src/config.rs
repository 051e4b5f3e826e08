//! Configuration System
//!
//! Layered configuration for query defaults, number formatting, the
//! connection backend and logging. Sources, lowest precedence first:
//! built-in defaults, the global config file, an explicit config file
//! (`--config` or `WMIQ_CONFIG`), then `WMIQ__SECTION__KEY` environment
//! variables. Command-line flags are applied on top by the CLI.

use crate::logging::LoggingConfig;
use crate::query::{HostErrorPolicy, RenderOptions};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge {
    pub mod merge_policy;
}
mod sources {
    pub mod environment;
    pub mod explicit_file;
    pub mod global_file;
}

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WmiqConfig {
    /// Defaults for the query command's flags
    #[serde(default)]
    pub query: QueryDefaults,

    /// Number formatting
    #[serde(default)]
    pub format: FormatConfig,

    /// Connection backend
    #[serde(default)]
    pub connection: ConnectionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Defaults for rendering and host handling. Flags given on the command line
/// switch these on; they cannot switch them off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryDefaults {
    #[serde(default)]
    pub show_host: bool,

    #[serde(default)]
    pub show_types: bool,

    #[serde(default = "default_true")]
    pub apply_formatting: bool,

    #[serde(default)]
    pub align: bool,

    #[serde(default)]
    pub max_items: Option<usize>,

    #[serde(default)]
    pub on_host_error: HostErrorPolicy,
}

fn default_true() -> bool {
    true
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            show_host: false,
            show_types: false,
            apply_formatting: true,
            align: false,
            max_items: None,
            on_host_error: HostErrorPolicy::Abort,
        }
    }
}

impl QueryDefaults {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            show_host: self.show_host,
            show_types: self.show_types,
            apply_formatting: self.apply_formatting,
            align: self.align,
            max_items: self.max_items,
        }
    }
}

/// Number formatting settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Digit group separator (locale-dependent; `,` when unset)
    #[serde(default = "default_group_separator")]
    pub group_separator: String,
}

fn default_group_separator() -> String {
    crate::format::grouping::DEFAULT_GROUP_SEPARATOR.to_string()
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            group_separator: default_group_separator(),
        }
    }
}

impl FormatConfig {
    /// A separator made of digits or a sign would make grouped numbers ambiguous.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self
            .group_separator
            .chars()
            .any(|c| c.is_ascii_digit() || c == '-')
        {
            return Err(ValidationError::Format(format!(
                "group_separator {:?} must not contain digits or '-'",
                self.group_separator
            )));
        }
        Ok(())
    }
}

/// Connection backend settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Directory of recorded host snapshots
    #[serde(default)]
    pub snapshot_dir: Option<PathBuf>,
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Query(String),
    Format(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Query(msg) => write!(f, "query: {}", msg),
            ValidationError::Format(msg) => write!(f, "format: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl WmiqConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.query.align && self.query.show_types {
            errors.push(ValidationError::Query(
                "align and show_types cannot both be enabled".to_string(),
            ));
        }

        if let Err(e) = self.format.validate() {
            errors.push(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
