//! Config loading facade.

use crate::config::merge::merge_policy;
use crate::config::sources::{environment, explicit_file, global_file};
use crate::config::WmiqConfig;
use crate::error::QueryError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads [`WmiqConfig`] from the layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, global file, `WMIQ_CONFIG` file (if set), environment.
    pub fn load() -> Result<WmiqConfig, QueryError> {
        let explicit = std::env::var_os(explicit_file::CONFIG_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self::build(explicit.as_deref())
    }

    /// Defaults, global file, `path`, environment. `path` must exist.
    pub fn load_from_file(path: &Path) -> Result<WmiqConfig, QueryError> {
        Self::build(Some(path))
    }

    /// Location of the global config file, if one can be determined.
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    fn build(explicit: Option<&Path>) -> Result<WmiqConfig, QueryError> {
        let mut builder = merge_policy::builder_with_defaults()?;
        builder = global_file::add_to_builder(builder)?;
        if let Some(path) = explicit {
            debug!(config_path = %path.display(), "Loading configuration file");
            builder = explicit_file::add_to_builder(builder, path)?;
        }
        builder = environment::add_to_builder(builder);

        let config: WmiqConfig = builder.build()?.try_deserialize()?;
        config.validate().map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            QueryError::Config(format!(
                "Configuration validation failed:\n{}",
                messages.join("\n")
            ))
        })?;
        Ok(config)
    }
}
