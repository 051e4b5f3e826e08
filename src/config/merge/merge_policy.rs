//! Merge rules: defaults first, then global file, explicit file, environment.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("query.apply_formatting", true)?
        .set_default("query.on_host_error", "abort")?
        .set_default("format.group_separator", ",")
}
