//! CLI route: run context and command dispatch.

use crate::config::{ConfigLoader, FormatConfig, WmiqConfig};
use crate::connection::SnapshotConnector;
use crate::error::QueryError;
use crate::format::ValueFormatter;
use crate::query::{HostErrorPolicy, LineSink, QueryOrchestrator, QueryRequest, RunSummary};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::cli::parse::Commands;

/// Runtime context for CLI execution, built from loaded configuration.
pub struct RunContext {
    config: WmiqConfig,
}

impl RunContext {
    /// Load configuration (`config_path` replaces `WMIQ_CONFIG`) and build the context.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, QueryError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: WmiqConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WmiqConfig {
        &self.config
    }

    /// Execute a command, streaming result lines to `sink`.
    pub fn execute(
        &self,
        command: &Commands,
        sink: &mut dyn LineSink,
    ) -> Result<RunSummary, QueryError> {
        match command {
            Commands::Query {
                query,
                hosts,
                hosts_file,
                user,
                password,
                show_host,
                show_types,
                no_format,
                align,
                max_items,
                keep_going,
                snapshot_dir,
                group_separator,
            } => {
                let defaults = &self.config.query;
                let mut request = QueryRequest::new(query.clone())
                    .with_hosts(hosts.iter().cloned())
                    .with_options(defaults.render_options())
                    .with_policy(defaults.on_host_error);
                request.hosts_file = hosts_file.clone();
                request.user = user.clone();
                request.password = password.clone();

                let options = &mut request.options;
                options.show_host |= *show_host;
                options.show_types |= *show_types;
                options.align |= *align;
                if *no_format {
                    options.apply_formatting = false;
                }
                if max_items.is_some() {
                    options.max_items = *max_items;
                }
                if *keep_going {
                    request.on_host_error = HostErrorPolicy::Continue;
                }

                let formatter = self.formatter(group_separator.as_deref())?;
                let connector = self.connector(snapshot_dir.clone())?;
                debug!(request = ?request, "Query request built");

                let orchestrator = QueryOrchestrator::with_formatter(connector, formatter);
                let summary = orchestrator.run_query(&request, sink)?;
                if summary.limit_reached {
                    info!(max_items = ?request.options.max_items, "Output truncated at item limit");
                }
                Ok(summary)
            }
        }
    }

    fn formatter(&self, flag: Option<&str>) -> Result<ValueFormatter, QueryError> {
        let format = match flag {
            Some(separator) => FormatConfig {
                group_separator: separator.to_string(),
            },
            None => self.config.format.clone(),
        };
        format
            .validate()
            .map_err(|e| QueryError::Config(e.to_string()))?;
        Ok(ValueFormatter::new(format.group_separator))
    }

    fn connector(&self, flag: Option<PathBuf>) -> Result<SnapshotConnector, QueryError> {
        let dir = flag
            .or_else(|| self.config.connection.snapshot_dir.clone())
            .ok_or_else(|| {
                QueryError::Config(
                    "No snapshot directory configured (use --snapshot-dir or [connection] snapshot_dir)"
                        .to_string(),
                )
            })?;
        if !dir.is_dir() {
            return Err(QueryError::Config(format!(
                "Snapshot directory not found: {}",
                dir.display()
            )));
        }
        Ok(SnapshotConnector::new(dir))
    }
}
