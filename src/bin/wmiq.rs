//! wmiq CLI Binary
//!
//! Runs a management query across hosts; results go to stdout, diagnostics to stderr.

use anyhow::Context;
use clap::Parser;
use std::io::{self, ErrorKind};
use std::process;
use tracing::{error, info};
use wmiq::cli::{failure_report, map_error, Cli, RunContext};
use wmiq::config::ConfigLoader;
use wmiq::error::QueryError;
use wmiq::logging::{init_logging, LoggingConfig};
use wmiq::query::{ExitStatus, WriterSink};

fn main() {
    let cli = Cli::parse();

    // Build logging config from CLI args, env vars, and config file
    let logging_config = build_logging_config(&cli);

    if let Err(e) = init_logging(Some(&logging_config)).context("Failed to initialize logging") {
        eprintln!("{:#}", e);
        process::exit(ExitStatus::Configuration.code());
    }

    info!("wmiq starting");

    let context = match RunContext::new(cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(ExitStatus::Configuration.code());
        }
    };

    let stdout = io::stdout();
    let mut sink = WriterSink::new(stdout.lock());
    let result = context
        .execute(&cli.command, &mut sink)
        .and_then(|summary| {
            sink.flush()?;
            Ok(summary)
        });

    match &result {
        Ok(summary) => {
            for line in failure_report(summary) {
                eprintln!("{}", line);
            }
            info!(
                objects = summary.objects_rendered,
                failures = summary.failures.len(),
                "Command completed"
            );
        }
        // A closed pipe (e.g. `wmiq query ... | head`) ends the run quietly.
        Err(QueryError::Output(e)) if e.kind() == ErrorKind::BrokenPipe => {
            info!("Output closed by reader");
            process::exit(ExitStatus::Success.code());
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(e));
        }
    }

    process::exit(ExitStatus::of(&result).code());
}

/// Build logging configuration from CLI args, environment, and config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let loaded = match cli.config {
        Some(ref config_path) => ConfigLoader::load_from_file(config_path),
        None => ConfigLoader::load(),
    };
    let mut config = loaded.ok().map(|c| c.logging).unwrap_or_default();

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
        // Keep verbose output visible when logs would otherwise only reach a file.
        if config.output == "file" {
            config.output = "file+stderr".to_string();
        }
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }

    let output_uses_file = config.output == "file" || config.output == "file+stderr";
    if config.enabled && output_uses_file {
        if let Ok(path) =
            wmiq::logging::resolve_log_file_path(cli.log_file.clone(), config.file.clone())
        {
            config.file = Some(path);
        }
    } else if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }

    config
}
