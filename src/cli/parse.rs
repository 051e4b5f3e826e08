//! CLI parse: clap types for wmiq. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// wmiq - run a management query across hosts and print the results
#[derive(Parser)]
#[command(name = "wmiq")]
#[command(version)]
#[command(about = "Run a management query across hosts and print each object's properties")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (loaded after the global config file)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stderr, file, file+stderr)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a query and print every returned object
    Query {
        /// Query text, passed to each host unchanged
        query: String,

        /// Hosts to query (default: the local machine)
        #[arg(long, short = 'H', num_args = 1..)]
        hosts: Vec<String>,

        /// File listing one host per line; `#` starts a comment
        #[arg(long)]
        hosts_file: Option<PathBuf>,

        /// User for remote hosts (requires --password)
        #[arg(long, short = 'u')]
        user: Option<String>,

        /// Password for remote hosts (requires --user)
        #[arg(long, short = 'p')]
        password: Option<String>,

        /// Print a `Host:` line before each object
        #[arg(long, alias = "showhost")]
        show_host: bool,

        /// Print each property's type after its name
        #[arg(long, alias = "showtypes")]
        show_types: bool,

        /// Print raw values: no heuristics, grouping or blank separator lines
        #[arg(long, alias = "noformat")]
        no_format: bool,

        /// Align property names within each object
        #[arg(long)]
        align: bool,

        /// Stop after this many objects across all hosts
        #[arg(long)]
        max_items: Option<usize>,

        /// Report failing hosts and continue with the rest
        #[arg(long)]
        keep_going: bool,

        /// Directory of recorded host snapshots
        #[arg(long)]
        snapshot_dir: Option<PathBuf>,

        /// Digit group separator for integers
        #[arg(long)]
        group_separator: Option<String>,
    },
}
