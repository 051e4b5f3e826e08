//! Integration tests for the wmiq query engine and CLI

mod cli_query;
mod config_integration;
mod hosts_file;
mod test_utils;

pub use test_utils::*;
