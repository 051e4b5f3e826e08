//! wmiq: query management data across hosts
//!
//! Runs one management query against a list of hosts, one host at a time,
//! and renders each returned object as text: one line per property, with
//! heuristics that recognize timestamps and integers carried as strings.

pub mod cli;
pub mod config;
pub mod connection;
pub mod error;
pub mod format;
pub mod hosts;
pub mod logging;
pub mod query;
pub mod value;
