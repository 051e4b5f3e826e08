//! CLI domain: parse, route, and output only.
//! No query logic; the route table hands requests to the orchestrator.

mod output;
mod parse;
mod route;

pub use output::{failure_report, map_error};
pub use parse::{Cli, Commands};
pub use route::RunContext;
