//! Query orchestration across hosts.
//!
//! Hosts are processed strictly in order, one connection at a time: open,
//! execute, drain the result stream, close, next host. Output is therefore
//! grouped by host and in source order within a host.

use crate::connection::Connector;
use crate::error::QueryError;
use crate::format::ValueFormatter;
use crate::hosts::HostTarget;
use crate::query::render::ObjectRenderer;
use crate::query::request::{HostErrorPolicy, QueryRequest};
use crate::query::sink::LineSink;
use tracing::{debug, info, warn};

/// Process exit status for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    /// A host could not be connected to or queried, or output failed.
    HostFailure,
    /// The request was rejected before any connection was made.
    Configuration,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::HostFailure => 1,
            ExitStatus::Configuration => 2,
        }
    }

    pub fn of(result: &Result<RunSummary, QueryError>) -> Self {
        match result {
            Ok(summary) => summary.exit_status(),
            Err(err) if err.is_configuration() => ExitStatus::Configuration,
            Err(_) => ExitStatus::HostFailure,
        }
    }
}

/// A host skipped under [`HostErrorPolicy::Continue`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostFailure {
    pub host: String,
    pub message: String,
}

/// What a completed run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Hosts a connection was attempted to.
    pub hosts_queried: usize,
    pub objects_rendered: usize,
    /// The `max_items` ceiling left objects unrendered or hosts unqueried.
    pub limit_reached: bool,
    pub failures: Vec<HostFailure>,
}

impl RunSummary {
    pub fn exit_status(&self) -> ExitStatus {
        if self.failures.is_empty() {
            ExitStatus::Success
        } else {
            ExitStatus::HostFailure
        }
    }
}

/// Runs a query across the request's hosts and streams rendered lines to a sink.
pub struct QueryOrchestrator<C> {
    connector: C,
    formatter: ValueFormatter,
}

impl<C: Connector> QueryOrchestrator<C> {
    pub fn new(connector: C) -> Self {
        Self::with_formatter(connector, ValueFormatter::default())
    }

    pub fn with_formatter(connector: C, formatter: ValueFormatter) -> Self {
        Self {
            connector,
            formatter,
        }
    }

    /// Execute `request`, writing every rendered line to `sink`.
    ///
    /// Configuration problems are reported before any connection is opened
    /// and before any line is written.
    pub fn run_query(
        &self,
        request: &QueryRequest,
        sink: &mut dyn LineSink,
    ) -> Result<RunSummary, QueryError> {
        let targets = request.resolve_hosts()?;
        let renderer = ObjectRenderer::new(request.options.clone(), self.formatter.clone());
        let limit = request.options.max_items;
        let mut summary = RunSummary::default();

        info!(hosts = targets.len(), "Running query");

        for target in &targets {
            // Reaching this point means at least one host is left unqueried.
            if limit.is_some_and(|max| summary.objects_rendered >= max) {
                summary.limit_reached = true;
                debug!("Item limit reached, skipping remaining hosts");
                break;
            }

            summary.hosts_queried += 1;
            match self.query_host(target, request, &renderer, &mut summary, sink) {
                Ok(()) => {}
                Err(err @ QueryError::Output(_)) => return Err(err),
                Err(err) => match request.on_host_error {
                    HostErrorPolicy::Abort => return Err(err),
                    HostErrorPolicy::Continue => {
                        warn!(host = target.name(), error = %err, "Host failed, continuing");
                        summary.failures.push(HostFailure {
                            host: target.name().to_string(),
                            message: err.to_string(),
                        });
                    }
                },
            }
        }

        info!(
            hosts = summary.hosts_queried,
            objects = summary.objects_rendered,
            failures = summary.failures.len(),
            "Query finished"
        );
        Ok(summary)
    }

    fn query_host(
        &self,
        target: &HostTarget,
        request: &QueryRequest,
        renderer: &ObjectRenderer,
        summary: &mut RunSummary,
        sink: &mut dyn LineSink,
    ) -> Result<(), QueryError> {
        let host = target.name();
        debug!(host, "Connecting");
        let mut connection = self
            .connector
            .open(target)
            .map_err(|source| QueryError::Connect {
                host: host.to_string(),
                source,
            })?;

        let mut stream = connection
            .execute(&request.query)
            .map_err(|source| QueryError::Query {
                host: host.to_string(),
                source,
            })?;

        let limit = request.options.max_items;
        while let Some(item) = stream.next() {
            let object = item.map_err(|source| QueryError::Query {
                host: host.to_string(),
                source,
            })?;
            for line in renderer.render(host, &object) {
                sink.write_line(&line)?;
            }
            summary.objects_rendered += 1;

            if limit.is_some_and(|max| summary.objects_rendered >= max) {
                // Truncated only if the host had another object to give.
                summary.limit_reached = matches!(stream.next(), Some(Ok(_)));
                break;
            }
        }
        Ok(())
    }
}

/// Run `request` through `connector` and report how the process should exit.
pub fn run_query<C: Connector>(
    connector: C,
    request: &QueryRequest,
    sink: &mut dyn LineSink,
) -> ExitStatus {
    let result = QueryOrchestrator::new(connector).run_query(request, sink);
    if let Err(err) = &result {
        warn!(error = %err, "Query run failed");
    }
    ExitStatus::of(&result)
}
