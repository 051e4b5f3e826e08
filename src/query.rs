//! Query domain: request validation, host resolution, rendering and the
//! multi-host run loop.

pub mod render;
pub mod request;
pub mod run;
pub mod sink;

pub use render::ObjectRenderer;
pub use request::{HostErrorPolicy, QueryRequest, RenderOptions};
pub use run::{run_query, ExitStatus, HostFailure, QueryOrchestrator, RunSummary};
pub use sink::{LineSink, WriterSink};
