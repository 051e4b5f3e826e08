//! Connection Abstraction
//!
//! The query engine talks to hosts through two traits: a [`Connector`] opens a
//! [`Connection`] to one [`HostTarget`], and a connection executes query text,
//! yielding a lazy, single-pass stream of [`PropertySet`]s. The management
//! protocol itself lives behind these traits.

use crate::error::ConnectionError;
use crate::hosts::HostTarget;
use crate::value::PropertySet;

pub mod snapshot;

pub use snapshot::SnapshotConnector;

/// Forward-only result stream. Each item is one object, or the error that
/// ended enumeration.
pub type ResultStream<'a> = Box<dyn Iterator<Item = Result<PropertySet, ConnectionError>> + 'a>;

/// An open connection to a single host.
pub trait Connection {
    /// Submit `query` and return its results. The stream can be consumed once.
    fn execute(&mut self, query: &str) -> Result<ResultStream<'_>, ConnectionError>;
}

/// Opens connections to hosts.
pub trait Connector {
    /// Open `target`, using its credentials when it carries any.
    fn open(&self, target: &HostTarget) -> Result<Box<dyn Connection + '_>, ConnectionError>;
}

impl<C: Connector + ?Sized> Connector for &C {
    fn open(&self, target: &HostTarget) -> Result<Box<dyn Connection + '_>, ConnectionError> {
        (**self).open(target)
    }
}
