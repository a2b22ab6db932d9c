//! Remote table operations consumed by the compaction dispatcher.
//!
//! The trait is the narrow seam to whatever actually runs compactions. Futures
//! are boxed so implementations stay object safe and can be shared behind an
//! `Arc<dyn TableOperations>`.

mod memory;

use std::{future::Future, pin::Pin};

use thiserror::Error;

pub use self::memory::{InMemoryTableOperations, TableCompactions};
use crate::compaction::CompactionRequest;

/// Future returned by table operations.
pub type OpFuture<'a> = Pin<Box<dyn Future<Output = Result<(), TableOpError>> + Send + 'a>>;

/// Failures reported by the remote table-operations service.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TableOpError {
    /// The named table does not exist.
    #[error("table {0} does not exist")]
    TableNotFound(String),
    /// The call was interrupted before the remote side answered.
    #[error("operation interrupted")]
    Interrupted,
    /// Any other failure reported by the remote side.
    #[error("remote failure: {0}")]
    Remote(String),
}

/// Remote table operations needed to compact or cancel.
pub trait TableOperations: Send + Sync {
    /// Start compacting `table` as described by `request`.
    ///
    /// When `request.wait` is set the future resolves only after the
    /// compaction has finished; otherwise it resolves once the compaction has
    /// been accepted.
    fn compact<'a>(&'a self, table: &'a str, request: &'a CompactionRequest) -> OpFuture<'a>;

    /// Cancel user-initiated compactions on `table`.
    fn cancel_compaction<'a>(&'a self, table: &'a str) -> OpFuture<'a>;
}
