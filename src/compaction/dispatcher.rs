//! Routes a compaction intent to exactly one remote table operation.

use std::{fmt, sync::Arc};

use super::{
    error::DispatchError,
    request::{CancelRequest, CompactionIntent, CompactionRequest},
};
use crate::{
    observability::{log_error, log_info},
    table_ops::{TableOpError, TableOperations},
};

/// Outcome of a successful dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchStatus {
    /// User-initiated compactions were canceled.
    Canceled {
        /// Target table.
        table: String,
    },
    /// The compaction was accepted and runs in the background.
    Started {
        /// Target table.
        table: String,
    },
    /// The compaction ran to completion before the call returned.
    Completed {
        /// Target table.
        table: String,
    },
}

impl fmt::Display for DispatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchStatus::Canceled { table } => write!(f, "Compaction canceled for table {table}"),
            DispatchStatus::Started { table } => {
                write!(f, "Compaction of table {table} started for given range")
            }
            DispatchStatus::Completed { table } => {
                write!(f, "Compaction of table {table} completed for given range")
            }
        }
    }
}

/// Stateless dispatcher over a table-operations collaborator.
#[derive(Clone)]
pub struct CompactionDispatcher {
    ops: Arc<dyn TableOperations>,
}

impl CompactionDispatcher {
    /// Dispatch through `ops`.
    pub fn new(ops: Arc<dyn TableOperations>) -> Self {
        Self { ops }
    }

    /// Invoke the remote operation matching `intent`.
    ///
    /// Remote failures are never retried here; a failed compact may already
    /// have had a partial remote effect.
    pub async fn dispatch(
        &self,
        intent: &CompactionIntent,
    ) -> Result<DispatchStatus, DispatchError> {
        match intent {
            CompactionIntent::Cancel(request) => self.cancel(request).await,
            CompactionIntent::Compact(request) => self.compact(request).await,
        }
    }

    async fn cancel(&self, request: &CancelRequest) -> Result<DispatchStatus, DispatchError> {
        let table = request.table.as_str();
        match self.ops.cancel_compaction(table).await {
            Ok(()) => {
                log_info!(
                    "dispatcher",
                    "compaction_canceled",
                    table = %table,
                );
                Ok(DispatchStatus::Canceled {
                    table: table.to_string(),
                })
            }
            Err(TableOpError::TableNotFound(missing)) => {
                log_error!(
                    "dispatcher",
                    "compaction_dispatch_failed",
                    table = %table,
                    error = "table not found",
                );
                Err(DispatchError::TableNotFound(missing))
            }
            Err(source) => Err(self.failed(table, source)),
        }
    }

    async fn compact(&self, request: &CompactionRequest) -> Result<DispatchStatus, DispatchError> {
        let table = request.table.as_str();
        if request.wait {
            log_info!(
                "dispatcher",
                "compaction_dispatch_started",
                table = %table,
                "Compacting table ..."
            );
        }
        if let Err(source) = self.ops.compact(table, request).await {
            return Err(self.failed(table, source));
        }
        let status = if request.wait {
            log_info!("dispatcher", "compaction_completed", table = %table);
            DispatchStatus::Completed {
                table: table.to_string(),
            }
        } else {
            log_info!("dispatcher", "compaction_started", table = %table);
            DispatchStatus::Started {
                table: table.to_string(),
            }
        };
        Ok(status)
    }

    fn failed(&self, table: &str, source: TableOpError) -> DispatchError {
        log_error!(
            "dispatcher",
            "compaction_dispatch_failed",
            table = %table,
            error = %source,
        );
        DispatchError::OperationFailed {
            table: table.to_string(),
            source,
        }
    }
}
