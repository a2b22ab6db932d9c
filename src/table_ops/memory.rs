//! Single-process table operations backend.

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use super::{OpFuture, TableOpError, TableOperations};
use crate::compaction::CompactionRequest;

/// Compaction bookkeeping for one table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableCompactions {
    /// Accepted compactions that have not finished yet.
    pub running: Vec<CompactionRequest>,
    /// Compactions that ran to completion.
    pub completed: Vec<CompactionRequest>,
    /// Number of compactions dropped by cancel requests.
    pub canceled: usize,
}

#[derive(Debug, Default)]
struct State {
    tables: HashMap<String, TableCompactions>,
    injected_failure: Option<TableOpError>,
}

/// In-memory table operations.
///
/// Waiting compactions complete within the call; non-waiting ones stay
/// running until [`InMemoryTableOperations::finish_running`] or a cancel.
#[derive(Debug, Default)]
pub struct InMemoryTableOperations {
    inner: Mutex<State>,
}

impl InMemoryTableOperations {
    /// Create a backend with no tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend pre-populated with `tables`.
    pub fn with_tables<I, S>(tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tables = tables
            .into_iter()
            .map(|name| (name.into(), TableCompactions::default()))
            .collect();
        Self {
            inner: Mutex::new(State {
                tables,
                injected_failure: None,
            }),
        }
    }

    /// Register a table; existing bookkeeping is kept.
    pub fn create_table(&self, table: impl Into<String>) -> Result<(), TableOpError> {
        self.lock()?.tables.entry(table.into()).or_default();
        Ok(())
    }

    /// Make the next operation fail with `err`.
    pub fn fail_next(&self, err: TableOpError) -> Result<(), TableOpError> {
        self.lock()?.injected_failure = Some(err);
        Ok(())
    }

    /// Snapshot of the compaction bookkeeping for `table`, `None` when the
    /// table does not exist.
    pub fn compactions(&self, table: &str) -> Result<Option<TableCompactions>, TableOpError> {
        Ok(self.lock()?.tables.get(table).cloned())
    }

    /// Complete every running compaction on `table`, returning how many finished.
    pub fn finish_running(&self, table: &str) -> Result<usize, TableOpError> {
        let mut state = self.lock()?;
        let entry = state
            .tables
            .get_mut(table)
            .ok_or_else(|| TableOpError::TableNotFound(table.to_string()))?;
        let finished = std::mem::take(&mut entry.running);
        let count = finished.len();
        entry.completed.extend(finished);
        Ok(count)
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, TableOpError> {
        self.inner
            .lock()
            .map_err(|_| TableOpError::Remote("table state lock poisoned".to_string()))
    }
}

impl TableOperations for InMemoryTableOperations {
    fn compact<'a>(&'a self, table: &'a str, request: &'a CompactionRequest) -> OpFuture<'a> {
        Box::pin(async move {
            let mut state = self.lock()?;
            if let Some(err) = state.injected_failure.take() {
                return Err(err);
            }
            let entry = state
                .tables
                .get_mut(table)
                .ok_or_else(|| TableOpError::TableNotFound(table.to_string()))?;
            if request.wait {
                entry.completed.push(request.clone());
            } else {
                entry.running.push(request.clone());
            }
            Ok(())
        })
    }

    fn cancel_compaction<'a>(&'a self, table: &'a str) -> OpFuture<'a> {
        Box::pin(async move {
            let mut state = self.lock()?;
            if let Some(err) = state.injected_failure.take() {
                return Err(err);
            }
            let entry = state
                .tables
                .get_mut(table)
                .ok_or_else(|| TableOpError::TableNotFound(table.to_string()))?;
            entry.canceled += entry.running.len();
            entry.running.clear();
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn snapshot(ops: &InMemoryTableOperations, table: &str) -> TableCompactions {
        ops.compactions(table).expect("lock").expect("table")
    }

    #[tokio::test]
    async fn waiting_compaction_completes_in_call() {
        let ops = InMemoryTableOperations::with_tables(["t1"]);
        let mut request = CompactionRequest::new("t1");
        request.wait = true;
        ops.compact("t1", &request).await.expect("compact");

        let state = snapshot(&ops, "t1");
        assert!(state.running.is_empty());
        assert_eq!(state.completed, vec![request]);
    }

    #[tokio::test]
    async fn background_compaction_runs_until_finished_or_canceled() {
        let ops = InMemoryTableOperations::with_tables(["t1"]);
        let request = CompactionRequest::new("t1");
        ops.compact("t1", &request).await.expect("compact");
        ops.compact("t1", &request).await.expect("compact");
        assert_eq!(snapshot(&ops, "t1").running.len(), 2);

        assert_eq!(ops.finish_running("t1").expect("finish"), 2);
        ops.compact("t1", &request).await.expect("compact");
        ops.cancel_compaction("t1").await.expect("cancel");

        let state = snapshot(&ops, "t1");
        assert!(state.running.is_empty());
        assert_eq!(state.completed.len(), 2);
        assert_eq!(state.canceled, 1);
    }

    #[tokio::test]
    async fn missing_table_and_injected_failures() {
        let ops = InMemoryTableOperations::new();
        assert_eq!(
            ops.cancel_compaction("nope").await,
            Err(TableOpError::TableNotFound("nope".to_string()))
        );

        ops.create_table("t1").expect("create");
        ops.fail_next(TableOpError::Interrupted).expect("inject");
        let request = CompactionRequest::new("t1");
        assert_eq!(
            ops.compact("t1", &request).await,
            Err(TableOpError::Interrupted)
        );
        ops.compact("t1", &request).await.expect("failure is one-shot");
    }

    #[test]
    fn poisoned_state_is_an_error_not_a_missing_table() {
        let ops = Arc::new(InMemoryTableOperations::with_tables(["t1"]));
        assert_eq!(ops.compactions("absent"), Ok(None));

        let poisoner = Arc::clone(&ops);
        let result = std::thread::spawn(move || {
            let _guard = poisoner.inner.lock().expect("lock");
            panic!("poison table state");
        })
        .join();
        assert!(result.is_err());

        assert!(matches!(
            ops.compactions("t1"),
            Err(TableOpError::Remote(_))
        ));
        assert!(matches!(
            ops.compactions("absent"),
            Err(TableOpError::Remote(_))
        ));
    }
}
