//! The compact command: option values in, status out.

use std::sync::Arc;

use crate::{
    compaction::{
        CompactionDispatcher, CompactionIntent, CompactionRequestBuilder, DispatchStatus,
        OptionValues, RequestError,
    },
    error::Error,
    iterator::IteratorProfiles,
    table_ops::TableOperations,
};

/// Help text describing what the command does.
pub const DESCRIPTION: &str =
    "sets all tablets for a table to major compact as soon as possible (based on current time)";

/// Compact command bound to an iterator profile registry and a table-operations service.
///
/// Each invocation builds one intent and performs one dispatch; nothing is
/// carried over between invocations.
#[derive(Clone)]
pub struct CompactCommand {
    profiles: Arc<dyn IteratorProfiles>,
    dispatcher: CompactionDispatcher,
}

impl CompactCommand {
    /// Create a command resolving profiles through `profiles` and dispatching to `ops`.
    pub fn new(profiles: Arc<dyn IteratorProfiles>, ops: Arc<dyn TableOperations>) -> Self {
        Self {
            profiles,
            dispatcher: CompactionDispatcher::new(ops),
        }
    }

    /// Validate `options` for `table` without contacting the remote side.
    pub fn build(
        &self,
        options: &OptionValues,
        table: &str,
    ) -> Result<CompactionIntent, RequestError> {
        CompactionRequestBuilder::new(self.profiles.as_ref()).build(table, options)
    }

    /// Build the intent for `table` and dispatch it.
    ///
    /// Build failures abort before any remote call. When the intent waits, the
    /// returned future resolves only once the remote compaction has finished.
    pub async fn build_and_dispatch(
        &self,
        options: &OptionValues,
        table: &str,
    ) -> Result<DispatchStatus, Error> {
        let intent = self.build(options, table)?;
        Ok(self.dispatcher.dispatch(&intent).await?)
    }
}
