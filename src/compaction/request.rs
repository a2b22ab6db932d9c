//! Validated compaction intents produced by the request builder.

use std::collections::HashMap;

use crate::{iterator::IteratorSetting, scan::RowRange};

/// Pluggable compaction strategy passed through to the compaction engine unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StrategyDescriptor {
    /// Strategy identifier resolved by the engine.
    pub name: String,
    /// Free-form strategy parameters.
    pub options: HashMap<String, String>,
}

impl StrategyDescriptor {
    /// Descriptor with no options.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: HashMap::new(),
        }
    }
}

/// A fully validated request to compact a table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompactionRequest {
    /// Table to compact.
    pub table: String,
    /// Rows covered by the compaction.
    pub range: RowRange,
    /// Flush in-memory data before compacting.
    pub flush: bool,
    /// Block the dispatch call until the compaction completes.
    pub wait: bool,
    /// Iterator stages applied while rewriting, in order.
    pub iterators: Vec<IteratorSetting>,
    /// Strategy selecting the files to compact, engine default when absent.
    pub strategy: Option<StrategyDescriptor>,
}

impl CompactionRequest {
    /// Default request: flush first, do not wait, whole table, no iterators.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            range: RowRange::all(),
            flush: true,
            wait: false,
            iterators: Vec::new(),
            strategy: None,
        }
    }
}

/// Request to cancel user-initiated compactions on a table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CancelRequest {
    /// Table whose compactions are canceled.
    pub table: String,
}

/// Outcome of building a compact command: exactly one of the two remote operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompactionIntent {
    /// Start (and optionally wait for) a compaction.
    Compact(CompactionRequest),
    /// Cancel running compactions.
    Cancel(CancelRequest),
}

impl CompactionIntent {
    /// Table targeted by the intent.
    pub fn table(&self) -> &str {
        match self {
            CompactionIntent::Compact(request) => &request.table,
            CompactionIntent::Cancel(request) => &request.table,
        }
    }
}
