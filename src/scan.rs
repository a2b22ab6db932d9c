//! Shared scan utilities: row ranges and scan-session options.
//!
//! `RowRange` is shared by scan sessions and compaction requests. `ScanOptions`
//! holds the per-session tuning knobs; the numeric ones are guarded so that
//! out-of-range input is rejected before it ever reaches a scanner.

use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;

use crate::{
    guard::{BoundedValue, OutOfRange},
    observability::log_debug,
};

/// Default number of batches fetched before readahead kicks in.
pub const DEFAULT_READAHEAD_THRESHOLD: i64 = 3;
/// Default number of entries fetched per batch.
pub const DEFAULT_BATCH_SIZE: i64 = 1000;

/// A row range with optional bounds; an absent bound is unbounded.
///
/// The start row is inclusive and the end row exclusive. Ordering between the
/// two bounds is not validated here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowRange {
    /// First row of the range, if bounded below.
    pub start: Option<Bytes>,
    /// Row that ends the range, if bounded above.
    pub end: Option<Bytes>,
}

impl RowRange {
    /// Create an unbounded range (all rows).
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a range from explicit optional bounds.
    pub fn new(start: Option<Bytes>, end: Option<Bytes>) -> Self {
        Self { start, end }
    }
}

/// Errors surfaced while configuring a scan session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScanConfigError {
    /// A scan session must name the table it reads.
    #[error("scan table name must not be empty")]
    EmptyTable,
    /// A guarded knob rejected the supplied value.
    #[error(transparent)]
    OutOfRange(#[from] OutOfRange),
}

/// Per-session scan configuration.
#[derive(Clone, Debug)]
pub struct ScanOptions {
    table: String,
    range: RowRange,
    timeout: Option<Duration>,
    batch_size: BoundedValue<i64>,
    readahead_threshold: BoundedValue<i64>,
}

impl ScanOptions {
    /// Open scan options for `table` with default tuning.
    pub fn new(table: impl Into<String>) -> Result<Self, ScanConfigError> {
        let table = table.into();
        if table.is_empty() {
            return Err(ScanConfigError::EmptyTable);
        }
        Ok(Self {
            table,
            range: RowRange::all(),
            timeout: None,
            batch_size: BoundedValue::new("batch_size", DEFAULT_BATCH_SIZE, 1, i64::MAX)?,
            readahead_threshold: BoundedValue::new(
                "readahead_threshold",
                DEFAULT_READAHEAD_THRESHOLD,
                0,
                i64::MAX,
            )?,
        })
    }

    /// Restrict the scan to `range`.
    pub fn with_range(self, range: RowRange) -> Self {
        ScanOptions { range, ..self }
    }

    /// Abandon the scan after `timeout` without progress.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        ScanOptions {
            timeout: Some(timeout),
            ..self
        }
    }

    /// Table read by this session.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Row range read by this session.
    pub fn range(&self) -> &RowRange {
        &self.range
    }

    /// Optional scan timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Entries fetched per batch.
    pub fn batch_size(&self) -> i64 {
        self.batch_size.get()
    }

    /// Set the number of entries fetched per batch; must be positive.
    pub fn set_batch_size(&mut self, size: i64) -> Result<(), ScanConfigError> {
        self.batch_size.set(size).map_err(|err| {
            log_debug!(
                "scan",
                "batch_size_rejected",
                table = %self.table,
                value = size,
            );
            ScanConfigError::from(err)
        })
    }

    /// Number of batches fetched before background readahead starts.
    pub fn readahead_threshold(&self) -> i64 {
        self.readahead_threshold.get()
    }

    /// Set the readahead threshold; any non-negative value, `i64::MAX` included.
    pub fn set_readahead_threshold(&mut self, threshold: i64) -> Result<(), ScanConfigError> {
        self.readahead_threshold.set(threshold).map_err(|err| {
            log_debug!(
                "scan",
                "readahead_threshold_rejected",
                table = %self.table,
                value = threshold,
            );
            ScanConfigError::from(err)
        })
    }
}
