#![deny(missing_docs)]
//! Validated compaction requests for table administration.
//!
//! An administrator's intent ("compact this table", "cancel compaction on this
//! table") arrives as already-tokenized option values. The
//! [`compaction::CompactionRequestBuilder`] checks option exclusivity and
//! composes row bounds, a named iterator profile and an opaque strategy
//! descriptor into one [`compaction::CompactionIntent`]. The
//! [`compaction::CompactionDispatcher`] routes that intent to exactly one
//! remote operation through the [`table_ops::TableOperations`] seam.
//!
//! Scan sessions expose their tunables through [`guard::BoundedValue`], which
//! rejects out-of-range input before mutating anything.

mod observability;

/// Compact command entry point.
pub mod command;
/// Compaction request building and dispatch.
pub mod compaction;
/// Admin configuration.
pub mod config;
/// Crate-level error type.
pub mod error;
/// Range-checked parameter holders.
pub mod guard;
/// Iterator settings and profiles.
pub mod iterator;
/// Row ranges and scan-session options.
pub mod scan;
/// Remote table operations.
pub mod table_ops;

pub use crate::{
    command::CompactCommand,
    compaction::{CompactFlag, CompactionIntent, DispatchStatus, OptionValues},
    error::Error,
};
