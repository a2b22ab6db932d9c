use thiserror::Error;

use super::options::CompactFlag;
use crate::table_ops::TableOpError;

/// Errors detected while turning option values into a compaction intent.
///
/// All of these are raised before any remote call is made.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// No table was named.
    #[error("table name must not be empty")]
    EmptyTable,
    /// `--cancel` was combined with options that shape a compaction.
    #[error("can not specify other options with cancel: {}", join_flags(.conflicts))]
    ConflictingOptions {
        /// Flags supplied alongside `--cancel`.
        conflicts: Vec<CompactFlag>,
    },
    /// The named iterator profile is not registered.
    #[error("profile {0} does not exist")]
    UnknownProfile(String),
    /// A strategy option token is not of the form `key=value`.
    #[error("malformed strategy option `{token}`, expected <prop>=<value>")]
    MalformedStrategyOption {
        /// Offending token.
        token: String,
    },
    /// A value-bearing flag was supplied without a value.
    #[error("option {0} requires a value")]
    MissingValue(CompactFlag),
}

/// Errors surfaced by the remote operation a dispatch routed to.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The table does not exist on the remote side.
    #[error("table {0} does not exist")]
    TableNotFound(String),
    /// Any other remote failure, wrapped without further classification.
    #[error("compaction operation on table {table} failed: {source}")]
    OperationFailed {
        /// Table the operation targeted.
        table: String,
        /// Underlying collaborator failure.
        #[source]
        source: TableOpError,
    },
}

fn join_flags(flags: &[CompactFlag]) -> String {
    flags
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
