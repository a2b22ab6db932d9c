//! Compaction request building and dispatch.
//!
//! Option values flow through [`CompactionRequestBuilder`] into a single
//! [`CompactionIntent`], which [`CompactionDispatcher`] routes to either the
//! remote compact or cancel operation.

/// Intent construction from option values.
pub mod builder;
/// Routing of intents to remote table operations.
pub mod dispatcher;
mod error;
/// Recognized flags and the option source.
pub mod options;
/// Request value objects.
pub mod request;

pub use builder::{parse_strategy_options, CompactionRequestBuilder};
pub use dispatcher::{CompactionDispatcher, DispatchStatus};
pub use error::{DispatchError, RequestError};
pub use options::{CompactFlag, OptionValues};
pub use request::{CancelRequest, CompactionIntent, CompactionRequest, StrategyDescriptor};
