//! Structured log events for compaction administration.
//!
//! Every event goes to the `compact_admin` tracing target and carries two
//! fixed fields ahead of any others:
//!
//! - `component`: the emitting stage, one of `builder`, `dispatcher` or `scan`
//! - `event`: a snake_case name stable enough to filter on
//!
//! ```ignore
//! log_info!("dispatcher", "compaction_started", table = %table);
//! ```
//!
//! Subscribers are the binary's business; nothing here installs one.

/// Tracing target shared by all admin events.
pub(crate) const ADMIN_TARGET: &str = "compact_admin";

macro_rules! admin_event {
    ($level:ident, $component:literal, $event:literal $(, $($field:tt)*)?) => {
        ::tracing::$level!(
            target: $crate::observability::ADMIN_TARGET,
            component = $component,
            event = $event
            $(, $($field)*)?
        )
    };
}

macro_rules! log_info {
    ($($args:tt)*) => {
        $crate::observability::admin_event!(info, $($args)*)
    };
}

macro_rules! log_debug {
    ($($args:tt)*) => {
        $crate::observability::admin_event!(debug, $($args)*)
    };
}

macro_rules! log_warn {
    ($($args:tt)*) => {
        $crate::observability::admin_event!(warn, $($args)*)
    };
}

macro_rules! log_error {
    ($($args:tt)*) => {
        $crate::observability::admin_event!(error, $($args)*)
    };
}

pub(crate) use admin_event;
pub(crate) use log_debug;
pub(crate) use log_error;
pub(crate) use log_info;
pub(crate) use log_warn;
