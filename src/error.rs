use thiserror::Error;

use crate::{
    compaction::{DispatchError, RequestError},
    config::ConfigError,
    scan::ScanConfigError,
};

/// Error returned by the compaction admin entry points.
#[derive(Debug, Error)]
pub enum Error {
    /// The options did not form a valid compaction intent.
    #[error(transparent)]
    Request(#[from] RequestError),
    /// The remote operation failed.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    /// Scan session configuration was invalid.
    #[error(transparent)]
    Scan(#[from] ScanConfigError),
    /// Admin configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Whether the failure was detected locally, before any remote call was made.
    pub fn is_local(&self) -> bool {
        !matches!(self, Error::Dispatch(_))
    }
}
