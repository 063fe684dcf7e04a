//! Error types for device inspection.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while inspecting a descriptor.
#[derive(Debug, Error)]
pub enum Error {
    /// `fstat` on the descriptor failed.
    #[error("status query failed")]
    StatusQuery(#[source] io::Error),

    /// The `BLKGETSIZE64` control request was rejected.
    #[error("block device size request failed")]
    ControlRequest(#[source] io::Error),

    /// A block device was required but the descriptor refers to something else.
    #[error("not a block device")]
    NotBlockDevice,

    /// Opening a path for inspection failed.
    #[error("failed to open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result alias for inspection operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The underlying OS error, if any.
    pub fn os_error(&self) -> Option<&io::Error> {
        match self {
            Error::StatusQuery(e) | Error::ControlRequest(e) => Some(e),
            Error::Open { source, .. } => Some(source),
            Error::NotBlockDevice => None,
        }
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::StatusQuery(e) | Error::ControlRequest(e) => e,
            Error::Open { source, .. } => source,
            Error::NotBlockDevice => {
                io::Error::new(io::ErrorKind::InvalidInput, "not a block device")
            }
        }
    }
}
