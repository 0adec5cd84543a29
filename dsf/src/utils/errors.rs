use std::io;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum DsfError {
    #[error("Invalid bit rate: {0} (must be at least 1 bit per second)")]
    InvalidBitRate(u32),

    #[error("Failed to create '{}': {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DsfError {
    /// Underlying I/O error, if any.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            DsfError::InvalidBitRate(_) => None,
            DsfError::Create { source, .. } | DsfError::Write { source, .. } => Some(source),
        }
    }
}
