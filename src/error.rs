//! Error types shared by the importer and the playback layer.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Failures that abort a whole import before the library is touched.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to access {}: {source}", path.display())]
    AccessDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),
}

/// A metadata probe that did not yield a duration. Never fatal to an import.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("failed to read metadata: {0}")]
    Read(String),

    #[error("metadata probe timed out after {0:?}")]
    TimedOut(Duration),
}

/// Errors reported by a `MediaSink` backend.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("unsupported source: {0}")]
    Unsupported(String),

    #[error("no source loaded")]
    NoSource,

    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode audio: {0}")]
    Decode(String),

    #[error("seek failed: {0}")]
    Seek(String),

    #[error("audio output unavailable: {0}")]
    Output(String),
}
