use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";
pub const PLACEHOLDER_COVER: &str = "placeholder.svg";

/// Session-unique track identifier. Assigned once at import and never reused.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrackId(pub u64);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Revocable handle onto a local audio file, minted by `SourceRegistry`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobRef {
    id: u64,
    path: Arc<Path>,
}

impl BlobRef {
    pub(super) fn new(id: u64, path: &Path) -> Self {
        Self {
            id,
            path: Arc::from(path),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Where a sink finds the bytes for a track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRef {
    /// Static location of a bundled sample track.
    Url(String),
    /// Imported local file.
    Blob(BlobRef),
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceRef::Url(url) => f.write_str(url),
            SourceRef::Blob(blob) => write!(f, "blob:{}:{}", blob.id, blob.path.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    pub album: String,
    /// `m:ss` label derived from the probed length.
    pub duration: String,
    /// Probed length, when the probe succeeded.
    pub length: Option<Duration>,
    pub cover: String,
    pub source: SourceRef,
}
