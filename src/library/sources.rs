//! Bookkeeping for the playable-source handles created at import time.
//!
//! Every imported file gets a `BlobRef`. The registry remembers which
//! handles are still live so they can be released individually or all at
//! once when the session ends.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::model::BlobRef;

#[derive(Debug, Default)]
pub struct SourceRegistry {
    next_id: u64,
    live: BTreeMap<u64, PathBuf>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a new handle for `path`. Handles are never recycled.
    pub fn create(&mut self, path: &Path) -> BlobRef {
        self.next_id += 1;
        self.live.insert(self.next_id, path.to_path_buf());
        BlobRef::new(self.next_id, path)
    }

    pub fn is_live(&self, blob: &BlobRef) -> bool {
        self.live.contains_key(&blob.id())
    }

    /// Release a handle. Returns false when it was already released.
    #[cfg(test)]
    pub fn revoke(&mut self, blob: &BlobRef) -> bool {
        let removed = self.live.remove(&blob.id()).is_some();
        if removed {
            debug!(blob = blob.id(), path = %blob.path().display(), "revoked source handle");
        }
        removed
    }

    /// Release every live handle, returning how many were released.
    pub fn revoke_all(&mut self) -> usize {
        let n = self.live.len();
        self.live.clear();
        debug!(released = n, "revoked all source handles");
        n
    }

    #[cfg(test)]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}
