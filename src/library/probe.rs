//! Metadata probing for candidate files.

use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use lofty::prelude::*;

use crate::error::ProbeError;

use super::scan::FileHandle;

/// What a successful probe learned about a file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbedMetadata {
    pub length: Duration,
    pub artist: Option<String>,
    pub album: Option<String>,
}

pub trait Prober {
    fn probe(&self, file: &FileHandle) -> Result<ProbedMetadata, ProbeError>;
}

/// Reads container properties and tags with `lofty`, bounded by a timeout.
#[derive(Debug, Clone)]
pub struct TagProber {
    timeout: Duration,
}

impl TagProber {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Prober for TagProber {
    fn probe(&self, file: &FileHandle) -> Result<ProbedMetadata, ProbeError> {
        let path = file.path.clone();
        let (tx, rx) = mpsc::channel();

        // A worker that outlives the timeout just finishes into a closed channel.
        thread::spawn(move || {
            let _ = tx.send(read_metadata(&path));
        });

        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(ProbeError::TimedOut(self.timeout)),
            Err(RecvTimeoutError::Disconnected) => {
                Err(ProbeError::Read("probe worker exited early".to_string()))
            }
        }
    }
}

fn non_blank(v: Option<std::borrow::Cow<'_, str>>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn read_metadata(path: &Path) -> Result<ProbedMetadata, ProbeError> {
    let tagged = lofty::read_from_path(path).map_err(|e| ProbeError::Read(e.to_string()))?;

    let mut meta = ProbedMetadata {
        length: tagged.properties().duration(),
        ..ProbedMetadata::default()
    };

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        meta.artist = non_blank(tag.artist());
        meta.album = non_blank(tag.album());
    }

    Ok(meta)
}
