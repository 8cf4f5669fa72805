use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::ImportError;

use super::collection::Library;
use super::model::{PLACEHOLDER_COVER, SourceRef, Track, TrackId, UNKNOWN_ALBUM, UNKNOWN_ARTIST};
use super::probe::Prober;
use super::scan::{FileHandle, FileSource};
use super::sources::SourceRegistry;

/// Outcome of one import call. `imported + skipped` equals the number of
/// candidates offered.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    pub tracks: Vec<Track>,
    pub imported: usize,
    pub skipped: usize,
}

/// Strip the last dotted extension from a file name.
///
/// Names without an extension, and dotfiles such as `.mp3`, are kept verbatim.
pub fn derive_title(name: &str) -> &str {
    match name.rfind('.') {
        Some(i) if i > 0 => &name[..i],
        _ => name,
    }
}

/// Format a length as `m:ss`; minutes are not padded.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

pub struct Importer<P> {
    prober: P,
}

impl<P: Prober> Importer<P> {
    pub fn new(prober: P) -> Self {
        Self { prober }
    }

    /// Pull every candidate from `source` and import them.
    ///
    /// Candidates are collected before anything is probed, so a walk failure
    /// leaves `library` and `sources` untouched.
    pub fn import(
        &self,
        source: &dyn FileSource,
        library: &mut Library,
        sources: &mut SourceRegistry,
    ) -> Result<ImportReport, ImportError> {
        let candidates = source
            .candidates()?
            .collect::<Result<Vec<FileHandle>, ImportError>>()?;
        debug!(label = %source.label(), candidates = candidates.len(), "collected candidates");
        Ok(self.import_candidates(candidates, library, sources))
    }

    /// Filter, probe and append `candidates` in the order given.
    pub fn import_candidates(
        &self,
        candidates: impl IntoIterator<Item = FileHandle>,
        library: &mut Library,
        sources: &mut SourceRegistry,
    ) -> ImportReport {
        let base = library.max_id();
        let mut counter = 0u64;
        let mut skipped = 0usize;
        let mut tracks: Vec<Track> = Vec::new();

        for file in candidates {
            if !file.is_audio() {
                debug!(file = %file.name, mime = %file.mime, "skipping non-audio file");
                skipped += 1;
                continue;
            }

            counter += 1;
            tracks.push(self.make_track(TrackId(base + counter), &file, sources));
        }

        let imported = tracks.len();
        library.append(tracks.clone());
        info!(imported, skipped, total = library.len(), "import finished");

        ImportReport {
            tracks,
            imported,
            skipped,
        }
    }

    fn make_track(&self, id: TrackId, file: &FileHandle, sources: &mut SourceRegistry) -> Track {
        let blob = sources.create(&file.path);

        let meta = match self.prober.probe(file) {
            Ok(meta) => Some(meta),
            Err(e) => {
                warn!(file = %file.name, error = %e, "metadata probe failed, importing without duration");
                None
            }
        };

        let length = meta.as_ref().map(|m| m.length);
        let (artist, album) = meta
            .map(|m| (m.artist, m.album))
            .unwrap_or_default();

        Track {
            id,
            title: derive_title(&file.name).to_string(),
            artist: artist.unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            album: album.unwrap_or_else(|| UNKNOWN_ALBUM.to_string()),
            duration: format_duration(length.unwrap_or_default()),
            length,
            cover: PLACEHOLDER_COVER.to_string(),
            source: SourceRef::Blob(blob),
        }
    }
}
