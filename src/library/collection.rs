use super::model::{Track, TrackId};

/// Insertion-ordered track collection for one session.
///
/// The library only grows, one import batch at a time.
#[derive(Debug, Default, Clone)]
pub struct Library {
    tracks: Vec<Track>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Largest id currently in the library, or 0 when empty.
    pub fn max_id(&self) -> u64 {
        self.tracks.iter().map(|t| t.id.0).max().unwrap_or(0)
    }

    /// Append a batch, keeping its order.
    pub fn append(&mut self, batch: Vec<Track>) {
        debug_assert!(
            batch.iter().all(|t| self.get(t.id).is_none()),
            "track ids must be unique within a session"
        );
        self.tracks.extend(batch);
    }

    /// Case-insensitive substring search over title, artist and album.
    ///
    /// A blank query matches everything. Results keep library order.
    pub fn search(&self, query: &str) -> Vec<&Track> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.tracks.iter().collect();
        }

        self.tracks
            .iter()
            .filter(|t| {
                t.title.to_lowercase().contains(&query)
                    || t.artist.to_lowercase().contains(&query)
                    || t.album.to_lowercase().contains(&query)
            })
            .collect()
    }
}
