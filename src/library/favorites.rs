use std::collections::BTreeSet;

use super::collection::Library;
use super::model::{Track, TrackId};

/// Ids of user-favorited tracks. The favorites view is always derived from
/// the library, never stored.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FavoriteSet {
    ids: BTreeSet<TrackId>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`. Returns true when the track is now a favorite.
    pub fn toggle(&mut self, id: TrackId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn contains(&self, id: TrackId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// `library ∩ favorites`, in library order.
    pub fn favorite_tracks<'a>(&self, library: &'a Library) -> Vec<&'a Track> {
        library
            .tracks()
            .iter()
            .filter(|t| self.ids.contains(&t.id))
            .collect()
    }
}
