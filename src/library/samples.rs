use std::time::Duration;

use super::model::{PLACEHOLDER_COVER, SourceRef, Track, TrackId};

/// Bundled demo entries. They have no local audio behind them, so backends
/// that only play local files will refuse them.
pub fn sample_tracks() -> Vec<Track> {
    [
        (1, "Midnight City", "M83", "Hurry Up, We're Dreaming", 243),
        (2, "Redbone", "Childish Gambino", "Awaken, My Love!", 327),
        (3, "Blinding Lights", "The Weeknd", "After Hours", 200),
    ]
    .into_iter()
    .map(|(id, title, artist, album, secs)| {
        let length = Duration::from_secs(secs);
        Track {
            id: TrackId(id),
            title: title.to_string(),
            artist: artist.to_string(),
            album: album.to_string(),
            duration: super::format_duration(length),
            length: Some(length),
            cover: PLACEHOLDER_COVER.to_string(),
            source: SourceRef::Url("#".to_string()),
        }
    })
    .collect()
}
