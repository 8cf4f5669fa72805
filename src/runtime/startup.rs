use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app::{App, Tab};
use crate::config;
use crate::library::{
    CombinedSource, DirectorySource, FileListSource, FileSource, Importer, TagProber,
    sample_tracks,
};
use crate::playback::MediaSink;

/// Pick an import source for user-supplied paths.
///
/// A single directory is walked and plain files become a flat list. When
/// several directories are given, each one is walked in turn, with files
/// between them kept in place. Returns `None` for an empty list.
pub fn source_for_paths(
    paths: Vec<PathBuf>,
    settings: &config::LibrarySettings,
) -> Option<Box<dyn FileSource>> {
    match paths.as_slice() {
        [] => None,
        [single] if single.is_dir() => Some(Box::new(DirectorySource::new(single, settings))),
        _ if !paths.iter().any(|p| p.is_dir()) => Some(Box::new(FileListSource::new(paths))),
        _ => {
            let parts = paths
                .into_iter()
                .map(|p| -> Box<dyn FileSource> {
                    if p.is_dir() {
                        Box::new(DirectorySource::new(p, settings))
                    } else {
                        Box::new(FileListSource::new(vec![p]))
                    }
                })
                .collect();
            Some(Box::new(CombinedSource::new(parts)))
        }
    }
}

/// Expand a leading `~/` in a typed path.
pub fn expand_home(input: &str) -> PathBuf {
    let input = input.trim();
    if let Some(rest) = input.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return Path::new(&home).join(rest);
        }
    }
    PathBuf::from(input)
}

pub fn importer(settings: &config::LibrarySettings) -> Importer<TagProber> {
    Importer::new(TagProber::new(Duration::from_millis(
        settings.probe_timeout_ms,
    )))
}

/// Apply startup settings and run the initial import, if any.
pub fn prepare<S: MediaSink>(
    app: &mut App<S>,
    settings: &config::Settings,
    importer: &Importer<TagProber>,
    paths: Vec<PathBuf>,
) {
    app.set_tab(Tab::from(settings.ui.start_tab));

    if settings.library.load_samples {
        app.library.append(sample_tracks());
    }

    if let Some(source) = source_for_paths(paths, &settings.library) {
        app.import_from(importer, source.as_ref());
    }
}
