//! Track library: data model, favorites, candidate discovery, metadata
//! probing and the import pipeline that ties them together.

mod collection;
mod favorites;
mod import;
mod model;
mod probe;
mod samples;
mod scan;
mod sources;

pub use collection::Library;
pub use favorites::FavoriteSet;
pub use import::{Importer, format_duration};
pub use model::*;
pub use probe::{Prober, TagProber};
pub use samples::sample_tracks;
pub use scan::{CombinedSource, DirectorySource, FileListSource, FileSource};
pub use sources::SourceRegistry;

#[cfg(test)]
pub use import::derive_title;
#[cfg(test)]
pub use probe::ProbedMetadata;
#[cfg(test)]
pub use scan::{Candidates, FileHandle};
