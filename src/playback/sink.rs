//! The output-sink seam between the controller and an audio backend.

use std::sync::mpsc::Receiver;
use std::time::Duration;

use crate::error::SinkError;
use crate::library::SourceRef;

/// Identifies one `set_source` call so late events from an earlier source
/// can be told apart from current ones.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadId(pub u64);

/// Notifications pushed by a sink, each tagged with the load it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    /// Live playback position.
    TimeUpdate { load: LoadId, position: Duration },
    /// Total length became known.
    MetadataLoaded { load: LoadId, duration: Duration },
    /// The source played to its end.
    Ended { load: LoadId },
}

impl SinkEvent {
    pub fn load(&self) -> LoadId {
        match self {
            SinkEvent::TimeUpdate { load, .. }
            | SinkEvent::MetadataLoaded { load, .. }
            | SinkEvent::Ended { load } => *load,
        }
    }
}

pub trait MediaSink {
    /// Point the sink at `source`. Stops whatever was playing before.
    fn set_source(&mut self, source: &SourceRef, load: LoadId) -> Result<(), SinkError>;

    /// Open and decode the current source, leaving it paused.
    fn load(&mut self) -> Result<(), SinkError>;

    fn play(&mut self) -> Result<(), SinkError>;

    fn pause(&mut self);

    fn seek(&mut self, position: Duration) -> Result<(), SinkError>;

    /// Linear gain in `0.0..=1.0`.
    fn set_volume(&mut self, volume: f32);

    fn set_muted(&mut self, muted: bool);

    /// Register for position, metadata and end-of-stream events.
    fn subscribe(&mut self) -> Receiver<SinkEvent>;

    /// Give the backend a chance to publish pending events.
    fn tick(&mut self) {}
}
