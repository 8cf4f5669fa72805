//! In-memory sink used by controller and session tests.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use crate::error::SinkError;
use crate::library::SourceRef;

use super::sink::{LoadId, MediaSink, SinkEvent};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SetSource(SourceRef, LoadId),
    Load,
    Play,
    Pause,
    Seek(Duration),
    Volume(f32),
    Muted(bool),
}

#[derive(Default)]
pub struct FakeSink {
    pub calls: Vec<Call>,
    pub reject_play: bool,
    pub source: Option<SourceRef>,
    tx: Option<Sender<SinkEvent>>,
}

impl FakeSink {
    pub fn rejecting() -> Self {
        Self {
            reject_play: true,
            ..Self::default()
        }
    }

    /// Sender the test uses to push events as if they came from the backend.
    pub fn events(&self) -> Sender<SinkEvent> {
        self.tx.clone().expect("controller subscribes on construction")
    }

    /// Calls other than the volume/mute setup every controller does.
    pub fn transport_calls(&self) -> Vec<Call> {
        self.calls
            .iter()
            .filter(|c| !matches!(c, Call::Volume(_) | Call::Muted(_)))
            .cloned()
            .collect()
    }
}

impl MediaSink for FakeSink {
    fn set_source(&mut self, source: &SourceRef, load: LoadId) -> Result<(), SinkError> {
        self.calls.push(Call::SetSource(source.clone(), load));
        self.source = Some(source.clone());
        Ok(())
    }

    fn load(&mut self) -> Result<(), SinkError> {
        self.calls.push(Call::Load);
        Ok(())
    }

    fn play(&mut self) -> Result<(), SinkError> {
        self.calls.push(Call::Play);
        if self.reject_play {
            Err(SinkError::Unsupported("autoplay blocked".to_string()))
        } else {
            Ok(())
        }
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
    }

    fn seek(&mut self, position: Duration) -> Result<(), SinkError> {
        self.calls.push(Call::Seek(position));
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        self.calls.push(Call::Volume(volume));
    }

    fn set_muted(&mut self, muted: bool) {
        self.calls.push(Call::Muted(muted));
    }

    fn subscribe(&mut self) -> Receiver<SinkEvent> {
        let (tx, rx) = mpsc::channel();
        self.tx = Some(tx);
        rx
    }
}
