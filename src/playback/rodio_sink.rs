//! `MediaSink` backed by a `rodio` output stream.
//!
//! Only local files (`SourceRef::Blob`) can be played. Position and
//! end-of-stream events are published from `tick`, which the runtime calls
//! once per event-loop iteration.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::debug;

use crate::error::SinkError;
use crate::library::SourceRef;

use super::sink::{LoadId, MediaSink, SinkEvent};

/// Turns polled sink state into events. `Ended` goes out once per run to
/// the end; only `rearm` (a real seek or a fresh load) allows another.
#[derive(Debug, Default)]
struct ProgressTracker {
    last_position: Option<Duration>,
    ended_sent: bool,
}

impl ProgressTracker {
    fn observe(&mut self, load: LoadId, position: Duration, finished: bool) -> Vec<SinkEvent> {
        let mut events = Vec::new();
        if self.last_position != Some(position) {
            self.last_position = Some(position);
            events.push(SinkEvent::TimeUpdate { load, position });
        }
        if finished && !self.ended_sent {
            self.ended_sent = true;
            events.push(SinkEvent::Ended { load });
        }
        events
    }

    fn rearm(&mut self) {
        *self = Self::default();
    }
}

pub struct RodioSink {
    stream: OutputStream,
    sink: Option<Sink>,
    path: Option<PathBuf>,
    load: Option<LoadId>,
    total: Option<Duration>,
    volume: f32,
    muted: bool,
    progress: ProgressTracker,
    subscribers: Vec<Sender<SinkEvent>>,
}

impl RodioSink {
    pub fn open_default() -> Result<Self, SinkError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| SinkError::Output(e.to_string()))?;
        // rodio logs to stderr when the stream is dropped, which would land
        // on top of the TUI.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            path: None,
            load: None,
            total: None,
            volume: 1.0,
            muted: false,
            progress: ProgressTracker::default(),
            subscribers: Vec::new(),
        })
    }

    fn emit(&mut self, event: SinkEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    fn stop_current(&mut self) {
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        self.total = None;
        self.progress.rearm();
    }

    fn is_drained(&self) -> bool {
        self.sink.as_ref().is_some_and(Sink::empty)
    }
}

impl MediaSink for RodioSink {
    fn set_source(&mut self, source: &SourceRef, load: LoadId) -> Result<(), SinkError> {
        self.stop_current();
        self.load = Some(load);

        match source {
            SourceRef::Blob(blob) => {
                self.path = Some(blob.path().to_path_buf());
                Ok(())
            }
            SourceRef::Url(url) => {
                self.path = None;
                Err(SinkError::Unsupported(url.clone()))
            }
        }
    }

    fn load(&mut self) -> Result<(), SinkError> {
        let path = self.path.clone().ok_or(SinkError::NoSource)?;
        let file = File::open(&path).map_err(|source| SinkError::Open {
            path: path.clone(),
            source,
        })?;
        let decoder =
            Decoder::new(BufReader::new(file)).map_err(|e| SinkError::Decode(e.to_string()))?;
        let total = decoder.total_duration();

        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(decoder);
        sink.pause();
        sink.set_volume(self.effective_volume());

        self.sink = Some(sink);
        self.total = total;
        debug!(path = %path.display(), ?total, "loaded source");

        if let (Some(load), Some(duration)) = (self.load, total) {
            self.emit(SinkEvent::MetadataLoaded { load, duration });
        }
        Ok(())
    }

    fn play(&mut self) -> Result<(), SinkError> {
        // A finished source has drained the sink; start it over from the top.
        if self.is_drained() {
            self.stop_current();
            self.load()?;
        }
        let sink = self.sink.as_ref().ok_or(SinkError::NoSource)?;
        sink.play();
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = self.sink.as_ref() {
            sink.pause();
        }
    }

    fn seek(&mut self, position: Duration) -> Result<(), SinkError> {
        // A drained sink has nothing queued and ignores seeks, so decode the
        // source again first.
        if self.is_drained() {
            let resume = self.sink.as_ref().is_some_and(|s| !s.is_paused());
            self.stop_current();
            self.load()?;
            if resume {
                if let Some(sink) = self.sink.as_ref() {
                    sink.play();
                }
            }
        }

        let sink = self.sink.as_ref().ok_or(SinkError::NoSource)?;
        sink.try_seek(position)
            .map_err(|e| SinkError::Seek(e.to_string()))?;
        self.progress.rearm();
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(sink) = self.sink.as_ref() {
            sink.set_volume(self.effective_volume());
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if let Some(sink) = self.sink.as_ref() {
            sink.set_volume(self.effective_volume());
        }
    }

    fn subscribe(&mut self) -> Receiver<SinkEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    fn tick(&mut self) {
        let Some(load) = self.load else {
            return;
        };
        let Some((position, finished)) = self.sink.as_ref().map(|s| (s.get_pos(), s.empty()))
        else {
            return;
        };

        for event in self.progress.observe(load, position, finished) {
            self.emit(event);
        }
    }
}
