//! Playback controller: owns the now-playing slot and mirrors user intents
//! onto a `MediaSink`, republishing the sink's events into `PlaybackState`.

use std::sync::mpsc::Receiver;
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::error::SinkError;
use crate::library::Track;

use super::sink::{LoadId, MediaSink, SinkEvent};
use super::state::{PlaybackState, PlayerStatus};

/// Scrub range used while the track's length is still unknown.
const UNKNOWN_DURATION_SCRUB_RANGE: Duration = Duration::from_secs(100);

pub struct PlaybackController<S: MediaSink> {
    sink: S,
    events: Receiver<SinkEvent>,
    state: PlaybackState,
    next_load: u64,
    active_load: Option<LoadId>,
}

impl<S: MediaSink> PlaybackController<S> {
    /// Wrap `sink`, applying the initial volume/mute before any track loads.
    pub fn new(mut sink: S, volume: u8, muted: bool) -> Self {
        let events = sink.subscribe();
        let mut controller = Self {
            sink,
            events,
            state: PlaybackState::default(),
            next_load: 0,
            active_load: None,
        };
        controller.apply_volume(volume.min(100), muted);
        controller
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn status(&self) -> PlayerStatus {
        self.state.status()
    }

    #[cfg(test)]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Make `track` the active one and start it.
    ///
    /// If the sink refuses to start, the track stays selected but paused and
    /// the error is returned.
    pub fn select_track(&mut self, track: &Track) -> Result<(), SinkError> {
        self.next_load += 1;
        let load = LoadId(self.next_load);
        self.active_load = Some(load);

        self.state.current = Some(track.clone());
        self.state.position = Duration::ZERO;
        self.state.duration = track.length.unwrap_or_default();
        self.state.playing = true;

        let started = self
            .sink
            .set_source(&track.source, load)
            .and_then(|()| self.sink.load())
            .and_then(|()| self.sink.play());

        match started {
            Ok(()) => {
                debug!(track = %track.id, title = %track.title, "playing");
                Ok(())
            }
            Err(e) => {
                warn!(track = %track.id, error = %e, "playback failed");
                self.state.playing = false;
                Err(e)
            }
        }
    }

    /// Flip between playing and paused. Ignored while idle.
    pub fn toggle_play(&mut self) -> Result<(), SinkError> {
        if self.state.current.is_none() {
            return Ok(());
        }

        if self.state.playing {
            self.sink.pause();
            self.state.playing = false;
            return Ok(());
        }

        match self.sink.play() {
            Ok(()) => {
                self.state.playing = true;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "playback failed");
                Err(e)
            }
        }
    }

    /// Jump to `position`, clamped to the duration (or to a 100 s scrub
    /// range while the length is unknown). Returns the position actually
    /// applied; a no-op while idle.
    pub fn seek(&mut self, position: Duration) -> Duration {
        if self.state.current.is_none() {
            return Duration::ZERO;
        }

        let upper = if self.state.duration.is_zero() {
            UNKNOWN_DURATION_SCRUB_RANGE
        } else {
            self.state.duration
        };
        let target = position.min(upper);

        // The displayed position moves now, whether or not the sink keeps up.
        self.state.position = target;
        if let Err(e) = self.sink.seek(target) {
            warn!(error = %e, "seek failed");
        }
        target
    }

    /// Scrub relative to the current position.
    pub fn seek_by(&mut self, delta_secs: i64) -> Duration {
        let current = self.state.position;
        let delta = Duration::from_secs(delta_secs.unsigned_abs());
        let target = if delta_secs < 0 {
            current.saturating_sub(delta)
        } else {
            current.saturating_add(delta)
        };
        self.seek(target)
    }

    /// Set volume (0-100). Zero also mutes; anything else unmutes.
    pub fn set_volume(&mut self, volume: u8) {
        let volume = volume.min(100);
        self.apply_volume(volume, volume == 0);
    }

    pub fn toggle_mute(&mut self) {
        let muted = !self.state.muted;
        self.state.muted = muted;
        self.sink.set_muted(muted);
    }

    fn apply_volume(&mut self, volume: u8, muted: bool) {
        self.state.volume = volume;
        self.state.muted = muted;
        self.sink.set_volume(f32::from(volume) / 100.0);
        self.sink.set_muted(muted);
    }

    /// Fold one sink event into the state. Events for any load other than
    /// the active one are dropped.
    pub fn handle_event(&mut self, event: SinkEvent) {
        if Some(event.load()) != self.active_load {
            trace!(?event, active = ?self.active_load, "dropping stale sink event");
            return;
        }

        match event {
            SinkEvent::TimeUpdate { position, .. } => {
                self.state.position = position;
            }
            SinkEvent::MetadataLoaded { duration, .. } => {
                self.state.duration = duration;
            }
            SinkEvent::Ended { .. } => {
                // No auto-advance: stop on the finished track.
                self.state.playing = false;
                self.state.position = Duration::ZERO;
            }
        }
    }

    /// Let the sink publish, then apply everything it has sent so far.
    pub fn pump(&mut self) -> usize {
        self.sink.tick();

        let mut handled = 0;
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }
}
