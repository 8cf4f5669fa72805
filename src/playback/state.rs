use std::time::Duration;

use crate::library::Track;

/// Coarse controller state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlayerStatus {
    #[default]
    Idle,
    Paused,
    Playing,
}

/// Everything the UI shows about the now-playing slot.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub current: Option<Track>,
    pub playing: bool,
    pub position: Duration,
    pub duration: Duration,
    /// 0-100.
    pub volume: u8,
    pub muted: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current: None,
            playing: false,
            position: Duration::ZERO,
            duration: Duration::ZERO,
            volume: 80,
            muted: false,
        }
    }
}

impl PlaybackState {
    pub fn status(&self) -> PlayerStatus {
        match (&self.current, self.playing) {
            (None, _) => PlayerStatus::Idle,
            (Some(_), false) => PlayerStatus::Paused,
            (Some(_), true) => PlayerStatus::Playing,
        }
    }

    /// Position as a fraction of the duration, for progress bars.
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 0.0;
        }
        (self.position.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}
