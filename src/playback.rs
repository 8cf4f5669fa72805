//! Playback: the output-sink abstraction, the controller state machine
//! (`Idle` / `Paused` / `Playing`) and the rodio backend.

mod controller;
mod rodio_sink;
mod sink;
mod state;

pub use controller::PlaybackController;
pub use rodio_sink::RodioSink;
pub use sink::{LoadId, MediaSink, SinkEvent};
pub use state::PlayerStatus;
#[cfg(test)]
pub use state::PlaybackState;

#[cfg(test)]
pub(crate) mod testing;
#[cfg(test)]
mod tests;
