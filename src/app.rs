//! Application module: exposes the session model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the library, favorites,
//! playback controller and view state.

mod model;

pub use model::*;
