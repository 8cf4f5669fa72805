use std::env;
use std::path::PathBuf;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::logging;
use crate::playback::{PlaybackController, RodioSink};

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    match logging::init(&settings.logging) {
        Ok(Some(path)) => info!(log = %path.display(), "logging started"),
        Ok(None) => {}
        Err(e) => eprintln!("encore: logging disabled: {e}"),
    }

    // `encore [PATH...]`: a folder is walked, files are imported as a flat list.
    let paths: Vec<PathBuf> = env::args_os().skip(1).map(PathBuf::from).collect();

    let sink = RodioSink::open_default()?;
    let player = PlaybackController::new(sink, settings.playback.volume, settings.playback.muted);
    let mut app = App::new(player);

    let importer = startup::importer(&settings.library);
    startup::prepare(&mut app, &settings, &importer, paths);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::default();
        event_loop::run(&mut terminal, &settings, &mut app, &importer, &mut state)
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &run_result {
        warn!(error = %e, "event loop exited with an error");
    }
    app.shutdown();

    run_result
}
