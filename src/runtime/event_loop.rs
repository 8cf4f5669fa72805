use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

use crate::app::{App, InputMode};
use crate::config;
use crate::library::{Importer, TagProber};
use crate::playback::MediaSink;
use crate::ui;

use super::startup::{expand_home, source_for_paths};

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// Set when the import prompt was confirmed; the import runs after the
    /// next redraw so the "Importing..." status is visible.
    pending_import: Option<String>,
}

/// Main terminal event loop: pumps sink events, draws, and handles input.
/// Returns `Ok(())` when the user quits.
pub fn run<S: MediaSink>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App<S>,
    importer: &Importer<TagProber>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.player.pump();

        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.playback))?;

        if let Some(input) = state.pending_import.take() {
            run_import(&input, settings, app, importer);
            continue;
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn run_import<S: MediaSink>(
    input: &str,
    settings: &config::Settings,
    app: &mut App<S>,
    importer: &Importer<TagProber>,
) {
    let path = expand_home(input);
    debug!(path = %path.display(), "import requested");
    if let Some(source) = source_for_paths(vec![path], &settings.library) {
        app.import_from(importer, source.as_ref());
    }
    app.importing = false;
}

/// Returns true when the app should exit.
fn handle_key_event<S: MediaSink>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App<S>,
    state: &mut EventLoopState,
) -> bool {
    match app.input_mode {
        InputMode::Search => {
            state.pending_gg = false;
            match key.code {
                KeyCode::Esc => app.clear_search(),
                KeyCode::Enter => app.exit_input_mode(),
                KeyCode::Backspace => app.pop_search_char(),
                KeyCode::Down => app.next(),
                KeyCode::Up => app.prev(),
                KeyCode::Char(c) if !c.is_control() => app.push_search_char(c),
                _ => {}
            }
            return false;
        }
        InputMode::ImportPath => {
            state.pending_gg = false;
            match key.code {
                KeyCode::Esc => app.exit_input_mode(),
                KeyCode::Enter => {
                    app.exit_input_mode();
                    let input = app.import_input.trim().to_string();
                    if !input.is_empty() {
                        app.importing = true;
                        state.pending_import = Some(input);
                    }
                }
                KeyCode::Backspace => {
                    app.import_input.pop();
                }
                KeyCode::Char(c) if !c.is_control() => app.import_input.push(c),
                _ => {}
            }
            return false;
        }
        InputMode::Normal => {}
    }

    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }

    let seek_step = i64::try_from(settings.playback.seek_seconds).unwrap_or(i64::MAX);
    let volume_step = settings.playback.volume_step;

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => app.select_last(),
        KeyCode::Enter => app.play_selected(),
        KeyCode::Char(' ') | KeyCode::Char('p') => app.toggle_play(),
        KeyCode::Char('h') | KeyCode::Left => {
            app.player.seek_by(-seek_step);
        }
        KeyCode::Char('l') | KeyCode::Right => {
            app.player.seek_by(seek_step);
        }
        KeyCode::Char('-') => {
            let v = app.player.state().volume.saturating_sub(volume_step);
            app.player.set_volume(v);
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            let v = app.player.state().volume.saturating_add(volume_step);
            app.player.set_volume(v);
        }
        KeyCode::Char('m') => app.player.toggle_mute(),
        KeyCode::Char('f') => app.toggle_favorite_selected(),
        KeyCode::Tab => app.switch_tab(),
        KeyCode::Char('/') => app.enter_search_mode(),
        KeyCode::Char('o') => app.enter_import_mode(),
        KeyCode::Esc => app.dismiss_notice(),
        _ => {}
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::sample_tracks;
    use crate::playback::testing::FakeSink;
    use crate::playback::{PlaybackController, PlayerStatus};
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App<FakeSink> {
        let mut app = App::new(PlaybackController::new(FakeSink::default(), 80, false));
        app.library.append(sample_tracks());
        app
    }

    #[test]
    fn gg_jumps_to_top_and_q_quits() {
        let settings = config::Settings::default();
        let mut app = app();
        let mut state = EventLoopState::default();

        handle_key_event(press(KeyCode::Char('G')), &settings, &mut app, &mut state);
        assert_eq!(app.selected, 2);
        handle_key_event(press(KeyCode::Char('g')), &settings, &mut app, &mut state);
        assert_eq!(app.selected, 2);
        handle_key_event(press(KeyCode::Char('g')), &settings, &mut app, &mut state);
        assert_eq!(app.selected, 0);

        assert!(handle_key_event(press(KeyCode::Char('q')), &settings, &mut app, &mut state));
    }

    #[test]
    fn search_mode_captures_typing() {
        let settings = config::Settings::default();
        let mut app = app();
        let mut state = EventLoopState::default();

        handle_key_event(press(KeyCode::Char('/')), &settings, &mut app, &mut state);
        for c in "qred".chars() {
            assert!(!handle_key_event(press(KeyCode::Char(c)), &settings, &mut app, &mut state));
        }
        assert_eq!(app.search_query, "qred");
        handle_key_event(press(KeyCode::Backspace), &settings, &mut app, &mut state);
        handle_key_event(press(KeyCode::Enter), &settings, &mut app, &mut state);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.search_query, "qre");
    }

    #[test]
    fn import_prompt_queues_path_on_enter() {
        let settings = config::Settings::default();
        let mut app = app();
        let mut state = EventLoopState::default();

        handle_key_event(press(KeyCode::Char('o')), &settings, &mut app, &mut state);
        for c in "/music".chars() {
            handle_key_event(press(KeyCode::Char(c)), &settings, &mut app, &mut state);
        }
        handle_key_event(press(KeyCode::Enter), &settings, &mut app, &mut state);

        assert_eq!(state.pending_import.as_deref(), Some("/music"));
        assert!(app.importing);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn queued_import_runs_and_clears_flag() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("readme.txt"), b"x").unwrap();

        let settings = config::Settings::default();
        let importer = crate::runtime::startup::importer(&settings.library);
        let mut app = app();
        app.importing = true;

        run_import(&dir.path().display().to_string(), &settings, &mut app, &importer);

        assert!(!app.importing);
        assert_eq!(app.notice.as_ref().map(|n| n.title.as_str()), Some("No Tracks Found"));
        assert_eq!(app.library.len(), 3);
    }

    #[test]
    fn transport_keys_drive_controller() {
        let settings = config::Settings::default();
        let mut app = app();
        let mut state = EventLoopState::default();

        handle_key_event(press(KeyCode::Enter), &settings, &mut app, &mut state);
        assert_eq!(app.player.status(), PlayerStatus::Playing);

        handle_key_event(press(KeyCode::Char('l')), &settings, &mut app, &mut state);
        assert_eq!(app.player.state().position, Duration::from_secs(5));

        handle_key_event(press(KeyCode::Char(' ')), &settings, &mut app, &mut state);
        assert_eq!(app.player.status(), PlayerStatus::Paused);

        handle_key_event(press(KeyCode::Char('-')), &settings, &mut app, &mut state);
        assert_eq!(app.player.state().volume, 75);

        handle_key_event(press(KeyCode::Char('m')), &settings, &mut app, &mut state);
        assert!(app.player.state().muted);

        handle_key_event(press(KeyCode::Char('f')), &settings, &mut app, &mut state);
        assert_eq!(app.favorites.len(), 1);
    }
}
