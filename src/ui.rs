//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Tabs, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::{App, InputMode, NoticeLevel, Tab};
use crate::config::{PlaybackSettings, UiSettings};
use crate::library::format_duration;
use crate::playback::{MediaSink, PlayerStatus};

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "up/down");
    map.insert("gg/G", "top/bottom");
    map.insert("enter", "play selected");
    map.insert("space", "play/pause");
    map.insert("-/+", "volume");
    map.insert("m", "mute");
    map.insert("f", "favorite");
    map.insert("tab", "all/favorites");
    map.insert("/", "search");
    map.insert("o", "import folder");
    map.insert("q", "quit");
    map
});

/// Render the controls help text, incorporating the scrub step.
fn controls_text(seek_seconds: u64) -> String {
    let order = [
        "j/k", "enter", "space", "h/l", "-/+", "m", "f", "tab", "/", "o", "gg/G", "q",
    ];
    order
        .iter()
        .filter_map(|k| {
            if *k == "h/l" {
                Some(format!("[h/l] scrub -/+{}s", seek_seconds))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(3);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn padded(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 1,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire UI into `frame`.
pub fn draw<S: MediaSink>(
    frame: &mut Frame,
    app: &App<S>,
    ui_settings: &UiSettings,
    playback_settings: &PlaybackSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" encore ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[1]);

    draw_now_playing(frame, app, body[0]);
    draw_track_pane(frame, app, body[1]);
    draw_status(frame, app, chunks[2]);

    let footer = Paragraph::new(controls_text(playback_settings.seek_seconds))
        .block(padded(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);

    if app.input_mode == InputMode::ImportPath {
        let popup = centered_rect_sized(64, 3, chunks[1]);
        frame.render_widget(Clear, popup);
        let prompt = Paragraph::new(format!("{}_", app.import_input))
            .block(padded(" import folder or file (enter imports, esc cancels) "));
        frame.render_widget(prompt, popup);
    }
}

fn draw_now_playing<S: MediaSink>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let state = app.player.state();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

    let dim = Style::default().add_modifier(Modifier::DIM);
    let info = match &state.current {
        Some(track) => {
            let status = match app.player.status() {
                PlayerStatus::Playing => "Playing",
                PlayerStatus::Paused => "Paused",
                PlayerStatus::Idle => "Idle",
            };
            vec![
                Line::styled(format!("[ {} ]", track.cover), dim),
                Line::from(""),
                Line::styled(track.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Line::from(track.artist.clone()),
                Line::styled(track.album.clone(), Style::default().add_modifier(Modifier::ITALIC)),
                Line::from(""),
                Line::from(status),
            ]
        }
        None => vec![Line::styled("Nothing playing", dim)],
    };
    let info = Paragraph::new(info)
        .alignment(Alignment::Center)
        .block(padded(" now playing "))
        .wrap(Wrap { trim: true });
    frame.render_widget(info, rows[0]);

    let progress = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(state.progress())
        .label(format!(
            "{} / {}",
            format_duration(state.position),
            format_duration(state.duration)
        ));
    frame.render_widget(progress, rows[1]);

    let volume_label = if state.muted {
        "muted".to_string()
    } else {
        format!("vol {}%", state.volume)
    };
    let volume_ratio = if state.muted {
        0.0
    } else {
        f64::from(state.volume) / 100.0
    };
    let volume = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(volume_ratio)
        .label(volume_label);
    frame.render_widget(volume, rows[2]);
}

fn draw_track_pane<S: MediaSink>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(1),
        ])
        .split(area);

    let search_style = if app.input_mode == InputMode::Search {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let search_text = if app.search_query.is_empty() && app.input_mode != InputMode::Search {
        "Search music...".to_string()
    } else {
        app.search_query.clone()
    };
    let search = Paragraph::new(search_text)
        .style(search_style)
        .block(padded(" search "));
    frame.render_widget(search, rows[0]);

    let selected_tab = match app.tab {
        Tab::All => 0,
        Tab::Favorites => 1,
    };
    let tabs = Tabs::new(vec![
        format!("All Music ({})", app.library.len()),
        format!("Favorites ({})", app.favorites.len()),
    ])
    .select(selected_tab)
    .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(tabs, rows[1]);

    let current = app.player.state().current.as_ref().map(|t| t.id);
    let visible = app.visible_tracks();
    let items: Vec<ListItem> = visible
        .iter()
        .map(|t| {
            let heart = if app.is_favorite(t) { "♥" } else { " " };
            let line = format!(
                "{} {}  ·  {}  [{}]",
                heart, t.title, t.artist, t.duration
            );
            if Some(t.id) == current {
                ListItem::new(line).style(Style::default().add_modifier(Modifier::BOLD))
            } else {
                ListItem::new(line)
            }
        })
        .collect();

    let empty_hint = match app.tab {
        Tab::All if app.library.is_empty() => " tracks (press o to import a folder) ",
        Tab::Favorites if app.favorites.is_empty() => " favorites (press f on a track) ",
        _ => " tracks ",
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(empty_hint))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if !visible.is_empty() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, rows[2], &mut state);
}

fn draw_status<S: MediaSink>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let mut parts: Vec<String> = Vec::new();

    if app.importing {
        parts.push("Importing...".to_string());
    }
    if let Some(notice) = &app.notice {
        parts.push(format!("{}: {}", notice.title, notice.body));
    }
    if let Some(folder) = &app.folder_label {
        parts.push(format!("Folder: {}", folder));
    }
    if app.input_mode == InputMode::Search {
        parts.push("SEARCH (enter keeps, esc clears)".to_string());
    }

    let style = match app.notice.as_ref().map(|n| n.level) {
        Some(NoticeLevel::Error) => Style::default().fg(Color::Red),
        _ => Style::default(),
    };

    let status = Paragraph::new(parts.join(" • "))
        .style(style)
        .block(padded(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controls_text_includes_scrub_step() {
        let text = controls_text(7);
        assert!(text.contains("[h/l] scrub -/+7s"));
        assert!(text.starts_with("[j/k] up/down"));
        assert!(text.ends_with("[q] quit"));
    }

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 40,
            height: 10,
        };
        let r = centered_rect_sized(64, 3, area);
        assert!(r.x + r.width <= area.width);
        assert_eq!(r.height, 3);
    }
}
