//! Application model: the session context.
//!
//! `App` owns the library, favorites, source handles and the playback
//! controller, plus the view state the UI needs (tab, search, selection,
//! notices).

use tracing::{error, info};

use crate::config::TabSetting;
use crate::library::{
    FavoriteSet, FileSource, Importer, Library, Prober, SourceRef, SourceRegistry, Track,
};
use crate::playback::{MediaSink, PlaybackController};

/// Which list the track pane shows.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    All,
    Favorites,
}

impl From<TabSetting> for Tab {
    fn from(t: TabSetting) -> Self {
        match t {
            TabSetting::All => Tab::All,
            TabSetting::Favorites => Tab::Favorites,
        }
    }
}

/// What keystrokes currently edit.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
    ImportPath,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Short user-facing message shown in the status bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
    pub level: NoticeLevel,
}

impl Notice {
    pub fn info(title: &str, body: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            body: body.into(),
            level: NoticeLevel::Info,
        }
    }

    pub fn error(title: &str, body: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            body: body.into(),
            level: NoticeLevel::Error,
        }
    }
}

pub struct App<S: MediaSink> {
    pub library: Library,
    pub favorites: FavoriteSet,
    pub sources: SourceRegistry,
    pub player: PlaybackController<S>,

    pub tab: Tab,
    /// Cursor position within `visible_tracks()`.
    pub selected: usize,
    pub search_query: String,
    pub input_mode: InputMode,
    pub import_input: String,
    pub folder_label: Option<String>,
    pub importing: bool,
    pub notice: Option<Notice>,
}

impl<S: MediaSink> App<S> {
    pub fn new(player: PlaybackController<S>) -> Self {
        Self {
            library: Library::new(),
            favorites: FavoriteSet::new(),
            sources: SourceRegistry::new(),
            player,
            tab: Tab::All,
            selected: 0,
            search_query: String::new(),
            input_mode: InputMode::Normal,
            import_input: String::new(),
            folder_label: None,
            importing: false,
            notice: None,
        }
    }

    /// Tracks in the current tab. `All` honors the search query; `Favorites`
    /// lists every favorite.
    pub fn visible_tracks(&self) -> Vec<&Track> {
        match self.tab {
            Tab::All => self.library.search(&self.search_query),
            Tab::Favorites => self.favorites.favorite_tracks(&self.library),
        }
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.visible_tracks().get(self.selected).copied()
    }

    pub fn is_favorite(&self, track: &Track) -> bool {
        self.favorites.contains(track.id)
    }

    /// Move the cursor down, wrapping to the top.
    pub fn next(&mut self) {
        let n = self.visible_tracks().len();
        if n > 0 {
            self.selected = (self.selected + 1) % n;
        }
    }

    /// Move the cursor up, wrapping to the bottom.
    pub fn prev(&mut self) {
        let n = self.visible_tracks().len();
        if n > 0 {
            self.selected = (self.selected + n - 1) % n;
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.visible_tracks().len().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let n = self.visible_tracks().len();
        if self.selected >= n {
            self.selected = n.saturating_sub(1);
        }
    }

    pub fn set_tab(&mut self, tab: Tab) {
        if self.tab != tab {
            self.tab = tab;
            self.selected = 0;
        }
    }

    pub fn switch_tab(&mut self) {
        self.set_tab(match self.tab {
            Tab::All => Tab::Favorites,
            Tab::Favorites => Tab::All,
        });
    }

    pub fn enter_search_mode(&mut self) {
        self.input_mode = InputMode::Search;
        self.set_tab(Tab::All);
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_query.push(c);
        self.selected = 0;
    }

    pub fn pop_search_char(&mut self) {
        self.search_query.pop();
        self.selected = 0;
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
        self.input_mode = InputMode::Normal;
        self.selected = 0;
    }

    pub fn enter_import_mode(&mut self) {
        self.input_mode = InputMode::ImportPath;
        self.import_input.clear();
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Flip the favorite flag of the track under the cursor.
    pub fn toggle_favorite_selected(&mut self) {
        let Some(id) = self.selected_track().map(|t| t.id) else {
            return;
        };
        self.favorites.toggle(id);
        // Unfavoriting in the favorites tab shrinks the list under the cursor.
        self.clamp_selection();
    }

    /// Start the track under the cursor.
    pub fn play_selected(&mut self) {
        let Some(track) = self.selected_track().cloned() else {
            return;
        };
        if let SourceRef::Blob(blob) = &track.source {
            if !self.sources.is_live(blob) {
                self.notice = Some(Notice::error(
                    "Playback failed",
                    format!("{} is no longer available.", track.title),
                ));
                return;
            }
        }
        if let Err(e) = self.player.select_track(&track) {
            self.notice = Some(Notice::error("Playback failed", e.to_string()));
        }
    }

    pub fn toggle_play(&mut self) {
        if let Err(e) = self.player.toggle_play() {
            self.notice = Some(Notice::error("Playback failed", e.to_string()));
        }
    }

    /// Import from `source` and post a notice describing the outcome.
    pub fn import_from<P: Prober>(&mut self, importer: &Importer<P>, source: &dyn FileSource) {
        let label = source.label();
        let result = importer.import(source, &mut self.library, &mut self.sources);

        match result {
            Ok(report) if report.imported > 0 => {
                self.folder_label = Some(label.clone());
                info!(folder = %label, imported = report.imported, skipped = report.skipped, "imported tracks");
                self.notice = Some(Notice::info(
                    "Import Successful",
                    format!("Imported {} tracks from {}", report.imported, label),
                ));
            }
            Ok(report) => {
                self.folder_label = Some(label.clone());
                info!(folder = %label, skipped = report.skipped, "no tracks found");
                self.notice = Some(Notice::error(
                    "No Tracks Found",
                    "No audio files were found in the selected folder.",
                ));
            }
            Err(e) => {
                error!(folder = %label, error = %e, "import failed");
                self.notice = Some(Notice::error(
                    "Error",
                    "Failed to access the selected folder.",
                ));
            }
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Release every playable-source handle at the end of the session.
    pub fn shutdown(&mut self) {
        let released = self.sources.revoke_all();
        info!(released, "released source handles");
    }
}
