//! Pure application state - data only, no I/O.

use crate::api::Issue;
use crate::config::Role;
use crate::map::{MapViewport, TileSource};
use crate::query::{self, QueryState, SearchScope};
use crate::report::ReportForm;

/// Current screen being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Admin table with sort, search and status filters
    Dashboard,
    /// Citizen list with city search
    Issues,
    /// Citizen report form with map
    Report,
}

/// Modal prompt layered over the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub enum Prompt {
    /// Pick a new status for the selected issue
    StatusMenu { id: String },
    /// Confirm deletion of an issue
    ConfirmDelete { id: String, title: String },
}

#[derive(Debug)]
pub struct AppState {
    pub role: Role,
    pub screen: Screen,

    // === Collection ===
    /// Issues in server order
    pub issues: Vec<Issue>,
    pub query: QueryState,
    /// Index into the current view (not into `issues`)
    pub selected_index: usize,
    /// Whether keystrokes edit the search text
    pub is_searching: bool,
    pub prompt: Option<Prompt>,

    // === Report form ===
    pub form: ReportForm,
    pub viewport: MapViewport,
    pub tiles: TileSource,
    /// Whether the marker position is still being resolved
    pub is_resolving: bool,
    pub marker: Option<(f64, f64)>,

    // === Loading state ===
    pub is_loading: bool,
    pub is_refreshing: bool,

    // === Messages ===
    pub error: Option<String>,
    pub notice: Option<String>,

    // === Terminal info ===
    pub terminal_width: u16,
    pub terminal_height: u16,

    pub should_quit: bool,
}

impl AppState {
    pub fn new(role: Role, tiles: TileSource) -> Self {
        let (screen, scope) = match role {
            Role::Admin => (Screen::Dashboard, SearchScope::All),
            Role::Citizen => (Screen::Issues, SearchScope::Address),
        };
        Self {
            role,
            screen,
            issues: Vec::new(),
            query: QueryState::with_scope(scope),
            selected_index: 0,
            is_searching: false,
            prompt: None,
            form: ReportForm::default(),
            viewport: MapViewport::new(tiles.max_zoom),
            tiles,
            is_resolving: false,
            marker: None,
            is_loading: false,
            is_refreshing: false,
            error: None,
            notice: None,
            terminal_width: 80,
            terminal_height: 24,
            should_quit: false,
        }
    }

    pub fn set_terminal_size(&mut self, width: u16, height: u16) {
        self.terminal_width = width;
        self.terminal_height = height;
    }

    /// Half-page scroll amount (for Ctrl+D/U).
    pub fn half_page(&self) -> i32 {
        (self.terminal_height.saturating_sub(8) / 2).max(1) as i32
    }

    /// Issues as the current query presents them.
    pub fn visible(&self) -> Vec<&Issue> {
        query::view(&self.issues, &self.query)
    }

    pub fn selected_issue(&self) -> Option<&Issue> {
        self.visible().get(self.selected_index).copied()
    }

    /// Keep the selection inside the current view.
    pub fn clamp_selection(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    /// Set an error message, clearing any notice.
    pub fn fail(&mut self, message: String) {
        self.notice = None;
        self.error = Some(message);
    }

    /// Set a notice, clearing any error.
    pub fn notify(&mut self, message: impl Into<String>) {
        self.error = None;
        self.notice = Some(message.into());
    }
}
