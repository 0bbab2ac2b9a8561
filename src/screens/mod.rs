//! Screen-specific input handling.
//!
//! Each screen module defines its keybindings and returns an Action.

mod dashboard;
mod issues;
mod prompt;
mod report;

pub use dashboard::handle_dashboard_input;
pub use issues::handle_issues_input;
pub use prompt::handle_prompt_input;
pub use report::handle_report_input;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api::Status;
use crate::app::{App, Screen};
use crate::query::SortColumn;
use crate::workflow::Confirmation;

/// Actions that can be performed by the application.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No action needed
    None,
    /// Quit the application
    Quit,
    /// Navigation
    MoveSelection(i32),
    JumpToTop,
    JumpToBottom,
    /// Query editing
    StartSearch,
    SearchInput(char),
    SearchBackspace,
    EndSearch,
    ToggleSort(SortColumn),
    ToggleStatusFilter(Status),
    ClearQuery,
    /// Data operations (async)
    Refresh,
    /// Status workflow
    OpenStatusMenu,
    ApplyStatus(Status),
    RequestDelete,
    AnswerDelete(Confirmation),
    ClosePrompt,
    /// Report form
    OpenReport,
    BackToList,
    FocusNext,
    FocusPrev,
    CycleType(isize),
    FormInput(char),
    FormBackspace,
    PanMap(f64, f64),
    ZoomMap(bool),
    DropMarker,
    CenterOnMarker,
    SubmitReport,
}

/// Route input to the appropriate handler.
pub fn handle_input(app: &App, key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match (app.screen(), key.code) {
            (_, KeyCode::Char('c')) => return Action::Quit,
            (Screen::Report, KeyCode::Char('s')) => return Action::SubmitReport,
            (Screen::Dashboard | Screen::Issues, KeyCode::Char('d')) => {
                return Action::MoveSelection(app.half_page())
            }
            (Screen::Dashboard | Screen::Issues, KeyCode::Char('u')) => {
                return Action::MoveSelection(-app.half_page())
            }
            _ => return Action::None,
        }
    }

    if let Some(prompt) = &app.state.prompt {
        return handle_prompt_input(prompt, key);
    }

    if app.state.is_searching {
        return handle_search_input(key);
    }

    match app.screen() {
        Screen::Dashboard => handle_dashboard_input(key),
        Screen::Issues => handle_issues_input(key),
        Screen::Report => handle_report_input(&app.state.form, key),
    }
}

/// Keys while the search box has focus.
fn handle_search_input(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => Action::EndSearch,
        KeyCode::Backspace => Action::SearchBackspace,
        KeyCode::Char(c) => Action::SearchInput(c),
        _ => Action::None,
    }
}
