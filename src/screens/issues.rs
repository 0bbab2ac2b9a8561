//! Citizen issue list input handling.

use crossterm::event::{KeyCode, KeyEvent};
use super::Action;

/// Handle input on the citizen list.
pub fn handle_issues_input(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveSelection(1),
        KeyCode::Char('k') | KeyCode::Up => Action::MoveSelection(-1),
        KeyCode::Char('g') => Action::JumpToTop,
        KeyCode::Char('G') => Action::JumpToBottom,
        KeyCode::Char('r') => Action::Refresh,
        KeyCode::Char('/') => Action::StartSearch,
        KeyCode::Char('c') => Action::ClearQuery,
        KeyCode::Char('n') => Action::OpenReport,
        _ => Action::None,
    }
}
