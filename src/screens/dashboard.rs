//! Admin dashboard input handling.

use crossterm::event::{KeyCode, KeyEvent};

use super::Action;
use crate::api::Status;
use crate::query::SortColumn;

/// Handle input on the admin dashboard.
pub fn handle_dashboard_input(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveSelection(1),
        KeyCode::Char('k') | KeyCode::Up => Action::MoveSelection(-1),
        KeyCode::Char('g') => Action::JumpToTop,
        KeyCode::Char('G') => Action::JumpToBottom,
        KeyCode::Char('r') => Action::Refresh,
        KeyCode::Char('/') => Action::StartSearch,
        KeyCode::Char('T') => Action::ToggleSort(SortColumn::Title),
        KeyCode::Char('L') => Action::ToggleSort(SortColumn::Location),
        KeyCode::Char('S') => Action::ToggleSort(SortColumn::Status),
        KeyCode::Char(c @ '1'..='5') => filter_key(c),
        KeyCode::Char('c') => Action::ClearQuery,
        KeyCode::Char('u') | KeyCode::Enter => Action::OpenStatusMenu,
        KeyCode::Char('d') | KeyCode::Delete => Action::RequestDelete,
        _ => Action::None,
    }
}

/// Digits toggle filters in `Status::ALL` order.
fn filter_key(c: char) -> Action {
    c.to_digit(10)
        .and_then(|d| Status::ALL.get(d as usize - 1))
        .map_or(Action::None, |status| Action::ToggleStatusFilter(*status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_digits_toggle_filters() {
        let key = KeyEvent::new(KeyCode::Char('1'), KeyModifiers::NONE);
        assert_eq!(
            handle_dashboard_input(key),
            Action::ToggleStatusFilter(Status::Resolved)
        );
        let key = KeyEvent::new(KeyCode::Char('5'), KeyModifiers::NONE);
        assert_eq!(
            handle_dashboard_input(key),
            Action::ToggleStatusFilter(Status::Reported)
        );
    }
}
