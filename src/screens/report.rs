//! Report form input handling.

use crossterm::event::{KeyCode, KeyEvent};

use super::Action;
use crate::report::{Field, ReportForm};

/// Fraction of the visible span moved per arrow key.
const PAN_STEP: f64 = 0.1;

/// Handle input on the report form.
pub fn handle_report_input(form: &ReportForm, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => return Action::BackToList,
        KeyCode::Tab => return Action::FocusNext,
        KeyCode::BackTab => return Action::FocusPrev,
        _ => {}
    }

    match form.focus {
        Field::Type => match key.code {
            KeyCode::Left | KeyCode::Char('h') => Action::CycleType(-1),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => Action::CycleType(1),
            KeyCode::Enter | KeyCode::Down => Action::FocusNext,
            KeyCode::Up => Action::FocusPrev,
            _ => Action::None,
        },
        Field::Map => match key.code {
            KeyCode::Left | KeyCode::Char('h') => Action::PanMap(-PAN_STEP, 0.0),
            KeyCode::Right | KeyCode::Char('l') => Action::PanMap(PAN_STEP, 0.0),
            KeyCode::Up | KeyCode::Char('k') => Action::PanMap(0.0, PAN_STEP),
            KeyCode::Down | KeyCode::Char('j') => Action::PanMap(0.0, -PAN_STEP),
            KeyCode::Char('+') | KeyCode::Char('=') => Action::ZoomMap(true),
            KeyCode::Char('-') => Action::ZoomMap(false),
            KeyCode::Enter | KeyCode::Char(' ') => Action::DropMarker,
            KeyCode::Char('c') => Action::CenterOnMarker,
            _ => Action::None,
        },
        _ => match key.code {
            KeyCode::Char(c) => Action::FormInput(c),
            KeyCode::Backspace => Action::FormBackspace,
            KeyCode::Enter | KeyCode::Down => Action::FocusNext,
            KeyCode::Up => Action::FocusPrev,
            _ => Action::None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_text_fields_take_characters() {
        let form = ReportForm::default();
        assert_eq!(handle_report_input(&form, key(KeyCode::Char('j'))), Action::FormInput('j'));
    }

    #[test]
    fn test_map_keys() {
        let form = ReportForm {
            focus: Field::Map,
            ..ReportForm::default()
        };
        assert_eq!(handle_report_input(&form, key(KeyCode::Enter)), Action::DropMarker);
        assert_eq!(handle_report_input(&form, key(KeyCode::Char('+'))), Action::ZoomMap(true));
        assert_eq!(handle_report_input(&form, key(KeyCode::Esc)), Action::BackToList);
    }
}
