//! Modal prompt input handling.

use crossterm::event::{KeyCode, KeyEvent};

use super::Action;
use crate::api::Status;
use crate::app::Prompt;
use crate::workflow::Confirmation;

/// Handle input while a prompt is open.
pub fn handle_prompt_input(prompt: &Prompt, key: KeyEvent) -> Action {
    match prompt {
        Prompt::StatusMenu { .. } => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Action::ClosePrompt,
            KeyCode::Char(c) => c
                .to_digit(10)
                .and_then(|d| (d as usize).checked_sub(1))
                .and_then(|i| Status::ADMIN_CHOICES.get(i))
                .map_or(Action::None, |status| Action::ApplyStatus(*status)),
            _ => Action::None,
        },
        // Anything but an explicit yes declines.
        Prompt::ConfirmDelete { .. } => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Action::AnswerDelete(Confirmation::Confirmed),
            _ => Action::AnswerDelete(Confirmation::Declined),
        },
    }
}
