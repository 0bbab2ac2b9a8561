//! UI rendering with Ratatui.

mod dashboard;
mod issues;
mod report;

pub use report::map_canvas_area;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::api::Status;
use crate::app::{App, Prompt, Screen};
use crate::workflow::StatusTone;

/// Split the screen into main content and the action bar.
fn screen_layout(area: Rect) -> [Rect; 2] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Status/action bar
        ])
        .split(area);
    [chunks[0], chunks[1]]
}

/// Main draw function - routes to appropriate screen.
pub fn draw(f: &mut Frame, app: &App) {
    let [main, bar] = screen_layout(f.area());

    match app.screen() {
        Screen::Dashboard => dashboard::draw_dashboard(f, app, main),
        Screen::Issues => issues::draw_issues(f, app, main),
        Screen::Report => report::draw_report(f, app, main),
    }

    if let Some(prompt) = &app.state.prompt {
        draw_prompt(f, prompt, main);
    }

    draw_action_bar(f, app, bar);
}

/// Draw the action bar at the bottom.
fn draw_action_bar(f: &mut Frame, app: &App, area: Rect) {
    let keybinds = match (&app.state.prompt, app.state.is_searching, app.screen()) {
        (Some(Prompt::StatusMenu { .. }), _, _) => vec![("1-4", "set status"), ("Esc", "cancel")],
        (Some(Prompt::ConfirmDelete { .. }), _, _) => vec![("y", "delete"), ("n/Esc", "keep")],
        (None, true, _) => vec![("type", "search"), ("Enter/Esc", "done")],
        (None, false, Screen::Dashboard) => vec![
            ("↑↓/jk", "navigate"),
            ("/", "search"),
            ("T/L/S", "sort"),
            ("1-5", "filter"),
            ("c", "clear"),
            ("u", "status"),
            ("d", "delete"),
            ("r", "refresh"),
            ("q", "quit"),
        ],
        (None, false, Screen::Issues) => vec![
            ("↑↓/jk", "navigate"),
            ("/", "city"),
            ("n", "report"),
            ("r", "refresh"),
            ("q", "quit"),
        ],
        (None, false, Screen::Report) => vec![
            ("Tab", "next field"),
            ("←→", "type/pan"),
            ("+/-", "zoom"),
            ("Enter", "drop pin"),
            ("c", "centre"),
            ("Ctrl+S", "submit"),
            ("Esc", "back"),
        ],
    };

    let mut spans: Vec<Span> = keybinds
        .iter()
        .flat_map(|(key, desc)| {
            vec![
                Span::styled(format!("[{}]", key), Style::default().fg(Color::Cyan)),
                Span::raw(format!(" {} ", desc)),
            ]
        })
        .collect();

    if app.state.is_loading || app.state.is_refreshing {
        spans.push(Span::styled(" ◐ ", Style::default().fg(Color::Yellow)));
    }

    let line = Line::from(spans);
    let paragraph = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));

    f.render_widget(paragraph, area);
}

/// Draw a modal prompt centred over the main area.
fn draw_prompt(f: &mut Frame, prompt: &Prompt, area: Rect) {
    let (title, lines) = match prompt {
        Prompt::StatusMenu { .. } => {
            let lines = Status::ADMIN_CHOICES
                .iter()
                .enumerate()
                .map(|(i, status)| {
                    Line::from(vec![
                        Span::styled(format!(" [{}] ", i + 1), Style::default().fg(Color::Cyan)),
                        Span::styled(status.as_str(), status_style(*status)),
                    ])
                })
                .collect::<Vec<_>>();
            (" Update Status ", lines)
        }
        Prompt::ConfirmDelete { title, .. } => (
            " Delete Issue ",
            vec![
                Line::from(format!(" Delete \"{}\"?", crate::util::truncate_str(title, 40))),
                Line::default(),
                Line::from(Span::styled(
                    " [y] yes   [n] no",
                    Style::default().fg(Color::DarkGray),
                )),
            ],
        ),
    };

    let popup = centered(area, 50, lines.len() as u16 + 2);
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines).block(Block::default().title(title).borders(Borders::ALL)),
        popup,
    );
}

/// Error or notice line, drawn at the bottom edge of `area`.
fn draw_message(f: &mut Frame, app: &App, area: Rect) {
    let (text, color) = match (&app.state.error, &app.state.notice) {
        (Some(error), _) => (error.as_str(), Color::Red),
        (None, Some(notice)) => (notice.as_str(), Color::Green),
        (None, None) => return,
    };
    let message_area = Rect {
        x: area.x + 2,
        y: area.y + area.height.saturating_sub(2),
        width: area.width.saturating_sub(4),
        height: 1,
    };
    f.render_widget(
        Paragraph::new(text).style(Style::default().fg(color)),
        message_area,
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Badge colour for a status.
pub fn status_color(status: Status) -> Color {
    match status.tone() {
        StatusTone::Neutral => Color::Gray,
        StatusTone::Warning => Color::Yellow,
        StatusTone::Info => Color::Blue,
        StatusTone::Success => Color::Green,
        StatusTone::Danger => Color::Red,
    }
}

fn status_style(status: Status) -> Style {
    Style::default()
        .fg(status_color(status))
        .add_modifier(Modifier::BOLD)
}
