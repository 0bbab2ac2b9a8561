//! Citizen issue list rendering.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::{draw_message, status_style};
use crate::api::Status;
use crate::app::App;
use crate::util::{format_reported_at, truncate_str, word_wrap};

/// Description lines shown per issue.
const DESCRIPTION_LINES: usize = 2;

/// Draw the citizen issue list.
pub fn draw_issues(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let mut search = vec![
        Span::styled(" City: ", Style::default().fg(Color::DarkGray)),
        Span::raw(app.state.query.search_text.clone()),
    ];
    if app.state.is_searching {
        search.push(Span::styled("▏", Style::default().fg(Color::Cyan)));
    }
    f.render_widget(
        Paragraph::new(Line::from(search))
            .block(Block::default().title(" Civic · Reported Issues ").borders(Borders::ALL)),
        chunks[0],
    );

    let visible = app.state.visible();
    let wrap_width = (chunks[1].width as usize).saturating_sub(8).max(10);

    let items: Vec<ListItem> = visible
        .iter()
        .map(|issue| {
            // Rejected issues stay listed but recede.
            let dim = issue.status == Status::Rejected;
            let base = if dim {
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
            } else {
                Style::default()
            };

            let mut lines = vec![Line::from(vec![
                Span::styled(
                    truncate_str(&issue.title, 60),
                    base.add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(format!("[{}]", issue.status), status_style(issue.status)),
            ])];
            lines.push(Line::from(Span::styled(
                format!(
                    "  {} · {} · {}",
                    issue.issue_type,
                    truncate_str(&issue.location.address, 60),
                    format_reported_at(issue.reported_at.as_deref())
                ),
                base.fg(Color::DarkGray),
            )));
            lines.extend(
                word_wrap(&issue.description, wrap_width)
                    .into_iter()
                    .take(DESCRIPTION_LINES)
                    .map(|l| Line::from(Span::styled(format!("  {}", l), base))),
            );
            lines.push(Line::default());

            ListItem::new(lines)
        })
        .collect();

    let title = if visible.is_empty() && !app.state.is_refreshing {
        " No issues found ".to_string()
    } else {
        format!(" {} issues ", visible.len())
    };

    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(Style::default().bg(Color::Black))
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    if !visible.is_empty() {
        state.select(Some(app.state.selected_index));
    }

    f.render_stateful_widget(list, chunks[1], &mut state);
    draw_message(f, app, chunks[1]);
}
