//! Admin dashboard rendering.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::{draw_message, status_color, status_style};
use crate::api::Status;
use crate::app::App;
use crate::query::{IssueStats, SortColumn, SortDirection};
use crate::util::{format_reported_at, truncate_str};

/// Draw the admin dashboard.
pub fn draw_dashboard(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Stats
            Constraint::Length(1), // Query line
            Constraint::Min(1),    // Table
        ])
        .split(area);

    draw_stats(f, app, chunks[0]);
    draw_query_line(f, app, chunks[1]);
    draw_table(f, app, chunks[2]);
    draw_message(f, app, chunks[2]);
}

fn draw_stats(f: &mut Frame, app: &App, area: Rect) {
    let stats = IssueStats::from_issues(&app.state.issues);
    let stat = |label: &'static str, value: usize, color: Color| {
        vec![
            Span::styled(format!(" {} ", label), Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{:<5}", value),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]
    };

    let spans: Vec<Span> = [
        stat("Total", stats.total, Color::White),
        stat("Resolved", stats.resolved, status_color(Status::Resolved)),
        stat("In Progress", stats.in_progress, status_color(Status::InProgress)),
        stat("Pending", stats.pending, status_color(Status::Pending)),
    ]
    .concat();

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(" Civic · Admin Dashboard ")
            .borders(Borders::ALL),
    );
    f.render_widget(paragraph, area);
}

/// Search text, active filters and sort order.
fn draw_query_line(f: &mut Frame, app: &App, area: Rect) {
    let query = &app.state.query;
    let mut spans = vec![
        Span::styled(" Search: ", Style::default().fg(Color::DarkGray)),
        Span::raw(query.search_text.clone()),
    ];
    if app.state.is_searching {
        spans.push(Span::styled("▏", Style::default().fg(Color::Cyan)));
    }

    spans.push(Span::styled("   Filter: ", Style::default().fg(Color::DarkGray)));
    for (i, status) in Status::ALL.iter().enumerate() {
        let style = if query.status_filters.contains(status) {
            status_style(*status).add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("{}:{}", i + 1, status), style));
        spans.push(Span::raw(" "));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn header_cell(label: &'static str, column: Option<SortColumn>, app: &App) -> Cell<'static> {
    let query = &app.state.query;
    let arrow = match (column, query.sort_column) {
        (Some(c), Some(active)) if c == active => match query.sort_direction {
            SortDirection::Asc => " ▲",
            SortDirection::Desc => " ▼",
        },
        _ => "",
    };
    Cell::from(format!("{}{}", label, arrow))
}

fn draw_table(f: &mut Frame, app: &App, area: Rect) {
    let visible = app.state.visible();

    let header = Row::new(vec![
        header_cell("Title [T]", Some(SortColumn::Title), app),
        header_cell("Type", None, app),
        header_cell("Location [L]", Some(SortColumn::Location), app),
        header_cell("Reported", None, app),
        header_cell("Status [S]", Some(SortColumn::Status), app),
    ])
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = visible
        .iter()
        .map(|issue| {
            Row::new(vec![
                Cell::from(truncate_str(&issue.title, 40)),
                Cell::from(truncate_str(&issue.issue_type, 24)),
                Cell::from(truncate_str(&issue.location.address, 40)),
                Cell::from(format_reported_at(issue.reported_at.as_deref())),
                Cell::from(Span::styled(issue.status.as_str(), status_style(issue.status))),
            ])
        })
        .collect();

    let title = if visible.is_empty() && !app.state.is_refreshing {
        " No issues found ".to_string()
    } else {
        format!(" Issues ({}/{}) ", visible.len(), app.state.issues.len())
    };

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(28),
            Constraint::Percentage(16),
            Constraint::Percentage(30),
            Constraint::Length(12),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(Block::default().title(title).borders(Borders::ALL))
    .row_highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("▶ ");

    let mut state = TableState::default();
    if !visible.is_empty() {
        state.select(Some(app.state.selected_index));
    }

    f.render_stateful_widget(table, area, &mut state);
}
