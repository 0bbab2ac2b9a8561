//! Report form and map rendering.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Map, MapResolution},
        Block, Borders, Paragraph, Wrap,
    },
    Frame,
};

use super::{draw_message, screen_layout};
use crate::app::App;
use crate::report::{Field, ReportForm, MAX_OTHER_TYPE_LEN};

/// `(form, map block, map footer)` areas within the main content area.
fn report_layout(area: Rect) -> (Rect, Rect, Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);
    let map_column = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(2)])
        .split(columns[1]);
    (columns[0], map_column[0], map_column[1])
}

fn map_block(focused: bool) -> Block<'static> {
    let style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default()
        .title(" Location ")
        .borders(Borders::ALL)
        .border_style(style)
}

/// Area the map is painted into, for a screen of the given size.
pub fn map_canvas_area(screen: Rect) -> Rect {
    let [main, _] = screen_layout(screen);
    let (_, map, _) = report_layout(main);
    map_block(false).inner(map)
}

/// Draw the report form next to the location map.
pub fn draw_report(f: &mut Frame, app: &App, area: Rect) {
    let (form_area, map_area, footer_area) = report_layout(area);
    let form = &app.state.form;

    draw_form(f, form, app.state.is_resolving, form_area);
    draw_map(f, app, map_area);
    draw_footer(f, app, footer_area);
    draw_message(f, app, form_area);
}

fn field_line<'a>(form: &ReportForm, field: Field, label: &'a str, value: String) -> Line<'a> {
    let focused = form.focus == field;
    let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mut spans = vec![
        Span::styled(format!("{:<12}", label), label_style),
        Span::raw(value),
    ];
    if focused && field.is_text() {
        spans.push(Span::styled("▏", Style::default().fg(Color::Cyan)));
    }
    Line::from(spans)
}

fn draw_form(f: &mut Frame, form: &ReportForm, is_resolving: bool, area: Rect) {
    let mut lines = vec![
        field_line(form, Field::Title, "Title", form.title.clone()),
        field_line(form, Field::Description, "Description", form.description.clone()),
        field_line(
            form,
            Field::Type,
            "Type",
            format!("◀ {} ▶", form.issue_type.label()),
        ),
    ];
    if form.fields().contains(&Field::OtherType) {
        lines.push(field_line(
            form,
            Field::OtherType,
            "Specify",
            format!(
                "{} ({}/{})",
                form.other_type,
                form.other_type.chars().count(),
                MAX_OTHER_TYPE_LEN
            ),
        ));
    }
    let address = if is_resolving {
        "Resolving address…".to_string()
    } else {
        form.address.clone()
    };
    lines.push(field_line(form, Field::Address, "Address", address));
    lines.push(field_line(form, Field::Attachment, "Photo", form.attachment.clone()));
    lines.push(Line::default());

    let position = match &form.location {
        Some(location) => Span::raw(format!(
            "{:.6}, {:.6}",
            location.latitude, location.longitude
        )),
        None => Span::styled(
            "Click the map or press Enter on it to place a pin",
            Style::default().fg(Color::DarkGray),
        ),
    };
    lines.push(Line::from(vec![
        Span::styled(format!("{:<12}", "Pin"), Style::default().fg(Color::DarkGray)),
        position,
    ]));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().title(" Report an Issue ").borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn draw_map(f: &mut Frame, app: &App, area: Rect) {
    let block = map_block(app.state.form.focus == Field::Map);
    let (x_bounds, y_bounds) = app.state.viewport.bounds(block.inner(area));
    let marker = app.state.marker;
    let pin_color = if app.state.is_resolving {
        Color::Yellow
    } else {
        Color::Red
    };

    let canvas = Canvas::default()
        .block(block)
        .marker(symbols::Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(move |ctx| {
            ctx.draw(&Map {
                color: Color::DarkGray,
                resolution: MapResolution::High,
            });
            if let Some((lat, lng)) = marker {
                ctx.layer();
                ctx.print(
                    lng,
                    lat,
                    Span::styled("●", Style::default().fg(pin_color).add_modifier(Modifier::BOLD)),
                );
            }
        });
    f.render_widget(canvas, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let viewport = &app.state.viewport;
    let tiles = &app.state.tiles;
    let lines = vec![
        Line::from(Span::styled(
            format!(" {}  zoom {}", tiles.attribution, viewport.zoom),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            format!(
                " {}",
                tiles.tile_url(viewport.center_lat, viewport.center_lng, viewport.zoom)
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}
