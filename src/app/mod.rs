//! Application state and coordination.
//!
//! The app module is split into:
//! - `state`: Pure data structures
//! - `background`: Async task management

mod background;
mod state;

pub use background::{BackgroundMessage, BackgroundTasks};
pub use state::{AppState, Prompt, Screen};

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::{ApiClient, ApiResult, Status};
use crate::config::Config;
use crate::geocode::{NominatimGeocoder, ReverseGeocoder};
use crate::location::{LocationCapture, MapEvent, Marker};
use crate::map::MapViewport;
use crate::query::SortColumn;
use crate::report::{Field, ReportForm};
use crate::workflow::{Confirmation, DeleteOutcome, StatusWorkflow};

/// Pointer within this many cells of the marker grabs it instead of clicking.
const MARKER_GRAB_RADIUS: u16 = 1;

/// Main application coordinator.
///
/// Holds the state, background task manager and core services; provides high-level operations.
pub struct App {
    pub state: AppState,
    bg: BackgroundTasks,
    workflow: StatusWorkflow<ApiClient>,
    geocoder: Arc<dyn ReverseGeocoder>,
    /// Live only while the report form is open
    capture: Option<LocationCapture>,
}

impl App {
    pub fn new(config: Config) -> ApiResult<Self> {
        let client = Arc::new(ApiClient::new(
            config.server_url,
            config.token,
            config.timeout,
        )?);
        let geocoder = NominatimGeocoder::new(config.geocoder_url, config.timeout)?;

        Ok(Self {
            state: AppState::new(config.role, config.tiles),
            workflow: StatusWorkflow::new(Arc::clone(&client)),
            bg: BackgroundTasks::new(client),
            geocoder: Arc::new(geocoder),
            capture: None,
        })
    }

    // === Convenience accessors (delegate to state) ===

    pub fn screen(&self) -> Screen {
        self.state.screen
    }

    pub fn half_page(&self) -> i32 {
        self.state.half_page()
    }

    pub fn set_terminal_size(&mut self, width: u16, height: u16) {
        self.state.set_terminal_size(width, height);
    }

    // === Background task polling ===

    /// Poll for background task completions and update state.
    pub fn poll_background(&mut self) {
        for msg in self.bg.poll() {
            match msg {
                BackgroundMessage::ListRefreshComplete(result) => match result {
                    Ok(issues) => {
                        info!(count = issues.len(), "Issue list refreshed");
                        self.state.issues = issues;
                        self.state.clamp_selection();
                    }
                    Err(e) => {
                        warn!(%e, session = e.is_session_error(), "Issue list refresh failed");
                        self.state.fail(format!("Failed to fetch issues: {}", e));
                    }
                },
            }
        }
        self.state.is_refreshing = self.bg.is_refreshing();

        if let Some(capture) = self.capture.as_mut() {
            if let Some(location) = capture.poll() {
                self.state.form.set_location(location);
            }
            self.state.is_resolving = capture.is_resolving();
            self.state.marker = capture.marker().position();
        }
    }

    // === Data loading ===

    /// Start a background fetch of the issue list.
    pub fn start_refresh(&mut self) {
        self.state.is_refreshing = true;
        self.state.error = None;
        self.bg.spawn_list_refresh();
    }

    // === Navigation ===

    /// Move selection by delta (positive = down, negative = up).
    pub fn move_selection(&mut self, delta: i32) {
        let len = self.state.visible().len();
        if len == 0 {
            return;
        }
        let new_index = self.state.selected_index as i32 + delta;
        self.state.selected_index = new_index.clamp(0, len as i32 - 1) as usize;
    }

    pub fn jump_to_top(&mut self) {
        self.state.selected_index = 0;
    }

    pub fn jump_to_bottom(&mut self) {
        let len = self.state.visible().len();
        self.state.selected_index = len.saturating_sub(1);
    }

    /// Open the report form with a fresh map session.
    pub fn open_report(&mut self) {
        self.bg.invalidate_list_refresh();
        self.state.is_refreshing = false;
        self.state.screen = Screen::Report;
        self.state.form = ReportForm::default();
        self.state.viewport = MapViewport::new(self.state.tiles.max_zoom);
        self.state.marker = None;
        self.state.is_resolving = false;
        self.state.error = None;
        self.state.notice = None;
        self.capture = Some(LocationCapture::new(Arc::clone(&self.geocoder)));
        if !self.bg.client().has_token() {
            self.state
                .fail("Not logged in: set CIVIC_AUTH_TOKEN to submit reports".to_string());
        }
    }

    /// Leave the report form, discarding it and its map session.
    pub fn back_to_list(&mut self) {
        self.teardown_map();
        self.state.form = ReportForm::default();
        self.state.screen = Screen::Issues;
        self.start_refresh();
    }

    fn teardown_map(&mut self) {
        if let Some(mut capture) = self.capture.take() {
            capture.handle(MapEvent::Teardown);
        }
        self.state.marker = None;
        self.state.is_resolving = false;
    }

    // === Query ===

    pub fn start_search(&mut self) {
        self.state.is_searching = true;
    }

    pub fn end_search(&mut self) {
        self.state.is_searching = false;
    }

    pub fn search_input(&mut self, c: char) {
        self.state.query.search_text.push(c);
        self.state.clamp_selection();
    }

    pub fn search_backspace(&mut self) {
        self.state.query.search_text.pop();
        self.state.clamp_selection();
    }

    pub fn toggle_sort(&mut self, column: SortColumn) {
        self.state.query.toggle_sort(column);
    }

    pub fn toggle_status_filter(&mut self, status: Status) {
        self.state.query.toggle_status(status);
        self.state.clamp_selection();
    }

    pub fn clear_query(&mut self) {
        self.state.query.clear();
        self.state.selected_index = 0;
    }

    // === Status workflow ===

    pub fn open_status_menu(&mut self) {
        let prompt = self.state.selected_issue().map(|issue| Prompt::StatusMenu {
            id: issue.id.clone(),
        });
        if prompt.is_some() {
            self.state.prompt = prompt;
        }
    }

    pub fn request_delete(&mut self) {
        let prompt = self.state.selected_issue().map(|issue| Prompt::ConfirmDelete {
            id: issue.id.clone(),
            title: issue.title.clone(),
        });
        if prompt.is_some() {
            self.state.prompt = prompt;
        }
    }

    pub fn close_prompt(&mut self) {
        self.state.prompt = None;
    }

    /// Apply a status picked from the status menu.
    pub async fn apply_status(&mut self, status: Status) {
        let Some(Prompt::StatusMenu { id }) = self.state.prompt.take() else {
            return;
        };

        self.state.is_loading = true;
        match self
            .workflow
            .apply_status(&mut self.state.issues, &id, status)
            .await
        {
            Ok(()) => self.state.notify(format!("Status updated to {}", status)),
            Err(e) => self.state.fail(format!("Failed to update status: {}", e)),
        }
        self.state.clamp_selection();
        self.state.is_loading = false;
    }

    /// Answer the delete confirmation prompt.
    pub async fn answer_delete(&mut self, confirmation: Confirmation) {
        let Some(Prompt::ConfirmDelete { id, .. }) = self.state.prompt.take() else {
            return;
        };

        self.state.is_loading = true;
        match self
            .workflow
            .delete_issue(&mut self.state.issues, &id, confirmation)
            .await
        {
            Ok(DeleteOutcome::Deleted) => self.state.notify("Issue deleted"),
            Ok(DeleteOutcome::Cancelled) => {}
            Err(e) => self.state.fail(format!("Failed to delete issue: {}", e)),
        }
        self.state.clamp_selection();
        self.state.is_loading = false;
    }

    // === Report form ===

    pub fn focus_next(&mut self, delta: isize) {
        self.state.form.focus_next(delta);
    }

    pub fn cycle_type(&mut self, delta: isize) {
        self.state.form.cycle_type(delta);
    }

    pub fn form_input(&mut self, c: char) {
        self.state.form.insert_char(c);
    }

    pub fn form_backspace(&mut self) {
        self.state.form.backspace();
    }

    pub fn pan_map(&mut self, dx: f64, dy: f64) {
        self.state.viewport.pan(dx, dy);
    }

    pub fn zoom_map(&mut self, zoom_in: bool) {
        if zoom_in {
            self.state.viewport.zoom_in();
        } else {
            self.state.viewport.zoom_out();
        }
    }

    /// Drop the marker at the centre of the map (keyboard equivalent of a click).
    pub fn drop_marker_at_center(&mut self) {
        let viewport = self.state.viewport;
        self.map_event(MapEvent::Click {
            lat: viewport.center_lat,
            lng: viewport.center_lng,
        });
    }

    pub fn center_on_marker(&mut self) {
        if let Some((lat, lng)) = self.state.marker {
            self.state.viewport.center_on(lat, lng);
        }
    }

    fn map_event(&mut self, event: MapEvent) {
        if let Some(capture) = self.capture.as_mut() {
            capture.handle(event);
            self.state.marker = capture.marker().position();
            self.state.is_resolving = capture.is_resolving();
        }
    }

    fn marker(&self) -> Marker {
        self.capture
            .as_ref()
            .map(LocationCapture::marker)
            .unwrap_or(Marker::None)
    }

    /// Translate mouse input over the map into map events.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.state.screen != Screen::Report {
            return;
        }

        let screen = Rect::new(0, 0, self.state.terminal_width, self.state.terminal_height);
        let area = crate::ui::map_canvas_area(screen);
        let viewport = self.state.viewport;
        let coord = viewport.cell_to_coord(area, mouse.column, mouse.row);
        let marker = self.marker();

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some((lat, lng)) = coord else {
                    return;
                };
                self.state.form.focus = Field::Map;

                let grabbed = marker
                    .position()
                    .and_then(|(mlat, mlng)| viewport.coord_to_cell(area, mlat, mlng))
                    .is_some_and(|(col, row)| {
                        col.abs_diff(mouse.column) <= MARKER_GRAB_RADIUS
                            && row.abs_diff(mouse.row) <= MARKER_GRAB_RADIUS
                    });

                if grabbed {
                    self.map_event(MapEvent::DragStart);
                } else {
                    self.map_event(MapEvent::Click { lat, lng });
                }
            }
            MouseEventKind::Drag(MouseButton::Left) if marker.is_dragging() => {
                if let Some((lat, lng)) = coord {
                    self.map_event(MapEvent::DragMove { lat, lng });
                }
            }
            MouseEventKind::Up(MouseButton::Left) if marker.is_dragging() => {
                // Released outside the map: drop where the marker was last dragged to.
                let Some((lat, lng)) = coord.or(marker.position()) else {
                    return;
                };
                self.map_event(MapEvent::DragEnd { lat, lng });
            }
            _ => {}
        }
    }

    /// Validate and submit the report.
    pub async fn submit_report(&mut self) {
        if self.state.is_resolving {
            self.state.fail("Please wait for the address to resolve".to_string());
            return;
        }

        let issue = match self.state.form.validate() {
            Ok(issue) => issue,
            Err(e) => {
                self.state.fail(e.to_string());
                return;
            }
        };

        self.state.is_loading = true;
        let result = self.bg.client().create_issue(&issue).await;
        self.state.is_loading = false;

        match result {
            Ok(_) => {
                info!(title = %issue.title, "Issue reported");
                self.back_to_list();
                self.state.notify("Issue reported successfully!");
            }
            Err(e) => {
                warn!(%e, "Issue report failed");
                self.state.fail(format!("Failed to report issue: {}", e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Role;
    use crate::map::TileSource;
    use crossterm::event::KeyModifiers;
    use std::time::Duration;

    fn app(token: Option<&str>) -> App {
        let mut app = App::new(Config {
            server_url: "http://127.0.0.1:9".to_string(),
            token: token.map(str::to_string),
            geocoder_url: "http://127.0.0.1:9".to_string(),
            role: Role::Citizen,
            timeout: Duration::from_secs(1),
            tiles: TileSource::default(),
            log_filter: String::new(),
        })
        .unwrap();
        app.set_terminal_size(100, 30);
        app
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[tokio::test]
    async fn test_click_on_map_places_marker() {
        let mut app = app(Some("t"));
        app.open_report();
        let area = crate::ui::map_canvas_area(Rect::new(0, 0, 100, 30));

        app.handle_mouse(mouse(
            MouseEventKind::Down(MouseButton::Left),
            area.x + 5,
            area.y + 5,
        ));

        assert!(app.state.marker.is_some());
        assert!(app.state.is_resolving);
        assert_eq!(app.state.form.focus, Field::Map);
    }

    #[tokio::test]
    async fn test_drag_moves_marker() {
        let mut app = app(Some("t"));
        app.open_report();
        let area = crate::ui::map_canvas_area(Rect::new(0, 0, 100, 30));
        let (x, y) = (area.x + 5, area.y + 5);

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), x, y));
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), x, y));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), x + 10, y + 3));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), x + 10, y + 3));

        let expected = app.state.viewport.cell_to_coord(area, x + 10, y + 3);
        assert_eq!(app.state.marker, expected);
        assert_eq!(app.marker(), Marker::Placed {
            lat: expected.unwrap().0,
            lng: expected.unwrap().1,
        });
    }

    #[tokio::test]
    async fn test_mouse_ignored_outside_report() {
        let mut app = app(Some("t"));
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 60, 5));
        assert_eq!(app.state.marker, None);
    }

    #[tokio::test]
    async fn test_leaving_report_tears_down_map() {
        let mut app = app(Some("t"));
        app.open_report();
        app.drop_marker_at_center();
        assert!(app.state.marker.is_some());

        app.back_to_list();

        assert_eq!(app.screen(), Screen::Issues);
        assert_eq!(app.state.marker, None);
        assert!(!app.state.is_resolving);
        assert!(app.capture.is_none());
    }

    #[tokio::test]
    async fn test_open_report_without_token_warns() {
        let mut app = app(None);
        app.open_report();
        assert!(app.state.error.is_some());
    }

    #[tokio::test]
    async fn test_submit_refused_while_resolving() {
        let mut app = app(Some("t"));
        app.open_report();
        app.drop_marker_at_center();

        app.submit_report().await;

        assert_eq!(app.screen(), Screen::Report);
        assert_eq!(
            app.state.error.as_deref(),
            Some("Please wait for the address to resolve")
        );
    }
}
