//! Civic TUI - Terminal client for the civic issue reporting portal
//!
//! Citizens browse and report issues with a map-picked location; administrators
//! triage them from a sortable, filterable dashboard.

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

use civic_tui::app::App;
use civic_tui::config::{Cli, Config};
use civic_tui::screens::{handle_input, Action};
use civic_tui::{logging, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from(Cli::parse());

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = logging::init(&config.log_filter)?;

    tracing::info!(server = %config.server_url, role = ?config.role, "Starting civic TUI");

    let mut app = App::new(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    app.set_terminal_size(size.width, size.height);
    app.start_refresh();

    // Main loop
    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(?err, "TUI exited with error");
        eprintln!("Error: {err:?}");
        if let Some(path) = logging::log_file_path() {
            eprintln!("See {} for details", path.display());
        }
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Poll for background task completions
        app.poll_background();

        // Draw UI
        terminal.draw(|f| ui::draw(f, app))?;

        // Handle input (with timeout for async polling)
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events (not release)
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    let action = handle_input(app, key);
                    dispatch(app, action).await;
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::Resize(width, height) => app.set_terminal_size(width, height),
                _ => {}
            }
        }

        // Check if app wants to quit
        if app.state.should_quit {
            return Ok(());
        }
    }
}

/// Apply an action to the app.
async fn dispatch(app: &mut App, action: Action) {
    match action {
        Action::None => {}
        Action::Quit => app.state.should_quit = true,
        Action::MoveSelection(delta) => app.move_selection(delta),
        Action::JumpToTop => app.jump_to_top(),
        Action::JumpToBottom => app.jump_to_bottom(),
        Action::StartSearch => app.start_search(),
        Action::SearchInput(c) => app.search_input(c),
        Action::SearchBackspace => app.search_backspace(),
        Action::EndSearch => app.end_search(),
        Action::ToggleSort(column) => app.toggle_sort(column),
        Action::ToggleStatusFilter(status) => app.toggle_status_filter(status),
        Action::ClearQuery => app.clear_query(),
        Action::Refresh => app.start_refresh(),
        Action::OpenStatusMenu => app.open_status_menu(),
        Action::ApplyStatus(status) => app.apply_status(status).await,
        Action::RequestDelete => app.request_delete(),
        Action::AnswerDelete(confirmation) => app.answer_delete(confirmation).await,
        Action::ClosePrompt => app.close_prompt(),
        Action::OpenReport => app.open_report(),
        Action::BackToList => app.back_to_list(),
        Action::FocusNext => app.focus_next(1),
        Action::FocusPrev => app.focus_next(-1),
        Action::CycleType(delta) => app.cycle_type(delta),
        Action::FormInput(c) => app.form_input(c),
        Action::FormBackspace => app.form_backspace(),
        Action::PanMap(dx, dy) => app.pan_map(dx, dy),
        Action::ZoomMap(zoom_in) => app.zoom_map(zoom_in),
        Action::DropMarker => app.drop_marker_at_center(),
        Action::CenterOnMarker => app.center_on_marker(),
        Action::SubmitReport => app.submit_report().await,
    }
}
