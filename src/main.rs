//! TRIPT - Terminal Trip Planner
//!
//! A terminal travel-itinerary planner: browse, sort and filter waypoints,
//! edit them in place, and keep the itinerary persisted after every change.

use std::io;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};

mod domain;
mod application;
mod infrastructure;
mod presentation;

use application::{App, TripModel};
use domain::ItineraryData;
use infrastructure::DataSource;
use presentation::{InputHandler, render_ui};

/// Entry point for the TRIPT terminal trip planner.
///
/// Resolves the itinerary source from the first argument (a file path or an
/// HTTP endpoint), sets up the terminal interface, and runs the main event
/// loop until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup fails or if there are issues
/// with the terminal interface during runtime.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let source = DataSource::from_arg(std::env::args().nth(1));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    app.trip_model = TripModel::with_store(source.store_path());
    let res = run_app(&mut terminal, &mut app, source);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Shows the loading placeholder, resolves the initial itinerary, then
/// alternates between rendering and keyboard input until the user presses
/// 'q' outside of an edit session.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    source: DataSource,
) -> io::Result<()> {
    app.init();
    terminal.draw(|f| render_ui(f, app))?;

    match source.fetch(App::now()) {
        Ok(data) => app.load_initial(data),
        Err(err) => {
            app.status_message = Some(format!("{} (using the built-in itinerary)", err));
            app.load_initial(ItineraryData::seed(App::now()));
        }
    }

    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') if !app.is_editing() && !app.help_open => return Ok(()),
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}
