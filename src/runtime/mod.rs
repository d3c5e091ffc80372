use std::env;
use std::path::PathBuf;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::logging;
use crate::playlist::collect_uploads;
use crate::session::SessionController;
use crate::sink::RodioSink;

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    logging::init(&settings.logging);

    let paths: Vec<PathBuf> = env::args_os().skip(1).map(PathBuf::from).collect();
    let uploads = collect_uploads(&paths, &settings.library);

    let sink = RodioSink::open(&settings.audio)?;
    let mut session = SessionController::new(sink, startup::session_options(&settings));
    let staged = startup::stage_uploads(&mut session, uploads);
    info!("cadenza starting with {staged} staged uploads");

    let mut app = App::new();

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &mut session);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
