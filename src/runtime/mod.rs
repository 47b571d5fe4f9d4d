use std::env;
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use rodio::OutputStreamBuilder;
use tracing::{error, info};

use crate::error::PlayerError;
use crate::logging;
use crate::mpris::ControlCmd;

mod event_loop;
mod mpris_sync;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    let _log_guard = logging::init(&settings.logging);

    let dir = startup::resolve_music_dir(env::args().nth(1), &settings);
    info!(dir = %dir.display(), "starting");

    let tracks = match startup::scan_library(&dir, &settings) {
        Ok(tracks) => tracks,
        Err(e @ (PlayerError::MissingDirectory(_) | PlayerError::EmptyQueue)) => {
            // Nothing to play is not a crash.
            error!(error = %e, "nothing to play");
            eprintln!("rondo: {e}");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let mut stream = OutputStreamBuilder::open_default_stream().map_err(PlayerError::from)?;
    stream.log_on_drop(false);

    let mut controller = startup::build_controller(&dir, tracks, stream.mixer(), &settings)?;

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx.clone());

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut controller,
        &mpris,
        &control_tx,
        &control_rx,
    );

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    controller.stop();
    info!("shutting down");
    run_result
}
