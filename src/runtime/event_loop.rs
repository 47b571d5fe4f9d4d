use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, info};

use crate::audio::{EngineState, PlaybackEngine};
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::queue::{DisplaySurface, QueueController};
use crate::runtime::mpris_sync::{MprisSnapshot, snapshot, update_mpris};
use crate::runtime::startup::Controller;
use crate::ui::{self, Transport};

/// Main terminal event loop: polls the engines, draws the UI and applies
/// commands from the keyboard and MPRIS. Returns `Ok(())` when shutdown is
/// requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    controller: &mut Controller,
    mpris: &MprisHandle,
    control_tx: &mpsc::Sender<ControlCmd>,
    control_rx: &mpsc::Receiver<ControlCmd>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut last_mpris: MprisSnapshot = update_mpris(mpris, controller);

    loop {
        controller.tick();

        // Track changes from auto-advance never pass through a command.
        let snap = snapshot(controller);
        if snap != last_mpris {
            last_mpris = update_mpris(mpris, controller);
        }

        let transport = transport(controller);
        terminal.draw(|f| {
            ui::draw(
                f,
                controller.display(),
                transport,
                &settings.ui,
                settings.playback.volume_step,
            )
        })?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, settings, controller) {
                info!("quit requested");
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(cmd) = key_to_cmd(key) {
                    let _ = control_tx.send(cmd);
                }
            }
        }
    }
}

fn transport<E: PlaybackEngine, D: DisplaySurface>(
    controller: &QueueController<E, D>,
) -> Transport {
    let engine = controller.active().engine();
    Transport {
        volume: controller.volume(),
        elapsed: engine.position(),
        total: engine.total_duration(),
    }
}

/// Apply one command to the queue. Returns `true` when the app should exit.
pub fn handle_control_cmd<E: PlaybackEngine, D: DisplaySurface>(
    cmd: ControlCmd,
    settings: &config::Settings,
    controller: &mut QueueController<E, D>,
) -> bool {
    debug!(?cmd, "control command");
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => {
            if controller.active().engine().state() != EngineState::Playing {
                controller.toggle_play_pause();
            }
        }
        ControlCmd::Pause => controller.pause(),
        ControlCmd::PlayPause => {
            controller.toggle_play_pause();
        }
        ControlCmd::Stop => controller.stop(),
        ControlCmd::Next => controller.advance(),
        ControlCmd::VolumeUp => {
            let v = controller.volume() + settings.playback.volume_step;
            controller.set_volume(v);
        }
        ControlCmd::VolumeDown => {
            let v = controller.volume() - settings.playback.volume_step;
            controller.set_volume(v);
        }
        ControlCmd::SetVolume(v) => {
            controller.set_volume(v as f32);
        }
    }

    false
}

/// Map a key press to the command it stands for.
pub fn key_to_cmd(key: KeyEvent) -> Option<ControlCmd> {
    match key.code {
        KeyCode::Char('q') => Some(ControlCmd::Quit),
        KeyCode::Char('p') | KeyCode::Char(' ') => Some(ControlCmd::PlayPause),
        KeyCode::Char('n') | KeyCode::Char('l') => Some(ControlCmd::Next),
        KeyCode::Char('s') => Some(ControlCmd::Stop),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(ControlCmd::VolumeUp),
        KeyCode::Char('-') => Some(ControlCmd::VolumeDown),
        _ => None,
    }
}
