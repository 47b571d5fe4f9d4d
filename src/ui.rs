//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Row, Table, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock, time::Duration};

use crate::app::App;
use crate::config::UiSettings;

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("space/p", "play/pause");
    map.insert("n/l", "skip");
    map.insert("s", "stop");
    map.insert("+/-", "volume");
    map.insert("q", "quit");
    map
});

/// Transport values read from the active engine each frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct Transport {
    pub volume: f32,
    pub elapsed: Duration,
    pub total: Option<Duration>,
}

/// Render the controls help text, incorporating the volume step.
fn controls_text(volume_step: f32) -> String {
    let order = ["space/p", "n/l", "s", "+/-", "q"];
    order
        .iter()
        .filter_map(|k| {
            CONTROLS_MAP.get(*k).map(|v| {
                if *k == "+/-" {
                    format!("[{}] {} ±{}%", k, v, percent(volume_step))
                } else {
                    format!("[{}] {}", k, v)
                }
            })
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn time_text(transport: &Transport) -> String {
    match transport.total {
        Some(total) => format!(
            "{} / {}",
            format_mmss(transport.elapsed),
            format_mmss(total)
        ),
        None => format_mmss(transport.elapsed),
    }
}

fn percent(fraction: f32) -> u32 {
    (fraction.clamp(0.0, 1.0) * 100.0).round() as u32
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    transport: Transport,
    ui_settings: &UiSettings,
    volume_step: f32,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" rondo ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Now playing
    let mut status = format!("{}{}", ui_settings.now_playing_prefix, app.now_playing);
    if let Some(dir) = &app.current_dir {
        status.push_str(&format!(" • Dir: {} ({} tracks)", dir, app.track_count));
    }
    let status_par = Paragraph::new(status)
        .bold()
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Transport row: the button labels, then the progress bar.
    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(26), Constraint::Min(10)])
        .split(chunks[2]);

    let buttons = Paragraph::new(format!(
        "[{}] [Stop] [Skip]",
        app.play_button_label()
    ))
    .alignment(Alignment::Center)
    .block(Block::bordered());
    frame.render_widget(buttons, row[0]);

    let progress = Gauge::default()
        .block(Block::bordered().title(" progress "))
        .gauge_style(Style::default().add_modifier(Modifier::REVERSED))
        .ratio(app.progress)
        .label(time_text(&transport));
    frame.render_widget(progress, row[1]);

    let volume = Gauge::default()
        .block(Block::bordered().title(" volume "))
        .ratio(f64::from(transport.volume.clamp(0.0, 1.0)))
        .label(format!("{}%", percent(transport.volume)));
    frame.render_widget(volume, chunks[3]);

    // Metadata table
    let rows: Vec<Row> = app
        .metadata
        .iter()
        .map(|r| Row::new(vec![r.name.clone(), r.value.to_string()]))
        .collect();
    let table = Table::new(rows, [Constraint::Percentage(35), Constraint::Percentage(65)])
        .header(Row::new(vec!["Name", "Value"]).bold())
        .block(Block::default().borders(Borders::ALL).title(" metadata "));
    frame.render_widget(table, chunks[4]);

    let footer = Paragraph::new(controls_text(volume_step))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[5]);
}
