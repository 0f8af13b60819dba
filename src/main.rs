//! A mechanical odometer-style digit reel for the terminal.
//!
//! Run the binary, press space, and the reel rolls from one digit to the
//! next.  The number of completed rolls is printed to stdout on exit.

mod app;
mod config;
mod core;
mod error;
mod ui;

use std::io::{self, stderr};
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Terminal,
};
use tracing::info;

use crate::app::{
    event::{frame_duration, spawn_event_reader, AppEvent},
    handler,
    state::{ActiveView, AppState},
};
use crate::config::AppConfig;
use crate::core::{digit::Digit, easing::Easing, reel::DigitReel, reel::ReturnMode};
use crate::error::ConfigError;
use crate::ui::{layout::AppLayout, popup::SettingsPopup, stage::StageWidget, theme::Theme};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Odometer-style digit reel")]
struct Cli {
    /// Digit shown before the roll.
    #[arg(long, default_value = "5")]
    from: Digit,

    /// Digit revealed by the roll (defaults to the one after `--from`).
    #[arg(long)]
    to: Option<Digit>,

    /// Static digits drawn to the left of the reel.
    #[arg(long, default_value = "202", value_parser = parse_prefix)]
    prefix: ::std::vec::Vec<Digit>,

    /// Roll duration in milliseconds (overrides the config file).
    #[arg(long, value_parser = config::parse_duration_ms)]
    duration_ms: Option<std::time::Duration>,

    /// Timing curve: `mechanical`, `linear`, or `x1,y1,x2,y2`.
    #[arg(long)]
    easing: Option<Easing>,

    /// Roll back smoothly when cancelled instead of snapping.
    #[arg(long)]
    ease_back: bool,

    /// Start rolling as soon as the UI is up.
    #[arg(long)]
    autostart: bool,

    /// Quit after the first completed roll.
    #[arg(long)]
    exit_on_complete: bool,

    /// Frame ticks per second.
    #[arg(long, value_parser = config::parse_fps)]
    fps: Option<u16>,
}

/// The prefix is one value (the fully qualified `Vec` above stops clap from
/// treating it as repeatable).
fn parse_prefix(s: &str) -> Result<Vec<Digit>, ConfigError> {
    if s.chars().count() > 8 {
        return Err(ConfigError::InvalidPrefix(s.to_string()));
    }
    s.chars()
        .map(Digit::try_from)
        .collect::<Result<_, _>>()
        .map_err(|_| ConfigError::InvalidPrefix(s.to_string()))
}

/// Fold CLI overrides into the loaded config.  Overrides last for this
/// session only; they are never written back.
fn apply_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(duration) = cli.duration_ms {
        config.duration = duration;
    }
    if let Some(easing) = cli.easing {
        config.easing = easing;
    }
    if cli.ease_back {
        config.return_mode = ReturnMode::Ease;
    }
    if let Some(fps) = cli.fps {
        config.fps = fps;
    }
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    let mut user_config = AppConfig::load();
    let has_overrides =
        cli.duration_ms.is_some() || cli.easing.is_some() || cli.ease_back || cli.fps.is_some();
    apply_overrides(&mut user_config, &cli);

    // ── async channel ─────────────────────────────────────────
    let (tx, mut events) = tokio::sync::mpsc::unbounded_channel::<AppEvent>();

    // ── reel + state ──────────────────────────────────────────
    let settled_tx = tx.clone();
    let reel = DigitReel::new(cli.from, cli.to.unwrap_or(cli.from.successor()), move || {
        let _ = settled_tx.send(AppEvent::ReelSettled);
    })
    .with_motion(user_config.motion());

    let fps = user_config.fps;
    let mut state = AppState::new(reel, cli.prefix.clone(), user_config);
    state.exit_on_complete = cli.exit_on_complete;
    // Saving from the settings popup would bake CLI overrides into the file.
    state.persist_config = !has_overrides;
    info!(
        from = %state.reel.upper(),
        to = %state.reel.lower(),
        duration_ms = state.config.duration.as_millis() as u64,
        easing = %state.config.easing,
        fps,
        "starting"
    );

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    spawn_event_reader(tx, frame_duration(fps));

    if cli.autostart {
        state.scrolling = true;
        state.reel.set_scrolling(true, Instant::now());
    }

    // ── event loop ────────────────────────────────────────────
    loop {
        terminal.draw(|frame| {
            state.terminal_area = frame.area();
            let layout = AppLayout::from_area(frame.area());

            let motion = state.reel.motion();
            let stage_block = Block::default()
                .title(" digit-reel ")
                .title_style(Theme::title_style())
                .title(
                    Line::from(format!(
                        " {}ms · {} · {} ",
                        motion.duration.as_millis(),
                        motion.easing.label(),
                        motion.return_mode.label(),
                    ))
                    .right_aligned(),
                )
                .borders(Borders::ALL)
                .border_style(Theme::border_style());
            frame.render_widget(stage_block, layout.stage_area);
            frame.render_widget(
                StageWidget {
                    prefix: &state.prefix,
                    reel: &state.reel,
                },
                layout.stage_inner(),
            );

            let hint = state.config.status_bar_hint();
            let status_text = match state.active_view {
                ActiveView::Stage => state.status_message.as_deref().unwrap_or(&hint),
                ActiveView::SettingsMenu => "",
            };
            let status = Paragraph::new(status_text).style(Theme::status_bar_style());
            frame.render_widget(status, layout.status_area);

            if state.active_view == ActiveView::SettingsMenu {
                frame.render_widget(SettingsPopup { state: &state }, frame.area());
            }
        })?;

        let Some(event) = events.recv().await else {
            break;
        };
        let now = Instant::now();
        handler::handle_event(&mut state, event, now);

        // Drain whatever else is queued so a burst of input costs one redraw.
        while let Ok(event) = events.try_recv() {
            handler::handle_event(&mut state, event, now);
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!(completions = state.completions, "exiting");
    println!("completed={}", state.completions);

    Ok(())
}
