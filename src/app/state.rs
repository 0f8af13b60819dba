//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::{digit::Digit, reel::DigitReel};

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Stage,
    SettingsMenu,
}

/// Top-level application state.
pub struct AppState {
    /// The reel being shown.  `scrolling` below is its prop.
    pub reel: DigitReel,
    /// Whether the reel is told to scroll.  Owned here, pushed into the reel.
    pub scrolling: bool,
    /// Static digits drawn to the left of the reel.
    pub prefix: Vec<Digit>,
    /// User configuration (timing, keybindings).
    pub config: AppConfig,
    /// Write config changes back to disk.
    pub persist_config: bool,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    /// Currently highlighted item in the settings menu.
    pub settings_selected: usize,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Number of scrolls that ran to completion.
    pub completions: u64,
    /// Quit as soon as the first scroll completes.
    pub exit_on_complete: bool,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// Last known terminal size, for mouse hit-testing.
    pub terminal_area: Rect,
}

impl AppState {
    pub fn new(reel: DigitReel, prefix: Vec<Digit>, config: AppConfig) -> Self {
        Self {
            reel,
            scrolling: false,
            prefix,
            config,
            persist_config: true,
            active_view: ActiveView::default(),
            settings_selected: 0,
            status_message: None,
            completions: 0,
            exit_on_complete: false,
            should_quit: false,
            terminal_area: Rect::default(),
        }
    }
}
