//! Input handling — maps key/mouse events and reel notifications to state
//! mutations.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use tracing::info;

use crate::config::Action;
use crate::ui::layout::AppLayout;
use crate::ui::stage::StageWidget;

use super::event::AppEvent;
use super::settings::SETTINGS_ITEMS;
use super::state::{ActiveView, AppState};

/// Route one event from the loop's channel.
///
/// Every event advances playback first.  The reader only emits `Tick` when a
/// frame passes without input, so a stream of mouse moves would otherwise
/// hold the reel still.
pub fn handle_event(state: &mut AppState, event: AppEvent, now: Instant) {
    if state.reel.is_animating() {
        state.reel.tick(now);
    }

    match event {
        AppEvent::Key(k) => handle_key(state, k, now),
        AppEvent::Mouse(m) => handle_mouse(state, m, now),
        AppEvent::Resize(_, _) | AppEvent::Tick => {}
        AppEvent::ReelSettled => handle_reel_settled(state),
    }
}

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Stage => handle_stage_key(state, key, now),
        ActiveView::SettingsMenu => handle_settings_key(state, key),
    }
}

// ── Stage view (configurable bindings) ──────────────────────────

fn handle_stage_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    let Some(action) = state.config.match_key(key) else {
        return;
    };

    match action {
        Action::ToggleScroll => set_scrolling(state, !state.scrolling, now),
        Action::Cancel => set_scrolling(state, false, now),
        Action::OpenSettings => {
            state.active_view = ActiveView::SettingsMenu;
            state.settings_selected = 0;
        }
        Action::Quit => state.should_quit = true,
    }
}

fn set_scrolling(state: &mut AppState, scrolling: bool, now: Instant) {
    if state.scrolling == scrolling {
        return;
    }
    state.scrolling = scrolling;
    state.reel.set_scrolling(scrolling, now);
    state.status_message = Some(if scrolling {
        format!("Rolling {} → {}…", state.reel.upper(), state.reel.lower())
    } else {
        format!("Back on {}", state.reel.upper())
    });
}

// ── Settings popup (hardcoded navigation) ───────────────────────

fn handle_settings_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            state.active_view = ActiveView::Stage;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.settings_selected = state.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.settings_selected < SETTINGS_ITEMS.len() - 1 {
                state.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
            if let Some(item) = SETTINGS_ITEMS.get(state.settings_selected) {
                item.activate(state);
            }
        }
        _ => {}
    }
}

// ── Mouse ───────────────────────────────────────────────────────

/// A left click on the reel toggles scrolling.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent, now: Instant) {
    if state.active_view != ActiveView::Stage {
        return;
    }
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }

    let layout = AppLayout::from_area(state.terminal_area);
    let stage = StageWidget {
        prefix: &state.prefix,
        reel: &state.reel,
    };
    let reel_area = stage.reel_area(layout.stage_inner());
    if reel_area.contains((mouse.column, mouse.row).into()) {
        set_scrolling(state, !state.scrolling, now);
    }
}

// ── Reel notifications ──────────────────────────────────────────

/// Called when the reel's completion callback has fired.
pub fn handle_reel_settled(state: &mut AppState) {
    state.completions += 1;
    let digit = state.reel.visible_digit();
    info!(completions = state.completions, %digit, "reel settled");
    state.status_message = Some(format!("Settled on {digit}"));
    if state.exit_on_complete {
        state.should_quit = true;
    }
}
