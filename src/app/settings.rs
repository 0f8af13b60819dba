//! Settings menu model (data only).
//!
//! Keeping these definitions outside the input handler lets both the handler
//! and the popup renderer consume the same source of truth.

use std::time::Duration;

use tracing::warn;

use super::state::AppState;
use crate::core::easing::Easing;
use crate::core::reel::ReturnMode;

/// A single item in the settings menu.
pub enum SettingsItem {
    /// Boolean toggle — reads/writes via accessors on `AppState`.
    Toggle {
        label: &'static str,
        get: fn(&AppState) -> bool,
        set: fn(&mut AppState, bool),
    },
    /// Cycles through a finite set of values.
    Cycle {
        label: &'static str,
        value: fn(&AppState) -> String,
        cycle: fn(&mut AppState),
    },
}

impl SettingsItem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Toggle { label, .. } | Self::Cycle { label, .. } => label,
        }
    }

    /// Current value as shown in the popup.
    pub fn value(&self, state: &AppState) -> String {
        match self {
            Self::Toggle { get, .. } => {
                let label = if get(state) { "ON" } else { "OFF" };
                label.to_string()
            }
            Self::Cycle { value, .. } => value(state),
        }
    }

    /// Advance the item: flip a toggle or step a cycle.
    pub fn activate(&self, state: &mut AppState) {
        match self {
            Self::Toggle { get, set, .. } => {
                let current = get(state);
                set(state, !current);
            }
            Self::Cycle { cycle, .. } => cycle(state),
        }
    }
}

const DURATIONS_MS: &[u64] = &[750, 1000, 1500, 2000, 3000];
const EASINGS: &[Easing] = &[Easing::MECHANICAL, Easing::Linear];

/// All items shown in the settings popup, in display order.
pub static SETTINGS_ITEMS: &[SettingsItem] = &[
    SettingsItem::Cycle {
        label: "Duration",
        value: |s| format!("{}ms", s.config.duration.as_millis()),
        cycle: |s| {
            s.config.duration = next_duration(s.config.duration);
            apply_motion(s);
            s.status_message = Some(format!("Duration: {}ms", s.config.duration.as_millis()));
        },
    },
    SettingsItem::Cycle {
        label: "Easing",
        value: |s| s.config.easing.label(),
        cycle: |s| {
            // A custom curve from the config file steps to the first preset.
            let next = match EASINGS.iter().position(|e| *e == s.config.easing) {
                Some(idx) => EASINGS[(idx + 1) % EASINGS.len()],
                None => EASINGS[0],
            };
            s.config.easing = next;
            apply_motion(s);
            s.status_message = Some(format!("Easing: {}", next.label()));
        },
    },
    SettingsItem::Toggle {
        label: "Ease Back",
        get: |s| s.config.return_mode == ReturnMode::Ease,
        set: |s, v| {
            s.config.return_mode = if v { ReturnMode::Ease } else { ReturnMode::Snap };
            apply_motion(s);
        },
    },
];

/// The smallest preset longer than `current`, wrapping to the shortest.
/// Custom durations from the config file or CLI land on the next preset up.
fn next_duration(current: Duration) -> Duration {
    let current = current.as_millis();
    let next = DURATIONS_MS
        .iter()
        .copied()
        .find(|&d| u128::from(d) > current)
        .unwrap_or(DURATIONS_MS[0]);
    Duration::from_millis(next)
}

/// Push the configured timing into the reel and persist it.
fn apply_motion(state: &mut AppState) {
    state.reel.set_motion(state.config.motion());
    if state.persist_config {
        if let Err(err) = state.config.save() {
            warn!(%err, "could not save config");
        }
    }
}
