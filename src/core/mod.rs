//! Core reel model – digits, easing curves, tweens and the reel itself.
//!
//! Nothing in this module depends on any TUI or rendering crate.
//! Time is always passed in explicitly; nothing here reads the clock.

pub mod digit;
pub mod easing;
pub mod reel;
pub mod tween;
