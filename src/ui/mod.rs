//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* reel model and turns it into cells on the
//! terminal.  Nothing here advances time or mutates the reel.

pub mod glyphs;
pub mod layout;
pub mod popup;
pub mod reel_widget;
pub mod stage;
pub mod theme;
