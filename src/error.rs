//! Error types for user-supplied values (CLI flags and the config file).
//!
//! The reel itself never fails; only the knobs around it can be malformed.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("`{0}` is not a single decimal digit (expected 0-9)")]
    InvalidDigit(String),

    #[error("prefix `{0}` must be at most 8 decimal digits")]
    InvalidPrefix(String),

    #[error("`{0}` is not an easing curve (expected `linear`, `mechanical` or `x1,y1,x2,y2`)")]
    InvalidEasing(String),

    #[error("cubic-bezier x control points must lie within 0..=1 (got x1={x1}, x2={x2})")]
    BezierOutOfRange { x1: f64, x2: f64 },

    #[error("`{0}` is not a valid duration in milliseconds")]
    InvalidDuration(String),

    #[error("frame rate must be between 1 and 240 (got `{0}`)")]
    InvalidFps(String),

    #[error("unknown return mode `{0}` (expected `snap` or `ease`)")]
    InvalidReturnMode(String),
}
