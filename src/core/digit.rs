//! A single decimal digit shown on a reel slot.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Value in `0..=9`.  Construction is checked so rendering never has to
/// handle an out-of-range glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digit(u8);

impl Digit {
    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// The digit that follows this one on a wrapping odometer wheel (9 → 0).
    pub fn successor(self) -> Self {
        Self((self.0 + 1) % 10)
    }

    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

impl TryFrom<char> for Digit {
    type Error = ConfigError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        c.to_digit(10)
            .and_then(|d| Digit::new(d as u8))
            .ok_or_else(|| ConfigError::InvalidDigit(c.to_string()))
    }
}

impl FromStr for Digit {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Digit::try_from(c),
            _ => Err(ConfigError::InvalidDigit(s.to_string())),
        }
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
