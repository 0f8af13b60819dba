//! Timing curves for reel motion.
//!
//! The default curve is a symmetric cubic-bezier that starts slowly, rushes
//! through the middle and settles gently, which reads as a mechanical
//! wheel clicking into place.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// A CSS-style `cubic-bezier(x1, y1, x2, y2)` curve anchored at (0,0)/(1,1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl CubicBezier {
    /// Mechanical reel ease: `cubic-bezier(0.65, 0, 0.35, 1)`.
    pub const MECHANICAL: CubicBezier = CubicBezier {
        x1: 0.65,
        y1: 0.0,
        x2: 0.35,
        y2: 1.0,
    };

    /// Build a curve.  All points must be finite, and the x coordinates must
    /// lie in `0..=1` so that the curve stays a function of time.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self, ConfigError> {
        if ![x1, y1, x2, y2].iter().all(|p| p.is_finite()) {
            return Err(ConfigError::InvalidEasing(format!("{x1}, {y1}, {x2}, {y2}")));
        }
        if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
            return Err(ConfigError::BezierOutOfRange { x1, x2 });
        }
        Ok(Self { x1, y1, x2, y2 })
    }

    pub fn control_points(&self) -> [f64; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    /// Map linear progress `t` to eased progress.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        let s = self.solve_x(t);
        bezier_value(s, self.y1, self.y2)
    }

    /// Find the curve parameter whose x equals `t`.
    fn solve_x(&self, t: f64) -> f64 {
        // Newton-Raphson converges in a handful of steps for sane curves.
        let mut guess = t;
        for _ in 0..8 {
            let x = bezier_value(guess, self.x1, self.x2) - t;
            if x.abs() < 1e-7 && (0.0..=1.0).contains(&guess) {
                return guess;
            }
            let dx = bezier_derivative(guess, self.x1, self.x2);
            if dx.abs() < 1e-6 {
                break;
            }
            guess -= x / dx;
        }

        // Flat tangents (e.g. x1 = 1) stall Newton; bisect instead.
        let (mut lo, mut hi) = (0.0, 1.0);
        let mut mid = t;
        for _ in 0..50 {
            mid = (lo + hi) / 2.0;
            let x = bezier_value(mid, self.x1, self.x2);
            if (x - t).abs() < 1e-7 {
                break;
            }
            if x < t {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        mid
    }
}

impl Default for CubicBezier {
    fn default() -> Self {
        Self::MECHANICAL
    }
}

fn bezier_value(s: f64, p1: f64, p2: f64) -> f64 {
    let ms = 1.0 - s;
    3.0 * ms * ms * s * p1 + 3.0 * ms * s * s * p2 + s * s * s
}

fn bezier_derivative(s: f64, p1: f64, p2: f64) -> f64 {
    let ms = 1.0 - s;
    3.0 * ms * ms * p1 + 6.0 * ms * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

// ───────────────────────────────────────── easing ────────────

/// The timing curves the reel can be configured with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    CubicBezier(CubicBezier),
}

impl Easing {
    pub const MECHANICAL: Easing = Easing::CubicBezier(CubicBezier::MECHANICAL);

    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Easing::Linear => t.clamp(0.0, 1.0),
            Easing::CubicBezier(curve) => curve.apply(t),
        }
    }

    /// Short label for the settings popup and the status bar.
    pub fn label(&self) -> String {
        match self {
            Easing::Linear => "linear".into(),
            Easing::CubicBezier(c) if *c == CubicBezier::MECHANICAL => "mechanical".into(),
            Easing::CubicBezier(_) => "custom".into(),
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Self::MECHANICAL
    }
}

impl FromStr for Easing {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_matches('"');
        match trimmed.to_lowercase().as_str() {
            "linear" => return Ok(Easing::Linear),
            "mechanical" => return Ok(Easing::MECHANICAL),
            _ => {}
        }

        let inner = trimmed
            .strip_prefix("cubic-bezier(")
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(trimmed);
        let points: Vec<f64> = inner
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|_| ConfigError::InvalidEasing(s.to_string()))?;

        match points.as_slice() {
            &[x1, y1, x2, y2] => Ok(Easing::CubicBezier(CubicBezier::new(x1, y1, x2, y2)?)),
            _ => Err(ConfigError::InvalidEasing(s.to_string())),
        }
    }
}

/// Config-file form; parses back with [`FromStr`].
impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => write!(f, "linear"),
            Easing::CubicBezier(c) if *c == CubicBezier::MECHANICAL => write!(f, "mechanical"),
            Easing::CubicBezier(c) => {
                let [x1, y1, x2, y2] = c.control_points();
                write!(f, "{x1}, {y1}, {x2}, {y2}")
            }
        }
    }
}
