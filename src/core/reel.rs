//! The digit reel: a two-slot strip (current digit above, next digit below)
//! seen through a window one digit tall.
//!
//! The parent owns the `scrolling` flag and pushes it in with
//! [`DigitReel::set_scrolling`]; the frame loop advances playback with
//! [`DigitReel::tick`].  When a forward scroll runs to its end while the flag
//! is still raised, the completion callback fires exactly once.
//!
//! Offsets are fractions of the whole strip's height: `0.0` frames the upper
//! digit, [`SCROLLED_OFFSET`] frames the lower one.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use super::digit::Digit;
use super::easing::Easing;
use super::tween::Tween;

/// Resting offset at the top of the strip.
pub const REST_OFFSET: f64 = 0.0;
/// Offset at which the lower digit fills the window.
pub const SCROLLED_OFFSET: f64 = -0.5;
/// Default scroll duration.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(1500);

/// What happens to the strip when scrolling is switched off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnMode {
    /// Jump straight back to the upper digit.
    #[default]
    Snap,
    /// Roll back to the upper digit with the same duration and easing.
    Ease,
}

impl ReturnMode {
    pub fn label(self) -> &'static str {
        match self {
            ReturnMode::Snap => "snap",
            ReturnMode::Ease => "ease",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "snap" => Some(ReturnMode::Snap),
            "ease" => Some(ReturnMode::Ease),
            _ => None,
        }
    }
}

/// Timing of a reel's movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub duration: Duration,
    pub easing: Easing,
    pub return_mode: ReturnMode,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            easing: Easing::MECHANICAL,
            return_mode: ReturnMode::Snap,
        }
    }
}

/// Direction of the tween currently playing, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Playback {
    Forward(Tween),
    Returning(Tween),
}

pub struct DigitReel {
    upper: Digit,
    lower: Digit,
    scrolling: bool,
    playback: Option<Playback>,
    offset: f64,
    motion: Motion,
    on_complete: Box<dyn FnMut() + Send>,
}

impl DigitReel {
    pub fn new(upper: Digit, lower: Digit, on_complete: impl FnMut() + Send + 'static) -> Self {
        Self {
            upper,
            lower,
            scrolling: false,
            playback: None,
            offset: REST_OFFSET,
            motion: Motion::default(),
            on_complete: Box::new(on_complete),
        }
    }

    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.motion = motion;
        self
    }

    /// Replace the timing.  A tween already in flight keeps its own timing;
    /// the change applies from the next transition.
    pub fn set_motion(&mut self, motion: Motion) {
        self.motion = motion;
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    pub fn upper(&self) -> Digit {
        self.upper
    }

    pub fn lower(&self) -> Digit {
        self.lower
    }

    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    /// `true` while any tween (forward or return) is still playing.
    pub fn is_animating(&self) -> bool {
        self.playback.is_some()
    }

    /// Offset as of the last [`tick`](Self::tick) or prop change.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// The digit occupying most of the window.
    pub fn visible_digit(&self) -> Digit {
        if self.offset <= SCROLLED_OFFSET / 2.0 {
            self.lower
        } else {
            self.upper
        }
    }

    /// Push a new value of the `scrolling` prop.  Unchanged values are ignored.
    pub fn set_scrolling(&mut self, scrolling: bool, now: Instant) {
        if scrolling == self.scrolling {
            return;
        }
        self.scrolling = scrolling;

        if scrolling {
            // Restart from wherever the strip currently sits.
            let from = self.current_offset(now);
            debug!(from, upper = %self.upper, lower = %self.lower, "reel scroll started");
            self.offset = from;
            self.playback = Some(Playback::Forward(self.tween(from, SCROLLED_OFFSET, now)));
            return;
        }

        // Dropping a forward tween here is what cancels its completion.
        let from = self.current_offset(now);
        match self.motion.return_mode {
            ReturnMode::Snap => {
                debug!(from, "reel scroll cancelled; snapping back");
                self.playback = None;
                self.offset = REST_OFFSET;
            }
            ReturnMode::Ease => {
                debug!(from, "reel scroll cancelled; rolling back");
                self.offset = from;
                self.playback = if from == REST_OFFSET {
                    None
                } else {
                    Some(Playback::Returning(self.tween(from, REST_OFFSET, now)))
                };
            }
        }
    }

    /// Advance playback to `now`.  Returns `true` when this call fired the
    /// completion callback.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(playback) = self.playback else {
            return false;
        };

        let tween = match playback {
            Playback::Forward(t) | Playback::Returning(t) => t,
        };
        self.offset = tween.sample(now);
        trace!(offset = self.offset, "reel tick");

        if !tween.is_finished(now) {
            return false;
        }
        self.playback = None;

        match playback {
            Playback::Forward(_) if self.scrolling => {
                debug!(digit = %self.lower, "reel scroll complete");
                (self.on_complete)();
                true
            }
            _ => false,
        }
    }

    fn current_offset(&self, now: Instant) -> f64 {
        match self.playback {
            Some(Playback::Forward(t)) | Some(Playback::Returning(t)) => t.sample(now),
            None => self.offset,
        }
    }

    fn tween(&self, from: f64, to: f64, now: Instant) -> Tween {
        Tween::new(from, to, self.motion.duration, self.motion.easing, now)
    }
}

impl fmt::Debug for DigitReel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigitReel")
            .field("upper", &self.upper)
            .field("lower", &self.lower)
            .field("scrolling", &self.scrolling)
            .field("playback", &self.playback)
            .field("offset", &self.offset)
            .field("motion", &self.motion)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn digit(n: u8) -> Digit {
        Digit::new(n).unwrap()
    }

    /// A 5→6 reel plus a counter of completion calls.
    fn reel() -> (DigitReel, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let reel = DigitReel::new(digit(5), digit(6), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (reel, calls)
    }

    #[test]
    fn mounts_at_rest_showing_upper_digit() {
        let (mut reel, calls) = reel();
        let t0 = Instant::now();
        reel.set_scrolling(false, t0);
        assert!(!reel.tick(t0 + ms(2000)));
        assert_eq!(reel.offset(), 0.0);
        assert_eq!(reel.visible_digit(), digit(5));
        assert!(!reel.is_animating());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn scroll_reaches_lower_digit_and_fires_once() {
        let (mut reel, calls) = reel();
        let t0 = Instant::now();
        reel.set_scrolling(true, t0);

        assert!(!reel.tick(t0 + ms(750)));
        assert!((reel.offset() + 0.25).abs() < 1e-3);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(reel.tick(t0 + ms(1500)));
        assert_eq!(reel.offset(), SCROLLED_OFFSET);
        assert_eq!(reel.visible_digit(), digit(6));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert!(!reel.tick(t0 + ms(3000)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn late_tick_still_completes_once() {
        let (mut reel, calls) = reel();
        let t0 = Instant::now();
        reel.set_scrolling(true, t0);
        assert!(reel.tick(t0 + ms(10_000)));
        assert_eq!(reel.offset(), SCROLLED_OFFSET);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn cancel_before_completion_never_fires() {
        let (mut reel, calls) = reel();
        let t0 = Instant::now();
        reel.set_scrolling(true, t0);
        reel.tick(t0 + ms(400));
        reel.set_scrolling(false, t0 + ms(500));

        assert_eq!(reel.offset(), 0.0);
        assert!(!reel.tick(t0 + ms(1500)));
        assert!(!reel.tick(t0 + ms(5000)));
        assert_eq!(reel.offset(), 0.0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn immediate_cancel_never_fires() {
        let (mut reel, calls) = reel();
        let t0 = Instant::now();
        reel.set_scrolling(true, t0);
        reel.set_scrolling(false, t0);
        reel.tick(t0 + ms(1500));
        assert_eq!(reel.offset(), 0.0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unchanged_props_are_idempotent() {
        let (mut reel, calls) = reel();
        let t0 = Instant::now();
        reel.set_scrolling(true, t0);
        reel.set_scrolling(true, t0 + ms(1000));
        // The repeated `true` must not restart the clock.
        assert!(reel.tick(t0 + ms(1500)));

        reel.set_scrolling(true, t0 + ms(2000));
        assert!(!reel.tick(t0 + ms(4000)));
        assert_eq!(reel.offset(), SCROLLED_OFFSET);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn switching_off_after_completion_resets_to_rest() {
        let (mut reel, calls) = reel();
        let t0 = Instant::now();
        reel.set_scrolling(true, t0);
        reel.tick(t0 + ms(1500));
        reel.set_scrolling(false, t0 + ms(1600));
        assert_eq!(reel.offset(), 0.0);
        assert_eq!(reel.visible_digit(), digit(5));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn each_completed_cycle_fires_once() {
        let (mut reel, calls) = reel();
        let t0 = Instant::now();
        for cycle in 0..3u64 {
            let start = t0 + ms(cycle * 2000);
            reel.set_scrolling(true, start);
            reel.tick(start + ms(1500));
            reel.set_scrolling(false, start + ms(1600));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn ease_return_rolls_back_without_firing() {
        let (reel, calls) = reel();
        let mut reel = reel.with_motion(Motion {
            return_mode: ReturnMode::Ease,
            easing: Easing::Linear,
            ..Motion::default()
        });
        let t0 = Instant::now();
        reel.set_scrolling(true, t0);
        reel.tick(t0 + ms(750));
        reel.set_scrolling(false, t0 + ms(750));

        // Starts from where the strip was, not from rest.
        assert!((reel.offset() + 0.25).abs() < 1e-9);
        assert!(reel.is_animating());

        assert!(!reel.tick(t0 + ms(2250)));
        assert_eq!(reel.offset(), 0.0);
        assert!(!reel.is_animating());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn rapid_toggle_restarts_from_interpolated_position() {
        let (reel, calls) = reel();
        let mut reel = reel.with_motion(Motion {
            return_mode: ReturnMode::Ease,
            easing: Easing::Linear,
            ..Motion::default()
        });
        let t0 = Instant::now();
        reel.set_scrolling(true, t0);
        reel.set_scrolling(false, t0 + ms(750)); // at -0.25, heading home
        reel.set_scrolling(true, t0 + ms(1500)); // back at -0.125
        assert!((reel.offset() + 0.125).abs() < 1e-9);

        // The restarted scroll takes the full duration from its own start.
        assert!(!reel.tick(t0 + ms(2999)));
        assert!(reel.tick(t0 + ms(3000)));
        assert_eq!(reel.offset(), SCROLLED_OFFSET);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn zero_duration_completes_on_first_tick() {
        let (reel, calls) = reel();
        let mut reel = reel.with_motion(Motion {
            duration: Duration::ZERO,
            ..Motion::default()
        });
        let t0 = Instant::now();
        reel.set_scrolling(true, t0);
        assert!(reel.tick(t0));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn return_mode_parses_labels() {
        assert_eq!(ReturnMode::parse("Ease"), Some(ReturnMode::Ease));
        assert_eq!(ReturnMode::parse("snap"), Some(ReturnMode::Snap));
        assert_eq!(ReturnMode::parse("bounce"), None);
        assert_eq!(ReturnMode::parse(ReturnMode::Ease.label()), Some(ReturnMode::Ease));
    }
}
