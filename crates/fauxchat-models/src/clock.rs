//! Wall-clock time for the status bar and the synthesized message timestamps.
//!
//! The organizer keeps a running [`ClockTime`] seeded from the configured
//! status-bar time and advances it by a small randomised number of minutes per
//! emitted message. The increment source is the [`MinuteJitter`] trait so
//! tests can drive the clock deterministically.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use rand::rngs::ThreadRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

// ---------------------------------------------------------------------------
// ClockTime
// ---------------------------------------------------------------------------

/// A wall-clock "HH:MM" value with minute precision.
///
/// Display output is always zero-padded, and minute arithmetic wraps at the
/// 24h boundary.
///
/// # Examples
///
/// ```
/// use fauxchat_models::ClockTime;
///
/// let mut t: ClockTime = "23:59".parse().unwrap();
/// t.advance(2);
/// assert_eq!(t.to_string(), "00:01");
///
/// // Malformed input is rejected, not clamped
/// assert!("25:99".parse::<ClockTime>().is_err());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Create a clock time from hour and minute components.
    ///
    /// Returns [`ModelError::InvalidClockTime`] when either component is out
    /// of range.
    pub fn from_hm(hours: u32, minutes: u32) -> Result<Self, ModelError> {
        NaiveTime::from_hms_opt(hours, minutes, 0)
            .map(Self)
            .ok_or_else(|| ModelError::InvalidClockTime {
                value: format!("{hours}:{minutes}"),
                reason: "hours must be 0-23 and minutes 0-59".to_string(),
            })
    }

    /// The hour component (0–23).
    pub fn hours(&self) -> u32 {
        self.0.hour()
    }

    /// The minute component (0–59).
    pub fn minutes(&self) -> u32 {
        self.0.minute()
    }

    /// Minutes elapsed since midnight (0–1439).
    pub fn minute_of_day(&self) -> u32 {
        self.0.hour() * 60 + self.0.minute()
    }

    /// Advance the clock by a whole number of minutes, wrapping at midnight.
    pub fn advance(&mut self, minutes: u32) {
        let (wrapped, _) = self
            .0
            .overflowing_add_signed(chrono::Duration::minutes(i64::from(minutes)));
        self.0 = wrapped;
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl FromStr for ClockTime {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ModelError::InvalidClockTime {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let (h, m) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| invalid("expected HH:MM"))?;
        let hours: u32 = h.parse().map_err(|_| invalid("hours are not a number"))?;
        let minutes: u32 = m.parse().map_err(|_| invalid("minutes are not a number"))?;

        Self::from_hm(hours, minutes)
            .map_err(|_| invalid("hours must be 00-23 and minutes 00-59"))
    }
}

impl TryFrom<&str> for ClockTime {
    type Error = ModelError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// ---------------------------------------------------------------------------
// MinuteJitter
// ---------------------------------------------------------------------------

/// Source of the per-message minute increment.
///
/// Implementations return a whole number of minutes in `1..=3`. Production
/// code uses [`RandomJitter`]; tests can pass any `FnMut() -> u32` closure.
pub trait MinuteJitter {
    /// Draw the number of minutes the clock should advance before the next
    /// message.
    fn next_step(&mut self) -> u32;
}

impl<F: FnMut() -> u32> MinuteJitter for F {
    fn next_step(&mut self) -> u32 {
        self()
    }
}

/// [`MinuteJitter`] drawing uniformly from {1, 2, 3}.
pub struct RandomJitter<R: Rng = ThreadRng>(R);

impl RandomJitter<ThreadRng> {
    /// Create a jitter source backed by the thread-local RNG.
    pub fn new() -> Self {
        Self(rand::thread_rng())
    }
}

impl Default for RandomJitter<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomJitter<R> {
    /// Create a jitter source backed by a caller-supplied RNG.
    pub fn with_rng(rng: R) -> Self {
        Self(rng)
    }
}

impl<R: Rng> MinuteJitter for RandomJitter<R> {
    fn next_step(&mut self) -> u32 {
        self.0.gen_range(1..=3)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
