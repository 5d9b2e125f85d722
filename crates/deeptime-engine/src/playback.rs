//! Automatic advance of the selection over time.

use serde::Serialize;

use crate::minutes::Minutes;

pub const MIN_SPEED: f64 = 0.25;
pub const MAX_SPEED: f64 = 64.0;
pub const DEFAULT_SPEED: f64 = 1.0;

/// Playback state for the selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlaybackState {
    is_playing: bool,
    speed: f64,
    /// Fractional minutes not yet applied.
    #[serde(skip)]
    carry: f64,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED)
    }
}

impl PlaybackState {
    /// Create a stopped playback state with the given speed.
    pub fn new(speed: f64) -> Self {
        Self {
            is_playing: false,
            speed: clamp_speed(speed),
            carry: 0.0,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_playing(&mut self, playing: bool) {
        if playing != self.is_playing {
            self.carry = 0.0;
        }
        self.is_playing = playing;
    }

    pub fn toggle(&mut self) {
        self.set_playing(!self.is_playing);
    }

    /// Set the speed multiplier, clamped to `[MIN_SPEED, MAX_SPEED]`.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = clamp_speed(speed);
    }

    /// Double the speed, saturating at `MAX_SPEED`.
    pub fn faster(&mut self) {
        self.set_speed(self.speed * 2.0);
    }

    /// Halve the speed, saturating at `MIN_SPEED`.
    pub fn slower(&mut self) {
        self.set_speed(self.speed / 2.0);
    }

    /// Whole minutes to advance for `elapsed` seconds at `step` minutes per second.
    ///
    /// The fractional remainder carries into the next call, so a run of small
    /// ticks sums to the same advance as one large tick. Returns 0 when stopped.
    pub fn advance(&mut self, elapsed: f64, step: Minutes) -> Minutes {
        if !self.is_playing || !elapsed.is_finite() || elapsed <= 0.0 {
            return 0;
        }
        let total = self.speed * elapsed * step as f64 + self.carry;
        let whole = total.trunc();
        self.carry = total - whole;
        whole as Minutes
    }
}

fn clamp_speed(speed: f64) -> f64 {
    if speed.is_finite() {
        speed.clamp(MIN_SPEED, MAX_SPEED)
    } else {
        DEFAULT_SPEED
    }
}
