//! # Tempo Curves
//!
//! A tempo curve answers "how fast is the music right now", in beats per
//! minute, at a point addressed two ways at once: by elapsed seconds and by
//! elapsed beats since the gesture began. Curves are total over both axes:
//! positions before the gesture start or past a curve's nominal end clamp to
//! the boundary value rather than failing.
//!
//! Any `Fn(f64, f64) -> f64` closure is a curve, so pieces built through the
//! library API can supply arbitrary shapes:
//!
//! ```rust
//! use tactus::tempo::TempoCurve;
//!
//! let accelerating = |_secs: f64, beats: f64| 60.0 + beats;
//! assert_eq!(accelerating.bpm(0.0, 8.0), 68.0);
//! ```

use crate::error::TactusError;

/// Beats per minute at a point in a gesture.
pub trait TempoCurve {
    fn bpm(&self, seconds: f64, beats: f64) -> f64;
}

impl<F> TempoCurve for F
where
    F: Fn(f64, f64) -> f64,
{
    fn bpm(&self, seconds: f64, beats: f64) -> f64 {
        self(seconds, beats)
    }
}

/// The same tempo at every point.
#[derive(Debug, Clone, Copy)]
pub struct Fixed {
    bpm: f64,
}

impl Fixed {
    pub fn new(bpm: f64) -> Self {
        Self { bpm }
    }
}

impl TempoCurve for Fixed {
    fn bpm(&self, _seconds: f64, _beats: f64) -> f64 {
        self.bpm
    }
}

/// Linear tempo change over a number of seconds, clamped at both ends.
#[derive(Debug, Clone, Copy)]
pub struct RampSeconds {
    from: f64,
    to: f64,
    over: f64,
}

impl RampSeconds {
    pub fn new(from: f64, to: f64, over: f64) -> Self {
        Self { from, to, over }
    }
}

impl TempoCurve for RampSeconds {
    fn bpm(&self, seconds: f64, _beats: f64) -> f64 {
        if seconds < 0.0 {
            return self.from;
        }
        if seconds > self.over {
            return self.to;
        }
        let frac = seconds / self.over;
        self.from * (1.0 - frac) + self.to * frac
    }
}

/// Linear tempo change over a number of beats, clamped at both ends.
#[derive(Debug, Clone, Copy)]
pub struct RampBeats {
    from: f64,
    to: f64,
    over: f64,
}

impl RampBeats {
    pub fn new(from: f64, to: f64, over: f64) -> Self {
        Self { from, to, over }
    }
}

impl TempoCurve for RampBeats {
    fn bpm(&self, _seconds: f64, beats: f64) -> f64 {
        if beats < 0.0 {
            return self.from;
        }
        if beats > self.over {
            return self.to;
        }
        let frac = beats / self.over;
        self.from * (1.0 - frac) + self.to * frac
    }
}

/// Tempo swinging sinusoidally between a low and a high BPM, one full cycle
/// every 2π seconds.
#[derive(Debug, Clone, Copy)]
pub struct Sine {
    low: f64,
    high: f64,
}

impl Sine {
    pub fn new(low: f64, high: f64) -> Result<Self, TactusError> {
        if low >= high {
            return Err(TactusError::SineBounds { low, high });
        }
        Ok(Self { low, high })
    }
}

impl TempoCurve for Sine {
    fn bpm(&self, seconds: f64, _beats: f64) -> f64 {
        self.low + (self.high - self.low) * (1.0 + seconds.sin()) / 2.0
    }
}
