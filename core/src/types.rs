use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::error::ConfigError;

/// RGB color triple as read from the sensor pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

/// One timestamped sensor reading. The capture host pushes these at its own
/// cadence; the core assumes no fixed rate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorSample {
    pub seconds: f32,
    pub color: Rgb,
}

impl ColorSample {
    pub fn new(seconds: f32, color: impl Into<Rgb>) -> Self {
        Self {
            seconds,
            color: color.into(),
        }
    }
}

/// The on/off reference colors the normalizer interpolates between.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReferenceColors {
    pub on: Rgb,
    pub off: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum SignalState {
    Gap = 0,
    Mark = 1,
}

/// A maximal run of one signal state, closed by the transition that ended it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interval {
    pub state: SignalState,
    pub start_seconds: f32,
    pub duration_seconds: f32,
}

impl Interval {
    pub fn new(state: SignalState, start_seconds: f32, duration_seconds: f32) -> Self {
        Self {
            state,
            start_seconds,
            duration_seconds,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum IntervalLabel {
    Dit = 0,
    Dah = 1,
    IntraGap = 2,
    LetterGap = 3,
    WordGap = 4,
    /// Duration outside every tolerance band. Reported, never decoded.
    Noise = 5,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabeledInterval {
    pub interval: Interval,
    pub label: IntervalLabel,
}

/// One element of a Morse character pattern. Order is significant:
/// dit-dah (A) and dah-dit (N) are different characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum Symbol {
    Dit = 0,
    Dah = 1,
}

/// Immutable per-session decoding configuration.
///
/// A session snapshots this at construction; changing thresholds mid-stream
/// requires starting a new session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DecoderConfig {
    pub on_color: Rgb,
    pub off_color: Rgb,
    /// Mark/gap decision threshold in [0, 1]. Under the adaptive strategy
    /// this is only the starting value.
    pub threshold: f32,
    pub adaptive: bool,
    pub dit_seconds: f32,
    pub dah_seconds: f32,
    pub letter_gap_seconds: f32,
    pub word_gap_seconds: f32,
    /// Acceptance-band half-width around each duration reference, as a
    /// fraction of that reference.
    pub tolerance: f32,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            on_color: Rgb::WHITE,
            off_color: Rgb::BLACK,
            threshold: 0.5,
            adaptive: false,
            dit_seconds: 0.1,
            dah_seconds: 0.3,
            letter_gap_seconds: 0.3,
            word_gap_seconds: 0.7,
            tolerance: 0.5,
        }
    }
}

impl DecoderConfig {
    pub fn reference_colors(&self) -> ReferenceColors {
        ReferenceColors {
            on: self.on_color,
            off: self.off_color,
        }
    }

    /// Session-start validation. The intra-gap reference is `dit_seconds`,
    /// so the letter gap may equal it but never undercut it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("ditSeconds", self.dit_seconds),
            ("dahSeconds", self.dah_seconds),
            ("letterGapSeconds", self.letter_gap_seconds),
            ("wordGapSeconds", self.word_gap_seconds),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositiveDuration { name, value });
            }
        }
        if self.dit_seconds >= self.dah_seconds {
            return Err(ConfigError::MarksNotIncreasing {
                dit: self.dit_seconds,
                dah: self.dah_seconds,
            });
        }
        if self.letter_gap_seconds >= self.word_gap_seconds {
            return Err(ConfigError::GapsNotIncreasing {
                letter: self.letter_gap_seconds,
                word: self.word_gap_seconds,
            });
        }
        if self.letter_gap_seconds < self.dit_seconds {
            return Err(ConfigError::LetterGapBelowDit {
                letter: self.letter_gap_seconds,
                dit: self.dit_seconds,
            });
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::ThresholdOutOfRange(self.threshold));
        }
        if !(self.tolerance > 0.0) {
            return Err(ConfigError::NonPositiveTolerance(self.tolerance));
        }
        if self.on_color == self.off_color {
            return Err(ConfigError::DegenerateReferenceColors(self.on_color));
        }
        Ok(())
    }
}
