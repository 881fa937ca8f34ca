use thiserror::Error;

use crate::types::Rgb;

/// Configuration problems surfaced at session start. Nothing else in the
/// pipeline is fatal: noise intervals and unknown patterns degrade output
/// quality but decoding keeps running.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value}s")]
    NonPositiveDuration { name: &'static str, value: f32 },

    #[error("ditSeconds ({dit}s) must be shorter than dahSeconds ({dah}s)")]
    MarksNotIncreasing { dit: f32, dah: f32 },

    #[error("letterGapSeconds ({letter}s) must be shorter than wordGapSeconds ({word}s)")]
    GapsNotIncreasing { letter: f32, word: f32 },

    #[error("letterGapSeconds ({letter}s) must not be shorter than ditSeconds ({dit}s)")]
    LetterGapBelowDit { letter: f32, dit: f32 },

    #[error("threshold {0} is outside [0, 1]")]
    ThresholdOutOfRange(f32),

    #[error("tolerance must be positive, got {0}")]
    NonPositiveTolerance(f32),

    #[error("on and off reference colors are both {0:?}")]
    DegenerateReferenceColors(Rgb),
}
