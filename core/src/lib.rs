// Morse decoding engine for a flashing light observed as a single sampled
// color value over time.

pub mod decode;
pub mod diagnostics;
pub mod encode;
pub mod error;
pub mod patterns;
pub mod sensor;
pub mod session;
pub mod signal;
pub mod timing;
pub mod types;

// Re-export main public API
pub use decode::{DecodeEvent, MorseDecoder, UNKNOWN_CHAR, WORD_SEPARATOR};
pub use diagnostics::{Diagnostics, LabelStats};
pub use encode::{encode_text, encode_text_with_jitter, EncodeJitter};
pub use error::ConfigError;
pub use sensor::{normalize, normalize_color};
pub use session::DecodeSession;
pub use signal::{MarkGapClassifier, ThresholdStrategy};
pub use timing::classify_interval;
pub use types::*;

#[cfg(feature = "wasm")]
pub mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::*;

// Public API for direct Rust usage

/// Decode a finished recording of sensor samples.
pub fn decode_samples(
    samples: &[ColorSample],
    config: &DecoderConfig,
) -> Result<String, ConfigError> {
    let mut session = DecodeSession::new(*config)?;
    for sample in samples {
        session.push_sample(sample);
    }
    Ok(session.finish())
}

/// Decode a pre-segmented interval stream.
pub fn decode_intervals(
    intervals: &[Interval],
    config: &DecoderConfig,
) -> Result<String, ConfigError> {
    let mut session = DecodeSession::new(*config)?;
    for interval in intervals {
        session.push_interval(*interval);
    }
    Ok(session.finish())
}
