//! One decoding session: normalizer -> mark/gap classifier -> timing
//! classifier -> decoder, with diagnostics tapped off the labeled stream.

use crate::decode::{DecodeEvent, MorseDecoder};
use crate::diagnostics::Diagnostics;
use crate::error::ConfigError;
use crate::sensor;
use crate::signal::{MarkGapClassifier, ThresholdStrategy};
use crate::timing;
use crate::types::{ColorSample, DecoderConfig, Interval, IntervalLabel, ReferenceColors};

/// A single-owner decoding pipeline over an immutable config snapshot.
///
/// Every stage is a synchronous transformation triggered by sample arrival;
/// the session never blocks and holds no timers. Dropping it mid-stream
/// discards the open interval and symbol buffer, which is the documented
/// cancellation behavior.
pub struct DecodeSession {
    config: DecoderConfig,
    refs: ReferenceColors,
    classifier: MarkGapClassifier,
    decoder: MorseDecoder,
    diagnostics: Diagnostics,
    intensity: f32,
}

impl DecodeSession {
    /// Validates the configuration; a session never starts with a bad one.
    pub fn new(config: DecoderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let strategy = if config.adaptive {
            ThresholdStrategy::adaptive(config.threshold)
        } else {
            ThresholdStrategy::fixed(config.threshold)
        };
        Ok(Self {
            refs: config.reference_colors(),
            classifier: MarkGapClassifier::new(strategy),
            decoder: MorseDecoder::new(),
            diagnostics: Diagnostics::new(),
            intensity: 0.0,
            config,
        })
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Latest normalized intensity, for host display.
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Current mark/gap threshold. Moves under the adaptive strategy.
    pub fn threshold(&self) -> f32 {
        self.classifier.threshold()
    }

    /// Decoded text so far. Append-only snapshot.
    pub fn text(&self) -> &str {
        self.decoder.text()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Drive the full pipeline with one sensor sample.
    pub fn push_sample(&mut self, sample: &ColorSample) {
        self.intensity = sensor::normalize(sample, &self.refs);
        if let Some(interval) = self.classifier.push(sample.seconds, self.intensity) {
            self.push_interval(interval);
        }
    }

    /// Feed a pre-segmented interval, bypassing the normalizer and mark/gap
    /// classifier. Used for synthetic streams and hosts that segment
    /// upstream.
    pub fn push_interval(&mut self, interval: Interval) {
        let labeled = timing::classify_interval(&interval, &self.config);
        if labeled.label == IntervalLabel::Noise {
            tracing::warn!(
                state = ?interval.state,
                duration = interval.duration_seconds,
                "interval outside all tolerance bands"
            );
        }
        self.diagnostics.record(&labeled);
        for event in self.decoder.push(&labeled) {
            if let DecodeEvent::UnknownPattern(pattern) = &event {
                self.diagnostics.record_unknown_pattern(pattern);
            }
        }
    }

    /// Flush the trailing symbol buffer, for a recording that ends on a
    /// mark. Idempotent.
    pub fn flush(&mut self) {
        for event in self.decoder.flush() {
            if let DecodeEvent::UnknownPattern(pattern) = &event {
                self.diagnostics.record_unknown_pattern(pattern);
            }
        }
    }

    /// Flush and return the decoded text.
    pub fn finish(mut self) -> String {
        self.flush();
        self.decoder.into_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SignalState;

    fn scenario_config() -> DecoderConfig {
        DecoderConfig {
            dit_seconds: 0.1,
            dah_seconds: 0.3,
            letter_gap_seconds: 0.3,
            word_gap_seconds: 0.7,
            ..Default::default()
        }
    }

    fn mark(start: f32, duration: f32) -> Interval {
        Interval::new(SignalState::Mark, start, duration)
    }

    fn gap(start: f32, duration: f32) -> Interval {
        Interval::new(SignalState::Gap, start, duration)
    }

    #[test]
    fn rejects_invalid_config_at_start() {
        let config = DecoderConfig {
            tolerance: 0.0,
            ..Default::default()
        };
        assert_eq!(
            DecodeSession::new(config).err(),
            Some(ConfigError::NonPositiveTolerance(0.0))
        );
    }

    #[test]
    fn interval_stream_decodes_with_word_break() {
        // Dit dit dah, then a word gap: "U ".
        let config = DecoderConfig {
            letter_gap_seconds: 0.1,
            ..scenario_config()
        };
        let mut session = DecodeSession::new(config).unwrap();
        for interval in [
            mark(0.0, 0.1),
            gap(0.1, 0.1),
            mark(0.2, 0.1),
            gap(0.3, 0.1),
            mark(0.4, 0.3),
            gap(0.7, 0.7),
        ] {
            session.push_interval(interval);
        }
        assert_eq!(session.text(), "U ");
    }

    #[test]
    fn oversized_gap_is_noise_and_flushes_nothing() {
        let mut session = DecodeSession::new(scenario_config()).unwrap();
        session.push_interval(gap(0.0, 5.0));
        assert_eq!(session.diagnostics().noise_intervals(), 1);
        assert_eq!(session.text(), "");
        // And again: still no spurious flush from an empty buffer.
        session.push_interval(gap(5.0, 5.0));
        assert_eq!(session.diagnostics().noise_intervals(), 2);
        assert_eq!(session.finish(), "");
    }

    #[test]
    fn unknown_sequence_is_reported_once() {
        let mut session = DecodeSession::new(scenario_config()).unwrap();
        for i in 0..6 {
            let start = i as f32 * 0.4;
            session.push_interval(mark(start, 0.3));
            if i < 5 {
                session.push_interval(gap(start + 0.3, 0.1));
            }
        }
        session.push_interval(gap(2.3, 0.3));
        assert_eq!(session.text(), "\u{FFFD}");
        assert_eq!(session.diagnostics().unknown_patterns(), 1);
        assert_eq!(session.diagnostics().noise_intervals(), 0);
    }

    #[test]
    fn sample_stream_decodes_through_the_whole_pipeline() {
        let mut session = DecodeSession::new(scenario_config()).unwrap();
        // 50 Hz samples spelling E ("."): 0.1s on, then letter-gap silence.
        let step = 0.02f32;
        for i in 0..25 {
            let seconds = i as f32 * step;
            let on = seconds < 0.1;
            let color = if on { (255, 255, 255) } else { (0, 0, 0) };
            session.push_sample(&ColorSample::new(seconds, color));
        }
        assert!(session.intensity() < 0.5);
        assert_eq!(session.threshold(), 0.5);
        assert_eq!(session.finish(), "E");
    }
}
