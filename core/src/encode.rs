//! Text to synthetic mark/gap interval streams, for transmitting hosts and
//! round-trip testing of the decoder.

use crate::error::ConfigError;
use crate::patterns;
use crate::types::{DecoderConfig, Interval, SignalState, Symbol};

/// Deterministic timing jitter for synthetic streams. Keep `factor` below
/// the config's tolerance or the jittered stream stops classifying cleanly.
#[derive(Debug, Clone, Copy)]
pub struct EncodeJitter {
    /// Max deviation as a fraction of each base duration.
    pub factor: f32,
    pub seed: u32,
}

// Small LCG; only needs to be deterministic per seed.
struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    fn new(seed: u32) -> Self {
        Self {
            state: seed.wrapping_add(1),
        }
    }

    fn next_f32(&mut self) -> f32 {
        self.state = self.state.wrapping_mul(1103515245).wrapping_add(12345);
        (self.state >> 16) as f32 / 65536.0
    }
}

struct IntervalWriter {
    intervals: Vec<Interval>,
    clock: f32,
    rng: Option<(SimpleRng, f32)>,
}

impl IntervalWriter {
    fn push(&mut self, state: SignalState, base_seconds: f32) {
        let duration = match &mut self.rng {
            Some((rng, factor)) => {
                let deviation = (rng.next_f32() - 0.5) * 2.0 * *factor;
                base_seconds * (1.0 + deviation)
            }
            None => base_seconds,
        };
        // A light cannot transition gap-to-gap: merge equal-state runs.
        if let Some(last) = self.intervals.last_mut() {
            if last.state == state {
                last.duration_seconds += duration;
                self.clock += duration;
                return;
            }
        }
        self.intervals
            .push(Interval::new(state, self.clock, duration));
        self.clock += duration;
    }
}

/// Encode text as the interval stream an ideal sender would produce: marks
/// of dit/dah length, intra-character gaps of dit length, letter and word
/// gaps from the config. Characters with no Morse pattern are skipped.
pub fn encode_text(text: &str, config: &DecoderConfig) -> Result<Vec<Interval>, ConfigError> {
    encode_text_with_jitter(text, config, None)
}

pub fn encode_text_with_jitter(
    text: &str,
    config: &DecoderConfig,
    jitter: Option<EncodeJitter>,
) -> Result<Vec<Interval>, ConfigError> {
    config.validate()?;

    let mut writer = IntervalWriter {
        intervals: Vec::new(),
        clock: 0.0,
        rng: jitter.map(|j| (SimpleRng::new(j.seed), j.factor)),
    };
    let mut pending_letter_gap = false;

    for byte in text.bytes() {
        if byte == b' ' {
            if !writer.intervals.is_empty() {
                writer.push(SignalState::Gap, config.word_gap_seconds);
            }
            pending_letter_gap = false;
            continue;
        }
        let Some(pattern) = patterns::pattern_for(byte) else {
            continue;
        };
        if pending_letter_gap {
            writer.push(SignalState::Gap, config.letter_gap_seconds);
        }
        for (i, symbol) in pattern.iter().enumerate() {
            if i > 0 {
                writer.push(SignalState::Gap, config.dit_seconds);
            }
            let mark_seconds = match symbol {
                Symbol::Dit => config.dit_seconds,
                Symbol::Dah => config.dah_seconds,
            };
            writer.push(SignalState::Mark, mark_seconds);
        }
        pending_letter_gap = true;
    }

    Ok(writer.intervals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn single_letter_alternates_marks_and_intra_gaps() {
        let config = DecoderConfig::default();
        // S = dit dit dit
        let intervals = encode_text("S", &config).unwrap();
        assert_eq!(intervals.len(), 5);
        for (i, interval) in intervals.iter().enumerate() {
            let expected = if i % 2 == 0 {
                SignalState::Mark
            } else {
                SignalState::Gap
            };
            assert_eq!(interval.state, expected);
            assert_relative_eq!(interval.duration_seconds, 0.1);
        }
    }

    #[test]
    fn timestamps_are_cumulative() {
        let config = DecoderConfig::default();
        let intervals = encode_text("E E", &config).unwrap();
        // mark, word gap, mark
        assert_eq!(intervals.len(), 3);
        assert_relative_eq!(intervals[1].start_seconds, 0.1);
        assert_relative_eq!(intervals[1].duration_seconds, 0.7);
        assert_relative_eq!(intervals[2].start_seconds, 0.8, epsilon = 1e-6);
    }

    #[test]
    fn space_emits_a_single_word_gap() {
        let config = DecoderConfig::default();
        let intervals = encode_text("E E", &config).unwrap();
        let gaps: Vec<_> = intervals
            .iter()
            .filter(|i| i.state == SignalState::Gap)
            .collect();
        assert_eq!(gaps.len(), 1);
        assert_relative_eq!(gaps[0].duration_seconds, config.word_gap_seconds);
    }

    #[test]
    fn consecutive_spaces_merge_into_one_gap_interval() {
        let config = DecoderConfig::default();
        let intervals = encode_text("E  E", &config).unwrap();
        assert_eq!(intervals.len(), 3);
        assert_relative_eq!(
            intervals[1].duration_seconds,
            2.0 * config.word_gap_seconds
        );
    }

    #[test]
    fn leading_space_emits_nothing() {
        let config = DecoderConfig::default();
        let intervals = encode_text(" E", &config).unwrap();
        assert_eq!(intervals.len(), 1);
        assert_relative_eq!(intervals[0].start_seconds, 0.0);
    }

    #[test]
    fn unencodable_characters_are_skipped() {
        let config = DecoderConfig::default();
        assert_eq!(
            encode_text("E%E", &config).unwrap().len(),
            encode_text("EE", &config).unwrap().len()
        );
    }

    #[test]
    fn jitter_is_deterministic_per_seed() {
        let config = DecoderConfig::default();
        let jitter = EncodeJitter {
            factor: 0.2,
            seed: 7,
        };
        let a = encode_text_with_jitter("SOS", &config, Some(jitter)).unwrap();
        let b = encode_text_with_jitter("SOS", &config, Some(jitter)).unwrap();
        assert_eq!(a, b);
        let c = encode_text_with_jitter(
            "SOS",
            &config,
            Some(EncodeJitter {
                factor: 0.2,
                seed: 8,
            }),
        )
        .unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = DecoderConfig {
            dit_seconds: -0.1,
            ..Default::default()
        };
        assert!(encode_text("SOS", &config).is_err());
    }
}
