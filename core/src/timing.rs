//! Duration classification: label mark/gap intervals against the configured
//! duration references.

use crate::types::{DecoderConfig, Interval, IntervalLabel, LabeledInterval, SignalState};

/// Label an interval by the nearest accepting duration reference.
///
/// A reference `r` accepts duration `d` when `|d - r| <= tolerance * r`.
/// Among accepting references the nearest wins; a duration exactly at the
/// midpoint between two accepting references resolves to the *shorter* one.
/// A duration no reference accepts is labeled [`IntervalLabel::Noise`].
///
/// Marks only compete for Dit/Dah; gaps only for IntraGap/LetterGap/WordGap
/// (the intra-gap reference is `dit_seconds`). Classification is pure, so
/// relabeling the same interval with the same config always agrees.
pub fn classify_interval(interval: &Interval, config: &DecoderConfig) -> LabeledInterval {
    let duration = interval.duration_seconds;
    let label = match interval.state {
        SignalState::Mark => nearest_label(
            duration,
            config.tolerance,
            &[
                (config.dit_seconds, IntervalLabel::Dit),
                (config.dah_seconds, IntervalLabel::Dah),
            ],
        ),
        SignalState::Gap => nearest_label(
            duration,
            config.tolerance,
            &[
                (config.dit_seconds, IntervalLabel::IntraGap),
                (config.letter_gap_seconds, IntervalLabel::LetterGap),
                (config.word_gap_seconds, IntervalLabel::WordGap),
            ],
        ),
    };
    LabeledInterval {
        interval: *interval,
        label,
    }
}

/// `references` are ordered ascending; keeping the first of two equally
/// distant candidates is what gives the shorter reference the tie.
fn nearest_label(
    duration: f32,
    tolerance: f32,
    references: &[(f32, IntervalLabel)],
) -> IntervalLabel {
    let mut best: Option<(f32, IntervalLabel)> = None;
    for &(reference, label) in references {
        let distance = (duration - reference).abs();
        if distance > tolerance * reference {
            continue;
        }
        if best.map_or(true, |(nearest, _)| distance < nearest) {
            best = Some((distance, label));
        }
    }
    match best {
        Some((_, label)) => label,
        None => IntervalLabel::Noise,
    }
}
