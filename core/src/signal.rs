//! Mark/gap classification: threshold the intensity stream and compress
//! consecutive equal states into timed intervals.

use crate::types::{Interval, SignalState};

/// EMA rate for the adaptive envelope release.
const ENVELOPE_ALPHA: f32 = 0.05;

/// Minimum high-low envelope spread before the adaptive midpoint is trusted.
/// Below this the signal is effectively flat and the configured threshold
/// stays in force.
const MIN_SPREAD: f32 = 0.1;

/// Threshold policy, fixed at session construction.
///
/// `Adaptive` tracks the intensity envelope with fast attack and slow
/// exponential release on both extrema, and places the threshold at the
/// envelope midpoint. This follows ambient-light and brightness drift over a
/// session, which a static threshold cannot.
#[derive(Debug, Clone, Copy)]
pub enum ThresholdStrategy {
    Static {
        threshold: f32,
    },
    Adaptive {
        threshold: f32,
        low: f32,
        high: f32,
        primed: bool,
    },
}

impl ThresholdStrategy {
    pub fn fixed(threshold: f32) -> Self {
        Self::Static { threshold }
    }

    /// Adaptive tracking, starting from `initial` until enough envelope
    /// spread has been observed.
    pub fn adaptive(initial: f32) -> Self {
        Self::Adaptive {
            threshold: initial,
            low: 0.0,
            high: 0.0,
            primed: false,
        }
    }

    pub fn current(&self) -> f32 {
        match self {
            Self::Static { threshold } => *threshold,
            Self::Adaptive { threshold, .. } => *threshold,
        }
    }

    fn update(&mut self, intensity: f32) -> f32 {
        match self {
            Self::Static { threshold } => *threshold,
            Self::Adaptive {
                threshold,
                low,
                high,
                primed,
            } => {
                if !*primed {
                    *low = intensity;
                    *high = intensity;
                    *primed = true;
                } else {
                    if intensity > *high {
                        *high = intensity;
                    } else {
                        *high += ENVELOPE_ALPHA * (intensity - *high);
                    }
                    if intensity < *low {
                        *low = intensity;
                    } else {
                        *low += ENVELOPE_ALPHA * (intensity - *low);
                    }
                }
                if *high - *low >= MIN_SPREAD {
                    *threshold = (*low + *high) / 2.0;
                }
                *threshold
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct OpenInterval {
    state: SignalState,
    since_seconds: f32,
}

/// Push-based classifier over (timestamp, intensity) pairs.
///
/// The first sample only initializes state; every later sample that crosses
/// the threshold closes the running interval and opens a new one. Dropping
/// the classifier mid-stream discards the open interval.
#[derive(Debug)]
pub struct MarkGapClassifier {
    strategy: ThresholdStrategy,
    open: Option<OpenInterval>,
}

impl MarkGapClassifier {
    pub fn new(strategy: ThresholdStrategy) -> Self {
        Self {
            strategy,
            open: None,
        }
    }

    /// Feed one normalized sample. Returns the interval a state transition
    /// just closed, if any.
    pub fn push(&mut self, seconds: f32, intensity: f32) -> Option<Interval> {
        let threshold = self.strategy.update(intensity);
        let state = if intensity >= threshold {
            SignalState::Mark
        } else {
            SignalState::Gap
        };

        match self.open {
            None => {
                self.open = Some(OpenInterval {
                    state,
                    since_seconds: seconds,
                });
                None
            }
            Some(open) if open.state != state => {
                tracing::debug!(?state, at = seconds, "signal transition");
                self.open = Some(OpenInterval {
                    state,
                    since_seconds: seconds,
                });
                Some(Interval::new(
                    open.state,
                    open.since_seconds,
                    seconds - open.since_seconds,
                ))
            }
            Some(_) => None,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.strategy.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn first_sample_emits_nothing() {
        let mut classifier = MarkGapClassifier::new(ThresholdStrategy::fixed(0.5));
        assert_eq!(classifier.push(0.0, 0.9), None);
    }

    #[test]
    fn transition_closes_interval_with_duration() {
        let mut classifier = MarkGapClassifier::new(ThresholdStrategy::fixed(0.5));
        classifier.push(0.0, 0.9);
        classifier.push(0.1, 0.8);
        let interval = classifier.push(0.3, 0.1).unwrap();
        assert_eq!(interval.state, SignalState::Mark);
        assert_relative_eq!(interval.start_seconds, 0.0);
        assert_relative_eq!(interval.duration_seconds, 0.3);
    }

    #[test]
    fn intensity_at_threshold_counts_as_mark() {
        let mut classifier = MarkGapClassifier::new(ThresholdStrategy::fixed(0.5));
        classifier.push(0.0, 0.0);
        let interval = classifier.push(1.0, 0.5).unwrap();
        assert_eq!(interval.state, SignalState::Gap);
        // No further transition while the signal sits exactly at threshold.
        assert_eq!(classifier.push(2.0, 0.5), None);
    }

    #[test]
    fn steady_state_emits_nothing() {
        let mut classifier = MarkGapClassifier::new(ThresholdStrategy::fixed(0.5));
        for i in 0..20 {
            assert_eq!(classifier.push(i as f32 * 0.01, 0.9), None);
        }
    }

    #[test]
    fn adaptive_threshold_follows_drifting_baseline() {
        let mut strategy = ThresholdStrategy::adaptive(0.5);
        // Alternate between a dim "on" and a raised "off" level that a fixed
        // 0.5 threshold would misread as always-off.
        for _ in 0..200 {
            strategy.update(0.45);
            strategy.update(0.15);
        }
        let threshold = strategy.current();
        assert!(threshold > 0.15 && threshold < 0.45);
        assert_relative_eq!(threshold, 0.3, epsilon = 0.05);
    }

    #[test]
    fn adaptive_keeps_configured_threshold_on_flat_signal() {
        let mut strategy = ThresholdStrategy::adaptive(0.5);
        for _ in 0..100 {
            strategy.update(0.42);
        }
        // Spread guard: a flat signal must not drag the threshold onto itself.
        assert_relative_eq!(strategy.current(), 0.5);
    }

    #[test]
    fn adaptive_classifier_segments_drifted_signal() {
        let mut classifier = MarkGapClassifier::new(ThresholdStrategy::adaptive(0.5));
        let mut transitions = 0;
        // 0.35/0.75 square wave, entirely above a naive 0.3 threshold.
        for i in 0..400 {
            let on = (i / 10) % 2 == 0;
            let intensity = if on { 0.75 } else { 0.35 };
            if classifier.push(i as f32 * 0.01, intensity).is_some() {
                transitions += 1;
            }
        }
        assert!(transitions > 10);
    }
}
