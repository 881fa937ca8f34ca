//! Recording diagnostics: observed durations per label, for calibration
//! feedback in the host UI. Purely observational.

use std::collections::VecDeque;

use crate::types::{IntervalLabel, LabeledInterval, Symbol};

/// Rows retained in the recent-interval ring.
pub const RECENT_CAPACITY: usize = 128;

const LABELS: [IntervalLabel; 6] = [
    IntervalLabel::Dit,
    IntervalLabel::Dah,
    IntervalLabel::IntraGap,
    IntervalLabel::LetterGap,
    IntervalLabel::WordGap,
    IntervalLabel::Noise,
];

/// Aggregated durations for one label.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LabelStats {
    pub count: usize,
    pub min_seconds: f32,
    pub max_seconds: f32,
    sum_seconds: f32,
}

impl LabelStats {
    fn record(&mut self, seconds: f32) {
        if self.count == 0 {
            self.min_seconds = seconds;
            self.max_seconds = seconds;
        } else {
            self.min_seconds = self.min_seconds.min(seconds);
            self.max_seconds = self.max_seconds.max(seconds);
        }
        self.count += 1;
        self.sum_seconds += seconds;
    }

    pub fn mean_seconds(&self) -> f32 {
        if self.count == 0 {
            0.0
        } else {
            self.sum_seconds / self.count as f32
        }
    }
}

/// Tabulates every labeled interval the session classified. Keeps summary
/// stats per label plus a bounded ring of the most recent rows.
#[derive(Debug, Default)]
pub struct Diagnostics {
    stats: [LabelStats; LABELS.len()],
    recent: VecDeque<(IntervalLabel, f32)>,
    unknown_patterns: usize,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, labeled: &LabeledInterval) {
        let seconds = labeled.interval.duration_seconds;
        self.stats[labeled.label as usize].record(seconds);
        if self.recent.len() == RECENT_CAPACITY {
            self.recent.pop_front();
        }
        self.recent.push_back((labeled.label, seconds));
    }

    pub fn record_unknown_pattern(&mut self, _pattern: &[Symbol]) {
        self.unknown_patterns += 1;
    }

    pub fn stats_for(&self, label: IntervalLabel) -> &LabelStats {
        &self.stats[label as usize]
    }

    /// (label, stats) rows for labels observed at least once.
    pub fn rows(&self) -> impl Iterator<Item = (IntervalLabel, &LabelStats)> + '_ {
        LABELS
            .iter()
            .map(move |&label| (label, self.stats_for(label)))
            .filter(|(_, stats)| stats.count > 0)
    }

    /// Most recent (label, duration) pairs, oldest first.
    pub fn recent(&self) -> impl Iterator<Item = (IntervalLabel, f32)> + '_ {
        self.recent.iter().copied()
    }

    pub fn intervals_recorded(&self) -> usize {
        self.stats.iter().map(|stats| stats.count).sum()
    }

    pub fn noise_intervals(&self) -> usize {
        self.stats_for(IntervalLabel::Noise).count
    }

    pub fn unknown_patterns(&self) -> usize {
        self.unknown_patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Interval, SignalState};
    use approx::assert_relative_eq;

    fn dit(duration: f32) -> LabeledInterval {
        LabeledInterval {
            interval: Interval::new(SignalState::Mark, 0.0, duration),
            label: IntervalLabel::Dit,
        }
    }

    #[test]
    fn stats_track_min_max_mean() {
        let mut diagnostics = Diagnostics::new();
        for duration in [0.08, 0.12, 0.10] {
            diagnostics.record(&dit(duration));
        }
        let stats = diagnostics.stats_for(IntervalLabel::Dit);
        assert_eq!(stats.count, 3);
        assert_relative_eq!(stats.min_seconds, 0.08);
        assert_relative_eq!(stats.max_seconds, 0.12);
        assert_relative_eq!(stats.mean_seconds(), 0.1, epsilon = 1e-6);
    }

    #[test]
    fn rows_skip_unobserved_labels() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.record(&dit(0.1));
        let rows: Vec<_> = diagnostics.rows().collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].0, IntervalLabel::Dit);
    }

    #[test]
    fn recent_ring_is_bounded() {
        let mut diagnostics = Diagnostics::new();
        for i in 0..(RECENT_CAPACITY + 10) {
            diagnostics.record(&dit(i as f32 * 0.001));
        }
        assert_eq!(diagnostics.recent().count(), RECENT_CAPACITY);
        // Oldest rows fell out.
        let first = diagnostics.recent().next().unwrap();
        assert_relative_eq!(first.1, 10.0 * 0.001);
        // Summary stats still cover everything.
        assert_eq!(diagnostics.intervals_recorded(), RECENT_CAPACITY + 10);
    }

    #[test]
    fn unknown_pattern_reports_are_counted() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.record_unknown_pattern(&[Symbol::Dah; 6]);
        assert_eq!(diagnostics.unknown_patterns(), 1);
    }
}
