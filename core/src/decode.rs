//! The decoder state machine: labeled intervals in, text out.

use crate::patterns;
use crate::types::{IntervalLabel, LabeledInterval, Symbol};

/// Appended when a completed symbol sequence has no table entry. `?` is a
/// real Morse character, so the replacement character stands in instead.
pub const UNKNOWN_CHAR: char = '\u{FFFD}';

pub const WORD_SEPARATOR: char = ' ';

/// What the decoder appended or reported while consuming one interval.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeEvent {
    Character(char),
    /// A sequence with no table entry was flushed as [`UNKNOWN_CHAR`].
    UnknownPattern(Vec<Symbol>),
    WordBreak,
}

/// Push-based and purely reactive: all timing decisions were already made by
/// the timing classifier, so the decoder holds no clocks of its own.
///
/// Dits and dahs accumulate in the symbol buffer; letter and word gaps flush
/// it through the pattern table into the output. Gaps that arrive with an
/// empty buffer are no-ops, so leading silence produces no output. Unmatched
/// sequences degrade to [`UNKNOWN_CHAR`] and are reported, never fatal.
#[derive(Debug, Default)]
pub struct MorseDecoder {
    buffer: Vec<Symbol>,
    output: String,
}

impl MorseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoded text so far, including word separators. Append-only.
    pub fn text(&self) -> &str {
        &self.output
    }

    pub fn into_text(self) -> String {
        self.output
    }

    /// Consume one labeled interval. Returns the events it produced: at most
    /// a character flush plus a word break.
    pub fn push(&mut self, labeled: &LabeledInterval) -> Vec<DecodeEvent> {
        let mut events = Vec::new();
        match labeled.label {
            IntervalLabel::Dit => self.buffer.push(Symbol::Dit),
            IntervalLabel::Dah => self.buffer.push(Symbol::Dah),
            // Symbol boundary within a character; the buffer persists.
            IntervalLabel::IntraGap => {}
            // Noise never reaches the buffer.
            IntervalLabel::Noise => {}
            IntervalLabel::LetterGap => self.flush_letter(&mut events),
            IntervalLabel::WordGap => {
                if !self.buffer.is_empty() {
                    self.flush_letter(&mut events);
                    self.output.push(WORD_SEPARATOR);
                    events.push(DecodeEvent::WordBreak);
                }
            }
        }
        events
    }

    /// Final letter flush, for the end of a recording that stops on a mark.
    pub fn flush(&mut self) -> Vec<DecodeEvent> {
        let mut events = Vec::new();
        self.flush_letter(&mut events);
        events
    }

    fn flush_letter(&mut self, events: &mut Vec<DecodeEvent>) {
        if self.buffer.is_empty() {
            return;
        }
        match patterns::character_for(&self.buffer) {
            Some(ch) => {
                tracing::debug!(%ch, "decoded character");
                self.output.push(ch);
                events.push(DecodeEvent::Character(ch));
            }
            None => {
                tracing::warn!(pattern = ?self.buffer, "no table entry for symbol sequence");
                self.output.push(UNKNOWN_CHAR);
                events.push(DecodeEvent::UnknownPattern(std::mem::take(&mut self.buffer)));
            }
        }
        self.buffer.clear();
    }
}
