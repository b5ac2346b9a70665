//! Typing telemetry and combo scaling.
//!
//! Formulas:
//! - combo_multiplier = 1 + floor(combo / 10) × 0.1
//! - accuracy = correct_chars / chars_typed (0 when nothing typed)
//! - wpm = correct_chars / 5 / elapsed_minutes (0 under 6 seconds)

use std::collections::BTreeMap;

/// Hits needed per combo step.
pub const COMBO_STEP: u32 = 10;
/// Multiplier gained per combo step.
pub const COMBO_BONUS_PER_STEP: f64 = 0.1;
/// Below this much night time WPM reads as zero.
pub const MIN_WPM_SAMPLE_SECONDS: f64 = 6.0;
/// Characters per "word" in WPM.
pub const CHARS_PER_WORD: f64 = 5.0;

/// Damage multiplier for the current combo. Monotonic in `combo`.
pub fn combo_multiplier(combo: u32) -> f64 {
    1.0 + f64::from(combo / COMBO_STEP) * COMBO_BONUS_PER_STEP
}

/// Length in chars of the shared prefix of two words.
pub fn common_prefix_len(typed: &str, expected: &str) -> usize {
    typed
        .chars()
        .zip(expected.chars())
        .take_while(|(a, b)| a == b)
        .count()
}

/// Live typing counters for the current run.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypingMetrics {
    pub chars_typed: u32,
    pub correct_chars: u32,
    pub words_typed: u32,
    pub words_completed: u32,
    pub errors: u32,
    pub combo: u32,
    pub max_combo: u32,
    /// Night seconds accumulated through `tick`.
    pub elapsed_seconds: f64,
    /// Experimental counters. Nothing in the simulation reads these.
    pub extra: BTreeMap<String, f64>,
}

impl TypingMetrics {
    /// Records a fully matched word.
    pub fn record_hit(&mut self, word: &str) {
        let len = word.chars().count() as u32;
        self.chars_typed = self.chars_typed.saturating_add(len);
        self.correct_chars = self.correct_chars.saturating_add(len);
        self.words_typed = self.words_typed.saturating_add(1);
        self.words_completed = self.words_completed.saturating_add(1);
        self.combo = self.combo.saturating_add(1);
        self.max_combo = self.max_combo.max(self.combo);
    }

    /// Records a miss. Correct characters are the prefix shared with
    /// `expected` (the active enemy's word), if any.
    pub fn record_miss(&mut self, typed: &str, expected: Option<&str>) {
        let len = typed.chars().count() as u32;
        let correct = expected
            .map(|word| common_prefix_len(typed, word) as u32)
            .unwrap_or(0);
        self.chars_typed = self.chars_typed.saturating_add(len);
        self.correct_chars = self.correct_chars.saturating_add(correct.min(len));
        self.words_typed = self.words_typed.saturating_add(1);
        self.errors = self.errors.saturating_add(1);
        self.combo = 0;
    }

    /// Adds night time. Callers clamp `seconds` before calling.
    pub fn advance(&mut self, seconds: f64) {
        self.elapsed_seconds += seconds;
    }

    pub fn accuracy(&self) -> f64 {
        if self.chars_typed == 0 {
            return 0.0;
        }
        f64::from(self.correct_chars) / f64::from(self.chars_typed)
    }

    pub fn wpm(&self) -> f64 {
        if self.elapsed_seconds < MIN_WPM_SAMPLE_SECONDS {
            return 0.0;
        }
        f64::from(self.correct_chars) / CHARS_PER_WORD / (self.elapsed_seconds / 60.0)
    }

    pub fn chars_per_second(&self) -> f64 {
        if self.elapsed_seconds < MIN_WPM_SAMPLE_SECONDS {
            return 0.0;
        }
        f64::from(self.correct_chars) / self.elapsed_seconds
    }

    pub fn combo_multiplier(&self) -> f64 {
        combo_multiplier(self.combo)
    }

    /// Adds to an experimental counter.
    pub fn bump(&mut self, name: &str, amount: f64) {
        *self.extra.entry(name.to_string()).or_insert(0.0) += amount;
    }
}
