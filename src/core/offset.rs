// Locating the start of the data section
//
// The header mixes ASCII text and binary fields; read as i32 words those bytes
// are mostly huge or erratic. The data section is a dense run of small counts
// that change slowly from one sample to the next. Candidates are scored in
// 4-byte steps from the start of the header window and the first plausible one
// wins.

use crate::core::constants::*;
use crate::core::decode::words_le;
use crate::core::error::{LbyError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// First candidate offset. Must be a multiple of 4.
    pub window_start: usize,
    /// Last candidate offset, inclusive.
    pub window_end: usize,
    /// Words decoded per candidate (fewer near end of file).
    pub lookahead_words: usize,
    pub max_abs_count: u32,
    pub delta_floor: u32,
    pub delta_ratio: f64,
    /// Lower this to skip zero-padded header fields sitting right before the
    /// data.
    pub max_zero_fraction: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            window_start: DEFAULT_WINDOW_START,
            window_end: DEFAULT_WINDOW_END,
            lookahead_words: DEFAULT_LOOKAHEAD_WORDS,
            max_abs_count: DEFAULT_MAX_ABS_COUNT,
            delta_floor: DEFAULT_DELTA_FLOOR,
            delta_ratio: DEFAULT_DELTA_RATIO,
            max_zero_fraction: DEFAULT_MAX_ZERO_FRACTION,
        }
    }
}

impl DetectorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.window_start % WORD_SIZE != 0 {
            return Err(LbyError::InvalidConfig(format!(
                "window_start {} is not a multiple of {}",
                self.window_start, WORD_SIZE
            )));
        }
        if self.window_end < self.window_start {
            return Err(LbyError::InvalidConfig(format!(
                "window_end {} is before window_start {}",
                self.window_end, self.window_start
            )));
        }
        if self.lookahead_words == 0 {
            return Err(LbyError::InvalidConfig("lookahead_words must be at least 1".to_string()));
        }
        if !self.delta_ratio.is_finite() || self.delta_ratio < 0.0 {
            return Err(LbyError::InvalidConfig(format!(
                "delta_ratio {} must be a non-negative number",
                self.delta_ratio
            )));
        }
        if !(0.0..=1.0).contains(&self.max_zero_fraction) {
            return Err(LbyError::InvalidConfig(format!(
                "max_zero_fraction {} must be between 0 and 1",
                self.max_zero_fraction
            )));
        }
        Ok(())
    }
}

/// Scores a lookahead run of raw counts.
///
/// Accepts a non-empty run whose values all stay within `max_abs_count` and
/// whose successive differences stay within
/// `max(delta_floor, mean(|v|) * delta_ratio)`, and whose share of zero
/// counts does not exceed `max_zero_fraction`.
pub fn is_plausible_run(words: &[i32], config: &DetectorConfig) -> bool {
    if words.is_empty() {
        return false;
    }

    if words.iter().any(|w| w.unsigned_abs() > config.max_abs_count) {
        return false;
    }

    let zeros = words.iter().filter(|w| **w == 0).count();
    if zeros as f64 > config.max_zero_fraction * words.len() as f64 {
        return false;
    }

    let mean_abs =
        words.iter().map(|w| w.unsigned_abs() as f64).sum::<f64>() / words.len() as f64;
    let bound = (config.delta_floor as f64).max(mean_abs * config.delta_ratio);

    words
        .windows(2)
        .all(|pair| (pair[1] as i64 - pair[0] as i64).unsigned_abs() as f64 <= bound)
}

/// Returns the smallest plausible data offset inside the configured window.
pub fn detect(raw: &[u8], config: &DetectorConfig) -> Result<usize> {
    config.validate()?;

    if raw.len() < config.window_start {
        return Err(LbyError::FileTooShort {
            len: raw.len(),
            min: config.window_start,
        });
    }

    let mut lookahead = Vec::with_capacity(config.lookahead_words);
    let mut candidate = config.window_start;

    while candidate <= config.window_end && candidate + WORD_SIZE <= raw.len() {
        lookahead.clear();
        lookahead.extend(words_le(&raw[candidate..]).take(config.lookahead_words));

        if is_plausible_run(&lookahead, config) {
            return Ok(candidate);
        }
        candidate += WORD_SIZE;
    }

    Err(LbyError::NoDataOffset {
        start: config.window_start,
        end: config.window_end,
    })
}
