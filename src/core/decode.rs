// Data section decoding: signed 32-bit LE counts -> kN

use crate::core::constants::{CALIBRATION_KN_PER_COUNT, WORD_SIZE};
use crate::core::error::{LbyError, Result};
use std::iter::FusedIterator;
use std::slice::ChunksExact;

/// Reads `bytes` as consecutive little-endian i32 words. A trailing partial
/// word is ignored.
pub fn words_le(bytes: &[u8]) -> impl Iterator<Item = i32> + '_ {
    bytes
        .chunks_exact(WORD_SIZE)
        .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]))
}

/// Converts one raw count to an absolute force in kilonewtons.
pub fn count_to_kn(count: i32) -> f64 {
    (count as f64 * CALIBRATION_KN_PER_COUNT).abs()
}

/// Single-pass iterator over calibrated readings of a data section.
#[derive(Debug, Clone)]
pub struct ForceReadings<'a> {
    chunks: ChunksExact<'a, u8>,
}

impl<'a> ForceReadings<'a> {
    /// Raw counts still to be read, without calibration.
    pub fn raw_counts(self) -> impl Iterator<Item = i32> + 'a {
        self.chunks
            .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]))
    }
}

impl Iterator for ForceReadings<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let c = self.chunks.next()?;
        Some(count_to_kn(i32::from_le_bytes([c[0], c[1], c[2], c[3]])))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl ExactSizeIterator for ForceReadings<'_> {}
impl FusedIterator for ForceReadings<'_> {}

/// Decodes everything from `offset` to the last complete word.
///
/// The offset must be word aligned and leave at least one full word.
pub fn decode(raw: &[u8], offset: usize) -> Result<ForceReadings<'_>> {
    if offset % WORD_SIZE != 0 || offset.saturating_add(WORD_SIZE) > raw.len() {
        return Err(LbyError::InvalidOffset {
            offset,
            len: raw.len(),
        });
    }

    Ok(ForceReadings {
        chunks: raw[offset..].chunks_exact(WORD_SIZE),
    })
}
