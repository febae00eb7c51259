// Pairing decoded readings with the fixed 0.5 s time grid

use crate::core::constants::SAMPLE_INTERVAL_S;
use crate::core::format::{CaptureTimestamp, ForceSample, TimeSeries};

/// Elapsed time of sample `index`. Computed from the index so no error
/// accumulates along the series.
pub fn elapsed_at(index: usize) -> f64 {
    index as f64 * SAMPLE_INTERVAL_S
}

/// Builds a series in input order. An empty input gives an empty series.
pub fn build<I>(readings: I, anchor: CaptureTimestamp) -> TimeSeries
where
    I: IntoIterator<Item = f64>,
{
    let samples = readings
        .into_iter()
        .enumerate()
        .map(|(i, force_kn)| ForceSample {
            elapsed_s: elapsed_at(i),
            force_kn,
        })
        .collect();

    TimeSeries { samples, anchor }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn anchor() -> CaptureTimestamp {
        CaptureTimestamp::FileModified(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
    }

    #[test]
    fn test_build_keeps_order() {
        let series = build(vec![0.5, 0.1, 0.3], anchor());
        let forces: Vec<f64> = series.samples.iter().map(|s| s.force_kn).collect();
        let times: Vec<f64> = series.samples.iter().map(|s| s.elapsed_s).collect();
        assert_eq!(forces, vec![0.5, 0.1, 0.3]);
        assert_eq!(times, vec![0.0, 0.5, 1.0]);
        assert_eq!(series.anchor, anchor());
    }

    #[test]
    fn test_build_empty() {
        let series = build(std::iter::empty(), anchor());
        assert!(series.is_empty());
    }

    #[test]
    fn test_elapsed_has_no_drift() {
        let series = build(std::iter::repeat(1.0).take(100_001), anchor());
        assert_eq!(series.samples[100_000].elapsed_s, 50_000.0);
        for (i, s) in series.samples.iter().enumerate().step_by(997) {
            assert_eq!(s.elapsed_s, i as f64 * 0.5);
        }
    }
}
