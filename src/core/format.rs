// Data structures for LBY force logs

use chrono::{DateTime, Duration, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// When a recording started.
///
/// Exactly one source is used per file: either every header field validated,
/// or the file's modified time is returned untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureTimestamp {
    /// Instrument clock, naive local time as stored in the header.
    Header(NaiveDateTime),
    /// Fallback: the file's last-modified time.
    FileModified(DateTime<Utc>),
}

impl CaptureTimestamp {
    pub fn is_from_header(&self) -> bool {
        matches!(self, CaptureTimestamp::Header(_))
    }

    /// Wall-clock time in the local zone, used for naming outputs.
    pub fn local_naive(&self) -> NaiveDateTime {
        match self {
            CaptureTimestamp::Header(naive) => *naive,
            CaptureTimestamp::FileModified(utc) => utc.with_timezone(&Local).naive_local(),
        }
    }
}

impl fmt::Display for CaptureTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureTimestamp::Header(naive) => write!(f, "{}", naive.format("%Y-%m-%d %H:%M:%S")),
            CaptureTimestamp::FileModified(utc) => {
                write!(f, "{} (file mtime)", utc.format("%Y-%m-%d %H:%M:%S UTC"))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForceSample {
    #[serde(rename = "time_s")]
    pub elapsed_s: f64,
    #[serde(rename = "force_kN")]
    pub force_kn: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    pub samples: Vec<ForceSample>,
    pub anchor: CaptureTimestamp,
}

impl TimeSeries {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Largest force in the series, 0.0 when empty.
    pub fn peak_force(&self) -> f64 {
        self.samples
            .iter()
            .map(|s| s.force_kn)
            .fold(0.0, f64::max)
    }

    pub fn duration_s(&self) -> f64 {
        self.samples.last().map(|s| s.elapsed_s).unwrap_or(0.0)
    }

    /// Local wall-clock time of sample `index`.
    pub fn absolute_time(&self, index: usize) -> Option<NaiveDateTime> {
        let sample = self.samples.get(index)?;
        let offset = Duration::milliseconds((sample.elapsed_s * 1000.0) as i64);
        Some(self.anchor.local_naive() + offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn header_anchor() -> CaptureTimestamp {
        let naive = NaiveDate::from_ymd_opt(2025, 9, 14)
            .unwrap()
            .and_hms_opt(13, 7, 0)
            .unwrap();
        CaptureTimestamp::Header(naive)
    }

    fn series(forces: &[f64]) -> TimeSeries {
        TimeSeries {
            samples: forces
                .iter()
                .enumerate()
                .map(|(i, f)| ForceSample { elapsed_s: i as f64 * 0.5, force_kn: *f })
                .collect(),
            anchor: header_anchor(),
        }
    }

    #[test]
    fn test_peak_and_duration() {
        let s = series(&[0.1, 2.5, 0.4]);
        assert_eq!(s.peak_force(), 2.5);
        assert_eq!(s.duration_s(), 1.0);

        let empty = series(&[]);
        assert_eq!(empty.peak_force(), 0.0);
        assert_eq!(empty.duration_s(), 0.0);
    }

    #[test]
    fn test_absolute_time() {
        let s = series(&[0.0, 0.0, 0.0, 0.0]);
        let t3 = s.absolute_time(3).unwrap();
        assert_eq!(t3.format("%H:%M:%S%.3f").to_string(), "13:07:01.500");
        assert!(s.absolute_time(4).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(header_anchor().to_string(), "2025-09-14 13:07:00");

        let mtime = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let ts = CaptureTimestamp::FileModified(mtime);
        assert!(!ts.is_from_header());
        assert_eq!(ts.to_string(), "2024-01-02 03:04:05 UTC (file mtime)");
    }

    #[test]
    fn test_sample_serde_names() {
        let sample = ForceSample { elapsed_s: 1.5, force_kn: 0.25 };
        let json = serde_json::to_string(&sample).unwrap();
        assert_eq!(json, r#"{"time_s":1.5,"force_kN":0.25}"#);
    }
}
