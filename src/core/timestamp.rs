// Capture timestamp embedded in the header

use crate::core::constants::*;
use crate::core::format::CaptureTimestamp;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Reads the instrument clock from the fixed header positions.
///
/// Returns `None` when the header is shorter than 12 bytes or any field is
/// outside its range (including impossible dates such as 31 February).
pub fn header_timestamp(raw: &[u8]) -> Option<NaiveDateTime> {
    if raw.len() < TS_HEADER_MIN_LEN {
        return None;
    }

    let minute = raw[TS_MINUTE_POS];
    let hour = raw[TS_HOUR_POS];
    let day = raw[TS_DAY_POS];
    let month = raw[TS_MONTH_POS];
    let year = u16::from_le_bytes([raw[TS_YEAR_POS], raw[TS_YEAR_POS + 1]]);

    if minute > 59
        || hour > 23
        || !(1..=31).contains(&day)
        || !(1..=12).contains(&month)
        || !(TS_YEAR_MIN..=TS_YEAR_MAX).contains(&year)
    {
        return None;
    }

    NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)?
        .and_hms_opt(hour as u32, minute as u32, 0)
}

/// Header clock if every field is valid, otherwise `file_modified` unchanged.
pub fn read_timestamp(raw: &[u8], file_modified: DateTime<Utc>) -> CaptureTimestamp {
    match header_timestamp(raw) {
        Some(naive) => CaptureTimestamp::Header(naive),
        None => CaptureTimestamp::FileModified(file_modified),
    }
}
