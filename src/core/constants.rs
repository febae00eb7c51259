// Format constants for pull-tester .LBY force logs

/// Kilonewtons per raw count. Applies to every file.
pub const CALIBRATION_KN_PER_COUNT: f64 = 0.001;

/// Fixed spacing between consecutive samples, in seconds.
pub const SAMPLE_INTERVAL_S: f64 = 0.5;

// Data section: signed 32-bit little-endian counts
pub const WORD_SIZE: usize = 4;

// Header timestamp layout: minute(5) hour(6) day(8) month(9) year(u16 LE, 10..12)
pub const TS_MINUTE_POS: usize = 5;
pub const TS_HOUR_POS: usize = 6;
pub const TS_DAY_POS: usize = 8;
pub const TS_MONTH_POS: usize = 9;
pub const TS_YEAR_POS: usize = 10;
pub const TS_HEADER_MIN_LEN: usize = TS_YEAR_POS + 2; // 12 bytes

pub const TS_YEAR_MIN: u16 = 2000;
pub const TS_YEAR_MAX: u16 = 2099;

// Offset detection defaults
pub const DEFAULT_WINDOW_START: usize = 256;
pub const DEFAULT_WINDOW_END: usize = 800;
pub const DEFAULT_LOOKAHEAD_WORDS: usize = 32;

/// Largest |count| a force reading may have (1000 kN).
pub const DEFAULT_MAX_ABS_COUNT: u32 = 1_000_000;

/// Successive samples may always differ by this many counts.
pub const DEFAULT_DELTA_FLOOR: u32 = 1_000;

/// Above the floor, successive differences are bounded by this fraction of
/// the run's mean magnitude.
pub const DEFAULT_DELTA_RATIO: f64 = 0.5;

/// Largest share of exact-zero counts a lookahead run may hold. 1.0 accepts
/// all-zero runs.
pub const DEFAULT_MAX_ZERO_FRACTION: f64 = 1.0;

// Printable ASCII runs shorter than this are not reported as header strings
pub const MIN_HEADER_STRING_LEN: usize = 4;
