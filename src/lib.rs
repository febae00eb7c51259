// LBY force-log reader
// Main library entry point

pub mod core;

// Re-export main types
pub use crate::core::error::{LbyError, Result};
pub use crate::core::export::{existing_outputs, export, output_file_name, OutputFormat};
pub use crate::core::format::{CaptureTimestamp, ForceSample, TimeSeries};
pub use crate::core::offset::DetectorConfig;
pub use crate::core::reader::{decode_bytes, DecodedLog, LbyReader};
