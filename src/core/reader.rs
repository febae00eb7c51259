// LBY reader: file boundary plus the decode pipeline

use crate::core::constants::MIN_HEADER_STRING_LEN;
use crate::core::decode::decode;
use crate::core::error::Result;
use crate::core::format::{CaptureTimestamp, TimeSeries};
use crate::core::offset::{detect, DetectorConfig};
use crate::core::series::build;
use crate::core::timestamp::read_timestamp;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::bytes::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Result of decoding one in-memory file.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedLog {
    pub data_offset: usize,
    pub series: TimeSeries,
}

/// Runs the full pipeline over a file's bytes. Pure: the same input always
/// gives the same output.
pub fn decode_bytes(
    raw: &[u8],
    file_modified: DateTime<Utc>,
    config: &DetectorConfig,
) -> Result<DecodedLog> {
    let data_offset = detect(raw, config)?;
    let anchor = read_timestamp(&raw[..data_offset], file_modified);
    let readings = decode(raw, data_offset)?;

    Ok(DecodedLog {
        data_offset,
        series: build(readings, anchor),
    })
}

static HEADER_STRING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?-u)[ -~]{{{},}}", MIN_HEADER_STRING_LEN))
        .expect("Invalid regex pattern for header strings")
});

/// Printable ASCII runs of at least four bytes. Diagnostic only.
pub fn header_strings(header: &[u8]) -> Vec<String> {
    HEADER_STRING_REGEX
        .find_iter(header)
        .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
        .collect()
}

pub struct LbyReader {
    path: PathBuf,
    header: Vec<u8>,
    log: DecodedLog,
}

impl LbyReader {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, &DetectorConfig::default())
    }

    pub fn open_with<P: AsRef<Path>>(path: P, config: &DetectorConfig) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut data = fs::read(&path)?;
        let modified: DateTime<Utc> = fs::metadata(&path)?.modified()?.into();

        let log = decode_bytes(&data, modified, config)?;

        debug!(
            "{}: data offset {}, {} samples",
            path.display(),
            log.data_offset,
            log.series.len()
        );
        if !log.series.anchor.is_from_header() {
            warn!("{}: missing header timestamp, using mtime", path.display());
        }

        data.truncate(log.data_offset);

        Ok(Self {
            path,
            header: data,
            log,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data_offset(&self) -> usize {
        self.log.data_offset
    }

    pub fn timestamp(&self) -> CaptureTimestamp {
        self.log.series.anchor
    }

    pub fn series(&self) -> &TimeSeries {
        &self.log.series
    }

    pub fn into_series(self) -> TimeSeries {
        self.log.series
    }

    pub fn header_strings(&self) -> Vec<String> {
        header_strings(&self.header)
    }
}
