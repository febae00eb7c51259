// CSV / JSON export of decoded force series

use crate::core::error::Result;
use crate::core::format::{CaptureTimestamp, ForceSample, TimeSeries};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

#[derive(Serialize)]
struct JsonExport<'a> {
    values: &'a [ForceSample],
}

/// Test number embedded in LBY file names, e.g. `HC0010.LBY`
static TEST_ID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)HC([0-9]+)").expect("Invalid regex pattern for test ids"));

/// Digits following `HC` in a file name (case-insensitive), or `0000`.
pub fn test_id(file_name: &str) -> String {
    TEST_ID_REGEX
        .captures(file_name)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "0000".to_string())
}

/// `YYYYMMDD-HHMMSS-<test id>.<ext>`
pub fn output_file_name(timestamp: &CaptureTimestamp, source: &Path, format: OutputFormat) -> String {
    let file_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    format!(
        "{}-{}.{}",
        timestamp.local_naive().format("%Y%m%d-%H%M%S"),
        test_id(&file_name),
        format.extension()
    )
}

pub fn write_csv<W: Write>(writer: W, series: &TimeSeries) -> Result<()> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(["time_s", "force_kN"])?;
    for sample in &series.samples {
        w.write_record([
            format!("{:.1}", sample.elapsed_s),
            format!("{:.3}", sample.force_kn),
        ])?;
    }
    w.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(writer: W, series: &TimeSeries) -> Result<()> {
    serde_json::to_writer_pretty(
        writer,
        &JsonExport {
            values: &series.samples,
        },
    )?;
    Ok(())
}

/// Earlier outputs for the same test: `*-<test id>.<ext>` in `output_dir`.
///
/// Output names carry the capture time, which can differ between runs when it
/// falls back to the file's mtime, so matching is by test id only. A missing
/// directory has no outputs.
pub fn existing_outputs(output_dir: &Path, source: &Path, format: OutputFormat) -> Result<Vec<PathBuf>> {
    let file_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = format!("-{}.{}", test_id(&file_name), format.extension());

    if !output_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    for entry in fs::read_dir(output_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() && entry.file_name().to_string_lossy().ends_with(&suffix) {
            found.push(entry.path());
        }
    }
    found.sort();
    Ok(found)
}

/// Writes `series` into `output_dir` under its conventional name and returns
/// the path written.
pub fn export(
    series: &TimeSeries,
    source: &Path,
    output_dir: &Path,
    format: OutputFormat,
) -> Result<PathBuf> {
    let path = output_dir.join(output_file_name(&series.anchor, source, format));
    let mut file = BufWriter::new(File::create(&path)?);

    match format {
        OutputFormat::Csv => write_csv(&mut file, series)?,
        OutputFormat::Json => write_json(&mut file, series)?,
    }
    file.flush()?;

    debug!("wrote {} samples to {}", series.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series() -> TimeSeries {
        let naive = NaiveDate::from_ymd_opt(2025, 9, 14)
            .unwrap()
            .and_hms_opt(13, 7, 0)
            .unwrap();
        TimeSeries {
            samples: vec![
                ForceSample { elapsed_s: 0.0, force_kn: 0.003 },
                ForceSample { elapsed_s: 0.5, force_kn: 12.3456 },
            ],
            anchor: CaptureTimestamp::Header(naive),
        }
    }

    #[test]
    fn test_test_id() {
        assert_eq!(test_id("HC0010.LBY"), "0010");
        assert_eq!(test_id("run_hc42.lby"), "42");
        assert_eq!(test_id("HCX_HC7.LBY"), "7");
        assert_eq!(test_id("recording.lby"), "0000");
        assert_eq!(test_id(""), "0000");
        assert_eq!(test_id("Hc0099-retest.LBY"), "0099");
    }

    #[test]
    fn test_output_file_name() {
        let s = series();
        let name = output_file_name(&s.anchor, Path::new("/data/HC0010.LBY"), OutputFormat::Csv);
        assert_eq!(name, "20250914-130700-0010.csv");

        let name = output_file_name(&s.anchor, Path::new("x.lby"), OutputFormat::Json);
        assert_eq!(name, "20250914-130700-0000.json");
    }

    #[test]
    fn test_write_csv() {
        let mut out = Vec::new();
        write_csv(&mut out, &series()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "time_s,force_kN\n0.0,0.003\n0.5,12.346\n"
        );
    }

    #[test]
    fn test_write_json_shape() {
        let mut out = Vec::new();
        write_json(&mut out, &series()).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let values = value["values"].as_array().unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[1]["time_s"], 0.5);
        assert_eq!(values[1]["force_kN"], 12.3456);
        assert_eq!(value.as_object().unwrap().len(), 1);
    }

    #[test]
    fn test_existing_outputs_match_test_id() {
        let dir = tempfile::tempdir().unwrap();
        let source = Path::new("/data/HC0010.LBY");

        for name in [
            "20250914-130700-0010.csv",
            "20240101-000000-0010.csv",
            "20250914-130700-0010.json",
            "20250914-130700-10010.csv",
            "20250914-130700-0011.csv",
        ] {
            fs::write(dir.path().join(name), "").unwrap();
        }

        let found = existing_outputs(dir.path(), source, OutputFormat::Csv).unwrap();
        let names: Vec<String> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["20240101-000000-0010.csv", "20250914-130700-0010.csv"]);

        let json = existing_outputs(dir.path(), source, OutputFormat::Json).unwrap();
        assert_eq!(json.len(), 1);

        let missing = dir.path().join("not-there");
        assert!(existing_outputs(&missing, source, OutputFormat::Csv).unwrap().is_empty());
    }

    #[test]
    fn test_format_serde() {
        let f: OutputFormat = serde_json::from_str(r#""json""#).unwrap();
        assert_eq!(f, OutputFormat::Json);
        assert_eq!(OutputFormat::default().extension(), "csv");
    }
}
