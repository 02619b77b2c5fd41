//! Candle file loading.
//!
//! Two formats, chosen by extension:
//! - `.csv` with a `time,open,high,low,close` header. `time` is either an
//!   integer (used as is), an RFC 3339 timestamp, or a `YYYY-MM-DD` date;
//!   the last two become Unix seconds.
//! - `.json`: an array of `{time, open, high, low, close}` objects with
//!   integer times.
//!
//! Loading checks only the file shape. Price sanity is the engine's job.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use smclab_core::{Candle, DetectorConfig};
use std::path::Path;

/// One CSV row before the time column is interpreted.
#[derive(Debug, Deserialize)]
struct CsvRow {
    time: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

pub fn load_candles(path: &Path) -> Result<Vec<Candle>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let candles = match ext.as_deref() {
        Some("csv") => load_csv(path)?,
        Some("json") => load_json(path)?,
        _ => bail!(
            "unsupported candle file {}: expected a .csv or .json extension",
            path.display()
        ),
    };

    tracing::debug!(path = %path.display(), candles = candles.len(), "candles loaded");
    Ok(candles)
}

fn load_csv(path: &Path) -> Result<Vec<Candle>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open candle CSV {}", path.display()))?;

    let mut candles = Vec::new();
    for (i, row) in reader.deserialize::<CsvRow>().enumerate() {
        // Header is line 1.
        let line = i + 2;
        let row = row.with_context(|| format!("{}: bad row at line {line}", path.display()))?;
        let time = parse_time(&row.time)
            .with_context(|| format!("{}: bad time at line {line}", path.display()))?;
        candles.push(Candle::new(time, row.open, row.high, row.low, row.close));
    }
    Ok(candles)
}

fn load_json(path: &Path) -> Result<Vec<Candle>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read candle JSON {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse candle JSON {}", path.display()))
}

/// Integer, RFC 3339 timestamp, or calendar date (midnight UTC).
pub fn parse_time(raw: &str) -> Result<i64> {
    if let Ok(secs) = raw.parse::<i64>() {
        return Ok(secs);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.timestamp());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc().timestamp());
        }
    }
    bail!("'{raw}' is not an integer, RFC 3339 timestamp or YYYY-MM-DD date")
}

pub fn load_config(path: Option<&Path>) -> Result<DetectorConfig> {
    match path {
        Some(p) => DetectorConfig::from_file(p)
            .with_context(|| format!("Failed to load detector config {}", p.display())),
        None => Ok(DetectorConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_with_integer_times() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "c.csv",
            "time,open,high,low,close\n0,100,101,99,100.5\n60,100.5,102,100,101.5\n",
        );
        let candles = load_candles(&path).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[1], Candle::new(60, 100.5, 102.0, 100.0, 101.5));
    }

    #[test]
    fn csv_with_rfc3339_and_dates() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "c.csv",
            "time,open,high,low,close\n\
             2024-01-02,1,2,0.5,1.5\n\
             2024-01-02T00:01:00Z,1.5,2,1,1.8\n",
        );
        let candles = load_candles(&path).unwrap();
        assert_eq!(candles[0].time, 1_704_153_600);
        assert_eq!(candles[1].time, 1_704_153_660);
    }

    #[test]
    fn csv_bad_time_names_the_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "c.csv",
            "time,open,high,low,close\n0,1,2,0.5,1.5\nyesterday,1,2,0.5,1.5\n",
        );
        let err = load_candles(&path).unwrap_err();
        assert!(format!("{err:#}").contains("line 3"));
    }

    #[test]
    fn json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "c.json",
            r#"[{"time":0,"open":1.0,"high":2.0,"low":0.5,"close":1.5}]"#,
        );
        let candles = load_candles(&path).unwrap();
        assert_eq!(candles, vec![Candle::new(0, 1.0, 2.0, 0.5, 1.5)]);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "c.parquet", "");
        assert!(load_candles(&path).is_err());
    }

    #[test]
    fn missing_config_means_defaults() {
        assert_eq!(load_config(None).unwrap(), DetectorConfig::default());
    }

    #[test]
    fn config_file_overrides_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "d.toml", "swing_length = 8\ntrack_gap_fills = true\n");
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.swing_length, 8);
        assert!(config.track_gap_fills);
        assert_eq!(config.max_order_blocks, 10);
    }
}
