use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::api::ScanResult;

pub mod stats;

// ---------------------------------------------------------------------------
// Scan record (JSONL history)
// ---------------------------------------------------------------------------

/// A single entry in the scan log (`~/.phishguard/scan-log.jsonl`).
///
/// One line per completed scan, whether answered by the prediction API or
/// the demo simulator. Read back by `phishguard history` and the dashboard's
/// activity card. The popup session itself keeps nothing — this log is the
/// only thing that outlives it, and it can be switched off in config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRecord {
    pub timestamp: String,
    pub url: String,
    /// `"legitimate"` or `"phishing"`.
    pub classification: String,
    pub confidence: f64,
    /// Scan backend: `"api"` or `"demo"`.
    #[serde(default)]
    pub source: String,
    /// Wall-clock time for the scan in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub duration_ms: Option<u64>,
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Append a completed scan to the log.
///
/// Best-effort: logging failures never fail the scan that produced them.
pub fn log_scan(url: &str, result: &ScanResult, source: &str, duration_ms: Option<u64>) {
    let record = ScanRecord {
        timestamp: Utc::now().to_rfc3339(),
        url: url.to_string(),
        classification: result.classification.to_string(),
        confidence: result.confidence,
        source: source.to_string(),
        duration_ms,
    };

    let _ = append_record(&record);
}

// ---------------------------------------------------------------------------
// Reading records
// ---------------------------------------------------------------------------

/// Read all scan records from `~/.phishguard/scan-log.jsonl`.
///
/// Silently skips malformed lines. Returns an empty vec if the file does not
/// exist or cannot be read.
pub fn read_all_records() -> Vec<ScanRecord> {
    let Some(path) = scan_log_path() else {
        return Vec::new();
    };

    let Ok(file) = fs::File::open(path) else {
        return Vec::new();
    };

    let reader = BufReader::new(file);
    reader
        .lines()
        .map_while(Result::ok)
        .filter_map(|line| serde_json::from_str::<ScanRecord>(&line).ok())
        .collect()
}

/// Read scan records filtered to a time window (last N days).
///
/// If `days` is `None`, returns all records.
pub fn read_records_since_days(days: Option<u32>) -> Vec<ScanRecord> {
    let records = read_all_records();

    let Some(days) = days else {
        return records;
    };

    let cutoff = Utc::now() - chrono::Duration::days(i64::from(days));
    let cutoff_str = cutoff.to_rfc3339();

    records
        .into_iter()
        .filter(|r| r.timestamp >= cutoff_str)
        .collect()
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

fn append_record(record: &ScanRecord) -> Result<()> {
    let Some(path) = scan_log_path() else {
        return Ok(());
    };

    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(record)?;
    writeln!(file, "{json}")?;

    Ok(())
}

/// Return the path to the scan log file.
pub fn scan_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".phishguard").join("scan-log.jsonl"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_round_trips_through_jsonl() {
        let record = ScanRecord {
            timestamp: "2025-06-01T12:00:00+00:00".to_string(),
            url: "https://example.com".to_string(),
            classification: "legitimate".to_string(),
            confidence: 0.91,
            source: "api".to_string(),
            duration_ms: Some(240),
        };

        let line = serde_json::to_string(&record).unwrap();
        let back: ScanRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(back.url, record.url);
        assert_eq!(back.classification, "legitimate");
        assert_eq!(back.duration_ms, Some(240));
    }

    #[test]
    fn record_tolerates_missing_optional_fields() {
        // Lines written by older builds lack source/duration.
        let line = r#"{"timestamp":"2025-06-01T12:00:00+00:00","url":"https://a.example","classification":"phishing","confidence":0.8}"#;
        let record: ScanRecord = serde_json::from_str(line).unwrap();
        assert_eq!(record.source, "");
        assert_eq!(record.duration_ms, None);
    }

    #[test]
    fn duration_is_omitted_when_absent() {
        let record = ScanRecord {
            timestamp: "2025-06-01T12:00:00+00:00".to_string(),
            url: "https://example.com".to_string(),
            classification: "legitimate".to_string(),
            confidence: 0.91,
            source: "demo".to_string(),
            duration_ms: None,
        };
        let line = serde_json::to_string(&record).unwrap();
        assert!(!line.contains("duration_ms"));
    }
}
