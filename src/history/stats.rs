//! History aggregation — summary numbers and daily trend for
//! `phishguard history` and the dashboard's activity card.

use std::collections::HashMap;

use serde::Serialize;

use crate::history::{self, ScanRecord};

// ---------------------------------------------------------------------------
// Aggregated summary
// ---------------------------------------------------------------------------

/// Summary over a window of scan records.
#[derive(Debug, Serialize)]
pub struct HistorySummary {
    pub total_scans: usize,
    pub phishing_count: usize,
    pub legitimate_count: usize,
    /// Share of scans classified phishing, in percent.
    pub phishing_rate_pct: f64,
    /// Mean reported confidence across all scans, in percent.
    pub avg_confidence_pct: f64,
    pub sources: SourceDistribution,
    pub daily: Vec<DailyTrend>,
}

/// Distribution across scan backends.
#[derive(Debug, Default, Serialize)]
pub struct SourceDistribution {
    pub api: usize,
    pub demo: usize,
}

impl SourceDistribution {
    pub fn total(&self) -> usize {
        self.api + self.demo
    }

    /// Percentage for a given backend, 0.0 when the window is empty.
    pub fn pct(&self, count: usize) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            (count as f64 / total as f64) * 100.0
        }
    }
}

/// A single day's scan counts.
#[derive(Debug, Clone, Serialize)]
pub struct DailyTrend {
    pub date: String,
    pub scans: usize,
    pub phishing: usize,
}

// ---------------------------------------------------------------------------
// Summary computation
// ---------------------------------------------------------------------------

/// Compute the history summary, optionally filtered to the last `days` days.
pub fn compute_summary(days: Option<u32>) -> HistorySummary {
    let records = history::read_records_since_days(days);
    build_summary(&records)
}

fn build_summary(records: &[ScanRecord]) -> HistorySummary {
    if records.is_empty() {
        return HistorySummary {
            total_scans: 0,
            phishing_count: 0,
            legitimate_count: 0,
            phishing_rate_pct: 0.0,
            avg_confidence_pct: 0.0,
            sources: SourceDistribution::default(),
            daily: Vec::new(),
        };
    }

    let total_scans = records.len();
    let phishing_count = records
        .iter()
        .filter(|r| r.classification == "phishing")
        .count();
    let legitimate_count = total_scans - phishing_count;

    let phishing_rate_pct = (phishing_count as f64 / total_scans as f64) * 100.0;
    let avg_confidence_pct =
        records.iter().map(|r| r.confidence).sum::<f64>() / total_scans as f64 * 100.0;

    let mut sources = SourceDistribution::default();
    for record in records {
        match record.source.as_str() {
            "api" => sources.api += 1,
            _ => sources.demo += 1,
        }
    }

    HistorySummary {
        total_scans,
        phishing_count,
        legitimate_count,
        phishing_rate_pct,
        avg_confidence_pct,
        sources,
        daily: compute_daily(records),
    }
}

/// Group records by date (YYYY-MM-DD), sorted ascending.
fn compute_daily(records: &[ScanRecord]) -> Vec<DailyTrend> {
    let mut daily: HashMap<String, Vec<&ScanRecord>> = HashMap::new();
    for record in records {
        // Date is the first 10 chars of the RFC 3339 timestamp.
        let date = record.timestamp.get(..10).unwrap_or("unknown").to_string();
        daily.entry(date).or_default().push(record);
    }

    let mut trends: Vec<DailyTrend> = daily
        .into_iter()
        .map(|(date, group)| DailyTrend {
            date,
            scans: group.len(),
            phishing: group
                .iter()
                .filter(|r| r.classification == "phishing")
                .count(),
        })
        .collect();

    trends.sort_by(|a, b| a.date.cmp(&b.date));

    trends
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
