//! Static dashboard data.
//!
//! The model-performance and feature-importance panels render fixed sample
//! numbers — a compiled-in snapshot of one evaluation run, no live
//! computation. Live importance data sits behind the API's
//! `/feature-importance` endpoint; these samples keep the dashboard and
//! `phishguard model` working when the API is absent.

use serde::Serialize;

use crate::api::ImportanceEntry;

// ---------------------------------------------------------------------------
// Sample evaluation run
// ---------------------------------------------------------------------------

/// Headline metrics from the sample evaluation run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ModelMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub false_positive_rate: f64,
    pub false_negative_rate: f64,
}

/// Confusion matrix of the sample evaluation run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ConfusionMatrix {
    pub true_positives: u32,
    pub true_negatives: u32,
    pub false_positives: u32,
    pub false_negatives: u32,
}

impl ConfusionMatrix {
    /// Number of test samples in the run.
    pub fn total(&self) -> u32 {
        self.true_positives + self.true_negatives + self.false_positives + self.false_negatives
    }

    /// Correctly classified samples.
    pub fn correct(&self) -> u32 {
        self.true_positives + self.true_negatives
    }
}

pub const SAMPLE_METRICS: ModelMetrics = ModelMetrics {
    accuracy: 0.94,
    precision: 0.92,
    recall: 0.95,
    f1_score: 0.93,
    false_positive_rate: 0.08,
    false_negative_rate: 0.05,
};

pub const SAMPLE_CONFUSION: ConfusionMatrix = ConfusionMatrix {
    true_positives: 47,
    true_negatives: 48,
    false_positives: 3,
    false_negatives: 2,
};

/// The ten-feature importance sample, strongest first.
pub fn sample_importance() -> Vec<ImportanceEntry> {
    fn entry(feature: &str, importance: f64, description: &str) -> ImportanceEntry {
        ImportanceEntry {
            feature: feature.to_string(),
            importance,
            description: description.to_string(),
        }
    }

    vec![
        entry(
            "has_ip",
            0.25,
            "URL contains an IP address instead of a domain name",
        ),
        entry("domain_age_days", 0.20, "Age of the domain in days"),
        entry(
            "has_form",
            0.15,
            "Website contains forms that could collect sensitive data",
        ),
        entry(
            "suspicious_tld",
            0.12,
            "Domain uses a suspicious top-level domain",
        ),
        entry("has_at", 0.08, "URL contains @ symbol"),
        entry(
            "prefix_suffix",
            0.07,
            "Domain contains hyphens or suspicious prefixes/suffixes",
        ),
        entry("dots_count", 0.05, "Number of dots in the URL"),
        entry("has_https", 0.04, "Website uses secure HTTPS protocol"),
        entry("redirects", 0.02, "URL contains redirect patterns"),
        entry(
            "has_iframe",
            0.02,
            "Website uses iframes that could hide malicious content",
        ),
    ]
}

/// Full static report for the Model panel and `phishguard model`.
#[derive(Debug, Clone, Serialize)]
pub struct ModelReport {
    pub metrics: ModelMetrics,
    pub confusion: ConfusionMatrix,
    pub importance: Vec<ImportanceEntry>,
}

pub fn sample_report() -> ModelReport {
    ModelReport {
        metrics: SAMPLE_METRICS,
        confusion: SAMPLE_CONFUSION,
        importance: sample_importance(),
    }
}
