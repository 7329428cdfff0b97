//! JSON API handlers for the web dashboard.
//!
//! One handler per endpoint, each returning a [`Reply`]. The scan endpoint
//! runs the demo simulator server-side, so the dashboard works with no
//! prediction API running; every verdict it returns is labeled simulated.

use std::collections::BTreeMap;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::api::PredictClient;
use crate::config;
use crate::demo::DemoSimulator;
use crate::history::{self, stats};
use crate::report;

use super::{Reply, json_reply};

// ---------------------------------------------------------------------------
// JSON request/response types
// ---------------------------------------------------------------------------

/// Scan request body — same shape the prediction API itself accepts.
#[derive(serde::Deserialize)]
struct ScanRequest {
    #[serde(default)]
    url: String,
}

/// Scan API response — the simulator verdict plus its provenance label.
#[derive(Serialize)]
struct ScanResponse {
    result: String,
    confidence: f64,
    confidence_pct: u32,
    features: BTreeMap<String, f64>,
    source: &'static str,
    simulated: bool,
}

/// Health API response.
#[derive(Serialize)]
struct HealthResponse {
    endpoint: String,
    api_reachable: bool,
    logging_enabled: bool,
    config_exists: bool,
    log_exists: bool,
    log_records: usize,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Serialize `data` into a JSON reply with the given status code.
fn json_with_status<T: Serialize>(data: &T, status: u16) -> Result<Reply> {
    let body = serde_json::to_string(data).context("failed to serialize JSON response")?;
    Ok(json_reply(status, body))
}

/// Serialize `data` into a 200 JSON reply.
fn json_response<T: Serialize>(data: &T) -> Result<Reply> {
    json_with_status(data, 200)
}

/// 400 reply matching the prediction API's own missing-URL error shape.
fn missing_url() -> Result<Reply> {
    let body = serde_json::json!({
        "error": "Missing URL parameter",
        "example": { "url": "https://example.com" },
    });
    json_with_status(&body, 400)
}

/// Parse the `?days=N` query parameter from a URL.
fn parse_days_param(url: &str) -> Option<u32> {
    url.split('?').nth(1)?.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        if k == "days" { v.parse().ok() } else { None }
    })
}

// ---------------------------------------------------------------------------
// API Handlers
// ---------------------------------------------------------------------------

/// `POST /api/scan` — run the demo simulator against a URL.
///
/// Expects JSON body: `{ "url": "https://example.com" }`. An absent or
/// empty URL gets a 400 with the same error body the prediction API sends.
pub fn post_scan(body: &str) -> Result<Reply> {
    let Ok(req) = serde_json::from_str::<ScanRequest>(body) else {
        return missing_url();
    };
    if req.url.trim().is_empty() {
        return missing_url();
    }

    let cfg = config::load();
    let simulator = DemoSimulator::from_config(&cfg.demo);

    let started = Instant::now();
    let verdict = simulator.scan(&req.url)?;

    if cfg.logging.enabled {
        history::log_scan(
            &req.url,
            &verdict,
            "demo",
            Some(started.elapsed().as_millis() as u64),
        );
    }

    let resp = ScanResponse {
        result: verdict.classification.as_str().to_string(),
        confidence: verdict.confidence,
        confidence_pct: verdict.confidence_percent(),
        features: verdict.features,
        source: "demo",
        simulated: true,
    };

    json_response(&resp)
}

/// `GET /api/model` — static model performance report.
pub fn get_model() -> Result<Reply> {
    json_response(&report::sample_report())
}

/// `GET /api/importance` — static feature importance ranking.
pub fn get_importance() -> Result<Reply> {
    json_response(&report::sample_importance())
}

/// `GET /api/history?days=N` — scan log summary.
pub fn get_history(url: &str) -> Result<Reply> {
    let days = parse_days_param(url);
    json_response(&stats::compute_summary(days))
}

/// `GET /api/health` — environment health summary.
///
/// Probes the configured prediction API, so this call can take a few
/// seconds when the API is down.
pub fn get_health() -> Result<Reply> {
    let cfg = config::load();
    let client = PredictClient::from_config(&cfg.api);

    let config_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);

    let log_exists = history::scan_log_path().map(|p| p.exists()).unwrap_or(false);

    let resp = HealthResponse {
        endpoint: client.endpoint().to_string(),
        api_reachable: client.is_healthy(),
        logging_enabled: cfg.logging.enabled,
        config_exists,
        log_exists,
        log_records: history::read_all_records().len(),
    };

    json_response(&resp)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_days_param_extracts_value() {
        assert_eq!(parse_days_param("/api/history?days=7"), Some(7));
        assert_eq!(parse_days_param("/api/history?days=30"), Some(30));
        assert_eq!(parse_days_param("/api/history?foo=bar&days=14"), Some(14));
    }

    #[test]
    fn parse_days_param_returns_none_for_missing() {
        assert_eq!(parse_days_param("/api/history"), None);
        assert_eq!(parse_days_param("/api/history?foo=bar"), None);
    }

    #[test]
    fn parse_days_param_returns_none_for_invalid() {
        assert_eq!(parse_days_param("/api/history?days=abc"), None);
        assert_eq!(parse_days_param("/api/history?days="), None);
    }

    #[test]
    fn scan_request_deserializes() {
        let req: ScanRequest = serde_json::from_str(r#"{"url": "https://example.com"}"#).unwrap();
        assert_eq!(req.url, "https://example.com");
    }

    #[test]
    fn scan_request_tolerates_missing_url() {
        let req: ScanRequest = serde_json::from_str("{}").unwrap();
        assert!(req.url.is_empty());
    }

    #[test]
    fn scan_response_is_labeled_simulated() {
        let resp = ScanResponse {
            result: "phishing".to_string(),
            confidence: 0.87,
            confidence_pct: 87,
            features: BTreeMap::new(),
            source: "demo",
            simulated: true,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"simulated\":true"));
        assert!(json.contains("\"source\":\"demo\""));
        assert!(json.contains("\"result\":\"phishing\""));
    }

    #[test]
    fn missing_url_is_a_400() {
        let resp = missing_url().unwrap();
        assert_eq!(resp.status_code().0, 400);
    }

    #[test]
    fn empty_url_gets_the_400() {
        let resp = post_scan(r#"{"url": "   "}"#).unwrap();
        assert_eq!(resp.status_code().0, 400);
    }

    #[test]
    fn malformed_body_gets_the_400() {
        let resp = post_scan("not json").unwrap();
        assert_eq!(resp.status_code().0, 400);
    }

    #[test]
    fn health_response_serializes() {
        let resp = HealthResponse {
            endpoint: "http://localhost:5000".to_string(),
            api_reachable: false,
            logging_enabled: true,
            config_exists: true,
            log_exists: false,
            log_records: 0,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"api_reachable\":false"));
        assert!(json.contains("\"endpoint\":\"http://localhost:5000\""));
    }
}
