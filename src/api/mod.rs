/// Prediction API client for the scan contract.
///
/// Talks to the external classifier service (by default at `localhost:5000`)
/// using the synchronous `ureq` HTTP client. Provides:
///
/// - **Scan**: `POST /predict` with `{url}`, returning the typed verdict.
/// - **Feature importance**: `GET /feature-importance`, the model's weights.
/// - **Health check**: probe the API's docs page to see whether it is up.
///
/// The model itself lives behind this contract — nothing in this crate
/// trains, loads, or evaluates it.
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::schema::ApiConfig;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Verdict classes the prediction API can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Legitimate,
    Phishing,
}

impl Classification {
    pub fn is_phishing(self) -> bool {
        matches!(self, Classification::Phishing)
    }

    /// Headline shown in the result view.
    pub fn title(self) -> &'static str {
        match self {
            Classification::Legitimate => "Website is Safe",
            Classification::Phishing => "Phishing Detected",
        }
    }

    /// One-line explanation under the headline.
    pub fn summary(self) -> &'static str {
        match self {
            Classification::Legitimate => "This website appears to be legitimate.",
            Classification::Phishing => {
                "This website shows signs of being a phishing attempt. Be careful!"
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Legitimate => "legitimate",
            Classification::Phishing => "phishing",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Response body from `POST /predict`.
///
/// Held in memory for the duration of one popup session and discarded when
/// the session ends — scans have no identity beyond their log line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// Wire field is `result`; "classification" everywhere else in the crate.
    #[serde(rename = "result")]
    pub classification: Classification,
    /// Model-reported probability of the predicted class, in [0, 1].
    pub confidence: f64,
    /// Named numeric signals backing the verdict, consumed only for display.
    pub features: BTreeMap<String, f64>,
}

impl ScanResult {
    /// Confidence as a whole percentage, the way both UIs render it.
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }
}

/// Request body for `POST /predict`.
#[derive(Debug, Serialize)]
struct ScanRequest<'a> {
    url: &'a str,
}

/// One entry of the `GET /feature-importance` array.
///
/// The API sends only `feature` and `importance`; the static dashboard data
/// carries a description as well, so the field defaults to empty on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportanceEntry {
    pub feature: String,
    pub importance: f64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// Error body the API attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiError {
    error: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Synchronous client for the prediction API.
///
/// Built from the resolved config and used for a single CLI invocation or
/// web-dashboard session; holds no connection state.
#[derive(Debug)]
pub struct PredictClient {
    base_url: String,
    timeout: Duration,
}

impl PredictClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Self {
        Self {
            base_url: endpoint.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// Build a client from the resolved config.
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(&config.endpoint, Duration::from_secs(config.timeout_secs))
    }

    /// Endpoint base URL, for logging and health reporting.
    pub fn endpoint(&self) -> &str {
        &self.base_url
    }

    /// Check whether the prediction API is reachable.
    ///
    /// Probes the docs page at `/` with a short timeout (5 s) so diagnostics
    /// don't stall when the service is down. Resolves `localhost` to
    /// `127.0.0.1` to avoid IPv6-first DNS delays on Windows.
    pub fn is_healthy(&self) -> bool {
        let url = format!("{}/", self.base_url);
        let url = url.replace("://localhost", "://127.0.0.1");
        ureq::get(&url)
            .timeout(Duration::from_secs(5))
            .call()
            .is_ok()
    }

    /// Submit a URL for classification and return the typed verdict.
    ///
    /// One outbound request per call, no retries: a failure surfaces to the
    /// caller verbatim and recovery is the user scanning again. An empty URL
    /// is rejected before any network traffic.
    pub fn scan(&self, target: &str) -> Result<ScanResult> {
        if target.trim().is_empty() {
            anyhow::bail!("scan URL is empty");
        }

        let url = format!("{}/predict", self.base_url);
        // On Windows, "localhost" may try IPv6 (::1) first, causing timeouts
        // when the API only binds to IPv4. Use 127.0.0.1 directly.
        let url = url.replace("://localhost", "://127.0.0.1");

        let body = ScanRequest { url: target };

        let resp = match ureq::post(&url).timeout(self.timeout).send_json(&body) {
            Ok(resp) => resp,
            Err(ureq::Error::Status(code, resp)) => {
                // The API reports failures as {"error": ..., "message": ...}.
                match resp.into_json::<ApiError>() {
                    Ok(detail) => {
                        anyhow::bail!("prediction API returned {code}: {}", detail.error)
                    }
                    Err(_) => anyhow::bail!("prediction API returned {code}"),
                }
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("prediction request to {} failed", self.base_url)
                });
            }
        };

        let parsed: ScanResult = resp
            .into_json()
            .context("failed to parse prediction response")?;

        Ok(parsed)
    }

    /// Fetch the model's feature-importance weights.
    ///
    /// The API answers 404 with an explanatory body when the data has not
    /// been generated yet; that explanation is surfaced in the error.
    pub fn feature_importance(&self) -> Result<Vec<ImportanceEntry>> {
        let url = format!("{}/feature-importance", self.base_url);
        let url = url.replace("://localhost", "://127.0.0.1");

        let resp = match ureq::get(&url).timeout(self.timeout).call() {
            Ok(resp) => resp,
            Err(ureq::Error::Status(code, resp)) => match resp.into_json::<ApiError>() {
                Ok(detail) => {
                    anyhow::bail!("feature importance unavailable ({code}): {}", detail.error)
                }
                Err(_) => anyhow::bail!("feature importance request returned {code}"),
            },
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("feature importance request to {} failed", self.base_url)
                });
            }
        };

        let parsed: Vec<ImportanceEntry> = resp
            .into_json()
            .context("failed to parse feature importance response")?;

        Ok(parsed)
    }
}

impl crate::popup::Scanner for PredictClient {
    fn source(&self) -> &'static str {
        "api"
    }

    fn scan(&self, url: &str) -> Result<ScanResult> {
        PredictClient::scan(self, url)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_from_default_config() {
        let config = ApiConfig::default();
        let client = PredictClient::from_config(&config);
        assert_eq!(client.base_url, "http://localhost:5000");
        assert_eq!(client.timeout, Duration::from_secs(10));
    }

    #[test]
    fn client_strips_trailing_slash() {
        let client = PredictClient::new("http://localhost:5000/", Duration::from_secs(5));
        assert_eq!(client.base_url, "http://localhost:5000");
        assert_eq!(client.endpoint(), "http://localhost:5000");
    }

    #[test]
    fn empty_url_is_rejected_without_network() {
        // No server is listening anywhere in these tests — an empty URL must
        // fail on the guard, not on a connection error.
        let client = PredictClient::new("http://localhost:1", Duration::from_secs(1));
        let err = client.scan("   ").unwrap_err();
        assert!(err.to_string().contains("empty"), "got: {err}");
    }

    #[test]
    fn classification_uses_wire_names() {
        let json = serde_json::to_string(&Classification::Phishing).unwrap();
        assert_eq!(json, "\"phishing\"");
        let back: Classification = serde_json::from_str("\"legitimate\"").unwrap();
        assert_eq!(back, Classification::Legitimate);
    }

    #[test]
    fn scan_result_parses_documented_payload() {
        let payload = r#"{
            "result": "legitimate",
            "confidence": 0.9234,
            "features": {"url_length": 22, "has_ip": 0, "has_https": 1}
        }"#;
        let result: ScanResult = serde_json::from_str(payload).unwrap();
        assert_eq!(result.classification, Classification::Legitimate);
        assert_eq!(result.confidence_percent(), 92);
        assert_eq!(result.features.len(), 3);
        assert_eq!(result.features["url_length"], 22.0);
    }

    #[test]
    fn scan_result_serializes_wire_field_names() {
        let result = ScanResult {
            classification: Classification::Phishing,
            confidence: 0.88,
            features: BTreeMap::new(),
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"result\":\"phishing\""), "got: {json}");
        assert!(json.contains("\"confidence\":0.88"));
    }

    #[test]
    fn importance_entry_parses_without_description() {
        let entry: ImportanceEntry =
            serde_json::from_str(r#"{"feature": "has_ip", "importance": 0.25}"#).unwrap();
        assert_eq!(entry.feature, "has_ip");
        assert_eq!(entry.importance, 0.25);
        assert!(entry.description.is_empty());
    }

    #[test]
    fn verdict_copy_matches_popup() {
        assert_eq!(Classification::Legitimate.title(), "Website is Safe");
        assert_eq!(Classification::Phishing.title(), "Phishing Detected");
        assert!(Classification::Phishing.summary().contains("Be careful"));
        assert_eq!(Classification::Phishing.to_string(), "phishing");
    }
}
