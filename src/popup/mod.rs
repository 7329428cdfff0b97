//! Popup view-state machine.
//!
//! One popup session walks a five-view graph:
//!
//! ```text
//! Initial ──scan──▶ Loading ──success──▶ Result ◀──back── Details
//!                      │                   │  └──details──▶
//!                      └──failure──▶ Error │
//!                                      │   └──back──▶ Initial (cleared)
//!                                      └──back──▶ Initial (cleared)
//! ```
//!
//! `Initial` is the start view; there is no terminal view — the popup window
//! closes externally. Result and Details are reachable only through Loading,
//! and Details only while a result is stored.
//!
//! Triggers mirror the UI's buttons and are ignored when the current view
//! doesn't offer them (the scan button is disabled while loading, the details
//! button does nothing before a result arrives). Trigger methods return
//! whether the transition fired so drivers and tests can assert on it.
//!
//! The machine owns one `ScanResult` at most, held in memory for the session
//! and dropped when `back()` returns to `Initial`. Side effects are limited
//! to view switches plus the single outbound request [`Popup::run_scan`]
//! issues through its [`Scanner`].

use anyhow::Result;

use crate::api::ScanResult;

/// Views the popup can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Initial,
    Loading,
    Result,
    Details,
    Error,
}

/// Anything that can answer a scan request.
///
/// Implemented by the prediction API client (the real model) and by the demo
/// simulator (fake, for UI wiring) — the popup drives both identically.
pub trait Scanner {
    /// Short source tag for log lines and labels ("api" / "demo").
    fn source(&self) -> &'static str;

    /// Classify one URL.
    fn scan(&self, url: &str) -> Result<ScanResult>;
}

/// State for one popup session.
pub struct Popup {
    view: View,
    url: String,
    result: Option<ScanResult>,
    error: Option<String>,
}

impl Popup {
    /// Fresh session showing the initial view.
    pub fn new() -> Self {
        Self {
            view: View::Initial,
            url: String::new(),
            result: None,
            error: None,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// URL of the in-flight or completed scan.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Stored verdict, present in the Result and Details views.
    pub fn result(&self) -> Option<&ScanResult> {
        self.result.as_ref()
    }

    /// Stored failure message, present in the Error view.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // -- Triggers --

    /// Scan action: Initial → Loading.
    ///
    /// Refused outside Initial — at most one outstanding request per session,
    /// and a new scan only starts from a reset popup.
    pub fn start_scan(&mut self, url: &str) -> bool {
        if self.view != View::Initial {
            return false;
        }
        self.url = url.to_string();
        self.view = View::Loading;
        true
    }

    /// Prediction outcome: Loading → Result on success, Loading → Error on
    /// failure. The failure message is stored verbatim for display.
    pub fn finish_scan(&mut self, outcome: Result<ScanResult>) -> bool {
        if self.view != View::Loading {
            return false;
        }
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.error = None;
                self.view = View::Result;
            }
            Err(err) => {
                self.result = None;
                self.error = Some(err.to_string());
                self.view = View::Error;
            }
        }
        true
    }

    /// Details action: Result → Details, re-rendering the stored feature map.
    pub fn show_details(&mut self) -> bool {
        if self.view != View::Result || self.result.is_none() {
            return false;
        }
        self.view = View::Details;
        true
    }

    /// Back action. Details returns to Result with the verdict intact;
    /// Result and Error return to Initial and drop all session data.
    pub fn back(&mut self) -> bool {
        match self.view {
            View::Details => {
                self.view = View::Result;
                true
            }
            View::Result | View::Error => {
                self.reset();
                true
            }
            View::Initial | View::Loading => false,
        }
    }

    // -- Driver --

    /// Drive one full scan against a backend: Loading, then Result or Error.
    ///
    /// Returns the view reached. No retries and no cancellation — the request
    /// runs to completion or failure before the popup accepts another.
    pub fn run_scan(&mut self, scanner: &dyn Scanner, url: &str) -> View {
        if !self.start_scan(url) {
            return self.view;
        }
        let outcome = scanner.scan(&self.url);
        self.finish_scan(outcome);
        self.view
    }

    // -- Internal --

    fn reset(&mut self) {
        self.view = View::Initial;
        self.url.clear();
        self.result = None;
        self.error = None;
    }
}

impl Default for Popup {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Classification;
    use std::collections::BTreeMap;

    fn verdict(classification: Classification) -> ScanResult {
        let mut features = BTreeMap::new();
        features.insert("has_ip".to_string(), 1.0);
        ScanResult {
            classification,
            confidence: 0.9,
            features,
        }
    }

    /// Test backend returning a fixed outcome.
    struct FixedScanner(Option<ScanResult>);

    impl Scanner for FixedScanner {
        fn source(&self) -> &'static str {
            "fixed"
        }

        fn scan(&self, _url: &str) -> Result<ScanResult> {
            match &self.0 {
                Some(r) => Ok(r.clone()),
                None => anyhow::bail!("API request failed"),
            }
        }
    }

    // --- Happy path ---

    #[test]
    fn session_starts_at_initial() {
        let popup = Popup::new();
        assert_eq!(popup.view(), View::Initial);
        assert!(popup.result().is_none());
        assert!(popup.error_message().is_none());
    }

    #[test]
    fn scan_walks_initial_loading_result() {
        let mut popup = Popup::new();
        assert!(popup.start_scan("https://example.com"));
        assert_eq!(popup.view(), View::Loading);
        assert_eq!(popup.url(), "https://example.com");

        assert!(popup.finish_scan(Ok(verdict(Classification::Legitimate))));
        assert_eq!(popup.view(), View::Result);
        assert_eq!(
            popup.result().unwrap().classification,
            Classification::Legitimate
        );
    }

    #[test]
    fn details_round_trips_back_to_result() {
        let mut popup = Popup::new();
        popup.start_scan("https://example.com");
        popup.finish_scan(Ok(verdict(Classification::Phishing)));

        assert!(popup.show_details());
        assert_eq!(popup.view(), View::Details);

        assert!(popup.back());
        assert_eq!(popup.view(), View::Result);
        // The verdict survives the details round trip.
        assert!(popup.result().is_some());
    }

    #[test]
    fn back_from_result_clears_the_session() {
        let mut popup = Popup::new();
        popup.start_scan("https://example.com");
        popup.finish_scan(Ok(verdict(Classification::Legitimate)));

        assert!(popup.back());
        assert_eq!(popup.view(), View::Initial);
        assert!(popup.result().is_none());
        assert!(popup.url().is_empty());
    }

    // --- Failure path ---

    #[test]
    fn failed_scan_lands_in_error_with_message() {
        let mut popup = Popup::new();
        popup.start_scan("https://example.com");
        popup.finish_scan(Err(anyhow::anyhow!("API request failed")));

        assert_eq!(popup.view(), View::Error);
        let msg = popup.error_message().unwrap();
        assert!(!msg.is_empty());
        assert_eq!(msg, "API request failed");
        assert!(popup.result().is_none());
    }

    #[test]
    fn back_from_error_clears_the_session() {
        let mut popup = Popup::new();
        popup.start_scan("https://example.com");
        popup.finish_scan(Err(anyhow::anyhow!("boom")));

        assert!(popup.back());
        assert_eq!(popup.view(), View::Initial);
        assert!(popup.error_message().is_none());
    }

    // --- Guards ---

    #[test]
    fn result_is_unreachable_without_loading() {
        let mut popup = Popup::new();
        // A verdict arriving outside Loading is ignored.
        assert!(!popup.finish_scan(Ok(verdict(Classification::Legitimate))));
        assert_eq!(popup.view(), View::Initial);
        assert!(popup.result().is_none());
    }

    #[test]
    fn details_is_unreachable_without_a_result() {
        let mut popup = Popup::new();
        assert!(!popup.show_details());
        assert_eq!(popup.view(), View::Initial);

        popup.start_scan("https://example.com");
        assert!(!popup.show_details());
        assert_eq!(popup.view(), View::Loading);
    }

    #[test]
    fn scan_is_refused_while_loading() {
        let mut popup = Popup::new();
        popup.start_scan("https://a.example");
        assert!(!popup.start_scan("https://b.example"));
        // The in-flight URL is untouched.
        assert_eq!(popup.url(), "https://a.example");
    }

    #[test]
    fn back_has_no_effect_on_initial_or_loading() {
        let mut popup = Popup::new();
        assert!(!popup.back());

        popup.start_scan("https://example.com");
        assert!(!popup.back());
        assert_eq!(popup.view(), View::Loading);
    }

    // --- Driver ---

    #[test]
    fn run_scan_reaches_result_on_success() {
        let scanner = FixedScanner(Some(verdict(Classification::Phishing)));
        let mut popup = Popup::new();
        assert_eq!(popup.run_scan(&scanner, "https://example.com"), View::Result);
    }

    #[test]
    fn run_scan_reaches_error_on_failure() {
        let scanner = FixedScanner(None);
        let mut popup = Popup::new();
        assert_eq!(popup.run_scan(&scanner, "https://example.com"), View::Error);
        assert_eq!(popup.error_message(), Some("API request failed"));
    }

    #[test]
    fn run_scan_is_refused_outside_initial() {
        let scanner = FixedScanner(Some(verdict(Classification::Legitimate)));
        let mut popup = Popup::new();
        popup.run_scan(&scanner, "https://example.com");
        // Already showing Result — a second drive is ignored.
        assert_eq!(popup.run_scan(&scanner, "https://other.example"), View::Result);
        assert_eq!(popup.url(), "https://example.com");
    }
}
