//! Demo scan simulator.
//!
//! Fabricates classifier verdicts from a handful of string heuristics so the
//! UI wiring (popup views, details table, web dashboard) can be exercised
//! without the real model or its API. Everything here is intentionally fake:
//! the token checks are a caricature of phishing signals, the confidence is
//! sampled from a classification-conditioned band, and half the feature map
//! is drawn from biased dice rather than measured. Simulator output is
//! labeled "demo"/"simulated" wherever it surfaces and must never be
//! mistaken for a real verdict.

use std::collections::BTreeMap;
use std::sync::LazyLock;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use rand::Rng;
use regex::Regex;

use crate::api::{Classification, ScanResult};
use crate::config::schema::DemoConfig;
use crate::popup::Scanner;

/// Dotted-quad pattern for spotting IP-literal hosts.
static IP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d+\.\d+\.\d+").expect("IP regex must compile"));

/// TLDs that phishing campaigns disproportionately register under.
const SUSPICIOUS_TLDS: &[&str] = &[".tk", ".ml", ".ga", ".cf", ".gq", ".top", ".xyz"];

/// Commonly impersonated brands. A host that mentions one of these without
/// being the brand's own domain counts as brand misuse.
const IMPERSONATED_BRANDS: &[&str] = &[
    "paypal",
    "apple",
    "microsoft",
    "amazon",
    "google",
    "facebook",
    "netflix",
];

// ---------------------------------------------------------------------------
// Heuristics (pure)
// ---------------------------------------------------------------------------

/// Decide the simulated classification for a URL.
///
/// Case-insensitive token pairs: "secure"+"login" or "verify"+"account"
/// anywhere in the URL, or a brand token ("paypal", "bank") appearing
/// outside its true domain. Deliberately crude — two words in a URL are not
/// phishing evidence, which is the point of calling this a simulator.
pub fn classify_url(url: &str) -> Classification {
    let u = url.to_lowercase();

    let suspicious = (u.contains("secure") && u.contains("login"))
        || (u.contains("verify") && u.contains("account"))
        || (u.contains("paypal") && !u.contains("paypal.com"))
        || (u.contains("bank") && !u.contains("bank.com"));

    if suspicious {
        Classification::Phishing
    } else {
        Classification::Legitimate
    }
}

/// Sample a confidence score for a simulated verdict.
///
/// Phishing draws from [0.70, 0.95), legitimate from [0.80, 0.99) — wide
/// enough to look alive in the UI, never low enough to look uncertain.
pub fn sample_confidence(classification: Classification) -> f64 {
    let r: f64 = rand::rng().random_range(0.0..1.0);
    match classification {
        Classification::Phishing => 0.70 + r * 0.25,
        Classification::Legitimate => 0.80 + r * 0.19,
    }
}

/// Network-location part of a URL: everything between the scheme separator
/// and the first path/query/fragment delimiter. Userinfo stays in (an `@` in
/// the authority is itself a phishing signal). URLs without a scheme have no
/// authority and yield `""`.
pub fn netloc(url: &str) -> &str {
    let Some(pos) = url.find("://") else {
        return "";
    };
    let rest = &url[pos + 3..];
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    &rest[..end]
}

/// Check a lowercased host for brand-impersonation patterns like
/// `paypal-secure.example` or `login.apple.verify.tk`.
fn brand_misuse(host: &str) -> bool {
    IMPERSONATED_BRANDS.iter().any(|brand| {
        host.contains(brand)
            && host != format!("{brand}.com")
            && !host.starts_with(&format!("www.{brand}."))
    })
}

fn flag(on: bool) -> f64 {
    if on { 1.0 } else { 0.0 }
}

/// Fabricate the 12-entry feature map for a simulated verdict.
///
/// String-shaped features are measured off the URL itself; the page- and
/// WHOIS-shaped ones (domain age, forms, iframes) are sampled from dice
/// biased by how shady the host looks, since the simulator never fetches
/// anything.
pub fn fabricate_features(url: &str) -> BTreeMap<String, f64> {
    let host = netloc(url).to_lowercase();
    let lower = url.to_lowercase();

    let has_ip = IP_RE.is_match(&host);
    let suspicious_tld = SUSPICIOUS_TLDS.iter().any(|tld| host.contains(tld));
    let prefix_suffix = brand_misuse(&host);
    let shady = has_ip || suspicious_tld || prefix_suffix;

    let mut rng = rand::rng();
    let mut features = BTreeMap::new();

    features.insert("url_length".to_string(), url.len() as f64);
    features.insert("domain_length".to_string(), host.len() as f64);
    features.insert("has_ip".to_string(), flag(has_ip));
    features.insert("has_at".to_string(), flag(url.contains('@')));
    features.insert(
        "redirects".to_string(),
        flag(lower.contains("redirect") || lower.contains("forward")),
    );
    features.insert("prefix_suffix".to_string(), flag(prefix_suffix));
    features.insert(
        "dots_count".to_string(),
        host.matches('.').count() as f64,
    );
    features.insert("suspicious_tld".to_string(), flag(suspicious_tld));
    features.insert(
        "has_https".to_string(),
        flag(lower.starts_with("https://")),
    );
    features.insert(
        "domain_age_days".to_string(),
        if shady {
            rng.random_range(1..=30) as f64
        } else {
            rng.random_range(100..=1000) as f64
        },
    );
    features.insert(
        "has_form".to_string(),
        flag(if shady {
            rng.random_range(0..4) > 0
        } else {
            rng.random_range(0..3) == 1
        }),
    );
    features.insert(
        "has_iframe".to_string(),
        flag(if shady {
            rng.random_range(0..3) > 0
        } else {
            rng.random_range(0..3) == 2
        }),
    );

    features
}

// ---------------------------------------------------------------------------
// Simulator
// ---------------------------------------------------------------------------

/// The fake classifier.
///
/// The delay reproduces the latency of a real round trip so the loading view
/// actually shows; tests set it to zero.
#[derive(Debug)]
pub struct DemoSimulator {
    delay: Duration,
}

impl DemoSimulator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Build a simulator from the resolved config.
    pub fn from_config(config: &DemoConfig) -> Self {
        Self::new(Duration::from_millis(config.delay_ms))
    }

    /// Produce a simulated verdict for a URL.
    ///
    /// Empty input is rejected up front — no delay, no sampling, no feature
    /// map — mirroring the demo form's validation.
    pub fn scan(&self, url: &str) -> Result<ScanResult> {
        if url.trim().is_empty() {
            anyhow::bail!("Please enter a URL");
        }

        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }

        let classification = classify_url(url);
        Ok(ScanResult {
            classification,
            confidence: sample_confidence(classification),
            features: fabricate_features(url),
        })
    }
}

impl Scanner for DemoSimulator {
    fn source(&self) -> &'static str {
        "demo"
    }

    fn scan(&self, url: &str) -> Result<ScanResult> {
        DemoSimulator::scan(self, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulator() -> DemoSimulator {
        DemoSimulator::new(Duration::ZERO)
    }

    // -----------------------------------------------------------------------
    // classify_url
    // -----------------------------------------------------------------------

    #[test]
    fn secure_login_pair_is_phishing() {
        assert_eq!(
            classify_url("http://secure-login.example"),
            Classification::Phishing
        );
    }

    #[test]
    fn verify_account_pair_is_phishing() {
        assert_eq!(
            classify_url("http://example.com/verify-your-account"),
            Classification::Phishing
        );
    }

    #[test]
    fn paypal_outside_its_domain_is_phishing() {
        assert_eq!(
            classify_url("http://paypal.account-check.example"),
            Classification::Phishing
        );
    }

    #[test]
    fn paypal_on_its_own_domain_is_legitimate() {
        assert_eq!(
            classify_url("https://www.paypal.com/signin"),
            Classification::Legitimate
        );
    }

    #[test]
    fn bank_token_outside_bank_domain_is_phishing() {
        assert_eq!(
            classify_url("http://bank-alert.example"),
            Classification::Phishing
        );
    }

    #[test]
    fn plain_site_is_legitimate() {
        assert_eq!(
            classify_url("https://example.com"),
            Classification::Legitimate
        );
        assert_eq!(
            classify_url("https://docs.rs/regex"),
            Classification::Legitimate
        );
    }

    #[test]
    fn token_match_is_case_insensitive() {
        assert_eq!(
            classify_url("HTTP://SECURE-LOGIN.EXAMPLE"),
            Classification::Phishing
        );
    }

    #[test]
    fn secure_without_login_is_not_enough() {
        assert_eq!(
            classify_url("https://secure.example.com"),
            Classification::Legitimate
        );
    }

    // -----------------------------------------------------------------------
    // sample_confidence
    // -----------------------------------------------------------------------

    #[test]
    fn phishing_confidence_stays_in_band() {
        for _ in 0..200 {
            let c = sample_confidence(Classification::Phishing);
            assert!((0.70..0.95).contains(&c), "out of band: {c}");
        }
    }

    #[test]
    fn legitimate_confidence_stays_in_band() {
        for _ in 0..200 {
            let c = sample_confidence(Classification::Legitimate);
            assert!((0.80..0.99).contains(&c), "out of band: {c}");
        }
    }

    // -----------------------------------------------------------------------
    // netloc
    // -----------------------------------------------------------------------

    #[test]
    fn netloc_strips_scheme_and_path() {
        assert_eq!(netloc("https://example.com/a/b?q=1"), "example.com");
        assert_eq!(netloc("http://example.com"), "example.com");
        assert_eq!(netloc("https://example.com#frag"), "example.com");
    }

    #[test]
    fn netloc_keeps_port_and_userinfo() {
        assert_eq!(netloc("http://localhost:5000/predict"), "localhost:5000");
        assert_eq!(netloc("http://user@evil.example/x"), "user@evil.example");
    }

    #[test]
    fn netloc_without_scheme_is_empty() {
        assert_eq!(netloc("example.com/path"), "");
        assert_eq!(netloc(""), "");
    }

    // -----------------------------------------------------------------------
    // fabricate_features
    // -----------------------------------------------------------------------

    #[test]
    fn features_cover_the_full_catalog() {
        let features = fabricate_features("https://example.com");
        let names: Vec<&str> = crate::features::FEATURES.iter().map(|d| d.name).collect();
        assert_eq!(features.len(), names.len());
        for name in names {
            assert!(features.contains_key(name), "missing {name}");
        }
    }

    #[test]
    fn string_features_are_measured() {
        let features = fabricate_features("https://example.com");
        assert_eq!(features["url_length"], 19.0);
        assert_eq!(features["domain_length"], 11.0);
        assert_eq!(features["dots_count"], 1.0);
        assert_eq!(features["has_https"], 1.0);
        assert_eq!(features["has_ip"], 0.0);
        assert_eq!(features["has_at"], 0.0);
        assert_eq!(features["suspicious_tld"], 0.0);
        assert_eq!(features["prefix_suffix"], 0.0);
    }

    #[test]
    fn ip_literal_host_is_flagged() {
        let features = fabricate_features("http://192.168.0.1/login");
        assert_eq!(features["has_ip"], 1.0);
        // Shady hosts sample a young domain age.
        let age = features["domain_age_days"];
        assert!((1.0..=30.0).contains(&age), "age out of range: {age}");
    }

    #[test]
    fn brand_and_tld_misuse_are_flagged() {
        let features = fabricate_features("http://paypal-secure.example.tk/verify");
        assert_eq!(features["prefix_suffix"], 1.0);
        assert_eq!(features["suspicious_tld"], 1.0);
        assert_eq!(features["has_https"], 0.0);
    }

    #[test]
    fn clean_host_samples_an_old_domain() {
        let features = fabricate_features("https://example.com");
        let age = features["domain_age_days"];
        assert!((100.0..=1000.0).contains(&age), "age out of range: {age}");
    }

    #[test]
    fn redirect_token_is_flagged() {
        let features = fabricate_features("http://example.com/redirect?to=x");
        assert_eq!(features["redirects"], 1.0);
    }

    // -----------------------------------------------------------------------
    // DemoSimulator
    // -----------------------------------------------------------------------

    #[test]
    fn empty_url_is_rejected_before_any_work() {
        let err = simulator().scan("").unwrap_err();
        assert_eq!(err.to_string(), "Please enter a URL");
        let err = simulator().scan("   ").unwrap_err();
        assert_eq!(err.to_string(), "Please enter a URL");
    }

    #[test]
    fn scan_produces_a_complete_simulated_verdict() {
        let result = simulator().scan("http://secure-login.example").unwrap();
        assert_eq!(result.classification, Classification::Phishing);
        assert!((0.70..0.95).contains(&result.confidence));
        assert_eq!(result.features.len(), 12);
    }

    #[test]
    fn scan_matches_the_pure_heuristic() {
        for url in [
            "https://example.com",
            "http://secure-login.example",
            "https://www.paypal.com",
            "http://bank-alert.example",
        ] {
            let result = simulator().scan(url).unwrap();
            assert_eq!(result.classification, classify_url(url), "url: {url}");
        }
    }
}
