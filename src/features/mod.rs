//! Feature risk catalog for the scan details view.
//!
//! The prediction API reports a map of named numeric features alongside each
//! verdict. This module owns the static descriptor table that turns those raw
//! numbers into display rows: human-readable names, tooltip descriptions, and
//! a risk bucket derived from a per-feature threshold and polarity.
//!
//! Risk bucketing is a pure lookup with no error paths: a feature name the
//! catalog does not know simply renders unclassified (raw key, no color).

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// How a feature's numeric value relates to risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Larger values are more suspicious (e.g. `url_length`, `dots_count`).
    HigherIsWorse,
    /// Smaller values are more suspicious (e.g. `has_https`, `domain_age_days`).
    LowerIsWorse,
}

/// Risk bucket for a single feature value, used for row coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        };
        write!(f, "{s}")
    }
}

/// Static description of one model feature.
#[derive(Debug, Clone, Copy)]
pub struct FeatureDescriptor {
    /// Wire name, as it appears as a key in the `features` map.
    pub name: &'static str,
    /// Human-readable name for tables and the popup details view.
    pub display: &'static str,
    /// One-line tooltip description.
    pub description: &'static str,
    /// Risk threshold the value is compared against.
    pub threshold: f64,
    pub polarity: Polarity,
}

/// Every feature the prediction API reports, in its reporting order.
///
/// Boolean-shaped features (has_*) use a 0.5 threshold so that 0 and 1 land
/// cleanly on opposite sides. The two lower-is-worse entries flag the
/// *absence* of a protective signal (HTTPS, domain age).
pub const FEATURES: &[FeatureDescriptor] = &[
    FeatureDescriptor {
        name: "url_length",
        display: "URL Length",
        description: "Length of the URL",
        threshold: 75.0,
        polarity: Polarity::HigherIsWorse,
    },
    FeatureDescriptor {
        name: "domain_length",
        display: "Domain Length",
        description: "Length of the domain name",
        threshold: 30.0,
        polarity: Polarity::HigherIsWorse,
    },
    FeatureDescriptor {
        name: "has_ip",
        display: "Contains IP Address",
        description: "URL contains an IP address instead of domain name",
        threshold: 0.5,
        polarity: Polarity::HigherIsWorse,
    },
    FeatureDescriptor {
        name: "has_at",
        display: "Contains @ Symbol",
        description: "URL contains @ symbol",
        threshold: 0.5,
        polarity: Polarity::HigherIsWorse,
    },
    FeatureDescriptor {
        name: "redirects",
        display: "Contains Redirects",
        description: "URL contains redirect strings",
        threshold: 0.5,
        polarity: Polarity::HigherIsWorse,
    },
    FeatureDescriptor {
        name: "prefix_suffix",
        display: "Brand Name Misuse",
        description: "Domain contains brand name with suspicious prefix/suffix",
        threshold: 0.5,
        polarity: Polarity::HigherIsWorse,
    },
    FeatureDescriptor {
        name: "dots_count",
        display: "Number of Dots",
        description: "Number of dots in the URL",
        threshold: 3.0,
        polarity: Polarity::HigherIsWorse,
    },
    FeatureDescriptor {
        name: "suspicious_tld",
        display: "Suspicious TLD",
        description: "Domain uses suspicious top-level domain",
        threshold: 0.5,
        polarity: Polarity::HigherIsWorse,
    },
    FeatureDescriptor {
        name: "has_https",
        display: "Uses HTTPS",
        description: "Website uses secure HTTPS protocol",
        threshold: 0.5,
        polarity: Polarity::LowerIsWorse,
    },
    FeatureDescriptor {
        name: "domain_age_days",
        display: "Domain Age",
        description: "Age of the domain in days",
        threshold: 90.0,
        polarity: Polarity::LowerIsWorse,
    },
    FeatureDescriptor {
        name: "has_form",
        display: "Contains Forms",
        description: "Website contains forms to collect data",
        threshold: 0.5,
        polarity: Polarity::HigherIsWorse,
    },
    FeatureDescriptor {
        name: "has_iframe",
        display: "Contains iFrames",
        description: "Website uses iframes",
        threshold: 0.5,
        polarity: Polarity::HigherIsWorse,
    },
];

/// Look up the descriptor for a wire feature name.
pub fn descriptor(name: &str) -> Option<&'static FeatureDescriptor> {
    FEATURES.iter().find(|d| d.name == name)
}

/// Risk bucket for a value measured against a descriptor.
///
/// Higher-is-worse: high above the threshold, medium above 70% of it.
/// Lower-is-worse: high below the threshold, medium below 150% of it.
/// Comparisons are strict, so a value sitting exactly on the threshold is
/// never high.
pub fn risk_level(value: f64, desc: &FeatureDescriptor) -> RiskLevel {
    match desc.polarity {
        Polarity::HigherIsWorse => {
            if value > desc.threshold {
                RiskLevel::High
            } else if value > desc.threshold * 0.7 {
                RiskLevel::Medium
            } else {
                RiskLevel::Low
            }
        }
        Polarity::LowerIsWorse => {
            if value < desc.threshold {
                RiskLevel::High
            } else if value < desc.threshold * 1.5 {
                RiskLevel::Medium
            } else {
                RiskLevel::Low
            }
        }
    }
}

/// Classify a named feature value. `None` when the name is not in the
/// catalog — callers render those rows without a risk color.
pub fn classify(name: &str, value: f64) -> Option<RiskLevel> {
    descriptor(name).map(|d| risk_level(value, d))
}

/// Display name for a feature, falling back to the raw key for unknown names.
pub fn display_name(name: &str) -> &str {
    match descriptor(name) {
        Some(d) => d.display,
        None => name,
    }
}

/// One rendered row of the details view.
#[derive(Debug, Clone, Serialize)]
pub struct DetailRow {
    pub feature: String,
    pub display: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<RiskLevel>,
    pub description: String,
}

/// Turn a reported feature map into display rows.
///
/// Known features come first in catalog order (the order the API reports
/// them), then any names the catalog does not know, in map order, with no
/// risk bucket.
pub fn detail_rows(features: &BTreeMap<String, f64>) -> Vec<DetailRow> {
    let mut rows = Vec::with_capacity(features.len());

    for desc in FEATURES {
        if let Some(&value) = features.get(desc.name) {
            rows.push(DetailRow {
                feature: desc.name.to_string(),
                display: desc.display.to_string(),
                value,
                risk: Some(risk_level(value, desc)),
                description: desc.description.to_string(),
            });
        }
    }

    for (name, &value) in features {
        if descriptor(name).is_none() {
            rows.push(DetailRow {
                feature: name.clone(),
                display: name.clone(),
                value,
                risk: None,
                description: String::new(),
            });
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(name: &str) -> &'static FeatureDescriptor {
        descriptor(name).unwrap()
    }

    // --- Catalog shape ---

    #[test]
    fn catalog_has_twelve_features() {
        assert_eq!(FEATURES.len(), 12);
    }

    #[test]
    fn catalog_names_are_unique() {
        for (i, a) in FEATURES.iter().enumerate() {
            for b in &FEATURES[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn only_https_and_domain_age_are_lower_is_worse() {
        for d in FEATURES {
            let expected = matches!(d.name, "has_https" | "domain_age_days");
            assert_eq!(
                d.polarity == Polarity::LowerIsWorse,
                expected,
                "unexpected polarity for {}",
                d.name
            );
        }
    }

    // --- Higher-is-worse bucketing ---

    #[test]
    fn flag_feature_set_is_high_risk() {
        assert_eq!(risk_level(1.0, desc("has_ip")), RiskLevel::High);
        assert_eq!(risk_level(1.0, desc("has_at")), RiskLevel::High);
        assert_eq!(risk_level(1.0, desc("has_form")), RiskLevel::High);
    }

    #[test]
    fn flag_feature_clear_is_low_risk() {
        assert_eq!(risk_level(0.0, desc("has_ip")), RiskLevel::Low);
        assert_eq!(risk_level(0.0, desc("suspicious_tld")), RiskLevel::Low);
    }

    #[test]
    fn url_length_buckets() {
        assert_eq!(risk_level(80.0, desc("url_length")), RiskLevel::High);
        // 70% of 75 is 52.5 — between there and the threshold is medium
        assert_eq!(risk_level(60.0, desc("url_length")), RiskLevel::Medium);
        assert_eq!(risk_level(30.0, desc("url_length")), RiskLevel::Low);
    }

    #[test]
    fn value_on_threshold_is_not_high() {
        // Strict comparison: exactly 3 dots lands in medium, not high.
        assert_eq!(risk_level(3.0, desc("dots_count")), RiskLevel::Medium);
        assert_eq!(risk_level(4.0, desc("dots_count")), RiskLevel::High);
        assert_eq!(risk_level(2.0, desc("dots_count")), RiskLevel::Low);
    }

    // --- Lower-is-worse bucketing ---

    #[test]
    fn missing_https_is_high_risk() {
        assert_eq!(risk_level(0.0, desc("has_https")), RiskLevel::High);
        assert_eq!(risk_level(1.0, desc("has_https")), RiskLevel::Low);
    }

    #[test]
    fn domain_age_buckets() {
        assert_eq!(risk_level(30.0, desc("domain_age_days")), RiskLevel::High);
        // 90..135 days is the medium band (150% of the 90-day threshold)
        assert_eq!(risk_level(100.0, desc("domain_age_days")), RiskLevel::Medium);
        assert_eq!(risk_level(400.0, desc("domain_age_days")), RiskLevel::Low);
    }

    // --- Lookup fallbacks ---

    #[test]
    fn unknown_feature_is_unclassified() {
        assert_eq!(classify("entropy_score", 0.9), None);
        assert_eq!(display_name("entropy_score"), "entropy_score");
    }

    #[test]
    fn known_feature_classifies_by_name() {
        assert_eq!(classify("has_ip", 1.0), Some(RiskLevel::High));
        assert_eq!(classify("has_ip", 0.0), Some(RiskLevel::Low));
    }

    // --- Detail rows ---

    #[test]
    fn detail_rows_follow_catalog_order() {
        let mut map = BTreeMap::new();
        map.insert("has_https".to_string(), 1.0);
        map.insert("url_length".to_string(), 22.0);
        map.insert("has_ip".to_string(), 0.0);

        let rows = detail_rows(&map);
        let order: Vec<&str> = rows.iter().map(|r| r.feature.as_str()).collect();
        assert_eq!(order, vec!["url_length", "has_ip", "has_https"]);
    }

    #[test]
    fn unknown_features_render_after_known_ones() {
        let mut map = BTreeMap::new();
        map.insert("zz_custom".to_string(), 5.0);
        map.insert("has_ip".to_string(), 1.0);

        let rows = detail_rows(&map);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].feature, "has_ip");
        assert_eq!(rows[1].feature, "zz_custom");
        assert!(rows[1].risk.is_none());
        assert_eq!(rows[1].display, "zz_custom");
    }

    #[test]
    fn risk_serializes_lowercase() {
        let json = serde_json::to_string(&RiskLevel::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
    }
}
