/// Configuration schema and defaults for the entire phishguard system.
///
/// Defines the TOML-serializable configuration structure with all sections:
/// `[api]`, `[demo]`, `[logging]`, and `[web]`.
///
/// Every field has a sensible built-in default. Users only need to set the
/// values they want to override.
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level phishguard configuration.
///
/// Maps directly to the `~/.phishguard/config.toml` and `.phishguard.toml`
/// file schemas. All sections and fields are optional — missing values fall
/// back to built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    pub api: ApiConfig,
    pub demo: DemoConfig,
    pub logging: LoggingConfig,
    pub web: WebConfig,
}

// ---------------------------------------------------------------------------
// [api]
// ---------------------------------------------------------------------------

/// Prediction service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the prediction service (no trailing slash required).
    pub endpoint: String,
    /// Per-request timeout for `/predict` calls (seconds).
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:5000".to_string(),
            timeout_secs: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// [demo]
// ---------------------------------------------------------------------------

/// Offline demo simulator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Simulated analysis delay before a verdict is returned (milliseconds).
    /// Set to `0` for instant verdicts (useful in scripts and tests).
    pub delay_ms: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self { delay_ms: 1500 }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

/// Scan history logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Whether scan results are appended to `~/.phishguard/scan-log.jsonl`.
    pub enabled: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// ---------------------------------------------------------------------------
// [web]
// ---------------------------------------------------------------------------

/// Embedded dashboard server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Bind address for `phishguard web`.
    pub addr: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8642".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default TOML content
// ---------------------------------------------------------------------------

impl GuardConfig {
    /// Generate the annotated default TOML config file content.
    ///
    /// Used by `phishguard config init` to create a starting config file with
    /// all settings documented.
    pub fn default_toml() -> String {
        r#"# phishguard Configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (PHISHGUARD_*)
#   2. Project config (.phishguard.toml in the current directory or above)
#   3. User global config (~/.phishguard/config.toml)
#   4. Built-in defaults

[api]
endpoint = "http://localhost:5000"    # Prediction service base URL
timeout_secs = 10                     # Per-request timeout for /predict calls

[demo]
delay_ms = 1500                       # Simulated analysis delay (0 = instant)

[logging]
enabled = true                        # Append scans to ~/.phishguard/scan-log.jsonl

[web]
addr = "127.0.0.1:8642"               # Dashboard bind address
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
