//! CLI command implementations for phishguard scans and dashboards.
//!
//! Provides subcommand handlers for:
//! - `phishguard scan [URL]` — drive a popup session against the prediction API
//! - `phishguard demo <URL>` — drive the same session against the offline simulator
//! - `phishguard features [--live]` — feature risk catalog / live importance
//! - `phishguard model` — static model performance report
//! - `phishguard history --days N` — scan log summary and trend
//! - `phishguard health` — config, API and scan-log diagnostics
//! - `phishguard config show|init|set|reset` — configuration management

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::api::{PredictClient, ScanResult};
use crate::config;
use crate::demo::DemoSimulator;
use crate::features::{self, Polarity, RiskLevel};
use crate::history;
use crate::history::stats::{self, HistorySummary};
use crate::popup::{Popup, Scanner, View};
use crate::report;
use crate::tracker::UrlResponse;

/// Output format for history output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

// ---------------------------------------------------------------------------
// phishguard scan / demo
// ---------------------------------------------------------------------------

/// Run a live scan against the prediction API.
///
/// With no URL argument, reads one `{"url": "..."}` line from stdin — the
/// tracker's reply shape — so a tracker answer pipes straight into a scan.
pub fn run_scan(url: Option<&str>, details: bool, api: Option<&str>) -> Result<()> {
    let cfg = config::load();
    let client = api_client(&cfg, api);

    let url = match url {
        Some(u) => u.to_string(),
        None => read_url_from_stdin()?,
    };

    drive_scan(&client, &url, details, cfg.logging.enabled)
}

/// Run the offline demo simulator against a URL.
pub fn run_demo(url: &str, details: bool) -> Result<()> {
    let cfg = config::load();
    let simulator = DemoSimulator::from_config(&cfg.demo);
    drive_scan(&simulator, url, details, cfg.logging.enabled)
}

/// Read the tracker's `{"url": "..."}` reply shape from stdin.
fn read_url_from_stdin() -> Result<String> {
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("failed to read URL from stdin")?;
    let reply: UrlResponse = serde_json::from_str(line.trim())
        .context(r#"expected a {"url": "..."} line on stdin"#)?;
    Ok(reply.url)
}

/// Drive one popup session against a backend and render the view it lands in.
///
/// A session that ends in the Error view exits with code 1 so scripted scans
/// can branch on the outcome.
fn drive_scan(scanner: &dyn Scanner, url: &str, details: bool, log_enabled: bool) -> Result<()> {
    if scanner.source() == "demo" {
        println!(
            "{}",
            "SIMULATED — demo classifier, not the real model"
                .yellow()
                .bold()
        );
    }
    println!(
        "{} {}",
        "Scanning:".bold(),
        if url.is_empty() { "(no URL)" } else { url }
    );

    let mut popup = Popup::new();
    let started = Instant::now();
    let view = popup.run_scan(scanner, url);
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match view {
        View::Result => {
            let result = popup
                .result()
                .cloned()
                .context("result view without a stored verdict")?;
            render_verdict(&result, url, scanner.source());
            if log_enabled {
                history::log_scan(url, &result, scanner.source(), Some(elapsed_ms));
            }
            if details && popup.show_details() {
                render_details(&result);
            }
            Ok(())
        }
        View::Error => {
            let message = popup.error_message().unwrap_or("scan failed");
            println!();
            println!(
                "{} {}",
                "✗".red().bold(),
                "Failed to scan website".red().bold()
            );
            println!("  {message}");
            println!(
                "  {}",
                "Run `phishguard health` to check the prediction API.".dimmed()
            );
            std::process::exit(1);
        }
        // run_scan on a fresh popup only lands in Result or Error
        View::Initial | View::Loading | View::Details => Ok(()),
    }
}

fn render_verdict(result: &ScanResult, url: &str, source: &str) {
    println!();
    if result.classification.is_phishing() {
        println!(
            "{} {}",
            "⚠".red().bold(),
            result.classification.title().red().bold()
        );
    } else {
        println!(
            "{} {}",
            "✓".green().bold(),
            result.classification.title().green().bold()
        );
    }
    println!("  {}", result.classification.summary());
    println!();
    println!("  {} {}", "URL:       ".bold(), url);
    println!(
        "  {} {}%",
        "Confidence:".bold(),
        result.confidence_percent()
    );
    println!("  {} {}", "Source:    ".bold(), source_label(source));
}

fn source_label(source: &str) -> &'static str {
    match source {
        "api" => "prediction API",
        "demo" => "demo simulator (fake verdict)",
        _ => "unknown backend",
    }
}

fn render_details(result: &ScanResult) {
    let rows = features::detail_rows(&result.features);
    if rows.is_empty() {
        println!();
        println!("  {}", "No feature data reported for this scan.".dimmed());
        return;
    }

    println!();
    println!("{}", "Feature Breakdown".bold().cyan());
    println!("  {:<22} {:>10}  Risk", "Feature", "Value");
    println!("  {}", "-".repeat(44));

    for row in &rows {
        let risk = match row.risk {
            Some(level) => risk_colored(level),
            None => "—".normal(),
        };
        println!(
            "  {:<22} {:>10}  {}",
            truncate(&row.display, 22),
            fmt_value(row.value),
            risk,
        );
    }
}

// ---------------------------------------------------------------------------
// phishguard features
// ---------------------------------------------------------------------------

/// Print the feature risk catalog, or live importance data with `--live`.
pub fn run_features(live: bool, api: Option<&str>) -> Result<()> {
    if live {
        return run_features_live(api);
    }

    println!("{}", "PhishGuard Feature Risk Catalog".bold().cyan());
    println!("{}", "=".repeat(72));
    println!(
        "  {:<22} {:<16} {:>9}  Direction",
        "Feature", "Key", "Threshold"
    );
    println!("  {}", "-".repeat(70));

    for desc in features::FEATURES {
        let direction = match desc.polarity {
            Polarity::HigherIsWorse => "higher is riskier",
            Polarity::LowerIsWorse => "lower is riskier",
        };
        println!(
            "  {:<22} {:<16} {:>9}  {}",
            desc.display,
            desc.name,
            fmt_value(desc.threshold),
            direction,
        );
        println!("    {}", desc.description.dimmed());
    }

    Ok(())
}

/// Fetch and render live importance data from `GET /feature-importance`.
fn run_features_live(api: Option<&str>) -> Result<()> {
    let cfg = config::load();
    let client = api_client(&cfg, api);
    let entries = client
        .feature_importance()
        .context("failed to fetch live feature importance")?;

    println!("{}", "Live Feature Importance".bold().cyan());
    println!("{}", "=".repeat(60));
    println!("  {}", format!("source: {}", client.endpoint()).dimmed());
    println!();

    for entry in &entries {
        println!(
            "  {:<22} {:>5.1}%  {}",
            truncate(features::display_name(&entry.feature), 22),
            entry.importance * 100.0,
            bar(entry.importance).cyan(),
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// phishguard model
// ---------------------------------------------------------------------------

/// Print the static model performance report.
pub fn run_model() -> Result<()> {
    let report = report::sample_report();

    println!("{}", "PhishGuard Model Performance".bold().cyan());
    println!("{}", "=".repeat(60));
    println!(
        "  {}",
        "Static sample data from the bundled evaluation run — not live.".dimmed()
    );
    println!();

    let m = &report.metrics;
    println!("  {} {:>5.1}%", "Accuracy: ".bold(), m.accuracy * 100.0);
    println!("  {} {:>5.1}%", "Precision:".bold(), m.precision * 100.0);
    println!("  {} {:>5.1}%", "Recall:   ".bold(), m.recall * 100.0);
    println!("  {} {:>5.1}%", "F1 score: ".bold(), m.f1_score * 100.0);
    println!(
        "  False positive rate: {:.0}%   False negative rate: {:.0}%",
        m.false_positive_rate * 100.0,
        m.false_negative_rate * 100.0,
    );
    println!();

    let c = &report.confusion;
    println!(
        "{}",
        format!("Confusion Matrix — {} samples", c.total())
            .bold()
            .cyan()
    );
    println!("  {:<18} {}", "", "Predicted".dimmed());
    println!("  {:<18} {:>10} {:>12}", "", "Phishing", "Legitimate");
    println!("  {}", "-".repeat(42));
    println!(
        "  {:<18} {:>10} {:>12}",
        "Actual phishing", c.true_positives, c.false_negatives,
    );
    println!(
        "  {:<18} {:>10} {:>12}",
        "Actual legitimate", c.false_positives, c.true_negatives,
    );
    println!();

    println!("{}", "Feature Importance".bold().cyan());
    for entry in &report.importance {
        println!(
            "  {:<22} {:>5.1}%  {}",
            truncate(features::display_name(&entry.feature), 22),
            entry.importance * 100.0,
            bar(entry.importance).cyan(),
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// phishguard history
// ---------------------------------------------------------------------------

/// Summarize the local scan log.
pub fn run_history(format: OutputFormat, days: Option<u32>) -> Result<()> {
    let summary = stats::compute_summary(days);

    if summary.total_scans == 0 {
        println!(
            "{}",
            "No scans logged yet. Run `phishguard scan` or `phishguard demo` first.".yellow()
        );
        return Ok(());
    }

    match format {
        OutputFormat::Json => print_history_json(&summary)?,
        OutputFormat::Csv => print_history_csv(&summary),
        OutputFormat::Table => print_history_table(&summary, days),
    }

    Ok(())
}

fn print_history_table(summary: &HistorySummary, days: Option<u32>) {
    let title = match days {
        Some(days) => format!("PhishGuard Scan History — Last {days} Days"),
        None => "PhishGuard Scan History".to_string(),
    };
    println!("{}", title.bold().cyan());
    println!("{}", "=".repeat(60));
    println!();

    println!("  {} {}", "Total scans:   ".bold(), summary.total_scans);
    println!(
        "  {} {} ({:.1}%)",
        "Phishing:      ".bold(),
        summary.phishing_count,
        summary.phishing_rate_pct,
    );
    println!("  {} {}", "Legitimate:    ".bold(), summary.legitimate_count);
    println!(
        "  {} {:.1}%",
        "Avg confidence:".bold(),
        summary.avg_confidence_pct
    );
    println!();

    let sources = &summary.sources;
    println!("{}", "Scan Sources".bold().cyan());
    println!(
        "  API: {} ({:.0}%)  Demo: {} ({:.0}%)",
        sources.api,
        sources.pct(sources.api),
        sources.demo,
        sources.pct(sources.demo),
    );
    println!();

    if !summary.daily.is_empty() {
        println!("{}", "Daily Trend".bold().cyan());
        println!("  {:<12} {:>8} {:>10}", "Date", "Scans", "Phishing");
        println!("  {}", "-".repeat(32));
        for day in &summary.daily {
            println!("  {:<12} {:>8} {:>10}", day.date, day.scans, day.phishing);
        }
        println!();
    }

    // Most recent entries, newest first
    let mut records = history::read_records_since_days(days);
    records.reverse();
    if !records.is_empty() {
        println!("{}", "Recent Scans".bold().cyan());
        for record in records.iter().take(10) {
            let when = record.timestamp.get(..19).unwrap_or(&record.timestamp);
            let verdict = format!("{:<10}", record.classification);
            let verdict = if record.classification == "phishing" {
                verdict.red()
            } else {
                verdict.green()
            };
            println!(
                "  {:<20} {} {:>3.0}%  {}",
                when,
                verdict,
                record.confidence * 100.0,
                truncate(&record.url, 40),
            );
        }
    }
}

fn print_history_json(summary: &HistorySummary) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

fn print_history_csv(summary: &HistorySummary) {
    println!("date,scans,phishing");
    for day in &summary.daily {
        println!("{},{},{}", day.date, day.scans, day.phishing);
    }
}

// ---------------------------------------------------------------------------
// phishguard health
// ---------------------------------------------------------------------------

/// Check system health: config files, prediction API, scan log.
///
/// Exits with code 1 when the prediction API is unreachable.
pub fn run_health(api: Option<&str>) -> Result<()> {
    println!("{}", "PhishGuard Health Check".bold().cyan());
    println!("{}", "=".repeat(40));

    // Config file status
    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project = config::project_config_file();
    print_health_item(
        "Global config",
        global_exists,
        if global_exists {
            "~/.phishguard/config.toml found"
        } else {
            "not found (run `phishguard config init` to create)"
        },
    );
    print_health_item(
        "Project config",
        project.is_some(),
        &project
            .map(|p| format!("{} found", p.display()))
            .unwrap_or_else(|| "none (optional)".to_string()),
    );

    // Prediction API
    let cfg = config::load();
    let client = api_client(&cfg, api);
    print_health_item("Endpoint", true, client.endpoint());

    let api_ok = client.is_healthy();
    print_health_item(
        "Prediction API",
        api_ok,
        if api_ok {
            "reachable"
        } else {
            "not reachable — is the API server running?"
        },
    );

    if api_ok {
        let importance_ok = client.feature_importance().is_ok();
        print_health_item(
            "Importance data",
            importance_ok,
            if importance_ok {
                "available"
            } else {
                "not available (model importances not exported)"
            },
        );
    }

    // Scan log
    print_health_item(
        "Scan logging",
        cfg.logging.enabled,
        if cfg.logging.enabled {
            "enabled"
        } else {
            "disabled in config"
        },
    );
    let log_exists = history::scan_log_path()
        .map(|p| p.exists())
        .unwrap_or(false);
    let log_records = if log_exists {
        history::read_all_records().len()
    } else {
        0
    };
    print_health_item(
        "Scan log",
        log_exists,
        &if log_exists {
            format!("{log_records} entries")
        } else {
            "no log file yet".to_string()
        },
    );

    if !api_ok {
        // Scripted health checks branch on the exit code
        std::process::exit(1);
    }

    Ok(())
}

fn print_health_item(name: &str, ok: bool, detail: &str) {
    let status = if ok {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {:<25} {}", status, name, detail.dimmed());
}

// ---------------------------------------------------------------------------
// phishguard config show | init | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective PhishGuard Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    // Show source info
    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project = config::project_config_file();
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    if global_exists {
        println!("  {} {}", "✓".green(), "~/.phishguard/config.toml".dimmed());
    } else {
        println!(
            "  {} {}",
            "·".dimmed(),
            "~/.phishguard/config.toml (not found)".dimmed()
        );
    }
    match project {
        Some(path) => println!("  {} {}", "✓".green(), path.display().to_string().dimmed()),
        None => println!(
            "  {} {}",
            "·".dimmed(),
            ".phishguard.toml (not found)".dimmed()
        ),
    }
    println!(
        "  {} {}",
        "·".dimmed(),
        "PHISHGUARD_* environment variables".dimmed()
    );

    Ok(())
}

/// Initialize a default config file at `~/.phishguard/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!(
        "{} Config written to {}",
        "✓".green().bold(),
        path.display()
    );
    println!(
        "  {}",
        "Edit the file to customize phishguard behavior.".dimmed()
    );
    Ok(())
}

/// Set a single configuration value in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Build the prediction client from config, honoring a CLI endpoint override.
fn api_client(cfg: &config::GuardConfig, endpoint_override: Option<&str>) -> PredictClient {
    match endpoint_override {
        Some(endpoint) => PredictClient::new(endpoint, Duration::from_secs(cfg.api.timeout_secs)),
        None => PredictClient::from_config(&cfg.api),
    }
}

/// Format a feature value: whole numbers without a fraction.
fn fmt_value(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

/// Horizontal bar for an importance fraction in [0, 1].
fn bar(fraction: f64) -> String {
    let width = (fraction.clamp(0.0, 1.0) * 40.0).round() as usize;
    "█".repeat(width)
}

/// Truncate a string to `max_len` characters, appending "…" if truncated.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{head}…")
    }
}

/// Colorize a risk level for the details table.
fn risk_colored(level: RiskLevel) -> colored::ColoredString {
    match level {
        RiskLevel::High => "high".red(),
        RiskLevel::Medium => "medium".yellow(),
        RiskLevel::Low => "low".green(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 5), "hell…");
        assert_eq!(truncate("ab", 2), "ab");
        // Counts characters, not bytes
        assert_eq!(truncate("пример.рф-длинный", 10), "пример.рф…");
    }

    #[test]
    fn test_fmt_value() {
        assert_eq!(fmt_value(0.0), "0");
        assert_eq!(fmt_value(1.0), "1");
        assert_eq!(fmt_value(19.0), "19");
        assert_eq!(fmt_value(0.5), "0.50");
    }

    #[test]
    fn test_bar_scales_and_clamps() {
        assert_eq!(bar(0.0), "");
        assert_eq!(bar(0.25).chars().count(), 10);
        assert_eq!(bar(1.0).chars().count(), 40);
        assert_eq!(bar(2.0).chars().count(), 40);
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str_opt(None), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str_opt(Some("json")), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str_opt(Some("csv")), OutputFormat::Csv);
        assert_eq!(
            OutputFormat::from_str_opt(Some("unknown")),
            OutputFormat::Table
        );
    }
}
