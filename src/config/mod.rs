/// Configuration system for phishguard.
///
/// Settings resolve through four layers, later layers winning field by
/// field:
///
/// 1. **Built-in defaults** — hardcoded in [`schema::GuardConfig::default()`]
/// 2. **User global config** — `~/.phishguard/config.toml`
/// 3. **Project local config** — `.phishguard.toml` in the current working
///    directory or any directory above it
/// 4. **Environment variables** — `PHISHGUARD_*` overrides
///
/// File layers merge at the key level: a project file that sets only
/// `demo.delay_ms` leaves the global file's `api.endpoint` intact. A broken
/// or unreadable config file must never stop a scan, so malformed layers
/// are silently skipped.
///
/// # Usage
///
/// ```rust,ignore
/// use phishguard::config;
///
/// let cfg = config::load();
/// let client = PredictClient::from_config(&cfg.api);
/// ```
pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use schema::GuardConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved phishguard configuration.
///
/// This is the entry point every subcommand uses; it never fails — the
/// worst case is the built-in defaults.
pub fn load() -> GuardConfig {
    let mut table = default_table();

    for path in [global_config_path(), project_config_path()]
        .into_iter()
        .flatten()
    {
        if let Some(overlay) = read_table(&path) {
            merge_tables(&mut table, overlay);
        }
    }

    let mut config: GuardConfig = table.try_into().unwrap_or_default();
    apply_env_overrides(&mut config);
    config
}

/// The built-in defaults as a TOML table, the base every layer lands on.
fn default_table() -> toml::Table {
    toml::Table::try_from(GuardConfig::default()).unwrap_or_default()
}

/// Parse one config file into a TOML table, `None` when the file is
/// missing or malformed.
fn read_table(path: &Path) -> Option<toml::Table> {
    fs::read_to_string(path).ok()?.parse().ok()
}

/// Overlay `overlay` onto `base`, key by key. Nested tables merge
/// recursively; any other value replaces the base's.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match value {
            toml::Value::Table(incoming) => {
                if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                    merge_tables(existing, incoming);
                    continue;
                }
                base.insert(key, toml::Value::Table(incoming));
            }
            other => {
                base.insert(key, other);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.phishguard/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".phishguard").join("config.toml"))
}

/// Path to the nearest project config: `.phishguard.toml` in the current
/// directory or any ancestor. `None` when no such file exists, so scans run
/// the same from anywhere inside a project tree.
fn project_config_path() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    cwd.ancestors()
        .map(|dir| dir.join(".phishguard.toml"))
        .find(|candidate| candidate.is_file())
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Return the path to the active project config file for display purposes.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `PHISHGUARD_API_URL` — prediction service base URL
/// - `PHISHGUARD_API_TIMEOUT_SECS` — per-request timeout (seconds)
/// - `PHISHGUARD_DEMO_DELAY_MS` — simulated analysis delay (milliseconds)
/// - `PHISHGUARD_LOGGING` — scan history logging (`1`/`true`/`yes`/`on`)
/// - `PHISHGUARD_WEB_ADDR` — dashboard bind address
fn apply_env_overrides(config: &mut GuardConfig) {
    if let Ok(val) = std::env::var("PHISHGUARD_API_URL")
        && !val.is_empty()
    {
        config.api.endpoint = val;
    }
    if let Ok(val) = std::env::var("PHISHGUARD_API_TIMEOUT_SECS")
        && let Ok(secs) = val.parse::<u64>()
    {
        config.api.timeout_secs = secs;
    }
    if let Ok(val) = std::env::var("PHISHGUARD_DEMO_DELAY_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.demo.delay_ms = ms;
    }
    if let Ok(val) = std::env::var("PHISHGUARD_LOGGING") {
        config.logging.enabled = is_truthy(&val);
    }
    if let Ok(val) = std::env::var("PHISHGUARD_WEB_ADDR")
        && !val.is_empty()
    {
        config.web.addr = val;
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the default annotated config to `~/.phishguard/config.toml`.
///
/// Creates the `~/.phishguard/` directory if it doesn't exist. Returns an
/// error if the file already exists (use `force = true` to overwrite).
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    write_config_file(&path, &GuardConfig::default_toml())?;

    Ok(path)
}

/// Reset the global config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// Set a single dotted key (`api.endpoint`, `demo.delay_ms`, ...) in the
/// global config file, creating the file from defaults when absent.
///
/// The update is surgical: only the named key changes, everything else in
/// the file survives. The new value is parsed to match the type of the
/// value it replaces (bool, integer, or string).
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;

    let content = if path.exists() {
        fs::read_to_string(&path).context("failed to read config file")?
    } else {
        toml::to_string_pretty(&GuardConfig::default())
            .context("failed to serialize default config")?
    };
    let mut table: toml::Table = content.parse().context("failed to parse config file")?;

    set_dotted_key(&mut table, key, value)?;

    let output = toml::to_string_pretty(&table).context("failed to serialize config")?;
    write_config_file(&path, &output)
}

/// Show the effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    toml::to_string_pretty(&load()).context("failed to serialize effective config")
}

fn write_config_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.phishguard/ directory")?;
    }
    fs::write(path, content).context("failed to write config file")
}

/// Update one `section.field` key inside a parsed config table.
fn set_dotted_key(table: &mut toml::Table, key: &str, raw: &str) -> Result<()> {
    let Some((section, field)) = key.split_once('.') else {
        anyhow::bail!("config keys are dotted, e.g. api.endpoint");
    };

    let section_table = table
        .get_mut(section)
        .with_context(|| format!("unknown config section '{section}'"))?
        .as_table_mut()
        .with_context(|| format!("'{section}' is not a config section"))?;

    let new_value = match section_table.get(field) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw)),
        Some(toml::Value::Integer(_)) => toml::Value::Integer(
            raw.parse()
                .with_context(|| format!("expected an integer for '{key}', got '{raw}'"))?,
        ),
        _ => toml::Value::String(raw.to_string()),
    };

    section_table.insert(field.to_string(), new_value);
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn table(s: &str) -> toml::Table {
        s.parse().unwrap()
    }

    #[test]
    fn load_returns_usable_config() {
        // If run in a dev environment with ~/.phishguard/config.toml present,
        // the result reflects that file's contents — assert only on shape.
        let config = load();
        assert!(!config.api.endpoint.is_empty());
        assert!(!config.web.addr.is_empty());
    }

    #[test]
    fn merge_overlays_field_by_field() {
        let mut base = default_table();
        merge_tables(&mut base, table("[api]\nendpoint = \"http://scanner:5000\""));
        merge_tables(&mut base, table("[demo]\ndelay_ms = 0"));

        let config: GuardConfig = base.try_into().unwrap();
        // The second layer touched [demo] only; the first layer's endpoint
        // and the untouched defaults all survive.
        assert_eq!(config.api.endpoint, "http://scanner:5000");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.demo.delay_ms, 0);
        assert!(config.logging.enabled);
    }

    #[test]
    fn later_layer_wins_on_the_same_key() {
        let mut base = default_table();
        merge_tables(&mut base, table("[api]\ntimeout_secs = 30"));
        merge_tables(&mut base, table("[api]\ntimeout_secs = 5"));

        let config: GuardConfig = base.try_into().unwrap();
        assert_eq!(config.api.timeout_secs, 5);
    }

    #[test]
    fn is_truthy_accepts_variants() {
        assert!(is_truthy("1"));
        assert!(is_truthy("true"));
        assert!(is_truthy("TRUE"));
        assert!(is_truthy("yes"));
        assert!(is_truthy("on"));
        assert!(!is_truthy("0"));
        assert!(!is_truthy("false"));
        assert!(!is_truthy("off"));
        assert!(!is_truthy(""));
    }

    #[test]
    fn set_dotted_key_updates_string() {
        let mut root = table("[api]\nendpoint = \"http://localhost:5000\"");
        set_dotted_key(&mut root, "api.endpoint", "http://10.0.0.7:8080").unwrap();
        assert_eq!(
            root["api"]["endpoint"].as_str(),
            Some("http://10.0.0.7:8080")
        );
    }

    #[test]
    fn set_dotted_key_updates_bool() {
        let mut root = table("[logging]\nenabled = true");
        set_dotted_key(&mut root, "logging.enabled", "off").unwrap();
        assert_eq!(root["logging"]["enabled"].as_bool(), Some(false));
    }

    #[test]
    fn set_dotted_key_updates_integer() {
        let mut root = table("[demo]\ndelay_ms = 1500");
        set_dotted_key(&mut root, "demo.delay_ms", "0").unwrap();
        assert_eq!(root["demo"]["delay_ms"].as_integer(), Some(0));
    }

    #[test]
    fn set_dotted_key_rejects_bad_input() {
        let mut root = table("[api]\nendpoint = \"http://localhost:5000\"");
        assert!(set_dotted_key(&mut root, "nonexistent.key", "value").is_err());
        assert!(set_dotted_key(&mut root, "undotted", "value").is_err());

        let mut root = table("[demo]\ndelay_ms = 1500");
        assert!(set_dotted_key(&mut root, "demo.delay_ms", "soon").is_err());
    }

    #[test]
    fn show_effective_config_returns_toml() {
        let toml_str = show_effective_config().unwrap();
        let _: GuardConfig = toml::from_str(&toml_str).unwrap();
    }
}
