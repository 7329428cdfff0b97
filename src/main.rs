use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

use phishguard::{cli, config, tracker, web};

#[derive(Debug, Parser)]
#[command(name = "phishguard")]
#[command(about = "Phishing website detection from the command line")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scan a URL against the prediction API and show the verdict
    Scan {
        /// The URL to scan; reads a {"url": "..."} line from stdin when omitted
        url: Option<String>,
        /// Also show the per-feature risk breakdown
        #[arg(long)]
        details: bool,
        /// Prediction API endpoint override
        #[arg(long)]
        api: Option<String>,
    },
    /// Classify a URL with the built-in demo simulator (no network)
    Demo {
        /// The URL to classify
        url: String,
        /// Also show the per-feature risk breakdown
        #[arg(long)]
        details: bool,
    },
    /// Tab tracker loop — answers getCurrentURL requests over stdio
    Tracker,
    /// Show the feature risk catalog
    Features {
        /// Fetch live importance data from the prediction API instead
        #[arg(long)]
        live: bool,
        /// Prediction API endpoint override
        #[arg(long)]
        api: Option<String>,
    },
    /// Show model performance figures from the sample evaluation run
    Model,
    /// Show scan history from the local scan log
    History {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
        /// Only include the last N days of data
        #[arg(long)]
        days: Option<u32>,
    },
    /// Serve the web dashboard
    Web {
        /// Listen address override, e.g. 127.0.0.1:8642
        #[arg(long)]
        addr: Option<String>,
    },
    /// Check environment health: prediction API, config, scan log
    Health {
        /// Prediction API endpoint override
        #[arg(long)]
        api: Option<String>,
    },
    /// Inspect or edit configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the effective merged configuration
    Show,
    /// Write an annotated default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Set a config value by dotted key, e.g. api.endpoint
    Set { key: String, value: String },
    /// Rewrite the config file with defaults
    Reset,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{} {err:#}", "Error:".red().bold());
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let app = App::parse();

    match app.command {
        Commands::Scan { url, details, api } => {
            cli::run_scan(url.as_deref(), details, api.as_deref())
        }
        Commands::Demo { url, details } => cli::run_demo(&url, details),
        Commands::Tracker => tracker::run(),
        Commands::Features { live, api } => cli::run_features(live, api.as_deref()),
        Commands::Model => cli::run_model(),
        Commands::History { format, days } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_history(fmt, days)
        }
        Commands::Web { addr } => {
            let cfg = config::load();
            let addr = addr.unwrap_or(cfg.web.addr);
            web::serve(&addr)
        }
        Commands::Health { api } => cli::run_health(api.as_deref()),
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
    }
}
