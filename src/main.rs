//! finweb main entry point

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use finweb_api::{start_server, AppState};
use finweb_client::{HttpBackend, TransactionBackend};
use finweb_config::{Config, ConfigError};
use finweb_core::{compute_summary, filter_by, DateRange};
use finweb_utils::format_money;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "finweb")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight income and expense dashboard", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Override the backend base URL from the configuration
    #[arg(long)]
    backend_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the dashboard (default)
    Serve,
    /// Fetch once and print the totals
    Summary {
        /// Range start (YYYY-MM-DD)
        #[arg(long)]
        start: Option<chrono::NaiveDate>,
        /// Range end (YYYY-MM-DD)
        #[arg(long)]
        end: Option<chrono::NaiveDate>,
    },
    /// Print the default configuration file
    DefaultConfig,
}

/// Load the config file, falling back to defaults when it does not exist
fn load_config(path: &Path, backend_url: Option<String>) -> anyhow::Result<(Config, bool)> {
    let (mut config, found) = match Config::load(path) {
        Ok(config) => (config, true),
        Err(ConfigError::FileNotFound { .. }) => (Config::default(), false),
        Err(e) => {
            let hint = e.suggestion();
            return Err(e).with_context(|| {
                format!("Failed to load configuration from {}. {}", path.display(), hint)
            });
        }
    };

    if let Some(url) = backend_url {
        config.backend.base_url = url;
        if let Err(e) = config.validate() {
            let hint = e.suggestion();
            return Err(e).with_context(|| format!("Invalid --backend-url. {}", hint));
        }
    }
    Ok((config, found))
}

fn init_logging(config: &Config) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str()))
        .init();
}

async fn serve(config: Config, backend: Arc<dyn TransactionBackend>) -> anyhow::Result<()> {
    let state = AppState::new(config, backend);

    log::info!("Fetching transactions from {}", state.config.backend_base_url());
    if let Err(e) = state.refresh().await {
        log::warn!("Initial fetch failed, starting with an empty list: {}", e);
    }

    start_server(state).await
}

async fn summary(
    config: &Config,
    backend: Arc<dyn TransactionBackend>,
    range: DateRange,
) -> anyhow::Result<()> {
    let transactions = backend
        .fetch_transactions()
        .await
        .context("Failed to fetch transactions")?;
    let filtered = filter_by(&transactions, &range);
    let summary = compute_summary(filtered.iter().copied());

    let symbol = &config.display.currency_symbol;
    let dp = config.display.decimal_places;
    println!("Range:          {}", range.description());
    println!("Transactions:   {} of {}", filtered.len(), transactions.len());
    println!("Total Income:   {}", format_money(summary.total_income, symbol, dp));
    println!("Total Expenses: {}", format_money(summary.total_expenses, symbol, dp));
    println!("Net Balance:    {}", format_money(summary.net_balance, symbol, dp));
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(Command::DefaultConfig) = args.command {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let (config, found) = load_config(&args.config, args.backend_url)?;
    init_logging(&config);
    if found {
        log::info!("Config loaded from {}", args.config.display());
    } else {
        log::warn!("Config file {} not found, using defaults", args.config.display());
    }

    let backend: Arc<dyn TransactionBackend> =
        Arc::new(HttpBackend::from_config(&config).context("Failed to create backend client")?);

    let rt = Runtime::new()?;
    rt.block_on(async {
        match args.command.unwrap_or(Command::Serve) {
            Command::Serve => serve(config, backend).await,
            Command::Summary { start, end } => summary(&config, backend, DateRange::new(start, end)).await,
            Command::DefaultConfig => Ok(()),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("finweb-{}-{}.yaml", name, std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let path = std::env::temp_dir().join("finweb-does-not-exist.yaml");
        let (config, found) = load_config(&path, None).unwrap();
        assert!(!found);
        assert_eq!(config.server.port, 8081);
    }

    #[test]
    fn test_invalid_config_error_carries_hint() {
        let path = temp_config("invalid", "server: [unclosed");
        let err = load_config(&path, None).unwrap_err();
        std::fs::remove_file(&path).ok();

        let message = format!("{:#}", err);
        assert!(message.contains("Failed to load configuration"));
        assert!(message.contains("default config template"));
        let source = err.downcast_ref::<ConfigError>().unwrap();
        assert_eq!(source.severity(), finweb_core::ErrorSeverity::Error);
    }

    #[test]
    fn test_backend_url_override_is_validated() {
        let path = std::env::temp_dir().join("finweb-does-not-exist.yaml");
        let (config, _) = load_config(&path, Some("http://10.0.0.2:9000/".to_string())).unwrap();
        assert_eq!(config.backend_base_url(), "http://10.0.0.2:9000");

        let err = load_config(&path, Some("ftp://nope".to_string())).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("Invalid --backend-url"));
        assert!(message.contains("backend.base_url"));
    }

    #[test]
    fn test_default_config_command() {
        let args = Args::try_parse_from(["finweb", "default-config"]).unwrap();
        assert!(matches!(args.command, Some(Command::DefaultConfig)));

        let path = temp_config("default", Config::generate_default());
        let (config, found) = load_config(&path, None).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(found);
        assert_eq!(config.backend_base_url(), Config::default().backend_base_url());
    }
}
