use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use stackwatch_api::{ClientOptions, StackwatchClient};
use stackwatch_engine::{DashboardClient, RefreshSettings, localizer_for};
use stackwatch_util::config::{ConfigError, refresh_interval_from};
use stackwatch_util::preferences::{PreferencesPayload, UserPreferences};
use stackwatch_util::{DashboardConfig, LocaleId, config_file_path};
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod commands;

/// Environment variable naming the diagnostic log file used in TUI mode.
const TRACE_PATH_ENV: &str = "STACKWATCH_TRACE_PATH";
const TRACE_FILE_NAME: &str = "stackwatch.log";

#[derive(Debug, Parser)]
#[command(name = "stackwatch", version, about = "Monitoring dashboard for the Stackwatch backend")]
struct Cli {
    #[command(flatten)]
    overrides: ConfigOverrides,

    /// Without a subcommand the terminal dashboard starts.
    #[command(subcommand)]
    command: Option<Command>,
}

/// Flags applied on top of preferences and environment.
#[derive(Debug, Args)]
struct ConfigOverrides {
    /// Backend base URL, for example http://localhost:3000.
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Path prefix of the JSON API.
    #[arg(long, global = true)]
    api_prefix: Option<String>,
    /// Auto-refresh period in seconds (1 to 86400).
    #[arg(long, global = true, value_name = "SECS", value_parser = parse_interval)]
    interval: Option<Duration>,
    /// Display language: ru or en.
    #[arg(long, global = true)]
    locale: Option<LocaleId>,
    /// Skip a refresh tick while the previous cycle is still running.
    #[arg(long, global = true)]
    skip_overlap: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show overall and per-dependency health.
    Health,
    /// Show database and cache metrics.
    Overview,
    /// List or create records.
    Records {
        #[command(subcommand)]
        action: RecordsCommand,
    },
    /// Inspect and edit the backend cache.
    Cache {
        #[command(subcommand)]
        action: CacheCommand,
    },
    /// Refresh once and write the dashboard as a static HTML page.
    Snapshot {
        /// Output file; stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Auto-refresh without a UI, printing log entries until Ctrl+C.
    Watch,
    /// Show persisted preferences, or store the --locale/--interval flags.
    Preferences {
        /// Persist the --locale and --interval given on this command line.
        #[arg(long)]
        save: bool,
        /// Forget every stored preference.
        #[arg(long, conflicts_with = "save")]
        reset: bool,
    },
}

#[derive(Debug, Subcommand)]
enum RecordsCommand {
    List {
        /// Print the table body as escaped HTML rows.
        #[arg(long)]
        html: bool,
    },
    Create {
        name: String,
        #[arg(default_value = "")]
        value: String,
    },
}

#[derive(Debug, Subcommand)]
enum CacheCommand {
    Keys,
    Get {
        key: String,
    },
    Set {
        key: String,
        value: String,
        /// Expiry in seconds.
        #[arg(long)]
        ttl: Option<u64>,
    },
    Delete {
        key: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.command.is_none());

    let preferences = UserPreferences::new().unwrap_or_else(|error| {
        warn!(%error, "preferences unavailable; using defaults");
        UserPreferences::ephemeral()
    });
    let config = resolve_config(&preferences, &cli.overrides)?;

    let Some(command) = cli.command else {
        let client = dashboard_client(&config)?;
        stackwatch_tui::run(client).await?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Command::Health => commands::health(&api_client(&config)?, &config).await,
        Command::Overview => commands::overview(&api_client(&config)?, &config).await,
        Command::Records { action } => match action {
            RecordsCommand::List { html } => commands::list_records(&api_client(&config)?, &config, html).await,
            RecordsCommand::Create { name, value } => commands::create_record(dashboard_client(&config)?, &name, &value).await,
        },
        Command::Cache { action } => {
            let client = api_client(&config)?;
            match action {
                CacheCommand::Keys => commands::cache_keys(&client).await,
                CacheCommand::Get { key } => commands::cache_get(&client, &key).await,
                CacheCommand::Set { key, value, ttl } => commands::cache_set(&client, key, value, ttl).await,
                CacheCommand::Delete { key } => commands::cache_delete(&client, &key).await,
            }
        }
        Command::Snapshot { out } => commands::snapshot(dashboard_client(&config)?, out.as_deref()).await,
        Command::Watch => commands::watch(dashboard_client(&config)?).await,
        Command::Preferences { save, reset } => {
            let update = if reset {
                Some(PreferencesPayload::default())
            } else if save {
                Some(preferences_from_flags(&cli.overrides))
            } else {
                None
            };
            commands::preferences(&preferences, update)
        }
    }
}

/// Install the tracing subscriber. The dashboard owns the terminal, so in
/// TUI mode diagnostics go to a file instead of stderr.
fn init_tracing(tui_mode: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if !tui_mode {
        let _ = builder.with_writer(std::io::stderr).try_init();
        return;
    }

    let path = trace_file_path();
    let file = path
        .parent()
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|_| OpenOptions::new().create(true).append(true).open(&path));
    match file {
        Ok(file) => {
            let _ = builder.with_ansi(false).with_writer(Mutex::new(file)).try_init();
        }
        // Without a log file, stay silent rather than draw over the dashboard.
        Err(_) => {
            let _ = builder.with_writer(std::io::sink).try_init();
        }
    }
}

fn trace_file_path() -> PathBuf {
    let override_path = std::env::var(TRACE_PATH_ENV).ok();
    config_file_path(override_path.as_deref(), TRACE_FILE_NAME)
}

fn resolve_config(preferences: &UserPreferences, overrides: &ConfigOverrides) -> Result<DashboardConfig> {
    let mut config = DashboardConfig::resolve(&preferences.snapshot()).context("invalid configuration")?;
    apply_overrides(&mut config, overrides);
    Ok(config)
}

fn parse_interval(value: &str) -> Result<Duration, ConfigError> {
    refresh_interval_from("--interval", value)
}

fn apply_overrides(config: &mut DashboardConfig, overrides: &ConfigOverrides) {
    if let Some(base_url) = &overrides.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(prefix) = &overrides.api_prefix {
        config.api_prefix = prefix.clone();
    }
    if let Some(interval) = overrides.interval {
        config.refresh_interval = interval;
    }
    if let Some(locale) = overrides.locale {
        config.locale = locale;
    }
    if overrides.skip_overlap {
        config.skip_overlapping_cycles = true;
    }
}

/// Preference values named on the command line; unset flags clear the stored value.
fn preferences_from_flags(overrides: &ConfigOverrides) -> PreferencesPayload {
    PreferencesPayload {
        preferred_locale: overrides.locale.map(|locale| locale.code().to_string()),
        refresh_interval_secs: overrides.interval.map(|interval| interval.as_secs()),
    }
}

fn api_client(config: &DashboardConfig) -> Result<StackwatchClient> {
    let options = ClientOptions::new(config.base_url.clone()).with_api_prefix(config.api_prefix.clone());
    StackwatchClient::new(options).context("cannot build the backend client")
}

fn dashboard_client(config: &DashboardConfig) -> Result<Arc<DashboardClient>> {
    let backend = Arc::new(api_client(config)?);
    let settings = RefreshSettings {
        interval: config.refresh_interval,
        skip_overlapping_cycles: config.skip_overlapping_cycles,
    };
    Ok(DashboardClient::new(backend, localizer_for(config.locale), settings))
}
