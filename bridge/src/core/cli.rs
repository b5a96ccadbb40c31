use clap::{Parser, Subcommand};

use std::path::PathBuf;

use super::config::TimestampPolicy;
use super::constants::{
    ENV_AUTH_SCHEME, ENV_BEARER_TOKEN, ENV_CONFIG, ENV_DD_API_KEY, ENV_DD_APP_KEY,
    ENV_DD_RETRY_ATTEMPTS, ENV_DD_SITE, ENV_DD_TIMEOUT, ENV_DD_URL, ENV_METRICS,
    ENV_SCRAPE_INTERVAL, ENV_SCRAPE_TIMEOUT, ENV_TARGET_URL, ENV_TIMESTAMPS,
};

#[derive(Parser)]
#[command(name = "promdd")]
#[command(
    version,
    about = "Forward selected Prometheus metrics to Datadog",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Prometheus exposition URL to scrape
    #[arg(long, global = true, env = ENV_TARGET_URL)]
    pub target_url: Option<String>,

    /// Seconds between scrape cycles
    #[arg(long, global = true, env = ENV_SCRAPE_INTERVAL)]
    pub scrape_interval: Option<u64>,

    /// Scrape request timeout in seconds
    #[arg(long, global = true, env = ENV_SCRAPE_TIMEOUT)]
    pub scrape_timeout: Option<u64>,

    /// Token for the scrape Authorization header
    #[arg(long, global = true, env = ENV_BEARER_TOKEN, hide_env_values = true)]
    pub bearer_token: Option<String>,

    /// Authorization scheme placed before the token (empty for the raw token)
    #[arg(long, global = true, env = ENV_AUTH_SCHEME)]
    pub auth_scheme: Option<String>,

    /// Comma-separated metric names to forward (empty uses the built-in list)
    #[arg(long, global = true, env = ENV_METRICS)]
    pub metrics: Option<String>,

    /// Timestamp source for submitted points (wall_clock or sample)
    #[arg(long, global = true, env = ENV_TIMESTAMPS, value_parser = parse_timestamp_policy)]
    pub timestamps: Option<TimestampPolicy>,

    /// Datadog site
    #[arg(long, global = true, env = ENV_DD_SITE)]
    pub dd_site: Option<String>,

    /// Datadog intake base URL (overrides the site)
    #[arg(long, global = true, env = ENV_DD_URL)]
    pub dd_url: Option<String>,

    /// Datadog API key
    #[arg(long, global = true, env = ENV_DD_API_KEY, hide_env_values = true)]
    pub dd_api_key: Option<String>,

    /// Datadog application key
    #[arg(long, global = true, env = ENV_DD_APP_KEY, hide_env_values = true)]
    pub dd_app_key: Option<String>,

    /// Submission request timeout in seconds
    #[arg(long, global = true, env = ENV_DD_TIMEOUT)]
    pub dd_timeout: Option<u64>,

    /// Submission attempts per batch (1 disables retries)
    #[arg(long, global = true, env = ENV_DD_RETRY_ATTEMPTS)]
    pub dd_retry_attempts: Option<u32>,
}

/// Parse timestamp policy from CLI/env string
fn parse_timestamp_policy(s: &str) -> Result<TimestampPolicy, String> {
    match s.to_lowercase().replace('-', "_").as_str() {
        "wall_clock" | "now" => Ok(TimestampPolicy::WallClock),
        "sample" => Ok(TimestampPolicy::Sample),
        _ => Err(format!(
            "Invalid timestamp policy '{}'. Valid options: wall_clock, sample",
            s
        )),
    }
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Scrape and forward on every interval until stopped (default command)
    Run,
    /// Run a single cycle, print its report and exit
    Check,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub config: Option<PathBuf>,
    pub target_url: Option<String>,
    pub scrape_interval: Option<u64>,
    pub scrape_timeout: Option<u64>,
    pub bearer_token: Option<String>,
    pub auth_scheme: Option<String>,
    pub metrics: Option<String>,
    pub timestamps: Option<TimestampPolicy>,
    pub dd_site: Option<String>,
    pub dd_url: Option<String>,
    pub dd_api_key: Option<String>,
    pub dd_app_key: Option<String>,
    pub dd_timeout: Option<u64>,
    pub dd_retry_attempts: Option<u32>,
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Option<Commands>) {
    let cli = Cli::parse();
    let config = CliConfig {
        config: cli.config,
        target_url: cli.target_url,
        scrape_interval: cli.scrape_interval,
        scrape_timeout: cli.scrape_timeout,
        bearer_token: cli.bearer_token,
        auth_scheme: cli.auth_scheme,
        metrics: cli.metrics,
        timestamps: cli.timestamps,
        dd_site: cli.dd_site,
        dd_url: cli.dd_url,
        dd_api_key: cli.dd_api_key,
        dd_app_key: cli.dd_app_key,
        dd_timeout: cli.dd_timeout,
        dd_retry_attempts: cli.dd_retry_attempts,
    };
    (config, cli.command)
}
