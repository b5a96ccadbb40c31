use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::utils::file::expand_path;

use super::cli::CliConfig;
use super::constants::{
    APP_DOT_FOLDER, CONFIG_FILE_NAME, DEFAULT_AUTH_SCHEME, DEFAULT_DD_RETRY_ATTEMPTS,
    DEFAULT_DD_SITE, DEFAULT_DD_TIMEOUT_SECS, DEFAULT_SCRAPE_INTERVAL_SECS,
    DEFAULT_SCRAPE_TIMEOUT_SECS, ENV_DD_API_KEY, ENV_TARGET_URL,
};
use super::secret::Secret;

// =============================================================================
// Timestamp Policy Enum
// =============================================================================

/// Where the timestamp of an outbound point comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampPolicy {
    /// Wall-clock time at submission, whole seconds
    #[default]
    WallClock,
    /// The sample's own exposition timestamp when present, wall-clock otherwise
    Sample,
}

impl fmt::Display for TimestampPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampPolicy::WallClock => write!(f, "wall_clock"),
            TimestampPolicy::Sample => write!(f, "sample"),
        }
    }
}

// =============================================================================
// File Config Structs (JSON deserialization)
// =============================================================================

/// Scrape target configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ScrapeFileConfig {
    pub url: Option<String>,
    pub interval_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub bearer_token: Option<String>,
    pub auth_scheme: Option<String>,
}

/// Metric selection configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct MetricsFileConfig {
    pub names: Option<Vec<String>>,
    pub timestamps: Option<TimestampPolicy>,
}

/// Datadog intake configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct IntakeFileConfig {
    pub site: Option<String>,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub app_key: Option<String>,
    pub timeout_secs: Option<u64>,
    pub retry_attempts: Option<u32>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub scrape: Option<ScrapeFileConfig>,
    pub metrics: Option<MetricsFileConfig>,
    pub intake: Option<IntakeFileConfig>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        if let Some(scrape) = other.scrape {
            let current = self.scrape.get_or_insert_with(ScrapeFileConfig::default);
            if scrape.url.is_some() {
                tracing::trace!(url = ?scrape.url, "Merging scrape.url");
                current.url = scrape.url;
            }
            if scrape.interval_secs.is_some() {
                tracing::trace!(interval_secs = ?scrape.interval_secs, "Merging scrape.interval_secs");
                current.interval_secs = scrape.interval_secs;
            }
            if scrape.timeout_secs.is_some() {
                tracing::trace!(timeout_secs = ?scrape.timeout_secs, "Merging scrape.timeout_secs");
                current.timeout_secs = scrape.timeout_secs;
            }
            if scrape.bearer_token.is_some() {
                tracing::trace!(bearer_token = "***", "Merging scrape.bearer_token");
                current.bearer_token = scrape.bearer_token;
            }
            if scrape.auth_scheme.is_some() {
                tracing::trace!(auth_scheme = ?scrape.auth_scheme, "Merging scrape.auth_scheme");
                current.auth_scheme = scrape.auth_scheme;
            }
        }

        if let Some(metrics) = other.metrics {
            let current = self.metrics.get_or_insert_with(MetricsFileConfig::default);
            if metrics.names.is_some() {
                tracing::trace!(names = ?metrics.names, "Merging metrics.names");
                current.names = metrics.names;
            }
            if metrics.timestamps.is_some() {
                tracing::trace!(timestamps = ?metrics.timestamps, "Merging metrics.timestamps");
                current.timestamps = metrics.timestamps;
            }
        }

        if let Some(intake) = other.intake {
            let current = self.intake.get_or_insert_with(IntakeFileConfig::default);
            if intake.site.is_some() {
                tracing::trace!(site = ?intake.site, "Merging intake.site");
                current.site = intake.site;
            }
            if intake.endpoint.is_some() {
                tracing::trace!(endpoint = ?intake.endpoint, "Merging intake.endpoint");
                current.endpoint = intake.endpoint;
            }
            if intake.api_key.is_some() {
                tracing::trace!(api_key = "***", "Merging intake.api_key");
                current.api_key = intake.api_key;
            }
            if intake.app_key.is_some() {
                tracing::trace!(app_key = "***", "Merging intake.app_key");
                current.app_key = intake.app_key;
            }
            if intake.timeout_secs.is_some() {
                tracing::trace!(timeout_secs = ?intake.timeout_secs, "Merging intake.timeout_secs");
                current.timeout_secs = intake.timeout_secs;
            }
            if intake.retry_attempts.is_some() {
                tracing::trace!(retry_attempts = ?intake.retry_attempts, "Merging intake.retry_attempts");
                current.retry_attempts = intake.retry_attempts;
            }
        }
    }
}

// =============================================================================
// Runtime Config
// =============================================================================

/// Scrape target configuration (final/runtime)
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub url: String,
    pub interval_secs: u64,
    pub timeout_secs: u64,
    pub bearer_token: Option<Secret>,
    /// Prepended to the token with a space; empty sends the raw token
    pub auth_scheme: String,
}

impl ScrapeConfig {
    /// Value of the Authorization header, if a token is configured
    pub fn authorization(&self) -> Option<String> {
        let token = self.bearer_token.as_ref().filter(|t| !t.is_empty())?;
        let scheme = self.auth_scheme.trim();
        if scheme.is_empty() {
            Some(token.expose().to_string())
        } else {
            Some(format!("{} {}", scheme, token.expose()))
        }
    }
}

/// Metric selection configuration (final/runtime)
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Configured allow-list; empty means the built-in default list
    pub names: Vec<String>,
    pub timestamps: TimestampPolicy,
}

/// Datadog intake configuration (final/runtime)
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    pub site: String,
    /// Base URL the series path is appended to
    pub endpoint: String,
    pub api_key: Secret,
    pub app_key: Option<Secret>,
    pub timeout_secs: u64,
    /// Attempts per batch within one cycle (1 = no retry)
    pub retry_attempts: u32,
}

/// Final merged application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub scrape: ScrapeConfig,
    pub metrics: MetricsConfig,
    pub intake: IntakeConfig,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Profile directory config (~/.promdd/promdd.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");

        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();

        if let Some(profile_path) = get_profile_config_path()
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(&profile_path)?;
            profile_config.warn_unknown_fields();
            file_config.merge(profile_config);
            found_configs.push(profile_path.display().to_string());
        }

        let overlay_path = if let Some(ref path) = cli.config {
            let expanded = expand_path(&path.to_string_lossy());
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        if let Some(path) = overlay_path {
            let overlay_config = FileConfig::load_from_file(&path)?;
            overlay_config.warn_unknown_fields();
            file_config.merge(overlay_config);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");

        let file_scrape = file_config.scrape.unwrap_or_default();
        let file_metrics = file_config.metrics.unwrap_or_default();
        let file_intake = file_config.intake.unwrap_or_default();

        let scrape = ScrapeConfig {
            url: cli
                .target_url
                .clone()
                .or(file_scrape.url)
                .unwrap_or_default()
                .trim()
                .to_string(),
            interval_secs: cli
                .scrape_interval
                .or(file_scrape.interval_secs)
                .unwrap_or(DEFAULT_SCRAPE_INTERVAL_SECS),
            timeout_secs: cli
                .scrape_timeout
                .or(file_scrape.timeout_secs)
                .unwrap_or(DEFAULT_SCRAPE_TIMEOUT_SECS),
            bearer_token: cli
                .bearer_token
                .clone()
                .or(file_scrape.bearer_token)
                .map(Secret::new),
            auth_scheme: cli
                .auth_scheme
                .clone()
                .or(file_scrape.auth_scheme)
                .unwrap_or_else(|| DEFAULT_AUTH_SCHEME.to_string()),
        };

        // CLI/env carries a comma-separated string, the file carries a list
        let names = match cli.metrics.as_deref() {
            Some(csv) => parse_metric_list(csv),
            None => file_metrics
                .names
                .unwrap_or_default()
                .iter()
                .flat_map(|n| parse_metric_list(n))
                .collect(),
        };
        let metrics = MetricsConfig {
            names,
            timestamps: cli
                .timestamps
                .or(file_metrics.timestamps)
                .unwrap_or_default(),
        };

        let site = cli
            .dd_site
            .clone()
            .or(file_intake.site)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_DD_SITE.to_string());
        let endpoint = cli
            .dd_url
            .clone()
            .or(file_intake.endpoint)
            .map(|e| e.trim().trim_end_matches('/').to_string())
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| format!("https://api.{}", site));
        let intake = IntakeConfig {
            site,
            endpoint,
            api_key: Secret::new(
                cli.dd_api_key
                    .clone()
                    .or(file_intake.api_key)
                    .unwrap_or_default(),
            ),
            app_key: cli
                .dd_app_key
                .clone()
                .or(file_intake.app_key)
                .map(Secret::new)
                .filter(|k| !k.is_empty()),
            timeout_secs: cli
                .dd_timeout
                .or(file_intake.timeout_secs)
                .unwrap_or(DEFAULT_DD_TIMEOUT_SECS),
            retry_attempts: cli
                .dd_retry_attempts
                .or(file_intake.retry_attempts)
                .unwrap_or(DEFAULT_DD_RETRY_ATTEMPTS),
        };

        let config = Self {
            scrape,
            metrics,
            intake,
        };

        config.validate()?;

        tracing::debug!(
            target_url = %config.scrape.url,
            interval_secs = config.scrape.interval_secs,
            scrape_timeout_secs = config.scrape.timeout_secs,
            auth = config.scrape.bearer_token.is_some(),
            metrics = config.metrics.names.len(),
            timestamps = %config.metrics.timestamps,
            dd_site = %config.intake.site,
            dd_endpoint = %config.intake.endpoint,
            dd_app_key = config.intake.app_key.is_some(),
            dd_timeout_secs = config.intake.timeout_secs,
            dd_retry_attempts = config.intake.retry_attempts,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Validate the configuration for consistency and correctness
    fn validate(&self) -> Result<()> {
        if self.scrape.url.is_empty() {
            anyhow::bail!(
                "Configuration error: scrape.url is required. \
                 Set via {} env var or scrape.url in config file.",
                ENV_TARGET_URL
            );
        }
        if !is_http_url(&self.scrape.url) {
            anyhow::bail!(
                "Configuration error: scrape.url must start with http:// or https://. Got: {}",
                self.scrape.url
            );
        }

        if self.scrape.interval_secs == 0 {
            anyhow::bail!("Configuration error: scrape.interval_secs must be greater than 0");
        }
        if self.scrape.timeout_secs == 0 {
            anyhow::bail!("Configuration error: scrape.timeout_secs must be greater than 0");
        }
        if self.intake.timeout_secs == 0 {
            anyhow::bail!("Configuration error: intake.timeout_secs must be greater than 0");
        }
        if self.intake.retry_attempts == 0 {
            anyhow::bail!("Configuration error: intake.retry_attempts must be at least 1");
        }

        if self.intake.api_key.is_empty() {
            anyhow::bail!(
                "Configuration error: intake.api_key is required. \
                 Set via {} env var or intake.api_key in config file.",
                ENV_DD_API_KEY
            );
        }
        if !is_http_url(&self.intake.endpoint) {
            anyhow::bail!(
                "Configuration error: intake.endpoint must start with http:// or https://. Got: {}",
                self.intake.endpoint
            );
        }

        // A scrape that outlives the interval delays every following cycle
        if self.scrape.timeout_secs >= self.scrape.interval_secs {
            tracing::warn!(
                timeout_secs = self.scrape.timeout_secs,
                interval_secs = self.scrape.interval_secs,
                "scrape.timeout_secs is not shorter than scrape.interval_secs"
            );
        }

        if self.scrape.authorization().is_none() {
            tracing::warn!(
                url = %self.scrape.url,
                "No bearer token configured, scraping without Authorization header"
            );
        }

        Ok(())
    }
}

/// Split a comma-separated metric list, dropping blanks
pub fn parse_metric_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(String::from)
        .collect()
}

/// Get the profile config path (~/.promdd/promdd.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_cli() -> CliConfig {
        CliConfig {
            target_url: Some("http://broker:8080/metrics".to_string()),
            dd_api_key: Some("api-key".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_timestamp_policy_serde() {
        let policy: TimestampPolicy = serde_json::from_str(r#""wall_clock""#).unwrap();
        assert_eq!(policy, TimestampPolicy::WallClock);

        let policy: TimestampPolicy = serde_json::from_str(r#""sample""#).unwrap();
        assert_eq!(policy, TimestampPolicy::Sample);
    }

    #[test]
    fn test_timestamp_policy_display() {
        assert_eq!(TimestampPolicy::WallClock.to_string(), "wall_clock");
        assert_eq!(TimestampPolicy::Sample.to_string(), "sample");
    }

    #[test]
    fn test_parse_metric_list() {
        assert_eq!(
            parse_metric_list(" pulsar_msg_backlog, ,pulsar_topics_count,"),
            vec!["pulsar_msg_backlog", "pulsar_topics_count"]
        );
        assert!(parse_metric_list("").is_empty());
        assert!(parse_metric_list(" , ").is_empty());
    }

    #[test]
    fn test_file_config_parse_full() {
        let json = r#"{
            "scrape": { "url": "http://broker:8080/metrics", "interval_secs": 30, "bearer_token": "jwt" },
            "metrics": { "names": ["pulsar_msg_backlog"], "timestamps": "sample" },
            "intake": { "site": "datadoghq.eu", "api_key": "k", "retry_attempts": 5 }
        }"#;
        let config: FileConfig = serde_json::from_str(json).unwrap();

        let scrape = config.scrape.as_ref().unwrap();
        assert_eq!(scrape.url.as_deref(), Some("http://broker:8080/metrics"));
        assert_eq!(scrape.interval_secs, Some(30));
        assert_eq!(scrape.bearer_token.as_deref(), Some("jwt"));

        let metrics = config.metrics.as_ref().unwrap();
        assert_eq!(
            metrics.names.as_deref(),
            Some(&["pulsar_msg_backlog".to_string()][..])
        );
        assert_eq!(metrics.timestamps, Some(TimestampPolicy::Sample));

        let intake = config.intake.as_ref().unwrap();
        assert_eq!(intake.site.as_deref(), Some("datadoghq.eu"));
        assert_eq!(intake.retry_attempts, Some(5));
    }

    #[test]
    fn test_file_config_parse_extra_fields() {
        let json = r#"{ "scrape": { "url": "http://x" }, "scrap": 1 }"#;
        let config: FileConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.extra.get("scrap").unwrap(), 1);
    }

    #[test]
    fn test_file_config_merge() {
        let mut base = FileConfig {
            scrape: Some(ScrapeFileConfig {
                url: Some("http://base/metrics".to_string()),
                interval_secs: Some(60),
                ..Default::default()
            }),
            intake: Some(IntakeFileConfig {
                api_key: Some("base-key".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let overlay = FileConfig {
            scrape: Some(ScrapeFileConfig {
                interval_secs: Some(15),
                ..Default::default()
            }),
            intake: Some(IntakeFileConfig {
                site: Some("us5.datadoghq.com".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        base.merge(overlay);

        let scrape = base.scrape.unwrap();
        assert_eq!(scrape.url.as_deref(), Some("http://base/metrics"));
        assert_eq!(scrape.interval_secs, Some(15));
        let intake = base.intake.unwrap();
        assert_eq!(intake.api_key.as_deref(), Some("base-key"));
        assert_eq!(intake.site.as_deref(), Some("us5.datadoghq.com"));
    }

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::load(&minimal_cli()).unwrap();

        assert_eq!(config.scrape.interval_secs, DEFAULT_SCRAPE_INTERVAL_SECS);
        assert_eq!(config.scrape.timeout_secs, DEFAULT_SCRAPE_TIMEOUT_SECS);
        assert_eq!(config.scrape.auth_scheme, DEFAULT_AUTH_SCHEME);
        assert!(config.metrics.names.is_empty());
        assert_eq!(config.metrics.timestamps, TimestampPolicy::WallClock);
        assert_eq!(config.intake.site, DEFAULT_DD_SITE);
        assert_eq!(config.intake.endpoint, "https://api.datadoghq.com");
        assert!(config.intake.app_key.is_none());
        assert_eq!(config.intake.retry_attempts, DEFAULT_DD_RETRY_ATTEMPTS);
    }

    #[test]
    fn test_app_config_cli_override() {
        let cli = CliConfig {
            scrape_interval: Some(15),
            bearer_token: Some("jwt".to_string()),
            metrics: Some("pulsar_msg_backlog, pulsar_rate_in".to_string()),
            timestamps: Some(TimestampPolicy::Sample),
            dd_site: Some("datadoghq.eu".to_string()),
            dd_app_key: Some("app".to_string()),
            dd_retry_attempts: Some(1),
            ..minimal_cli()
        };
        let config = AppConfig::load(&cli).unwrap();

        assert_eq!(config.scrape.interval_secs, 15);
        assert_eq!(
            config.scrape.authorization().as_deref(),
            Some("Bearer jwt")
        );
        assert_eq!(
            config.metrics.names,
            vec!["pulsar_msg_backlog", "pulsar_rate_in"]
        );
        assert_eq!(config.metrics.timestamps, TimestampPolicy::Sample);
        assert_eq!(config.intake.endpoint, "https://api.datadoghq.eu");
        assert!(config.intake.app_key.is_some());
        assert_eq!(config.intake.retry_attempts, 1);
    }

    #[test]
    fn test_app_config_file_then_cli() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("promdd.json");
        std::fs::write(
            &path,
            r#"{
                "scrape": { "url": "http://file/metrics", "interval_secs": 120 },
                "metrics": { "names": ["a", "b,c"] },
                "intake": { "api_key": "file-key", "endpoint": "http://localhost:9999/" }
            }"#,
        )
        .unwrap();

        let cli = CliConfig {
            config: Some(path),
            scrape_interval: Some(30),
            ..Default::default()
        };
        let config = AppConfig::load(&cli).unwrap();

        assert_eq!(config.scrape.url, "http://file/metrics");
        assert_eq!(config.scrape.interval_secs, 30);
        assert_eq!(config.metrics.names, vec!["a", "b", "c"]);
        assert_eq!(config.intake.api_key.expose(), "file-key");
        assert_eq!(config.intake.endpoint, "http://localhost:9999");
    }

    #[test]
    fn test_app_config_missing_config_file() {
        let cli = CliConfig {
            config: Some(PathBuf::from("/nonexistent/promdd.json")),
            ..minimal_cli()
        };
        let err = AppConfig::load(&cli).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_app_config_validation_url_required() {
        let cli = CliConfig {
            target_url: None,
            ..minimal_cli()
        };
        let err = AppConfig::load(&cli).unwrap_err();
        assert!(err.to_string().contains("scrape.url is required"));
    }

    #[test]
    fn test_app_config_validation_url_scheme() {
        let cli = CliConfig {
            target_url: Some("broker:8080/metrics".to_string()),
            ..minimal_cli()
        };
        let err = AppConfig::load(&cli).unwrap_err();
        assert!(err.to_string().contains("http:// or https://"));
    }

    #[test]
    fn test_app_config_validation_api_key_required() {
        let cli = CliConfig {
            dd_api_key: Some("   ".to_string()),
            ..minimal_cli()
        };
        let err = AppConfig::load(&cli).unwrap_err();
        assert!(err.to_string().contains("intake.api_key is required"));
    }

    #[test]
    fn test_app_config_validation_zero_interval() {
        let cli = CliConfig {
            scrape_interval: Some(0),
            ..minimal_cli()
        };
        let err = AppConfig::load(&cli).unwrap_err();
        assert!(err.to_string().contains("scrape.interval_secs"));
    }

    #[test]
    fn test_app_config_validation_zero_retry_attempts() {
        let cli = CliConfig {
            dd_retry_attempts: Some(0),
            ..minimal_cli()
        };
        let err = AppConfig::load(&cli).unwrap_err();
        assert!(err.to_string().contains("intake.retry_attempts"));
    }

    #[test]
    fn test_authorization_header_value() {
        let mut scrape = AppConfig::load(&minimal_cli()).unwrap().scrape;
        assert!(scrape.authorization().is_none());

        scrape.bearer_token = Some(Secret::new("jwt"));
        assert_eq!(scrape.authorization().as_deref(), Some("Bearer jwt"));

        scrape.auth_scheme = String::new();
        assert_eq!(scrape.authorization().as_deref(), Some("jwt"));

        scrape.bearer_token = Some(Secret::new(""));
        assert!(scrape.authorization().is_none());
    }

    #[test]
    fn test_config_debug_redacts_secrets() {
        let cli = CliConfig {
            bearer_token: Some("super-secret-jwt".to_string()),
            ..minimal_cli()
        };
        let config = AppConfig::load(&cli).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-jwt"));
        assert!(!debug.contains("api-key"));
    }
}
