// =============================================================================
// Application Identity
// =============================================================================

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "promdd";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".promdd";

/// User agent sent with outbound requests
pub const USER_AGENT: &str = concat!("promdd/", env!("CARGO_PKG_VERSION"));

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "promdd.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "PROMDD_CONFIG";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "PROMDD_LOG";

// =============================================================================
// Environment Variables - Scrape Target
// =============================================================================

/// Prometheus exposition endpoint to scrape
pub const ENV_TARGET_URL: &str = "TARGET_URL";

/// Seconds between two scrape cycles
pub const ENV_SCRAPE_INTERVAL: &str = "SCRAPE_INTERVAL";

/// Request timeout for the scrape, in seconds
pub const ENV_SCRAPE_TIMEOUT: &str = "SCRAPE_TIMEOUT";

/// Token sent in the Authorization header of the scrape request
pub const ENV_BEARER_TOKEN: &str = "PROMETHEUS_JWT_HEADER";

/// Scheme prepended to the token (empty sends the raw token)
pub const ENV_AUTH_SCHEME: &str = "PROMETHEUS_AUTH_SCHEME";

// =============================================================================
// Environment Variables - Metric Selection
// =============================================================================

/// Comma-separated metric allow-list
pub const ENV_METRICS: &str = "METRICS";

/// Timestamp policy for outbound points (wall_clock or sample)
pub const ENV_TIMESTAMPS: &str = "PROMDD_TIMESTAMPS";

// =============================================================================
// Environment Variables - Datadog Intake
// =============================================================================

/// Datadog site (datadoghq.com, datadoghq.eu, us3.datadoghq.com, ...)
pub const ENV_DD_SITE: &str = "DD_SITE";

/// Full intake base URL, overrides the site-derived one
pub const ENV_DD_URL: &str = "DD_URL";

/// Datadog API key
pub const ENV_DD_API_KEY: &str = "DD_API_KEY";

/// Datadog application key
pub const ENV_DD_APP_KEY: &str = "DD_APP_KEY";

/// Request timeout for series submission, in seconds
pub const ENV_DD_TIMEOUT: &str = "DD_TIMEOUT";

/// Submission attempts per batch within one cycle
pub const ENV_DD_RETRY_ATTEMPTS: &str = "DD_RETRY_ATTEMPTS";

// =============================================================================
// Defaults
// =============================================================================

/// Default scrape interval (matches the usual Prometheus scrape interval)
pub const DEFAULT_SCRAPE_INTERVAL_SECS: u64 = 60;

/// Default scrape request timeout
pub const DEFAULT_SCRAPE_TIMEOUT_SECS: u64 = 10;

/// Default Authorization scheme
pub const DEFAULT_AUTH_SCHEME: &str = "Bearer";

/// Default Datadog site
pub const DEFAULT_DD_SITE: &str = "datadoghq.com";

/// Default submission request timeout
pub const DEFAULT_DD_TIMEOUT_SECS: u64 = 30;

/// Default submission attempts per batch
pub const DEFAULT_DD_RETRY_ATTEMPTS: u32 = 3;

/// Base delay for submission retry backoff
pub const DD_RETRY_BASE_DELAY_MS: u64 = 100;

/// Series intake path (v2 API)
pub const DD_SERIES_PATH: &str = "/api/v2/series";

/// Metric names retained when no allow-list is configured.
///
/// These are the Pulsar broker metrics the bridge was written for.
pub const DEFAULT_METRICS: &[&str] = &[
    "pulsar_msg_backlog",
    "pulsar_topics_count",
    "pulsar_subscriptions_count",
    "pulsar_producers_count",
    "pulsar_consumers_count",
    "pulsar_rate_in",
    "pulsar_rate_out",
    "pulsar_throughput_in",
    "pulsar_throughput_out",
    "pulsar_storage_size",
    "pulsar_storage_backlog_size",
    "pulsar_subscription_back_log",
    "pulsar_subscription_delayed",
];

// =============================================================================
// Shutdown
// =============================================================================

/// Maximum time to wait for an in-flight cycle during shutdown
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 10;
