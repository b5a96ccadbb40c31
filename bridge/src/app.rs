//! Core application

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::core::cli::{self, CliConfig, Commands};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::core::shutdown::ShutdownService;
use crate::data::intake::{DatadogClient, SubmissionClient};
use crate::data::scrape::ScrapeClient;
use crate::domain::{CycleStatus, MetricFilter, MetricsPipeline};

pub struct CoreApp {
    pub shutdown: ShutdownService,
    pub config: AppConfig,
    pub filter: Arc<MetricFilter>,
    pub scrape: ScrapeClient,
    pub intake: Arc<dyn SubmissionClient>,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        let app = Self::init(&cli_config)?;

        match command {
            Some(Commands::Check) => app.check().await,
            Some(Commands::Run) | None => app.start().await,
        }
    }

    fn init(cli: &CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli)?;

        let filter = Arc::new(MetricFilter::from_config(&config.metrics.names));
        let scrape =
            ScrapeClient::new(&config.scrape).context("Failed to initialize scrape client")?;
        let intake: Arc<dyn SubmissionClient> = Arc::new(
            DatadogClient::new(&config.intake).context("Failed to initialize Datadog client")?,
        );

        tracing::debug!(
            metrics = filter.len(),
            default_list = filter.is_default(),
            timestamps = %config.metrics.timestamps,
            "Metric filter ready"
        );

        Ok(Self {
            shutdown: ShutdownService::new(),
            config,
            filter,
            scrape,
            intake,
        })
    }

    fn pipeline(&self) -> MetricsPipeline {
        MetricsPipeline::new(
            self.scrape.clone(),
            Arc::clone(&self.intake),
            Arc::clone(&self.filter),
            self.config.metrics.timestamps,
            self.config.intake.retry_attempts,
        )
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    async fn start(self) -> Result<()> {
        // Install signal handlers before the first cycle
        self.shutdown.install_signal_handlers();

        let interval = Duration::from_secs(self.config.scrape.interval_secs);
        let handle = self.pipeline().start(interval, self.shutdown.subscribe());
        self.shutdown.register(handle).await;

        tracing::info!(
            target_url = %self.config.scrape.url,
            interval_secs = self.config.scrape.interval_secs,
            intake = %self.config.intake.endpoint,
            metrics = self.filter.len(),
            "Forwarding metrics"
        );

        self.shutdown.wait().await;
        self.shutdown.shutdown().await;

        Ok(())
    }

    /// Run a single cycle and print its report
    async fn check(self) -> Result<()> {
        let report = self
            .pipeline()
            .run_cycle()
            .await
            .context("Cycle aborted")?;

        println!("{}", report);

        if report.status() == CycleStatus::Failed {
            anyhow::bail!("All {} batches failed", report.batches_failed);
        }
        Ok(())
    }
}
