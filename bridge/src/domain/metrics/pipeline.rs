//! Metrics Forwarding Pipeline
//!
//! Runs one scrape-filter-build-submit cycle per tick until shutdown.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::filter::MetricFilter;
use super::report::CycleReport;
use super::series::build_batch;
use super::submit::submit_batch;
use crate::core::config::TimestampPolicy;
use crate::data::error::ScrapeError;
use crate::data::intake::SubmissionClient;
use crate::data::scrape::ScrapeClient;
use crate::utils::time::now_epoch_secs;

pub struct MetricsPipeline {
    scrape: ScrapeClient,
    intake: Arc<dyn SubmissionClient>,
    filter: Arc<MetricFilter>,
    timestamps: TimestampPolicy,
    retry_attempts: u32,
}

impl MetricsPipeline {
    pub fn new(
        scrape: ScrapeClient,
        intake: Arc<dyn SubmissionClient>,
        filter: Arc<MetricFilter>,
        timestamps: TimestampPolicy,
        retry_attempts: u32,
    ) -> Self {
        Self {
            scrape,
            intake,
            filter,
            timestamps,
            retry_attempts,
        }
    }

    /// Spawn the cycle driver. The first cycle runs immediately; ticks that
    /// arrive while a cycle is running are skipped.
    pub fn start(self, interval: Duration, mut shutdown_rx: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut timer = tokio::time::interval(interval);
            timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

            tracing::debug!(
                url = %self.scrape.url(),
                interval_secs = interval.as_secs(),
                intake = self.intake.name(),
                "MetricsPipeline started"
            );

            loop {
                tokio::select! {
                    biased;
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                    _ = timer.tick() => {
                        self.run().await;
                    }
                }
            }
            tracing::debug!("MetricsPipeline shutdown complete");
        })
    }

    /// Run one cycle and log its outcome
    pub async fn run(&self) -> Option<CycleReport> {
        match self.run_cycle().await {
            Ok(report) => {
                tracing::info!(
                    status = %report.status(),
                    families = report.families_parsed,
                    retained = report.families_retained,
                    submitted = report.batches_submitted,
                    failed = report.batches_failed,
                    skipped = report.batches_skipped,
                    points = report.points_accepted,
                    duration_ms = report.duration.as_millis(),
                    "Cycle complete"
                );
                Some(report)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    phase = e.phase(),
                    url = %self.scrape.url(),
                    "Cycle aborted"
                );
                None
            }
        }
    }

    /// Fetch, parse, filter, build and submit once.
    ///
    /// Fetch and parse failures abort before anything is submitted. Batch
    /// failures are counted in the report and never abort.
    pub async fn run_cycle(&self) -> Result<CycleReport, ScrapeError> {
        let started = Instant::now();
        let families = self.scrape.scrape().await?;

        let mut report = CycleReport {
            families_parsed: families.len(),
            ..Default::default()
        };

        for family in families
            .iter()
            .filter(|f| self.filter.should_retain(&f.name))
        {
            report.families_retained += 1;

            let batch = build_batch(family, self.timestamps, now_epoch_secs());
            if batch.is_empty() {
                tracing::debug!(
                    metric = %family.name,
                    kind = %family.kind,
                    "No gauge or untyped samples, skipping"
                );
                report.batches_skipped += 1;
                continue;
            }

            match submit_batch(&batch, self.intake.as_ref(), self.retry_attempts).await {
                Some(ack) => {
                    report.batches_submitted += 1;
                    report.points_accepted += ack.series;
                }
                None => report.batches_failed += 1,
            }
        }

        report.duration = started.elapsed();
        Ok(report)
    }
}
