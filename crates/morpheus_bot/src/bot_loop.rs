//! Top-level driver combining scheduled posts and community monitoring.

use crate::assistant::AssistantJobClient;
use crate::config::{BotConfig, RuntimeConfig};
use crate::dedup::DedupTracker;
use crate::monitor::{CommunityMonitor, MonitorReport};
use crate::prompts::Prompts;
use crate::publisher::Publisher;
use crate::sanitize::{char_len, sanitize};
use crate::schedule::SchedulePlanner;
use derive_getters::Getters;
use morpheus_core::{PostId, ScheduleSlot};
use morpheus_error::{JobError, JobErrorKind, MorpheusResult};
use morpheus_interface::{AssistantService, Clock, SocialPlatform};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

/// Outcome of one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct TickReport {
    /// Slot that was due this tick
    slot: Option<ScheduleSlot>,
    /// Id of the scheduled post, when one was published
    posted: Option<PostId>,
    /// Monitor counters, absent when the cycle aborted
    monitor: Option<MonitorReport>,
    /// True if the scheduled post or the monitor cycle failed
    failed: bool,
}

/// Main loop of the bot.
///
/// Each tick checks the schedule and publishes a post if a slot is due,
/// then runs a community monitoring cycle. Ticks never overlap, and errors
/// inside a tick are logged and answered with a longer pause.
pub struct BotLoop {
    planner: SchedulePlanner,
    monitor: CommunityMonitor,
    assistant: AssistantJobClient,
    publisher: Publisher,
    platform: Arc<dyn SocialPlatform>,
    clock: Arc<dyn Clock>,
    prompts: Prompts,
    runtime: RuntimeConfig,
}

impl BotLoop {
    /// Wires the bot from configuration and service handles.
    ///
    /// Loads the dedup store from the configured path.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the schedule is invalid.
    pub fn from_config(
        config: &BotConfig,
        service: Arc<dyn AssistantService>,
        platform: Arc<dyn SocialPlatform>,
        clock: Arc<dyn Clock>,
        dry_run: bool,
    ) -> MorpheusResult<Self> {
        let planner = SchedulePlanner::new(
            config.schedule.slots.clone(),
            config.schedule.offset()?,
            config.schedule.window_minutes,
        )?;
        let assistant = AssistantJobClient::from_config(service, clock.clone(), &config.assistant);
        let publisher = Publisher::new(platform.clone()).with_dry_run(dry_run);
        let dedup = DedupTracker::load(
            &config.dedup.path,
            config.dedup.retention(),
            clock.clone(),
        );
        let monitor = CommunityMonitor::new(
            platform.clone(),
            assistant.clone(),
            publisher.clone(),
            dedup,
            clock.clone(),
            config.prompts.clone(),
            config.monitor.clone(),
        );

        Ok(Self {
            planner,
            monitor,
            assistant,
            publisher,
            platform,
            clock,
            prompts: config.prompts.clone(),
            runtime: config.runtime,
        })
    }

    /// Schedule state, for inspection.
    pub fn planner(&self) -> &SchedulePlanner {
        &self.planner
    }

    /// Runs ticks until `shutdown` resolves.
    ///
    /// Shutdown is only observed between ticks.
    pub async fn run_until<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        info!(
            platform = self.platform.platform_name(),
            slots = self.planner.slots().len(),
            dry_run = self.publisher.is_dry_run(),
            "Bot loop started"
        );
        tokio::pin!(shutdown);

        loop {
            let report = self.tick().await;
            let pause = self.pause_after(&report);
            info!(
                slot = report.slot.as_ref().map(|slot| slot.label.as_str()),
                posted = report.posted.as_ref().map(PostId::as_str),
                replied = report.monitor.map(|m| m.replied),
                failed = report.failed,
                next_sleep_secs = pause.as_secs(),
                "Tick complete"
            );

            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("Shutdown requested, stopping bot loop");
                    break;
                }
                _ = self.clock.sleep(pause) => {}
            }
        }
    }

    /// Pause before the next tick.
    pub fn pause_after(&self, report: &TickReport) -> Duration {
        if report.failed {
            self.runtime.error_backoff()
        } else {
            self.runtime.tick_interval()
        }
    }

    /// Runs one tick: the scheduled post if due, then a monitor cycle.
    #[instrument(skip(self))]
    pub async fn tick(&mut self) -> TickReport {
        let now = self.clock.now();
        let mut report = TickReport::default();

        if let Some(slot) = self.planner.due_slot(now).cloned() {
            info!(slot = %slot, "Scheduled slot due");
            match self.generate_and_publish().await {
                Ok(post_id) => {
                    self.planner.record_fired(now);
                    report.posted = Some(post_id);
                }
                Err(e) => {
                    error!(stage = "scheduled_post", slot = %slot, error = %e, "Scheduled post failed");
                    report.failed = true;
                }
            }
            report.slot = Some(slot);
        }

        match self.monitor.run_configured_cycle().await {
            Ok(monitor) => report.monitor = Some(monitor),
            Err(e) => {
                error!(stage = "monitor", error = %e, "Monitor cycle aborted");
                report.failed = true;
            }
        }

        report
    }

    /// Generates and publishes one post regardless of the schedule.
    ///
    /// # Errors
    ///
    /// Returns the `JobError` or `PublishError` that stopped the post.
    pub async fn run_once(&self) -> MorpheusResult<PostId> {
        self.generate_and_publish().await
    }

    #[instrument(skip(self))]
    async fn generate_and_publish(&self) -> MorpheusResult<PostId> {
        let max_len = self.platform.max_post_length();
        let prompt = if self.is_first_post().await {
            info!("No previous posts found, using bootstrap prompt");
            self.prompts.bootstrap_prompt(max_len)
        } else {
            self.prompts.scheduled_prompt(max_len)
        };

        let text = sanitize(&self.assistant.submit_with(&prompt).await?);
        if text.is_empty() {
            return Err(JobError::new(JobErrorKind::MalformedResponse(
                "assistant returned no usable text".to_string(),
            ))
            .into());
        }
        let len = char_len(&text);
        if len > max_len {
            warn!(len, max_len, "Generated post exceeds platform limit");
        }

        Ok(self.publisher.post(&text).await?)
    }

    async fn is_first_post(&self) -> bool {
        match self.platform.own_recent_posts(1).await {
            Ok(posts) => posts.is_empty(),
            Err(e) => {
                warn!(error = %e, "Could not read post history, assuming earlier posts exist");
                false
            }
        }
    }
}
