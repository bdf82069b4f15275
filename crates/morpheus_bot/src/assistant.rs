//! Submission and polling of assistant generation jobs.

use crate::config::AssistantConfig;
use morpheus_core::{GenerationJob, JobStatus};
use morpheus_error::{JobError, JobErrorKind};
use morpheus_interface::{AssistantService, Clock};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Drives a generation job from submission to text.
///
/// Tool-step acknowledgments requested by the remote are answered
/// automatically and never reach the caller.
#[derive(Clone)]
pub struct AssistantJobClient {
    service: Arc<dyn AssistantService>,
    clock: Arc<dyn Clock>,
    poll_interval: Duration,
    default_timeout: Duration,
    cancel_on_timeout: bool,
}

impl AssistantJobClient {
    /// Creates a client polling every second with a 30 second default timeout.
    pub fn new(service: Arc<dyn AssistantService>, clock: Arc<dyn Clock>) -> Self {
        Self {
            service,
            clock,
            poll_interval: DEFAULT_POLL_INTERVAL,
            default_timeout: DEFAULT_TIMEOUT,
            cancel_on_timeout: false,
        }
    }

    /// Creates a client using the configured intervals.
    pub fn from_config(
        service: Arc<dyn AssistantService>,
        clock: Arc<dyn Clock>,
        config: &AssistantConfig,
    ) -> Self {
        Self::new(service, clock)
            .with_poll_interval(config.poll_interval())
            .with_default_timeout(config.timeout())
            .with_cancel_on_timeout(config.cancel_on_timeout)
    }

    /// Sets the pause between status polls.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Sets the timeout used by [`submit_with`](Self::submit_with).
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Cancel timed-out jobs on the remote instead of abandoning them.
    pub fn with_cancel_on_timeout(mut self, cancel: bool) -> Self {
        self.cancel_on_timeout = cancel;
        self
    }

    /// Submits `prompt` with the default timeout.
    pub async fn submit_with(&self, prompt: &str) -> Result<String, JobError> {
        self.submit(prompt, self.default_timeout).await
    }

    /// Submits `prompt` and polls until the job completes.
    ///
    /// # Errors
    ///
    /// * `RemoteFailure` - the remote reported the job failed
    /// * `Timeout` - `timeout` elapsed first; no partial text is returned
    /// * `Transport` / `MalformedResponse` - the remote could not be used
    #[instrument(
        skip(self, prompt),
        fields(
            provider = self.service.provider_name(),
            prompt_len = prompt.len(),
            timeout_secs = timeout.as_secs()
        )
    )]
    pub async fn submit(&self, prompt: &str, timeout: Duration) -> Result<String, JobError> {
        let started = self.clock.now();
        let mut job = GenerationJob::new(prompt, started);

        let job_id = self.service.create_job(prompt).await?;
        job.accept(job_id.clone());
        debug!(job_id = %job_id, "Job accepted");

        let mut polls: u32 = 0;
        let mut acknowledged: HashSet<String> = HashSet::new();
        loop {
            let elapsed = (self.clock.now() - started).to_std().unwrap_or_default();
            if elapsed >= timeout {
                job.transition(JobStatus::TimedOut);
                warn!(
                    job_id = %job_id,
                    elapsed_ms = elapsed.as_millis() as u64,
                    polls,
                    "Job timed out"
                );
                if self.cancel_on_timeout {
                    if let Err(e) = self.service.cancel_job(&job_id).await {
                        warn!(job_id = %job_id, error = %e, "Failed to cancel timed-out job");
                    }
                }
                return Err(JobError::new(JobErrorKind::Timeout {
                    waited_secs: elapsed.as_secs(),
                }));
            }

            let report = self.service.job_status(&job_id).await?;
            polls += 1;

            match report.status {
                JobStatus::Completed => {
                    let text = self.service.job_result(&job_id).await?;
                    job.complete(text.as_str());
                    debug!(
                        job_id = %job_id,
                        elapsed_ms = elapsed.as_millis() as u64,
                        polls,
                        "Job completed"
                    );
                    return Ok(text);
                }
                JobStatus::Failed => {
                    job.transition(JobStatus::Failed);
                    let reason = report
                        .failure_reason
                        .unwrap_or_else(|| "no reason reported".to_string());
                    warn!(job_id = %job_id, reason = %reason, "Job failed");
                    return Err(JobError::new(JobErrorKind::RemoteFailure(reason)));
                }
                JobStatus::AwaitingAction => {
                    job.transition(JobStatus::AwaitingAction);
                    // The same actions may be reported until the remote moves on
                    let fresh: Vec<String> = report
                        .pending_actions
                        .into_iter()
                        .filter(|id| !acknowledged.contains(id))
                        .collect();
                    if !fresh.is_empty() {
                        debug!(
                            job_id = %job_id,
                            actions = fresh.len(),
                            "Acknowledging pending actions"
                        );
                        self.service.acknowledge_actions(&job_id, &fresh).await?;
                        acknowledged.extend(fresh);
                    }
                }
                JobStatus::Pending | JobStatus::Running => job.transition(report.status),
                JobStatus::TimedOut => {
                    return Err(JobError::new(JobErrorKind::MalformedResponse(
                        "remote reported a locally assigned status".to_string(),
                    )));
                }
            }

            self.clock.sleep(self.poll_interval).await;
        }
    }
}
