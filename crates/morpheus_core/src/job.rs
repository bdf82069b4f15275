//! Generation job state.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Identifier the assistant service assigns to an accepted job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{}", _0)]
pub struct JobId(pub String);

impl JobId {
    /// Create a job id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Lifecycle of a generation job.
///
/// `Completed`, `Failed` and `TimedOut` are terminal. `TimedOut` is only ever
/// assigned locally; the remote service never reports it.
///
/// # Examples
///
/// ```
/// use morpheus_core::JobStatus;
///
/// assert!(JobStatus::TimedOut.is_terminal());
/// assert!(!JobStatus::AwaitingAction.is_terminal());
/// assert_eq!(JobStatus::AwaitingAction.to_string(), "awaiting_action");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum JobStatus {
    /// Created locally, not yet accepted by the remote
    Pending,
    /// Accepted and being worked on
    Running,
    /// The remote is waiting for tool-step acknowledgments
    AwaitingAction,
    /// Output is ready
    Completed,
    /// The remote gave up
    Failed,
    /// Abandoned locally after the deadline passed
    TimedOut,
}

impl JobStatus {
    /// Check whether no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::TimedOut)
    }
}

/// One status poll answered by the assistant service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteJobReport {
    /// Status as reported by the remote
    pub status: JobStatus,
    /// Action ids awaiting acknowledgment (only meaningful for `AwaitingAction`)
    pub pending_actions: Vec<String>,
    /// Failure detail when the remote reports `Failed`
    pub failure_reason: Option<String>,
}

impl RemoteJobReport {
    /// Report carrying only a status.
    pub fn status(status: JobStatus) -> Self {
        Self {
            status,
            pending_actions: Vec::new(),
            failure_reason: None,
        }
    }

    /// Report for a job waiting on the given actions.
    pub fn awaiting(actions: Vec<String>) -> Self {
        Self {
            status: JobStatus::AwaitingAction,
            pending_actions: actions,
            failure_reason: None,
        }
    }

    /// Report for a failed job.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            status: JobStatus::Failed,
            pending_actions: Vec::new(),
            failure_reason: Some(reason.into()),
        }
    }
}

/// A single request/response cycle with the assistant.
///
/// Owned by the call that created it. Transitions out of a terminal state are
/// ignored.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use morpheus_core::{GenerationJob, JobId, JobStatus};
///
/// let mut job = GenerationJob::new("Share one insight", Utc::now());
/// assert_eq!(*job.status(), JobStatus::Pending);
///
/// job.accept(JobId::new("thread_1/run_1"));
/// assert_eq!(*job.status(), JobStatus::Running);
///
/// job.complete("Blocks are final after k confirmations.");
/// job.transition(JobStatus::Failed);
/// assert_eq!(*job.status(), JobStatus::Completed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GenerationJob {
    /// Remote id, set once the remote accepts the job
    job_id: Option<JobId>,
    /// Prompt submitted to the assistant
    prompt: String,
    /// When the job was created locally
    created_at: DateTime<Utc>,
    /// Current lifecycle state
    status: JobStatus,
    /// Produced text, present only when completed
    result: Option<String>,
}

impl GenerationJob {
    /// Create a pending job.
    pub fn new(prompt: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            job_id: None,
            prompt: prompt.into(),
            created_at,
            status: JobStatus::Pending,
            result: None,
        }
    }

    /// Record the remote id and move to `Running`.
    pub fn accept(&mut self, job_id: JobId) {
        if self.status.is_terminal() {
            return;
        }
        self.job_id = Some(job_id);
        self.status = JobStatus::Running;
    }

    /// Move to a new status unless the job is already terminal.
    pub fn transition(&mut self, status: JobStatus) {
        if !self.status.is_terminal() {
            self.status = status;
        }
    }

    /// Store the produced text and mark the job completed.
    pub fn complete(&mut self, text: impl Into<String>) {
        if self.status.is_terminal() {
            return;
        }
        self.result = Some(text.into());
        self.status = JobStatus::Completed;
    }
}
