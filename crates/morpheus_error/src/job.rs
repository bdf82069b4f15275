//! Assistant job error types.

/// Ways an assistant generation job can end without a result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum JobErrorKind {
    /// The remote service reported the job as failed
    #[display("Remote job failed: {}", _0)]
    RemoteFailure(String),
    /// The job did not complete before the deadline and was abandoned
    #[display("Job timed out after {}s", waited_secs)]
    Timeout {
        /// Seconds waited before giving up
        waited_secs: u64,
    },
    /// The service could not be reached or returned an unexpected HTTP status
    #[display("Transport failure: {}", _0)]
    Transport(String),
    /// The service answered with a payload we could not interpret
    #[display("Malformed response: {}", _0)]
    MalformedResponse(String),
}

/// Assistant job error with location tracking.
///
/// # Examples
///
/// ```
/// use morpheus_error::{JobError, JobErrorKind};
///
/// let err = JobError::new(JobErrorKind::RemoteFailure("rate_limit_exceeded".into()));
/// assert!(format!("{}", err).contains("rate_limit_exceeded"));
/// assert!(!err.is_timeout());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Job Error: {} at line {} in {}", kind, line, file)]
pub struct JobError {
    /// The kind of error that occurred
    pub kind: JobErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl JobError {
    /// Create a new job error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: JobErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &JobErrorKind {
        &self.kind
    }

    /// True when the job was abandoned because it ran past its deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, JobErrorKind::Timeout { .. })
    }
}
