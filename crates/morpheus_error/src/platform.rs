//! Social platform and publishing error types.

/// Reasons a social platform call can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PlatformErrorKind {
    /// Credentials were rejected or lack the needed permission
    #[display("Unauthorized: {}", _0)]
    Unauthorized(String),
    /// The platform refused the request because of rate limiting
    #[display("Rate limited: retry after {}s", retry_after_secs)]
    RateLimited {
        /// Seconds until the limit window resets, when the platform says so
        retry_after_secs: u64,
    },
    /// The platform refused identical content
    #[display("Duplicate content rejected: {}", _0)]
    DuplicateContent(String),
    /// Any other non-success response
    #[display("Rejected with status {}: {}", status, message)]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Body or detail reported by the platform
        message: String,
    },
    /// Network-level failure before a response arrived
    #[display("Transport failure: {}", _0)]
    Transport(String),
    /// The platform answered with a payload we could not interpret
    #[display("Malformed response: {}", _0)]
    MalformedResponse(String),
}

impl PlatformErrorKind {
    /// Check if the failure is due to credentials or permissions.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

/// Social platform error with location tracking.
///
/// # Examples
///
/// ```
/// use morpheus_error::{PlatformError, PlatformErrorKind};
///
/// let err = PlatformError::new(PlatformErrorKind::RateLimited { retry_after_secs: 900 });
/// assert!(format!("{}", err).contains("900"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Platform Error: {} at line {} in {}", kind, line, file)]
pub struct PlatformError {
    /// The kind of error that occurred
    pub kind: PlatformErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PlatformError {
    /// Create a new platform error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PlatformErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PlatformErrorKind {
        &self.kind
    }
}

/// A post or reply that could not be published.
///
/// Carries the platform's reason. Publishing is never retried, so the
/// content is lost for this cycle.
///
/// # Examples
///
/// ```
/// use morpheus_error::{PlatformError, PlatformErrorKind, PublishError};
///
/// let platform = PlatformError::new(PlatformErrorKind::DuplicateContent("same text".into()));
/// let err = PublishError::from(platform);
/// assert!(matches!(err.reason, PlatformErrorKind::DuplicateContent(_)));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Publish Error: {} at line {} in {}", reason, line, file)]
pub struct PublishError {
    /// Underlying platform reason
    pub reason: PlatformErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PublishError {
    /// Create a new publish error with automatic location tracking.
    #[track_caller]
    pub fn new(reason: PlatformErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            reason,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl From<PlatformError> for PublishError {
    #[track_caller]
    fn from(err: PlatformError) -> Self {
        Self::new(err.kind)
    }
}
