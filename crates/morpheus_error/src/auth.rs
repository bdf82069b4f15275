//! Authentication error types.

/// Credential or permission failure against an external service.
///
/// Raised while verifying credentials at startup. The bot refuses to start
/// its loop when one of these is returned.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Authentication Error ({}): {} at line {} in {}", service, message, line, file)]
pub struct AuthError {
    /// Service that rejected the credentials (e.g. "openai", "twitter")
    pub service: String,
    /// Reason reported by the service
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl AuthError {
    /// Create a new AuthError for the given service.
    ///
    /// # Examples
    ///
    /// ```
    /// use morpheus_error::AuthError;
    ///
    /// let err = AuthError::new("twitter", "401 Unauthorized");
    /// assert_eq!(err.service, "twitter");
    /// ```
    #[track_caller]
    pub fn new(service: impl Into<String>, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            service: service.into(),
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
