//! Top-level error wrapper types.

use crate::{AuthError, ConfigError, JobError, PlatformError, PublishError, StorageError};

/// Every error the bot can surface, grouped by origin.
///
/// # Examples
///
/// ```
/// use morpheus_error::{ConfigError, MorpheusError};
///
/// let err: MorpheusError = ConfigError::new("no slots configured").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum MorpheusErrorKind {
    /// Credential or permission failure
    #[from(AuthError)]
    Auth(AuthError),
    /// Invalid configuration
    #[from(ConfigError)]
    Config(ConfigError),
    /// Assistant job failure
    #[from(JobError)]
    Job(JobError),
    /// Social platform call failure
    #[from(PlatformError)]
    Platform(PlatformError),
    /// Publish failure
    #[from(PublishError)]
    Publish(PublishError),
    /// Dedup store failure
    #[from(StorageError)]
    Storage(StorageError),
}

/// Morpheus error with kind discrimination.
///
/// # Examples
///
/// ```
/// use morpheus_error::{AuthError, MorpheusResult};
///
/// fn start() -> MorpheusResult<()> {
///     Err(AuthError::new("openai", "invalid api key"))?
/// }
///
/// assert!(start().unwrap_err().is_fatal());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Morpheus Error: {}", _0)]
pub struct MorpheusError(Box<MorpheusErrorKind>);

impl MorpheusError {
    /// Create a new error from a kind.
    pub fn new(kind: MorpheusErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &MorpheusErrorKind {
        &self.0
    }

    /// True for errors that must stop the process before the loop starts.
    pub fn is_fatal(&self) -> bool {
        matches!(
            *self.0,
            MorpheusErrorKind::Auth(_) | MorpheusErrorKind::Config(_)
        )
    }
}

// Generic From implementation for any type that converts to MorpheusErrorKind
impl<T> From<T> for MorpheusError
where
    T: Into<MorpheusErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Morpheus operations.
pub type MorpheusResult<T> = std::result::Result<T, MorpheusError>;
