//! Error types for the Morpheus content bot.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum names the specific condition
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` to capture the location
//!
//! Per-cycle errors ([`JobError`], [`PublishError`], [`PlatformError`],
//! [`StorageError`]) are recoverable. [`AuthError`] and [`ConfigError`] are
//! fatal at startup.
//!
//! # Examples
//!
//! ```
//! use morpheus_error::{JobError, JobErrorKind, MorpheusResult};
//!
//! fn generate() -> MorpheusResult<String> {
//!     Err(JobError::new(JobErrorKind::Timeout { waited_secs: 30 }))?
//! }
//!
//! let err = generate().unwrap_err();
//! assert!(!err.is_fatal());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod auth;
mod config;
mod error;
mod job;
mod platform;
mod storage;

pub use auth::AuthError;
pub use config::ConfigError;
pub use error::{MorpheusError, MorpheusErrorKind, MorpheusResult};
pub use job::{JobError, JobErrorKind};
pub use platform::{PlatformError, PlatformErrorKind, PublishError};
pub use storage::{StorageError, StorageErrorKind};
