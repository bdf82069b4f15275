//! Trait definitions for the external services.

use async_trait::async_trait;
use morpheus_core::{CandidatePost, JobId, PostId, RemoteJobReport};
use morpheus_error::{JobError, MorpheusResult, PlatformError};

/// Asynchronous job API of a hosted generative-AI assistant.
///
/// Implementations must tolerate being polled repeatedly for the same job.
#[async_trait]
pub trait AssistantService: Send + Sync {
    /// Submit a prompt and return the id of the accepted job.
    async fn create_job(&self, prompt: &str) -> Result<JobId, JobError>;

    /// Fetch the current status of a job.
    async fn job_status(&self, job_id: &JobId) -> Result<RemoteJobReport, JobError>;

    /// Acknowledge pending tool-step actions with a no-op response.
    async fn acknowledge_actions(
        &self,
        job_id: &JobId,
        action_ids: &[String],
    ) -> Result<(), JobError>;

    /// Fetch the text produced by a completed job.
    async fn job_result(&self, job_id: &JobId) -> Result<String, JobError>;

    /// Ask the remote to stop working on a job.
    ///
    /// The default does nothing, for services without cancellation.
    async fn cancel_job(&self, _job_id: &JobId) -> Result<(), JobError> {
        Ok(())
    }

    /// Check that the configured credentials and assistant are usable.
    ///
    /// # Errors
    ///
    /// Returns an `AuthError` when the service rejects the credentials.
    async fn verify(&self) -> MorpheusResult<()>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;
}

/// Social platform read and write API.
#[async_trait]
pub trait SocialPlatform: Send + Sync {
    /// Search recent posts matching `query`.
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<CandidatePost>, PlatformError>;

    /// Create a top-level post.
    async fn create_post(&self, text: &str) -> Result<PostId, PlatformError>;

    /// Create a reply to `parent`.
    async fn create_reply(&self, text: &str, parent: &PostId) -> Result<PostId, PlatformError>;

    /// Ids of the account's own most recent posts, newest first.
    async fn own_recent_posts(&self, limit: usize) -> Result<Vec<PostId>, PlatformError>;

    /// Check the credentials and return the account handle.
    ///
    /// # Errors
    ///
    /// Returns an `AuthError` when the platform rejects the credentials.
    async fn verify_credentials(&self) -> MorpheusResult<String>;

    /// Maximum number of characters in a post.
    fn max_post_length(&self) -> usize;

    /// Platform name (e.g., "twitter").
    fn platform_name(&self) -> &'static str;
}
