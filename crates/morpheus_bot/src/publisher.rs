//! Publishing of posts and replies.

use morpheus_core::PostId;
use morpheus_error::PublishError;
use morpheus_interface::SocialPlatform;
use std::sync::Arc;
use tracing::{info, instrument};

const DRY_RUN_POST_ID: &str = "dry-run";

/// Thin wrapper over the platform's write calls.
///
/// Publishing is irreversible and never retried. Identical text posted
/// twice is sent twice.
#[derive(Clone)]
pub struct Publisher {
    platform: Arc<dyn SocialPlatform>,
    dry_run: bool,
}

impl Publisher {
    /// Creates a publisher that writes to `platform`.
    pub fn new(platform: Arc<dyn SocialPlatform>) -> Self {
        Self {
            platform,
            dry_run: false,
        }
    }

    /// Log instead of publishing, returning a synthetic post id.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// True when nothing is actually published.
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Publishes a top-level post.
    ///
    /// # Errors
    ///
    /// Returns a `PublishError` carrying the platform's reason.
    #[instrument(skip(self, text), fields(platform = self.platform.platform_name(), dry_run = self.dry_run))]
    pub async fn post(&self, text: &str) -> Result<PostId, PublishError> {
        if self.dry_run {
            info!(text, "Dry run, post not published");
            return Ok(PostId::new(DRY_RUN_POST_ID));
        }

        let post_id = self.platform.create_post(text).await?;
        info!(post_id = %post_id, "Post published");
        Ok(post_id)
    }

    /// Publishes a reply to `in_reply_to`.
    ///
    /// # Errors
    ///
    /// Returns a `PublishError` carrying the platform's reason.
    #[instrument(
        skip(self, text, in_reply_to),
        fields(
            platform = self.platform.platform_name(),
            dry_run = self.dry_run,
            parent = %in_reply_to
        )
    )]
    pub async fn reply(&self, text: &str, in_reply_to: &PostId) -> Result<PostId, PublishError> {
        if self.dry_run {
            info!(text, "Dry run, reply not published");
            return Ok(PostId::new(DRY_RUN_POST_ID));
        }

        let post_id = self.platform.create_reply(text, in_reply_to).await?;
        info!(post_id = %post_id, "Reply published");
        Ok(post_id)
    }
}
