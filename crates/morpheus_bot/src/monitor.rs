//! Discovery of community posts and engagement replies.

use crate::assistant::AssistantJobClient;
use crate::config::MonitorConfig;
use crate::dedup::DedupTracker;
use crate::prompts::Prompts;
use crate::publisher::Publisher;
use crate::sanitize::{char_len, sanitize};
use morpheus_core::{CandidatePost, PostId};
use morpheus_error::{MorpheusResult, PlatformError};
use morpheus_interface::{Clock, SocialPlatform};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Counters describing one monitoring cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonitorReport {
    /// Unique posts returned by all searches
    pub found: usize,
    /// Posts above the threshold and not yet engaged
    pub eligible: usize,
    /// Replies published
    pub replied: usize,
    /// Candidates given up because every reply was too long
    pub too_long: usize,
    /// Candidates whose generation or publish failed
    pub failed: usize,
}

enum Engagement {
    Replied(PostId),
    TooLong,
}

/// Finds popular community posts and replies to them.
pub struct CommunityMonitor {
    platform: Arc<dyn SocialPlatform>,
    assistant: AssistantJobClient,
    publisher: Publisher,
    dedup: DedupTracker,
    clock: Arc<dyn Clock>,
    prompts: Prompts,
    config: MonitorConfig,
}

impl CommunityMonitor {
    /// Creates a monitor.
    pub fn new(
        platform: Arc<dyn SocialPlatform>,
        assistant: AssistantJobClient,
        publisher: Publisher,
        dedup: DedupTracker,
        clock: Arc<dyn Clock>,
        prompts: Prompts,
        config: MonitorConfig,
    ) -> Self {
        Self {
            platform,
            assistant,
            publisher,
            dedup,
            clock,
            prompts,
            config,
        }
    }

    /// Dedup store used to skip engaged posts.
    pub fn dedup(&self) -> &DedupTracker {
        &self.dedup
    }

    /// Runs a cycle with the configured search terms and threshold.
    ///
    /// # Errors
    ///
    /// See [`run_cycle`](Self::run_cycle).
    pub async fn run_configured_cycle(&mut self) -> Result<MonitorReport, PlatformError> {
        let terms = self.config.search_terms.clone();
        let min_engagement = self.config.min_engagement;
        self.run_cycle(&terms, min_engagement).await
    }

    /// Searches every term and replies to the most engaging new posts.
    ///
    /// Candidates are processed most engaging first, at most `batch_size`
    /// per cycle, with the cooldown between consecutive candidates. A
    /// failure on one candidate is logged and the next one is processed;
    /// that candidate stays unmarked so a later cycle may retry it.
    ///
    /// # Errors
    ///
    /// Returns the `PlatformError` of a failed search. Nothing is published
    /// in that case.
    #[instrument(skip(self, search_terms), fields(terms = search_terms.len()))]
    pub async fn run_cycle(
        &mut self,
        search_terms: &[String],
        min_engagement: u64,
    ) -> Result<MonitorReport, PlatformError> {
        let mut report = MonitorReport::default();

        let mut seen = HashSet::new();
        let mut found = Vec::new();
        for term in search_terms {
            let query = self.query_for(term);
            let posts = self
                .platform
                .search(&query, self.config.max_results)
                .await?;
            debug!(query = %query, results = posts.len(), "Search returned");
            for post in posts {
                if seen.insert(post.content_id.clone()) {
                    found.push(post);
                }
            }
        }
        report.found = found.len();

        let metric = self.config.engagement_metric;
        let mut candidates: Vec<CandidatePost> = found
            .into_iter()
            .filter(|post| post.engagement(metric) >= min_engagement)
            .filter(|post| !self.dedup.already_engaged(&post.content_id))
            .collect();
        candidates.sort_by_key(|post| std::cmp::Reverse(post.engagement(metric)));
        report.eligible = candidates.len();
        candidates.truncate(self.config.batch_size);

        for (index, candidate) in candidates.iter().enumerate() {
            if index > 0 {
                self.clock.sleep(self.config.cooldown()).await;
            }

            match self.engage(candidate).await {
                Ok(Engagement::Replied(post_id)) => {
                    debug!(content_id = %candidate.content_id, reply_id = %post_id, "Replied");
                    report.replied += 1;
                }
                Ok(Engagement::TooLong) => report.too_long += 1,
                Err(e) => {
                    error!(
                        content_id = %candidate.content_id,
                        error = %e,
                        "Failed to engage with post"
                    );
                    report.failed += 1;
                }
            }
        }

        info!(
            found = report.found,
            eligible = report.eligible,
            replied = report.replied,
            too_long = report.too_long,
            failed = report.failed,
            "Monitor cycle finished"
        );
        Ok(report)
    }

    fn query_for(&self, term: &str) -> String {
        let suffix = self.config.query_suffix.trim();
        if suffix.is_empty() {
            term.to_string()
        } else {
            format!("{} {}", term, suffix)
        }
    }

    #[instrument(
        skip(self, candidate),
        fields(
            content_id = %candidate.content_id,
            author = %candidate.author,
            engagement = candidate.engagement(self.config.engagement_metric)
        )
    )]
    async fn engage(&mut self, candidate: &CandidatePost) -> MorpheusResult<Engagement> {
        let max_len = self.platform.max_post_length();
        let prompt = self
            .prompts
            .reply_prompt(&candidate.author, &candidate.text, max_len);

        let mut reply = None;
        for attempt in 1..=self.config.max_reply_attempts {
            let text = sanitize(&self.assistant.submit_with(&prompt).await?);
            let len = char_len(&text);
            if len > 0 && len <= max_len {
                reply = Some(text);
                break;
            }
            warn!(attempt, len, max_len, "Generated reply unusable, requesting another");
        }

        let Some(text) = reply else {
            warn!(
                attempts = self.config.max_reply_attempts,
                "Giving up on post, no reply fit the length limit"
            );
            return Ok(Engagement::TooLong);
        };

        let post_id = self
            .publisher
            .reply(&text, &PostId::new(candidate.content_id.as_str()))
            .await?;

        if let Err(e) = self.dedup.mark_engaged(&candidate.content_id) {
            error!(error = %e, "Reply published but not recorded in dedup store");
        }
        Ok(Engagement::Replied(post_id))
    }
}
