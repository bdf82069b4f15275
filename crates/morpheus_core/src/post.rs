//! Social post types.

use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Platform-specific post identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{}", _0)]
pub struct PostId(pub String);

impl PostId {
    /// Create a post id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Which counters make up a candidate's engagement score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EngagementMetric {
    /// Likes only
    Likes,
    /// Likes plus reposts
    #[default]
    LikesAndRetweets,
}

/// A third-party post found by search, eligible for a reply.
///
/// # Examples
///
/// ```
/// use morpheus_core::{CandidatePostBuilder, EngagementMetric};
///
/// let post = CandidatePostBuilder::default()
///     .content_id("1790000000000000001")
///     .author("cardano_dev")
///     .text("Hydra heads are live on mainnet")
///     .like_count(40u64)
///     .retweet_count(10u64)
///     .build()
///     .unwrap();
///
/// assert_eq!(post.engagement(EngagementMetric::Likes), 40);
/// assert_eq!(post.engagement(EngagementMetric::LikesAndRetweets), 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(setter(into))]
pub struct CandidatePost {
    /// Platform id of the post
    pub content_id: String,
    /// Author handle, without the leading `@`
    pub author: String,
    /// Post text
    pub text: String,
    /// Like counter
    #[builder(default)]
    pub like_count: u64,
    /// Repost counter
    #[builder(default)]
    pub retweet_count: u64,
    /// When the post was created, if the platform reported it
    #[builder(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl CandidatePost {
    /// Engagement score under the given metric.
    pub fn engagement(&self, metric: EngagementMetric) -> u64 {
        match metric {
            EngagementMetric::Likes => self.like_count,
            EngagementMetric::LikesAndRetweets => {
                self.like_count.saturating_add(self.retweet_count)
            }
        }
    }
}
