//! JSON models for X/Twitter API v2 payloads.

use serde::{Deserialize, Serialize};

/// Response of `GET /2/tweets/search/recent` and `GET /2/users/{id}/tweets`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TweetPage {
    /// Matching tweets; absent when nothing matched
    #[serde(default)]
    pub data: Option<Vec<TweetJson>>,
    /// Expanded objects referenced by the tweets
    #[serde(default)]
    pub includes: Option<Includes>,
}

/// A tweet with the fields we request.
#[derive(Debug, Clone, Deserialize)]
pub struct TweetJson {
    /// Tweet id
    pub id: String,
    /// Tweet text
    pub text: String,
    /// Author user id (requires `tweet.fields=author_id`)
    #[serde(default)]
    pub author_id: Option<String>,
    /// RFC 3339 creation time (requires `tweet.fields=created_at`)
    #[serde(default)]
    pub created_at: Option<String>,
    /// Engagement counters (requires `tweet.fields=public_metrics`)
    #[serde(default)]
    pub public_metrics: Option<PublicMetrics>,
}

/// Engagement counters of a tweet.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PublicMetrics {
    /// Likes
    #[serde(default)]
    pub like_count: u64,
    /// Retweets
    #[serde(default)]
    pub retweet_count: u64,
    /// Replies
    #[serde(default)]
    pub reply_count: u64,
    /// Quote tweets
    #[serde(default)]
    pub quote_count: u64,
}

/// Expansions block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Includes {
    /// Users referenced through `expansions=author_id`
    #[serde(default)]
    pub users: Vec<UserJson>,
}

/// A user object.
#[derive(Debug, Clone, Deserialize)]
pub struct UserJson {
    /// User id
    pub id: String,
    /// Handle without `@`
    pub username: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
}

/// Response of `GET /2/users/me`.
#[derive(Debug, Clone, Deserialize)]
pub struct MeResponse {
    /// The authenticated user
    pub data: UserJson,
}

/// Body of `POST /2/tweets`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTweet {
    /// Tweet text
    pub text: String,
    /// Reply settings when answering another tweet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<ReplyTarget>,
}

/// Tweet being replied to.
#[derive(Debug, Clone, Serialize)]
pub struct ReplyTarget {
    /// Parent tweet id
    pub in_reply_to_tweet_id: String,
}

/// Response of `POST /2/tweets`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTweetResponse {
    /// The created tweet
    pub data: CreatedTweet,
}

/// Id and text of a created tweet.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedTweet {
    /// New tweet id
    pub id: String,
    /// Text as stored by the platform
    #[serde(default)]
    pub text: String,
}
