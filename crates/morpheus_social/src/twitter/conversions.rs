//! Conversions from X/Twitter JSON models to Morpheus types.

use chrono::{DateTime, Utc};
use morpheus_core::CandidatePost;
use morpheus_error::PlatformErrorKind;
use std::collections::HashMap;

use super::json_models::TweetPage;

/// Retry delay assumed when a 429 carries no usable reset header.
const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 15 * 60;

/// Converts a search page into candidates, resolving author handles from
/// the `includes.users` expansion.
///
/// Tweets whose author cannot be resolved keep the raw author id. Tweets
/// without metrics count as zero engagement.
pub fn page_to_candidates(page: TweetPage) -> Vec<CandidatePost> {
    let handles: HashMap<String, String> = page
        .includes
        .map(|includes| {
            includes
                .users
                .into_iter()
                .map(|user| (user.id, user.username))
                .collect()
        })
        .unwrap_or_default();

    page.data
        .unwrap_or_default()
        .into_iter()
        .map(|tweet| {
            let author_id = tweet.author_id.unwrap_or_default();
            let author = handles.get(&author_id).cloned().unwrap_or(author_id);
            let metrics = tweet.public_metrics.unwrap_or_default();
            CandidatePost {
                content_id: tweet.id,
                author,
                text: tweet.text,
                like_count: metrics.like_count,
                retweet_count: metrics.retweet_count,
                created_at: tweet.created_at.as_deref().and_then(parse_timestamp),
            }
        })
        .collect()
}

/// Parses an RFC 3339 timestamp, returning `None` when malformed.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Classifies a non-success response.
///
/// * `reset_epoch` - value of the `x-rate-limit-reset` header, if present
/// * `now_epoch` - current unix time, used to turn the reset into a delay
pub fn classify_failure(
    status: u16,
    reset_epoch: Option<i64>,
    now_epoch: i64,
    body: &str,
) -> PlatformErrorKind {
    match status {
        401 => PlatformErrorKind::Unauthorized(body.to_string()),
        403 if body.to_lowercase().contains("duplicate") => {
            PlatformErrorKind::DuplicateContent(body.to_string())
        }
        403 => PlatformErrorKind::Unauthorized(body.to_string()),
        429 => {
            let retry_after_secs = reset_epoch
                .map(|reset| reset.saturating_sub(now_epoch).max(0) as u64)
                .unwrap_or(DEFAULT_RATE_LIMIT_WINDOW_SECS);
            PlatformErrorKind::RateLimited { retry_after_secs }
        }
        _ => PlatformErrorKind::Rejected {
            status,
            message: body.to_string(),
        },
    }
}

/// Clamps a requested page size to what the search endpoint accepts.
pub fn search_page_size(requested: usize) -> usize {
    requested.clamp(10, 100)
}
