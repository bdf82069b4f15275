//! X/Twitter API v2 client.

use super::TWITTER_MAX_CHARS;
use super::conversions::{classify_failure, page_to_candidates, search_page_size};
use super::json_models::{CreateTweet, CreateTweetResponse, MeResponse, ReplyTarget, TweetPage};
use async_trait::async_trait;
use chrono::Utc;
use derive_getters::Getters;
use morpheus_core::{CandidatePost, PostId};
use morpheus_error::{AuthError, MorpheusResult, PlatformError, PlatformErrorKind};
use morpheus_interface::SocialPlatform;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use reqwest_oauth1::{OAuthClientProvider, Secrets};
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument, warn};

const DEFAULT_BASE_URL: &str = "https://api.twitter.com/2";

/// Tweet fields requested on every read.
const TWEET_FIELDS: &str = "author_id,created_at,public_metrics";

/// Credentials for the X/Twitter API.
#[derive(Debug, Clone, Getters)]
pub struct TwitterCredentials {
    /// OAuth 1.0a consumer key
    consumer_key: String,
    /// OAuth 1.0a consumer secret
    consumer_secret: String,
    /// OAuth 1.0a access token
    access_token: String,
    /// OAuth 1.0a access token secret
    access_token_secret: String,
    /// App-only bearer token
    bearer_token: String,
}

impl TwitterCredentials {
    /// Creates a credential set.
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_token_secret: impl Into<String>,
        bearer_token: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token: access_token.into(),
            access_token_secret: access_token_secret.into(),
            bearer_token: bearer_token.into(),
        }
    }

    fn secrets(&self) -> Secrets<'_> {
        Secrets::new(self.consumer_key.as_str(), self.consumer_secret.as_str())
            .token(self.access_token.as_str(), self.access_token_secret.as_str())
    }
}

/// X/Twitter API v2 client.
#[derive(Debug)]
pub struct TwitterClient {
    client: Client,
    credentials: TwitterCredentials,
    base_url: String,
    max_post_length: usize,
    user_id: OnceCell<String>,
}

impl TwitterClient {
    /// Creates a new client for the standard API host.
    pub fn new(credentials: TwitterCredentials) -> Self {
        Self {
            client: Client::new(),
            credentials,
            base_url: DEFAULT_BASE_URL.to_string(),
            max_post_length: TWITTER_MAX_CHARS,
            user_id: OnceCell::new(),
        }
    }

    /// Overrides the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Overrides the post length limit (premium accounts allow more).
    pub fn with_max_post_length(mut self, max_post_length: usize) -> Self {
        self.max_post_length = max_post_length;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn fetch_me(&self) -> Result<MeResponse, PlatformError> {
        let response = self
            .client
            .clone()
            .oauth1(self.credentials.secrets())
            .get(self.url("/users/me"))
            .send()
            .await
            .map_err(|e| PlatformError::new(PlatformErrorKind::Transport(e.to_string())))?;
        parse(response).await
    }

    async fn user_id(&self) -> Result<&str, PlatformError> {
        self.user_id
            .get_or_try_init(|| async { self.fetch_me().await.map(|me| me.data.id) })
            .await
            .map(String::as_str)
    }

    #[instrument(skip(self, payload), fields(text_len = payload.text.chars().count()))]
    async fn send_tweet(&self, payload: &CreateTweet) -> Result<PostId, PlatformError> {
        let body = serde_json::to_string(payload).map_err(|e| {
            PlatformError::new(PlatformErrorKind::MalformedResponse(format!(
                "Failed to encode tweet: {}",
                e
            )))
        })?;

        let response = self
            .client
            .clone()
            .oauth1(self.credentials.secrets())
            .post(self.url("/tweets"))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| PlatformError::new(PlatformErrorKind::Transport(e.to_string())))?;

        let created: CreateTweetResponse = parse(response).await?;
        debug!(post_id = %created.data.id, "Tweet created");
        Ok(PostId::new(created.data.id))
    }

    async fn get_page(&self, url: String, query: &[(&str, String)]) -> Result<TweetPage, PlatformError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(self.credentials.bearer_token())
            .query(query)
            .send()
            .await
            .map_err(|e| PlatformError::new(PlatformErrorKind::Transport(e.to_string())))?;
        parse(response).await
    }
}

async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, PlatformError> {
    let status = response.status();
    if !status.is_success() {
        let reset = response
            .headers()
            .get("x-rate-limit-reset")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<i64>().ok());
        let body = response.text().await.unwrap_or_default();
        let kind = classify_failure(status.as_u16(), reset, Utc::now().timestamp(), &body);
        warn!(status = status.as_u16(), reason = %kind, "Twitter request rejected");
        return Err(PlatformError::new(kind));
    }

    response.json::<T>().await.map_err(|e| {
        PlatformError::new(PlatformErrorKind::MalformedResponse(format!(
            "Failed to parse response: {}",
            e
        )))
    })
}

#[async_trait]
impl SocialPlatform for TwitterClient {
    #[instrument(skip(self))]
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<CandidatePost>, PlatformError> {
        let page = self
            .get_page(
                self.url("/tweets/search/recent"),
                &[
                    ("query", query.to_string()),
                    ("max_results", search_page_size(max_results).to_string()),
                    ("tweet.fields", TWEET_FIELDS.to_string()),
                    ("expansions", "author_id".to_string()),
                    ("user.fields", "username".to_string()),
                ],
            )
            .await?;

        let candidates = page_to_candidates(page);
        debug!(found = candidates.len(), "Search completed");
        Ok(candidates)
    }

    async fn create_post(&self, text: &str) -> Result<PostId, PlatformError> {
        self.send_tweet(&CreateTweet {
            text: text.to_string(),
            reply: None,
        })
        .await
    }

    #[instrument(skip(self, text, parent), fields(parent = %parent))]
    async fn create_reply(&self, text: &str, parent: &PostId) -> Result<PostId, PlatformError> {
        self.send_tweet(&CreateTweet {
            text: text.to_string(),
            reply: Some(ReplyTarget {
                in_reply_to_tweet_id: parent.as_str().to_string(),
            }),
        })
        .await
    }

    #[instrument(skip(self))]
    async fn own_recent_posts(&self, limit: usize) -> Result<Vec<PostId>, PlatformError> {
        let user_id = self.user_id().await?.to_string();
        let page = self
            .get_page(
                self.url(&format!("/users/{user_id}/tweets")),
                &[("max_results", limit.clamp(5, 100).to_string())],
            )
            .await?;

        let mut ids: Vec<PostId> = page
            .data
            .unwrap_or_default()
            .into_iter()
            .map(|tweet| PostId::new(tweet.id))
            .collect();
        ids.truncate(limit);
        Ok(ids)
    }

    #[instrument(skip(self))]
    async fn verify_credentials(&self) -> MorpheusResult<String> {
        match self.fetch_me().await {
            Ok(me) => {
                // Cache the id for timeline reads.
                let _ = self.user_id.set(me.data.id.clone());
                info!(username = %me.data.username, "Twitter credentials verified");
                Ok(me.data.username)
            }
            Err(e) if e.kind().is_unauthorized() => {
                Err(AuthError::new("twitter", e.kind().to_string()).into())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn max_post_length(&self) -> usize {
        self.max_post_length
    }

    fn platform_name(&self) -> &'static str {
        "twitter"
    }
}
