//! Fakes for exercising the bot without network access.
//!
//! - `FakeClock` advances instantly on sleep and records every pause
//! - `ScriptedAssistant` replays status reports and generated texts
//! - `RecordingPlatform` replays search results and records every write

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use morpheus_core::{CandidatePost, CandidatePostBuilder, JobId, JobStatus, PostId, RemoteJobReport};
use morpheus_error::{JobError, MorpheusResult, PlatformError, PlatformErrorKind};
use morpheus_interface::{AssistantService, Clock, SocialPlatform};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::Notify;

/// 2026-10-18 12:30:00 UTC, outside every default slot window.
pub fn midday() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 12, 30, 0).unwrap()
}

/// Clock that jumps forward on `sleep` instead of waiting.
pub struct FakeClock {
    now: Mutex<DateTime<Utc>>,
    sleeps: Mutex<Vec<Duration>>,
    stop_after: Option<usize>,
    stopped: Notify,
}

impl FakeClock {
    /// Clock starting at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
            sleeps: Mutex::new(Vec::new()),
            stop_after: None,
            stopped: Notify::new(),
        }
    }

    /// Clock that signals [`stopped`](Self::stopped) once `count` sleeps happened.
    pub fn stopping_after(start: DateTime<Utc>, count: usize) -> Self {
        Self {
            stop_after: Some(count),
            ..Self::new(start)
        }
    }

    /// Every pause requested so far.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }

    /// Moves time forward without recording a sleep.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += chrono::Duration::from_std(by).unwrap();
    }

    /// Resolves once the configured number of sleeps happened.
    pub async fn stopped(&self) {
        self.stopped.notified().await;
    }
}

#[async_trait]
impl Clock for FakeClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }

    async fn sleep(&self, duration: Duration) {
        self.advance(duration);
        let count = {
            let mut sleeps = self.sleeps.lock().unwrap();
            sleeps.push(duration);
            sleeps.len()
        };
        if self.stop_after == Some(count) {
            self.stopped.notify_one();
        }
    }
}

/// Assistant that replays scripted status reports.
///
/// Once the scripted reports run out every poll answers `fallback`.
/// Completed jobs return the next scripted text, or the last one again.
pub struct ScriptedAssistant {
    statuses: Mutex<VecDeque<RemoteJobReport>>,
    fallback: JobStatus,
    texts: Mutex<VecDeque<String>>,
    last_text: Mutex<String>,
    prompts: Mutex<Vec<String>>,
    polls: Mutex<usize>,
    acknowledged: Mutex<Vec<Vec<String>>>,
    cancelled: Mutex<Vec<JobId>>,
}

impl ScriptedAssistant {
    /// Assistant whose jobs complete on the first poll with `texts` in order.
    pub fn completing(texts: &[&str]) -> Self {
        Self::build(Vec::new(), JobStatus::Completed, texts)
    }

    /// Assistant whose jobs stay running forever.
    pub fn never_completing() -> Self {
        Self::build(Vec::new(), JobStatus::Running, &[])
    }

    /// Assistant replaying `statuses`, then completing with `text`.
    pub fn with_statuses(statuses: Vec<RemoteJobReport>, text: &str) -> Self {
        Self::build(statuses, JobStatus::Completed, &[text])
    }

    fn build(statuses: Vec<RemoteJobReport>, fallback: JobStatus, texts: &[&str]) -> Self {
        Self {
            statuses: Mutex::new(statuses.into()),
            fallback,
            texts: Mutex::new(texts.iter().map(|t| t.to_string()).collect()),
            last_text: Mutex::new(String::new()),
            prompts: Mutex::new(Vec::new()),
            polls: Mutex::new(0),
            acknowledged: Mutex::new(Vec::new()),
            cancelled: Mutex::new(Vec::new()),
        }
    }

    /// Prompts submitted so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Number of status polls answered.
    pub fn polls(&self) -> usize {
        *self.polls.lock().unwrap()
    }

    /// Action ids acknowledged, one entry per call.
    pub fn acknowledged(&self) -> Vec<Vec<String>> {
        self.acknowledged.lock().unwrap().clone()
    }

    /// Jobs cancelled.
    pub fn cancelled(&self) -> Vec<JobId> {
        self.cancelled.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssistantService for ScriptedAssistant {
    async fn create_job(&self, prompt: &str) -> Result<JobId, JobError> {
        let mut prompts = self.prompts.lock().unwrap();
        prompts.push(prompt.to_string());
        Ok(JobId::new(format!("thread_{0}/run_{0}", prompts.len())))
    }

    async fn job_status(&self, _job_id: &JobId) -> Result<RemoteJobReport, JobError> {
        *self.polls.lock().unwrap() += 1;
        Ok(self
            .statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| RemoteJobReport::status(self.fallback)))
    }

    async fn acknowledge_actions(
        &self,
        _job_id: &JobId,
        action_ids: &[String],
    ) -> Result<(), JobError> {
        self.acknowledged.lock().unwrap().push(action_ids.to_vec());
        Ok(())
    }

    async fn job_result(&self, _job_id: &JobId) -> Result<String, JobError> {
        let mut last = self.last_text.lock().unwrap();
        if let Some(next) = self.texts.lock().unwrap().pop_front() {
            *last = next;
        }
        Ok(last.clone())
    }

    async fn cancel_job(&self, job_id: &JobId) -> Result<(), JobError> {
        self.cancelled.lock().unwrap().push(job_id.clone());
        Ok(())
    }

    async fn verify(&self) -> MorpheusResult<()> {
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}

/// Platform replaying search results and recording writes.
///
/// Each search call consumes the next scripted result; once they run out,
/// searches return nothing.
pub struct RecordingPlatform {
    searches: Mutex<VecDeque<Result<Vec<CandidatePost>, PlatformErrorKind>>>,
    queries: Mutex<Vec<String>>,
    posts: Mutex<Vec<String>>,
    replies: Mutex<Vec<(String, String)>>,
    history: Mutex<Result<Vec<PostId>, PlatformErrorKind>>,
    reply_failures: Mutex<Vec<String>>,
}

impl Default for RecordingPlatform {
    fn default() -> Self {
        Self {
            searches: Mutex::new(VecDeque::new()),
            queries: Mutex::new(Vec::new()),
            posts: Mutex::new(Vec::new()),
            replies: Mutex::new(Vec::new()),
            history: Mutex::new(Ok(vec![PostId::new("earlier")])),
            reply_failures: Mutex::new(Vec::new()),
        }
    }
}

impl RecordingPlatform {
    /// Queues the result of the next search call.
    pub fn push_search(&self, result: Result<Vec<CandidatePost>, PlatformErrorKind>) {
        self.searches.lock().unwrap().push_back(result);
    }

    /// Sets what `own_recent_posts` answers.
    pub fn set_history(&self, history: Result<Vec<PostId>, PlatformErrorKind>) {
        *self.history.lock().unwrap() = history;
    }

    /// Makes replies to `content_id` fail.
    pub fn fail_replies_to(&self, content_id: &str) {
        self.reply_failures
            .lock()
            .unwrap()
            .push(content_id.to_string());
    }

    /// Queries searched so far.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    /// Top-level posts published.
    pub fn posts(&self) -> Vec<String> {
        self.posts.lock().unwrap().clone()
    }

    /// Replies published as (parent id, text).
    pub fn replies(&self) -> Vec<(String, String)> {
        self.replies.lock().unwrap().clone()
    }

    /// Parent ids of published replies, in order.
    pub fn reply_parents(&self) -> Vec<String> {
        self.replies().into_iter().map(|(parent, _)| parent).collect()
    }
}

#[async_trait]
impl SocialPlatform for RecordingPlatform {
    async fn search(
        &self,
        query: &str,
        _max_results: usize,
    ) -> Result<Vec<CandidatePost>, PlatformError> {
        self.queries.lock().unwrap().push(query.to_string());
        match self.searches.lock().unwrap().pop_front() {
            Some(Ok(posts)) => Ok(posts),
            Some(Err(kind)) => Err(PlatformError::new(kind)),
            None => Ok(Vec::new()),
        }
    }

    async fn create_post(&self, text: &str) -> Result<PostId, PlatformError> {
        let mut posts = self.posts.lock().unwrap();
        posts.push(text.to_string());
        Ok(PostId::new(format!("post_{}", posts.len())))
    }

    async fn create_reply(&self, text: &str, parent: &PostId) -> Result<PostId, PlatformError> {
        if self
            .reply_failures
            .lock()
            .unwrap()
            .iter()
            .any(|id| id == parent.as_str())
        {
            return Err(PlatformError::new(PlatformErrorKind::DuplicateContent(
                "duplicate".to_string(),
            )));
        }
        let mut replies = self.replies.lock().unwrap();
        replies.push((parent.as_str().to_string(), text.to_string()));
        Ok(PostId::new(format!("reply_{}", replies.len())))
    }

    async fn own_recent_posts(&self, _limit: usize) -> Result<Vec<PostId>, PlatformError> {
        self.history
            .lock()
            .unwrap()
            .clone()
            .map_err(PlatformError::new)
    }

    async fn verify_credentials(&self) -> MorpheusResult<String> {
        Ok("morpheus_test".to_string())
    }

    fn max_post_length(&self) -> usize {
        280
    }

    fn platform_name(&self) -> &'static str {
        "recording"
    }
}

/// Candidate with the given id, author and like count.
pub fn candidate(content_id: &str, likes: u64) -> CandidatePost {
    CandidatePostBuilder::default()
        .content_id(content_id)
        .author(format!("author_{}", content_id))
        .text(format!("Post {} about Cardano", content_id))
        .like_count(likes)
        .build()
        .unwrap()
}
