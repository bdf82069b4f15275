//! Tests for the shared core types.

use chrono::Utc;
use morpheus_core::{
    CandidatePostBuilder, EngagementMetric, GenerationJob, JobId, JobStatus, ScheduleSlot,
};
use std::str::FromStr;

#[test]
fn test_job_status_serializes_snake_case() {
    let json = serde_json::to_string(&JobStatus::AwaitingAction).unwrap();
    assert_eq!(json, "\"awaiting_action\"");
    assert_eq!(
        JobStatus::from_str("timed_out").unwrap(),
        JobStatus::TimedOut
    );
}

#[test]
fn test_terminal_job_ignores_later_transitions() {
    let mut job = GenerationJob::new("prompt", Utc::now());
    job.accept(JobId::new("t/r"));
    job.transition(JobStatus::TimedOut);
    job.complete("late text");
    job.accept(JobId::new("t/other"));

    assert_eq!(*job.status(), JobStatus::TimedOut);
    assert_eq!(*job.result(), None);
    assert_eq!(job.job_id().as_ref().map(JobId::as_str), Some("t/r"));
}

#[test]
fn test_engagement_saturates() {
    let post = CandidatePostBuilder::default()
        .content_id("1")
        .author("a")
        .text("t")
        .like_count(u64::MAX)
        .retweet_count(5u64)
        .build()
        .unwrap();
    assert_eq!(post.engagement(EngagementMetric::LikesAndRetweets), u64::MAX);
    assert_eq!(EngagementMetric::default(), EngagementMetric::LikesAndRetweets);
}

#[test]
fn test_engagement_metric_deserializes_from_config_value() {
    let metric: EngagementMetric = serde_json::from_str("\"likes\"").unwrap();
    assert_eq!(metric, EngagementMetric::Likes);
}

#[test]
fn test_schedule_slot_deserializes() {
    let slot: ScheduleSlot =
        serde_json::from_str(r#"{"hour": 19, "label": "evening"}"#).unwrap();
    assert_eq!(slot, ScheduleSlot::new(19, "evening"));
    assert_eq!(slot.to_string(), "evening (19:00)");
}
