//! Tests for OpenAI Assistants payload conversions.

use morpheus_core::{JobId, JobStatus};
use morpheus_models::openai::conversion::{
    job_id, latest_assistant_text, map_status, run_to_report, split_job_id,
};
use morpheus_models::openai::dto::{MessageList, RunObject};
use serde_json::json;

fn run(value: serde_json::Value) -> RunObject {
    serde_json::from_value(value).expect("valid run object")
}

#[test]
fn test_job_id_round_trips_thread_and_run() {
    let id = job_id("thread_abc", "run_123");
    assert_eq!(id.as_str(), "thread_abc/run_123");

    let (thread, run) = split_job_id(&id).expect("splittable id");
    assert_eq!(thread, "thread_abc");
    assert_eq!(run, "run_123");
}

#[test]
fn test_split_job_id_rejects_malformed_ids() {
    assert!(split_job_id(&JobId::new("run_only")).is_err());
    assert!(split_job_id(&JobId::new("/run_123")).is_err());
    assert!(split_job_id(&JobId::new("thread_abc/")).is_err());
}

#[test]
fn test_status_mapping() {
    assert_eq!(map_status("queued"), Some(JobStatus::Pending));
    assert_eq!(map_status("in_progress"), Some(JobStatus::Running));
    assert_eq!(map_status("cancelling"), Some(JobStatus::Running));
    assert_eq!(map_status("requires_action"), Some(JobStatus::AwaitingAction));
    assert_eq!(map_status("completed"), Some(JobStatus::Completed));
    for terminal in ["failed", "cancelled", "expired", "incomplete"] {
        assert_eq!(map_status(terminal), Some(JobStatus::Failed), "{terminal}");
    }
    assert_eq!(map_status("sleeping"), None);
}

#[test]
fn test_requires_action_collects_tool_call_ids() {
    let report = run_to_report(&run(json!({
        "id": "run_1",
        "thread_id": "thread_1",
        "status": "requires_action",
        "required_action": {
            "type": "submit_tool_outputs",
            "submit_tool_outputs": {
                "tool_calls": [
                    {"id": "call_a", "type": "function", "function": {"name": "x", "arguments": "{}"}},
                    {"id": "call_b", "type": "function", "function": {"name": "y", "arguments": "{}"}}
                ]
            }
        }
    })))
    .expect("known status");

    assert_eq!(report.status, JobStatus::AwaitingAction);
    assert_eq!(report.pending_actions, vec!["call_a", "call_b"]);
}

#[test]
fn test_failed_run_carries_last_error() {
    let report = run_to_report(&run(json!({
        "id": "run_1",
        "thread_id": "thread_1",
        "status": "failed",
        "last_error": {"code": "rate_limit_exceeded", "message": "Slow down"}
    })))
    .expect("known status");

    assert_eq!(report.status, JobStatus::Failed);
    assert_eq!(
        report.failure_reason.as_deref(),
        Some("rate_limit_exceeded: Slow down")
    );
}

#[test]
fn test_expired_run_without_error_still_has_reason() {
    let report = run_to_report(&run(json!({
        "id": "run_1",
        "thread_id": "thread_1",
        "status": "expired"
    })))
    .expect("known status");

    assert_eq!(report.status, JobStatus::Failed);
    assert!(report.failure_reason.unwrap().contains("expired"));
}

#[test]
fn test_unknown_status_is_malformed() {
    let result = run_to_report(&run(json!({
        "id": "run_1",
        "thread_id": "thread_1",
        "status": "pondering"
    })));
    assert!(result.is_err());
}

#[test]
fn test_latest_assistant_text_skips_user_and_non_text_parts() {
    let messages: MessageList = serde_json::from_value(json!({
        "object": "list",
        "data": [
            {
                "id": "msg_3",
                "role": "assistant",
                "content": [
                    {"type": "image_file", "image_file": {"file_id": "file_1"}},
                    {"type": "text", "text": {"value": "  Ouroboros is proof of stake.【4:0†source】 ", "annotations": []}}
                ]
            },
            {
                "id": "msg_1",
                "role": "user",
                "content": [{"type": "text", "text": {"value": "Share one insight", "annotations": []}}]
            }
        ]
    }))
    .expect("valid message list");

    assert_eq!(
        latest_assistant_text(&messages).as_deref(),
        Some("Ouroboros is proof of stake.【4:0†source】")
    );
}

#[test]
fn test_latest_assistant_text_none_without_assistant_message() {
    let messages: MessageList = serde_json::from_value(json!({
        "data": [
            {"role": "user", "content": [{"type": "text", "text": {"value": "hi"}}]}
        ]
    }))
    .expect("valid message list");

    assert_eq!(latest_assistant_text(&messages), None);
}
