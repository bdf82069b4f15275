//! Conversions between OpenAI Assistants payloads and Morpheus types.

use morpheus_core::{JobId, JobStatus, RemoteJobReport};
use morpheus_error::{JobError, JobErrorKind};

use super::dto::{MessageContent, MessageList, RunObject};

/// Separator between thread id and run id inside a [`JobId`].
const JOB_ID_SEPARATOR: char = '/';

/// Encodes the thread and run ids into one job id.
pub fn job_id(thread_id: &str, run_id: &str) -> JobId {
    JobId::new(format!("{thread_id}{JOB_ID_SEPARATOR}{run_id}"))
}

/// Splits a job id back into `(thread_id, run_id)`.
pub fn split_job_id(job_id: &JobId) -> Result<(&str, &str), JobError> {
    job_id
        .as_str()
        .split_once(JOB_ID_SEPARATOR)
        .filter(|(thread, run)| !thread.is_empty() && !run.is_empty())
        .ok_or_else(|| {
            JobError::new(JobErrorKind::MalformedResponse(format!(
                "Job id '{}' is not of the form thread/run",
                job_id
            )))
        })
}

/// Maps a run status string to a job status.
///
/// Every remote end state other than `completed` counts as a failure.
pub fn map_status(status: &str) -> Option<JobStatus> {
    match status {
        "queued" => Some(JobStatus::Pending),
        "in_progress" | "cancelling" => Some(JobStatus::Running),
        "requires_action" => Some(JobStatus::AwaitingAction),
        "completed" => Some(JobStatus::Completed),
        "failed" | "cancelled" | "expired" | "incomplete" => Some(JobStatus::Failed),
        _ => None,
    }
}

/// Converts a run into a status report.
pub fn run_to_report(run: &RunObject) -> Result<RemoteJobReport, JobError> {
    let status = map_status(&run.status).ok_or_else(|| {
        JobError::new(JobErrorKind::MalformedResponse(format!(
            "Unknown run status '{}'",
            run.status
        )))
    })?;

    let report = match status {
        JobStatus::AwaitingAction => {
            let actions: Vec<String> = run
                .required_action
                .as_ref()
                .and_then(|action| action.submit_tool_outputs.as_ref())
                .map(|outputs| outputs.tool_calls.iter().map(|call| call.id.clone()).collect())
                .unwrap_or_default();
            RemoteJobReport::awaiting(actions)
        }
        JobStatus::Failed => {
            let reason = match &run.last_error {
                Some(err) => match &err.code {
                    Some(code) => format!("{}: {}", code, err.message),
                    None => err.message.clone(),
                },
                None => format!("run ended with status '{}'", run.status),
            };
            RemoteJobReport::failed(reason)
        }
        other => RemoteJobReport::status(other),
    };

    Ok(report)
}

/// Extracts the newest assistant text from a message page ordered newest first.
pub fn latest_assistant_text(messages: &MessageList) -> Option<String> {
    messages
        .data
        .iter()
        .filter(|message| message.role == "assistant")
        .find_map(|message| {
            message.content.iter().find_map(|part| match part {
                MessageContent::Text { text } => Some(text.value.trim().to_string()),
                MessageContent::Other => None,
            })
        })
}
