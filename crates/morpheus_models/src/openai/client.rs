//! OpenAI Assistants API client.

use super::conversion::{job_id, latest_assistant_text, run_to_report, split_job_id};
use super::dto::{
    AssistantObject, CreateThreadAndRun, MessageList, NewAssistant, RunObject, ToolOutput,
    ToolOutputs,
};
use async_trait::async_trait;
use morpheus_core::{JobId, RemoteJobReport};
use morpheus_error::{AuthError, ConfigError, JobError, JobErrorKind, MorpheusResult};
use morpheus_interface::AssistantService;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const ASSISTANTS_BETA: &str = "assistants=v2";

/// Output sent back for every pending tool call.
const ACKNOWLEDGE_OUTPUT: &str = "Proceed with generating the post.";

/// OpenAI Assistants API client.
///
/// A generation job is one run on a fresh thread. The job id encodes both
/// ids as `thread_id/run_id`.
#[derive(Debug, Clone)]
pub struct OpenAiAssistantClient {
    client: Client,
    api_key: String,
    assistant_id: Option<String>,
    base_url: String,
}

impl OpenAiAssistantClient {
    /// Creates a client that is not yet bound to an assistant.
    ///
    /// Bind one with [`with_assistant_id`](Self::with_assistant_id) before
    /// submitting jobs.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            assistant_id: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Binds the client to an existing assistant.
    pub fn with_assistant_id(mut self, assistant_id: impl Into<String>) -> Self {
        self.assistant_id = Some(assistant_id.into());
        self
    }

    /// Overrides the API base URL (proxies, compatible gateways).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// The bound assistant id, if any.
    pub fn assistant_id(&self) -> Option<&str> {
        self.assistant_id.as_deref()
    }

    /// Creates a new assistant and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an `AuthError` when the API key is rejected, a `JobError`
    /// for any other failure.
    #[instrument(skip(self, definition), fields(name = %definition.name(), model = %definition.model()))]
    pub async fn create_assistant(&self, definition: &NewAssistant) -> MorpheusResult<String> {
        debug!("Creating assistant");
        let response = self
            .request(Method::POST, "/assistants")
            .json(definition)
            .send()
            .await
            .map_err(transport)?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            let (status, body) = read_failure(response).await;
            return Err(AuthError::new("openai", format!("{}: {}", status, body)).into());
        }

        let assistant: AssistantObject = parse(response).await?;
        info!(assistant_id = %assistant.id, "Assistant created");
        Ok(assistant.id)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_key)
            .header("OpenAI-Beta", ASSISTANTS_BETA)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, JobError> {
        let response = request.send().await.map_err(transport)?;
        parse(response).await
    }

    fn bound_assistant(&self) -> Result<&str, JobError> {
        self.assistant_id.as_deref().ok_or_else(|| {
            JobError::new(JobErrorKind::Transport(
                "No assistant id configured".to_string(),
            ))
        })
    }
}

fn transport(err: reqwest::Error) -> JobError {
    JobError::new(JobErrorKind::Transport(format!("Request failed: {}", err)))
}

async fn read_failure(response: Response) -> (u16, String) {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    (status, body)
}

async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, JobError> {
    if !response.status().is_success() {
        let (status, body) = read_failure(response).await;
        return Err(JobError::new(JobErrorKind::Transport(format!(
            "OpenAI returned {}: {}",
            status, body
        ))));
    }

    response.json::<T>().await.map_err(|e| {
        JobError::new(JobErrorKind::MalformedResponse(format!(
            "Failed to parse response: {}",
            e
        )))
    })
}

#[async_trait]
impl AssistantService for OpenAiAssistantClient {
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    async fn create_job(&self, prompt: &str) -> Result<JobId, JobError> {
        let body = CreateThreadAndRun::for_prompt(self.bound_assistant()?, prompt);
        let run: RunObject = self
            .send(self.request(Method::POST, "/threads/runs").json(&body))
            .await?;

        debug!(thread_id = %run.thread_id, run_id = %run.id, status = %run.status, "Run created");
        Ok(job_id(&run.thread_id, &run.id))
    }

    #[instrument(skip(self, job_id), fields(job_id = %job_id))]
    async fn job_status(&self, job_id: &JobId) -> Result<RemoteJobReport, JobError> {
        let (thread_id, run_id) = split_job_id(job_id)?;
        let run: RunObject = self
            .send(self.request(Method::GET, &format!("/threads/{thread_id}/runs/{run_id}")))
            .await?;

        debug!(status = %run.status, "Run status");
        run_to_report(&run)
    }

    #[instrument(skip(self, job_id, action_ids), fields(job_id = %job_id, actions = action_ids.len()))]
    async fn acknowledge_actions(
        &self,
        job_id: &JobId,
        action_ids: &[String],
    ) -> Result<(), JobError> {
        let (thread_id, run_id) = split_job_id(job_id)?;
        let body = ToolOutputs {
            tool_outputs: action_ids
                .iter()
                .map(|id| ToolOutput {
                    tool_call_id: id.clone(),
                    output: ACKNOWLEDGE_OUTPUT.to_string(),
                })
                .collect(),
        };

        let _: RunObject = self
            .send(
                self.request(
                    Method::POST,
                    &format!("/threads/{thread_id}/runs/{run_id}/submit_tool_outputs"),
                )
                .json(&body),
            )
            .await?;
        Ok(())
    }

    #[instrument(skip(self, job_id), fields(job_id = %job_id))]
    async fn job_result(&self, job_id: &JobId) -> Result<String, JobError> {
        let (thread_id, run_id) = split_job_id(job_id)?;
        let messages: MessageList = self
            .send(
                self.request(Method::GET, &format!("/threads/{thread_id}/messages"))
                    .query(&[("order", "desc"), ("limit", "10"), ("run_id", run_id)]),
            )
            .await?;

        latest_assistant_text(&messages).ok_or_else(|| {
            JobError::new(JobErrorKind::MalformedResponse(
                "Completed run produced no assistant text".to_string(),
            ))
        })
    }

    #[instrument(skip(self, job_id), fields(job_id = %job_id))]
    async fn cancel_job(&self, job_id: &JobId) -> Result<(), JobError> {
        let (thread_id, run_id) = split_job_id(job_id)?;
        let run: RunObject = self
            .send(self.request(Method::POST, &format!("/threads/{thread_id}/runs/{run_id}/cancel")))
            .await?;
        debug!(status = %run.status, "Run cancellation requested");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn verify(&self) -> MorpheusResult<()> {
        let assistant_id = self
            .assistant_id
            .as_deref()
            .ok_or_else(|| ConfigError::new("ASSISTANT_ID is not set"))?;

        let response = self
            .request(Method::GET, &format!("/assistants/{assistant_id}"))
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                let (status, body) = read_failure(response).await;
                warn!(status, "OpenAI rejected credentials");
                Err(AuthError::new("openai", format!("{}: {}", status, body)).into())
            }
            StatusCode::NOT_FOUND => {
                Err(ConfigError::new(format!("Assistant {} not found", assistant_id)).into())
            }
            _ => {
                let assistant: AssistantObject = parse(response).await?;
                info!(
                    assistant_id = %assistant.id,
                    name = assistant.name.as_deref().unwrap_or("unnamed"),
                    "Assistant verified"
                );
                Ok(())
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}
