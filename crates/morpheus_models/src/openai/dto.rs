//! OpenAI Assistants API data transfer objects.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Body of `POST /threads/runs`: create a thread holding one user message and
/// start a run on it.
#[derive(Debug, Clone, Serialize)]
pub struct CreateThreadAndRun {
    /// Assistant that should answer
    pub assistant_id: String,
    /// Thread seed
    pub thread: ThreadSeed,
}

impl CreateThreadAndRun {
    /// Request for a single user prompt.
    pub fn for_prompt(assistant_id: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            assistant_id: assistant_id.into(),
            thread: ThreadSeed {
                messages: vec![SeedMessage {
                    role: "user".to_string(),
                    content: prompt.into(),
                }],
            },
        }
    }
}

/// Initial thread contents.
#[derive(Debug, Clone, Serialize)]
pub struct ThreadSeed {
    /// Messages placed on the thread before the run starts
    pub messages: Vec<SeedMessage>,
}

/// A message placed on a new thread.
#[derive(Debug, Clone, Serialize)]
pub struct SeedMessage {
    /// Message role
    pub role: String,
    /// Message text
    pub content: String,
}

/// A run as returned by the runs endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct RunObject {
    /// Run id
    pub id: String,
    /// Thread the run belongs to
    pub thread_id: String,
    /// Raw status string (`queued`, `in_progress`, `requires_action`, ...)
    pub status: String,
    /// Present when the run waits for tool outputs
    #[serde(default)]
    pub required_action: Option<RequiredAction>,
    /// Present when the run failed
    #[serde(default)]
    pub last_error: Option<RunError>,
}

/// Action the run is blocked on.
#[derive(Debug, Clone, Deserialize)]
pub struct RequiredAction {
    /// Tool outputs the run is waiting for
    #[serde(default)]
    pub submit_tool_outputs: Option<SubmitToolOutputs>,
}

/// Tool calls awaiting outputs.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitToolOutputs {
    /// Pending tool calls
    #[serde(default)]
    pub tool_calls: Vec<ToolCallRef>,
}

/// Reference to a pending tool call.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallRef {
    /// Tool call id
    pub id: String,
}

/// Failure details for a run.
#[derive(Debug, Clone, Deserialize)]
pub struct RunError {
    /// Machine-readable code
    #[serde(default)]
    pub code: Option<String>,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
}

/// Body of `POST /threads/{thread}/runs/{run}/submit_tool_outputs`.
#[derive(Debug, Clone, Serialize)]
pub struct ToolOutputs {
    /// One output per pending tool call
    pub tool_outputs: Vec<ToolOutput>,
}

/// Output for a single tool call.
#[derive(Debug, Clone, Serialize)]
pub struct ToolOutput {
    /// Tool call being answered
    pub tool_call_id: String,
    /// Output text
    pub output: String,
}

/// Page of thread messages.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageList {
    /// Messages, in the requested order
    #[serde(default)]
    pub data: Vec<ThreadMessage>,
}

/// A message on a thread.
#[derive(Debug, Clone, Deserialize)]
pub struct ThreadMessage {
    /// `user` or `assistant`
    pub role: String,
    /// Content parts
    #[serde(default)]
    pub content: Vec<MessageContent>,
}

/// A content part of a thread message.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContent {
    /// Text part
    Text {
        /// Text body
        text: TextContent,
    },
    /// Images, files and anything else we do not post
    #[serde(other)]
    Other,
}

/// Text body of a message part.
#[derive(Debug, Clone, Deserialize)]
pub struct TextContent {
    /// Raw text, possibly containing citation markers
    pub value: String,
}

/// Assistant object returned by the assistants endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantObject {
    /// Assistant id (`asst_...`)
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
}

/// Tool enabled on an assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantTool {
    /// Tool type, e.g. `file_search`
    #[serde(rename = "type")]
    pub kind: String,
}

/// Definition of an assistant to create.
///
/// # Examples
///
/// ```
/// use morpheus_models::NewAssistant;
///
/// let definition = NewAssistant::builder()
///     .name("Morpheus AI")
///     .model("gpt-4o")
///     .instructions("You write about Cardano.")
///     .build()
///     .unwrap();
///
/// assert_eq!(definition.tools()[0].kind, "file_search");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Builder, Getters)]
#[builder(setter(into))]
pub struct NewAssistant {
    /// Display name
    name: String,
    /// System instructions
    instructions: String,
    /// Model identifier
    model: String,
    /// Enabled tools
    #[builder(default = "vec![AssistantTool { kind: \"file_search\".to_string() }]")]
    tools: Vec<AssistantTool>,
}

impl NewAssistant {
    /// Creates a new builder for `NewAssistant`.
    pub fn builder() -> NewAssistantBuilder {
        NewAssistantBuilder::default()
    }
}
