//! OpenAI Assistants API integration (threads and runs).

mod client;
pub mod conversion;
pub mod dto;

pub use client::OpenAiAssistantClient;
pub use dto::{NewAssistant, NewAssistantBuilder};
