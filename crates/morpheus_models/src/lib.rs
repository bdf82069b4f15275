//! Generative-AI assistant integrations for Morpheus.
//!
//! Each provider implements [`morpheus_interface::AssistantService`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod openai;

pub use openai::{NewAssistant, NewAssistantBuilder, OpenAiAssistantClient};
