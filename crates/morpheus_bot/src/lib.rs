//! Orchestration core of the Morpheus content bot.
//!
//! The bot asks a hosted assistant for short posts and replies and publishes
//! them on a social platform:
//! - **SchedulePlanner** decides when a scheduled post is due
//! - **AssistantJobClient** submits prompts and polls jobs to completion
//! - **CommunityMonitor** finds popular posts and replies to them once
//! - **BotLoop** ties everything into one tick per wake-up
//!
//! Services are injected as trait objects, so every component runs against
//! fakes in tests.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assistant;
mod bot_loop;
mod config;
mod dedup;
mod monitor;
mod prompts;
mod publisher;
mod sanitize;
mod schedule;

pub use assistant::AssistantJobClient;
pub use bot_loop::{BotLoop, TickReport};
pub use config::{
    AssistantConfig, BotConfig, DedupConfig, MonitorConfig, RuntimeConfig, ScheduleConfig,
};
pub use dedup::DedupTracker;
pub use monitor::{CommunityMonitor, MonitorReport};
pub use prompts::Prompts;
pub use publisher::Publisher;
pub use sanitize::{char_len, sanitize};
pub use schedule::SchedulePlanner;
