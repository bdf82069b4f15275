//! Core data types for the Morpheus content bot.
//!
//! These types are shared by the orchestration crate and the service
//! adapters. Nothing here performs I/O.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod job;
mod post;
mod schedule;

pub use job::{GenerationJob, JobId, JobStatus, RemoteJobReport};
pub use post::{CandidatePost, CandidatePostBuilder, EngagementMetric, PostId};
pub use schedule::ScheduleSlot;
