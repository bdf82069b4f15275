//! Service traits consumed by the Morpheus orchestration core.
//!
//! The core never talks to HTTP directly. It receives handles to these traits
//! in its constructors, which keeps every component testable with fakes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod clock;
mod traits;

pub use clock::{Clock, SystemClock};
pub use traits::{AssistantService, SocialPlatform};
