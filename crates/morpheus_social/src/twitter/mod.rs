//! X/Twitter API v2 integration.
//!
//! Writes (`POST /2/tweets`) and `GET /2/users/me` use OAuth 1.0a user
//! context. Search and timeline reads use the app bearer token.

mod client;
pub mod conversions;
pub mod json_models;

pub use client::{TwitterClient, TwitterCredentials};

/// Maximum characters per post on a standard account.
pub const TWITTER_MAX_CHARS: usize = 280;
