//! Social media platform integrations for Morpheus.
//!
//! Each platform implements [`morpheus_interface::SocialPlatform`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod twitter;

pub use twitter::{TwitterClient, TwitterCredentials};
