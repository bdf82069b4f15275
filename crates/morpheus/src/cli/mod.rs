//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the morpheus binary.

mod commands;
mod run;

pub use commands::{Cli, Commands};
pub use run::{create_assistant, run_bot, run_test};
