//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Morpheus - scheduled posts and community replies written by a hosted assistant
#[derive(Parser, Debug)]
#[command(name = "morpheus")]
#[command(about = "Scheduled posts and community replies written by a hosted assistant", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file replacing ./morpheus.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the bot until Ctrl-C
    Run {
        #[command(flatten)]
        assistant: AssistantArgs,

        #[command(flatten)]
        twitter: TwitterArgs,
    },

    /// Generate and publish one post, then exit
    Test {
        /// Generate and log the post without publishing it
        #[arg(long)]
        dry_run: bool,

        #[command(flatten)]
        assistant: AssistantArgs,

        #[command(flatten)]
        twitter: TwitterArgs,
    },

    /// Create the assistant and print its id
    CreateAssistant {
        /// Assistant display name
        #[arg(long, default_value = "Morpheus AI")]
        name: String,

        /// Model backing the assistant
        #[arg(long, default_value = "gpt-4o")]
        model: String,

        /// File holding the assistant's system instructions
        #[arg(long)]
        instructions_file: PathBuf,

        /// OpenAI API key
        #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
        openai_api_key: String,
    },
}

/// Credentials for the assistant service.
#[derive(Args, Debug, Clone)]
pub struct AssistantArgs {
    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: String,

    /// Id of the assistant that writes the posts
    #[arg(long, env = "ASSISTANT_ID")]
    pub assistant_id: String,
}

/// Credentials for X/Twitter.
#[derive(Args, Debug, Clone)]
pub struct TwitterArgs {
    /// OAuth 1.0a consumer key
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// OAuth 1.0a consumer secret
    #[arg(long, env = "API_KEY_SECRET", hide_env_values = true)]
    pub api_key_secret: String,

    /// OAuth 1.0a access token
    #[arg(long, env = "ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: String,

    /// OAuth 1.0a access token secret
    #[arg(long, env = "ACCESS_TOKEN_SECRET", hide_env_values = true)]
    pub access_token_secret: String,

    /// App-only bearer token used for searches
    #[arg(long, env = "BEARER_TOKEN", hide_env_values = true)]
    pub bearer_token: String,

    /// Post length limit, for accounts allowed longer posts
    #[arg(long, env = "TWITTER_MAX_CHARS")]
    pub max_post_length: Option<usize>,
}
