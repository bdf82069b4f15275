//! Morpheus CLI binary.
//!
//! This binary runs the content bot:
//! - `run` posts on schedule and replies to the community until Ctrl-C
//! - `test` publishes (or with `--dry-run`, only logs) a single post
//! - `create-assistant` sets up the assistant that writes the posts

use clap::Parser;
use tracing::error;

mod cli;
mod logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, create_assistant, run_bot, run_test};

    // Credentials may live in .env
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.json_logs)?;

    let config = cli.config.as_deref();
    let result = match &cli.command {
        Commands::Run { assistant, twitter } => run_bot(config, assistant, twitter).await,
        Commands::Test {
            dry_run,
            assistant,
            twitter,
        } => run_test(config, *dry_run, assistant, twitter).await,
        Commands::CreateAssistant {
            name,
            model,
            instructions_file,
            openai_api_key,
        } => create_assistant(name, model, instructions_file, openai_api_key).await,
    };

    if let Err(e) = result {
        error!(fatal = e.is_fatal(), error = %e, "Command failed");
        return Err(e.into());
    }

    Ok(())
}
