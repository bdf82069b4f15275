//! Command handlers.

use super::commands::{AssistantArgs, TwitterArgs};
use morpheus_bot::{BotConfig, BotLoop};
use morpheus_error::{ConfigError, MorpheusResult};
use morpheus_interface::{AssistantService, SocialPlatform, SystemClock};
use morpheus_models::{NewAssistant, OpenAiAssistantClient};
use morpheus_social::{TwitterClient, TwitterCredentials};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, instrument};

struct Services {
    assistant: Arc<dyn AssistantService>,
    platform: Arc<dyn SocialPlatform>,
}

/// Builds both service clients and checks their credentials.
///
/// Any failure here is fatal: the loop never starts with bad credentials.
async fn connect(assistant: &AssistantArgs, twitter: &TwitterArgs) -> MorpheusResult<Services> {
    let openai = OpenAiAssistantClient::new(assistant.openai_api_key.as_str())
        .with_assistant_id(assistant.assistant_id.as_str());
    openai.verify().await?;

    let credentials = TwitterCredentials::new(
        twitter.api_key.as_str(),
        twitter.api_key_secret.as_str(),
        twitter.access_token.as_str(),
        twitter.access_token_secret.as_str(),
        twitter.bearer_token.as_str(),
    );
    let mut client = TwitterClient::new(credentials);
    if let Some(max_post_length) = twitter.max_post_length {
        client = client.with_max_post_length(max_post_length);
    }
    let handle = client.verify_credentials().await?;
    info!(account = %handle, "Credentials verified");

    Ok(Services {
        assistant: Arc::new(openai),
        platform: Arc::new(client),
    })
}

/// Handle the `run` command.
#[instrument(skip_all)]
pub async fn run_bot(
    config_path: Option<&Path>,
    assistant: &AssistantArgs,
    twitter: &TwitterArgs,
) -> MorpheusResult<()> {
    let config = BotConfig::load(config_path)?;
    let services = connect(assistant, twitter).await?;
    let mut bot = BotLoop::from_config(
        &config,
        services.assistant,
        services.platform,
        Arc::new(SystemClock),
        false,
    )?;

    info!("Bot running. Press Ctrl+C to stop.");
    bot.run_until(shutdown_signal()).await;
    info!("Bot stopped");
    Ok(())
}

/// Handle the `test` command.
#[instrument(skip(config_path, assistant, twitter))]
pub async fn run_test(
    config_path: Option<&Path>,
    dry_run: bool,
    assistant: &AssistantArgs,
    twitter: &TwitterArgs,
) -> MorpheusResult<()> {
    let config = BotConfig::load(config_path)?;
    let services = connect(assistant, twitter).await?;
    let bot = BotLoop::from_config(
        &config,
        services.assistant,
        services.platform,
        Arc::new(SystemClock),
        dry_run,
    )?;

    let post_id = bot.run_once().await?;
    info!(post_id = %post_id, "Test post complete");
    println!("{}", post_id);
    Ok(())
}

/// Handle the `create-assistant` command.
#[instrument(skip(api_key, instructions_file))]
pub async fn create_assistant(
    name: &str,
    model: &str,
    instructions_file: &Path,
    api_key: &str,
) -> MorpheusResult<()> {
    let instructions = std::fs::read_to_string(instructions_file).map_err(|e| {
        ConfigError::new(format!(
            "Failed to read instructions from {}: {}",
            instructions_file.display(),
            e
        ))
    })?;

    let definition = NewAssistant::builder()
        .name(name)
        .model(model)
        .instructions(instructions)
        .build()
        .map_err(|e| ConfigError::new(format!("Invalid assistant definition: {}", e)))?;

    let assistant_id = OpenAiAssistantClient::new(api_key)
        .create_assistant(&definition)
        .await?;
    info!(assistant_id = %assistant_id, "Assistant created");
    println!("{}", assistant_id);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Cannot listen for Ctrl+C, running until killed");
        std::future::pending::<()>().await;
    }
}
