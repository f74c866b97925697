// This is the entry point of the AutoMod bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `infra/` = Implementations of core traits (HTTP, files, environment)
// - `discord/` = Discord-specific adapters (commands, events)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Set up the Discord framework
// 4. Register commands and event handlers

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;

use crate::core::automod::{load_profanity_list, AutoModSettings, ContentScanner, ScanScope};
use crate::discord::automod::handle_message;
use crate::discord::commands::registration::register_commands;
use crate::discord::{Data, Error};
use crate::infra::automod::JsonAutoModSettings;
use crate::infra::profanity::RemoteWordList;
use crate::infra::settings::BotSettings;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

/// Event handler for non-command Discord events.
async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Message { new_message } => {
            handle_message(ctx, new_message, data).await;
        }
        serenity::FullEvent::Ready { data_about_bot } => {
            tracing::info!(
                "Logged in as {} (ID: {})",
                data_about_bot.user.name,
                data_about_bot.user.id
            );
        }
        _ => {}
    }

    Ok(())
}

fn load_automod_settings(settings: &BotSettings) -> AutoModSettings {
    match &settings.automod_config_path {
        Some(path) => JsonAutoModSettings::new(path).load_or_default(),
        None => AutoModSettings::default(),
    }
}

async fn run() -> anyhow::Result<()> {
    let settings = BotSettings::from_env()?;

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // Build the scanner once; it is immutable from here on and shared by Arc.

    let automod_settings = load_automod_settings(&settings);
    let word_source = RemoteWordList::new(settings.profanity_list_url.clone())?;
    let profanity = load_profanity_list(&word_source, &automod_settings.custom_profanity).await;

    let scanner = Arc::new(ContentScanner::from_settings(
        automod_settings,
        Some(profanity),
    ));
    tracing::info!(
        profanity_words = scanner.profanity_len(),
        url_safelist = scanner.url_safelist().len(),
        invite_safelist = scanner.invite_safelist().len(),
        rules = ?scanner.config(),
        "AutoMod scanner ready"
    );

    let data = Data {
        scanner,
        scan_scope: ScanScope::new(settings.automod_guild_ids.iter().copied()),
        support_contact: settings.support_contact.clone(),
    };

    // ========================================================================
    // DISCORD FRAMEWORK SETUP
    // ========================================================================

    // Everything except privileged intents, plus message content for AutoMod.
    let intents =
        serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::MESSAGE_CONTENT;

    let owners = settings
        .owner_ids
        .iter()
        .map(|id| serenity::UserId::new(*id))
        .collect();
    let debug_guild_ids = settings.debug_guild_ids.clone();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: discord::commands::all(),
            owners,
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(discord::errors::on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                register_commands(ctx, &framework.options().commands, &debug_guild_ids).await;
                Ok(data)
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(&settings.token, intents)
        .framework(framework)
        .await?;

    client.start_autosharded().await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    if let Err(e) = dotenv::dotenv() {
        tracing::warn!(
            "No .env file loaded ({}). Proceeding with existing environment variables.",
            e
        );
    }

    if let Err(e) = run().await {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}
