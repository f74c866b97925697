// Slash command registration at startup.
//
// Registration failures are logged and never returned: if setup fails, poise
// never stores the shared `Data` and every event handler waits on it forever,
// which would leave AutoMod connected but inert.

use crate::discord::{Data, Error};
use poise::serenity_prelude as serenity;
use std::fmt::Display;
use std::future::Future;

/// Where a set of commands gets registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationTarget {
    Global,
    Guild(u64),
}

/// Per-guild targets when debug guilds are configured, otherwise global.
pub fn registration_targets(debug_guild_ids: &[u64]) -> Vec<RegistrationTarget> {
    if debug_guild_ids.is_empty() {
        vec![RegistrationTarget::Global]
    } else {
        debug_guild_ids
            .iter()
            .map(|id| RegistrationTarget::Guild(*id))
            .collect()
    }
}

/// Run `register` for every target, logging failures and carrying on.
///
/// Returns how many targets succeeded.
pub async fn register_each<F, Fut, E>(targets: &[RegistrationTarget], mut register: F) -> usize
where
    F: FnMut(RegistrationTarget) -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: Display,
{
    let mut registered = 0;

    for target in targets {
        match register(*target).await {
            Ok(()) => {
                tracing::info!(target = ?target, "Registered commands");
                registered += 1;
            }
            Err(e) => {
                tracing::error!(target = ?target, "Failed to register commands: {}", e);
            }
        }
    }

    registered
}

/// Register slash commands per debug guild, or globally when none are set.
pub async fn register_commands(
    ctx: &serenity::Context,
    commands: &[poise::Command<Data, Error>],
    debug_guild_ids: &[u64],
) {
    let targets = registration_targets(debug_guild_ids);
    let registered = register_each(&targets, move |target| async move {
        match target {
            RegistrationTarget::Global => poise::builtins::register_globally(ctx, commands).await,
            RegistrationTarget::Guild(id) => {
                poise::builtins::register_in_guild(ctx, commands, serenity::GuildId::new(id)).await
            }
        }
    })
    .await;

    if registered < targets.len() {
        tracing::warn!(
            registered,
            attempted = targets.len(),
            "Some command registrations failed; AutoMod keeps running"
        );
    }
}
