// Discord-specific AutoMod handling - translates scan verdicts to Discord actions.

use crate::core::automod::ScanScope;
use crate::discord::errors::http_status;
use crate::discord::Data;
use poise::serenity_prelude as serenity;
use thiserror::Error;

/// Discord rejects audit-log reasons longer than this.
const AUDIT_LOG_REASON_LIMIT: usize = 512;

/// Why a moderation action could not be carried out.
#[derive(Debug, Error)]
pub enum ModerationActionError {
    #[error("missing permissions to delete the message")]
    MissingPermissions,

    #[error("message was already deleted")]
    AlreadyDeleted,

    #[error("Discord request failed: {0}")]
    Request(::serenity::Error),
}

impl From<::serenity::Error> for ModerationActionError {
    fn from(err: ::serenity::Error) -> Self {
        match http_status(&err) {
            Some(403) => ModerationActionError::MissingPermissions,
            Some(404) => ModerationActionError::AlreadyDeleted,
            _ => ModerationActionError::Request(err),
        }
    }
}

/// Whether a message should go through the scanner at all.
///
/// Bot and webhook messages are skipped, as is anything outside a covered guild.
pub fn should_scan(
    author_is_bot: bool,
    is_webhook: bool,
    guild_id: Option<u64>,
    scope: &ScanScope,
) -> bool {
    if author_is_bot || is_webhook {
        return false;
    }

    guild_id.is_some_and(|id| scope.covers(id))
}

/// Audit-log reason for a deletion, cut to Discord's limit.
pub fn audit_reason(reason: &str) -> String {
    format!("AutoMod: {}", reason)
        .chars()
        .take(AUDIT_LOG_REASON_LIMIT)
        .collect()
}

/// Scan an incoming message and delete it on a violation.
///
/// Failures of the delete itself are logged here and never reach the caller.
pub async fn handle_message(ctx: &serenity::Context, msg: &serenity::Message, data: &Data) {
    let guild_id = msg.guild_id.map(|id| id.get());
    if !should_scan(
        msg.author.bot,
        msg.webhook_id.is_some(),
        guild_id,
        &data.scan_scope,
    ) {
        return;
    }

    let result = data.scanner.scan(&msg.content);
    if !result.violated {
        return;
    }

    let reason = result.reason.as_deref().unwrap_or("rule violation");
    tracing::info!(
        guild_id = guild_id.unwrap_or_default(),
        channel_id = msg.channel_id.get(),
        user_id = msg.author.id.get(),
        rule = ?result.rule,
        reason,
        "AutoMod violation"
    );

    match delete_violating_message(ctx, msg, reason).await {
        Ok(()) => {
            tracing::info!(message_id = msg.id.get(), "Deleted violating message");
        }
        Err(e @ (ModerationActionError::MissingPermissions | ModerationActionError::AlreadyDeleted)) => {
            tracing::warn!(message_id = msg.id.get(), "Could not delete violating message: {}", e);
        }
        Err(e) => {
            tracing::error!(message_id = msg.id.get(), "Failed to delete violating message: {}", e);
        }
    }
}

/// Delete a message, citing the violation in the audit log.
pub async fn delete_violating_message(
    ctx: &serenity::Context,
    msg: &serenity::Message,
    reason: &str,
) -> Result<(), ModerationActionError> {
    let audit = audit_reason(reason);
    ctx.http
        .delete_message(msg.channel_id, msg.id, Some(&audit))
        .await?;
    Ok(())
}
