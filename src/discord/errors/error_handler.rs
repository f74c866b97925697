// Framework error hook.
//
// Turns poise's `FrameworkError` into a `CommandFailure`, replies to the user
// with an ephemeral message plus a support code, and logs the details under
// the same code so the two can be matched up later.

use crate::core::errors::{CommandFailure, ErrorReport};
use crate::discord::{Data, Error};

type FrameworkError<'a> = poise::FrameworkError<'a, Data, Error>;

/// HTTP status of a failed Discord API request, if that's what the error is.
pub fn http_status(err: &::serenity::Error) -> Option<u16> {
    match err {
        ::serenity::Error::Http(http) => http.status_code().map(|status| status.as_u16()),
        _ => None,
    }
}

fn classify_serenity_error(err: &::serenity::Error) -> CommandFailure {
    match err {
        ::serenity::Error::Http(_) => match http_status(err) {
            Some(403) => CommandFailure::Forbidden,
            Some(404) => CommandFailure::NotFound,
            Some(status) if status >= 500 => CommandFailure::DiscordServerError,
            _ => CommandFailure::HttpFailure,
        },
        ::serenity::Error::Gateway(_) => CommandFailure::GatewayFailure,
        ::serenity::Error::Json(_) | ::serenity::Error::Model(_) => CommandFailure::InvalidData,
        _ => CommandFailure::CommandFailed,
    }
}

/// Classify an error returned from a command body.
pub fn classify_command_error(err: &(dyn std::error::Error + Send + Sync + 'static)) -> CommandFailure {
    match err.downcast_ref::<::serenity::Error>() {
        Some(serenity_err) => classify_serenity_error(serenity_err),
        None => CommandFailure::CommandFailed,
    }
}

/// Classify any framework error that happened inside a command context.
pub fn classify(error: &FrameworkError<'_>) -> CommandFailure {
    match error {
        poise::FrameworkError::Command { error, .. } => classify_command_error(&**error),
        poise::FrameworkError::CommandPanic { .. } => CommandFailure::CommandFailed,
        poise::FrameworkError::ArgumentParse { input: None, .. } => CommandFailure::MissingArgument,
        poise::FrameworkError::ArgumentParse { .. }
        | poise::FrameworkError::CommandStructureMismatch { .. }
        | poise::FrameworkError::SubcommandRequired { .. } => CommandFailure::BadArgument,
        poise::FrameworkError::CooldownHit { .. } => CommandFailure::OnCooldown,
        poise::FrameworkError::MissingBotPermissions { .. } => {
            CommandFailure::MissingBotPermissions
        }
        poise::FrameworkError::MissingUserPermissions { .. } => {
            CommandFailure::MissingUserPermissions
        }
        poise::FrameworkError::NotAnOwner { .. } => CommandFailure::NotOwner,
        poise::FrameworkError::GuildOnly { .. } => CommandFailure::GuildOnly,
        poise::FrameworkError::DmOnly { .. }
        | poise::FrameworkError::NsfwOnly { .. }
        | poise::FrameworkError::CommandCheckFailed { .. } => CommandFailure::CheckFailed,
        poise::FrameworkError::UnknownCommand { .. }
        | poise::FrameworkError::UnknownInteraction { .. } => CommandFailure::CommandNotFound,
        _ => CommandFailure::Unknown("FrameworkError".to_string()),
    }
}

/// The underlying error text, for logs only.
fn detail(error: &FrameworkError<'_>) -> String {
    match error {
        poise::FrameworkError::Command { error, .. } => error.to_string(),
        poise::FrameworkError::ArgumentParse { error, .. } => error.to_string(),
        poise::FrameworkError::CommandPanic { payload, .. } => payload
            .clone()
            .unwrap_or_else(|| "command panicked".to_string()),
        poise::FrameworkError::CommandCheckFailed {
            error: Some(error), ..
        } => error.to_string(),
        _ => String::new(),
    }
}

/// Registered as `FrameworkOptions::on_error`.
pub async fn on_error(error: FrameworkError<'_>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            tracing::error!("Failed to set up the framework: {}", error);
        }
        poise::FrameworkError::EventHandler { error, .. } => {
            tracing::error!("Error in event handler: {}", error);
        }
        error => {
            let Some(ctx) = error.ctx() else {
                // No command to reply to (e.g. an unknown interaction); let poise log it.
                if let Err(e) = poise::builtins::on_error(error).await {
                    tracing::error!("Error while handling error: {}", e);
                }
                return;
            };

            let report = ErrorReport::new(classify(&error));
            tracing::error!(
                code = %report.code,
                kind = report.failure.label(),
                command = %ctx.command().qualified_name,
                "Command error: {}",
                detail(&error)
            );

            let reply = poise::CreateReply::default()
                .content(report.render(ctx.data().support_contact.as_deref()))
                .ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                tracing::error!(code = %report.code, "Failed to send error reply: {}", e);
            }
        }
    }
}
