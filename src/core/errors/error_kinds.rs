// Command failure kinds and the user-facing messages for them.
//
// The Discord layer classifies framework errors into a `CommandFailure`;
// everything about wording lives here so it can be tested without Discord.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of the support code attached to every error reply.
pub const ERROR_CODE_LEN: usize = 12;

/// Known ways a command can fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandFailure {
    CommandNotFound,
    MissingArgument,
    BadArgument,
    GuildOnly,
    MissingUserPermissions,
    MissingBotPermissions,
    OnCooldown,
    NotOwner,
    CheckFailed,
    Forbidden,
    NotFound,
    DiscordServerError,
    HttpFailure,
    GatewayFailure,
    InvalidData,
    CommandFailed,
    /// Anything unrecognised; carries the error's type name
    Unknown(String),
}

impl CommandFailure {
    /// Message shown to the user for this failure.
    pub fn user_message(&self) -> String {
        let msg = match self {
            CommandFailure::CommandNotFound => "That command doesn't exist.",
            CommandFailure::MissingArgument => "You forgot to include a required argument.",
            CommandFailure::BadArgument => {
                "One or more arguments were invalid or in the wrong format."
            }
            CommandFailure::GuildOnly => "This command can't be used in DMs.",
            CommandFailure::MissingUserPermissions => {
                "You don't have the required permissions to use this command."
            }
            CommandFailure::MissingBotPermissions => {
                "I don't have the required permissions to perform that action."
            }
            CommandFailure::OnCooldown => "That command is on cooldown. Try again in a moment.",
            CommandFailure::NotOwner => "Only the bot owner can use this command.",
            CommandFailure::CheckFailed => {
                "You didn't pass a permission or condition check for this command."
            }
            CommandFailure::Forbidden => "I don't have permission to do that.",
            CommandFailure::NotFound => "That resource couldn't be found.",
            CommandFailure::DiscordServerError => "Discord's servers had an internal error.",
            CommandFailure::HttpFailure => "A request to Discord's API failed unexpectedly.",
            CommandFailure::GatewayFailure => {
                "The connection to Discord's gateway failed unexpectedly."
            }
            CommandFailure::InvalidData => "Discord returned invalid or incomplete data.",
            CommandFailure::CommandFailed => {
                "An unexpected error occurred while running that command."
            }
            CommandFailure::Unknown(type_name) => {
                return format!(
                    "An unknown error (`{}`) occurred while processing this command.",
                    type_name
                )
            }
        };
        msg.to_string()
    }

    /// Short label for logs.
    pub fn label(&self) -> &str {
        match self {
            CommandFailure::CommandNotFound => "CommandNotFound",
            CommandFailure::MissingArgument => "MissingArgument",
            CommandFailure::BadArgument => "BadArgument",
            CommandFailure::GuildOnly => "GuildOnly",
            CommandFailure::MissingUserPermissions => "MissingUserPermissions",
            CommandFailure::MissingBotPermissions => "MissingBotPermissions",
            CommandFailure::OnCooldown => "OnCooldown",
            CommandFailure::NotOwner => "NotOwner",
            CommandFailure::CheckFailed => "CheckFailed",
            CommandFailure::Forbidden => "Forbidden",
            CommandFailure::NotFound => "NotFound",
            CommandFailure::DiscordServerError => "DiscordServerError",
            CommandFailure::HttpFailure => "HttpFailure",
            CommandFailure::GatewayFailure => "GatewayFailure",
            CommandFailure::InvalidData => "InvalidData",
            CommandFailure::CommandFailed => "CommandFailed",
            CommandFailure::Unknown(type_name) => type_name,
        }
    }
}

/// Generate a random alphanumeric code users can quote to support.
pub fn new_error_code() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ERROR_CODE_LEN)
        .map(char::from)
        .collect()
}

/// A failure ready to be sent back to the user.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub failure: CommandFailure,
    pub code: String,
}

impl ErrorReport {
    pub fn new(failure: CommandFailure) -> Self {
        Self {
            failure,
            code: new_error_code(),
        }
    }

    /// Full reply text, including the support line.
    pub fn render(&self, support_contact: Option<&str>) -> String {
        let support = match support_contact {
            Some(contact) => format!(
                "If this error persists, please contact `{}`; quote error code **`{}`** when reporting this issue.",
                contact, self.code
            ),
            None => format!(
                "If this error persists, quote error code **`{}`** when reporting this issue to the server staff.",
                self.code
            ),
        };

        format!("{}\n{}", self.failure.user_message(), support)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_alphanumeric() {
        let code = new_error_code();
        assert_eq!(code.len(), ERROR_CODE_LEN);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn unknown_failure_names_the_error_type() {
        let msg = CommandFailure::Unknown("WeirdError".to_string()).user_message();
        assert!(msg.contains("`WeirdError`"));
    }

    #[test]
    fn report_includes_code_and_contact() {
        let report = ErrorReport::new(CommandFailure::NotOwner);
        let text = report.render(Some("mods@example.com"));

        assert!(text.starts_with("Only the bot owner can use this command."));
        assert!(text.contains(&report.code));
        assert!(text.contains("`mods@example.com`"));
    }

    #[test]
    fn report_without_contact_still_has_code() {
        let report = ErrorReport::new(CommandFailure::Forbidden);
        let text = report.render(None);

        assert!(text.contains(&report.code));
        assert!(text.contains("server staff"));
    }
}
