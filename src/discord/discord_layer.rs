// Discord layer - commands and event handlers.
//
// **Notice the pattern:**
// 1. Extract primitive data from Discord types
// 2. Call core service
// 3. Act on the result
//
// This layer is THIN - no business logic, just translation.

use crate::core::automod::{ContentScanner, ScanScope};
use std::sync::Arc;

#[path = "commands/command_catalog.rs"]
pub mod commands;

#[path = "automod/message_handler.rs"]
pub mod automod;

#[path = "errors/error_handler.rs"]
pub mod errors;

/// Type alias for our bot's context.
/// This is what every command receives as its first parameter.
pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Data that's shared across all commands and event handlers.
pub struct Data {
    pub scanner: Arc<ContentScanner>,
    pub scan_scope: ScanScope,
    /// Shown in error replies so users know who to contact
    pub support_contact: Option<String>,
}
