// Core AutoMod module - message content scanning.
// Following the same pattern as the other core modules: models + service.

pub mod automod_models;
pub mod content_scanner;
pub mod normalization;
pub mod profanity_source;

pub use automod_models::*;
pub use content_scanner::ContentScanner;
pub use profanity_source::{load_profanity_list, ProfanityError, ProfanitySource};
