// The infra module contains implementations of core traits.
// Each feature implementation goes in its own submodule.

#[path = "profanity/mod.rs"]
pub mod profanity;

#[path = "automod/json_settings.rs"]
pub mod automod;

#[path = "settings/env_settings.rs"]
pub mod settings;
