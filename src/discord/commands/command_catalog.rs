// Discord commands module.
// Each feature gets its own command file.

use crate::discord::{Data, Error};

pub mod ping;
pub mod registration;

/// Every command the bot registers, in help order.
pub fn all() -> Vec<poise::Command<Data, Error>> {
    vec![ping::ping()]
}
