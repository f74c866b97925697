use crate::discord::{Context, Error};

/// Check the bot's responsiveness.
#[poise::command(slash_command, guild_only)]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    let latency = ctx.ping().await;
    ctx.say(format_latency(latency)).await?;
    Ok(())
}

fn format_latency(latency: std::time::Duration) -> String {
    format!("Latency: **`{:.2}`**ms.", latency.as_secs_f64() * 1000.0)
}
