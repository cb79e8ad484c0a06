pub mod pages;
pub mod utility;

use tracing::debug;
use twilight_model::gateway::payload::incoming::{InteractionCreate, MessageCreate};

use rusty_core::Context;
use rusty_pager::COMMAND_PREFIX;
use rusty_pager::pagination::handle_pagination_interaction;

// Global command meta data
pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::ping::META,
    utility::help::META,
    utility::confirm::META,
    pages::list::META,
    pages::embeds::META,
    pages::stream::META,
    pages::custom::META,
    // Add new commands here
];

pub async fn handle_message(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    if msg.author.bot {
        return Ok(());
    }

    let content_owned = msg.content.clone();
    let content = content_owned.trim();

    if !content.starts_with(COMMAND_PREFIX) {
        return Ok(());
    }

    let content = content.trim_start_matches(COMMAND_PREFIX).trim();
    let mut command_and_rest = content.splitn(2, char::is_whitespace);
    let cmd = command_and_rest.next().unwrap_or("").to_ascii_lowercase();
    let rest = command_and_rest.next().map(str::trim);
    let arg1 = rest.and_then(|rest| rest.split_whitespace().next());

    match cmd.as_str() {
        "ping" => utility::ping::run(ctx.clone(), msg).await?,
        "help" => utility::help::run(ctx.clone(), msg, arg1).await?,
        "confirm" => utility::confirm::run(ctx.clone(), msg, rest).await?,

        "pagelist" => pages::list::run(ctx.clone(), msg, arg1).await?,
        "pageembeds" => pages::embeds::run(ctx.clone(), msg, arg1).await?,
        "pagestream" => pages::stream::run(ctx.clone(), msg, arg1).await?,
        "pagecustom" => pages::custom::run(ctx.clone(), msg, arg1).await?,
        // Add new commands here
        _ => {}
    }

    Ok(())
}

pub async fn handle_interaction(
    ctx: Context,
    interaction: Box<InteractionCreate>,
) -> anyhow::Result<()> {
    let handled = handle_pagination_interaction(&ctx.http, &ctx.pager, &interaction).await?;
    if !handled {
        debug!(interaction_id = interaction.id.get(), "ignoring unrouted interaction");
    }

    Ok(())
}
