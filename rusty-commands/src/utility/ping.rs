use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use rusty_core::Context;

pub const META: CommandMeta = CommandMeta {
    name: "ping",
    desc: "Replies with Pong! and the number of live sessions",
    category: "utility",
    usage: "!ping",
};

/// Send a connectivity response along with the registry size.
pub async fn run(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    let live = ctx.pager.len().await;
    let out = pong_text(live);
    ctx.http.create_message(msg.channel_id).content(&out).await?;

    Ok(())
}

fn pong_text(live_sessions: usize) -> String {
    match live_sessions {
        1 => "Pong! 1 live session.".to_owned(),
        n => format!("Pong! {n} live sessions."),
    }
}
