use std::sync::Arc;

use tracing::info;
use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use rusty_core::Context;
use rusty_pager::pagination::{ConfirmationOptions, ConfirmationView};

pub const META: CommandMeta = CommandMeta {
    name: "confirm",
    desc: "Asks a yes/no question and reports the answer",
    category: "utility",
    usage: "!confirm <question>",
};

/// Ask the author a yes/no question and announce the outcome.
///
/// Nothing is announced on timeout; the prompt itself says so.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, question: Option<&str>) -> anyhow::Result<()> {
    let Some(question) = question.map(str::trim).filter(|question| !question.is_empty()) else {
        let out = format!("Usage: `{}`", META.usage);
        ctx.http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    };

    let session_id = ctx.pager.next_session_id();
    let options = ConfirmationOptions {
        idle_timeout: Some(ctx.settings.idle_timeout),
        requester_id: Some(msg.author.id.get()),
        ..ConfirmationOptions::default()
    };

    let (mut view, answer) =
        ConfirmationView::new(session_id, question, options, Arc::clone(&ctx.transport));
    view.start(&msg.channel_id).await?;
    ctx.pager.register(session_id, view).await;

    info!(
        session_id,
        channel_id = msg.channel_id.get(),
        requester_id = msg.author.id.get(),
        "confirmation opened"
    );

    // A dropped sender means the session ended without an answer.
    if let Some(out) = outcome_text(answer.await.ok().flatten()) {
        ctx.http.create_message(msg.channel_id).content(out).await?;
    }

    Ok(())
}

fn outcome_text(answer: Option<bool>) -> Option<&'static str> {
    match answer {
        Some(true) => Some("Confirmed."),
        Some(false) => Some("Cancelled."),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_text() {
        assert_eq!(outcome_text(Some(true)), Some("Confirmed."));
        assert_eq!(outcome_text(Some(false)), Some("Cancelled."));
        assert_eq!(outcome_text(None), None);
    }
}
