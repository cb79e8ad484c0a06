//! Demonstration commands for the pagination engine.

pub mod custom;
pub mod embeds;
pub mod list;
pub mod stream;

use std::sync::Arc;

use tracing::info;
use twilight_model::gateway::payload::incoming::MessageCreate;

use rusty_core::Context;
use rusty_pager::pagination::{
    ControlLayout, DataWindow, NavigationController, PageItem, PaginatorOptions, RenderStrategy,
};

/// Upper bound for the item count argument of the demo commands.
const MAX_DEMO_ITEMS: usize = 1000;

/// Parse an optional item count argument within `1..=MAX_DEMO_ITEMS`.
///
/// Missing input yields `default`; zero, garbage, or oversized counts yield `None`.
pub(crate) fn parse_count(raw: Option<&str>, default: usize) -> Option<usize> {
    match raw {
        Some(value) => value
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|count| (1..=MAX_DEMO_ITEMS).contains(count)),
        None => Some(default),
    }
}

/// Reply with usage text for a malformed count argument.
pub(crate) async fn reply_usage(
    ctx: &Context,
    msg: &MessageCreate,
    usage: &str,
) -> anyhow::Result<()> {
    let out = format!("Usage: `{usage}` (count between 1 and {MAX_DEMO_ITEMS})");
    ctx.http.create_message(msg.channel_id).content(&out).await?;
    Ok(())
}

/// Send the first page of a new session to the message's channel and track it.
pub(crate) async fn open_session<T: PageItem>(
    ctx: &Context,
    msg: &MessageCreate,
    window: DataWindow<T>,
    strategy: RenderStrategy<T>,
    title: Option<String>,
    layout: ControlLayout,
) -> anyhow::Result<()> {
    let session_id = ctx.pager.next_session_id();
    let options = PaginatorOptions {
        strategy,
        title,
        layout,
        idle_timeout: Some(ctx.settings.idle_timeout),
        requester_id: Some(msg.author.id.get()),
        authorizer: None,
    };

    let mut controller =
        NavigationController::new(session_id, window, options, Arc::clone(&ctx.transport));
    controller.start(&msg.channel_id).await?;
    ctx.pager.register(session_id, controller).await;

    info!(
        session_id,
        channel_id = msg.channel_id.get(),
        requester_id = msg.author.id.get(),
        "pagination session opened"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(None, 25), Some(25));
        assert_eq!(parse_count(Some("40"), 25), Some(40));
        assert_eq!(parse_count(Some("0"), 25), None);
        assert_eq!(parse_count(Some("1001"), 25), None);
        assert_eq!(parse_count(Some("lots"), 25), None);
    }
}
