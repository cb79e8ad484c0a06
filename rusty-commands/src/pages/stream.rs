use std::time::Duration;

use futures::stream::{self, Stream, StreamExt};
use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use crate::pages::{open_session, parse_count, reply_usage};
use rusty_core::Context;
use rusty_pager::pagination::{ControlLayout, DataWindow, RenderStrategy};

pub const META: CommandMeta = CommandMeta {
    name: "pagestream",
    desc: "Page through items produced lazily with simulated latency.",
    category: "pages",
    usage: "!pagestream [count]",
};

const DEFAULT_COUNT: usize = 57;

/// Simulated per-item fetch latency.
const ITEM_LATENCY: Duration = Duration::from_millis(40);

/// Open a streaming session; the page total stays unknown until the producer ends.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let Some(count) = parse_count(arg1, DEFAULT_COUNT) else {
        return reply_usage(&ctx, &msg, META.usage).await;
    };

    let window = DataWindow::from_stream(slow_items(count, ITEM_LATENCY), ctx.settings.items_per_page)?;
    let layout = ControlLayout {
        page_buttons: true,
        page_select: true,
        jump_button: true,
    };

    open_session(
        &ctx,
        &msg,
        window,
        RenderStrategy::JoinedText,
        Some("Streamed Items".to_owned()),
        layout,
    )
    .await
}

fn slow_items(count: usize, latency: Duration) -> impl Stream<Item = String> + Send + 'static {
    stream::iter(1..=count).then(move |i| async move {
        tokio::time::sleep(latency).await;
        format!("Streamed item {i}")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_slow_items_yield_in_order() {
        let items: Vec<String> = slow_items(3, ITEM_LATENCY).collect().await;
        assert_eq!(items, vec!["Streamed item 1", "Streamed item 2", "Streamed item 3"]);
    }
}
