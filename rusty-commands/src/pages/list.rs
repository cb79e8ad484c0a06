use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use crate::pages::{open_session, parse_count, reply_usage};
use rusty_core::Context;
use rusty_pager::pagination::{ControlLayout, DataWindow, RenderStrategy};

pub const META: CommandMeta = CommandMeta {
    name: "pagelist",
    desc: "Page through a generated list of entries.",
    category: "pages",
    usage: "!pagelist [count]",
};

const DEFAULT_COUNT: usize = 95;

/// Open a joined-text session with buttons, a page picker, and a jump prompt.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let Some(count) = parse_count(arg1, DEFAULT_COUNT) else {
        return reply_usage(&ctx, &msg, META.usage).await;
    };

    let window = DataWindow::bounded(list_items(count), ctx.settings.items_per_page)?;
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
        Some("Entry List".to_owned()),
        layout,
    )
    .await
}

fn list_items(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("{i}. Entry number {i}")).collect()
}
