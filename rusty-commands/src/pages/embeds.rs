use twilight_model::{channel::message::embed::Embed, gateway::payload::incoming::MessageCreate};

use crate::CommandMeta;
use crate::pages::{open_session, parse_count, reply_usage};
use rusty_core::Context;
use rusty_pager::embed::build_embed;
use rusty_pager::pagination::{ControlLayout, DataWindow, RenderStrategy};

pub const META: CommandMeta = CommandMeta {
    name: "pageembeds",
    desc: "Flip through a deck of embeds, one per page.",
    category: "pages",
    usage: "!pageembeds [count]",
};

const DEFAULT_COUNT: usize = 8;

const CARD_COLORS: [u32; 4] = [0x58_65_F2, 0x57_F2_87, 0xFE_E7_5C, 0xEB_45_9E];

/// Open a passthrough session where every item is a complete embed.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let Some(count) = parse_count(arg1, DEFAULT_COUNT) else {
        return reply_usage(&ctx, &msg, META.usage).await;
    };

    let window = DataWindow::bounded(embed_deck(count)?, 1)?;
    let layout = ControlLayout {
        page_buttons: true,
        page_select: false,
        jump_button: true,
    };

    open_session(&ctx, &msg, window, RenderStrategy::Passthrough, None, layout).await
}

fn embed_deck(count: usize) -> anyhow::Result<Vec<Embed>> {
    (1..=count)
        .map(|i| {
            let color = CARD_COLORS[(i - 1) % CARD_COLORS.len()];
            let description = format!("This is card {i} of {count}.");
            build_embed(&format!("Card {i}"), description, color, Some("Embed deck"))
        })
        .collect()
}
