use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use crate::pages::{open_session, parse_count, reply_usage};
use rusty_core::Context;
use rusty_pager::embed::{DEFAULT_EMBED_COLOR, build_embed};
use rusty_pager::pagination::{ControlLayout, DataWindow, PageContent, PageContext, RenderStrategy};

pub const META: CommandMeta = CommandMeta {
    name: "pagecustom",
    desc: "Page through numbers with a custom page formatter.",
    category: "pages",
    usage: "!pagecustom [count]",
};

const DEFAULT_COUNT: usize = 40;

/// Open a session whose pages are produced by a custom formatter.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let Some(count) = parse_count(arg1, DEFAULT_COUNT) else {
        return reply_usage(&ctx, &msg, META.usage).await;
    };

    let numbers: Vec<u64> = (1..=count as u64).collect();
    let window = DataWindow::bounded(numbers, ctx.settings.items_per_page)?;
    let layout = ControlLayout {
        page_buttons: true,
        page_select: false,
        jump_button: true,
    };

    open_session(
        &ctx,
        &msg,
        window,
        RenderStrategy::custom(format_squares),
        None,
        layout,
    )
    .await
}

/// Table of squares for the page, with the page sum in the message text.
fn format_squares(numbers: &[u64], page_index: usize, ctx: &PageContext) -> anyhow::Result<PageContent> {
    let rows = numbers
        .iter()
        .map(|n| format!("`{n:>4}` squared is `{}`", n * n))
        .collect::<Vec<_>>()
        .join("\n");
    let sum: u64 = numbers.iter().sum();

    let embed = build_embed(
        &format!("Squares, page {}", page_index + 1),
        rows,
        DEFAULT_EMBED_COLOR,
        Some(&ctx.label()),
    )?;

    Ok(PageContent::both(format!("Sum of this page: {sum}"), embed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_squares() {
        let ctx = PageContext {
            page_index: 1,
            total_pages: Some(4),
            items_per_page: 3,
            exhausted: false,
            buffered_items: 12,
        };
        let content = format_squares(&[4, 5, 6], 1, &ctx).unwrap();

        assert_eq!(content.text.as_deref(), Some("Sum of this page: 15"));
        let embed = content.embed.unwrap();
        assert_eq!(embed.title.as_deref(), Some("Squares, page 2"));
        assert!(embed.description.unwrap().contains("`   5` squared is `25`"));
        assert_eq!(embed.footer.map(|footer| footer.text), Some("Page 2/4".to_owned()));
    }
}
