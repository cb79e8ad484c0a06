use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::pages::open_session;
use crate::{COMMANDS, CommandMeta};
use rusty_core::Context;
use rusty_pager::pagination::{ControlLayout, DataWindow, PageItem, RenderStrategy};

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "Lists out all available commands.",
    category: "utility",
    usage: "!help [category]",
};

const HELP_COMMANDS_PER_PAGE: usize = 5;

/// One catalog line per command.
struct HelpEntry(&'static CommandMeta);

impl PageItem for HelpEntry {
    fn line(&self) -> String {
        format!("**{}** `{}`\n{}", self.0.category, self.0.usage, self.0.desc)
    }
}

/// Render the command catalog, optionally filtered by category.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;

    let mut categories: Vec<&str> = COMMANDS.iter().map(|c| c.category).collect();
    categories.sort_unstable();
    categories.dedup();

    if let Some(wanted_category) = arg1
        && !categories.contains(&wanted_category)
    {
        let out = format!(
            "Unknown category `{wanted_category}`. Available: {}.",
            categories.join(", ")
        );
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    }

    let entries = sorted_commands(arg1).into_iter().map(HelpEntry).collect();
    let window = DataWindow::bounded(entries, HELP_COMMANDS_PER_PAGE)?;

    open_session(
        &ctx,
        &msg,
        window,
        RenderStrategy::JoinedText,
        Some("Available Commands".to_owned()),
        ControlLayout::default(),
    )
    .await
}

fn sorted_commands(category: Option<&str>) -> Vec<&'static CommandMeta> {
    let mut filtered: Vec<&'static CommandMeta> = COMMANDS
        .iter()
        .filter(|cmd| match category {
            Some(wanted) => cmd.category == wanted,
            None => true,
        })
        .collect();

    filtered.sort_unstable_by(|left, right| {
        left.category
            .cmp(right.category)
            .then_with(|| left.name.cmp(right.name))
    });

    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_commands_filters_by_category() {
        let pages = sorted_commands(Some("pages"));
        assert_eq!(pages.len(), 4);
        assert!(pages.iter().all(|cmd| cmd.category == "pages"));
        assert_eq!(pages[0].name, "pagecustom");

        let all = sorted_commands(None);
        assert_eq!(all.len(), COMMANDS.len());
        assert_eq!(all[0].category, "pages");
    }
}
