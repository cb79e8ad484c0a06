use twilight_model::channel::message::embed::{Embed, EmbedFooter};
use twilight_util::builder::embed::{EmbedBuilder, EmbedFooterBuilder};

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0x90_54_30;
/// Color for formatter and data errors.
pub const ERROR_EMBED_COLOR: u32 = 0xED_42_45;
/// Color for empty or out-of-range pages.
pub const NOTICE_EMBED_COLOR: u32 = 0xE6_7E_22;

/// Maximum characters in an embed description.
pub const EMBED_DESCRIPTION_LIMIT: usize = 4096;
/// Maximum characters in plain message content.
pub const MESSAGE_CONTENT_LIMIT: usize = 2000;

const ELLIPSIS: &str = "...";

/// Build a standard paginated embed with consistent styling.
pub fn build_paginated_embed(
    title: &str,
    description: impl Into<String>,
    footer_text: &str,
) -> anyhow::Result<Embed> {
    build_embed(title, description, DEFAULT_EMBED_COLOR, Some(footer_text))
}

/// Build a validated embed with an optional footer.
pub fn build_embed(
    title: &str,
    description: impl Into<String>,
    color: u32,
    footer_text: Option<&str>,
) -> anyhow::Result<Embed> {
    let mut builder = EmbedBuilder::new().color(color).description(description);

    if !title.is_empty() {
        builder = builder.title(title);
    }

    let embed = match footer_text {
        Some(text) if !text.is_empty() => {
            let footer = EmbedFooterBuilder::new(text).build();
            builder.footer(footer).validate()?.build()
        }
        _ => builder.validate()?.build(),
    };

    Ok(embed)
}

/// Append a footer marker to an existing embed, keeping its icon.
pub fn with_footer_marker(mut embed: Embed, marker: &str) -> Embed {
    let footer = match embed.footer.take() {
        Some(existing) if !existing.text.is_empty() => EmbedFooter {
            text: format!("{} - {marker}", existing.text),
            ..existing
        },
        Some(existing) => EmbedFooter {
            text: marker.to_owned(),
            ..existing
        },
        None => EmbedFooterBuilder::new(marker).build(),
    };

    embed.footer = Some(footer);
    embed
}

/// Cut `text` to at most `max_chars` characters, ending in `...` when shortened.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }

    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}
