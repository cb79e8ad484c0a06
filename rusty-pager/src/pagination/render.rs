//! Page content rendering strategies.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use tracing::warn;
use twilight_model::channel::message::embed::Embed;

use crate::embed::{
    EMBED_DESCRIPTION_LIMIT, ERROR_EMBED_COLOR, MESSAGE_CONTENT_LIMIT, NOTICE_EMBED_COLOR,
    build_embed, build_paginated_embed, truncate_with_ellipsis, with_footer_marker,
};

use super::error::FormatterError;
use super::page::page_label;

/// Default embed title for joined-text pages.
pub const DEFAULT_PAGE_TITLE: &str = "Results";

/// Displayable content of one page: text, a rich embed, or both.
#[derive(Debug, Clone, PartialEq)]
pub struct PageContent {
    pub text: Option<String>,
    pub embed: Option<Embed>,
}

impl PageContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            embed: None,
        }
    }

    pub fn embed(embed: Embed) -> Self {
        Self {
            text: None,
            embed: Some(embed),
        }
    }

    pub fn both(text: impl Into<String>, embed: Embed) -> Self {
        Self {
            text: Some(text.into()),
            embed: Some(embed),
        }
    }

    /// Whether neither side is populated.
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.embed.is_none()
    }
}

impl From<String> for PageContent {
    fn from(text: String) -> Self {
        Self::text(text)
    }
}

impl From<&str> for PageContent {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<Embed> for PageContent {
    fn from(embed: Embed) -> Self {
        Self::embed(embed)
    }
}

impl From<(Option<String>, Option<Embed>)> for PageContent {
    fn from((text, embed): (Option<String>, Option<Embed>)) -> Self {
        Self { text, embed }
    }
}

/// Values that can appear on a page.
pub trait PageItem: Send + Sync + 'static {
    /// One-line text form used by the joined-text strategy.
    fn line(&self) -> String;

    /// Complete rich block used by the passthrough strategy.
    fn block(&self) -> Option<Embed> {
        None
    }
}

impl PageItem for String {
    fn line(&self) -> String {
        self.clone()
    }
}

impl PageItem for &'static str {
    fn line(&self) -> String {
        (*self).to_owned()
    }
}

impl PageItem for Embed {
    fn line(&self) -> String {
        self.title
            .clone()
            .or_else(|| self.description.clone())
            .unwrap_or_default()
    }

    fn block(&self) -> Option<Embed> {
        Some(self.clone())
    }
}

macro_rules! display_page_item {
    ($($ty:ty),*) => {
        $(impl PageItem for $ty {
            fn line(&self) -> String {
                self.to_string()
            }
        })*
    };
}

display_page_item!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

/// Read-only view of the session handed to renderers and formatters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageContext {
    pub page_index: usize,
    pub total_pages: Option<usize>,
    pub items_per_page: usize,
    pub exhausted: bool,
    pub buffered_items: usize,
}

impl PageContext {
    /// `Page X/Y`, or `Page X/?` while the total is unknown.
    pub fn label(&self) -> String {
        page_label(self.page_index, self.total_pages)
    }

    fn is_past_end(&self) -> bool {
        self.total_pages
            .is_some_and(|total| self.page_index > 0 && self.page_index >= total)
    }
}

/// Custom page formatter: `(items, page_index, session) -> content`.
pub type Formatter<T> =
    Arc<dyn Fn(&[T], usize, &PageContext) -> anyhow::Result<PageContent> + Send + Sync>;

/// How a page's items become [`PageContent`].
pub enum RenderStrategy<T> {
    /// Each item is a complete embed; use one item per page.
    Passthrough,
    /// Items are newline-joined into one embed description.
    JoinedText,
    /// Items are handed to an injected formatter.
    Custom(Formatter<T>),
}

impl<T> Clone for RenderStrategy<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Passthrough => Self::Passthrough,
            Self::JoinedText => Self::JoinedText,
            Self::Custom(formatter) => Self::Custom(Arc::clone(formatter)),
        }
    }
}

impl<T> RenderStrategy<T> {
    /// Wrap a closure as a custom formatter strategy.
    pub fn custom<F>(formatter: F) -> Self
    where
        F: Fn(&[T], usize, &PageContext) -> anyhow::Result<PageContent> + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(formatter))
    }
}

/// Turns page items into displayable content.
pub struct PageRenderer<T> {
    strategy: RenderStrategy<T>,
    title: String,
}

impl<T: PageItem> PageRenderer<T> {
    pub fn new(strategy: RenderStrategy<T>, title: Option<String>) -> Self {
        Self {
            strategy,
            title: title.unwrap_or_else(|| DEFAULT_PAGE_TITLE.to_owned()),
        }
    }

    /// Render `items` for the page described by `ctx`.
    ///
    /// Always returns content with at least one side populated.
    pub fn render(&self, items: &[T], ctx: &PageContext) -> PageContent {
        if items.is_empty() && ctx.is_past_end() {
            return out_of_bounds_page();
        }

        let content = match &self.strategy {
            RenderStrategy::Passthrough => render_passthrough(items, ctx),
            RenderStrategy::JoinedText => self.render_joined(items, ctx),
            RenderStrategy::Custom(formatter) => match run_formatter(formatter, items, ctx) {
                Ok(content) => content,
                Err(source) => {
                    warn!(page = ctx.page_index, %source, "custom page formatter failed");
                    formatter_error_page(&source)
                }
            },
        };

        if content.is_empty() {
            return PageContent::text(ctx.label());
        }

        content
    }

    fn render_joined(&self, items: &[T], ctx: &PageContext) -> PageContent {
        let description = if items.is_empty() {
            "No items on this page.".to_owned()
        } else {
            let joined = items
                .iter()
                .map(PageItem::line)
                .collect::<Vec<_>>()
                .join("\n");
            truncate_with_ellipsis(&joined, EMBED_DESCRIPTION_LIMIT)
        };

        match build_paginated_embed(&self.title, description, &ctx.label()) {
            Ok(embed) => PageContent::embed(embed),
            Err(source) => PageContent::text(format!("Error rendering page: {source}")),
        }
    }
}

fn render_passthrough<T: PageItem>(items: &[T], ctx: &PageContext) -> PageContent {
    let label = ctx.label();

    let Some(first) = items.first() else {
        return notice_page(&label, "No embeds on this page.", NOTICE_EMBED_COLOR);
    };

    let Some(block) = first.block() else {
        return notice_page(
            &label,
            "Invalid data for embed pages. Expected an embed.",
            ERROR_EMBED_COLOR,
        );
    };

    let marker = format!("Page {}", ctx.page_index + 1);
    let already_marked = block
        .footer
        .as_ref()
        .is_some_and(|footer| footer.text.contains(&marker));

    if already_marked {
        PageContent::embed(block)
    } else {
        PageContent::embed(with_footer_marker(block, &label))
    }
}

fn run_formatter<T>(
    formatter: &Formatter<T>,
    items: &[T],
    ctx: &PageContext,
) -> Result<PageContent, FormatterError> {
    let outcome = catch_unwind(AssertUnwindSafe(|| formatter(items, ctx.page_index, ctx)));

    match outcome {
        Ok(Ok(content)) if content.is_empty() => {
            Err(FormatterError::new("formatter returned no content"))
        }
        Ok(Ok(content)) => Ok(content),
        Ok(Err(source)) => Err(FormatterError::new(format!("{source:#}"))),
        Err(panic) => {
            let message = panic
                .downcast_ref::<&str>()
                .map(|message| (*message).to_owned())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "formatter panicked".to_owned());
            Err(FormatterError::new(message))
        }
    }
}

fn formatter_error_page(error: &FormatterError) -> PageContent {
    let text = truncate_with_ellipsis(
        &format!("Error formatting page: {}", error.message()),
        MESSAGE_CONTENT_LIMIT,
    );
    let description = truncate_with_ellipsis(error.message(), EMBED_DESCRIPTION_LIMIT);
    match build_embed("Formatting Error", description, ERROR_EMBED_COLOR, None) {
        Ok(embed) => PageContent::both(text, embed),
        Err(_) => PageContent::text(text),
    }
}

fn out_of_bounds_page() -> PageContent {
    match build_embed("", "No content on this page.", NOTICE_EMBED_COLOR, None) {
        Ok(embed) => PageContent::both("This page is empty or out of bounds.", embed),
        Err(_) => PageContent::text("This page is empty or out of bounds."),
    }
}

fn notice_page(title: &str, description: &str, color: u32) -> PageContent {
    match build_embed(title, description, color, None) {
        Ok(embed) => PageContent::embed(embed),
        Err(_) => PageContent::text(description),
    }
}
