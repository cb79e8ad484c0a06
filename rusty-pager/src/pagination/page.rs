//! Pure pagination math shared by the data window and the controls.

/// Compute the number of pages for a list, never less than one.
///
/// An empty list still displays one (empty) page.
pub fn total_pages(item_count: usize, per_page: usize) -> usize {
    item_count.div_ceil(per_page.max(1)).max(1)
}

/// Number of pages that hold at least one item.
pub fn filled_pages(item_count: usize, per_page: usize) -> usize {
    item_count.div_ceil(per_page.max(1))
}

/// Return start/end indices for a 0-based page window, clamped to `total_items`.
pub fn page_range(total_items: usize, per_page: usize, page: usize) -> (usize, usize) {
    let safe_per_page = per_page.max(1);
    let start = page.saturating_mul(safe_per_page);
    let end = start.saturating_add(safe_per_page).min(total_items);
    (start.min(total_items), end)
}

/// Number of items that must be buffered before `page` is complete.
pub fn items_needed_for(page: usize, per_page: usize) -> usize {
    page.saturating_add(1).saturating_mul(per_page.max(1))
}

/// Human-readable page label such as `Page 2/5`, or `Page 2/?` while the total is unknown.
pub fn page_label(page_index: usize, total_pages: Option<usize>) -> String {
    match total_pages {
        Some(total) => format!("Page {}/{}", page_index + 1, total),
        None => format!("Page {}/?", page_index + 1),
    }
}
