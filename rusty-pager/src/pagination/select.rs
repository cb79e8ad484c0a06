//! Page-picker option windowing under the platform's option cap.

use std::collections::BTreeSet;

/// Maximum options a single select menu may expose.
pub const RENDER_CAP: usize = 25;

const NEIGHBOURS: usize = 2;

/// 0-based page indices to offer in the page picker.
///
/// Every page is listed when the count fits under `cap`. Beyond that the picker
/// offers the first and last pages, the current page with two neighbours on each
/// side, and evenly spaced markers, keeping the current page visible when the union
/// still exceeds `cap`.
pub fn page_picker_window(total_pages: usize, current: usize, cap: usize) -> Vec<usize> {
    if total_pages == 0 || cap == 0 {
        return Vec::new();
    }

    if total_pages <= cap {
        return (0..total_pages).collect();
    }

    let last = total_pages - 1;
    let current = current.min(last);

    let mut candidates = BTreeSet::from([0, last]);
    candidates.extend(current.saturating_sub(NEIGHBOURS)..=(current + NEIGHBOURS).min(last));

    let markers = if total_pages > 50 { 10 } else { 5 };
    candidates.extend((1..markers).map(|step| step * last / markers));

    let sorted: Vec<usize> = candidates.into_iter().collect();
    if sorted.len() <= cap {
        return sorted;
    }

    let position = sorted.partition_point(|page| *page < current);
    let start = position
        .saturating_sub(cap / 2)
        .min(sorted.len() - cap);
    sorted[start..start + cap].to_vec()
}

/// Page picker options for a source whose length is still unknown.
///
/// Only buffered pages can be offered; they are windowed around `current` the
/// same way a known total is.
pub fn buffered_picker_window(buffered_pages: usize, current: usize, cap: usize) -> Vec<usize> {
    page_picker_window(buffered_pages, current, cap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_counts_list_every_page() {
        assert_eq!(page_picker_window(1, 0, RENDER_CAP), vec![0]);
        assert_eq!(page_picker_window(25, 24, RENDER_CAP), (0..25).collect::<Vec<_>>());
    }

    #[test]
    fn test_never_exceeds_cap() {
        for total in 0usize..400 {
            for current in [0, 1, total / 3, total / 2, total.saturating_sub(1)] {
                let window = page_picker_window(total, current, RENDER_CAP);
                assert!(window.len() <= RENDER_CAP, "total={total} current={current}");
            }
        }
    }

    #[test]
    fn test_current_page_always_visible() {
        for total in 1..300 {
            for current in 0..total {
                let window = page_picker_window(total, current, RENDER_CAP);
                assert!(window.contains(&current), "total={total} current={current}");
            }
        }
    }

    #[test]
    fn test_large_window_shape() {
        let window = page_picker_window(100, 50, RENDER_CAP);
        assert_eq!(window.first(), Some(&0));
        assert_eq!(window.last(), Some(&99));
        for page in 48..=52 {
            assert!(window.contains(&page));
        }
        assert!(window.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_tight_cap_shifts_around_current() {
        let window = page_picker_window(1000, 998, 5);
        assert_eq!(window.len(), 5);
        assert!(window.contains(&998));
        assert_eq!(window.last(), Some(&999));

        let window = page_picker_window(1000, 0, 5);
        assert_eq!(window.len(), 5);
        assert_eq!(window.first(), Some(&0));
    }

    #[test]
    fn test_buffered_window() {
        assert_eq!(buffered_picker_window(3, 1, RENDER_CAP), vec![0, 1, 2]);
        assert_eq!(buffered_picker_window(40, 0, RENDER_CAP).len(), RENDER_CAP);
    }

    #[test]
    fn test_buffered_window_follows_current() {
        let window = buffered_picker_window(31, 30, RENDER_CAP);
        assert!(window.len() <= RENDER_CAP);
        assert!(window.contains(&30));
        assert!(window.contains(&0));
    }
}
