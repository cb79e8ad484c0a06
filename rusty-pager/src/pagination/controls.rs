//! Navigation actions and the transport-neutral control model.

use super::page::page_label;
use super::select::{RENDER_CAP, buffered_picker_window, page_picker_window};
use super::token::{build_custom_id, build_select_custom_id};

/// A user-triggered navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationAction {
    First,
    Previous,
    Next,
    Last,
    /// Open the jump-to-page prompt.
    Jump,
    /// Go to a 0-based page picked from the select menu.
    Select(usize),
    Stop,
}

impl NavigationAction {
    /// Custom-id segment for button actions.
    pub fn key(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Previous => "prev",
            Self::Next => "next",
            Self::Last => "last",
            Self::Jump => "jump",
            Self::Select(_) => "select",
            Self::Stop => "stop",
        }
    }

    /// Parse a button custom-id segment. Selections carry a value and are parsed separately.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "first" => Some(Self::First),
            "prev" => Some(Self::Previous),
            "next" => Some(Self::Next),
            "last" => Some(Self::Last),
            "jump" => Some(Self::Jump),
            "stop" => Some(Self::Stop),
            _ => None,
        }
    }
}

/// Visual weight of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlStyle {
    Primary,
    Secondary,
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
    pub default: bool,
}

/// A single interactive control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Button {
        custom_id: String,
        label: String,
        style: ControlStyle,
        disabled: bool,
    },
    Select {
        custom_id: String,
        placeholder: String,
        options: Vec<SelectOption>,
        disabled: bool,
    },
}

impl Control {
    pub fn custom_id(&self) -> &str {
        match self {
            Self::Button { custom_id, .. } | Self::Select { custom_id, .. } => custom_id,
        }
    }

    pub fn is_disabled(&self) -> bool {
        match self {
            Self::Button { disabled, .. } | Self::Select { disabled, .. } => *disabled,
        }
    }

    pub fn disable(&mut self) {
        match self {
            Self::Button { disabled, .. } | Self::Select { disabled, .. } => *disabled = true,
        }
    }
}

/// One horizontal row of controls.
pub type ControlRow = Vec<Control>;

/// Find a control by custom id.
pub fn find_control<'a>(rows: &'a [ControlRow], custom_id: &str) -> Option<&'a Control> {
    rows.iter()
        .flatten()
        .find(|control| control.custom_id() == custom_id)
}

/// Mark every control disabled.
pub fn disable_all(rows: &mut [ControlRow]) {
    rows.iter_mut().flatten().for_each(Control::disable);
}

/// Which control groups a paginator shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlLayout {
    pub page_buttons: bool,
    pub page_select: bool,
    pub jump_button: bool,
}

impl Default for ControlLayout {
    fn default() -> Self {
        Self {
            page_buttons: true,
            page_select: false,
            jump_button: false,
        }
    }
}

impl ControlLayout {
    fn has_any(&self) -> bool {
        self.page_buttons || self.page_select || self.jump_button
    }
}

/// Position of a session, as far as the controls are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    pub current: usize,
    pub total_pages: Option<usize>,
    pub exhausted: bool,
    pub buffered_pages: usize,
}

/// Disabled flags derived from a [`NavigationState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisabledStates {
    pub first: bool,
    pub previous: bool,
    pub next: bool,
    pub last: bool,
    pub jump: bool,
    pub select: bool,
}

impl NavigationState {
    /// Whether the true end of the data is unknowable without draining.
    pub fn end_unknown(&self) -> bool {
        self.total_pages.is_none() && !self.exhausted
    }

    pub fn disabled_states(&self) -> DisabledStates {
        let at_start = self.current == 0;
        let next = self
            .total_pages
            .is_some_and(|total| self.current + 1 >= total);
        let single_page = self.total_pages.is_some_and(|total| total <= 1);

        DisabledStates {
            first: at_start,
            previous: at_start,
            next,
            last: next || self.end_unknown(),
            jump: single_page || self.end_unknown(),
            select: single_page || (self.end_unknown() && self.buffered_pages == 0),
        }
    }

    /// Pages offered by the page picker.
    pub fn picker_pages(&self) -> Vec<usize> {
        match self.total_pages {
            Some(total) => page_picker_window(total, self.current, RENDER_CAP),
            None => buffered_picker_window(self.buffered_pages, self.current, RENDER_CAP),
        }
    }
}

/// Build the control rows for a paginator session.
///
/// Row layout: page buttons, then the page picker, then jump and stop.
pub fn build_nav_controls(
    session_id: u64,
    layout: ControlLayout,
    state: &NavigationState,
) -> Vec<ControlRow> {
    if !layout.has_any() {
        return Vec::new();
    }

    let disabled = state.disabled_states();
    let mut rows = Vec::new();

    if layout.page_buttons {
        rows.push(vec![
            button(session_id, "first", "|< First", ControlStyle::Secondary, disabled.first),
            button(session_id, "prev", "< Prev", ControlStyle::Primary, disabled.previous),
            button(
                session_id,
                "label",
                &page_label(state.current, state.total_pages),
                ControlStyle::Secondary,
                true,
            ),
            button(session_id, "next", "Next >", ControlStyle::Primary, disabled.next),
            button(session_id, "last", "Last >|", ControlStyle::Secondary, disabled.last),
        ]);
    }

    if layout.page_select {
        rows.push(vec![page_select(session_id, state, disabled.select)]);
    }

    let mut tail = Vec::new();
    if layout.jump_button {
        tail.push(button(
            session_id,
            "jump",
            "Jump to Page...",
            ControlStyle::Secondary,
            disabled.jump,
        ));
    }
    tail.push(button(session_id, "stop", "Stop", ControlStyle::Danger, false));
    rows.push(tail);

    rows
}

/// Rewrite the page-label button text, if the session shows one.
pub fn relabel(rows: &mut [ControlRow], session_id: u64, text: &str) {
    let label_id = build_custom_id(session_id, "label");
    for control in rows.iter_mut().flatten() {
        if let Control::Button {
            custom_id, label, ..
        } = control
            && *custom_id == label_id
        {
            *label = text.to_owned();
        }
    }
}

fn button(session_id: u64, key: &str, label: &str, style: ControlStyle, disabled: bool) -> Control {
    Control::Button {
        custom_id: build_custom_id(session_id, key),
        label: label.to_owned(),
        style,
        disabled,
    }
}

fn page_select(session_id: u64, state: &NavigationState, disabled: bool) -> Control {
    let placeholder = if disabled && state.end_unknown() {
        "Page count determining..."
    } else if disabled {
        "Only one page"
    } else {
        "Select a page..."
    };

    let mut options: Vec<SelectOption> = if disabled {
        Vec::new()
    } else {
        state
            .picker_pages()
            .into_iter()
            .map(|page| SelectOption {
                label: format!("Page {}", page + 1),
                value: page.to_string(),
                default: page == state.current,
            })
            .collect()
    };

    let disabled = disabled || options.is_empty();
    if options.is_empty() {
        options.push(SelectOption {
            label: "N/A".to_owned(),
            value: "-1".to_owned(),
            default: false,
        });
    }

    Control::Select {
        custom_id: build_select_custom_id(session_id),
        placeholder: placeholder.to_owned(),
        options,
        disabled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(current: usize, total_pages: Option<usize>, exhausted: bool) -> NavigationState {
        NavigationState {
            current,
            total_pages,
            exhausted,
            buffered_pages: total_pages.unwrap_or(1),
        }
    }

    #[test]
    fn test_first_page_states() {
        let disabled = state(0, Some(5), false).disabled_states();
        assert!(disabled.first);
        assert!(disabled.previous);
        assert!(!disabled.next);
        assert!(!disabled.last);
        assert!(!disabled.jump);
    }

    #[test]
    fn test_last_page_states() {
        let disabled = state(4, Some(5), false).disabled_states();
        assert!(!disabled.first);
        assert!(!disabled.previous);
        assert!(disabled.next);
        assert!(disabled.last);
    }

    #[test]
    fn test_unknown_total_states() {
        let disabled = state(2, None, false).disabled_states();
        assert!(!disabled.next);
        assert!(disabled.last);
        assert!(disabled.jump);
        assert!(!disabled.select);
    }

    #[test]
    fn test_single_page_states() {
        let disabled = state(0, Some(1), true).disabled_states();
        assert!(disabled.next);
        assert!(disabled.last);
        assert!(disabled.jump);
        assert!(disabled.select);
    }

    #[test]
    fn test_action_keys_round_trip() {
        for action in [
            NavigationAction::First,
            NavigationAction::Previous,
            NavigationAction::Next,
            NavigationAction::Last,
            NavigationAction::Jump,
            NavigationAction::Stop,
        ] {
            assert_eq!(NavigationAction::from_key(action.key()), Some(action));
        }
        assert_eq!(NavigationAction::from_key("select"), None);
    }

    #[test]
    fn test_full_layout_rows() {
        let layout = ControlLayout {
            page_buttons: true,
            page_select: true,
            jump_button: true,
        };
        let rows = build_nav_controls(7, layout, &state(0, Some(3), false));

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].len(), 5);
        let label = find_control(&rows, "pg:7:label").unwrap();
        assert!(matches!(label, Control::Button { label, disabled: true, .. } if label == "Page 1/3"));
        assert!(find_control(&rows, "pg:7:jump").is_some());
        assert!(find_control(&rows, "pg:7:stop").is_some());

        let Some(Control::Select { options, .. }) = find_control(&rows, "pg:7:select") else {
            panic!("missing select");
        };
        assert_eq!(options.len(), 3);
        assert!(options[0].default);
    }

    #[test]
    fn test_select_placeholder_while_counting() {
        let layout = ControlLayout {
            page_buttons: false,
            page_select: true,
            jump_button: false,
        };
        let counting = NavigationState {
            current: 0,
            total_pages: None,
            exhausted: false,
            buffered_pages: 0,
        };
        let rows = build_nav_controls(1, layout, &counting);
        let Some(Control::Select {
            placeholder,
            options,
            disabled,
            ..
        }) = find_control(&rows, "pg:1:select")
        else {
            panic!("missing select");
        };
        assert!(*disabled);
        assert_eq!(placeholder, "Page count determining...");
        assert_eq!(options[0].label, "N/A");
    }

    #[test]
    fn test_select_caps_large_totals() {
        let layout = ControlLayout {
            page_buttons: false,
            page_select: true,
            jump_button: false,
        };
        let rows = build_nav_controls(1, layout, &state(500, Some(1000), true));
        let Some(Control::Select { options, .. }) = find_control(&rows, "pg:1:select") else {
            panic!("missing select");
        };
        assert!(options.len() <= RENDER_CAP);
        assert!(options.iter().any(|option| option.default && option.value == "500"));
    }

    #[test]
    fn test_disable_all_and_relabel() {
        let mut rows = build_nav_controls(3, ControlLayout::default(), &state(1, Some(4), false));
        disable_all(&mut rows);
        assert!(rows.iter().flatten().all(Control::is_disabled));

        relabel(&mut rows, 3, "Timed out");
        assert!(matches!(
            find_control(&rows, "pg:3:label"),
            Some(Control::Button { label, .. }) if label == "Timed out"
        ));
    }

    #[test]
    fn test_no_controls_when_layout_empty() {
        let layout = ControlLayout {
            page_buttons: false,
            page_select: false,
            jump_button: false,
        };
        assert!(build_nav_controls(1, layout, &state(0, Some(3), false)).is_empty());
    }
}
