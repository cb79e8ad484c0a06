//! Custom-id encoding for session controls and the jump modal.

use super::controls::NavigationAction;

pub const TOKEN_PREFIX: &str = "pg";
pub const MODAL_TOKEN_PREFIX: &str = "pgm";
/// Custom id of the jump modal's page input.
pub const PAGE_INPUT_ID: &str = "page";

const SELECT_KEY: &str = "select";
/// Confirmation button keys.
pub const CONFIRM_KEY: &str = "yes";
pub const CANCEL_KEY: &str = "no";

/// Build a control custom id: `pg:{session}:{key}`.
pub fn build_custom_id(session_id: u64, key: &str) -> String {
    format!("{TOKEN_PREFIX}:{session_id}:{key}")
}

/// Custom id of a session's page picker.
pub fn build_select_custom_id(session_id: u64) -> String {
    build_custom_id(session_id, SELECT_KEY)
}

/// Build the jump modal custom id: `pgm:{session}`.
pub fn build_modal_custom_id(session_id: u64) -> String {
    format!("{MODAL_TOKEN_PREFIX}:{session_id}")
}

/// Parsed control custom id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlToken {
    pub session_id: u64,
    pub key: String,
}

/// Parse a control custom id.
pub fn parse_custom_id(custom_id: &str) -> Option<ControlToken> {
    let mut parts = custom_id.split(':');

    if parts.next()? != TOKEN_PREFIX {
        return None;
    }

    let session_id = parts.next()?.parse::<u64>().ok()?;
    let key = parts.next()?.to_owned();

    if parts.next().is_some() {
        return None;
    }

    Some(ControlToken { session_id, key })
}

/// Parse a jump modal custom id into its session id.
pub fn parse_modal_custom_id(custom_id: &str) -> Option<u64> {
    let mut parts = custom_id.split(':');

    if parts.next()? != MODAL_TOKEN_PREFIX {
        return None;
    }

    let session_id = parts.next()?.parse::<u64>().ok()?;

    if parts.next().is_some() {
        return None;
    }

    Some(session_id)
}

/// Resolve a control press into a navigation action.
///
/// `values` are the select-menu values sent with the interaction, if any.
pub fn resolve_action(token: &ControlToken, values: &[String]) -> Option<NavigationAction> {
    if token.key == SELECT_KEY {
        let page = values.first()?.parse::<usize>().ok()?;
        return Some(NavigationAction::Select(page));
    }

    NavigationAction::from_key(&token.key)
}

/// Resolve a confirmation button press into its answer.
pub fn resolve_answer(token: &ControlToken) -> Option<bool> {
    match token.key.as_str() {
        CONFIRM_KEY => Some(true),
        CANCEL_KEY => Some(false),
        _ => None,
    }
}
