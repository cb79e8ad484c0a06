//! Decoding of gateway interactions into session events, and their routing.

use twilight_http::Client;
use twilight_model::{
    application::interaction::{InteractionData, modal::ModalInteractionComponent},
    gateway::payload::incoming::InteractionCreate,
};

use super::controller::PAGINATION_EXPIRED_MESSAGE;
use super::controls::NavigationAction;
use super::registry::SessionRegistry;
use super::respond::{TwilightTransport, respond_ephemeral_message};
use super::token::{
    PAGE_INPUT_ID, parse_custom_id, parse_modal_custom_id, resolve_action, resolve_answer,
};

/// Generic message shown when a pagination interaction payload is invalid.
pub const PAGINATION_INVALID_MESSAGE: &str = "Invalid pagination interaction.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginationEventKind {
    Action(NavigationAction),
    /// Raw text of a submitted jump prompt.
    JumpSubmission(String),
    /// Confirm (`true`) or cancel (`false`) on a confirmation prompt.
    Answer(bool),
}

/// A decoded pagination interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationEvent {
    pub session_id: u64,
    pub actor_id: u64,
    pub kind: PaginationEventKind,
}

/// Outcome of decoding an interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginationInteraction {
    /// Not addressed to a pagination session.
    NotPagination,
    /// Addressed to a session but malformed.
    Invalid,
    Event(PaginationEvent),
}

/// Decode a component press or modal submission.
pub fn decode_interaction(interaction: &InteractionCreate) -> PaginationInteraction {
    let actor_id = interaction.author_id().map(|id| id.get());

    let decoded = match interaction.data.as_ref() {
        Some(InteractionData::MessageComponent(component)) => {
            decode_component(&component.custom_id, &component.values)
        }
        Some(InteractionData::ModalSubmit(modal)) => {
            decode_modal(&modal.custom_id, jump_input(&modal.components))
        }
        _ => return PaginationInteraction::NotPagination,
    };

    match (decoded, actor_id) {
        (Decoded::Foreign, _) => PaginationInteraction::NotPagination,
        (Decoded::Malformed, _) | (_, None) => PaginationInteraction::Invalid,
        (Decoded::Target { session_id, kind }, Some(actor_id)) => {
            PaginationInteraction::Event(PaginationEvent {
                session_id,
                actor_id,
                kind,
            })
        }
    }
}

/// Route a pagination interaction to its session.
///
/// Returns `false` when the interaction is not a pagination interaction. Presses
/// on sessions that are no longer live get the expired notice.
pub async fn handle_pagination_interaction(
    http: &Client,
    registry: &SessionRegistry<TwilightTransport>,
    interaction: &InteractionCreate,
) -> anyhow::Result<bool> {
    let event = match decode_interaction(interaction) {
        PaginationInteraction::NotPagination => return Ok(false),
        PaginationInteraction::Invalid => {
            respond_ephemeral_message(http, interaction, PAGINATION_INVALID_MESSAGE).await?;
            return Ok(true);
        }
        PaginationInteraction::Event(event) => event,
    };

    let outcome = match event.kind {
        PaginationEventKind::Action(action) => {
            registry
                .dispatch(event.session_id, interaction, event.actor_id, action)
                .await
        }
        PaginationEventKind::JumpSubmission(raw) => {
            registry
                .submit_jump(event.session_id, interaction, event.actor_id, &raw)
                .await
        }
        PaginationEventKind::Answer(confirmed) => {
            registry
                .answer(event.session_id, interaction, event.actor_id, confirmed)
                .await
        }
    };

    if outcome.is_none() {
        respond_ephemeral_message(http, interaction, PAGINATION_EXPIRED_MESSAGE).await?;
    }

    Ok(true)
}

enum Decoded {
    Foreign,
    Malformed,
    Target {
        session_id: u64,
        kind: PaginationEventKind,
    },
}

fn decode_component(custom_id: &str, values: &[String]) -> Decoded {
    let Some(token) = parse_custom_id(custom_id) else {
        return Decoded::Foreign;
    };

    let kind = match resolve_action(&token, values) {
        Some(action) => PaginationEventKind::Action(action),
        None => match resolve_answer(&token) {
            Some(confirmed) => PaginationEventKind::Answer(confirmed),
            None => return Decoded::Malformed,
        },
    };

    Decoded::Target {
        session_id: token.session_id,
        kind,
    }
}

fn decode_modal(custom_id: &str, input: Option<String>) -> Decoded {
    let Some(session_id) = parse_modal_custom_id(custom_id) else {
        return Decoded::Foreign;
    };

    match input {
        Some(raw) => Decoded::Target {
            session_id,
            kind: PaginationEventKind::JumpSubmission(raw),
        },
        None => Decoded::Malformed,
    }
}

fn jump_input(components: &[ModalInteractionComponent]) -> Option<String> {
    components.iter().find_map(|component| match component {
        ModalInteractionComponent::ActionRow(row) => jump_input(&row.components),
        ModalInteractionComponent::TextInput(text_input) if text_input.custom_id == PAGE_INPUT_ID => {
            Some(text_input.value.clone())
        }
        _ => None,
    })
}
