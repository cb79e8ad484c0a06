//! Discord transport over the twilight HTTP client.

use std::sync::Arc;

use twilight_http::{Client, error::ErrorType};
use twilight_model::{
    channel::message::{MessageFlags, embed::Embed},
    gateway::payload::incoming::InteractionCreate,
    http::interaction::{InteractionResponse, InteractionResponseData, InteractionResponseType},
    id::{
        Id,
        marker::{ChannelMarker, MessageMarker},
    },
};
use twilight_util::builder::InteractionResponseDataBuilder;

use super::components::{build_action_rows, build_modal_components};
use super::error::TransportError;
use super::jump::JumpModal;
use super::transport::{RenderedView, ReplyTarget, Transport};

/// A paginated message that was sent to a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHandle {
    pub channel_id: Id<ChannelMarker>,
    pub message_id: Id<MessageMarker>,
}

/// [`Transport`] that talks to Discord through interactions and message edits.
#[derive(Clone)]
pub struct TwilightTransport {
    http: Arc<Client>,
}

impl TwilightTransport {
    pub fn new(http: Arc<Client>) -> Self {
        Self { http }
    }

    async fn create_response(
        &self,
        interaction: &InteractionCreate,
        response: &InteractionResponse,
    ) -> Result<(), TransportError> {
        self.http
            .interaction(interaction.application_id)
            .create_response(interaction.id, &interaction.token, response)
            .await
            .map_err(classify)?;

        Ok(())
    }
}

impl Transport for TwilightTransport {
    type Destination = Id<ChannelMarker>;
    type Event = InteractionCreate;
    type Handle = MessageHandle;

    async fn send_initial(
        &self,
        destination: &Id<ChannelMarker>,
        view: &RenderedView,
    ) -> Result<MessageHandle, TransportError> {
        let embeds = view_embeds(view);
        let components = build_action_rows(&view.controls);

        let mut request = self
            .http
            .create_message(*destination)
            .embeds(&embeds)
            .components(&components);
        if let Some(text) = view.content.text.as_deref() {
            request = request.content(text);
        }

        let message = request.await.map_err(classify)?.model().await?;

        Ok(MessageHandle {
            channel_id: message.channel_id,
            message_id: message.id,
        })
    }

    async fn respond_or_edit(
        &self,
        target: ReplyTarget<'_, InteractionCreate, MessageHandle>,
        view: &RenderedView,
    ) -> Result<(), TransportError> {
        let embeds = view_embeds(view);
        let components = build_action_rows(&view.controls);
        let text = view.content.text.as_deref();

        match target {
            ReplyTarget::Interaction(interaction) => {
                let response = InteractionResponse {
                    kind: InteractionResponseType::UpdateMessage,
                    data: Some(
                        InteractionResponseDataBuilder::new()
                            .content(text.unwrap_or_default())
                            .embeds(embeds)
                            .components(components)
                            .build(),
                    ),
                };
                self.create_response(interaction, &response).await
            }
            ReplyTarget::Deferred(interaction) => {
                self.http
                    .interaction(interaction.application_id)
                    .update_response(&interaction.token)
                    .content(text)
                    .embeds(Some(embeds.as_slice()))
                    .components(Some(components.as_slice()))
                    .await
                    .map_err(classify)?;
                Ok(())
            }
            ReplyTarget::Message(handle) => {
                self.http
                    .update_message(handle.channel_id, handle.message_id)
                    .content(text)
                    .embeds(Some(embeds.as_slice()))
                    .components(Some(components.as_slice()))
                    .await
                    .map_err(classify)?;
                Ok(())
            }
        }
    }

    async fn defer(&self, interaction: &InteractionCreate) -> Result<(), TransportError> {
        let response = InteractionResponse {
            kind: InteractionResponseType::DeferredUpdateMessage,
            data: None,
        };
        self.create_response(interaction, &response).await
    }

    async fn notify(
        &self,
        interaction: &InteractionCreate,
        message: &str,
    ) -> Result<(), TransportError> {
        let response = InteractionResponse {
            kind: InteractionResponseType::ChannelMessageWithSource,
            data: Some(
                InteractionResponseDataBuilder::new()
                    .content(message)
                    .flags(MessageFlags::EPHEMERAL)
                    .build(),
            ),
        };
        self.create_response(interaction, &response).await
    }

    async fn open_modal(
        &self,
        interaction: &InteractionCreate,
        modal: &JumpModal,
    ) -> Result<(), TransportError> {
        let response = InteractionResponse {
            kind: InteractionResponseType::Modal,
            data: Some(InteractionResponseData {
                components: Some(build_modal_components(modal)),
                custom_id: Some(modal.custom_id.clone()),
                title: Some(modal.title.clone()),
                ..InteractionResponseData::default()
            }),
        };
        self.create_response(interaction, &response).await
    }
}

/// Respond to an interaction with an ephemeral message, outside any session.
pub async fn respond_ephemeral_message(
    http: &Client,
    interaction: &InteractionCreate,
    content: &str,
) -> anyhow::Result<()> {
    let response = InteractionResponse {
        kind: InteractionResponseType::ChannelMessageWithSource,
        data: Some(
            InteractionResponseDataBuilder::new()
                .content(content)
                .flags(MessageFlags::EPHEMERAL)
                .build(),
        ),
    };

    http.interaction(interaction.application_id)
        .create_response(interaction.id, &interaction.token, &response)
        .await?;

    Ok(())
}

fn view_embeds(view: &RenderedView) -> Vec<Embed> {
    view.content.embed.iter().cloned().collect()
}

fn classify(source: twilight_http::Error) -> TransportError {
    if let ErrorType::Response { status, .. } = source.kind()
        && status.get() == 404
    {
        return TransportError::TargetMissing;
    }

    TransportError::Request(source)
}
