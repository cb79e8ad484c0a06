//! Transport seam between the engine and the chat platform.

use std::future::Future;

use super::controls::ControlRow;
use super::error::TransportError;
use super::jump::JumpModal;
use super::render::PageContent;

/// Page content together with the controls shown beneath it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedView {
    pub content: PageContent,
    pub controls: Vec<ControlRow>,
}

/// Where an update is delivered.
pub enum ReplyTarget<'a, E, H> {
    /// Acknowledge an unanswered event by updating its message in place.
    Interaction(&'a E),
    /// Edit the response of an event that was already deferred.
    Deferred(&'a E),
    /// Edit a previously sent message directly.
    Message(&'a H),
}

impl<E, H> Clone for ReplyTarget<'_, E, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E, H> Copy for ReplyTarget<'_, E, H> {}

/// Platform operations the engine needs. It never talks to a network directly.
pub trait Transport: Send + Sync + 'static {
    /// Where an initial message is sent (e.g. a channel).
    type Destination: Send + Sync;
    /// A user-triggered UI event awaiting acknowledgment.
    type Event: Send + Sync;
    /// Handle to a transmitted message.
    type Handle: Clone + Send + Sync + 'static;

    fn send_initial(
        &self,
        destination: &Self::Destination,
        view: &RenderedView,
    ) -> impl Future<Output = Result<Self::Handle, TransportError>> + Send;

    fn respond_or_edit(
        &self,
        target: ReplyTarget<'_, Self::Event, Self::Handle>,
        view: &RenderedView,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Acknowledge an event without changing the message yet.
    fn defer(&self, event: &Self::Event) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Show a short message to the acting user only.
    fn notify(
        &self,
        event: &Self::Event,
        message: &str,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Answer an event by opening the jump-to-page prompt.
    fn open_modal(
        &self,
        event: &Self::Event,
        modal: &JumpModal,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;
}
