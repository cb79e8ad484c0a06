//! Yes/no confirmation prompt built on the shared surface lifecycle.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tracing::debug;

use super::DEFAULT_TIMEOUT_SECS;
use super::controller::{ActionOutcome, Authorizer, PAGINATION_EXPIRED_MESSAGE};
use super::controls::{Control, ControlRow, ControlStyle};
use super::error::Result;
use super::render::PageContent;
use super::surface::{InteractiveSurface, Surface, TerminalReason, close};
use super::token::{CANCEL_KEY, CONFIRM_KEY, build_custom_id};
use super::transport::{RenderedView, Transport};

/// Message shown when someone other than the permitted actor answers.
pub const CONFIRMATION_WRONG_USER_MESSAGE: &str = "You cannot answer this confirmation.";
/// Prompt text once nobody answered in time.
pub const CONFIRMATION_TIMED_OUT_MESSAGE: &str = "Confirmation timed out.";

pub struct ConfirmationOptions {
    /// `None` keeps the prompt open until answered.
    pub idle_timeout: Option<Duration>,
    pub requester_id: Option<u64>,
    /// Overrides the requester-only check.
    pub authorizer: Option<Authorizer>,
    pub confirm_label: String,
    pub cancel_label: String,
}

impl Default for ConfirmationOptions {
    fn default() -> Self {
        Self {
            idle_timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            requester_id: None,
            authorizer: None,
            confirm_label: "Yes".to_owned(),
            cancel_label: "No".to_owned(),
        }
    }
}

/// A message with confirm and cancel buttons.
///
/// The answer is delivered once through the receiver returned by [`ConfirmationView::new`]:
/// `Some(true)` when confirmed, `Some(false)` when cancelled, `None` on timeout.
pub struct ConfirmationView<X: Transport> {
    session_id: u64,
    surface: InteractiveSurface<X::Handle>,
    transport: Arc<X>,
    content: PageContent,
    controls: Vec<ControlRow>,
    requester_id: Option<u64>,
    authorizer: Option<Authorizer>,
    answer: Option<bool>,
    reply: Option<oneshot::Sender<Option<bool>>>,
}

impl<X: Transport> ConfirmationView<X> {
    pub fn new(
        session_id: u64,
        prompt: impl Into<String>,
        options: ConfirmationOptions,
        transport: Arc<X>,
    ) -> (Self, oneshot::Receiver<Option<bool>>) {
        let (reply, receiver) = oneshot::channel();

        let controls = vec![vec![
            Control::Button {
                custom_id: build_custom_id(session_id, CONFIRM_KEY),
                label: options.confirm_label,
                style: ControlStyle::Success,
                disabled: false,
            },
            Control::Button {
                custom_id: build_custom_id(session_id, CANCEL_KEY),
                label: options.cancel_label,
                style: ControlStyle::Danger,
                disabled: false,
            },
        ]];

        let view = Self {
            session_id,
            surface: InteractiveSurface::new(options.idle_timeout),
            transport,
            content: PageContent::text(prompt),
            controls,
            requester_id: options.requester_id,
            authorizer: options.authorizer,
            answer: None,
            reply: Some(reply),
        };

        (view, receiver)
    }

    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    /// The answer given so far, if any.
    pub fn result(&self) -> Option<bool> {
        self.answer
    }

    pub fn is_active(&self) -> bool {
        self.surface.is_active()
    }

    pub fn idle_timeout(&self) -> Option<Duration> {
        self.surface.idle_timeout()
    }

    /// A prompt with neither a requester nor an authorizer accepts no answers.
    pub fn is_authorized(&self, actor_id: u64) -> bool {
        match (&self.authorizer, self.requester_id) {
            (Some(authorize), _) => authorize(actor_id),
            (None, Some(requester_id)) => requester_id == actor_id,
            (None, None) => false,
        }
    }

    pub async fn start(&mut self, destination: &X::Destination) -> Result<X::Handle> {
        let handle = self
            .transport
            .send_initial(destination, &self.rendered())
            .await?;
        self.surface.attach(handle.clone());

        debug!(session_id = self.session_id, "confirmation started");
        Ok(handle)
    }

    /// Record an answer, disabling both buttons in place.
    pub async fn respond(&mut self, event: &X::Event, actor_id: u64, confirmed: bool) -> ActionOutcome {
        if let Some(outcome) = self.guard(event, actor_id).await {
            return outcome;
        }

        self.answer = Some(confirmed);
        close(self, TerminalReason::Stopped, Some(event)).await;
        debug!(session_id = self.session_id, confirmed, "confirmation answered");

        ActionOutcome::Answered(confirmed)
    }

    /// Answer a press that does not belong to a confirmation.
    pub async fn ignore(&mut self, event: &X::Event) -> ActionOutcome {
        if let Err(source) = self.transport.defer(event).await {
            debug!(?source, session_id = self.session_id, "failed to acknowledge event");
        }
        ActionOutcome::Deferred
    }

    /// Time the prompt out. Returns `false` if it had already ended.
    pub async fn expire(&mut self) -> bool {
        close(self, TerminalReason::TimedOut, None).await
    }

    async fn guard(&mut self, event: &X::Event, actor_id: u64) -> Option<ActionOutcome> {
        let (message, outcome) = if !self.surface.is_active() {
            (PAGINATION_EXPIRED_MESSAGE, ActionOutcome::Inactive)
        } else if !self.is_authorized(actor_id) {
            (CONFIRMATION_WRONG_USER_MESSAGE, ActionOutcome::Unauthorized)
        } else {
            return None;
        };

        if let Err(source) = self.transport.notify(event, message).await {
            debug!(?source, session_id = self.session_id, "failed to notify actor");
        }
        Some(outcome)
    }

    fn rendered(&self) -> RenderedView {
        RenderedView {
            content: self.content.clone(),
            controls: self.controls.clone(),
        }
    }
}

impl<X: Transport> Surface for ConfirmationView<X> {
    type Transport = X;

    fn surface(&self) -> &InteractiveSurface<X::Handle> {
        &self.surface
    }

    fn surface_mut(&mut self) -> &mut InteractiveSurface<X::Handle> {
        &mut self.surface
    }

    fn transport(&self) -> &X {
        &self.transport
    }

    fn controls_mut(&mut self) -> &mut Vec<ControlRow> {
        &mut self.controls
    }

    fn current_view(&self) -> Option<RenderedView> {
        Some(self.rendered())
    }

    fn on_terminal(&mut self, reason: TerminalReason) {
        if reason == TerminalReason::TimedOut {
            self.answer = None;
            self.content = PageContent::text(CONFIRMATION_TIMED_OUT_MESSAGE);
        }

        if let Some(reply) = self.reply.take() {
            // The receiver may have been dropped by a caller that stopped waiting.
            let _ = reply.send(self.answer);
        }
    }
}
