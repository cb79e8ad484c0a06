//! Shared lifecycle for messages that carry interactive controls.
//!
//! A surface is ACTIVE until it is stopped or its idle timeout elapses, then
//! TERMINAL for good. Views implementing [`Surface`] must be mutated behind a
//! single mutex shared by their event handlers and their idle timer, so exactly
//! one of a racing timeout and user action performs the transition.

use std::time::Duration;

use tracing::debug;

use super::controls::{ControlRow, disable_all};
use super::transport::{RenderedView, ReplyTarget, Transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalReason {
    Stopped,
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceState {
    Active,
    Terminal(TerminalReason),
}

/// Lifecycle record embedded in every control-bearing view.
#[derive(Debug)]
pub struct InteractiveSurface<H> {
    state: SurfaceState,
    idle_timeout: Option<Duration>,
    handle: Option<H>,
}

impl<H> InteractiveSurface<H> {
    pub fn new(idle_timeout: Option<Duration>) -> Self {
        Self {
            state: SurfaceState::Active,
            idle_timeout,
            handle: None,
        }
    }

    pub fn state(&self) -> SurfaceState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SurfaceState::Active
    }

    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout
    }

    /// Handle of the transmitted message, once sent.
    pub fn handle(&self) -> Option<&H> {
        self.handle.as_ref()
    }

    pub fn attach(&mut self, handle: H) {
        self.handle = Some(handle);
    }

    /// Move to TERMINAL. Returns `false` if the surface already was terminal.
    pub fn enter_terminal(&mut self, reason: TerminalReason) -> bool {
        if !self.is_active() {
            return false;
        }
        self.state = SurfaceState::Terminal(reason);
        true
    }
}

type HandleOf<S> = <<S as Surface>::Transport as Transport>::Handle;
type EventOf<S> = <<S as Surface>::Transport as Transport>::Event;

/// A view whose controls are frozen when its surface becomes terminal.
pub trait Surface: Send {
    type Transport: Transport;

    fn surface(&self) -> &InteractiveSurface<HandleOf<Self>>;

    fn surface_mut(&mut self) -> &mut InteractiveSurface<HandleOf<Self>>;

    fn transport(&self) -> &Self::Transport;

    fn controls_mut(&mut self) -> &mut Vec<ControlRow>;

    /// Last rendered view, if anything was rendered.
    fn current_view(&self) -> Option<RenderedView>;

    /// Runs after the controls are disabled and before the final edit is sent.
    fn on_terminal(&mut self, _reason: TerminalReason) {}
}

/// Drive a surface into its terminal state.
///
/// Disables every control, runs the terminal hook, then publishes the frozen view:
/// as the response to `event` when one is given, otherwise as an edit of the sent
/// message. Publishing failures are swallowed. Returns `false` without side effects
/// when the surface was already terminal.
pub async fn close<S: Surface>(
    view: &mut S,
    reason: TerminalReason,
    event: Option<&EventOf<S>>,
) -> bool {
    if !view.surface_mut().enter_terminal(reason) {
        return false;
    }

    disable_all(view.controls_mut());
    view.on_terminal(reason);

    let Some(rendered) = view.current_view() else {
        return true;
    };

    let target = match (event, view.surface().handle()) {
        (Some(event), _) => ReplyTarget::Interaction(event),
        (None, Some(handle)) => ReplyTarget::Message(handle),
        (None, None) => return true,
    };

    if let Err(source) = view.transport().respond_or_edit(target, &rendered).await {
        debug!(?source, ?reason, "failed to publish disabled controls");
    }

    true
}
