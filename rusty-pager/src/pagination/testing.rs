//! In-memory transport used by engine tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use super::error::TransportError;
use super::jump::JumpModal;
use super::transport::{RenderedView, ReplyTarget, Transport};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SendInitial(RenderedView),
    Respond { event: u64, view: RenderedView },
    FollowUp { event: u64, view: RenderedView },
    Edit { message: u64, view: RenderedView },
    Defer { event: u64 },
    Notify { event: u64, message: String },
    OpenModal { event: u64, modal: JumpModal },
}

/// Event stand-in identified by id.
#[derive(Debug, Clone, Copy)]
pub struct TestEvent {
    pub id: u64,
}

#[derive(Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<Call>>,
    next_message: AtomicU64,
    fail_edits: AtomicBool,
}

impl RecordingTransport {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn take_calls(&self) -> Vec<Call> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }

    /// The most recently transmitted view, from any delivery path.
    pub fn last_view(&self) -> Option<RenderedView> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find_map(|call| match call {
                Call::SendInitial(view)
                | Call::Respond { view, .. }
                | Call::FollowUp { view, .. }
                | Call::Edit { view, .. } => Some(view.clone()),
                _ => None,
            })
    }

    /// Make every edit fail as if the message had been deleted.
    pub fn fail_edits(&self) {
        self.fail_edits.store(true, Ordering::SeqCst);
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn edit_result(&self) -> Result<(), TransportError> {
        if self.fail_edits.load(Ordering::SeqCst) {
            Err(TransportError::TargetMissing)
        } else {
            Ok(())
        }
    }
}

impl Transport for RecordingTransport {
    type Destination = ();
    type Event = TestEvent;
    type Handle = u64;

    async fn send_initial(
        &self,
        _destination: &(),
        view: &RenderedView,
    ) -> Result<u64, TransportError> {
        self.record(Call::SendInitial(view.clone()));
        Ok(self.next_message.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn respond_or_edit(
        &self,
        target: ReplyTarget<'_, TestEvent, u64>,
        view: &RenderedView,
    ) -> Result<(), TransportError> {
        let view = view.clone();
        self.record(match target {
            ReplyTarget::Interaction(event) => Call::Respond {
                event: event.id,
                view,
            },
            ReplyTarget::Deferred(event) => Call::FollowUp {
                event: event.id,
                view,
            },
            ReplyTarget::Message(message) => Call::Edit {
                message: *message,
                view,
            },
        });
        self.edit_result()
    }

    async fn defer(&self, event: &TestEvent) -> Result<(), TransportError> {
        self.record(Call::Defer { event: event.id });
        Ok(())
    }

    async fn notify(&self, event: &TestEvent, message: &str) -> Result<(), TransportError> {
        self.record(Call::Notify {
            event: event.id,
            message: message.to_owned(),
        });
        Ok(())
    }

    async fn open_modal(&self, event: &TestEvent, modal: &JumpModal) -> Result<(), TransportError> {
        self.record(Call::OpenModal {
            event: event.id,
            modal: modal.clone(),
        });
        Ok(())
    }
}
