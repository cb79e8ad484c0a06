//! Interactive multi-page navigation over bounded lists and streaming producers.
//!
//! A [`NavigationController`] owns one session: a [`DataWindow`] over the items, a
//! [`PageRenderer`] that turns a page of items into content, and the controls the
//! user drives. Sessions are tracked by a [`SessionRegistry`], which routes events
//! and disables controls once a session sits idle past its timeout. A
//! [`ConfirmationView`] shares the same lifecycle and registry.

/// Default idle timeout for pagination sessions.
pub const DEFAULT_TIMEOUT_SECS: u64 = 180;

/// Default page size when a command does not configure one.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

mod components;
pub mod confirm;
pub mod controller;
pub mod controls;
pub mod error;
pub mod interaction;
pub mod jump;
mod page;
pub mod registry;
pub mod render;
pub mod respond;
mod select;
pub mod surface;
pub mod token;
pub mod transport;
pub mod window;

#[cfg(test)]
mod testing;

pub use components::{build_action_rows, build_modal_components};
pub use confirm::{ConfirmationOptions, ConfirmationView};
pub use controller::{
    ActionOutcome, Authorizer, NavigationController, PAGINATION_EXPIRED_MESSAGE,
    PAGINATION_WRONG_USER_MESSAGE, PaginatorOptions,
};
pub use controls::{Control, ControlLayout, ControlRow, NavigationAction};
pub use error::{FormatterError, InputValidationError, PaginationError, TransportError};
pub use interaction::{
    PaginationEvent, PaginationEventKind, PaginationInteraction, decode_interaction,
    handle_pagination_interaction,
};
pub use jump::{JumpModal, PageJumpPrompt};
pub use page::{page_label, total_pages};
pub use registry::{SessionHandle, SessionRegistry};
pub use render::{Formatter, PageContent, PageContext, PageItem, PageRenderer, RenderStrategy};
pub use respond::{MessageHandle, TwilightTransport, respond_ephemeral_message};
pub use surface::{InteractiveSurface, Surface, SurfaceState, TerminalReason};
pub use transport::{RenderedView, ReplyTarget, Transport};
pub use window::{DataWindow, IterProducer, Producer, StreamProducer};
