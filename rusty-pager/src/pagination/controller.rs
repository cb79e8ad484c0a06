//! Session state, action dispatch, and the render → transmit cycle.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::DEFAULT_TIMEOUT_SECS;
use super::controls::{
    ControlLayout, ControlRow, NavigationAction, NavigationState, build_nav_controls, relabel,
};
use super::error::{InputValidationError, Result};
use super::jump::{JumpBounds, PageJumpPrompt};
use super::render::{PageContent, PageContext, PageItem, PageRenderer, RenderStrategy};
use super::surface::{InteractiveSurface, Surface, TerminalReason, close};
use super::transport::{RenderedView, ReplyTarget, Transport};
use super::window::DataWindow;

/// Message shown when someone other than the permitted actor presses a control.
pub const PAGINATION_WRONG_USER_MESSAGE: &str = "This pagination session belongs to another user.";
/// Message shown when a control of a finished session is pressed.
pub const PAGINATION_EXPIRED_MESSAGE: &str =
    "This pagination session expired. Run the command again.";

/// Below this many buffered pages, a drain acknowledges the event before it starts.
const DRAIN_DEFER_PAGES: usize = 5;

/// Label shown on the page button once a session times out.
const TIMED_OUT_LABEL: &str = "Timed out";

/// Predicate deciding whether an actor may drive a session.
pub type Authorizer = Arc<dyn Fn(u64) -> bool + Send + Sync>;

/// Construction options for a paginator session.
pub struct PaginatorOptions<T> {
    pub strategy: RenderStrategy<T>,
    /// Embed title for joined-text pages.
    pub title: Option<String>,
    pub layout: ControlLayout,
    /// `None` keeps the session alive until stopped.
    pub idle_timeout: Option<Duration>,
    /// User that opened the session.
    pub requester_id: Option<u64>,
    /// Overrides the default requester-only check.
    pub authorizer: Option<Authorizer>,
}

impl<T> Default for PaginatorOptions<T> {
    fn default() -> Self {
        Self {
            strategy: RenderStrategy::JoinedText,
            title: None,
            layout: ControlLayout::default(),
            idle_timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            requester_id: None,
            authorizer: None,
        }
    }
}

/// What a dispatched action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Moved to a new page and transmitted it.
    Rendered,
    /// Stayed on the page, transmitted refreshed controls.
    Refreshed,
    /// Nothing to do; the event was only acknowledged.
    Deferred,
    /// The jump prompt was opened.
    PromptOpened,
    /// The target was invalid; the actor was told why.
    Rejected(InputValidationError),
    Unauthorized,
    Stopped,
    /// A confirmation prompt was answered.
    Answered(bool),
    /// The session is already terminal.
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ack {
    Pending,
    Deferred,
}

/// Owns one paginated session and routes every [`NavigationAction`] for it.
pub struct NavigationController<T, X: Transport> {
    session_id: u64,
    window: DataWindow<T>,
    current_page: usize,
    renderer: PageRenderer<T>,
    layout: ControlLayout,
    requester_id: Option<u64>,
    authorizer: Option<Authorizer>,
    transport: Arc<X>,
    surface: InteractiveSurface<X::Handle>,
    content: Option<PageContent>,
    controls: Vec<ControlRow>,
}

impl<T: PageItem, X: Transport> NavigationController<T, X> {
    pub fn new(
        session_id: u64,
        window: DataWindow<T>,
        options: PaginatorOptions<T>,
        transport: Arc<X>,
    ) -> Self {
        Self {
            session_id,
            window,
            current_page: 0,
            renderer: PageRenderer::new(options.strategy, options.title),
            layout: options.layout,
            requester_id: options.requester_id,
            authorizer: options.authorizer,
            transport,
            surface: InteractiveSurface::new(options.idle_timeout),
            content: None,
            controls: Vec::new(),
        }
    }

    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    /// 0-based index of the page on display.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> Option<usize> {
        self.window.total_pages()
    }

    pub fn window(&self) -> &DataWindow<T> {
        &self.window
    }

    pub fn is_active(&self) -> bool {
        self.surface.is_active()
    }

    pub fn idle_timeout(&self) -> Option<Duration> {
        self.surface.idle_timeout()
    }

    /// The view as last transmitted.
    pub fn view(&self) -> Option<RenderedView> {
        self.current_view()
    }

    pub fn is_authorized(&self, actor_id: u64) -> bool {
        match (&self.authorizer, self.requester_id) {
            (Some(authorize), _) => authorize(actor_id),
            (None, Some(requester_id)) => requester_id == actor_id,
            (None, None) => true,
        }
    }

    /// Render the first page and send it, remembering the message handle.
    pub async fn start(&mut self, destination: &X::Destination) -> Result<X::Handle> {
        self.render_current().await;
        let view = self.rendered();
        let handle = self.transport.send_initial(destination, &view).await?;
        self.surface.attach(handle.clone());

        debug!(
            session_id = self.session_id,
            total_pages = ?self.window.total_pages(),
            streaming = self.window.is_streaming(),
            "pagination session started"
        );

        Ok(handle)
    }

    /// Handle one control press from `actor_id`.
    pub async fn dispatch(
        &mut self,
        event: &X::Event,
        actor_id: u64,
        action: NavigationAction,
    ) -> ActionOutcome {
        if let Some(outcome) = self.guard(event, actor_id).await {
            return outcome;
        }

        match action {
            NavigationAction::First => self.go_back_to(event, 0).await,
            NavigationAction::Previous => {
                let target = self.current_page.saturating_sub(1);
                self.go_back_to(event, target).await
            }
            NavigationAction::Next => self.next_page(event).await,
            NavigationAction::Last => self.last_page(event).await,
            NavigationAction::Jump => self.open_jump_prompt(event).await,
            NavigationAction::Select(page) => self.select_page(event, page).await,
            NavigationAction::Stop => {
                close(self, TerminalReason::Stopped, Some(event)).await;
                debug!(session_id = self.session_id, "pagination session stopped");
                ActionOutcome::Stopped
            }
        }
    }

    /// Handle a submitted jump prompt carrying a 1-based page number.
    pub async fn submit_jump(&mut self, event: &X::Event, actor_id: u64, raw: &str) -> ActionOutcome {
        if let Some(outcome) = self.guard(event, actor_id).await {
            return outcome;
        }

        let bounds = JumpBounds {
            total_pages: self.window.total_pages(),
            exhausted: self.window.is_exhausted(),
            buffered_pages: self.window.buffered_pages(),
        };

        match PageJumpPrompt::validate(raw, bounds) {
            Ok(page) => {
                self.current_page = page;
                self.navigate(event, Ack::Pending).await
            }
            Err(error) => self.reject(event, error).await,
        }
    }

    /// Time the session out. Returns `false` if it had already ended.
    pub async fn expire(&mut self) -> bool {
        let expired = close(self, TerminalReason::TimedOut, None).await;
        if expired {
            debug!(session_id = self.session_id, "pagination session timed out");
        }
        expired
    }

    async fn guard(&mut self, event: &X::Event, actor_id: u64) -> Option<ActionOutcome> {
        if !self.surface.is_active() {
            self.notify(event, PAGINATION_EXPIRED_MESSAGE).await;
            return Some(ActionOutcome::Inactive);
        }

        if !self.is_authorized(actor_id) {
            self.notify(event, PAGINATION_WRONG_USER_MESSAGE).await;
            return Some(ActionOutcome::Unauthorized);
        }

        None
    }

    async fn go_back_to(&mut self, event: &X::Event, target: usize) -> ActionOutcome {
        if self.current_page == 0 {
            return self.acknowledge(event).await;
        }

        self.current_page = target;
        self.navigate(event, Ack::Pending).await
    }

    async fn next_page(&mut self, event: &X::Event) -> ActionOutcome {
        if self.state().disabled_states().next {
            return self.acknowledge(event).await;
        }

        // Peek first: a streaming source only reveals its end through an empty page.
        let peek = self.current_page + 1;
        self.window.fill(peek).await;

        if !self.window.slice(peek).is_empty() {
            self.current_page = peek;
            return self.navigate(event, Ack::Pending).await;
        }

        if self.window.is_exhausted() {
            self.render_current().await;
            self.transmit(event, Ack::Pending).await;
            return ActionOutcome::Refreshed;
        }

        self.acknowledge(event).await
    }

    async fn last_page(&mut self, event: &X::Event) -> ActionOutcome {
        let mut ack = Ack::Pending;
        let drained = self.state().end_unknown();

        if drained {
            let buffered = self.window.buffered_len();
            if buffered < DRAIN_DEFER_PAGES * self.window.items_per_page() {
                if let Err(source) = self.transport.defer(event).await {
                    debug!(?source, session_id = self.session_id, "failed to defer before drain");
                }
                ack = Ack::Deferred;
            }

            debug!(session_id = self.session_id, buffered, "draining streaming source");
            self.window.drain().await;
        }

        let last = self.window.total_pages().unwrap_or(1).saturating_sub(1);

        if self.current_page < last {
            self.current_page = last;
            return self.navigate(event, ack).await;
        }

        if drained {
            self.render_current().await;
            self.transmit(event, ack).await;
            return ActionOutcome::Refreshed;
        }

        self.acknowledge(event).await
    }

    async fn open_jump_prompt(&mut self, event: &X::Event) -> ActionOutcome {
        let state = self.state();
        if state.end_unknown() {
            return self.reject(event, InputValidationError::TotalUnknown).await;
        }
        if state.disabled_states().jump {
            return self.acknowledge(event).await;
        }

        let modal = PageJumpPrompt::modal(self.session_id, self.window.total_pages());
        if let Err(source) = self.transport.open_modal(event, &modal).await {
            debug!(?source, session_id = self.session_id, "failed to open jump prompt");
        }
        ActionOutcome::PromptOpened
    }

    async fn select_page(&mut self, event: &X::Event, page: usize) -> ActionOutcome {
        if let Some(error) = self.out_of_range(page) {
            return self.reject(event, error).await;
        }

        self.window.fill(page).await;
        if let Some(error) = self.out_of_range(page) {
            return self.reject(event, error).await;
        }

        self.current_page = page;
        self.navigate(event, Ack::Pending).await
    }

    fn out_of_range(&self, page: usize) -> Option<InputValidationError> {
        self.window
            .total_pages()
            .filter(|total| page >= *total)
            .map(|total_pages| InputValidationError::OutOfRange { total_pages })
    }

    async fn navigate(&mut self, event: &X::Event, ack: Ack) -> ActionOutcome {
        self.render_current().await;
        self.transmit(event, ack).await;
        ActionOutcome::Rendered
    }

    async fn render_current(&mut self) {
        self.window.fill(self.current_page).await;

        let ctx = PageContext {
            page_index: self.current_page,
            total_pages: self.window.total_pages(),
            items_per_page: self.window.items_per_page(),
            exhausted: self.window.is_exhausted(),
            buffered_items: self.window.buffered_len(),
        };

        let content = self
            .renderer
            .render(self.window.slice(self.current_page), &ctx);
        self.content = Some(content);
        self.controls = build_nav_controls(self.session_id, self.layout, &self.state());
    }

    async fn transmit(&mut self, event: &X::Event, ack: Ack) {
        let view = self.rendered();
        let target = match ack {
            Ack::Pending => ReplyTarget::Interaction(event),
            Ack::Deferred => ReplyTarget::Deferred(event),
        };

        if let Err(source) = self.transport.respond_or_edit(target, &view).await {
            debug!(?source, session_id = self.session_id, ?ack, "failed to deliver page update");
        }
    }

    pub(super) async fn acknowledge(&mut self, event: &X::Event) -> ActionOutcome {
        if let Err(source) = self.transport.defer(event).await {
            debug!(?source, session_id = self.session_id, "failed to acknowledge event");
        }
        ActionOutcome::Deferred
    }

    async fn reject(&mut self, event: &X::Event, error: InputValidationError) -> ActionOutcome {
        self.notify(event, &error.to_string()).await;
        ActionOutcome::Rejected(error)
    }

    async fn notify(&mut self, event: &X::Event, message: &str) {
        if let Err(source) = self.transport.notify(event, message).await {
            debug!(?source, session_id = self.session_id, "failed to notify actor");
        }
    }

    fn state(&self) -> NavigationState {
        NavigationState {
            current: self.current_page,
            total_pages: self.window.total_pages(),
            exhausted: self.window.is_exhausted(),
            buffered_pages: self.window.buffered_pages(),
        }
    }

    fn rendered(&self) -> RenderedView {
        RenderedView {
            content: self
                .content
                .clone()
                .unwrap_or_else(|| PageContent::text(String::new())),
            controls: self.controls.clone(),
        }
    }
}

impl<T: PageItem, X: Transport> Surface for NavigationController<T, X> {
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
        self.content.is_some().then(|| self.rendered())
    }

    fn on_terminal(&mut self, reason: TerminalReason) {
        if reason == TerminalReason::TimedOut {
            relabel(&mut self.controls, self.session_id, TIMED_OUT_LABEL);
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::stream;

    use super::*;
    use crate::pagination::controls::{Control, find_control};
    use crate::pagination::testing::{Call, RecordingTransport, TestEvent};
    use crate::pagination::token::build_custom_id;

    const SESSION: u64 = 1;
    const OWNER: u64 = 12345;
    const EVENT: TestEvent = TestEvent { id: 1 };

    type Controller = NavigationController<String, RecordingTransport>;

    fn items(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("Item {i}")).collect()
    }

    fn options(layout: ControlLayout) -> PaginatorOptions<String> {
        PaginatorOptions {
            layout,
            requester_id: Some(OWNER),
            ..PaginatorOptions::default()
        }
    }

    fn full_layout() -> ControlLayout {
        ControlLayout {
            page_buttons: true,
            page_select: true,
            jump_button: true,
        }
    }

    async fn bounded(count: usize, per_page: usize) -> (Controller, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::default());
        let window = DataWindow::bounded(items(count), per_page).unwrap();
        let mut controller =
            NavigationController::new(SESSION, window, options(full_layout()), Arc::clone(&transport));
        controller.start(&()).await.unwrap();
        transport.take_calls();
        (controller, transport)
    }

    async fn streaming(count: usize, per_page: usize) -> (Controller, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::default());
        let window = DataWindow::from_stream(stream::iter(items(count)), per_page).unwrap();
        let mut controller =
            NavigationController::new(SESSION, window, options(full_layout()), Arc::clone(&transport));
        controller.start(&()).await.unwrap();
        transport.take_calls();
        (controller, transport)
    }

    fn button_disabled(view: &RenderedView, key: &str) -> bool {
        find_control(&view.controls, &build_custom_id(SESSION, key))
            .map(Control::is_disabled)
            .unwrap_or_else(|| panic!("missing control {key}"))
    }

    fn description(view: &RenderedView) -> String {
        view.content
            .embed
            .as_ref()
            .and_then(|embed| embed.description.clone())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_start_sends_first_page() {
        let transport = Arc::new(RecordingTransport::default());
        let window = DataWindow::bounded(items(50), 10).unwrap();
        let mut controller: Controller =
            NavigationController::new(SESSION, window, options(full_layout()), Arc::clone(&transport));

        let handle = controller.start(&()).await.unwrap();
        assert_eq!(handle, 1);

        let calls = transport.calls();
        let [Call::SendInitial(view)] = &calls[..] else {
            panic!("expected initial send, got {calls:?}");
        };
        assert!(description(view).starts_with("Item 0\nItem 1"));
        assert!(button_disabled(view, "first"));
        assert!(button_disabled(view, "prev"));
        assert!(!button_disabled(view, "next"));
        assert!(!button_disabled(view, "last"));
    }

    #[tokio::test]
    async fn test_next_then_previous_round_trip() {
        let (mut controller, transport) = bounded(50, 10).await;
        let before = controller.view().unwrap();

        assert_eq!(
            controller.dispatch(&EVENT, OWNER, NavigationAction::Next).await,
            ActionOutcome::Rendered
        );
        assert_eq!(controller.current_page(), 1);
        assert!(description(&transport.last_view().unwrap()).starts_with("Item 10"));

        assert_eq!(
            controller.dispatch(&EVENT, OWNER, NavigationAction::Previous).await,
            ActionOutcome::Rendered
        );
        assert_eq!(controller.current_page(), 0);
        assert_eq!(controller.view().unwrap(), before);
    }

    #[tokio::test]
    async fn test_first_on_first_page_defers() {
        let (mut controller, transport) = bounded(50, 10).await;

        assert_eq!(
            controller.dispatch(&EVENT, OWNER, NavigationAction::First).await,
            ActionOutcome::Deferred
        );
        assert_eq!(transport.calls(), vec![Call::Defer { event: 1 }]);
    }

    #[tokio::test]
    async fn test_last_page_disables_forward_controls() {
        let (mut controller, transport) = bounded(50, 10).await;

        controller.dispatch(&EVENT, OWNER, NavigationAction::Last).await;
        assert_eq!(controller.current_page(), 4);

        let view = transport.last_view().unwrap();
        assert!(button_disabled(&view, "next"));
        assert!(button_disabled(&view, "last"));
        assert!(!button_disabled(&view, "first"));

        assert_eq!(
            controller.dispatch(&EVENT, OWNER, NavigationAction::Next).await,
            ActionOutcome::Deferred
        );
        assert_eq!(controller.current_page(), 4);
    }

    #[tokio::test]
    async fn test_bounded_example_jump() {
        let (mut controller, transport) = bounded(23, 5).await;
        assert_eq!(controller.total_pages(), Some(5));

        assert_eq!(
            controller.submit_jump(&EVENT, OWNER, "6").await,
            ActionOutcome::Rejected(InputValidationError::OutOfRange { total_pages: 5 })
        );
        assert_eq!(controller.current_page(), 0);
        assert!(matches!(
            transport.take_calls().as_slice(),
            [Call::Notify { message, .. }] if message.contains("between 1 and 5")
        ));

        assert_eq!(
            controller.submit_jump(&EVENT, OWNER, "5").await,
            ActionOutcome::Rendered
        );
        assert_eq!(controller.current_page(), 4);
        assert_eq!(
            description(&transport.last_view().unwrap()),
            "Item 20\nItem 21\nItem 22"
        );
    }

    #[tokio::test]
    async fn test_jump_rejects_zero_and_garbage() {
        let (mut controller, _transport) = bounded(23, 5).await;

        assert_eq!(
            controller.submit_jump(&EVENT, OWNER, "0").await,
            ActionOutcome::Rejected(InputValidationError::OutOfRange { total_pages: 5 })
        );
        assert_eq!(
            controller.submit_jump(&EVENT, OWNER, "-1").await,
            ActionOutcome::Rejected(InputValidationError::OutOfRange { total_pages: 5 })
        );
        assert_eq!(
            controller.submit_jump(&EVENT, OWNER, "two").await,
            ActionOutcome::Rejected(InputValidationError::NotANumber)
        );
        assert_eq!(controller.current_page(), 0);
    }

    #[tokio::test]
    async fn test_jump_button_opens_prompt() {
        let (mut controller, transport) = bounded(23, 5).await;

        assert_eq!(
            controller.dispatch(&EVENT, OWNER, NavigationAction::Jump).await,
            ActionOutcome::PromptOpened
        );
        assert!(matches!(
            transport.calls().as_slice(),
            [Call::OpenModal { modal, .. }] if modal.placeholder == "Enter page (1-5)"
        ));
    }

    #[tokio::test]
    async fn test_jump_on_single_page_only_acknowledges() {
        let (mut controller, transport) = bounded(3, 5).await;

        assert_eq!(
            controller.dispatch(&EVENT, OWNER, NavigationAction::Jump).await,
            ActionOutcome::Deferred
        );
        assert_eq!(transport.calls(), vec![Call::Defer { event: 1 }]);
    }

    #[tokio::test]
    async fn test_streaming_jump_rejected_until_total_known() {
        let (mut controller, transport) = streaming(13, 3).await;

        assert_eq!(
            controller.dispatch(&EVENT, OWNER, NavigationAction::Jump).await,
            ActionOutcome::Rejected(InputValidationError::TotalUnknown)
        );
        assert_eq!(
            controller.submit_jump(&EVENT, OWNER, "2").await,
            ActionOutcome::Rejected(InputValidationError::TotalUnknown)
        );
        assert_eq!(controller.current_page(), 0);
        assert!(transport.last_view().is_none());
    }

    #[tokio::test]
    async fn test_streaming_initial_controls() {
        let (controller, _transport) = streaming(13, 3).await;
        let view = controller.view().unwrap();

        assert!(!controller.window().is_exhausted());
        assert!(!button_disabled(&view, "next"));
        assert!(button_disabled(&view, "last"));
        assert!(button_disabled(&view, "jump"));
    }

    #[tokio::test]
    async fn test_streaming_next_stops_at_real_end() {
        let (mut controller, transport) = streaming(6, 3).await;

        assert_eq!(
            controller.dispatch(&EVENT, OWNER, NavigationAction::Next).await,
            ActionOutcome::Rendered
        );
        assert_eq!(controller.current_page(), 1);
        assert!(!controller.window().is_exhausted());

        // The producer's end is only discovered by an empty peek.
        assert_eq!(
            controller.dispatch(&EVENT, OWNER, NavigationAction::Next).await,
            ActionOutcome::Refreshed
        );
        assert_eq!(controller.current_page(), 1);
        assert_eq!(controller.total_pages(), Some(2));

        let view = transport.last_view().unwrap();
        assert!(button_disabled(&view, "next"));
        assert!(button_disabled(&view, "last"));
    }

    #[tokio::test]
    async fn test_last_drains_stream_with_follow_up() {
        let (mut controller, transport) = streaming(13, 3).await;

        assert_eq!(
            controller.dispatch(&EVENT, OWNER, NavigationAction::Last).await,
            ActionOutcome::Rendered
        );
        assert!(controller.window().is_exhausted());
        assert_eq!(controller.total_pages(), Some(5));
        assert_eq!(controller.current_page(), 4);

        let calls = transport.calls();
        let [Call::Defer { event: 1 }, Call::FollowUp { view, .. }] = &calls[..] else {
            panic!("expected defer then follow-up, got {calls:?}");
        };
        assert_eq!(description(view), "Item 12");
        assert!(button_disabled(view, "next"));
        assert!(button_disabled(view, "last"));
        assert!(!button_disabled(view, "jump"));
    }

    #[tokio::test]
    async fn test_last_with_large_buffer_responds_in_place() {
        let (mut controller, transport) = streaming(40, 1).await;

        for _ in 0..6 {
            controller.dispatch(&EVENT, OWNER, NavigationAction::Next).await;
        }
        transport.take_calls();

        assert_eq!(
            controller.dispatch(&EVENT, OWNER, NavigationAction::Last).await,
            ActionOutcome::Rendered
        );
        assert_eq!(controller.current_page(), 39);
        assert!(matches!(transport.calls().as_slice(), [Call::Respond { .. }]));
    }

    #[tokio::test]
    async fn test_last_follow_up_failure_is_swallowed() {
        let (mut controller, transport) = streaming(13, 3).await;
        transport.fail_edits();

        assert_eq!(
            controller.dispatch(&EVENT, OWNER, NavigationAction::Last).await,
            ActionOutcome::Rendered
        );
        assert_eq!(controller.current_page(), 4);
        assert!(controller.is_active());
    }

    #[tokio::test]
    async fn test_select_page() {
        let (mut controller, transport) = bounded(50, 10).await;

        assert_eq!(
            controller.dispatch(&EVENT, OWNER, NavigationAction::Select(3)).await,
            ActionOutcome::Rendered
        );
        assert_eq!(controller.current_page(), 3);
        assert!(description(&transport.last_view().unwrap()).starts_with("Item 30"));

        assert_eq!(
            controller.dispatch(&EVENT, OWNER, NavigationAction::Select(5)).await,
            ActionOutcome::Rejected(InputValidationError::OutOfRange { total_pages: 5 })
        );
        assert_eq!(controller.current_page(), 3);
    }

    #[tokio::test]
    async fn test_select_lists_buffered_pages_while_streaming() {
        let (controller, _transport) = streaming(30, 5).await;
        let view = controller.view().unwrap();

        let Some(Control::Select { options, disabled, .. }) =
            find_control(&view.controls, &build_custom_id(SESSION, "select"))
        else {
            panic!("missing select");
        };
        assert!(!disabled);
        assert_eq!(options.len(), 1);
    }

    #[tokio::test]
    async fn test_select_follows_current_page_deep_into_stream() {
        let (mut controller, _transport) = streaming(100, 1).await;

        for _ in 0..30 {
            controller.dispatch(&EVENT, OWNER, NavigationAction::Next).await;
        }
        assert_eq!(controller.current_page(), 30);
        assert_eq!(controller.total_pages(), None);

        let view = controller.view().unwrap();
        let Some(Control::Select { options, .. }) =
            find_control(&view.controls, &build_custom_id(SESSION, "select"))
        else {
            panic!("missing select");
        };
        assert!(options.len() <= 25);
        assert!(options.iter().any(|option| option.value == "30" && option.default));
        assert!(options.iter().any(|option| option.value == "0"));
    }

    #[tokio::test]
    async fn test_select_option_cap_on_large_source() {
        let (mut controller, transport) = bounded(1000, 1).await;
        controller.dispatch(&EVENT, OWNER, NavigationAction::Select(640)).await;

        let view = transport.last_view().unwrap();
        let Some(Control::Select { options, .. }) =
            find_control(&view.controls, &build_custom_id(SESSION, "select"))
        else {
            panic!("missing select");
        };
        assert!(options.len() <= 25);
        assert!(options.iter().any(|option| option.value == "640" && option.default));
    }

    #[tokio::test]
    async fn test_unauthorized_actor_rejected() {
        let (mut controller, transport) = bounded(50, 10).await;

        assert_eq!(
            controller.dispatch(&EVENT, 999, NavigationAction::Next).await,
            ActionOutcome::Unauthorized
        );
        assert_eq!(controller.current_page(), 0);
        assert_eq!(
            transport.calls(),
            vec![Call::Notify {
                event: 1,
                message: PAGINATION_WRONG_USER_MESSAGE.to_owned()
            }]
        );
    }

    #[tokio::test]
    async fn test_custom_authorizer() {
        let transport = Arc::new(RecordingTransport::default());
        let window = DataWindow::bounded(items(50), 10).unwrap();
        let options = PaginatorOptions {
            requester_id: Some(OWNER),
            authorizer: Some(Arc::new(|actor: u64| actor % 2 == 0)),
            ..PaginatorOptions::default()
        };
        let controller: Controller = NavigationController::new(SESSION, window, options, transport);

        assert!(controller.is_authorized(2));
        assert!(!controller.is_authorized(OWNER));
    }

    #[tokio::test]
    async fn test_stop_freezes_last_render() {
        let (mut controller, transport) = bounded(50, 10).await;
        controller.dispatch(&EVENT, OWNER, NavigationAction::Next).await;
        let shown = transport.last_view().unwrap();
        transport.take_calls();

        assert_eq!(
            controller.dispatch(&EVENT, OWNER, NavigationAction::Stop).await,
            ActionOutcome::Stopped
        );
        assert!(!controller.is_active());

        let calls = transport.take_calls();
        let [Call::Respond { view, .. }] = &calls[..] else {
            panic!("expected in-place stop response, got {calls:?}");
        };
        assert_eq!(view.content, shown.content);
        assert!(view.controls.iter().flatten().all(Control::is_disabled));

        assert_eq!(
            controller.dispatch(&EVENT, OWNER, NavigationAction::Next).await,
            ActionOutcome::Inactive
        );
        assert!(!controller.expire().await);
        assert!(matches!(transport.calls().as_slice(), [Call::Notify { .. }]));
    }

    #[tokio::test]
    async fn test_expire_edits_sent_message() {
        let (mut controller, transport) = bounded(50, 10).await;

        assert!(controller.expire().await);

        let calls = transport.calls();
        let [Call::Edit { message: 1, view }] = &calls[..] else {
            panic!("expected timeout edit, got {calls:?}");
        };
        assert!(view.controls.iter().flatten().all(Control::is_disabled));
        assert!(matches!(
            find_control(&view.controls, &build_custom_id(SESSION, "label")),
            Some(Control::Button { label, .. }) if label == TIMED_OUT_LABEL
        ));
    }
}
