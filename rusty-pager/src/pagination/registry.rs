//! Live session bookkeeping and idle-timeout scheduling.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use futures::future::BoxFuture;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use super::confirm::ConfirmationView;
use super::controller::{ActionOutcome, NavigationController};
use super::controls::NavigationAction;
use super::render::PageItem;
use super::transport::Transport;

/// Object-safe view of a running session, so sessions over different item types
/// can share one registry.
pub trait SessionHandle<X: Transport>: Send + 'static {
    fn dispatch<'a>(
        &'a mut self,
        event: &'a X::Event,
        actor_id: u64,
        action: NavigationAction,
    ) -> BoxFuture<'a, ActionOutcome>;

    fn submit_jump<'a>(
        &'a mut self,
        event: &'a X::Event,
        actor_id: u64,
        raw: &'a str,
    ) -> BoxFuture<'a, ActionOutcome>;

    /// Route a confirm or cancel press.
    fn answer<'a>(
        &'a mut self,
        event: &'a X::Event,
        actor_id: u64,
        confirmed: bool,
    ) -> BoxFuture<'a, ActionOutcome>;

    fn expire(&mut self) -> BoxFuture<'_, bool>;

    fn is_active(&self) -> bool;

    fn idle_timeout(&self) -> Option<Duration>;
}

impl<T: PageItem, X: Transport> SessionHandle<X> for NavigationController<T, X> {
    fn dispatch<'a>(
        &'a mut self,
        event: &'a X::Event,
        actor_id: u64,
        action: NavigationAction,
    ) -> BoxFuture<'a, ActionOutcome> {
        Box::pin(NavigationController::dispatch(self, event, actor_id, action))
    }

    fn submit_jump<'a>(
        &'a mut self,
        event: &'a X::Event,
        actor_id: u64,
        raw: &'a str,
    ) -> BoxFuture<'a, ActionOutcome> {
        Box::pin(NavigationController::submit_jump(self, event, actor_id, raw))
    }

    fn answer<'a>(
        &'a mut self,
        event: &'a X::Event,
        _actor_id: u64,
        _confirmed: bool,
    ) -> BoxFuture<'a, ActionOutcome> {
        Box::pin(NavigationController::acknowledge(self, event))
    }

    fn expire(&mut self) -> BoxFuture<'_, bool> {
        Box::pin(NavigationController::expire(self))
    }

    fn is_active(&self) -> bool {
        NavigationController::is_active(self)
    }

    fn idle_timeout(&self) -> Option<Duration> {
        NavigationController::idle_timeout(self)
    }
}

impl<X: Transport> SessionHandle<X> for ConfirmationView<X> {
    fn dispatch<'a>(
        &'a mut self,
        event: &'a X::Event,
        _actor_id: u64,
        _action: NavigationAction,
    ) -> BoxFuture<'a, ActionOutcome> {
        Box::pin(ConfirmationView::ignore(self, event))
    }

    fn submit_jump<'a>(
        &'a mut self,
        event: &'a X::Event,
        _actor_id: u64,
        _raw: &'a str,
    ) -> BoxFuture<'a, ActionOutcome> {
        Box::pin(ConfirmationView::ignore(self, event))
    }

    fn answer<'a>(
        &'a mut self,
        event: &'a X::Event,
        actor_id: u64,
        confirmed: bool,
    ) -> BoxFuture<'a, ActionOutcome> {
        Box::pin(ConfirmationView::respond(self, event, actor_id, confirmed))
    }

    fn expire(&mut self) -> BoxFuture<'_, bool> {
        Box::pin(ConfirmationView::expire(self))
    }

    fn is_active(&self) -> bool {
        ConfirmationView::is_active(self)
    }

    fn idle_timeout(&self) -> Option<Duration> {
        ConfirmationView::idle_timeout(self)
    }
}

type SharedSession<X> = Arc<Mutex<Box<dyn SessionHandle<X>>>>;

struct RegistryInner<X: Transport> {
    sessions: Mutex<HashMap<u64, SharedSession<X>>>,
    timers: Mutex<HashMap<u64, JoinHandle<()>>>,
    next_id: AtomicU64,
}

/// Routes events to live sessions and times idle ones out.
///
/// Each session sits behind its own mutex; the idle timer is re-armed while that
/// mutex is held, so a pending timeout never fires between an action and its reset.
pub struct SessionRegistry<X: Transport> {
    inner: Arc<RegistryInner<X>>,
}

impl<X: Transport> Clone for SessionRegistry<X> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<X: Transport> Default for SessionRegistry<X> {
    fn default() -> Self {
        Self::new()
    }
}

impl<X: Transport> SessionRegistry<X> {
    pub fn new() -> Self {
        // Seeded from the clock so ids from a previous process run do not collide.
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or(1);

        Self {
            inner: Arc::new(RegistryInner {
                sessions: Mutex::new(HashMap::new()),
                timers: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(seed),
            }),
        }
    }

    /// Reserve an id for a new session.
    pub fn next_session_id(&self) -> u64 {
        self.inner.next_id.fetch_add(1, Ordering::Relaxed)
    }

    pub async fn len(&self) -> usize {
        self.inner.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.sessions.lock().await.is_empty()
    }

    pub async fn contains(&self, session_id: u64) -> bool {
        self.inner.sessions.lock().await.contains_key(&session_id)
    }

    /// Track a started session and arm its idle timer.
    pub async fn register(&self, session_id: u64, session: impl SessionHandle<X>) {
        let timeout = session.idle_timeout();
        let shared: SharedSession<X> = Arc::new(Mutex::new(Box::new(session)));

        self.inner.sessions.lock().await.insert(session_id, shared);

        if let Some(timeout) = timeout {
            self.arm_timer(session_id, timeout).await;
        }

        debug!(session_id, ?timeout, "pagination session registered");
    }

    /// Route a control press. Returns `None` when no such session is live.
    pub async fn dispatch(
        &self,
        session_id: u64,
        event: &X::Event,
        actor_id: u64,
        action: NavigationAction,
    ) -> Option<ActionOutcome> {
        let shared = self.session(session_id).await?;
        let mut session = shared.lock().await;

        let outcome = session.dispatch(event, actor_id, action).await;
        self.settle(session_id, session.is_active(), session.idle_timeout())
            .await;

        Some(outcome)
    }

    /// Route a submitted jump prompt. Returns `None` when no such session is live.
    pub async fn submit_jump(
        &self,
        session_id: u64,
        event: &X::Event,
        actor_id: u64,
        raw: &str,
    ) -> Option<ActionOutcome> {
        let shared = self.session(session_id).await?;
        let mut session = shared.lock().await;

        let outcome = session.submit_jump(event, actor_id, raw).await;
        self.settle(session_id, session.is_active(), session.idle_timeout())
            .await;

        Some(outcome)
    }

    /// Route a confirmation answer. Returns `None` when no such session is live.
    pub async fn answer(
        &self,
        session_id: u64,
        event: &X::Event,
        actor_id: u64,
        confirmed: bool,
    ) -> Option<ActionOutcome> {
        let shared = self.session(session_id).await?;
        let mut session = shared.lock().await;

        let outcome = session.answer(event, actor_id, confirmed).await;
        self.settle(session_id, session.is_active(), session.idle_timeout())
            .await;

        Some(outcome)
    }

    async fn session(&self, session_id: u64) -> Option<SharedSession<X>> {
        self.inner.sessions.lock().await.get(&session_id).cloned()
    }

    /// Re-arm the idle timer after an action, or forget a session that ended.
    async fn settle(&self, session_id: u64, active: bool, idle_timeout: Option<Duration>) {
        if !active {
            self.forget(session_id).await;
            return;
        }

        if let Some(timeout) = idle_timeout {
            self.arm_timer(session_id, timeout).await;
        }
    }

    async fn forget(&self, session_id: u64) {
        self.inner.sessions.lock().await.remove(&session_id);
        if let Some(timer) = self.inner.timers.lock().await.remove(&session_id) {
            timer.abort();
        }
        debug!(session_id, "pagination session released");
    }

    async fn arm_timer(&self, session_id: u64, timeout: Duration) {
        let mut timers = self.inner.timers.lock().await;
        if let Some(existing) = timers.remove(&session_id) {
            existing.abort();
        }

        let inner = Arc::clone(&self.inner);
        let timer = tokio::spawn(async move {
            tokio::time::sleep(timeout).await;

            let shared = inner.sessions.lock().await.get(&session_id).cloned();
            if let Some(shared) = shared {
                let mut session = shared.lock().await;
                session.expire().await;
            }

            inner.sessions.lock().await.remove(&session_id);
            inner.timers.lock().await.remove(&session_id);
            debug!(session_id, "pagination session expired");
        });

        timers.insert(session_id, timer);
    }
}
