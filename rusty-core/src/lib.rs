use std::sync::Arc;
use std::time::Duration;

use twilight_http::Client;

use rusty_pager::pagination::{
    DEFAULT_ITEMS_PER_PAGE, DEFAULT_TIMEOUT_SECS, SessionRegistry, TwilightTransport,
};

/// Pagination defaults applied by commands that open a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerSettings {
    pub idle_timeout: Duration,
    pub items_per_page: usize,
}

impl Default for PagerSettings {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

/// Shared application context passed into command handlers.
///
/// Cheap to clone because it only stores reference-counted shared state.
#[derive(Clone)]
pub struct Context {
    pub http: Arc<Client>,
    pub transport: Arc<TwilightTransport>,
    pub pager: SessionRegistry<TwilightTransport>,
    pub settings: PagerSettings,
}

impl Context {
    /// Create a new application context.
    pub fn new(http: Arc<Client>, settings: PagerSettings) -> Self {
        Self {
            transport: Arc::new(TwilightTransport::new(Arc::clone(&http))),
            http,
            pager: SessionRegistry::new(),
            settings,
        }
    }
}
