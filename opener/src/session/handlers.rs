//! Open/close callbacks attached to a session.

use std::fmt;
use std::sync::Arc;

use super::SessionId;

/// Callback fired when a session opens or is updated in place.
pub type OpenHandler = Arc<dyn Fn(SessionId) + Send + Sync>;

/// Callback fired when a session is closed by id.
pub type CloseHandler = Arc<dyn Fn() + Send + Sync>;

/// Optional lifecycle callbacks for a session.
///
/// Replaced wholesale when a session is updated; never merged.
#[derive(Clone, Default)]
pub struct Handlers {
    /// Fired with the session id after it opens or is updated.
    pub on_open: Option<OpenHandler>,
    /// Fired after the session is closed by id.
    pub on_close: Option<CloseHandler>,
}

impl Handlers {
    /// Creates an empty handler set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the open callback.
    pub fn on_open(mut self, handler: impl Fn(SessionId) + Send + Sync + 'static) -> Self {
        self.on_open = Some(Arc::new(handler));
        self
    }

    /// Sets the close callback.
    pub fn on_close(mut self, handler: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_close = Some(Arc::new(handler));
        self
    }
}

impl fmt::Debug for Handlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handlers")
            .field("on_open", &self.on_open.is_some())
            .field("on_close", &self.on_close.is_some())
            .finish()
    }
}
