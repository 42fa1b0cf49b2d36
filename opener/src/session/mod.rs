//! Session records and open requests.

mod extra;
mod handlers;

use std::fmt;

use serde_json::Value;

use crate::component::Loader;

pub use extra::{DialogOptions, Extra, SidebarOptions, SidebarPosition};
pub use handlers::{CloseHandler, Handlers, OpenHandler};

/// Style data handed to a session's chrome. Replaced wholesale on update.
pub type Styles = serde_json::Map<String, Value>;

/// Identifier of an open session.
///
/// Unique among the sessions of one store and never reused while that store
/// lives. Also the only stable identity across renders.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct SessionId(u64);

impl SessionId {
    /// Wraps a raw id.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Presentation status of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Status {
    /// Rendered with its open presentation.
    #[default]
    Open,
    /// Close requested; the chrome plays its exit animation until removal.
    Closing,
}

impl Status {
    /// Whether the session should render as open.
    pub fn is_open(self) -> bool {
        self == Status::Open
    }
}

/// One open overlay.
///
/// Records are immutable once stored: an update replaces the record with a
/// new one carrying the same id, kind, name, status and loaders.
#[derive(Debug, Clone)]
pub struct Session {
    /// Store-assigned identity.
    pub id: SessionId,
    /// Overlay kind, e.g. `"dialog"` or `"sidebar"`. Scopes name matching.
    pub kind: String,
    /// Logical window name used to find an existing session.
    pub name: String,
    /// The caller's content.
    pub content: Loader,
    /// The chrome wrapping the content.
    pub surface: Loader,
    /// Data passed to the content.
    pub props: Option<Value>,
    /// Style data passed to the chrome.
    pub styles: Styles,
    /// Kind-specific options.
    pub extra: Extra,
    /// Lifecycle callbacks.
    pub handlers: Handlers,
    /// Open or closing.
    pub status: Status,
}

impl Session {
    pub(crate) fn from_request(id: SessionId, request: OpenRequest) -> Self {
        Self {
            id,
            kind: request.kind,
            name: request.name,
            content: request.content,
            surface: request.surface,
            props: request.props,
            styles: request.styles,
            extra: request.extra,
            handlers: request.handlers,
            status: Status::Open,
        }
    }

    /// Returns a copy carrying the request's handlers, extra, props and styles.
    pub(crate) fn updated(&self, request: OpenRequest) -> Self {
        Self {
            handlers: request.handlers,
            extra: request.extra,
            props: request.props,
            styles: request.styles,
            ..self.clone()
        }
    }

    /// Returns a copy in the closing state.
    pub(crate) fn closing(&self) -> Self {
        Self {
            status: Status::Closing,
            ..self.clone()
        }
    }

    /// Whether this session answers to the `(kind, name)` dedup key.
    pub fn matches(&self, kind: &str, name: &str) -> bool {
        self.kind == kind && self.name == name
    }
}

/// A request to open a session, or to update the one already open under the
/// same kind and name.
#[derive(Debug, Clone)]
pub struct OpenRequest {
    pub kind: String,
    pub name: String,
    pub content: Loader,
    pub surface: Loader,
    pub props: Option<Value>,
    pub styles: Styles,
    pub handlers: Handlers,
    pub extra: Extra,
}

impl OpenRequest {
    /// Creates a request with no props, styles, handlers or extra options.
    pub fn new(
        kind: impl Into<String>,
        name: impl Into<String>,
        content: Loader,
        surface: Loader,
    ) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            content,
            surface,
            props: None,
            styles: Styles::new(),
            handlers: Handlers::default(),
            extra: Extra::None,
        }
    }

    /// Sets the props.
    pub fn props(mut self, props: Value) -> Self {
        self.props = Some(props);
        self
    }

    /// Sets the styles.
    pub fn styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    /// Sets the handlers.
    pub fn handlers(mut self, handlers: Handlers) -> Self {
        self.handlers = handlers;
        self
    }

    /// Sets the kind-specific options.
    pub fn extra(mut self, extra: Extra) -> Self {
        self.extra = extra;
        self
    }
}
