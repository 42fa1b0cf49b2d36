//! Per-kind opener helpers.
//!
//! An opener shapes caller options for one overlay kind and forwards them to
//! the registry. It owns the kind's chrome and default styles; the registry
//! owns everything else.

mod dialog;
mod sidebar;

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::component::Loader;
use crate::error::OverlayError;
use crate::registry::Registry;
use crate::session::{Extra, Handlers, OpenRequest, Session, SessionId, Styles};
use crate::store::OpenOutcome;

pub use dialog::{DIALOG_KIND, DialogOpener};
pub use sidebar::{SIDEBAR_KIND, SidebarOpenOptions, SidebarOpener};

/// Caller options shared by every overlay kind.
#[derive(Debug, Clone)]
pub struct OpenOptions {
    /// Logical window name. Reopening under the same name updates the
    /// existing window instead of opening another one.
    pub name: String,
    /// The caller's content.
    pub content: Loader,
    /// Data passed to the content.
    pub props: Option<Value>,
    /// Styles for the chrome. Falls back to the opener's defaults.
    pub styles: Option<Styles>,
    pub handlers: Handlers,
}

impl OpenOptions {
    pub fn new(name: impl Into<String>, content: Loader) -> Self {
        Self {
            name: name.into(),
            content,
            props: None,
            styles: None,
            handlers: Handlers::default(),
        }
    }

    pub fn props(mut self, props: Value) -> Self {
        self.props = Some(props);
        self
    }

    pub fn styles(mut self, styles: Styles) -> Self {
        self.styles = Some(styles);
        self
    }

    pub fn handlers(mut self, handlers: Handlers) -> Self {
        self.handlers = handlers;
        self
    }
}

/// Opener for one overlay kind.
pub trait Opener {
    /// Kind tag stamped on every session this opener creates.
    fn kind(&self) -> &str;

    fn registry(&self) -> &Registry;

    /// Chrome wrapping the content of this kind.
    fn surface(&self) -> &Loader;

    fn default_styles(&self) -> &Styles;

    /// Closes a session the way this kind closes.
    fn close(&self, id: SessionId) -> Result<(), OverlayError>;

    /// Builds the request for this kind and hands it to the registry.
    fn open_with(&self, options: OpenOptions, extra: Extra) -> Result<OpenOutcome, OverlayError> {
        let request = OpenRequest {
            kind: self.kind().to_owned(),
            name: options.name,
            content: options.content,
            surface: self.surface().clone(),
            props: options.props,
            styles: options
                .styles
                .unwrap_or_else(|| self.default_styles().clone()),
            handlers: options.handlers,
            extra,
        };
        self.registry().open(request)
    }

    fn get(&self, id: SessionId) -> Result<Option<Arc<Session>>, OverlayError> {
        self.registry().get(id)
    }

    fn animate_close(&self, id: SessionId, duration: Duration) -> Result<(), OverlayError> {
        self.registry().animate_close(id, duration)
    }

    /// Removes every session with this name, whatever its kind.
    fn close_by_name(&self, name: &str) -> Result<usize, OverlayError> {
        self.registry().close_by_name(name)
    }

    /// Removes every session of every kind.
    fn close_all(&self) -> Result<usize, OverlayError> {
        self.registry().close_all()
    }

    /// Removes every session of this opener's kind.
    fn close_by_kind(&self) -> Result<usize, OverlayError> {
        self.registry().close_by_kind(self.kind())
    }
}

fn styles(value: Value) -> Styles {
    match value {
        Value::Object(map) => map,
        _ => Styles::new(),
    }
}
