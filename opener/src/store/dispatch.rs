//! Deferred handler calls.

use std::fmt;

use crate::session::{Handlers, SessionId};

type Call = Box<dyn FnOnce() + Send>;

/// A handler call produced by a store mutation, not yet run.
///
/// The store never calls user code while it is borrowed. Mutations hand back
/// a dispatch instead, and the caller fires it once the store is released so
/// handlers are free to call back into the registry.
#[must_use = "handlers only run when the dispatch is fired"]
#[derive(Default)]
pub struct Dispatch {
    call: Option<Call>,
}

impl Dispatch {
    /// A dispatch that does nothing.
    pub fn none() -> Self {
        Self::default()
    }

    pub(crate) fn on_open(handlers: &Handlers, id: SessionId) -> Self {
        let call = handlers.on_open.clone().map(|handler| {
            Box::new(move || handler(id)) as Call
        });
        Self { call }
    }

    pub(crate) fn on_close(handlers: &Handlers) -> Self {
        let call = handlers
            .on_close
            .clone()
            .map(|handler| Box::new(move || handler()) as Call);
        Self { call }
    }

    /// Whether firing would run a handler.
    pub fn is_empty(&self) -> bool {
        self.call.is_none()
    }

    /// Runs the handler, if any.
    pub fn fire(self) {
        if let Some(call) = self.call {
            call();
        }
    }
}

impl fmt::Debug for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatch")
            .field("pending", &self.call.is_some())
            .finish()
    }
}
