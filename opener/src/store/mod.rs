//! The session store: the ordered list of open overlays and every rule for
//! changing it.
//!
//! `SessionStore` is a plain synchronous state machine. `StoreHandle` wraps
//! one for sharing across the application and adds the close timers.

mod dispatch;
mod handle;

use std::sync::Arc;

use log::{debug, trace};
use serde_json::Value;

use crate::config::StoreConfig;
use crate::equality::props_equal;
use crate::layer::Layer;
use crate::session::{OpenRequest, Session, SessionId, Status};

pub use dispatch::Dispatch;
pub use handle::StoreHandle;

/// What an open request will do to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenPlan {
    /// No session has this kind and name: open a new one.
    Open,
    /// The session with this kind and name has different props: update it.
    Update(SessionId),
    /// The session with this kind and name already has these props.
    Unchanged(SessionId),
}

/// What an open request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// A new session was appended.
    Opened(SessionId),
    /// An existing session was updated in place.
    Updated(SessionId),
    /// An existing session already matched; nothing changed.
    Unchanged(SessionId),
}

impl OpenOutcome {
    /// The session the request resolved to.
    pub fn id(self) -> SessionId {
        match self {
            OpenOutcome::Opened(id) | OpenOutcome::Updated(id) | OpenOutcome::Unchanged(id) => id,
        }
    }

    /// Whether the session list changed.
    pub fn changed(self) -> bool {
        !matches!(self, OpenOutcome::Unchanged(_))
    }
}

/// Session attribute usable for bulk removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    Name,
    Kind,
}

impl Property {
    fn matches(self, session: &Session, value: &str) -> bool {
        match self {
            Property::Name => session.name == value,
            Property::Kind => session.kind == value,
        }
    }
}

/// Ordered list of open sessions.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Vec<Arc<Session>>,
    next_id: u64,
    config: StoreConfig,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            sessions: Vec::new(),
            next_id: 0,
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Decides whether a request opens, updates, or leaves the store alone.
    ///
    /// Names are scoped by kind: a dialog and a sidebar may share a name. If
    /// several sessions somehow share a kind and name, the first one whose
    /// props differ is the one updated.
    pub fn plan(&self, kind: &str, name: &str, props: Option<&Value>) -> OpenPlan {
        let mut existing = None;
        for session in self.sessions.iter().filter(|s| s.matches(kind, name)) {
            if !props_equal(session.props.as_ref(), props) {
                return OpenPlan::Update(session.id);
            }
            existing.get_or_insert(session.id);
        }
        match existing {
            Some(id) => OpenPlan::Unchanged(id),
            None => OpenPlan::Open,
        }
    }

    /// Opens a new session or updates the matching one.
    ///
    /// Both outcomes hand back the request's `on_open` call; an unchanged
    /// outcome hands back nothing.
    pub fn open(&mut self, request: OpenRequest) -> (OpenOutcome, Dispatch) {
        match self.plan(&request.kind, &request.name, request.props.as_ref()) {
            OpenPlan::Open => {
                let id = self.allocate_id();
                let dispatch = Dispatch::on_open(&request.handlers, id);
                debug!("Opened {} '{}' as session {}", request.kind, request.name, id);
                self.sessions.push(Arc::new(Session::from_request(id, request)));
                (OpenOutcome::Opened(id), dispatch)
            }
            OpenPlan::Update(id) => (OpenOutcome::Updated(id), self.change(id, request)),
            OpenPlan::Unchanged(id) => {
                trace!("Session {} already open with equal props", id);
                (OpenOutcome::Unchanged(id), Dispatch::none())
            }
        }
    }

    /// Replaces the handlers, extra options, props and styles of a session.
    ///
    /// Id, kind, name, status, loaders and position are kept. Unknown ids are
    /// ignored.
    pub fn change(&mut self, id: SessionId, request: OpenRequest) -> Dispatch {
        let Some(index) = self.position(id) else {
            trace!("Ignoring change of unknown session {}", id);
            return Dispatch::none();
        };
        let dispatch = Dispatch::on_open(&request.handlers, id);
        let updated = self.sessions[index].updated(request);
        self.sessions[index] = Arc::new(updated);
        debug!("Updated session {}", id);
        dispatch
    }

    /// Removes a session and hands back its `on_close` call.
    ///
    /// The handler runs after removal, so it never sees its own session.
    pub fn close(&mut self, id: SessionId) -> Dispatch {
        let Some(index) = self.position(id) else {
            trace!("Ignoring close of unknown session {}", id);
            return Dispatch::none();
        };
        let session = self.sessions.remove(index);
        debug!("Closed session {} ({} '{}')", id, session.kind, session.name);
        Dispatch::on_close(&session.handlers)
    }

    /// Removes a session only if it is still closing.
    ///
    /// Used by close timers so a session that was already removed, or
    /// replaced by a forced close, is left alone.
    pub(crate) fn finish_close(&mut self, id: SessionId) -> Option<Dispatch> {
        let closing = self
            .get(id)
            .is_some_and(|session| session.status == Status::Closing);
        closing.then(|| self.close(id))
    }

    /// Removes every session without calling any `on_close` handler.
    ///
    /// Returns how many sessions were removed.
    pub fn close_all(&mut self) -> usize {
        let removed = self.sessions.len();
        self.sessions.clear();
        debug!("Closed all sessions ({})", removed);
        removed
    }

    /// Removes every session whose `property` equals `value`, without calling
    /// any `on_close` handler.
    pub fn close_by_property(&mut self, property: Property, value: &str) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|session| !property.matches(session, value));
        let removed = before - self.sessions.len();
        debug!("Closed {} session(s) with {:?} '{}'", removed, property, value);
        removed
    }

    pub fn close_by_name(&mut self, name: &str) -> usize {
        self.close_by_property(Property::Name, name)
    }

    pub fn close_by_kind(&mut self, kind: &str) -> usize {
        self.close_by_property(Property::Kind, kind)
    }

    /// Marks a session as closing without removing it.
    ///
    /// Returns whether the session exists. A closing session stays closing.
    pub fn prepare_to_close(&mut self, id: SessionId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        if self.sessions[index].status == Status::Open {
            let closing = self.sessions[index].closing();
            self.sessions[index] = Arc::new(closing);
            debug!("Session {} is closing", id);
        }
        true
    }

    pub fn get(&self, id: SessionId) -> Option<Arc<Session>> {
        self.sessions.iter().find(|s| s.id == id).cloned()
    }

    /// Sessions in insertion order.
    pub fn sessions(&self) -> &[Arc<Session>] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Sessions in insertion order with their stacking values.
    pub fn layers(&self) -> Vec<Layer> {
        self.sessions
            .iter()
            .map(|session| Layer {
                z_index: self.config.z_index(session.id),
                session: Arc::clone(session),
            })
            .collect()
    }

    fn allocate_id(&mut self) -> SessionId {
        let id = SessionId::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn position(&self, id: SessionId) -> Option<usize> {
        self.sessions.iter().position(|s| s.id == id)
    }
}
