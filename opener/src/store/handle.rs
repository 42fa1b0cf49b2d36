//! Shared handle to a mounted session store.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use log::{debug, trace, warn};
use tokio_util::sync::CancellationToken;

use super::{OpenOutcome, Property, SessionStore};
use crate::config::StoreConfig;
use crate::error::OverlayError;
use crate::layer::Layer;
use crate::session::{OpenRequest, Session, SessionId};
use crate::wakeup::WakeupSender;

struct Shared {
    store: Mutex<SessionStore>,
    wakeup: Mutex<Option<WakeupSender>>,
    /// Cancelled on teardown; aborts close timers and pending loads.
    cancel: CancellationToken,
}

/// A mounted session store.
///
/// Cheap to clone; all clones share one store. Every method locks the store
/// only for the mutation itself, then runs handlers with the lock released,
/// so a handler may call back into the same store.
#[derive(Clone)]
pub struct StoreHandle {
    shared: Arc<Shared>,
}

impl StoreHandle {
    /// Mounts a new, empty store.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                store: Mutex::new(SessionStore::new(config)),
                wakeup: Mutex::new(None),
                cancel: CancellationToken::new(),
            }),
        }
    }

    fn store(&self) -> MutexGuard<'_, SessionStore> {
        self.shared
            .store
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn changed(&self) {
        let guard = self
            .shared
            .wakeup
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(sender) = guard.as_ref() {
            sender.send();
        }
    }

    /// Installs the rendering surface's wakeup sender, replacing any previous one.
    pub fn install_wakeup(&self, sender: WakeupSender) {
        let mut guard = self
            .shared
            .wakeup
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(sender);
    }

    /// Opens a new session or updates the matching one, then fires `on_open`.
    pub fn open(&self, request: OpenRequest) -> OpenOutcome {
        let (outcome, dispatch) = self.store().open(request);
        if outcome.changed() {
            self.changed();
        }
        dispatch.fire();
        outcome
    }

    /// Forces an update of a session's handlers, extra, props and styles.
    pub fn change(&self, id: SessionId, request: OpenRequest) {
        let mut store = self.store();
        let known = store.get(id).is_some();
        let dispatch = store.change(id, request);
        drop(store);
        if known {
            self.changed();
        }
        dispatch.fire();
    }

    /// Removes a session, then fires its `on_close`.
    pub fn close(&self, id: SessionId) {
        let mut store = self.store();
        let known = store.get(id).is_some();
        let dispatch = store.close(id);
        drop(store);
        if known {
            self.changed();
        }
        dispatch.fire();
    }

    /// Removes every session. No handlers fire.
    pub fn close_all(&self) -> usize {
        let removed = self.store().close_all();
        if removed > 0 {
            self.changed();
        }
        removed
    }

    /// Removes every session whose `property` equals `value`. No handlers fire.
    pub fn close_by_property(&self, property: Property, value: &str) -> usize {
        let removed = self.store().close_by_property(property, value);
        if removed > 0 {
            self.changed();
        }
        removed
    }

    pub fn close_by_name(&self, name: &str) -> usize {
        self.close_by_property(Property::Name, name)
    }

    pub fn close_by_kind(&self, kind: &str) -> usize {
        self.close_by_property(Property::Kind, kind)
    }

    /// Marks a session as closing. Returns whether it exists.
    pub fn prepare_to_close(&self, id: SessionId) -> bool {
        let found = self.store().prepare_to_close(id);
        if found {
            self.changed();
        }
        found
    }

    /// Marks a session as closing now and removes it after `duration`.
    ///
    /// The timer is owned by this store: tearing the store down cancels it,
    /// and a timer that outlives the store does nothing. If the session was
    /// already removed when the timer fires, nothing happens either.
    pub fn animate_close(&self, id: SessionId, duration: Duration) -> Result<(), OverlayError> {
        if !self.prepare_to_close(id) {
            trace!("Ignoring animated close of unknown session {}", id);
            return Ok(());
        }
        if self.is_torn_down() {
            debug!("Store torn down; session {} left closing", id);
            return Ok(());
        }
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| {
            warn!("No tokio runtime to schedule the close of session {}", id);
            OverlayError::NoRuntime
        })?;

        let store = Arc::downgrade(&self.shared);
        let cancel = self.shared.cancel.clone();
        runtime.spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {
                    trace!("Close timer for session {} cancelled", id);
                }
                _ = tokio::time::sleep(duration) => {
                    StoreHandle::finish_close(&store, id);
                }
            }
        });
        Ok(())
    }

    fn finish_close(store: &Weak<Shared>, id: SessionId) {
        let Some(shared) = store.upgrade() else {
            trace!("Close timer for session {} outlived its store", id);
            return;
        };
        let handle = StoreHandle { shared };
        let dispatch = handle.store().finish_close(id);
        match dispatch {
            Some(dispatch) => {
                handle.changed();
                dispatch.fire();
            }
            None => trace!("Session {} already gone when its close timer fired", id),
        }
    }

    pub fn get(&self, id: SessionId) -> Option<Arc<Session>> {
        self.store().get(id)
    }

    /// Sessions in insertion order.
    pub fn snapshot(&self) -> Vec<Arc<Session>> {
        self.store().sessions().to_vec()
    }

    /// Sessions in insertion order with their stacking values.
    pub fn layers(&self) -> Vec<Layer> {
        self.store().layers()
    }

    pub fn len(&self) -> usize {
        self.store().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store().is_empty()
    }

    pub fn config(&self) -> StoreConfig {
        *self.store().config()
    }

    /// Token cancelled when this store is torn down.
    ///
    /// The rendering surface passes it to `Layer::resolve` so loads stop
    /// when the store unmounts.
    pub fn cancellation(&self) -> CancellationToken {
        self.shared.cancel.clone()
    }

    /// Cancels every pending close timer. Sessions are left as they are.
    pub fn teardown(&self) {
        if !self.shared.cancel.is_cancelled() {
            debug!("Tearing down session store");
            self.shared.cancel.cancel();
        }
    }

    pub fn is_torn_down(&self) -> bool {
        self.shared.cancel.is_cancelled()
    }

    /// Whether two handles share the same store.
    pub fn ptr_eq(&self, other: &StoreHandle) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl Default for StoreHandle {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreHandle")
            .field("sessions", &self.len())
            .field("torn_down", &self.is_torn_down())
            .finish()
    }
}
