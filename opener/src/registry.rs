//! Single access point to the mounted session store.
//!
//! Openers talk to the registry, never to a store directly. The registry
//! holds at most one bound store: binding while bound hands back the current
//! store, and unbinding tears it down so a fresh store can bind later.
//!
//! Applications normally create one `Registry` and pass clones of it to their
//! openers. `Registry::global()` exists for code that cannot thread a handle
//! through.

use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};
use std::time::Duration;

use log::{debug, warn};

use crate::config::StoreConfig;
use crate::error::OverlayError;
use crate::layer::Layer;
use crate::session::{OpenRequest, Session, SessionId};
use crate::store::{OpenOutcome, Property, StoreHandle};

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Binding from registry calls to the currently mounted store.
///
/// Clones share the binding.
#[derive(Clone, Default)]
pub struct Registry {
    slot: Arc<RwLock<Option<StoreHandle>>>,
}

impl Registry {
    /// Creates an unbound registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> &'static Registry {
        GLOBAL.get_or_init(Registry::new)
    }

    /// Binds a new store unless one is already bound.
    ///
    /// When a store is bound, it is returned unchanged and `config` is
    /// ignored.
    pub fn bind(&self, config: StoreConfig) -> StoreHandle {
        let mut slot = self
            .slot
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(handle) = slot.as_ref() {
            debug!("Session store already bound; keeping it");
            return handle.clone();
        }
        let handle = StoreHandle::new(config);
        *slot = Some(handle.clone());
        debug!("Bound session store");
        handle
    }

    /// Binds a store with the default config unless one is already bound.
    pub fn mount(&self) -> StoreHandle {
        self.bind(StoreConfig::default())
    }

    /// Clears the binding and tears the store down.
    ///
    /// Pending close timers of the old store become no-ops. Returns whether
    /// a store was bound.
    pub fn unbind(&self) -> bool {
        let handle = self
            .slot
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        match handle {
            Some(handle) => {
                handle.teardown();
                debug!("Unbound session store");
                true
            }
            None => false,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_some()
    }

    /// The bound store, or `OverlayError::Unbound`.
    pub fn current(&self) -> Result<StoreHandle, OverlayError> {
        self.handle("current")
    }

    fn handle(&self, operation: &str) -> Result<StoreHandle, OverlayError> {
        let slot = self
            .slot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        slot.clone().ok_or_else(|| {
            warn!("Registry call '{}' made with no session store bound", operation);
            OverlayError::Unbound
        })
    }

    pub fn open(&self, request: OpenRequest) -> Result<OpenOutcome, OverlayError> {
        Ok(self.handle("open")?.open(request))
    }

    pub fn change(&self, id: SessionId, request: OpenRequest) -> Result<(), OverlayError> {
        self.handle("change")?.change(id, request);
        Ok(())
    }

    pub fn close(&self, id: SessionId) -> Result<(), OverlayError> {
        self.handle("close")?.close(id);
        Ok(())
    }

    pub fn close_all(&self) -> Result<usize, OverlayError> {
        Ok(self.handle("close_all")?.close_all())
    }

    pub fn close_by_property(&self, property: Property, value: &str) -> Result<usize, OverlayError> {
        Ok(self.handle("close_by_property")?.close_by_property(property, value))
    }

    pub fn close_by_name(&self, name: &str) -> Result<usize, OverlayError> {
        self.close_by_property(Property::Name, name)
    }

    pub fn close_by_kind(&self, kind: &str) -> Result<usize, OverlayError> {
        self.close_by_property(Property::Kind, kind)
    }

    pub fn prepare_to_close(&self, id: SessionId) -> Result<bool, OverlayError> {
        Ok(self.handle("prepare_to_close")?.prepare_to_close(id))
    }

    pub fn animate_close(&self, id: SessionId, duration: Duration) -> Result<(), OverlayError> {
        self.handle("animate_close")?.animate_close(id, duration)
    }

    pub fn get(&self, id: SessionId) -> Result<Option<Arc<Session>>, OverlayError> {
        Ok(self.handle("get")?.get(id))
    }

    pub fn snapshot(&self) -> Result<Vec<Arc<Session>>, OverlayError> {
        Ok(self.handle("snapshot")?.snapshot())
    }

    pub fn layers(&self) -> Result<Vec<Layer>, OverlayError> {
        Ok(self.handle("layers")?.layers())
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("bound", &self.is_bound())
            .finish()
    }
}
