//! Lazily loaded renderable units.
//!
//! Every session carries two of these: the caller's content and the chrome
//! that wraps it. The store never looks inside them; the rendering surface
//! resolves them on demand and may abandon a load when the store unmounts.

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::OnceCell;
use tokio_util::sync::CancellationToken;

use crate::error::LoadError;

/// A resolved component. Opaque to this crate.
pub type Component = Arc<dyn Any + Send + Sync>;

type LoadFn = dyn Fn() -> BoxFuture<'static, Result<Component, LoadError>> + Send + Sync;

/// Deferred, cached component loader.
///
/// Cloning a loader shares the cache, so a component loads at most once no
/// matter how many snapshots of the session exist.
///
/// # Example
///
/// ```
/// use opener::component::Loader;
///
/// let loader = Loader::new(|| async { Ok::<_, opener::LoadError>("hello") });
/// assert!(!loader.is_resolved());
/// ```
#[derive(Clone)]
pub struct Loader {
    load: Arc<LoadFn>,
    cell: Arc<OnceCell<Component>>,
}

impl Loader {
    /// Creates a loader from an async factory.
    pub fn new<F, Fut, C>(load: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<C, LoadError>> + Send + 'static,
        C: Any + Send + Sync,
    {
        let load: Arc<LoadFn> = Arc::new(move || {
            load()
                .map(|result| result.map(|component| Arc::new(component) as Component))
                .boxed()
        });
        Self {
            load,
            cell: Arc::new(OnceCell::new()),
        }
    }

    /// Creates a loader that is already resolved.
    pub fn ready<C: Any + Send + Sync>(component: C) -> Self {
        let component: Component = Arc::new(component);
        let fallback = Arc::clone(&component);
        Self {
            load: Arc::new(move || {
                let component = Arc::clone(&fallback);
                async move { Ok(component) }.boxed()
            }),
            cell: Arc::new(OnceCell::new_with(Some(component))),
        }
    }

    /// Resolves the component, loading it on first use.
    ///
    /// A failed load is not cached; the next call retries.
    pub async fn resolve(&self) -> Result<Component, LoadError> {
        self.cell
            .get_or_try_init(|| (self.load)())
            .await
            .map(Arc::clone)
    }

    /// Resolves the component unless `cancel` fires first.
    pub async fn resolve_until(&self, cancel: &CancellationToken) -> Result<Component, LoadError> {
        if let Some(component) = self.resolved() {
            return Ok(component);
        }
        tokio::select! {
            _ = cancel.cancelled() => Err(LoadError::Cancelled),
            result = self.resolve() => result,
        }
    }

    /// Returns the component if it has already been resolved.
    pub fn resolved(&self) -> Option<Component> {
        self.cell.get().map(Arc::clone)
    }

    /// Whether the component has been resolved.
    pub fn is_resolved(&self) -> bool {
        self.cell.initialized()
    }

    /// Whether two loaders share the same underlying factory and cache.
    pub fn ptr_eq(&self, other: &Loader) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }
}

impl fmt::Debug for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loader")
            .field("resolved", &self.is_resolved())
            .finish_non_exhaustive()
    }
}
