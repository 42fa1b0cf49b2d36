//! Render snapshot handed to the rendering surface.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::component::Component;
use crate::error::LoadError;
use crate::session::{Session, SessionId};

/// One session as the rendering surface sees it, with its stacking value.
#[derive(Debug, Clone)]
pub struct Layer {
    pub session: Arc<Session>,
    pub z_index: i64,
}

/// Content and chrome of a layer, both resolved.
#[derive(Clone)]
pub struct ResolvedLayer {
    pub content: Component,
    pub surface: Component,
}

impl Layer {
    pub fn id(&self) -> SessionId {
        self.session.id
    }

    /// Resolves content and chrome, abandoning both if `cancel` fires.
    ///
    /// The two loads run concurrently and finish independently.
    pub async fn resolve(&self, cancel: &CancellationToken) -> Result<ResolvedLayer, LoadError> {
        let (content, surface) = tokio::join!(
            self.session.content.resolve_until(cancel),
            self.session.surface.resolve_until(cancel),
        );
        Ok(ResolvedLayer {
            content: content?,
            surface: surface?,
        })
    }
}
