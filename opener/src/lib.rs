//! Overlay session manager.
//!
//! Keeps the list of open overlays (dialogs, sidebars, and custom kinds),
//! decides whether a request opens a new overlay or updates an existing one,
//! hands out stable ids, and sequences close animations. Rendering is left to
//! the application: it reads `Layer` snapshots and draws them.

pub mod component;
pub mod config;
pub mod equality;
pub mod error;
pub mod layer;
pub mod openers;
pub mod registry;
pub mod session;
pub mod store;
pub mod wakeup;

pub use component::{Component, Loader};
pub use config::StoreConfig;
pub use error::{LoadError, OverlayError};
pub use layer::{Layer, ResolvedLayer};
pub use registry::Registry;
pub use session::{OpenRequest, Session, SessionId, Status};
pub use store::{OpenOutcome, SessionStore, StoreHandle};

pub mod prelude {
    pub use crate::component::Loader;
    pub use crate::config::StoreConfig;
    pub use crate::error::{LoadError, OverlayError};
    pub use crate::layer::Layer;
    pub use crate::openers::{
        DialogOpener, OpenOptions, Opener, SidebarOpenOptions, SidebarOpener,
    };
    pub use crate::registry::Registry;
    pub use crate::session::{
        DialogOptions, Extra, Handlers, OpenRequest, Session, SessionId, SidebarOptions,
        SidebarPosition, Status, Styles,
    };
    pub use crate::store::{OpenOutcome, Property, StoreHandle};
}
