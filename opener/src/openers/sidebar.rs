//! Sidebars sliding in from a screen edge.

use std::time::Duration;

use log::trace;
use serde_json::json;

use super::{OpenOptions, Opener, styles};
use crate::component::Loader;
use crate::error::OverlayError;
use crate::registry::Registry;
use crate::session::{Extra, SessionId, SidebarOptions, SidebarPosition, Styles};
use crate::store::OpenOutcome;

/// Kind tag of sidebar sessions.
pub const SIDEBAR_KIND: &str = "sidebar";

/// Per-request sidebar options. Unset fields take the opener's defaults.
#[derive(Debug, Clone, Default)]
pub struct SidebarOpenOptions {
    /// Edge to slide in from. Default: right.
    pub position: Option<SidebarPosition>,
    /// Open/close animation length. Default: the opener's
    /// `default_animation_duration`.
    pub animation_duration: Option<Duration>,
    pub wrapper_class: Option<String>,
    pub modal: bool,
}

impl SidebarOpenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(mut self, position: SidebarPosition) -> Self {
        self.position = Some(position);
        self
    }

    pub fn animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = Some(duration);
        self
    }

    pub fn wrapper_class(mut self, class: impl Into<String>) -> Self {
        self.wrapper_class = Some(class.into());
        self
    }

    pub fn modal(mut self) -> Self {
        self.modal = true;
        self
    }
}

/// Opens sidebars and closes them after their exit animation.
#[derive(Debug, Clone)]
pub struct SidebarOpener {
    registry: Registry,
    surface: Loader,
    /// Styles used when a request brings none.
    pub default_styles: Styles,
    /// Animation length used when a request sets none.
    pub default_animation_duration: Duration,
}

impl SidebarOpener {
    pub fn new(registry: Registry, surface: Loader) -> Self {
        Self {
            registry,
            surface,
            default_styles: styles(json!({
                "boxShadow": "0 0 15px rgba(128, 128, 128, 0.3)",
                "minWidth": "200px",
                "minHeight": "200px",
                "backgroundColor": "white",
            })),
            default_animation_duration: Duration::from_millis(400),
        }
    }

    pub fn with_default_styles(mut self, default_styles: Styles) -> Self {
        self.default_styles = default_styles;
        self
    }

    pub fn with_default_animation_duration(mut self, duration: Duration) -> Self {
        self.default_animation_duration = duration;
        self
    }

    /// Opens a sidebar, or updates the one already open under this name.
    pub fn open(
        &self,
        options: OpenOptions,
        sidebar: SidebarOpenOptions,
    ) -> Result<OpenOutcome, OverlayError> {
        let extra = SidebarOptions {
            position: sidebar.position.unwrap_or_default(),
            animation_duration: sidebar
                .animation_duration
                .unwrap_or(self.default_animation_duration),
            wrapper_class: sidebar.wrapper_class,
            modal: sidebar.modal,
        };
        self.open_with(options, Extra::Sidebar(extra))
    }

    /// Handles a click on the backdrop: modal sidebars close, others stay.
    pub fn backdrop_clicked(&self, id: SessionId) -> Result<(), OverlayError> {
        let modal = self
            .registry
            .get(id)?
            .and_then(|session| session.extra.as_sidebar().map(|o| o.modal))
            .unwrap_or(false);
        if modal { self.close(id) } else { Ok(()) }
    }
}

impl Opener for SidebarOpener {
    fn kind(&self) -> &str {
        SIDEBAR_KIND
    }

    fn registry(&self) -> &Registry {
        &self.registry
    }

    fn surface(&self) -> &Loader {
        &self.surface
    }

    fn default_styles(&self) -> &Styles {
        &self.default_styles
    }

    /// Plays the stored exit animation, then removes the sidebar. A zero
    /// duration, or a session opened by another kind, closes immediately.
    fn close(&self, id: SessionId) -> Result<(), OverlayError> {
        let Some(session) = self.registry.get(id)? else {
            trace!("Sidebar {} is not open", id);
            return Ok(());
        };
        let duration = session
            .extra
            .as_sidebar()
            .map(|options| options.animation_duration)
            .unwrap_or_default();
        if duration.is_zero() {
            self.registry.close(id)
        } else {
            self.registry.animate_close(id, duration)
        }
    }
}
