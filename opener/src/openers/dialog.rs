//! Centered dialog boxes.

use serde_json::json;

use super::{OpenOptions, Opener, styles};
use crate::component::Loader;
use crate::error::OverlayError;
use crate::registry::Registry;
use crate::session::{DialogOptions, Extra, SessionId, Styles};
use crate::store::OpenOutcome;

/// Kind tag of dialog sessions.
pub const DIALOG_KIND: &str = "dialog";

/// Opens dialogs centered on screen.
///
/// # Example
///
/// ```
/// use opener::prelude::*;
///
/// let registry = Registry::new();
/// registry.mount();
///
/// let dialogs = DialogOpener::new(registry.clone(), Loader::ready("dialog chrome"));
/// let outcome = dialogs
///     .open(
///         OpenOptions::new("MainDialog", Loader::ready("content"))
///             .props(serde_json::json!({"title": "Hello"})),
///         DialogOptions::default(),
///     )
///     .unwrap();
///
/// dialogs.close(outcome.id()).unwrap();
/// assert!(registry.snapshot().unwrap().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct DialogOpener {
    registry: Registry,
    surface: Loader,
    /// Styles used when a request brings none.
    pub default_styles: Styles,
}

impl DialogOpener {
    pub fn new(registry: Registry, surface: Loader) -> Self {
        Self {
            registry,
            surface,
            default_styles: styles(json!({
                "boxShadow": "rgb(0 0 0 / 40%) 0px 0px 40px",
                "minWidth": "200px",
                "minHeight": "200px",
                "backgroundColor": "white",
            })),
        }
    }

    pub fn with_default_styles(mut self, default_styles: Styles) -> Self {
        self.default_styles = default_styles;
        self
    }

    /// Opens a dialog, or updates the one already open under this name.
    pub fn open(
        &self,
        options: OpenOptions,
        dialog: DialogOptions,
    ) -> Result<OpenOutcome, OverlayError> {
        self.open_with(options, Extra::Dialog(dialog))
    }
}

impl Opener for DialogOpener {
    fn kind(&self) -> &str {
        DIALOG_KIND
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

    /// Dialogs close immediately.
    fn close(&self, id: SessionId) -> Result<(), OverlayError> {
        self.registry.close(id)
    }
}
