//! Kind-specific session options.
//!
//! The store passes these through untouched; only the chrome of each kind
//! (and its opener) reads them.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Options specific to the kind of overlay a session renders as.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "options", rename_all = "snake_case")]
pub enum Extra {
    /// No kind-specific options.
    #[default]
    None,
    /// Centered dialog box.
    Dialog(DialogOptions),
    /// Sliding sidebar.
    Sidebar(SidebarOptions),
    /// Options for a custom overlay kind.
    Custom(serde_json::Value),
}

impl Extra {
    /// Returns the dialog options, if this is a dialog.
    pub fn as_dialog(&self) -> Option<&DialogOptions> {
        match self {
            Extra::Dialog(options) => Some(options),
            _ => None,
        }
    }

    /// Returns the sidebar options, if this is a sidebar.
    pub fn as_sidebar(&self) -> Option<&SidebarOptions> {
        match self {
            Extra::Sidebar(options) => Some(options),
            _ => None,
        }
    }
}

/// Options for a centered dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogOptions {
    /// Class name applied to the dialog body.
    pub wrapper_class: String,
    /// Whether the rest of the interface is dimmed behind the dialog.
    pub modal: bool,
}

/// Edge a sidebar slides in from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SidebarPosition {
    Top,
    Left,
    #[default]
    Right,
    Bottom,
}

/// Options for a sliding sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarOptions {
    /// Edge the sidebar slides in from.
    pub position: SidebarPosition,
    /// Length of the open/close animation. Zero closes immediately.
    pub animation_duration: Duration,
    /// Class name applied to the sidebar panel (not the backdrop).
    pub wrapper_class: Option<String>,
    /// Whether a backdrop hides the rest of the interface; clicking it closes
    /// the sidebar.
    pub modal: bool,
}

impl Default for SidebarOptions {
    fn default() -> Self {
        Self {
            position: SidebarPosition::Right,
            animation_duration: Duration::from_millis(400),
            wrapper_class: None,
            modal: false,
        }
    }
}
