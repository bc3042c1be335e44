//! Cross-process message types.
//!
//! Three message categories move between the controller and a presentation
//! process: queries (request/response), commands (fire-and-forget), and
//! unsolicited controller-to-presentation notifications. All are plain
//! serde types so the embedding transport can ship them as JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{PlacementOptions, WindowId};

/// Request/response operations, dispatched against the handle that sent
/// them.
///
/// Every query resolves with a value; an unresolvable origin handle
/// yields the documented default instead of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WindowQuery {
    /// Identity and one-shot params of the calling window. Params are
    /// cleared on first read.
    GetData,
    IsFullscreen,
    IsMaximized,
    IsFocused,
    GetTitleBarButtonVisibility,
}

/// Fire-and-forget operations; no reply is ever produced and failures are
/// never reported back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WindowCommand {
    /// Open a new window, optionally with params for its presentation
    /// process and explicit placement.
    Open {
        #[serde(default)]
        params: Option<Value>,
        #[serde(default)]
        options: Option<PlacementOptions>,
    },
    Close,
    SetFullscreen { fullscreen: bool },
    EnterFullscreen,
    ExitFullscreen,
    ToggleFullscreen,
    SetMaximized { maximized: bool },
    Maximize,
    Unmaximize,
    ToggleMaximized,
    /// No-op on platforms without native title-bar buttons.
    SetTitleBarButtonVisibility { visible: bool },
}

/// Payload of a resolved [`WindowQuery::GetData`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowData {
    pub id: WindowId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// Reply to a [`WindowQuery`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum QueryResponse {
    /// [`WindowQuery::GetData`] reply; `None` when the origin handle is no
    /// longer registered.
    Data(Option<WindowData>),
    /// Reply to the boolean chrome-state queries.
    Flag(bool),
}

/// Unsolicited chrome-state pushes from the controller to the
/// presentation process owning the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum WindowNotification {
    #[serde(rename = "onFullscreenChange")]
    FullscreenChange(bool),
    #[serde(rename = "onMaximizeChange")]
    MaximizeChange(bool),
    #[serde(rename = "onFocusChange")]
    FocusChange(bool),
    #[serde(rename = "onTitleBarButtonVisibilityChange")]
    TitleBarButtonVisibilityChange(bool),
}
