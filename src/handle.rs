//! The window-handle capability the lifecycle controller drives.
//!
//! The handle implementation itself (native chrome, geometry enforcement,
//! the presentation-process channel) lives in the embedding application;
//! this trait abstracts it so the controller can be exercised against a
//! mock backend in tests.

use crate::protocol::WindowNotification;
use crate::types::{HandleRef, WindowBounds};

/// Chrome events a window handle reports to its registered observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeEvent {
    /// The window is going away.
    Close,
    EnterFullscreen,
    LeaveFullscreen,
    Maximize,
    Unmaximize,
    Focus,
    Blur,
}

/// Observer registered on a handle at creation time, invoked synchronously
/// by the handle's own event source.
pub type ChromeEventListener = Box<dyn FnMut(ChromeEvent) + Send>;

/// A live window instance, treated as an opaque capability.
///
/// Implementations are cheap clonable references to one underlying window,
/// the way a Tauri `WebviewWindow` or an Electron browser window behaves.
/// All methods are synchronous state reads or fire-and-forget requests to
/// the windowing backend.
pub trait WindowHandle: Clone + Send + 'static {
    /// Runtime reference the registry and the transport layer key this
    /// handle by.
    fn handle_ref(&self) -> HandleRef;

    /// Ask the backend to close the window. [`ChromeEvent::Close`] fires
    /// when the window actually goes away.
    fn close(&self);

    fn is_fullscreen(&self) -> bool;
    fn set_fullscreen(&self, fullscreen: bool);

    fn is_maximized(&self) -> bool;
    fn maximize(&self);
    fn unmaximize(&self);

    fn is_focused(&self) -> bool;

    /// Current outer bounds in logical units.
    fn outer_bounds(&self) -> WindowBounds;

    /// Whether the native title-bar buttons are currently shown. Only
    /// meaningful on platforms that have them.
    fn title_bar_buttons_shown(&self) -> bool;
    fn set_title_bar_buttons_shown(&self, shown: bool);

    /// Register the chrome-event observer. Called exactly once per handle,
    /// immediately after construction.
    fn subscribe(&self, listener: ChromeEventListener);

    /// Fire-and-forget send to the presentation process owning this
    /// window. No acknowledgment, no ordering guarantee across
    /// notification kinds.
    fn notify(&self, notification: WindowNotification);
}
