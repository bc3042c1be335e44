//! Chrome-state synchronization between a window handle and its
//! presentation process.

use std::sync::{Arc, Mutex, Weak};

use crate::handle::{ChromeEvent, WindowHandle};
use crate::manager::{lock_state, ManagerState};
use crate::protocol::WindowNotification;

/// Derived title-bar-button visibility: the platform must expose native
/// buttons, the window must not be fullscreen, and the buttons must be
/// currently shown.
pub(crate) fn title_bar_button_visibility<H: WindowHandle>(
    window: &H,
    native_buttons: bool,
) -> bool {
    native_buttons && !window.is_fullscreen() && window.title_bar_buttons_shown()
}

/// Wires the chrome-event observer for one freshly constructed handle.
///
/// Close tears the window out of the registry and the in-memory identity
/// set; every other event is forwarded to the owning presentation process.
/// A fullscreen transition invalidates the derived button visibility, so
/// both values are pushed within the same handling.
pub(crate) fn attach<H: WindowHandle>(
    window: &H,
    shared: &Arc<Mutex<ManagerState<H>>>,
    native_buttons: bool,
) {
    let state: Weak<Mutex<ManagerState<H>>> = Arc::downgrade(shared);
    let handle = window.clone();
    let href = window.handle_ref();
    window.subscribe(Box::new(move |event| match event {
        ChromeEvent::Close => {
            if let Some(state) = state.upgrade() {
                let mut state = lock_state(&state);
                if let Some(record) = state.registry.unregister(href) {
                    state.persisted.ids.retain(|id| *id != record.id);
                    log::debug!("window {} closed (ref {})", record.id, href);
                }
            }
        }
        ChromeEvent::EnterFullscreen => send_fullscreen(&handle, true, native_buttons),
        ChromeEvent::LeaveFullscreen => send_fullscreen(&handle, false, native_buttons),
        ChromeEvent::Maximize => handle.notify(WindowNotification::MaximizeChange(true)),
        ChromeEvent::Unmaximize => handle.notify(WindowNotification::MaximizeChange(false)),
        ChromeEvent::Focus => handle.notify(WindowNotification::FocusChange(true)),
        ChromeEvent::Blur => handle.notify(WindowNotification::FocusChange(false)),
    }));
}

fn send_fullscreen<H: WindowHandle>(window: &H, fullscreen: bool, native_buttons: bool) {
    window.notify(WindowNotification::FullscreenChange(fullscreen));
    window.notify(WindowNotification::TitleBarButtonVisibilityChange(
        title_bar_button_visibility(window, native_buttons),
    ));
}
