//! Window lifecycle orchestration.
//!
//! [`WindowManager`] owns the identity set, the live-window registry, and
//! the persisted state document for one application. One instance manages
//! one storage path; all state lives on the instance and is shared only
//! with the chrome-event observers it wires, never through globals. The
//! windowing backend stays outside the crate: construction is injected as
//! a factory closure and every live window is driven through the
//! [`WindowHandle`] trait.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;

use crate::allocator;
use crate::chrome_sync;
use crate::errors::{WindowError, WindowResult};
use crate::handle::WindowHandle;
use crate::protocol::{QueryResponse, WindowCommand, WindowData, WindowNotification, WindowQuery};
use crate::registry::WindowRegistry;
use crate::state_store::StateStore;
use crate::types::{
    HandleRef, InitialPlacement, PersistedState, PlacementOptions, WindowBounds, WindowConfig,
    WindowId,
};

/// Fallback window size when neither caller options nor a focused
/// reference window provide geometry.
const FALLBACK_WIDTH: u32 = 800;
const FALLBACK_HEIGHT: u32 = 600;

/// Diagonal offset applied when a new window inherits the focused
/// window's bounds, so the two never overlap exactly.
const CASCADE_OFFSET: i32 = 30;

/// Configuration for a [`WindowManager`].
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Application data directory holding the identity document and the
    /// per-window geometry files.
    pub data_dir: PathBuf,
    /// Whether the host platform exposes native title-bar buttons. A
    /// platform capability, not a per-window setting.
    pub native_title_buttons: bool,
}

impl ManagerConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        ManagerConfig {
            data_dir: data_dir.into(),
            native_title_buttons: cfg!(target_os = "macos"),
        }
    }

    /// Resolves the platform data directory for `app_name`.
    pub fn for_app(app_name: &str) -> WindowResult<Self> {
        let base = dirs::data_dir().ok_or(WindowError::DataDirUnavailable)?;
        Ok(ManagerConfig::new(base.join(app_name)))
    }

    pub fn with_native_title_buttons(mut self, native: bool) -> Self {
        self.native_title_buttons = native;
        self
    }
}

pub(crate) struct ManagerState<H> {
    pub(crate) registry: WindowRegistry<H>,
    pub(crate) persisted: PersistedState,
}

pub(crate) fn lock_state<H>(shared: &Mutex<ManagerState<H>>) -> MutexGuard<'_, ManagerState<H>> {
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

type WindowFactory<H> = dyn Fn(WindowConfig) -> WindowResult<H> + Send + Sync;

/// Controller-side owner of window identities and lifecycle.
pub struct WindowManager<H: WindowHandle> {
    shared: Arc<Mutex<ManagerState<H>>>,
    store: StateStore,
    create_window: Box<WindowFactory<H>>,
    native_title_buttons: bool,
}

impl<H: WindowHandle> WindowManager<H> {
    /// Creates a manager around the injected window factory.
    ///
    /// The factory receives the identity and initial placement for each
    /// window and returns the constructed handle; its failure propagates
    /// out of [`create`](Self::create) untouched.
    pub fn new(
        config: ManagerConfig,
        create_window: impl Fn(WindowConfig) -> WindowResult<H> + Send + Sync + 'static,
    ) -> Self {
        WindowManager {
            shared: Arc::new(Mutex::new(ManagerState {
                registry: WindowRegistry::default(),
                persisted: PersistedState::default(),
            })),
            store: StateStore::new(config.data_dir),
            create_window: Box::new(create_window),
            native_title_buttons: config.native_title_buttons,
        }
    }

    /// Opens a new window.
    ///
    /// Allocates the smallest free identity over the in-memory set,
    /// appends it, and constructs the handle with either the caller's
    /// placement or the computed default. Explicit caller options discard
    /// any geometry remembered for the identity first, so caller geometry
    /// always overrides a remembered one.
    pub fn create(
        &self,
        params: Option<Value>,
        options: Option<PlacementOptions>,
    ) -> WindowResult<H> {
        let (id, placement) = {
            let mut state = self.lock();
            let id = allocator::next_window_id(&state.persisted.ids);
            state.persisted.ids.push(id);
            (id, resolve_placement(&state.registry, options))
        };
        if options.is_some() {
            self.store.discard_window_geometry(id);
        }
        self.open_window(id, params, placement)
    }

    /// Recreates one window per identity persisted by the last
    /// [`save`](Self::save), in stored order, each with its remembered
    /// geometry.
    ///
    /// A window that fails to construct is logged and skipped; earlier
    /// windows stay live and the remaining identities are still attempted.
    pub fn restore(&self) -> Vec<H> {
        let loaded = self.store.load();
        {
            let mut state = self.lock();
            state.persisted = loaded.clone();
        }
        let mut handles = Vec::with_capacity(loaded.ids.len());
        for id in loaded.ids {
            match self.open_window(id, None, InitialPlacement::Remembered) {
                Ok(handle) => handles.push(handle),
                Err(e) => log::warn!("could not restore window {}: {}", id, e),
            }
        }
        handles
    }

    /// Checkpoints the current in-memory identity set to disk. Durability
    /// covers the last checkpoint only; transitions since are lost on a
    /// crash.
    pub fn save(&self) {
        let state = self.lock();
        self.store.save(&state.persisted);
    }

    /// Resolves a request/response operation against the handle that sent
    /// it. A registry miss (the window closed while the message was in
    /// flight) yields the documented default, never an error.
    pub fn handle_query(&self, origin: HandleRef, query: WindowQuery) -> QueryResponse {
        match query {
            WindowQuery::GetData => {
                let mut state = self.lock();
                let data = state
                    .registry
                    .consume_params(origin)
                    .map(|record| WindowData {
                        id: record.id,
                        params: record.params,
                    });
                QueryResponse::Data(data)
            }
            WindowQuery::IsFullscreen => {
                QueryResponse::Flag(self.with_window(origin, |w| w.is_fullscreen()).unwrap_or(false))
            }
            WindowQuery::IsMaximized => {
                QueryResponse::Flag(self.with_window(origin, |w| w.is_maximized()).unwrap_or(false))
            }
            WindowQuery::IsFocused => {
                QueryResponse::Flag(self.with_window(origin, |w| w.is_focused()).unwrap_or(false))
            }
            WindowQuery::GetTitleBarButtonVisibility => QueryResponse::Flag(
                self.with_window(origin, |w| {
                    chrome_sync::title_bar_button_visibility(w, self.native_title_buttons)
                })
                .unwrap_or(false),
            ),
        }
    }

    /// Applies a fire-and-forget operation to the handle that sent it.
    /// Registry misses and failures are absorbed; commands never report
    /// back to the presentation process.
    pub fn handle_command(&self, origin: HandleRef, command: WindowCommand) {
        match command {
            WindowCommand::Open { params, options } => {
                if let Err(e) = self.create(params, options) {
                    log::error!("open command failed: {}", e);
                }
            }
            WindowCommand::Close => self.for_window(origin, |w| w.close()),
            WindowCommand::SetFullscreen { fullscreen } => {
                self.for_window(origin, |w| w.set_fullscreen(fullscreen))
            }
            WindowCommand::EnterFullscreen => self.for_window(origin, |w| w.set_fullscreen(true)),
            WindowCommand::ExitFullscreen => self.for_window(origin, |w| w.set_fullscreen(false)),
            WindowCommand::ToggleFullscreen => {
                self.for_window(origin, |w| w.set_fullscreen(!w.is_fullscreen()))
            }
            WindowCommand::SetMaximized { maximized } => self.for_window(origin, |w| {
                if maximized {
                    w.maximize()
                } else {
                    w.unmaximize()
                }
            }),
            WindowCommand::Maximize => self.for_window(origin, |w| w.maximize()),
            WindowCommand::Unmaximize => self.for_window(origin, |w| w.unmaximize()),
            WindowCommand::ToggleMaximized => self.for_window(origin, |w| {
                if w.is_maximized() {
                    w.unmaximize()
                } else {
                    w.maximize()
                }
            }),
            WindowCommand::SetTitleBarButtonVisibility { visible } => {
                if !self.native_title_buttons {
                    return;
                }
                let native = self.native_title_buttons;
                self.for_window(origin, |w| {
                    w.set_title_bar_buttons_shown(visible);
                    w.notify(WindowNotification::TitleBarButtonVisibilityChange(
                        chrome_sync::title_bar_button_visibility(w, native),
                    ));
                });
            }
        }
    }

    fn open_window(
        &self,
        id: WindowId,
        params: Option<Value>,
        placement: InitialPlacement,
    ) -> WindowResult<H> {
        let handle = (self.create_window)(WindowConfig { id, placement })?;
        {
            let mut state = self.lock();
            state
                .registry
                .register(handle.handle_ref(), handle.clone(), id, params);
        }
        chrome_sync::attach(&handle, &self.shared, self.native_title_buttons);
        log::debug!("window {} live (ref {})", id, handle.handle_ref());
        Ok(handle)
    }

    /// Runs `op` against the origin's handle with the state lock released;
    /// backend calls made by `op` may re-enter close handling.
    fn with_window<T>(&self, origin: HandleRef, op: impl FnOnce(&H) -> T) -> Option<T> {
        let handle = self
            .lock()
            .registry
            .lookup(origin)
            .map(|entry| entry.handle.clone());
        handle.map(|handle| op(&handle))
    }

    fn for_window(&self, origin: HandleRef, op: impl FnOnce(&H)) {
        let _ = self.with_window(origin, op);
    }

    fn lock(&self) -> MutexGuard<'_, ManagerState<H>> {
        lock_state(&self.shared)
    }
}

/// Default placement: cascade from the focused window when one exists,
/// otherwise the fixed fallback size centered on the display nearest the
/// pointer.
fn default_placement<H: WindowHandle>(registry: &WindowRegistry<H>) -> InitialPlacement {
    match registry.handles().find(|handle| handle.is_focused()) {
        Some(focused) => {
            let bounds = focused.outer_bounds();
            InitialPlacement::Bounds(WindowBounds {
                x: bounds.x + CASCADE_OFFSET,
                y: bounds.y + CASCADE_OFFSET,
                ..bounds
            })
        }
        None => InitialPlacement::CenteredOnCursor {
            width: FALLBACK_WIDTH,
            height: FALLBACK_HEIGHT,
        },
    }
}

fn resolve_placement<H: WindowHandle>(
    registry: &WindowRegistry<H>,
    options: Option<PlacementOptions>,
) -> InitialPlacement {
    let default = default_placement(registry);
    match options {
        None => default,
        Some(options) => {
            let base = match default {
                InitialPlacement::Bounds(bounds) => bounds,
                _ => WindowBounds {
                    x: 0,
                    y: 0,
                    width: FALLBACK_WIDTH,
                    height: FALLBACK_HEIGHT,
                },
            };
            InitialPlacement::Bounds(options.apply_to(base))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manager_config_paths() {
        let config = ManagerConfig::new("/tmp/app-data");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/app-data"));
    }

    #[test]
    fn test_manager_config_button_override() {
        let config = ManagerConfig::new("/tmp/app-data").with_native_title_buttons(true);
        assert!(config.native_title_buttons);
        let config = config.with_native_title_buttons(false);
        assert!(!config.native_title_buttons);
    }
}
