use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable identity of a managed window: a positive integer, unique among
/// currently-live windows, persisted across restarts. Identities are reused
/// once their window closes, never while it is alive.
pub type WindowId = u32;

/// Runtime-assigned transient reference to a live window handle.
///
/// Assigned by the windowing backend, never persisted. The transport layer
/// resolves "the handle that sent this message" to one of these, and the
/// registry is keyed by it.
pub type HandleRef = u64;

/// Persisted document recording which window identities are live.
///
/// Mutated in memory on every window open and close; written to disk only
/// on an explicit `save`, so a crash loses transitions after the last
/// checkpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PersistedState {
    pub ids: Vec<WindowId>,
}

/// Window geometry in logical units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Caller-supplied placement overrides for a new window.
///
/// Unset fields fall back to the computed default placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PlacementOptions {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl PlacementOptions {
    /// Merge these overrides field-wise over `base`.
    pub fn apply_to(&self, base: WindowBounds) -> WindowBounds {
        WindowBounds {
            x: self.x.unwrap_or(base.x),
            y: self.y.unwrap_or(base.y),
            width: self.width.unwrap_or(base.width),
            height: self.height.unwrap_or(base.height),
        }
    }
}

/// Initial placement handed to the window factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialPlacement {
    /// Remembered per-window geometry, if any, applies. Used on restore;
    /// interpretation belongs to the geometry-persistence collaborator.
    Remembered,
    /// Explicit geometry. Overrides anything remembered.
    Bounds(WindowBounds),
    /// No geometry available anywhere: the platform centers a window of
    /// this size on the display nearest the current pointer position.
    CenteredOnCursor { width: u32, height: u32 },
}

/// Input to the injected window factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowConfig {
    pub id: WindowId,
    pub placement: InitialPlacement,
}

/// Registry record for one live window.
///
/// Params are caller-supplied opaque data delivered to the presentation
/// process at most once; after the first read only the identity remains.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowRecord {
    pub id: WindowId,
    pub params: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: WindowBounds = WindowBounds {
        x: 10,
        y: 20,
        width: 800,
        height: 600,
    };

    #[test]
    fn test_placement_options_default_changes_nothing() {
        assert_eq!(PlacementOptions::default().apply_to(BASE), BASE);
    }

    #[test]
    fn test_placement_options_partial_merge() {
        let options = PlacementOptions {
            x: Some(300),
            width: Some(1024),
            ..PlacementOptions::default()
        };
        assert_eq!(
            options.apply_to(BASE),
            WindowBounds {
                x: 300,
                y: 20,
                width: 1024,
                height: 600,
            }
        );
    }

    #[test]
    fn test_placement_options_full_override() {
        let options = PlacementOptions {
            x: Some(0),
            y: Some(0),
            width: Some(640),
            height: Some(480),
        };
        let merged = options.apply_to(BASE);
        assert_eq!(merged.x, 0);
        assert_eq!(merged.y, 0);
        assert_eq!(merged.width, 640);
        assert_eq!(merged.height, 480);
    }

    #[test]
    fn test_persisted_state_serialization() {
        let state = PersistedState { ids: vec![1, 3, 4] };
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"ids":[1,3,4]}"#);

        let deserialized: PersistedState = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, state);
    }

    #[test]
    fn test_persisted_state_default_is_empty() {
        assert!(PersistedState::default().ids.is_empty());
    }
}
