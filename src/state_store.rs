//! Persisted window-identity state.
//!
//! One JSON document per application data directory records which window
//! identities should exist after a restart. Reads are best-effort: a
//! missing, unreadable, or schema-invalid document degrades to the empty
//! state rather than failing startup, and write failures leave the
//! in-memory state authoritative for the running process.

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::types::{PersistedState, WindowId};

const STATE_FILE: &str = "window-state.json";

/// File name of the per-identity geometry document.
///
/// The geometry format and its restore semantics belong to the windowing
/// backend; this crate only decides when the file is discarded and which
/// identity it belongs to.
pub fn geometry_file_name(id: WindowId) -> String {
    format!("window-state_{}.json", id)
}

/// Store for the window-identity document, bound to one data directory.
#[derive(Debug, Clone)]
pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        StateStore { dir: dir.into() }
    }

    /// Path of the identity document.
    pub fn state_path(&self) -> PathBuf {
        self.dir.join(STATE_FILE)
    }

    /// Loads the persisted identity set, falling back to the empty state
    /// on a missing, unreadable, or schema-invalid document.
    pub fn load(&self) -> PersistedState {
        let path = self.state_path();
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) => {
                log::debug!("no readable window state at {}: {}", path.display(), e);
                return PersistedState::default();
            }
        };
        match decode_state(&json) {
            Some(state) => state,
            None => {
                log::warn!("discarding malformed window state at {}", path.display());
                PersistedState::default()
            }
        }
    }

    /// Writes the identity set, overwriting the previous document. A
    /// failure is logged and swallowed.
    pub fn save(&self, state: &PersistedState) {
        if let Err(e) = self.try_save(state) {
            log::warn!(
                "failed to save window state to {}: {}",
                self.state_path().display(),
                e
            );
        }
    }

    fn try_save(&self, state: &PersistedState) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string(state)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(self.state_path(), json)
    }

    /// Best-effort delete of the per-identity geometry file. A missing
    /// file is the common case and not an error.
    pub fn discard_window_geometry(&self, id: WindowId) {
        let path = self.dir.join(geometry_file_name(id));
        match fs::remove_file(&path) {
            Ok(()) => log::debug!("discarded remembered geometry at {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => log::debug!(
                "could not discard geometry at {}: {}",
                path.display(),
                e
            ),
        }
    }
}

/// Strict decode of the persisted document: an object with an `ids` field
/// holding a sequence of positive integers. Anything else is invalid.
fn decode_state(json: &str) -> Option<PersistedState> {
    let state: PersistedState = serde_json::from_str(json).ok()?;
    state.ids.iter().all(|id| *id > 0).then_some(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn store() -> (TempDir, StateStore) {
        let temp_dir = TempDir::new().expect("Failed to create temporary directory");
        let store = StateStore::new(temp_dir.path());
        (temp_dir, store)
    }

    #[test]
    fn test_load_missing_file_yields_empty_state() {
        let (_dir, store) = store();
        assert_eq!(store.load(), PersistedState::default());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let (_dir, store) = store();
        let state = PersistedState { ids: vec![2, 5, 1] };
        store.save(&state);
        assert_eq!(store.load(), state);
    }

    #[test]
    fn test_save_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let store = StateStore::new(temp_dir.path().join("nested").join("dir"));
        store.save(&PersistedState { ids: vec![1] });
        assert_eq!(store.load().ids, vec![1]);
    }

    #[test]
    fn test_load_garbage_yields_empty_state() {
        let (_dir, store) = store();
        fs::write(store.state_path(), "not json at all {{{").unwrap();
        assert_eq!(store.load(), PersistedState::default());
    }

    #[test]
    fn test_load_wrong_shape_yields_empty_state() {
        let (_dir, store) = store();
        for doc in [
            r#"[1, 2, 3]"#,
            r#"{"ids": "1,2,3"}"#,
            r#"{"ids": [true, false]}"#,
            r#"{"ids": [1.5]}"#,
            r#"{"ids": [-1]}"#,
            r#"{"windows": [1]}"#,
        ] {
            fs::write(store.state_path(), doc).unwrap();
            assert_eq!(store.load(), PersistedState::default(), "doc: {}", doc);
        }
    }

    #[test]
    fn test_load_rejects_zero_identity() {
        let (_dir, store) = store();
        fs::write(store.state_path(), r#"{"ids": [0, 1]}"#).unwrap();
        assert_eq!(store.load(), PersistedState::default());
    }

    #[test]
    fn test_load_tolerates_unknown_fields() {
        let (_dir, store) = store();
        fs::write(store.state_path(), r#"{"ids": [1, 2], "version": 3}"#).unwrap();
        assert_eq!(store.load().ids, vec![1, 2]);
    }

    #[test]
    fn test_geometry_file_name_is_derived_from_identity() {
        assert_eq!(geometry_file_name(1), "window-state_1.json");
        assert_eq!(geometry_file_name(42), "window-state_42.json");
    }

    #[test]
    fn test_discard_window_geometry_removes_file() {
        let (dir, store) = store();
        let path = dir.path().join(geometry_file_name(7));
        fs::write(&path, r#"{"width": 800}"#).unwrap();

        store.discard_window_geometry(7);
        assert!(!path.exists());
    }

    #[test]
    fn test_discard_missing_geometry_is_silent() {
        let (_dir, store) = store();
        store.discard_window_geometry(7);
    }
}
