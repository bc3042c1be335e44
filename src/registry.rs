//! In-memory registry of live windows.

use std::collections::HashMap;

use serde_json::Value;

use crate::types::{HandleRef, WindowId, WindowRecord};

pub(crate) struct RegistryEntry<H> {
    pub(crate) handle: H,
    pub(crate) record: WindowRecord,
}

/// Maps transient handle references to live window records.
///
/// An entry exists for exactly the lifetime of its underlying handle:
/// inserted once the window is constructed, removed from the handle's
/// close notification. A lookup against a stale or unknown reference
/// resolves to `None`, never an error.
pub(crate) struct WindowRegistry<H> {
    entries: HashMap<HandleRef, RegistryEntry<H>>,
}

impl<H> Default for WindowRegistry<H> {
    fn default() -> Self {
        WindowRegistry {
            entries: HashMap::new(),
        }
    }
}

impl<H> WindowRegistry<H> {
    pub(crate) fn register(
        &mut self,
        href: HandleRef,
        handle: H,
        id: WindowId,
        params: Option<Value>,
    ) {
        self.entries
            .insert(href, RegistryEntry { handle, record: WindowRecord { id, params } });
    }

    /// Resolves a transient reference to its live entry.
    pub(crate) fn lookup(&self, href: HandleRef) -> Option<&RegistryEntry<H>> {
        self.entries.get(&href)
    }

    /// Returns the record with its current params and clears them on the
    /// live entry, so a second read observes identity only.
    pub(crate) fn consume_params(&mut self, href: HandleRef) -> Option<WindowRecord> {
        let entry = self.entries.get_mut(&href)?;
        let params = entry.record.params.take();
        Some(WindowRecord {
            id: entry.record.id,
            params,
        })
    }

    /// Removes and returns the record for `href`.
    pub(crate) fn unregister(&mut self, href: HandleRef) -> Option<WindowRecord> {
        self.entries.remove(&href).map(|entry| entry.record)
    }

    pub(crate) fn handles(&self) -> impl Iterator<Item = &H> {
        self.entries.values().map(|entry| &entry.handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_register_and_lookup() {
        let mut registry: WindowRegistry<()> = WindowRegistry::default();
        registry.register(10, (), 1, Some(json!({"doc": "a.md"})));

        let entry = registry.lookup(10).unwrap();
        assert_eq!(entry.record.id, 1);
        assert_eq!(entry.record.params, Some(json!({"doc": "a.md"})));
        assert!(registry.lookup(11).is_none());
    }

    #[test]
    fn test_consume_params_clears_on_second_read() {
        let mut registry: WindowRegistry<()> = WindowRegistry::default();
        registry.register(10, (), 1, Some(json!(["x"])));

        let first = registry.consume_params(10).unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(first.params, Some(json!(["x"])));

        let second = registry.consume_params(10).unwrap();
        assert_eq!(second.id, 1);
        assert_eq!(second.params, None);
    }

    #[test]
    fn test_consume_params_without_params() {
        let mut registry: WindowRegistry<()> = WindowRegistry::default();
        registry.register(10, (), 3, None);

        let record = registry.consume_params(10).unwrap();
        assert_eq!(record.id, 3);
        assert_eq!(record.params, None);
    }

    #[test]
    fn test_unregister_removes_entry() {
        let mut registry: WindowRegistry<()> = WindowRegistry::default();
        registry.register(10, (), 1, None);

        let record = registry.unregister(10).unwrap();
        assert_eq!(record.id, 1);
        assert!(registry.lookup(10).is_none());
        assert_eq!(registry.handles().count(), 0);
        assert!(registry.unregister(10).is_none());
    }

    #[test]
    fn test_handles_iterates_live_windows() {
        let mut registry: WindowRegistry<u8> = WindowRegistry::default();
        registry.register(10, 1, 1, None);
        registry.register(20, 2, 2, None);

        let mut handles: Vec<u8> = registry.handles().copied().collect();
        handles.sort_unstable();
        assert_eq!(handles, vec![1, 2]);
    }
}
