//! In-memory host globals with automatic serialization.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{GlobalKey, HostGlobals, StateError};

#[derive(Debug, Clone)]
struct Slot {
    value: Value,
    version: u64,
}

/// Process-wide host globals held in memory.
///
/// Cloning the host clones the handle, not the state: every clone sees
/// the same slots. This is the host used by tests and by the `shelf`
/// tool; an embedding shell provides its own [`HostGlobals`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryHost {
    slots: Arc<RwLock<HashMap<GlobalKey, Slot>>>,
}

impl InMemoryHost {
    /// Create an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a host that launched a widget with the given tool output.
    pub fn with_tool_output(tool_output: Value) -> Self {
        let host = Self::new();
        host.set_tool_output(tool_output);
        host
    }

    /// Replace the tool output (host side of a tool call).
    pub fn set_tool_output(&self, value: Value) {
        self.replace(GlobalKey::ToolOutput, value);
    }

    /// Get a global decoded as `T`.
    ///
    /// Returns `None` if the global was never written.
    pub fn get<T: DeserializeOwned>(&self, key: GlobalKey) -> Result<Option<T>, StateError> {
        match self.read(key) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Encode `value` and store it as the whole global.
    pub fn set<T: Serialize>(&self, key: GlobalKey, value: &T) -> Result<(), StateError> {
        let value = serde_json::to_value(value)?;
        self.replace(key, value);
        Ok(())
    }

    /// Remove a global.
    pub fn delete(&self, key: GlobalKey) {
        self.slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&key);
    }

    /// Check if a global has been written.
    pub fn exists(&self, key: GlobalKey) -> bool {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&key)
    }

    /// Globals currently present.
    pub fn keys(&self) -> Vec<GlobalKey> {
        let mut keys: Vec<GlobalKey> = self
            .slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect();
        keys.sort_by_key(|k| k.as_str());
        keys
    }

    /// Number of writes a global has seen (0 if never written).
    pub fn version(&self, key: GlobalKey) -> u64 {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .map(|slot| slot.version)
            .unwrap_or(0)
    }

    fn replace(&self, key: GlobalKey, value: Value) {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        let version = slots.get(&key).map(|slot| slot.version).unwrap_or(0) + 1;
        slots.insert(key, Slot { value, version });
    }
}

impl HostGlobals for InMemoryHost {
    fn read(&self, key: GlobalKey) -> Option<Value> {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .map(|slot| slot.value.clone())
    }

    fn write_widget_state(&self, value: Value) -> Result<(), StateError> {
        self.replace(GlobalKey::WidgetState, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn test_empty_host_reads_nothing() {
        let host = InMemoryHost::new();
        assert!(host.read(GlobalKey::ToolOutput).is_none());
        assert!(host.read(GlobalKey::WidgetState).is_none());
        assert_eq!(host.version(GlobalKey::WidgetState), 0);
        assert!(host.keys().is_empty());
    }

    #[test]
    fn test_write_replaces_whole_value() {
        let host = InMemoryHost::new();
        host.write_widget_state(json!({ "a": 1, "b": 2 })).unwrap();
        host.write_widget_state(json!({ "c": 3 })).unwrap();

        assert_eq!(host.read(GlobalKey::WidgetState), Some(json!({ "c": 3 })));
        assert_eq!(host.version(GlobalKey::WidgetState), 2);
    }

    #[test]
    fn test_clones_share_state() {
        let host = InMemoryHost::new();
        let other = host.clone();
        other.write_widget_state(json!("shared")).unwrap();
        assert_eq!(host.read(GlobalKey::WidgetState), Some(json!("shared")));
    }

    #[test]
    fn test_typed_get_and_set() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Output {
            places: Vec<String>,
        }

        let host = InMemoryHost::new();
        let output = Output {
            places: vec!["p1".into()],
        };
        host.set(GlobalKey::ToolOutput, &output).unwrap();

        let read: Option<Output> = host.get(GlobalKey::ToolOutput).unwrap();
        assert_eq!(read, Some(output));
        assert!(host.exists(GlobalKey::ToolOutput));
        assert_eq!(host.keys(), vec![GlobalKey::ToolOutput]);
    }

    #[test]
    fn test_typed_get_reports_shape_mismatch() {
        let host = InMemoryHost::with_tool_output(json!("not a list"));
        let read: Result<Option<Vec<u32>>, _> = host.get(GlobalKey::ToolOutput);
        assert!(matches!(read, Err(StateError::SerializeError(_))));
    }

    #[test]
    fn test_delete() {
        let host = InMemoryHost::with_tool_output(json!({}));
        host.delete(GlobalKey::ToolOutput);
        assert!(!host.exists(GlobalKey::ToolOutput));
    }
}
