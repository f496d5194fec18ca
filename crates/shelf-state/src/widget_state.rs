//! Typed access to the shared `widgetState` global.

use std::marker::PhantomData;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{GlobalKey, HostGlobals, StateError};

/// Typed view over the host's `widgetState`.
///
/// Writes always replace the whole value; there is no merge with what a
/// previous widget stored.
///
/// # Example
///
/// ```rust
/// use shelf_state::{InMemoryHost, WidgetState};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize, Default, Clone, PartialEq, Debug)]
/// struct Counter {
///     clicks: u32,
/// }
///
/// let state = WidgetState::<Counter, _>::new(InMemoryHost::new());
/// state.update(|c| c.clicks += 1).unwrap();
/// assert_eq!(state.get().unwrap(), Some(Counter { clicks: 1 }));
/// ```
pub struct WidgetState<T, H> {
    host: H,
    _phantom: PhantomData<T>,
}

impl<T, H> WidgetState<T, H>
where
    T: Serialize + DeserializeOwned + Default,
    H: HostGlobals,
{
    /// Bind to a host.
    pub fn new(host: H) -> Self {
        Self {
            host,
            _phantom: PhantomData,
        }
    }

    /// Current widget state, if one was written.
    pub fn get(&self) -> Result<Option<T>, StateError> {
        match self.host.read(GlobalKey::WidgetState) {
            Some(Value::Null) | None => Ok(None),
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
        }
    }

    /// Current widget state, or `T::default()` when absent.
    pub fn get_or_default(&self) -> Result<T, StateError> {
        Ok(self.get()?.unwrap_or_default())
    }

    /// Replace the widget state.
    pub fn set(&self, data: &T) -> Result<(), StateError> {
        let value = serde_json::to_value(data)?;
        self.host.write_widget_state(value)
    }

    /// Read, modify, and write back the widget state.
    pub fn update<F>(&self, f: F) -> Result<T, StateError>
    where
        F: FnOnce(&mut T),
    {
        let mut data = self.get_or_default()?;
        f(&mut data);
        self.set(&data)?;
        Ok(data)
    }

    /// The underlying host.
    pub fn host(&self) -> &H {
        &self.host
    }
}

/// Look up a dotted path (`"compareWidget.items"`) inside a JSON value.
///
/// Only object keys are followed; an empty path returns the value itself.
pub fn read_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }
    path.split('.')
        .try_fold(value, |current, segment| current.as_object()?.get(segment))
}
