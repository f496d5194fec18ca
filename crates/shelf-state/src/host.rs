//! The accessor/mutator pair a hosting shell exposes to widgets.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::StateError;

/// Well-known globals published by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GlobalKey {
    /// Structured output of the tool call that launched the widget.
    #[serde(rename = "toolOutput")]
    ToolOutput,
    /// State shared between widget instances, written by widgets.
    #[serde(rename = "widgetState")]
    WidgetState,
}

impl GlobalKey {
    /// Wire name of the global.
    pub fn as_str(&self) -> &'static str {
        match self {
            GlobalKey::ToolOutput => "toolOutput",
            GlobalKey::WidgetState => "widgetState",
        }
    }

    /// Parse a wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "toolOutput" => Some(GlobalKey::ToolOutput),
            "widgetState" => Some(GlobalKey::WidgetState),
            _ => None,
        }
    }
}

impl fmt::Display for GlobalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read/write access to host globals.
///
/// Implementations must make `write_widget_state` an atomic replace: a
/// concurrent `read` sees either the previous value or the new one.
pub trait HostGlobals {
    /// Read the current value of a global, if any.
    fn read(&self, key: GlobalKey) -> Option<Value>;

    /// Replace the whole widget state.
    fn write_widget_state(&self, value: Value) -> Result<(), StateError>;
}

impl<H: HostGlobals + ?Sized> HostGlobals for &H {
    fn read(&self, key: GlobalKey) -> Option<Value> {
        (**self).read(key)
    }

    fn write_widget_state(&self, value: Value) -> Result<(), StateError> {
        (**self).write_widget_state(value)
    }
}

impl<H: HostGlobals + ?Sized> HostGlobals for std::sync::Arc<H> {
    fn read(&self, key: GlobalKey) -> Option<Value> {
        (**self).read(key)
    }

    fn write_widget_state(&self, value: Value) -> Result<(), StateError> {
        (**self).write_widget_state(value)
    }
}
