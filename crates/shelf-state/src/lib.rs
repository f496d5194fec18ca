//! Host-managed shared widget state.
//!
//! Widgets never talk to each other directly. They read two well-known
//! globals from the hosting shell (`toolOutput`, `widgetState`) and write
//! back a whole new `widgetState` value. This crate models that pair of
//! primitives and provides an in-memory host for tests and tools.
//!
//! # Example
//!
//! ```rust
//! use shelf_state::{GlobalKey, HostGlobals, InMemoryHost, read_path};
//! use serde_json::json;
//!
//! let host = InMemoryHost::new();
//! host.write_widget_state(json!({ "compareWidget": { "items": [] } })).unwrap();
//!
//! let state = host.read(GlobalKey::WidgetState).unwrap();
//! assert!(read_path(&state, "compareWidget.items").unwrap().is_array());
//! ```

mod error;
mod host;
mod memory;
mod widget_state;

pub use error::StateError;
pub use host::{GlobalKey, HostGlobals};
pub use memory::InMemoryHost;
pub use widget_state::{read_path, WidgetState};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{read_path, GlobalKey, HostGlobals, InMemoryHost, StateError, WidgetState};
}
