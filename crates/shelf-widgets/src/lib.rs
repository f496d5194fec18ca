//! Carousel, list and compare surfaces.
//!
//! Each surface is an event-driven view model: the host dispatches
//! [`SurfaceEvent`]s, the surface runs the matching transition
//! synchronously, and `view()`/`render()` derive what to draw. HTML
//! fragments for the derived state live in [`render`].
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use serde_json::json;
//! use shelf_commerce::{CartStore, ProductId, ShelfConfig};
//! use shelf_state::InMemoryHost;
//! use shelf_widgets::{BrowseSurface, CompareSurface, SurfaceContext, SurfaceEvent, SurfaceKind};
//!
//! let host = InMemoryHost::with_tool_output(json!({
//!     "places": [{ "id": "a", "price": 10 }, { "id": "b", "price": "free" }]
//! }));
//! let ctx = SurfaceContext::new(CartStore::default(), host, Arc::new(ShelfConfig::default()));
//!
//! let mut list = BrowseSurface::mount(SurfaceKind::List, ctx.clone());
//! list.dispatch(SurfaceEvent::OpenCompareDialog);
//! list.dispatch(SurfaceEvent::ToggleCompare(ProductId::new("a")));
//! list.dispatch(SurfaceEvent::ToggleCompare(ProductId::new("b")));
//! list.dispatch(SurfaceEvent::CommitCompare);
//!
//! // A compare widget mounted later, with no tool input of its own,
//! // picks the selection up from widget state.
//! ctx.host.set_tool_output(json!({}));
//! let compare = CompareSurface::mount(ctx);
//! assert!(compare.render().is_table());
//! ```

mod compare_view;
mod context;
pub mod render;
mod surfaces;

pub use compare_view::{
    CartAction, Cell, CompareInput, CompareRendering, CompareRow, CompareTable, CompareView,
    ImageRef, InputSource, RowKind, ROW_ORDER,
};
pub use context::{SurfaceContext, SurfaceKind};
pub use surfaces::{
    BrowseSurface, BrowseView, CompareDialogView, CompareSurface, DialogRow, EventResult,
    ProductRow, SurfaceEvent,
};
