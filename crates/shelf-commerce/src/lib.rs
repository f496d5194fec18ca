//! Catalog, cart and compare-selection logic for shelf surfaces.
//!
//! Three independently mounted widgets (carousel, list, compare table)
//! browse one catalog. They agree on two things:
//!
//! - **Cart**: one [`CartStore`] per process, shared by every surface.
//!   Adding is idempotent and there is no removal.
//! - **Compare**: each browsing surface owns a [`CompareController`]
//!   holding at most three ids. Committing resolves them against the
//!   catalog and publishes the products through a [`CompareBridge`].
//!
//! # Example
//!
//! ```rust
//! use shelf_commerce::prelude::*;
//! use shelf_observability::StructuredLogger;
//! use shelf_state::InMemoryHost;
//!
//! let catalog = CatalogSnapshot::from_products(vec![
//!     Product::new("a").with_name("Trapano"),
//!     Product::new("b").with_name("Avvitatore"),
//! ]);
//!
//! let mut controller = CompareController::default();
//! controller.open();
//! controller.toggle(&ProductId::new("a"));
//! controller.toggle(&ProductId::new("b"));
//!
//! let host = InMemoryHost::new();
//! let bridge = CompareBridge::new(host, StructuredLogger::detached());
//! if let CommitOutcome::Committed(commit) = controller.commit(&catalog) {
//!     bridge.publish(&commit.payload).unwrap();
//! }
//! assert_eq!(bridge.read().unwrap().len(), 2);
//! ```

pub mod error;
pub mod ids;
pub mod format;
pub mod config;

pub mod catalog;
pub mod cart;
pub mod compare;

pub use error::{CommerceError, ErrorKind};
pub use ids::ProductId;

pub use cart::{AddOutcome, CartEntry, CartStore};
pub use catalog::{CatalogSnapshot, Price, Product};
pub use compare::{CompareBridge, CompareController, SharedComparePayload};
pub use config::{ImageSettings, Labels, ShelfConfig};
pub use format::{FormatSettings, Formatter};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CommerceError, ErrorKind};
    pub use crate::ids::ProductId;

    // Catalog
    pub use crate::catalog::{CatalogSnapshot, LoadReport, Price, Product, Resolution};

    // Cart
    pub use crate::cart::{AddOutcome, CartEntry, CartStore};

    // Compare
    pub use crate::compare::{
        Commit, CommitOutcome, CompareBridge, CompareController, CompareSelection,
        ControllerState, RejectReason, SharedComparePayload, ToggleOutcome, Transition,
        COMPARE_STATE_KEY, MAX_COMPARE_ITEMS, MIN_COMPARE_ITEMS,
    };

    // Presentation
    pub use crate::config::{ImageSettings, Labels, ShelfConfig};
    pub use crate::format::{FormatSettings, Formatter};
}
