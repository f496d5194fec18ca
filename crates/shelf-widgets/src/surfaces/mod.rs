//! Mounted surfaces.

mod browse;
mod compare;

pub use browse::{BrowseSurface, BrowseView, CompareDialogView, DialogRow, ProductRow};
pub use compare::CompareSurface;

use shelf_commerce::compare::{RejectReason, ToggleOutcome};
use shelf_commerce::{AddOutcome, ProductId};

/// User interactions a browsing surface reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    OpenCompareDialog,
    ToggleCompare(ProductId),
    CommitCompare,
    CancelCompare,
    /// Close the in-place compare table.
    CloseCompareTable,
    AddToCart(ProductId),
    /// List only; other surfaces ignore it.
    AddAllToCart,
    /// Focus a product's detail panel.
    SelectProduct(ProductId),
    CloseDetails,
}

/// What handling an event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// The event was not applicable; nothing changed.
    Unchanged,
    Changed,
    Toggled(ToggleOutcome),
    Committed {
        items: usize,
        dropped: Vec<ProductId>,
        /// False when writing widget state failed; the in-place table
        /// still shows the selection.
        published: bool,
    },
    Rejected(RejectReason),
    Cart(AddOutcome),
    AddedAll(usize),
}

impl EventResult {
    /// Whether the surface should redraw.
    pub fn changed(&self) -> bool {
        match self {
            EventResult::Unchanged | EventResult::Rejected(_) => false,
            EventResult::Toggled(outcome) => !matches!(outcome, ToggleOutcome::Rejected(_)),
            EventResult::Cart(outcome) => outcome.is_added(),
            EventResult::AddedAll(n) => *n > 0,
            EventResult::Changed | EventResult::Committed { .. } => true,
        }
    }
}
