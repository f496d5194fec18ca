//! Compare module.
//!
//! Bounded multi-select of products, the dialog state machine that owns
//! it, and the bridge that hands a committed selection to the separately
//! mounted compare widget.

mod bridge;
mod controller;
mod payload;
mod selection;

pub use bridge::{CompareBridge, CompareSlot, CompareWidgetState, COMPARE_STATE_KEY};
pub use controller::{Commit, CommitOutcome, CompareController, ControllerState, Transition};
pub use payload::SharedComparePayload;
pub use selection::{
    CompareSelection, RejectReason, ToggleOutcome, MAX_COMPARE_ITEMS, MIN_COMPARE_ITEMS,
};
