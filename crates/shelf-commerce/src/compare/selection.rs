//! Bounded, ordered, duplicate-free selection of product ids.

use crate::ids::ProductId;
use crate::CommerceError;

/// Most products that can be compared at once.
pub const MAX_COMPARE_ITEMS: usize = 3;

/// Fewest products that make a comparison.
pub const MIN_COMPARE_ITEMS: usize = 2;

/// Why a transition was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The id was blank.
    MissingId,
    /// The selection already holds `MAX_COMPARE_ITEMS` ids.
    SelectionFull,
    /// Commit with fewer than `MIN_COMPARE_ITEMS` ids.
    TooFewSelected,
    /// The dialog is not open.
    NotSelecting,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::MissingId => "missing_id",
            RejectReason::SelectionFull => "selection_full",
            RejectReason::TooFewSelected => "too_few_selected",
            RejectReason::NotSelecting => "not_selecting",
        }
    }

    /// The error this rejection stands for.
    pub fn to_error(&self, action: &str) -> CommerceError {
        match self {
            RejectReason::MissingId => CommerceError::InvalidEntry("missing product id".into()),
            RejectReason::SelectionFull => CommerceError::SelectionBounds(format!(
                "at most {} products can be compared",
                MAX_COMPARE_ITEMS
            )),
            RejectReason::TooFewSelected => CommerceError::SelectionBounds(format!(
                "at least {} products are needed to compare",
                MIN_COMPARE_ITEMS
            )),
            RejectReason::NotSelecting => CommerceError::InvalidTransition {
                action: action.to_string(),
                state: "closed".to_string(),
            },
        }
    }
}

/// Result of a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// Nothing changed.
    Rejected(RejectReason),
}

/// Ids chosen for comparison, in the order they were picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompareSelection {
    ids: Vec<ProductId>,
}

impl CompareSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `id` if selected, else append it if there is room.
    ///
    /// Removing keeps the relative order of the remaining ids. Adding to
    /// a full selection is refused without changing anything.
    pub fn toggle(&mut self, id: &ProductId) -> ToggleOutcome {
        if id.is_blank() {
            return ToggleOutcome::Rejected(RejectReason::MissingId);
        }
        if let Some(pos) = self.ids.iter().position(|selected| selected == id) {
            self.ids.remove(pos);
            return ToggleOutcome::Removed;
        }
        if self.is_full() {
            return ToggleOutcome::Rejected(RejectReason::SelectionFull);
        }
        self.ids.push(id.clone());
        ToggleOutcome::Added
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= MAX_COMPARE_ITEMS
    }

    /// Whether the selection is large enough to open a comparison.
    pub fn can_commit(&self) -> bool {
        self.ids.len() >= MIN_COMPARE_ITEMS
    }

    /// Whether the dialog row for `id` should be disabled.
    pub fn is_disabled(&self, id: &ProductId) -> bool {
        !self.contains(id) && self.is_full()
    }

    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
