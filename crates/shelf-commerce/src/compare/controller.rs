//! Compare dialog state machine.

use shelf_observability::StructuredLogger;

use crate::catalog::CatalogSnapshot;
use crate::compare::{CompareSelection, RejectReason, SharedComparePayload, ToggleOutcome};
use crate::ids::ProductId;
use crate::CommerceError;

/// Controller states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerState {
    /// Dialog closed, no selection.
    Closed,
    /// Dialog open, selection being built.
    Selecting,
    /// A payload was just produced; the controller resets right after.
    Published,
}

impl ControllerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControllerState::Closed => "closed",
            ControllerState::Selecting => "selecting",
            ControllerState::Published => "published",
        }
    }
}

/// The last transition that changed something.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Opened,
    Toggled(ToggleOutcome),
    Published,
    Cancelled,
}

/// A successful commit.
#[derive(Debug, Clone, PartialEq)]
pub struct Commit {
    /// Products to compare, in selection order.
    pub payload: SharedComparePayload,
    /// Selected ids that no longer resolved and were left out.
    pub dropped: Vec<ProductId>,
}

/// Result of `commit`.
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    Committed(Commit),
    Rejected(RejectReason),
}

impl CommitOutcome {
    /// The payload, if the commit went through.
    pub fn payload(&self) -> Option<&SharedComparePayload> {
        match self {
            CommitOutcome::Committed(commit) => Some(&commit.payload),
            CommitOutcome::Rejected(_) => None,
        }
    }
}

/// Owns one compare selection and the dialog lifecycle around it.
///
/// Each mounted surface has its own controller. Transitions run
/// synchronously inside one event handler; invalid transitions are no-ops.
#[derive(Debug, Clone)]
pub struct CompareController {
    state: ControllerState,
    selection: CompareSelection,
    last_transition: Option<Transition>,
    publish_count: u64,
    logger: StructuredLogger,
}

impl Default for CompareController {
    fn default() -> Self {
        Self::new(StructuredLogger::detached())
    }
}

impl CompareController {
    pub fn new(logger: StructuredLogger) -> Self {
        Self {
            state: ControllerState::Closed,
            selection: CompareSelection::new(),
            last_transition: None,
            publish_count: 0,
            logger,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ControllerState::Selecting
    }

    pub fn selection(&self) -> &CompareSelection {
        &self.selection
    }

    pub fn last_transition(&self) -> Option<Transition> {
        self.last_transition
    }

    /// Number of payloads this controller has produced.
    pub fn publish_count(&self) -> u64 {
        self.publish_count
    }

    /// Open the dialog with an empty selection.
    ///
    /// Opening an already open dialog keeps its selection.
    pub fn open(&mut self) {
        if self.state == ControllerState::Selecting {
            return;
        }
        self.selection.clear();
        self.state = ControllerState::Selecting;
        self.last_transition = Some(Transition::Opened);
        self.logger.debug("compare dialog opened");
    }

    /// Toggle an id in the selection.
    pub fn toggle(&mut self, id: &ProductId) -> ToggleOutcome {
        let outcome = if self.state != ControllerState::Selecting {
            ToggleOutcome::Rejected(RejectReason::NotSelecting)
        } else {
            self.selection.toggle(id)
        };

        match outcome {
            ToggleOutcome::Rejected(reason) => {
                self.logger
                    .debug_builder("compare toggle rejected")
                    .field("product_id", id.to_string())
                    .field("reason", reason.as_str())
                    .emit();
            }
            _ => self.last_transition = Some(Transition::Toggled(outcome)),
        }
        outcome
    }

    /// Resolve the selection against `catalog` and produce a payload.
    ///
    /// Requires an open dialog with at least `MIN_COMPARE_ITEMS` ids.
    /// Ids missing from the catalog are left out of the payload. On
    /// success the controller is back to `Closed` with an empty selection.
    pub fn commit(&mut self, catalog: &CatalogSnapshot) -> CommitOutcome {
        if self.state != ControllerState::Selecting {
            return self.reject_commit(RejectReason::NotSelecting);
        }
        if !self.selection.can_commit() {
            return self.reject_commit(RejectReason::TooFewSelected);
        }

        let resolution = catalog.resolve(self.selection.ids());
        for id in &resolution.missing {
            let err = CommerceError::StaleReference(id.to_string());
            self.logger
                .warn_builder("compare id dropped")
                .field("reason", err.to_string())
                .emit();
        }

        self.state = ControllerState::Published;
        self.publish_count += 1;
        self.logger
            .info_builder("compare committed")
            .field_list("ids", resolution.products.iter().map(|p| p.id.to_string()))
            .emit();

        self.reset();
        self.last_transition = Some(Transition::Published);

        CommitOutcome::Committed(Commit {
            payload: SharedComparePayload::new(resolution.products),
            dropped: resolution.missing,
        })
    }

    /// Close the dialog, discarding the selection.
    pub fn cancel(&mut self) {
        if self.state != ControllerState::Selecting {
            return;
        }
        self.reset();
        self.last_transition = Some(Transition::Cancelled);
        self.logger.debug("compare dialog cancelled");
    }

    fn reset(&mut self) {
        self.selection.clear();
        self.state = ControllerState::Closed;
    }

    fn reject_commit(&self, reason: RejectReason) -> CommitOutcome {
        self.logger
            .debug_builder("compare commit rejected")
            .field("reason", reason.as_str())
            .field("state", self.state.as_str())
            .emit();
        CommitOutcome::Rejected(reason)
    }
}
