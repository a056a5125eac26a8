//! Step progression state: which step is open and which have been visited.
//!
//! Transitions here are pure state changes. Scrolling and persistence are
//! handled by [`super::session::StepperSession`] from the returned
//! [`Transition`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::catalog::StepId;

/// Outcome of a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The step is now the expanded one.
    Expanded(StepId),
    /// The step was expanded and is now closed.
    Collapsed(StepId),
    /// Nothing changed (unknown id, or nothing to close).
    Unchanged,
}

impl Transition {
    pub fn changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Serializable view of the stepper state, as mirrored to storage.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepSnapshot {
    pub expanded_step: Option<StepId>,
    pub completed_steps: Vec<StepId>,
}

/// Accordion state for a catalog of `step_count` steps.
///
/// At most one step is expanded. `completed_steps` only grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepProgressionState {
    step_count: u32,
    expanded_step: Option<StepId>,
    completed_steps: BTreeSet<StepId>,
}

impl StepProgressionState {
    pub fn new(step_count: u32) -> Self {
        Self {
            step_count,
            expanded_step: None,
            completed_steps: BTreeSet::new(),
        }
    }

    /// Rebuild state from a stored snapshot, dropping ids outside 1..=step_count.
    pub fn restore(step_count: u32, snapshot: &StepSnapshot) -> Self {
        let mut state = Self::new(step_count);

        match snapshot.expanded_step {
            Some(id) if state.in_range(id) => state.expanded_step = Some(id),
            Some(id) => warn!(step = id, step_count, "Dropping out-of-range expanded step"),
            None => {}
        }

        for &id in &snapshot.completed_steps {
            if state.in_range(id) {
                state.completed_steps.insert(id);
            } else {
                warn!(step = id, step_count, "Dropping out-of-range completed step");
            }
        }

        state
    }

    fn in_range(&self, id: StepId) -> bool {
        (1..=self.step_count).contains(&id)
    }

    /// Open `id`, or close it if it is already open.
    ///
    /// Opening a step marks it and every step before it as completed.
    /// Ids outside the catalog are ignored.
    pub fn toggle(&mut self, id: StepId) -> Transition {
        if !self.in_range(id) {
            debug!(step = id, step_count = self.step_count, "Ignoring toggle of unknown step");
            return Transition::Unchanged;
        }

        if self.expanded_step == Some(id) {
            self.expanded_step = None;
            debug!(step = id, "Step collapsed");
            return Transition::Collapsed(id);
        }

        self.expanded_step = Some(id);
        self.completed_steps.extend(1..=id);
        debug!(step = id, completed = self.completed_steps.len(), "Step expanded");
        Transition::Expanded(id)
    }

    /// Open `id` directly, skipping the completion bookkeeping of [`toggle`].
    ///
    /// Only the travel-details submit uses this. Ids outside the catalog are
    /// ignored.
    ///
    /// [`toggle`]: Self::toggle
    pub fn force_expand(&mut self, id: StepId) -> Transition {
        if !self.in_range(id) {
            warn!(step = id, step_count = self.step_count, "Forced expand of unknown step ignored");
            return Transition::Unchanged;
        }
        if self.expanded_step == Some(id) {
            return Transition::Unchanged;
        }
        self.expanded_step = Some(id);
        debug!(step = id, "Step force-expanded");
        Transition::Expanded(id)
    }

    /// Close whatever step is open (a click outside the stepper).
    pub fn collapse(&mut self) -> Transition {
        match self.expanded_step.take() {
            Some(id) => {
                debug!(step = id, "Step collapsed from outside");
                Transition::Collapsed(id)
            }
            None => Transition::Unchanged,
        }
    }

    pub fn is_expanded(&self, id: StepId) -> bool {
        self.expanded_step == Some(id)
    }

    pub fn is_completed(&self, id: StepId) -> bool {
        self.completed_steps.contains(&id)
    }

    pub fn expanded_step(&self) -> Option<StepId> {
        self.expanded_step
    }

    pub fn completed_steps(&self) -> &BTreeSet<StepId> {
        &self.completed_steps
    }

    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    pub fn snapshot(&self) -> StepSnapshot {
        StepSnapshot {
            expanded_step: self.expanded_step,
            completed_steps: self.completed_steps.iter().copied().collect(),
        }
    }
}
