//! Step progression: the accordion of guide steps.
//!
//! One step is open at a time. Opening a step marks it and every earlier
//! step as visited, and visits are never undone.

pub mod catalog;
pub mod session;
pub mod state;

pub use catalog::{Step, StepCatalog, StepId, StepKind, StepperVariant};
pub use session::{StepCommand, StepUpdate, StepperSession};
pub use state::{StepProgressionState, StepSnapshot, Transition};
