//! Stepper adapter: runs the side effects a state transition asks for.
//!
//! [`StepProgressionState`] only changes state. This layer turns each
//! transition into [`StepCommand`]s, executes the storage ones itself and
//! hands the view ones back to the caller.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::catalog::{StepCatalog, StepId};
use super::state::{StepProgressionState, StepSnapshot, Transition};
use crate::error::StorageError;
use crate::store::SettingsStore;

/// Storage key holding the expanded step id (absent when none).
pub const EXPANDED_STEP_KEY: &str = "passport_guide.expanded_step";
/// Storage key holding the completed step ids as a JSON array.
pub const COMPLETED_STEPS_KEY: &str = "passport_guide.completed_steps";

/// A side effect requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepCommand {
    /// Keep the viewport where it was before the layout changed.
    RestoreScroll,
    /// Mirror the new state to the settings store.
    Persist(StepSnapshot),
}

/// Result of a stepper operation: the transition plus the view commands
/// left for the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepUpdate {
    pub transition: Transition,
    pub commands: Vec<StepCommand>,
}

impl StepUpdate {
    pub fn restore_scroll(&self) -> bool {
        self.commands.contains(&StepCommand::RestoreScroll)
    }
}

/// Which operation produced a transition; decides the commands it gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Toggle,
    Forced,
    Outside,
}

pub struct StepperSession {
    catalog: StepCatalog,
    state: StepProgressionState,
    store: Option<Arc<dyn SettingsStore>>,
}

impl StepperSession {
    /// A session that keeps its state in memory only.
    pub fn new(catalog: StepCatalog) -> Self {
        let state = StepProgressionState::new(catalog.len());
        Self {
            catalog,
            state,
            store: None,
        }
    }

    /// A session mirrored to `store`, rehydrated from it once here.
    pub async fn with_store(
        catalog: StepCatalog,
        store: Arc<dyn SettingsStore>,
    ) -> Result<Self, StorageError> {
        let snapshot = load_snapshot(store.as_ref()).await?;
        let state = StepProgressionState::restore(catalog.len(), &snapshot);
        info!(
            variant = %catalog.variant(),
            expanded = ?state.expanded_step(),
            completed = state.completed_steps().len(),
            "Stepper state restored"
        );
        Ok(Self {
            catalog,
            state,
            store: Some(store),
        })
    }

    pub fn catalog(&self) -> &StepCatalog {
        &self.catalog
    }

    pub fn state(&self) -> &StepProgressionState {
        &self.state
    }

    pub fn is_persistent(&self) -> bool {
        self.store.is_some()
    }

    pub fn is_expanded(&self, id: StepId) -> bool {
        self.state.is_expanded(id)
    }

    pub fn is_completed(&self, id: StepId) -> bool {
        self.state.is_completed(id)
    }

    pub async fn toggle(&mut self, id: StepId) -> StepUpdate {
        let transition = self.state.toggle(id);
        self.run(transition, Origin::Toggle).await
    }

    /// See [`StepProgressionState::force_expand`].
    pub async fn force_expand(&mut self, id: StepId) -> StepUpdate {
        let transition = self.state.force_expand(id);
        self.run(transition, Origin::Forced).await
    }

    /// Close the open step, as a click outside the stepper does.
    pub async fn collapse(&mut self) -> StepUpdate {
        let transition = self.state.collapse();
        self.run(transition, Origin::Outside).await
    }

    fn plan(&self, transition: Transition, origin: Origin) -> Vec<StepCommand> {
        let mut commands = Vec::new();
        if origin == Origin::Toggle && self.catalog.variant().preserves_scroll() {
            commands.push(StepCommand::RestoreScroll);
        }
        if transition.changed() && self.store.is_some() {
            commands.push(StepCommand::Persist(self.state.snapshot()));
        }
        commands
    }

    /// Execute the storage commands for a transition.
    ///
    /// The store only mirrors the in-memory state, so a failed write is
    /// logged and the transition still stands.
    async fn run(&self, transition: Transition, origin: Origin) -> StepUpdate {
        let mut remaining = Vec::new();
        for command in self.plan(transition, origin) {
            match command {
                StepCommand::Persist(snapshot) => {
                    if let Some(store) = &self.store
                        && let Err(e) = save_snapshot(store.as_ref(), &snapshot).await
                    {
                        warn!(?transition, error = %e, "Failed to persist stepper state");
                    }
                }
                other => remaining.push(other),
            }
        }
        StepUpdate {
            transition,
            commands: remaining,
        }
    }
}

async fn load_snapshot(store: &dyn SettingsStore) -> Result<StepSnapshot, StorageError> {
    let expanded_step = match store.get_setting(EXPANDED_STEP_KEY).await? {
        None | Some(serde_json::Value::Null) => None,
        Some(value) => match serde_json::from_value::<StepId>(value.clone()) {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(key = EXPANDED_STEP_KEY, %value, error = %e, "Ignoring malformed stored step");
                None
            }
        },
    };

    let completed_steps = match store.get_setting(COMPLETED_STEPS_KEY).await? {
        None => Vec::new(),
        Some(value) => serde_json::from_value::<Vec<StepId>>(value.clone()).unwrap_or_else(|e| {
            warn!(key = COMPLETED_STEPS_KEY, %value, error = %e, "Ignoring malformed stored steps");
            Vec::new()
        }),
    };

    Ok(StepSnapshot {
        expanded_step,
        completed_steps,
    })
}

async fn save_snapshot(
    store: &dyn SettingsStore,
    snapshot: &StepSnapshot,
) -> Result<(), StorageError> {
    match snapshot.expanded_step {
        Some(id) => {
            store
                .set_setting(EXPANDED_STEP_KEY, &serde_json::json!(id))
                .await?
        }
        None => {
            store.delete_setting(EXPANDED_STEP_KEY).await?;
        }
    }
    store
        .set_setting(
            COMPLETED_STEPS_KEY,
            &serde_json::json!(snapshot.completed_steps),
        )
        .await?;
    debug!(expanded = ?snapshot.expanded_step, "Stepper state persisted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::steps::StepperVariant;
    use crate::store::MemoryStore;
    use crate::store::failing::FailingStore;

    fn standard() -> StepCatalog {
        StepCatalog::for_variant(StepperVariant::Standard)
    }

    fn extended() -> StepCatalog {
        StepCatalog::for_variant(StepperVariant::Extended)
    }

    #[tokio::test]
    async fn standard_toggle_requests_scroll_restore() {
        let mut session = StepperSession::new(standard());
        let update = session.toggle(3).await;
        assert_eq!(update.transition, Transition::Expanded(3));
        assert!(update.restore_scroll());

        // Even an inert toggle keeps the viewport put.
        let update = session.toggle(42).await;
        assert_eq!(update.transition, Transition::Unchanged);
        assert!(update.restore_scroll());
    }

    #[tokio::test]
    async fn extended_toggle_does_not_touch_scroll() {
        let mut session = StepperSession::new(extended());
        let update = session.toggle(3).await;
        assert!(update.commands.is_empty());
    }

    #[tokio::test]
    async fn collapse_and_force_never_restore_scroll() {
        let mut session = StepperSession::new(standard());
        session.toggle(2).await;
        let update = session.collapse().await;
        assert_eq!(update.transition, Transition::Collapsed(2));
        assert!(!update.restore_scroll());
    }

    #[tokio::test]
    async fn persists_every_change() {
        let store = Arc::new(MemoryStore::new());
        let mut session = StepperSession::with_store(extended(), store.clone())
            .await
            .unwrap();
        assert!(session.is_persistent());

        session.toggle(4).await;
        assert_eq!(
            store.get_setting(EXPANDED_STEP_KEY).await.unwrap(),
            Some(json!(4))
        );
        assert_eq!(
            store.get_setting(COMPLETED_STEPS_KEY).await.unwrap(),
            Some(json!([1, 2, 3, 4]))
        );

        session.toggle(4).await;
        assert_eq!(store.get_setting(EXPANDED_STEP_KEY).await.unwrap(), None);
        assert_eq!(
            store.get_setting(COMPLETED_STEPS_KEY).await.unwrap(),
            Some(json!([1, 2, 3, 4]))
        );
    }

    #[tokio::test]
    async fn rehydrates_from_store() {
        let store = Arc::new(MemoryStore::new());
        store.set_setting(EXPANDED_STEP_KEY, &json!(6)).await.unwrap();
        store
            .set_setting(COMPLETED_STEPS_KEY, &json!([1, 2, 3, 4, 5, 6, 99]))
            .await
            .unwrap();

        let session = StepperSession::with_store(extended(), store).await.unwrap();
        assert!(session.is_expanded(6));
        assert!(session.is_completed(5));
        assert!(!session.is_completed(99));
    }

    #[tokio::test]
    async fn malformed_values_are_ignored() {
        let store = Arc::new(MemoryStore::new());
        store
            .set_setting(EXPANDED_STEP_KEY, &json!("three"))
            .await
            .unwrap();
        store
            .set_setting(COMPLETED_STEPS_KEY, &json!({"1": true}))
            .await
            .unwrap();

        let session = StepperSession::with_store(extended(), store).await.unwrap();
        assert_eq!(session.state().expanded_step(), None);
        assert!(session.state().completed_steps().is_empty());
    }

    #[tokio::test]
    async fn unchanged_transition_is_not_persisted() {
        let store = Arc::new(MemoryStore::new());
        let mut session = StepperSession::with_store(extended(), store.clone())
            .await
            .unwrap();
        session.collapse().await;
        assert_eq!(store.get_setting(COMPLETED_STEPS_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn failed_write_keeps_the_transition() {
        let mut session = StepperSession::with_store(extended(), Arc::new(FailingStore))
            .await
            .unwrap();

        let update = session.toggle(3).await;
        assert_eq!(update.transition, Transition::Expanded(3));
        assert!(session.is_expanded(3));
        assert!(session.is_completed(2));

        let update = session.collapse().await;
        assert_eq!(update.transition, Transition::Collapsed(3));
        assert_eq!(session.state().expanded_step(), None);

        let update = session.force_expand(10).await;
        assert_eq!(update.transition, Transition::Expanded(10));
    }
}
