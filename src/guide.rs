//! Guide session: one user's stepper, fee selection and chat.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::chat::ChatSession;
use crate::config::GuideConfig;
use crate::error::Result;
use crate::fees::{AdditionalOption, FeeBreakdown, FeeCalculator, FeeSelection, PassportType, ProcessingTime};
use crate::steps::{Step, StepCatalog, StepId, StepKind, StepUpdate, StepperSession};
use crate::store::{LibSqlStore, MemoryStore, SettingsStore};

/// Step opened by a travel-details submit, regardless of layout.
///
/// Fixed at 10 in every layout; not looked up from the catalog.
pub const FORCED_STEP: StepId = 10;

/// One guide page session.
pub struct GuideSession {
    id: Uuid,
    stepper: StepperSession,
    calculator: FeeCalculator,
    selection: FeeSelection,
    chat: ChatSession,
    travel_details: Option<String>,
}

impl GuideSession {
    /// Build a session from config, opening the settings store if the
    /// stepper persists.
    pub async fn from_config(config: &GuideConfig) -> Result<Self> {
        let store: Option<Arc<dyn SettingsStore>> = if !config.persist {
            None
        } else if config.in_memory_store() {
            Some(Arc::new(MemoryStore::new()))
        } else {
            Some(Arc::new(LibSqlStore::new_local(&config.db_path).await?))
        };
        Self::with_store(config, store).await
    }

    /// Build a session against an explicit store (or none).
    pub async fn with_store(
        config: &GuideConfig,
        store: Option<Arc<dyn SettingsStore>>,
    ) -> Result<Self> {
        let catalog = StepCatalog::for_variant(config.stepper_variant);
        let stepper = match store {
            Some(store) => StepperSession::with_store(catalog, store).await?,
            None => StepperSession::new(catalog),
        };

        let session = Self {
            id: Uuid::new_v4(),
            stepper,
            calculator: FeeCalculator::new(config.fee_variant),
            selection: FeeSelection::new(),
            chat: ChatSession::new(config.bot_delay),
            travel_details: None,
        };
        info!(
            session_id = %session.id,
            stepper = %config.stepper_variant,
            fees = %config.fee_variant,
            persist = session.stepper.is_persistent(),
            "Guide session started"
        );
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn stepper(&self) -> &StepperSession {
        &self.stepper
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    pub fn chat_mut(&mut self) -> &mut ChatSession {
        &mut self.chat
    }

    // ── Steps ───────────────────────────────────────────────────────

    pub async fn toggle_step(&mut self, id: StepId) -> StepUpdate {
        self.stepper.toggle(id).await
    }

    pub async fn collapse_steps(&mut self) -> StepUpdate {
        self.stepper.collapse().await
    }

    /// Heading shown under a step title. The fee step shows the live estimate.
    pub fn step_subtitle(&self, step: &Step) -> Option<String> {
        match step.kind {
            StepKind::Fees => Some(format!("Estimated fee: ${}", self.total_fee())),
            _ => None,
        }
    }

    /// Submit the free-text travel details field.
    ///
    /// Non-blank text opens [`FORCED_STEP`] directly, outside the normal
    /// toggle rules. Returns `None` when the text is blank.
    pub async fn submit_travel_details(&mut self, text: &str) -> Option<StepUpdate> {
        if text.trim().is_empty() {
            return None;
        }
        self.travel_details = Some(text.to_string());
        if !self.stepper.catalog().contains(FORCED_STEP) {
            warn!(
                session_id = %self.id,
                step = FORCED_STEP,
                "Travel details submitted but this layout has no such step"
            );
        }
        Some(self.stepper.force_expand(FORCED_STEP).await)
    }

    pub fn travel_details(&self) -> Option<&str> {
        self.travel_details.as_deref()
    }

    pub fn travel_details_submitted(&self) -> bool {
        self.travel_details.is_some()
    }

    // ── Fees ────────────────────────────────────────────────────────

    pub fn fee_selection(&self) -> &FeeSelection {
        &self.selection
    }

    pub fn select_processing_time(&mut self, time: ProcessingTime) -> u32 {
        self.selection.processing_time = Some(time);
        self.total_fee()
    }

    pub fn select_passport_type(&mut self, passport_type: PassportType) -> u32 {
        self.selection.passport_type = Some(passport_type);
        self.total_fee()
    }

    pub fn set_additional_option(&mut self, option: AdditionalOption, checked: bool) -> u32 {
        self.selection.set_option(option, checked);
        self.total_fee()
    }

    pub fn total_fee(&self) -> u32 {
        self.calculator.compute_total(&self.selection)
    }

    pub fn fee_breakdown(&self) -> FeeBreakdown {
        self.calculator.breakdown(&self.selection)
    }

    /// Whether the emergency processing disclaimer is shown.
    pub fn shows_emergency_disclaimer(&self) -> bool {
        FeeCalculator::is_emergency(&self.selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::fees::FeeVariant;
    use crate::steps::{StepperVariant, Transition};

    fn config(variant: StepperVariant, persist: bool) -> GuideConfig {
        GuideConfig {
            stepper_variant: variant,
            persist,
            db_path: ":memory:".into(),
            ..GuideConfig::default()
        }
    }

    #[tokio::test]
    async fn travel_details_force_expands_step_ten() {
        let mut guide = GuideSession::from_config(&config(StepperVariant::Extended, false))
            .await
            .unwrap();
        guide.toggle_step(3).await;

        let update = guide
            .submit_travel_details("Lisbon, March 3")
            .await
            .unwrap();
        assert_eq!(update.transition, Transition::Expanded(FORCED_STEP));
        assert!(guide.stepper().is_expanded(10));
        assert!(!guide.stepper().is_completed(10));
        assert!(!guide.stepper().is_completed(4));
        assert_eq!(guide.travel_details(), Some("Lisbon, March 3"));
    }

    #[tokio::test]
    async fn blank_travel_details_do_nothing() {
        let mut guide = GuideSession::from_config(&config(StepperVariant::Extended, false))
            .await
            .unwrap();
        assert!(guide.submit_travel_details("  ").await.is_none());
        assert!(!guide.travel_details_submitted());
        assert_eq!(guide.stepper().state().expanded_step(), None);
    }

    #[tokio::test]
    async fn forced_step_is_inert_in_short_layout() {
        let mut guide = GuideSession::from_config(&config(StepperVariant::Standard, false))
            .await
            .unwrap();
        let update = guide.submit_travel_details("soon").await.unwrap();
        assert_eq!(update.transition, Transition::Unchanged);
        assert!(guide.travel_details_submitted());
    }

    #[tokio::test]
    async fn fee_subtitle_tracks_selection() {
        let mut guide = GuideSession::from_config(&config(StepperVariant::Standard, false))
            .await
            .unwrap();
        let fee_step = guide
            .stepper()
            .catalog()
            .find(StepKind::Fees)
            .unwrap()
            .clone();

        assert_eq!(guide.step_subtitle(&fee_step).unwrap(), "Estimated fee: $0");
        guide.select_passport_type(PassportType::TenYear);
        assert_eq!(guide.select_processing_time(ProcessingTime::Emergency), 495);
        assert!(guide.shows_emergency_disclaimer());
        assert_eq!(
            guide.set_additional_option(AdditionalOption::ExpressPickup, true),
            545
        );
        assert_eq!(guide.step_subtitle(&fee_step).unwrap(), "Estimated fee: $545");

        let first = guide.stepper().catalog().get(1).unwrap().clone();
        assert!(guide.step_subtitle(&first).is_none());
    }

    #[tokio::test]
    async fn flat_base_variant_from_config() {
        let config = GuideConfig {
            fee_variant: FeeVariant::FlatBase,
            ..config(StepperVariant::Standard, false)
        };
        let guide = GuideSession::from_config(&config).await.unwrap();
        assert_eq!(guide.total_fee(), 120);
        assert_eq!(guide.fee_breakdown().lines.len(), 2);
    }

    #[tokio::test]
    async fn persisted_state_survives_new_session() {
        let store: Arc<dyn SettingsStore> = Arc::new(MemoryStore::new());
        let cfg = config(StepperVariant::Extended, true);

        let mut first = GuideSession::with_store(&cfg, Some(Arc::clone(&store)))
            .await
            .unwrap();
        first.toggle_step(5).await;

        let second = GuideSession::with_store(&cfg, Some(store)).await.unwrap();
        assert_ne!(first.id(), second.id());
        assert!(second.stepper().is_expanded(5));
        assert!(second.stepper().is_completed(1));
    }

    #[tokio::test]
    async fn unopenable_store_is_a_storage_error() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();

        let cfg = GuideConfig {
            db_path: blocker.join("guide.db"),
            ..config(StepperVariant::Extended, true)
        };
        let err = GuideSession::from_config(&cfg).await.err().unwrap();
        assert!(matches!(
            err,
            crate::error::Error::Storage(StorageError::Connection(_))
        ));
    }
}
