//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::fees::FeeVariant;
use crate::steps::StepperVariant;

/// Default simulated "thinking" delay before the bot replies.
pub const DEFAULT_BOT_DELAY: Duration = Duration::from_millis(1000);

/// Default location of the libSQL settings database.
pub const DEFAULT_DB_PATH: &str = "./data/passport-guide.db";

/// Guide session configuration.
#[derive(Debug, Clone)]
pub struct GuideConfig {
    /// Which step layout the stepper shows.
    pub stepper_variant: StepperVariant,
    /// Which fee rule the calculator applies.
    pub fee_variant: FeeVariant,
    /// Delay before each bot reply lands in the transcript.
    pub bot_delay: Duration,
    /// Whether stepper state is mirrored to the settings store.
    pub persist: bool,
    /// Settings database path (`:memory:` keeps it in process).
    pub db_path: PathBuf,
}

impl Default for GuideConfig {
    fn default() -> Self {
        let stepper_variant = StepperVariant::default();
        Self {
            stepper_variant,
            fee_variant: FeeVariant::default(),
            bot_delay: DEFAULT_BOT_DELAY,
            persist: stepper_variant.persists_by_default(),
            db_path: PathBuf::from(DEFAULT_DB_PATH),
        }
    }
}

impl GuideConfig {
    /// Read configuration from `GUIDE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Unset keys fall back to defaults; set but unparseable keys are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let stepper_variant: StepperVariant = match lookup("GUIDE_STEPPER_VARIANT") {
            Some(raw) => raw.parse().map_err(|message| ConfigError::InvalidValue {
                key: "GUIDE_STEPPER_VARIANT".to_string(),
                message,
            })?,
            None => StepperVariant::default(),
        };

        let fee_variant: FeeVariant = match lookup("GUIDE_FEE_VARIANT") {
            Some(raw) => raw.parse().map_err(|message| ConfigError::InvalidValue {
                key: "GUIDE_FEE_VARIANT".to_string(),
                message,
            })?,
            None => FeeVariant::default(),
        };

        let bot_delay = match lookup("GUIDE_BOT_DELAY_MS") {
            Some(raw) => {
                let ms: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: "GUIDE_BOT_DELAY_MS".to_string(),
                    message: format!("expected milliseconds, got {raw:?}"),
                })?;
                Duration::from_millis(ms)
            }
            None => DEFAULT_BOT_DELAY,
        };

        let persist = match lookup("GUIDE_PERSIST") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| ConfigError::InvalidValue {
                key: "GUIDE_PERSIST".to_string(),
                message: format!("expected true/false, got {raw:?}"),
            })?,
            None => stepper_variant.persists_by_default(),
        };

        let db_path = lookup("GUIDE_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        Ok(Self {
            stepper_variant,
            fee_variant,
            bot_delay,
            persist,
            db_path,
        })
    }

    /// Whether the settings store should live in process only.
    pub fn in_memory_store(&self) -> bool {
        self.db_path.as_os_str() == ":memory:"
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
