//! Fee calculator: total and itemised summary for a [`FeeSelection`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::model::{FeeSelection, ProcessingTime};

/// Flat application fee charged on top of everything under [`FeeVariant::FlatBase`].
pub const FLAT_BASE_FEE: u32 = 120;

/// Which totalling rule to apply.
///
/// The two rules disagree on whether [`FLAT_BASE_FEE`] is always added on
/// top of the passport type's own base fee. Both are kept until the
/// product owners settle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeeVariant {
    /// Sum of the selected items only.
    #[default]
    SelectedOnly,
    /// Selected items plus an unconditional [`FLAT_BASE_FEE`].
    FlatBase,
}

impl fmt::Display for FeeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::SelectedOnly => "selected-only",
            Self::FlatBase => "flat-base",
        };
        write!(f, "{s}")
    }
}

impl FromStr for FeeVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "selected-only" => Ok(Self::SelectedOnly),
            "flat-base" => Ok(Self::FlatBase),
            other => Err(format!("unknown fee variant {other:?}")),
        }
    }
}

/// One row of the fee summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeLine {
    pub label: String,
    pub amount: u32,
}

/// Itemised fee summary. `lines` always sum to `total`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeBreakdown {
    pub lines: Vec<FeeLine>,
    pub total: u32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FeeCalculator {
    variant: FeeVariant,
}

impl FeeCalculator {
    pub fn new(variant: FeeVariant) -> Self {
        Self { variant }
    }

    pub fn variant(&self) -> FeeVariant {
        self.variant
    }

    /// Total fee for a selection. Missing selections contribute nothing.
    pub fn compute_total(&self, selection: &FeeSelection) -> u32 {
        let flat = match self.variant {
            FeeVariant::SelectedOnly => 0,
            FeeVariant::FlatBase => FLAT_BASE_FEE,
        };
        let passport = selection.passport_type.map_or(0, |t| t.base_fee());
        let processing = selection.processing_time.map_or(0, |t| t.surcharge());
        let options: u32 = selection.additional_options.iter().map(|o| o.fee()).sum();

        let total = flat + passport + processing + options;
        debug!(variant = %self.variant, total, "Fee total computed");
        total
    }

    /// Whether the emergency disclaimer should be shown.
    pub fn is_emergency(selection: &FeeSelection) -> bool {
        selection.processing_time == Some(ProcessingTime::Emergency)
    }

    /// The "Fee Calculation" summary.
    ///
    /// The passport fee row is always present (0 when no type is chosen);
    /// the processing row only when it adds something.
    pub fn breakdown(&self, selection: &FeeSelection) -> FeeBreakdown {
        let mut lines = Vec::new();

        if self.variant == FeeVariant::FlatBase {
            lines.push(FeeLine {
                label: "Application fee".to_string(),
                amount: FLAT_BASE_FEE,
            });
        }

        lines.push(FeeLine {
            label: "Passport fee".to_string(),
            amount: selection.passport_type.map_or(0, |t| t.base_fee()),
        });

        if let Some(time) = selection.processing_time
            && time.surcharge() > 0
        {
            lines.push(FeeLine {
                label: "Processing fee".to_string(),
                amount: time.surcharge(),
            });
        }

        for option in &selection.additional_options {
            lines.push(FeeLine {
                label: option.label().to_string(),
                amount: option.fee(),
            });
        }

        FeeBreakdown {
            total: self.compute_total(selection),
            lines,
        }
    }
}
