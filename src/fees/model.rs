//! Fee options and the user's current selection.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How fast the application is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingTime {
    Standard,
    Expedited,
    Emergency,
}

impl ProcessingTime {
    pub const ALL: [ProcessingTime; 3] = [Self::Standard, Self::Expedited, Self::Emergency];

    pub fn surcharge(&self) -> u32 {
        match self {
            Self::Standard | Self::Expedited => 0,
            Self::Emergency => 335,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Standard => "10 to 20 business days or more",
            Self::Expedited => "2 to 9 business days",
            Self::Emergency => "By the end of the next business day (Emergencies only)",
        }
    }
}

impl FromStr for ProcessingTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "expedited" => Ok(Self::Expedited),
            "emergency" => Ok(Self::Emergency),
            other => Err(format!("unknown processing time {other:?}")),
        }
    }
}

/// Adult passport validity period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassportType {
    #[serde(rename = "5-year")]
    FiveYear,
    #[serde(rename = "10-year")]
    TenYear,
}

impl PassportType {
    pub const ALL: [PassportType; 2] = [Self::FiveYear, Self::TenYear];

    pub fn base_fee(&self) -> u32 {
        match self {
            Self::FiveYear => 120,
            Self::TenYear => 160,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FiveYear => "5-year adult passport (age 16 or over)",
            Self::TenYear => "10-year adult passport (age 16 or over)",
        }
    }
}

impl FromStr for PassportType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "5" | "5-year" | "five" => Ok(Self::FiveYear),
            "10" | "10-year" | "ten" => Ok(Self::TenYear),
            other => Err(format!("unknown passport type {other:?}")),
        }
    }
}

/// Extra services, any number of which may be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdditionalOption {
    ExpressPickup,
    FileTransfer,
    LostStolenReplacement,
}

impl AdditionalOption {
    pub const ALL: [AdditionalOption; 3] = [
        Self::ExpressPickup,
        Self::FileTransfer,
        Self::LostStolenReplacement,
    ];

    pub fn fee(&self) -> u32 {
        match self {
            Self::ExpressPickup => 50,
            Self::FileTransfer | Self::LostStolenReplacement => 45,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ExpressPickup => "Express pickup (within 2 to 9 business days)",
            Self::FileTransfer => "File transfer (to a different passport office in Canada)",
            Self::LostStolenReplacement => "Replacing a lost or stolen passport",
        }
    }
}

impl fmt::Display for AdditionalOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AdditionalOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pickup" | "express_pickup" => Ok(Self::ExpressPickup),
            "transfer" | "file_transfer" => Ok(Self::FileTransfer),
            "replacement" | "lost" | "lost_stolen_replacement" => Ok(Self::LostStolenReplacement),
            other => Err(format!("unknown additional option {other:?}")),
        }
    }
}

/// The three independent fee selections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSelection {
    pub processing_time: Option<ProcessingTime>,
    pub passport_type: Option<PassportType>,
    pub additional_options: BTreeSet<AdditionalOption>,
}

impl FeeSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_processing_time(mut self, time: ProcessingTime) -> Self {
        self.processing_time = Some(time);
        self
    }

    pub fn with_passport_type(mut self, passport_type: PassportType) -> Self {
        self.passport_type = Some(passport_type);
        self
    }

    pub fn with_option(mut self, option: AdditionalOption) -> Self {
        self.additional_options.insert(option);
        self
    }

    /// Check or uncheck an additional option.
    pub fn set_option(&mut self, option: AdditionalOption, checked: bool) {
        if checked {
            self.additional_options.insert(option);
        } else {
            self.additional_options.remove(&option);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_constants() {
        assert_eq!(ProcessingTime::Standard.surcharge(), 0);
        assert_eq!(ProcessingTime::Expedited.surcharge(), 0);
        assert_eq!(ProcessingTime::Emergency.surcharge(), 335);
        assert_eq!(PassportType::FiveYear.base_fee(), 120);
        assert_eq!(PassportType::TenYear.base_fee(), 160);
        assert_eq!(AdditionalOption::ExpressPickup.fee(), 50);
        assert_eq!(AdditionalOption::FileTransfer.fee(), 45);
        assert_eq!(AdditionalOption::LostStolenReplacement.fee(), 45);
    }

    #[test]
    fn set_option_checks_and_unchecks() {
        let mut selection = FeeSelection::new();
        selection.set_option(AdditionalOption::FileTransfer, true);
        selection.set_option(AdditionalOption::FileTransfer, true);
        assert_eq!(selection.additional_options.len(), 1);
        selection.set_option(AdditionalOption::FileTransfer, false);
        assert!(selection.additional_options.is_empty());
        // Unchecking an unselected option is harmless.
        selection.set_option(AdditionalOption::ExpressPickup, false);
        assert!(selection.additional_options.is_empty());
    }

    #[test]
    fn parses_short_names() {
        assert_eq!("Emergency".parse::<ProcessingTime>().unwrap(), ProcessingTime::Emergency);
        assert_eq!("10".parse::<PassportType>().unwrap(), PassportType::TenYear);
        assert_eq!("5-year".parse::<PassportType>().unwrap(), PassportType::FiveYear);
        assert_eq!(
            "lost".parse::<AdditionalOption>().unwrap(),
            AdditionalOption::LostStolenReplacement
        );
        assert!("overnight".parse::<ProcessingTime>().is_err());
    }

    #[test]
    fn passport_type_serde_names() {
        assert_eq!(serde_json::to_string(&PassportType::FiveYear).unwrap(), "\"5-year\"");
        assert_eq!(serde_json::to_string(&PassportType::TenYear).unwrap(), "\"10-year\"");
    }
}
