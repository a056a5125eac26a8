//! Fee calculator for the "Calculate your fees" step.

pub mod calculator;
pub mod model;

pub use calculator::{FLAT_BASE_FEE, FeeBreakdown, FeeCalculator, FeeLine, FeeVariant};
pub use model::{AdditionalOption, FeeSelection, PassportType, ProcessingTime};
