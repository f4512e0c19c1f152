//! Strategy families shared by the curve fitter and the target search.
//!
//! A strategy family decides two things at once: which response-curve family
//! is fitted (power-log for ratio targets, quadratic for monetary targets) and
//! which [`OptimizationConfig`](crate::optimization::target_search::OptimizationConfig)
//! bounds the target search.
use serde::{Deserialize, Serialize};

/// Bid target semantics of an advertising entity.
///
/// - `ReturnOnSpend`: target is a ratio of conversion value to spend.
/// - `CostPerAcquisition`: target is a monetary cost per conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategyFamily {
    ReturnOnSpend,
    CostPerAcquisition,
}
