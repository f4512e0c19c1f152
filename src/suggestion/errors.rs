//! Error and "unavailable" types of the suggestion layer.
//!
//! Two kinds of failure are kept apart here:
//! - [`SuggestionError`] is a caller mistake (unknown metric name, primary
//!   metric not tracked) and is returned as `Err` from configuration.
//! - [`Unavailable`] is a data-quality condition (too few points, poor fit,
//!   undefined prediction). It never aborts an entity; it is carried as the
//!   `Err` side of a result cell and only turned into marker text when a row
//!   is rendered.
use serde::Serialize;

use crate::{optimization::errors::OptError, suggestion::metrics::Metric};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionError {
    /// Metric name not found in the registry.
    InvalidMetricName { name: String },

    /// The primary optimization metric must be one of the tracked metrics.
    PrimaryMetricNotTracked { primary: Metric },

    /// A metric appears twice in the tracked list.
    DuplicateTrackedMetric { metric: Metric },
}

impl std::error::Error for SuggestionError {}

impl std::fmt::Display for SuggestionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuggestionError::InvalidMetricName { name } => {
                write!(f, "Invalid metric name: {name:?}")
            }
            SuggestionError::PrimaryMetricNotTracked { primary } => {
                write!(f, "Primary metric {primary} is not in the tracked metrics")
            }
            SuggestionError::DuplicateTrackedMetric { metric } => {
                write!(f, "Metric {metric} is tracked more than once")
            }
        }
    }
}

/// Why a target or metric cell has no numeric value.
///
/// Serialized with an internal `reason` tag, e.g.
/// `{"reason":"poorFit","rSquared":0.42}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Unavailable {
    /// The entity has fewer simulation points than a fit needs.
    NoSimulationPoints { points: usize, required: usize },

    /// The metric's series has fewer usable points than a fit needs.
    InsufficientData { points: usize, required: usize },

    /// The fitted curve did not pass the R² gate.
    PoorFit { r_squared: f64 },

    /// A target lies outside the curve family's domain.
    DomainViolation { target: f64 },

    /// The series or the solver failed for another reason.
    FitFailed { message: String },

    /// The target search on the primary curve failed.
    SearchFailed { message: String },

    /// The fitted curve cannot be evaluated at this target.
    PredictionUnavailable { target: f64 },

    /// The entity does not expose a current target.
    NoCurrentTarget,

    /// No accepted curve exists for the primary optimization metric.
    PrimaryMetricUnavailable { metric: Metric },
}

impl std::fmt::Display for Unavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unavailable::NoSimulationPoints { points, required } => {
                write!(f, "No simulation points: {points} available, {required} required")
            }
            Unavailable::InsufficientData { points, required } => {
                write!(f, "Insufficient data: {points} points, {required} required")
            }
            Unavailable::PoorFit { r_squared } => write!(f, "Poor fit: R² = {r_squared}"),
            Unavailable::DomainViolation { target } => {
                write!(f, "Target {target} is outside the curve domain")
            }
            Unavailable::FitFailed { message } => write!(f, "Fit failed: {message}"),
            Unavailable::SearchFailed { message } => write!(f, "Target search failed: {message}"),
            Unavailable::PredictionUnavailable { target } => {
                write!(f, "Prediction unavailable at target {target}")
            }
            Unavailable::NoCurrentTarget => write!(f, "No current target"),
            Unavailable::PrimaryMetricUnavailable { metric } => {
                write!(f, "No accepted curve for primary metric {metric}")
            }
        }
    }
}

impl From<OptError> for Unavailable {
    fn from(err: OptError) -> Self {
        match err {
            OptError::InsufficientData { points, required } => {
                Unavailable::InsufficientData { points, required }
            }
            OptError::NonPositiveTarget { target } => Unavailable::DomainViolation { target },
            OptError::NonFinitePrediction { target, .. }
            | OptError::NonFiniteGradient { target, .. } => {
                Unavailable::PredictionUnavailable { target }
            }
            other => Unavailable::FitFailed { message: other.to_string() },
        }
    }
}
