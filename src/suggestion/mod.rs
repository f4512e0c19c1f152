//! suggestion — per-entity bid target suggestions from simulation points.
//!
//! Purpose
//! -------
//! Orchestrate the optimization core for advertising entities: read the
//! entity's strategy and current target, fit one response curve per tracked
//! metric, search the primary metric's curve for the optimal target, derive
//! a conservative suggested target and predict every metric at the current,
//! suggested and optimal targets.
//!
//! Key behaviors
//! -------------
//! - `entity`: campaigns, ad groups and portfolio strategies as a tagged
//!   union, simulation points, strategy types.
//! - `metrics`: metric registry (name parsing, derivation from points) and
//!   per-metric series.
//! - `options`: primary and tracked metrics plus fit and search settings.
//! - `orchestrator`: [`suggest_for_entity`] / [`suggest_for_entities`].
//! - `render`: fixed column layout with marker text for missing values.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every entity submitted yields exactly one [`SuggestionResult`].
//! - Data-quality problems are values ([`Unavailable`]); only configuration
//!   mistakes are errors ([`SuggestionError`]).
//!
//! Downstream usage
//! ----------------
//! - Callers fetch simulation points elsewhere, build `EntitySimulation`s
//!   (typically by deserializing provider JSON), call
//!   [`suggest_for_entities`] and pass each result through
//!   [`render::render_row`].

pub mod entity;
pub mod errors;
pub mod metrics;
pub mod options;
pub mod orchestrator;
pub mod render;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::entity::{BiddingEntity, BiddingStrategyType, EntitySimulation, SimulationPoint};
pub use self::errors::{SuggestionError, Unavailable};
pub use self::metrics::{Metric, MetricSeries};
pub use self::options::SuggestionOptions;
pub use self::orchestrator::{
    Cell, MetricPrediction, SuggestionResult, suggest_for_entities, suggest_for_entity,
};

pub mod prelude {
    pub use super::entity::{BiddingEntity, EntitySimulation, SimulationPoint};
    pub use super::errors::{SuggestionError, Unavailable};
    pub use super::metrics::Metric;
    pub use super::options::SuggestionOptions;
    pub use super::orchestrator::{SuggestionResult, suggest_for_entities, suggest_for_entity};
    pub use super::render::{column_headers, render_row};
}
