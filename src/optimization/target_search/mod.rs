//! target_search — bounded search for the best bid target on a fitted curve.
//!
//! Purpose
//! -------
//! Given a [`CurveModel`](crate::optimization::curve_fit::CurveModel) for the
//! primary optimization metric, find the target that locally maximizes it
//! inside the strategy family's bounds, and derive a conservative next target
//! from the current one.
//!
//! Key behaviors
//! -------------
//! - [`SignGradientAscent`] is an Argmin `Solver` stepping along the sign of
//!   the analytic derivative, clamped to `[min_target, max_target]`, with the
//!   step cut ×0.1 on each reversal.
//! - [`TargetAnalyzer`] wires the solver to the model through
//!   [`adapter::CurveAdapter`] and turns the result into a suggestion.
//! - [`OptimizationConfig`] carries per-family bounds, start, step and
//!   iteration cap; [`OptimizationConfigs`] bundles one per family.
//!
//! Invariants & assumptions
//! ------------------------
//! - Optimal targets always lie in the family's `[min_target, max_target]`.
//! - Suggested targets always lie in `[0.1, max_target]` and move at most 5%
//!   of the way toward the optimum.
//! - Running out of iterations is not an error; the best target visited is
//!   returned and a warning is logged.
//!
//! Testing notes
//! -------------
//! - Analyzer tests use hand-built models with known maxima (quadratic vertex,
//!   power-log mode at `exp(-b / 2c)`) and monotone curves that pin the
//!   search to a bound.

pub mod adapter;
pub mod analyzer;
pub mod ascent;
pub mod config;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::analyzer::{SearchOutcome, TargetAnalyzer};
pub use self::ascent::SignGradientAscent;
pub use self::config::{OptimizationConfig, OptimizationConfigs};

pub mod prelude {
    pub use super::analyzer::TargetAnalyzer;
    pub use super::config::{OptimizationConfig, OptimizationConfigs};
}
