//! optimization — curve fitting, target search, and the shared error surface.
//!
//! Purpose
//! -------
//! Provide the numerical core of the bid-target optimizer: fit a response
//! curve to a metric's simulation series, then search that curve for the
//! best target within the bounds of a strategy family. Both searches run on
//! Argmin's `Executor`; callers only see validated options, fitted models and
//! a single error/result surface.
//!
//! Key behaviors
//! -------------
//! - `curve_fit`: Nelder–Mead RMSE minimization over the power-log and
//!   quadratic families, R² scoring, predictions and analytic derivatives.
//! - `target_search`: bounded sign-gradient ascent and the conservative
//!   suggestion rule.
//! - `strategy`: the two strategy families (return on spend, cost per
//!   acquisition) that select curve family and search bounds.
//! - `errors`: `OptError` / `OptResult<T>`, including conversions from
//!   Argmin backend errors.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are validated at construction (`CurveData`, `FitOptions`,
//!   `OptimizationConfig`); invalid states are reported as `OptError`, not
//!   panics.
//! - Everything here is deterministic: no randomness, no shared state.
//!
//! Conventions
//! -----------
//! - The fit minimizes RMSE directly; the target search maximizes the curve by
//!   minimizing `-y(x)` as the Argmin cost.
//! - Logging goes through `tracing` at `debug` for progress and `warn` for
//!   recoverable numerical trouble.
//!
//! Downstream usage
//! ----------------
//! - The `suggestion` layer builds one `CurveFitter` per metric, one
//!   `TargetAnalyzer` per entity, and maps `OptError` values to per-cell
//!   "unavailable" markers.

pub mod curve_fit;
pub mod errors;
pub mod strategy;
pub mod target_search;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use bid_target_optimizer::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::curve_fit::prelude::*;
    pub use super::errors::{OptError, OptResult};
    pub use super::strategy::StrategyFamily;
    pub use super::target_search::prelude::*;
}
