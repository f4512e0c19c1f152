//! curve_fit — derivative-free response-curve fitting.
//!
//! Purpose
//! -------
//! Fit one of two three-parameter response-curve families to a metric's
//! `(target, value)` series by minimizing RMSE with Argmin's Nelder–Mead
//! simplex solver, and expose predictions, analytic derivatives and a
//! goodness-of-fit score for the result.
//!
//! Key behaviors
//! -------------
//! - [`CurveData`] holds a validated series and applies the positivity shift
//!   (`offset = -min + 1` when any value is negative).
//! - [`CurveFitter::fit`] builds a 4-vertex simplex from the initial guess
//!   (+5% per coordinate), runs the solver via [`run::run_nelder_mead`] and
//!   optionally restarts from the best vertex.
//! - [`CurveModel`] is the immutable result: family, `(a, b, c)`, R², offset
//!   and diagnostics, with [`CurveModel::predict_value`] and
//!   [`CurveModel::calculate_gradient`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Series shorter than `FitOptions::min_points` are refused with
//!   `OptError::InsufficientData`; no model is produced.
//! - Power-log targets must be strictly positive, both when fitting and when
//!   predicting; violations surface as `OptError::NonPositiveTarget`.
//! - Fits are deterministic: the same data and options always produce the
//!   same model.
//!
//! Conventions
//! -----------
//! - Parameters are handled as [`Theta`] (`Array1<f64>`) inside the solver
//!   layer and as [`CurveParams`] everywhere else.
//! - Model outputs are in fitted (shifted) units unless a method says
//!   otherwise (`predict_original`).
//!
//! Testing notes
//! -------------
//! - Unit tests in the submodules cover family formulas and derivatives,
//!   the positivity shift, simplex construction, option validation, and
//!   noise-free recovery of generating coefficients.

pub mod adapter;
pub mod data;
pub mod family;
pub mod fitter;
pub mod model;
pub mod options;
pub mod run;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::data::CurveData;
pub use self::family::{CurveFamily, CurveParams};
pub use self::fitter::CurveFitter;
pub use self::model::{CurveModel, FitDiagnostics};
pub use self::options::FitOptions;
pub use self::types::Theta;

pub mod prelude {
    pub use super::data::CurveData;
    pub use super::family::{CurveFamily, CurveParams};
    pub use super::fitter::CurveFitter;
    pub use super::model::CurveModel;
    pub use super::options::FitOptions;
}
