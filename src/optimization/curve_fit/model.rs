//! curve_fit::model — an immutable fitted response curve.
//!
//! Purpose
//! -------
//! Represent the outcome of one curve fit: family, coefficients, goodness of
//! fit, the positivity offset of the data it was fitted on, and solver
//! diagnostics. Expose prediction and analytic derivative at arbitrary
//! targets with domain and finiteness checks.
//!
//! Key behaviors
//! -------------
//! - [`CurveModel::predict_value`] evaluates the curve in the fitted (shifted)
//!   units; [`CurveModel::predict_original`] subtracts the offset.
//! - [`CurveModel::calculate_gradient`] returns `dy/dx` in fitted units (the
//!   offset is a constant and does not change the slope).
//! - [`CurveModel::is_acceptable`] applies the R² gate; NaN never passes.
//!
//! Invariants & assumptions
//! ------------------------
//! - Instances are created once per (entity, metric) and never mutated.
//! - Power-log predictions are only defined for `target > 0`; other targets
//!   yield [`OptError::NonPositiveTarget`] rather than a silent clamp.
use serde::Serialize;

use crate::optimization::{
    errors::{OptError, OptResult},
    curve_fit::{
        data::CurveData,
        family::{CurveFamily, CurveParams},
    },
};

/// Solver bookkeeping attached to a fitted model.
///
/// - `rmse`: loss at the reported parameters (fitted units).
/// - `iterations`: simplex iterations summed over all runs.
/// - `restarts`: restarts actually performed after the first run.
/// - `converged`: whether the last run stopped on the loss-spread tolerance.
/// - `status`: termination status of the last run.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FitDiagnostics {
    pub rmse: f64,
    pub iterations: u64,
    pub restarts: usize,
    pub converged: bool,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveModel {
    family: CurveFamily,
    params: CurveParams,
    r_squared: f64,
    offset: f64,
    diagnostics: FitDiagnostics,
}

impl CurveModel {
    /// Assemble a model from known coefficients.
    ///
    /// Used by the fitter and by callers that already hold coefficients (for
    /// example to re-evaluate a curve computed elsewhere).
    pub fn from_parts(
        family: CurveFamily, params: CurveParams, r_squared: f64, offset: f64,
    ) -> Self {
        Self { family, params, r_squared, offset, diagnostics: FitDiagnostics::default() }
    }

    pub(crate) fn with_diagnostics(mut self, diagnostics: FitDiagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn family(&self) -> CurveFamily {
        self.family
    }

    pub fn params(&self) -> CurveParams {
        self.params
    }

    pub fn r_squared(&self) -> f64 {
        self.r_squared
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn diagnostics(&self) -> &FitDiagnostics {
        &self.diagnostics
    }

    /// R² gate: accepted only if R² is a number strictly above the threshold.
    pub fn is_acceptable(&self, min_r_squared: f64) -> bool {
        !self.r_squared.is_nan() && self.r_squared > min_r_squared
    }

    /// Evaluate the curve at `target` in fitted (shifted) units.
    ///
    /// # Errors
    /// - [`OptError::NonPositiveTarget`] outside the power-log domain.
    /// - [`OptError::NonFinitePrediction`] if evaluation overflows.
    pub fn predict_value(&self, target: f64) -> OptResult<f64> {
        self.check_domain(target)?;
        let value = self.family.evaluate(&self.params, target);
        if !value.is_finite() {
            return Err(OptError::NonFinitePrediction { target, value });
        }
        Ok(value)
    }

    /// Evaluate the curve at `target` and undo the positivity shift.
    pub fn predict_original(&self, target: f64) -> OptResult<f64> {
        Ok(self.predict_value(target)? - self.offset)
    }

    /// Analytic derivative `dy/dx` at `target`.
    ///
    /// # Errors
    /// - [`OptError::NonPositiveTarget`] outside the power-log domain.
    /// - [`OptError::NonFiniteGradient`] if evaluation overflows.
    pub fn calculate_gradient(&self, target: f64) -> OptResult<f64> {
        self.check_domain(target)?;
        let value = self.family.derivative(&self.params, target);
        if !value.is_finite() {
            return Err(OptError::NonFiniteGradient { target, value });
        }
        Ok(value)
    }

    fn check_domain(&self, target: f64) -> OptResult<()> {
        if !self.family.accepts_target(target) {
            return Err(OptError::NonPositiveTarget { target });
        }
        Ok(())
    }
}

/// Coefficient of determination of `params` on `data`.
///
/// `R² = 1 − SS_res / SS_tot`, with `SS_tot` taken around the mean of the
/// observed values. Returns `1.0` when every observed value is equal.
pub fn r_squared(family: CurveFamily, params: &CurveParams, data: &CurveData) -> f64 {
    let mean = data.mean_value();
    let (ss_res, ss_tot) = data.targets().iter().zip(data.values().iter()).fold(
        (0.0, 0.0),
        |(ss_res, ss_tot), (&x, &y)| {
            let residual = y - family.evaluate(params, x);
            let deviation = y - mean;
            (ss_res + residual * residual, ss_tot + deviation * deviation)
        },
    );
    if ss_tot == 0.0 {
        return 1.0;
    }
    1.0 - ss_res / ss_tot
}
