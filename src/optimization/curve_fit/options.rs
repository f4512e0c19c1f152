//! Curve-fit options — simplex settings and acceptance gates.
//!
//! Purpose
//! -------
//! Collect every knob of a curve fit in one validated value: the Nelder–Mead
//! iteration cap and loss-spread tolerance, the relative perturbation used to
//! build the initial simplex, how many restarts to attempt, the per-family
//! initial guesses, and the thresholds deciding whether a fitted curve is
//! usable downstream.
//!
//! Invariants & assumptions
//! ------------------------
//! - `max_iter > 0`, `tolerance` and `perturbation` finite and `> 0`.
//! - `min_points >= 3` (three free parameters).
//! - `min_r_squared ∈ [0, 1)`; a curve is acceptable only if its R² is
//!   strictly greater.
use crate::optimization::{
    errors::{OptError, OptResult},
    curve_fit::{
        family::{CurveFamily, CurveParams},
        types::N_PARAMS,
        validation::{verify_max_iter, verify_perturbation, verify_tolerance},
    },
};

pub const DEFAULT_MAX_ITER: usize = 1000;
pub const DEFAULT_TOLERANCE: f64 = 1e-6;
pub const DEFAULT_PERTURBATION: f64 = 0.05;
pub const DEFAULT_RESTARTS: usize = 5;
pub const DEFAULT_MIN_POINTS: usize = 3;
pub const DEFAULT_MIN_R_SQUARED: f64 = 0.8;

/// FitOptions — configuration for one curve fit.
///
/// Fields
/// ------
/// - `max_iter`: Nelder–Mead iteration cap per run (default 1000).
/// - `tolerance`: stop once the spread of simplex losses is below this
///   (default 1e-6).
/// - `perturbation`: relative step applied to each coordinate of the initial
///   guess to build the simplex (default 0.05, i.e. +5%).
/// - `restarts`: additional runs started from the previous best vertex while
///   the loss still improves (default 5; 0 gives a single run).
/// - `min_points`: smallest usable series (default 3).
/// - `min_r_squared`: acceptance threshold, exclusive (default 0.8).
/// - `power_log_initial` / `quadratic_initial`: initial guesses per family.
#[derive(Debug, Clone, PartialEq)]
pub struct FitOptions {
    pub max_iter: usize,
    pub tolerance: f64,
    pub perturbation: f64,
    pub restarts: usize,
    pub min_points: usize,
    pub min_r_squared: f64,
    pub power_log_initial: CurveParams,
    pub quadratic_initial: CurveParams,
}

impl FitOptions {
    /// Construct validated fit options with the built-in initial guesses.
    ///
    /// # Errors
    /// - [`OptError::InvalidMaxIter`], [`OptError::InvalidTolerance`],
    ///   [`OptError::InvalidPerturbation`] for unusable solver settings.
    /// - [`OptError::InvalidMinPoints`] if `min_points < 3`.
    /// - [`OptError::InvalidRSquaredThreshold`] if `min_r_squared ∉ [0, 1)`.
    pub fn new(
        max_iter: usize, tolerance: f64, perturbation: f64, restarts: usize, min_points: usize,
        min_r_squared: f64,
    ) -> OptResult<Self> {
        verify_max_iter(max_iter)?;
        verify_tolerance(tolerance)?;
        verify_perturbation(perturbation)?;
        if min_points < N_PARAMS {
            return Err(OptError::InvalidMinPoints { min_points });
        }
        if !(0.0..1.0).contains(&min_r_squared) {
            return Err(OptError::InvalidRSquaredThreshold { value: min_r_squared });
        }
        Ok(Self {
            max_iter,
            tolerance,
            perturbation,
            restarts,
            min_points,
            min_r_squared,
            power_log_initial: CurveFamily::PowerLog.default_initial_params().into(),
            quadratic_initial: CurveFamily::Quadratic.default_initial_params().into(),
        })
    }

    /// Replace the initial guess used for `family`.
    ///
    /// # Errors
    /// Returns [`OptError::InvalidParam`] for the first non-finite coordinate.
    pub fn with_initial_params(
        mut self, family: CurveFamily, params: CurveParams,
    ) -> OptResult<Self> {
        for (index, value) in params.as_array().into_iter().enumerate() {
            if !value.is_finite() {
                return Err(OptError::InvalidParam { index, value });
            }
        }
        match family {
            CurveFamily::PowerLog => self.power_log_initial = params,
            CurveFamily::Quadratic => self.quadratic_initial = params,
        }
        Ok(self)
    }

    pub fn initial_params_for(&self, family: CurveFamily) -> CurveParams {
        match family {
            CurveFamily::PowerLog => self.power_log_initial,
            CurveFamily::Quadratic => self.quadratic_initial,
        }
    }
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            max_iter: DEFAULT_MAX_ITER,
            tolerance: DEFAULT_TOLERANCE,
            perturbation: DEFAULT_PERTURBATION,
            restarts: DEFAULT_RESTARTS,
            min_points: DEFAULT_MIN_POINTS,
            min_r_squared: DEFAULT_MIN_R_SQUARED,
            power_log_initial: CurveFamily::PowerLog.default_initial_params().into(),
            quadratic_initial: CurveFamily::Quadratic.default_initial_params().into(),
        }
    }
}
