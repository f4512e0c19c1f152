//! Response-curve families and their closed-form derivatives.
//!
//! Purpose
//! -------
//! Describe the two three-parameter families the fitter can estimate and
//! evaluate them (value and first derivative) for a given `(a, b, c)`.
//!
//! Key behaviors
//! -------------
//! - `PowerLog`: `y = exp(a + b·ln x + c·ln² x)`, defined for `x > 0`, always
//!   strictly positive where finite.
//! - `Quadratic`: `y = a·x² + b·x + c`, defined on all of ℝ.
//! - Derivatives are analytic: for power-log the chain rule on the log-exp
//!   composition gives `y(x)·(b/x + 2c·ln x / x)`; for the quadratic `2a·x + b`.
//!
//! Invariants & assumptions
//! ------------------------
//! - The raw evaluators in this module do not validate the target; domain and
//!   finiteness checks live in [`CurveModel`](super::model::CurveModel) and in
//!   the RMSE adapter.
use serde::{Deserialize, Serialize};

use crate::optimization::{
    errors::{OptError, OptResult},
    curve_fit::types::{N_PARAMS, Theta},
    strategy::StrategyFamily,
};

/// Initial guess for the power-log family.
pub const POWER_LOG_INITIAL_PARAMS: [f64; N_PARAMS] = [-2.0, 2.0, -0.5];

/// Initial guess for the quadratic family.
pub const QUADRATIC_INITIAL_PARAMS: [f64; N_PARAMS] = [0.1, 1.0, 25.0];

/// Parametric response-curve family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CurveFamily {
    PowerLog,
    Quadratic,
}

impl CurveFamily {
    /// Family fitted for entities of the given strategy family.
    pub fn for_strategy(strategy: StrategyFamily) -> Self {
        match strategy {
            StrategyFamily::ReturnOnSpend => CurveFamily::PowerLog,
            StrategyFamily::CostPerAcquisition => CurveFamily::Quadratic,
        }
    }

    /// Built-in starting point for the simplex search.
    pub fn default_initial_params(self) -> [f64; N_PARAMS] {
        match self {
            CurveFamily::PowerLog => POWER_LOG_INITIAL_PARAMS,
            CurveFamily::Quadratic => QUADRATIC_INITIAL_PARAMS,
        }
    }

    /// Whether `target` lies in the family's domain.
    pub fn accepts_target(self, target: f64) -> bool {
        match self {
            CurveFamily::PowerLog => target > 0.0,
            CurveFamily::Quadratic => target.is_finite(),
        }
    }

    /// Evaluate `y(x)` without domain checks.
    pub fn evaluate(self, params: &CurveParams, x: f64) -> f64 {
        let CurveParams { a, b, c } = *params;
        match self {
            CurveFamily::PowerLog => {
                let ln_x = x.ln();
                (a + b * ln_x + c * ln_x * ln_x).exp()
            }
            CurveFamily::Quadratic => a * x * x + b * x + c,
        }
    }

    /// Evaluate `dy/dx` without domain checks.
    pub fn derivative(self, params: &CurveParams, x: f64) -> f64 {
        let CurveParams { b, c, .. } = *params;
        match self {
            CurveFamily::PowerLog => {
                let y = self.evaluate(params, x);
                y * (b / x + 2.0 * c * x.ln() / x)
            }
            CurveFamily::Quadratic => 2.0 * params.a * x + b,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CurveFamily::PowerLog => "power-log",
            CurveFamily::Quadratic => "quadratic",
        }
    }
}

/// Fitted coefficients `(a, b, c)` of a response curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveParams {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl CurveParams {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Build validated parameters from a solver vector.
    ///
    /// # Errors
    /// - [`OptError::ParamLengthMismatch`] if `theta.len() != 3`.
    /// - [`OptError::InvalidParam`] for the first non-finite coordinate.
    pub fn from_theta(theta: &Theta) -> OptResult<Self> {
        if theta.len() != N_PARAMS {
            return Err(OptError::ParamLengthMismatch { expected: N_PARAMS, actual: theta.len() });
        }
        for (index, &value) in theta.iter().enumerate() {
            if !value.is_finite() {
                return Err(OptError::InvalidParam { index, value });
            }
        }
        Ok(Self { a: theta[0], b: theta[1], c: theta[2] })
    }

    pub fn to_theta(self) -> Theta {
        Theta::from(vec![self.a, self.b, self.c])
    }

    pub fn as_array(self) -> [f64; N_PARAMS] {
        [self.a, self.b, self.c]
    }
}

impl From<[f64; N_PARAMS]> for CurveParams {
    fn from(p: [f64; N_PARAMS]) -> Self {
        Self { a: p[0], b: p[1], c: p[2] }
    }
}
