//! Adapter that exposes a curve-fitting problem as an `argmin` cost function.
//!
//! The cost of a parameter vector is the RMSE between the family's
//! predictions and the (shifted) observed values. Non-finite losses are
//! reported as `+∞` instead of an error so that the simplex simply ranks such
//! vertices last; the solver sorts vertices by loss and cannot order NaN.
use argmin::core::{CostFunction, Error};

use crate::optimization::curve_fit::{
    data::CurveData,
    family::{CurveFamily, CurveParams},
    types::{Loss, Theta},
};

/// Bridges a `(family, data)` pair to `argmin`'s `CostFunction`.
#[derive(Debug, Clone, Copy)]
pub struct RmseAdapter<'a> {
    pub family: CurveFamily,
    pub data: &'a CurveData,
}

impl<'a> RmseAdapter<'a> {
    pub fn new(family: CurveFamily, data: &'a CurveData) -> Self {
        Self { family, data }
    }

    /// Root-mean-squared error of `params` over the series.
    pub fn rmse(&self, params: &CurveParams) -> Loss {
        let n = self.data.len();
        if n == 0 {
            return 0.0;
        }
        let sse: f64 = self
            .data
            .targets()
            .iter()
            .zip(self.data.values().iter())
            .map(|(&x, &y)| {
                let residual = self.family.evaluate(params, x) - y;
                residual * residual
            })
            .sum();
        (sse / n as f64).sqrt()
    }
}

impl<'a> CostFunction for RmseAdapter<'a> {
    type Param = Theta;
    type Output = Loss;

    /// Evaluate the RMSE at `θ`.
    ///
    /// # Errors
    /// Propagates `OptError::ParamLengthMismatch` if `θ` is not 3-dimensional.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        if theta.iter().any(|v| !v.is_finite()) {
            return Ok(f64::INFINITY);
        }
        let params = CurveParams::from_theta(theta)?;
        let loss = self.rmse(&params);
        if loss.is_finite() { Ok(loss) } else { Ok(f64::INFINITY) }
    }
}
