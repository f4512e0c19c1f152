//! Adapter that exposes a fitted curve as an `argmin` problem over targets.
//!
//! The search *maximizes* the curve, so the cost of a target is `-y(x)`.
//! Unlike the cost, the gradient is handed over unflipped: the ascent solver
//! steps along `+sign(dy/dx)` directly.
use argmin::core::{CostFunction, Error, Gradient};

use crate::optimization::curve_fit::CurveModel;

#[derive(Debug, Clone, Copy)]
pub struct CurveAdapter<'a> {
    pub model: &'a CurveModel,
}

impl<'a> CurveAdapter<'a> {
    pub fn new(model: &'a CurveModel) -> Self {
        Self { model }
    }
}

impl<'a> CostFunction for CurveAdapter<'a> {
    type Param = f64;
    type Output = f64;

    /// Evaluate `-y(target)`; targets the curve cannot be evaluated at rank
    /// last (`+∞`) so they are never reported as the best target.
    fn cost(&self, target: &Self::Param) -> Result<Self::Output, Error> {
        Ok(self.model.predict_value(*target).map(|y| -y).unwrap_or(f64::INFINITY))
    }
}

impl<'a> Gradient for CurveAdapter<'a> {
    type Param = f64;
    type Gradient = f64;

    /// Analytic `dy/dx` at `target`.
    ///
    /// # Errors
    /// Propagates domain and overflow errors from
    /// [`CurveModel::calculate_gradient`].
    fn gradient(&self, target: &Self::Param) -> Result<Self::Gradient, Error> {
        Ok(self.model.calculate_gradient(*target)?)
    }
}
