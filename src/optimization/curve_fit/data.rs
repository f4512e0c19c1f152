//! curve_fit::data — validated `(target, value)` series with positivity shift.
//!
//! Purpose
//! -------
//! Hold one metric's observations in the shape the fitter consumes, after
//! shifting values so they are all `≥ 1` whenever any of them is negative.
//!
//! Key behaviors
//! -------------
//! - [`CurveData::with_positivity_shift`] computes `offset = -min + 1` when
//!   the smallest value is negative (otherwise `offset = 0`) and adds it to
//!   every value.
//! - The offset travels with the data and is copied onto the fitted model so
//!   predictions can be reported in original units.
//!
//! Invariants & assumptions
//! ------------------------
//! - `targets.len() == values.len()` and every entry is finite.
//! - `offset >= 0`.
//! - Emptiness and "too few points" are *not* rejected here; the fitter
//!   decides whether a series is usable.
use ndarray::Array1;

use crate::optimization::errors::{OptError, OptResult};

#[derive(Debug, Clone, PartialEq)]
pub struct CurveData {
    targets: Array1<f64>,
    values: Array1<f64>,
    offset: f64,
}

impl CurveData {
    /// Build a series from raw observations, shifting values into `[1, ∞)`
    /// when any of them is negative.
    ///
    /// # Errors
    /// - [`OptError::SeriesLengthMismatch`] if the slices differ in length.
    /// - [`OptError::NonFiniteData`] for the first non-finite target or value
    ///   (indices of values are reported after the targets).
    pub fn with_positivity_shift(targets: &[f64], values: &[f64]) -> OptResult<Self> {
        if targets.len() != values.len() {
            return Err(OptError::SeriesLengthMismatch {
                targets: targets.len(),
                values: values.len(),
            });
        }
        for (index, &value) in targets.iter().chain(values.iter()).enumerate() {
            if !value.is_finite() {
                return Err(OptError::NonFiniteData { index, value });
            }
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let offset = if min < 0.0 { -min + 1.0 } else { 0.0 };
        let values = Array1::from_iter(values.iter().map(|v| v + offset));

        Ok(Self { targets: Array1::from(targets.to_vec()), values, offset })
    }

    pub fn targets(&self) -> &Array1<f64> {
        &self.targets
    }

    /// Shifted values; subtract [`CurveData::offset`] to recover the inputs.
    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Mean of the shifted values.
    pub fn mean_value(&self) -> f64 {
        self.values.mean().unwrap_or(0.0)
    }
}
