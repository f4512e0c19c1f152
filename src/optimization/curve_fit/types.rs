//! curve_fit::types — shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the numeric types used by the curve fitter so the rest of the
//! fitting code stays agnostic to `ndarray` and Argmin generics.
//!
//! Conventions
//! -----------
//! - `Theta` is the unconstrained parameter vector `(a, b, c)` handed to the
//!   simplex solver; it always has length [`N_PARAMS`] once validated.
//! - `Loss` is the RMSE between predictions and observed values.
use argmin::solver::neldermead::NelderMead;
use ndarray::Array1;

/// Parameter vector `θ = (a, b, c)` for a response curve.
pub type Theta = Array1<f64>;

/// Scalar loss minimized by the simplex search (RMSE).
pub type Loss = f64;

/// Number of free parameters in every curve family.
pub const N_PARAMS: usize = 3;

/// Nelder–Mead solver specialized to this crate's numeric types.
pub type Simplex = NelderMead<Theta, Loss>;
