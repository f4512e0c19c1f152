//! Validation helpers for curve fitting.
//!
//! - **Option checks**: [`verify_max_iter`], [`verify_tolerance`],
//!   [`verify_perturbation`] reject unusable solver settings up front.
//! - **Domain checks**: [`validate_domain`] enforces the family's target
//!   domain on a whole series before any loss is evaluated.
//! - **Estimates**: [`validate_theta_hat`] unwraps the solver's best vertex
//!   and requires it to be finite.
use crate::optimization::{
    errors::{OptError, OptResult},
    curve_fit::{data::CurveData, family::CurveFamily, types::Theta},
};

/// Maximum iterations must be `> 0`.
pub fn verify_max_iter(max_iter: usize) -> OptResult<()> {
    if max_iter == 0 {
        return Err(OptError::InvalidMaxIter {
            max_iter,
            reason: "Maximum iterations must be greater than zero.",
        });
    }
    Ok(())
}

/// Tolerances must be finite and strictly positive.
pub fn verify_tolerance(tol: f64) -> OptResult<()> {
    if !tol.is_finite() {
        return Err(OptError::InvalidTolerance { tol, reason: "Tolerance must be finite." });
    }
    if tol <= 0.0 {
        return Err(OptError::InvalidTolerance { tol, reason: "Tolerance must be positive." });
    }
    Ok(())
}

/// Simplex perturbation must be finite and strictly positive.
pub fn verify_perturbation(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::InvalidPerturbation { value, reason: "Perturbation must be finite." });
    }
    if value <= 0.0 {
        return Err(OptError::InvalidPerturbation {
            value,
            reason: "Perturbation must be positive.",
        });
    }
    Ok(())
}

/// Check every target of `data` against the family's domain.
///
/// # Errors
/// Returns [`OptError::NonPositiveTarget`] for the first target the
/// power-log family cannot take a logarithm of.
pub fn validate_domain(family: CurveFamily, data: &CurveData) -> OptResult<()> {
    for &target in data.targets().iter() {
        if !family.accepts_target(target) {
            return Err(OptError::NonPositiveTarget { target });
        }
    }
    Ok(())
}

/// Validate and unwrap the solver's best parameter vector.
///
/// # Errors
/// - [`OptError::MissingThetaHat`] if the solver reported none.
/// - [`OptError::InvalidThetaHat`] for the first non-finite coordinate.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    match theta_hat {
        Some(t) => {
            for (index, &value) in t.iter().enumerate() {
                if !value.is_finite() {
                    return Err(OptError::InvalidThetaHat { index, value });
                }
            }
            Ok(t)
        }
        None => Err(OptError::MissingThetaHat),
    }
}
