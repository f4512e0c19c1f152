//! High-level entry point for fitting a response curve to a series.
//!
//! `CurveFitter` is a short-lived value: it pairs a family with fit options,
//! runs the simplex search (plus optional restarts), and hands back an
//! immutable [`CurveModel`]. Refused fits are logged and returned as typed
//! errors; nothing here panics.
use tracing::{debug, warn};

use crate::optimization::{
    errors::{OptError, OptResult},
    curve_fit::{
        adapter::RmseAdapter,
        data::CurveData,
        family::{CurveFamily, CurveParams},
        model::{CurveModel, FitDiagnostics, r_squared},
        options::FitOptions,
        run::{SimplexOutcome, run_nelder_mead},
        validation::validate_domain,
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct CurveFitter {
    family: CurveFamily,
    opts: FitOptions,
}

impl CurveFitter {
    pub fn new(family: CurveFamily, opts: FitOptions) -> Self {
        Self { family, opts }
    }

    pub fn family(&self) -> CurveFamily {
        self.family
    }

    pub fn options(&self) -> &FitOptions {
        &self.opts
    }

    /// Fit the family to `data` starting from the configured initial guess.
    pub fn fit(&self, data: &CurveData) -> OptResult<CurveModel> {
        self.fit_from(data, self.opts.initial_params_for(self.family))
    }

    /// Fit the family to `data` starting from `initial`.
    ///
    /// # Behavior
    /// - Refuses series shorter than `opts.min_points` (logged at `warn`).
    /// - Refuses series with targets outside the family's domain.
    /// - Runs Nelder–Mead from `initial`; then, up to `opts.restarts` times,
    ///   restarts from the best vertex with a fresh simplex for as long as the
    ///   loss improves by more than `opts.tolerance`.
    /// - Computes R² of the best parameters and copies the data's offset onto
    ///   the model.
    ///
    /// # Errors
    /// - [`OptError::InsufficientData`] for short series.
    /// - [`OptError::NonPositiveTarget`] for power-log domain violations.
    /// - Solver failures propagated from [`run_nelder_mead`].
    pub fn fit_from(&self, data: &CurveData, initial: CurveParams) -> OptResult<CurveModel> {
        if data.len() < self.opts.min_points {
            warn!(
                family = self.family.label(),
                points = data.len(),
                required = self.opts.min_points,
                "refusing to fit curve: not enough points"
            );
            return Err(OptError::InsufficientData {
                points: data.len(),
                required: self.opts.min_points,
            });
        }
        if let Err(err) = validate_domain(self.family, data) {
            warn!(
                family = self.family.label(),
                %err,
                "refusing to fit curve: target outside domain"
            );
            return Err(err);
        }

        let problem = RmseAdapter::new(self.family, data);
        let mut best = run_nelder_mead(&initial.to_theta(), &self.opts, problem)?;
        let mut iterations = best.iterations;
        let mut restarts = 0;
        while restarts < self.opts.restarts {
            let candidate = run_nelder_mead(&best.theta_hat, &self.opts, problem)?;
            iterations += candidate.iterations;
            restarts += 1;
            let improvement = best.loss - candidate.loss;
            if candidate.loss < best.loss {
                best = candidate;
            }
            if !(improvement > self.opts.tolerance) {
                break;
            }
        }

        let params = CurveParams::from_theta(&best.theta_hat)?;
        let r2 = r_squared(self.family, &params, data);
        let SimplexOutcome { loss, converged, status, .. } = best;
        debug!(
            family = self.family.label(),
            a = params.a,
            b = params.b,
            c = params.c,
            r_squared = r2,
            rmse = loss,
            iterations,
            restarts,
            "fitted curve"
        );

        let diagnostics = FitDiagnostics { rmse: loss, iterations, restarts, converged, status };
        Ok(CurveModel::from_parts(self.family, params, r2, data.offset())
            .with_diagnostics(diagnostics))
    }
}
