//! Execution helper that runs argmin's Nelder–Mead solver on a curve-fitting
//! problem and returns a crate-friendly [`SimplexOutcome`].
use argmin::core::{Executor, State, TerminationReason, TerminationStatus};

use crate::optimization::{
    errors::OptResult,
    curve_fit::{
        adapter::RmseAdapter,
        options::FitOptions,
        types::{Loss, Simplex, Theta},
        validation::validate_theta_hat,
    },
};

/// Reflection coefficient of the simplex search.
pub const NM_ALPHA: f64 = 1.0;
/// Expansion coefficient.
pub const NM_GAMMA: f64 = 2.0;
/// Contraction coefficient.
pub const NM_RHO: f64 = 0.5;
/// Shrink coefficient.
pub const NM_SIGMA: f64 = 0.5;

/// Perturbation used for coordinates that are exactly zero, where a relative
/// step would leave the simplex degenerate.
pub const ZERO_COORD_STEP: f64 = 0.00025;

/// Result of one simplex run.
///
/// - `theta_hat`: best vertex found.
/// - `loss`: RMSE at `theta_hat`.
/// - `converged`: `true` when the loss spread fell below the tolerance
///   before the iteration cap.
/// - `status`: human-readable termination status.
/// - `iterations`: number of simplex iterations performed.
#[derive(Debug, Clone, PartialEq)]
pub struct SimplexOutcome {
    pub theta_hat: Theta,
    pub loss: Loss,
    pub converged: bool,
    pub status: String,
    pub iterations: u64,
}

/// Build the `n + 1` vertices of the initial simplex around `theta0`.
///
/// The first vertex is `theta0` itself; vertex `i + 1` increases coordinate
/// `i` by `perturbation` (relative), or by [`ZERO_COORD_STEP`] when that
/// coordinate is zero.
pub fn initial_simplex(theta0: &Theta, perturbation: f64) -> Vec<Theta> {
    let mut vertices = Vec::with_capacity(theta0.len() + 1);
    vertices.push(theta0.clone());
    for i in 0..theta0.len() {
        let mut vertex = theta0.clone();
        vertex[i] = if vertex[i] == 0.0 {
            ZERO_COORD_STEP
        } else {
            vertex[i] * (1.0 + perturbation)
        };
        vertices.push(vertex);
    }
    vertices
}

/// Run Nelder–Mead from `theta0` on `problem`.
///
/// Wires up:
/// - the initial simplex from [`initial_simplex`],
/// - the standard coefficients (reflection 1, expansion 2, contraction 0.5,
///   shrink 0.5),
/// - the loss-spread tolerance and the iteration cap from `opts`,
///   then executes the solver and converts the final state.
///
/// # Errors
/// - Propagates `argmin` configuration or runtime errors via
///   `From<argmin::core::Error>`.
/// - [`OptError::MissingThetaHat`](crate::optimization::errors::OptError::MissingThetaHat)
///   / `InvalidThetaHat` if the best vertex is absent or non-finite.
pub fn run_nelder_mead(
    theta0: &Theta, opts: &FitOptions, problem: RmseAdapter<'_>,
) -> OptResult<SimplexOutcome> {
    let solver = Simplex::new(initial_simplex(theta0, opts.perturbation))
        .with_alpha(NM_ALPHA)?
        .with_gamma(NM_GAMMA)?
        .with_rho(NM_RHO)?
        .with_sigma(NM_SIGMA)?
        .with_sd_tolerance(opts.tolerance)?;

    let max_iter = opts.max_iter as u64;
    let result =
        Executor::new(problem, solver).configure(|state| state.max_iters(max_iter)).run()?;

    let state = result.state();
    let iterations = state.get_iter();
    let loss = state.get_best_cost();
    let (converged, status) = match state.get_termination_status() {
        TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
        TerminationStatus::Terminated(reason) => {
            (matches!(reason, TerminationReason::SolverConverged), format!("{reason:?}"))
        }
    };
    let theta_hat = validate_theta_hat(state.get_best_param().cloned())?;
    Ok(SimplexOutcome { theta_hat, loss, converged, status, iterations })
}
