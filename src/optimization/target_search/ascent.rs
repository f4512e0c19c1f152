//! Sign-gradient ascent over a single bounded target, as an `argmin` solver.
//!
//! Purpose
//! -------
//! Walk a scalar target uphill on a fitted curve using only the sign of the
//! derivative, with a fixed step that is cut by ×0.1 whenever the walk
//! reverses direction. The step length therefore never depends on the
//! curve's scale, which differs by orders of magnitude across metrics.
//!
//! Key behaviors
//! -------------
//! - Each iteration: `x ← clamp(x + η·sign(y'(x)), min, max)`; `sign(0) = 0`.
//! - A reversal (consecutive deltas of opposite sign) multiplies `η` by
//!   [`STEP_DECAY`].
//! - Terminates with `SolverConverged` when `|Δx| < tolerance`, with
//!   `SolverExit` when the derivative is undefined at the current target, or
//!   on the executor's iteration cap.
//! - Every visited target is scored with the problem's cost (`-y`), so the
//!   executor's best parameter is the highest-valued target seen.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every iterate, including the starting point, lies in `[min, max]`.
//! - The starting target must be set on the state before running.
use argmin::core::{
    CostFunction, Error, Gradient, IterState, KV, Problem, Solver, State, TerminationReason,
};
use tracing::warn;

use crate::optimization::{errors::OptError, target_search::config::OptimizationConfig};

/// Factor applied to the step length on each direction reversal.
pub const STEP_DECAY: f64 = 0.1;

/// Solver state of the ascent: scalar target, scalar gradient, scalar cost.
pub type AscentState = IterState<f64, f64, (), (), (), f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct SignGradientAscent {
    min_target: f64,
    max_target: f64,
    learning_rate: f64,
    tolerance: f64,
    previous_delta: f64,
}

impl SignGradientAscent {
    pub fn new(config: &OptimizationConfig) -> Self {
        Self {
            min_target: config.min_target,
            max_target: config.max_target,
            learning_rate: config.learning_rate,
            tolerance: config.tolerance,
            previous_delta: 0.0,
        }
    }

    /// Current step length (after any reversals so far).
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    fn clamp(&self, target: f64) -> f64 {
        target.clamp(self.min_target, self.max_target)
    }
}

impl<O> Solver<O, AscentState> for SignGradientAscent
where
    O: CostFunction<Param = f64, Output = f64> + Gradient<Param = f64, Gradient = f64>,
{
    const NAME: &'static str = "Sign gradient ascent";

    fn init(
        &mut self, problem: &mut Problem<O>, state: AscentState,
    ) -> Result<(AscentState, Option<KV>), Error> {
        let target = self.clamp(state.get_param().copied().ok_or(OptError::MissingTarget)?);
        let cost = problem.cost(&target)?;
        Ok((state.param(target).cost(cost), None))
    }

    fn next_iter(
        &mut self, problem: &mut Problem<O>, state: AscentState,
    ) -> Result<(AscentState, Option<KV>), Error> {
        let target = state.get_param().copied().ok_or(OptError::MissingTarget)?;

        let gradient = match problem.gradient(&target) {
            Ok(g) => g,
            Err(err) => {
                let err = OptError::from(err);
                warn!(at = target, %err, "gradient undefined, stopping target search");
                let reason = TerminationReason::SolverExit(format!("gradient undefined: {err}"));
                return Ok((state.terminate_with(reason), None));
            }
        };

        let direction = if gradient > 0.0 {
            1.0
        } else if gradient < 0.0 {
            -1.0
        } else {
            0.0
        };
        let next = self.clamp(target + self.learning_rate * direction);
        let delta = next - target;
        if delta * self.previous_delta < 0.0 {
            self.learning_rate *= STEP_DECAY;
        }
        self.previous_delta = delta;

        let cost = problem.cost(&next)?;
        let state = state.param(next).gradient(gradient).cost(cost);
        if delta.abs() < self.tolerance {
            return Ok((state.terminate_with(TerminationReason::SolverConverged), None));
        }
        Ok((state, None))
    }
}
