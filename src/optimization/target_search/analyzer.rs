//! TargetAnalyzer — optimal and suggested bid targets from a fitted curve.
//!
//! Purpose
//! -------
//! Turn the fitted curve of the primary optimization metric into two
//! numbers: the target that locally maximizes the metric within the family's
//! bounds, and a conservative suggestion that only moves part-way from the
//! current target toward that optimum.
//!
//! Key behaviors
//! -------------
//! - [`TargetAnalyzer::find_optimal_target_for_profit_unconstrained`] runs
//!   [`SignGradientAscent`] through an Argmin `Executor` from the family's
//!   `initial_target`, capped at `max_iterations`. Running out of iterations
//!   or hitting an undefined gradient is logged, not returned as an error.
//! - [`TargetAnalyzer::suggest_new_target`] moves at most 5% of the distance
//!   to the optimum, scaled down further when the predicted improvement is
//!   small, and clamps the result to `[0.1, max_target]`.
//!
//! Invariants & assumptions
//! ------------------------
//! - The analyzer borrows its model; it holds no state between calls.
//! - Predictions used for the improvement ratio are in fitted units; the
//!   ratio is scale-free up to the positivity offset.
use argmin::core::{Executor, State, TerminationReason, TerminationStatus};
use tracing::{debug, warn};

use crate::optimization::{
    curve_fit::CurveModel,
    errors::OptResult,
    strategy::StrategyFamily,
    target_search::{
        adapter::CurveAdapter,
        ascent::SignGradientAscent,
        config::{OptimizationConfig, OptimizationConfigs},
    },
};

/// Fraction of the distance to the optimum a suggestion may cover.
pub const MAX_MOVE_FRACTION: f64 = 0.05;
/// Predicted relative improvement below which the move is scaled down.
pub const SENSITIVITY_THRESHOLD: f64 = 0.1;
/// Fraction of the current target moved when predictions are unavailable.
pub const FALLBACK_MOVE_FRACTION: f64 = 0.05;
/// Smallest target ever suggested.
pub const MIN_SUGGESTED_TARGET: f64 = 0.1;

/// Result of one target search.
///
/// - `target`: best target found (highest predicted value among visited).
/// - `iterations`: ascent steps performed.
/// - `converged`: `true` when the step fell below the tolerance.
/// - `status`: human-readable termination status.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub target: f64,
    pub iterations: u64,
    pub converged: bool,
    pub status: String,
}

#[derive(Debug, Clone, Copy)]
pub struct TargetAnalyzer<'a> {
    model: &'a CurveModel,
    configs: OptimizationConfigs,
}

impl<'a> TargetAnalyzer<'a> {
    pub fn new(model: &'a CurveModel) -> Self {
        Self { model, configs: OptimizationConfigs::default() }
    }

    pub fn with_configs(model: &'a CurveModel, configs: OptimizationConfigs) -> Self {
        Self { model, configs }
    }

    pub fn config(&self, family: StrategyFamily) -> &OptimizationConfig {
        self.configs.get(family)
    }

    /// Bounded sign-gradient ascent on the model, with diagnostics.
    ///
    /// # Errors
    /// Propagates backend failures from the Argmin executor. Non-convergence
    /// and undefined gradients are *not* errors.
    pub fn search_optimal_target(&self, family: StrategyFamily) -> OptResult<SearchOutcome> {
        let config = *self.config(family);
        let problem = CurveAdapter::new(self.model);
        let solver = SignGradientAscent::new(&config);
        let max_iters = config.max_iterations as u64;

        let result = Executor::new(problem, solver)
            .configure(|state| state.param(config.initial_target).max_iters(max_iters))
            .run()?;

        let state = result.state();
        let target = state
            .get_best_param()
            .or_else(|| state.get_param())
            .copied()
            .unwrap_or(config.initial_target);
        let target = config.clamp(target);
        let iterations = state.get_iter();
        let (converged, status) = match state.get_termination_status() {
            TerminationStatus::Terminated(TerminationReason::SolverConverged) => {
                (true, "SolverConverged".to_string())
            }
            TerminationStatus::Terminated(reason) => (false, format!("{reason:?}")),
            TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
        };

        if converged {
            debug!(target_value = target, iterations, "target search converged");
        } else {
            warn!(
                target_value = target,
                iterations,
                status = status.as_str(),
                "target search did not converge, returning best target found"
            );
        }
        Ok(SearchOutcome { target, iterations, converged, status })
    }

    /// Target that (locally) maximizes the primary metric within the
    /// family's bounds. Always lies in `[min_target, max_target]`.
    pub fn find_optimal_target_for_profit_unconstrained(
        &self, family: StrategyFamily,
    ) -> OptResult<f64> {
        Ok(self.search_optimal_target(family)?.target)
    }

    /// Conservative next target between `current` and `optimal`.
    ///
    /// # Behavior
    /// - `max_move = |optimal − current| · 0.05`.
    /// - If the metric cannot be predicted at either target, move
    ///   `min(5% of |current|, |optimal − current|)` instead.
    /// - Otherwise, with `improvement = |p(opt) − p(cur)| / max(|p(cur)|,
    ///   |p(opt)|, 1)`, scale the move by `improvement / 0.1` when
    ///   `improvement < 0.1`.
    /// - Step toward `optimal` and clamp into `[0.1, max_target]`; when
    ///   `max_target < 0.1` the floor drops to `max_target`.
    ///
    /// The result is never farther from `current` than `optimal` is, unless
    /// the clamp itself forces it into range.
    pub fn suggest_new_target(&self, current: f64, optimal: f64, family: StrategyFamily) -> f64 {
        let config = self.config(family);
        let distance = (optimal - current).abs();
        let direction = if optimal > current {
            1.0
        } else if optimal < current {
            -1.0
        } else {
            0.0
        };

        let step = match (self.model.predict_value(current), self.model.predict_value(optimal)) {
            (Ok(at_current), Ok(at_optimal)) => {
                let max_move = distance * MAX_MOVE_FRACTION;
                let scale = at_current.abs().max(at_optimal.abs()).max(1.0);
                let improvement = (at_optimal - at_current).abs() / scale;
                if improvement < SENSITIVITY_THRESHOLD {
                    max_move * (improvement / SENSITIVITY_THRESHOLD)
                } else {
                    max_move
                }
            }
            (current_prediction, optimal_prediction) => {
                warn!(
                    current,
                    optimal,
                    current_available = current_prediction.is_ok(),
                    optimal_available = optimal_prediction.is_ok(),
                    "prediction unavailable, falling back to a flat move"
                );
                (current.abs() * FALLBACK_MOVE_FRACTION).min(distance)
            }
        };

        let floor = MIN_SUGGESTED_TARGET.min(config.max_target);
        (current + direction * step).clamp(floor, config.max_target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::curve_fit::{CurveFamily, CurveParams};
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Locating interior maxima of both families from the default starts.
    // - Staying inside the family bounds for monotone curves, whether the
    //   search converges on a bound or runs out of iterations.
    // - The scaled, fallback and clamped branches of `suggest_new_target`.
    //
    // They intentionally DO NOT cover:
    // - Curve fitting; every model here is built from known coefficients.
    // -------------------------------------------------------------------------

    fn quadratic(a: f64, b: f64, c: f64) -> CurveModel {
        CurveModel::from_parts(CurveFamily::Quadratic, CurveParams::new(a, b, c), 0.99, 0.0)
    }

    fn power_log(a: f64, b: f64, c: f64) -> CurveModel {
        CurveModel::from_parts(CurveFamily::PowerLog, CurveParams::new(a, b, c), 0.99, 0.0)
    }

    #[test]
    // Purpose
    // -------
    // The ascent finds the vertex of a concave quadratic on the cost scale.
    //
    // Given
    // -----
    // - `y = -0.01·x² + 1.2·x + 5` (maximum at 60), CPA defaults (start 50).
    //
    // Expect
    // ------
    // - Converges within 0.1 of 60.
    fn quadratic_maximum_is_found() {
        // Arrange
        let model = quadratic(-0.01, 1.2, 5.0);
        let analyzer = TargetAnalyzer::new(&model);

        // Act
        let outcome = analyzer.search_optimal_target(StrategyFamily::CostPerAcquisition).unwrap();

        // Assert
        assert!(outcome.converged, "status: {}", outcome.status);
        assert!((outcome.target - 60.0).abs() < 0.1, "target {}", outcome.target);
    }

    #[test]
    // Purpose
    // -------
    // The ascent finds the mode of a power-log curve on the ratio scale.
    //
    // Given
    // -----
    // - `y = exp(1 + 2·ln x − 0.5·ln² x)` (maximum at `x = e²`), ROAS
    //   defaults (start 4.5).
    //
    // Expect
    // ------
    // - Converges within 0.1 of `e²`.
    fn power_log_mode_is_found() {
        // Arrange
        let model = power_log(1.0, 2.0, -0.5);
        let analyzer = TargetAnalyzer::new(&model);

        // Act
        let optimal =
            analyzer.find_optimal_target_for_profit_unconstrained(StrategyFamily::ReturnOnSpend);

        // Assert
        let optimal = optimal.unwrap();
        assert!((optimal - 2f64.exp()).abs() < 0.1, "{optimal}");
    }

    #[test]
    // Purpose
    // -------
    // An overflowing derivative ends the search early instead of failing it.
    //
    // Given
    // -----
    // - `y = exp(708 + ln x)`, which overflows just above `x ≈ 5.9`, ROAS
    //   defaults (start 4.5, increasing curve).
    //
    // Expect
    // ------
    // - `Ok` outcome, not converged, status names the undefined gradient.
    // - The reported target is finite, inside the bounds and above the start.
    fn undefined_gradient_stops_search_with_best_target() {
        // Arrange
        let model = power_log(708.0, 1.0, 0.0);
        let analyzer = TargetAnalyzer::new(&model);
        let config = *analyzer.config(StrategyFamily::ReturnOnSpend);

        // Act
        let outcome = analyzer.search_optimal_target(StrategyFamily::ReturnOnSpend).unwrap();

        // Assert
        assert!(!outcome.converged);
        assert!(outcome.status.contains("gradient undefined"), "status: {}", outcome.status);
        assert!(outcome.target.is_finite());
        assert!(outcome.target > config.initial_target && outcome.target < 10.0);
        assert!(outcome.iterations < config.max_iterations as u64);
        assert!(model.predict_value(outcome.target).is_ok());
    }

    #[test]
    fn decreasing_curve_stops_on_lower_bound() {
        let model = power_log(5.0, -1.0, 0.0);
        let analyzer = TargetAnalyzer::new(&model);
        let outcome = analyzer.search_optimal_target(StrategyFamily::ReturnOnSpend).unwrap();
        assert!(outcome.converged);
        assert_relative_eq!(outcome.target, 1.0);
    }

    #[test]
    // Purpose
    // -------
    // A monotone increasing curve exhausts the iteration cap without leaving
    // the bounds.
    fn increasing_curve_stays_in_bounds_without_converging() {
        for (family, model) in [
            (StrategyFamily::ReturnOnSpend, power_log(0.0, 1.0, 0.0)),
            (StrategyFamily::CostPerAcquisition, quadratic(0.0, 1.0, 0.0)),
        ] {
            let analyzer = TargetAnalyzer::new(&model);
            let config = *analyzer.config(family);
            let outcome = analyzer.search_optimal_target(family).unwrap();
            assert!(!outcome.converged);
            assert!(outcome.target >= config.min_target && outcome.target <= config.max_target);
            assert!(outcome.target > config.initial_target);
        }
    }

    #[test]
    // Purpose
    // -------
    // With a small predicted improvement the suggested move shrinks in
    // proportion.
    //
    // Given
    // -----
    // - `y = -0.01·x² + 1.2·x + 5`, current 40 (y = 37), optimal 60 (y = 41).
    //
    // Expect
    // ------
    // - improvement = 4/41, so the move is `20 · 0.05 · (4/41)/0.1`.
    fn small_improvement_scales_move_down() {
        // Arrange
        let model = quadratic(-0.01, 1.2, 5.0);
        let analyzer = TargetAnalyzer::new(&model);

        // Act
        let suggested = analyzer.suggest_new_target(40.0, 60.0, StrategyFamily::CostPerAcquisition);

        // Assert
        let expected_move = 20.0 * 0.05 * ((4.0 / 41.0) / 0.1);
        assert_relative_eq!(suggested, 40.0 + expected_move, max_relative = 1e-9);
    }

    #[test]
    fn large_improvement_moves_five_percent_of_distance() {
        let model = quadratic(-0.01, 1.2, 5.0);
        let analyzer = TargetAnalyzer::new(&model);
        // y(10) = 16, y(60) = 41: improvement well above the threshold.
        let suggested = analyzer.suggest_new_target(10.0, 60.0, StrategyFamily::CostPerAcquisition);
        assert_relative_eq!(suggested, 12.5, max_relative = 1e-12);
    }

    #[test]
    fn unavailable_prediction_falls_back_to_flat_move() {
        let model = power_log(800.0, 1.0, 0.0);
        let analyzer = TargetAnalyzer::new(&model);
        let suggested = analyzer.suggest_new_target(10.0, 20.0, StrategyFamily::ReturnOnSpend);
        assert_relative_eq!(suggested, 10.5, max_relative = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Suggestions never overshoot the optimum and always respect the
    // `[0.1, max_target]` clamp.
    fn suggestion_is_bounded_by_optimum_and_clamp() {
        let model = quadratic(-0.01, 1.2, 5.0);
        let analyzer = TargetAnalyzer::new(&model);
        let max = analyzer.config(StrategyFamily::CostPerAcquisition).max_target;
        for (current, optimal) in [(40.0, 60.0), (80.0, 60.0), (60.0, 60.0), (0.2, 0.15)] {
            let s =
                analyzer.suggest_new_target(current, optimal, StrategyFamily::CostPerAcquisition);
            assert!((s - current).abs() <= (optimal - current).abs() + 1e-12);
            assert!((0.1..=max).contains(&s));
        }
    }

    #[test]
    // Purpose
    // -------
    // A configuration whose upper bound lies below the 0.1 floor still
    // yields a suggestion instead of panicking in the clamp.
    fn upper_bound_below_floor_clamps_to_upper_bound() {
        // Arrange
        let config = OptimizationConfig::new(0.05, 0.01, 0.08, 100, 0.001, 1e-6).unwrap();
        let configs = OptimizationConfigs::default().with(StrategyFamily::ReturnOnSpend, config);
        let model = power_log(1.0, 2.0, -0.5);
        let analyzer = TargetAnalyzer::with_configs(&model, configs);

        // Act
        let suggested = analyzer.suggest_new_target(0.05, 0.07, StrategyFamily::ReturnOnSpend);

        // Assert
        assert_eq!(suggested, 0.08);
    }
}
