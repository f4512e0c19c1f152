//! Target-search configuration per strategy family.
//!
//! Return-on-spend targets live on a ratio scale (single digits to hundreds)
//! while cost-per-acquisition targets are monetary amounts spanning several
//! orders of magnitude, so the two families carry different bounds and
//! iteration caps at the same learning rate.
use crate::optimization::{
    errors::{OptError, OptResult},
    strategy::StrategyFamily,
};

pub const DEFAULT_LEARNING_RATE: f64 = 0.05;
pub const DEFAULT_SEARCH_TOLERANCE: f64 = 1e-5;

/// OptimizationConfig — bounds and step control for the gradient ascent.
///
/// Fields
/// ------
/// - `initial_target`: starting point of the ascent.
/// - `min_target` / `max_target`: every iterate is clamped into this range.
/// - `max_iterations`: hard cap on ascent steps.
/// - `learning_rate`: initial step length; shrunk ×0.1 on each reversal.
/// - `tolerance`: stop once a step moves the target by less than this.
///
/// Invariants
/// ----------
/// - `0 < min_target < max_target`, all finite.
/// - `min_target ≤ initial_target ≤ max_target`.
/// - `max_iterations > 0`, `learning_rate` and `tolerance` finite and `> 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizationConfig {
    pub initial_target: f64,
    pub min_target: f64,
    pub max_target: f64,
    pub max_iterations: usize,
    pub learning_rate: f64,
    pub tolerance: f64,
}

impl OptimizationConfig {
    /// Construct a validated configuration.
    ///
    /// # Errors
    /// - [`OptError::InvalidTargetBounds`] unless `0 < min < max` and finite.
    /// - [`OptError::InitialTargetOutOfBounds`] if the start lies outside.
    /// - [`OptError::InvalidMaxIter`] if `max_iterations == 0`.
    /// - [`OptError::InvalidLearningRate`] / [`OptError::InvalidTolerance`]
    ///   for non-finite or non-positive step controls.
    pub fn new(
        initial_target: f64, min_target: f64, max_target: f64, max_iterations: usize,
        learning_rate: f64, tolerance: f64,
    ) -> OptResult<Self> {
        if !min_target.is_finite() || !max_target.is_finite() {
            return Err(OptError::InvalidTargetBounds {
                min: min_target,
                max: max_target,
                reason: "Bounds must be finite.",
            });
        }
        if min_target <= 0.0 {
            return Err(OptError::InvalidTargetBounds {
                min: min_target,
                max: max_target,
                reason: "Lower bound must be positive.",
            });
        }
        if min_target >= max_target {
            return Err(OptError::InvalidTargetBounds {
                min: min_target,
                max: max_target,
                reason: "Lower bound must be below the upper bound.",
            });
        }
        if !(min_target..=max_target).contains(&initial_target) {
            return Err(OptError::InitialTargetOutOfBounds {
                initial: initial_target,
                min: min_target,
                max: max_target,
            });
        }
        if max_iterations == 0 {
            return Err(OptError::InvalidMaxIter {
                max_iter: max_iterations,
                reason: "Maximum iterations must be greater than zero.",
            });
        }
        if !learning_rate.is_finite() || learning_rate <= 0.0 {
            return Err(OptError::InvalidLearningRate { value: learning_rate });
        }
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(OptError::InvalidTolerance {
                tol: tolerance,
                reason: "Tolerance must be finite and positive.",
            });
        }
        Ok(Self {
            initial_target,
            min_target,
            max_target,
            max_iterations,
            learning_rate,
            tolerance,
        })
    }

    /// Built-in defaults for a strategy family.
    ///
    /// - Return on spend: start 4.5, bounds `[1, 500]`, 1 000 iterations.
    /// - Cost per acquisition: start 50, bounds `[1, 2 000 000]`, 100 000
    ///   iterations.
    /// - Both: learning rate 0.05, tolerance 1e-5.
    pub fn for_family(family: StrategyFamily) -> Self {
        match family {
            StrategyFamily::ReturnOnSpend => Self {
                initial_target: 4.5,
                min_target: 1.0,
                max_target: 500.0,
                max_iterations: 1_000,
                learning_rate: DEFAULT_LEARNING_RATE,
                tolerance: DEFAULT_SEARCH_TOLERANCE,
            },
            StrategyFamily::CostPerAcquisition => Self {
                initial_target: 50.0,
                min_target: 1.0,
                max_target: 2_000_000.0,
                max_iterations: 100_000,
                learning_rate: DEFAULT_LEARNING_RATE,
                tolerance: DEFAULT_SEARCH_TOLERANCE,
            },
        }
    }

    /// Clamp `target` into `[min_target, max_target]`.
    pub fn clamp(&self, target: f64) -> f64 {
        target.clamp(self.min_target, self.max_target)
    }
}

/// One [`OptimizationConfig`] per strategy family.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizationConfigs {
    pub return_on_spend: OptimizationConfig,
    pub cost_per_acquisition: OptimizationConfig,
}

impl OptimizationConfigs {
    pub fn get(&self, family: StrategyFamily) -> &OptimizationConfig {
        match family {
            StrategyFamily::ReturnOnSpend => &self.return_on_spend,
            StrategyFamily::CostPerAcquisition => &self.cost_per_acquisition,
        }
    }

    /// Replace the configuration of one family.
    pub fn with(mut self, family: StrategyFamily, config: OptimizationConfig) -> Self {
        match family {
            StrategyFamily::ReturnOnSpend => self.return_on_spend = config,
            StrategyFamily::CostPerAcquisition => self.cost_per_acquisition = config,
        }
        self
    }
}

impl Default for OptimizationConfigs {
    fn default() -> Self {
        Self {
            return_on_spend: OptimizationConfig::for_family(StrategyFamily::ReturnOnSpend),
            cost_per_acquisition: OptimizationConfig::for_family(
                StrategyFamily::CostPerAcquisition,
            ),
        }
    }
}
