//! suggestion::orchestrator — per-entity fit, search and prediction.
//!
//! Purpose
//! -------
//! Turn one entity's simulation points into a [`SuggestionResult`]: fit a
//! curve per tracked metric, gate the fits on point count and R², search the
//! primary metric's curve for the optimal target, derive the suggested target
//! and predict every accepted metric at the current, suggested and optimal
//! targets.
//!
//! Key behaviors
//! -------------
//! - Entities are independent; [`suggest_for_entities`] is a sequential map
//!   over [`suggest_for_entity`] and always yields one result per input.
//! - Every data-quality problem is absorbed into an [`Unavailable`] reason on
//!   the affected cells; nothing here returns an error or panics.
//! - Too few points, or no accepted primary curve, mark the whole result as
//!   having no data (`SuggestionResult::no_data`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Fitted models live only for the duration of one call.
//! - Predictions are reported in original units (positivity offset removed).
//! - The improvement ratio inside the suggestion rule is computed on the
//!   primary curve in fitted units.
use serde::Serialize;
use tracing::{debug, debug_span, warn};

use crate::{
    optimization::{
        curve_fit::{CurveFamily, CurveFitter, CurveModel},
        target_search::TargetAnalyzer,
    },
    suggestion::{
        entity::{BiddingStrategyType, EntitySimulation, SimulationPoint},
        errors::Unavailable,
        metrics::{Metric, MetricSeries},
        options::SuggestionOptions,
    },
};

/// One numeric output or the reason it is missing.
pub type Cell = Result<f64, Unavailable>;

/// Predictions of one metric at the three targets of a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricPrediction {
    pub metric: Metric,
    /// R² of the fitted curve, when a curve was fitted at all.
    pub r_squared: Option<f64>,
    pub current: Cell,
    pub suggested: Cell,
    pub optimal: Cell,
}

impl MetricPrediction {
    fn unavailable(metric: Metric, r_squared: Option<f64>, reason: Unavailable) -> Self {
        Self {
            metric,
            r_squared,
            current: Err(reason.clone()),
            suggested: Err(reason.clone()),
            optimal: Err(reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionResult {
    pub entity_id: String,
    pub entity_name: String,
    pub strategy_type: BiddingStrategyType,
    pub current_target: Option<f64>,
    pub suggested_target: Cell,
    pub optimal_target: Cell,
    /// One entry per tracked metric, in tracked order.
    pub metrics: Vec<MetricPrediction>,
    /// Set when the entity produced no usable output at all.
    pub no_data: Option<Unavailable>,
}

impl SuggestionResult {
    pub fn has_data(&self) -> bool {
        self.no_data.is_none()
    }

    pub fn metric(&self, metric: Metric) -> Option<&MetricPrediction> {
        self.metrics.iter().find(|m| m.metric == metric)
    }
}

/// Produce the suggestion for a single entity.
///
/// # Behavior
/// - Fewer points than `opts.fit.min_points`: target cells carry
///   [`Unavailable::NoSimulationPoints`], metric cells
///   [`Unavailable::InsufficientData`].
/// - Primary curve refused or rejected: every cell carries
///   [`Unavailable::PrimaryMetricUnavailable`].
/// - Otherwise optimal and suggested targets are computed from the primary
///   curve; metrics whose own curve was rejected keep their own reason.
/// - Without a current target the optimum is still reported, while the
///   suggested target and current-target predictions are
///   [`Unavailable::NoCurrentTarget`].
pub fn suggest_for_entity(sim: &EntitySimulation, opts: &SuggestionOptions) -> SuggestionResult {
    let entity = &sim.entity;
    let _span = debug_span!("suggest", entity_id = entity.id()).entered();

    let family = entity.strategy_family();
    let current_target = entity.current_target();
    let base = |suggested_target: Cell,
                optimal_target: Cell,
                metrics: Vec<MetricPrediction>,
                no_data: Option<Unavailable>| SuggestionResult {
        entity_id: entity.id().to_string(),
        entity_name: entity.name().to_string(),
        strategy_type: entity.strategy_type(),
        current_target,
        suggested_target,
        optimal_target,
        metrics,
        no_data,
    };

    let required = opts.fit.min_points;
    if sim.points.len() < required {
        warn!(points = sim.points.len(), required, "not enough simulation points");
        let reason = Unavailable::NoSimulationPoints { points: sim.points.len(), required };
        let per_metric = Unavailable::InsufficientData { points: sim.points.len(), required };
        let metrics = opts
            .tracked()
            .iter()
            .map(|&m| MetricPrediction::unavailable(m, None, per_metric.clone()))
            .collect();
        return base(Err(reason.clone()), Err(reason.clone()), metrics, Some(reason));
    }

    let fitter = CurveFitter::new(CurveFamily::for_strategy(family), opts.fit.clone());
    let fits: Vec<(Metric, Result<CurveModel, Unavailable>)> = opts
        .tracked()
        .iter()
        .map(|&metric| (metric, fit_metric(&fitter, metric, &sim.points)))
        .collect();

    let primary = opts.primary();
    let primary_model = fits.iter().find(|(m, _)| *m == primary).and_then(|(_, f)| f.as_ref().ok());
    let Some(primary_model) = primary_model else {
        warn!(metric = %primary, "primary metric has no accepted curve");
        let reason = Unavailable::PrimaryMetricUnavailable { metric: primary };
        let metrics = fits
            .iter()
            .map(|(m, f)| {
                let r2 = f.as_ref().ok().map(CurveModel::r_squared);
                MetricPrediction::unavailable(*m, r2, reason.clone())
            })
            .collect();
        return base(Err(reason.clone()), Err(reason.clone()), metrics, Some(reason));
    };

    let analyzer = TargetAnalyzer::with_configs(primary_model, opts.search);
    let optimal_target: Cell = analyzer
        .find_optimal_target_for_profit_unconstrained(family)
        .map_err(|err| Unavailable::SearchFailed { message: err.to_string() });
    let suggested_target: Cell = match (current_target, &optimal_target) {
        (None, _) => Err(Unavailable::NoCurrentTarget),
        (Some(_), Err(reason)) => Err(reason.clone()),
        (Some(current), Ok(optimal)) => Ok(analyzer.suggest_new_target(current, *optimal, family)),
    };
    debug!(
        current = ?current_target,
        suggested = ?suggested_target,
        optimal = ?optimal_target,
        "targets computed"
    );

    let current_cell: Cell = current_target.ok_or(Unavailable::NoCurrentTarget);
    let metrics = fits
        .iter()
        .map(|(metric, fit)| match fit {
            Ok(model) => MetricPrediction {
                metric: *metric,
                r_squared: Some(model.r_squared()),
                current: predict_at(model, &current_cell),
                suggested: predict_at(model, &suggested_target),
                optimal: predict_at(model, &optimal_target),
            },
            Err(reason) => MetricPrediction::unavailable(*metric, None, reason.clone()),
        })
        .collect();

    base(suggested_target, optimal_target, metrics, None)
}

/// Produce one suggestion per entity, in input order.
pub fn suggest_for_entities(
    sims: &[EntitySimulation], opts: &SuggestionOptions,
) -> Vec<SuggestionResult> {
    sims.iter().map(|sim| suggest_for_entity(sim, opts)).collect()
}

fn fit_metric(
    fitter: &CurveFitter, metric: Metric, points: &[SimulationPoint],
) -> Result<CurveModel, Unavailable> {
    let series = MetricSeries::from_points(metric, points);
    let data = series.to_curve_data()?;
    let model = fitter.fit(&data)?;
    let min_r_squared = fitter.options().min_r_squared;
    if !model.is_acceptable(min_r_squared) {
        warn!(
            %metric,
            r_squared = model.r_squared(),
            min_r_squared,
            "rejecting curve: poor fit"
        );
        return Err(Unavailable::PoorFit { r_squared: model.r_squared() });
    }
    Ok(model)
}

fn predict_at(model: &CurveModel, target: &Cell) -> Cell {
    let target = target.clone()?;
    model
        .predict_original(target)
        .map_err(|_| Unavailable::PredictionUnavailable { target })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        optimization::curve_fit::CurveParams,
        suggestion::entity::{AdGroup, BiddingEntity},
    };

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The no-points and no-primary-curve paths (every cell unavailable).
    // - A missing current target (optimum kept, suggestion unavailable).
    // - Per-metric rejection that leaves the primary metric intact.
    // -------------------------------------------------------------------------

    fn ad_group(strategy: BiddingStrategyType, target: Option<f64>) -> BiddingEntity {
        let (roas, cpa_micros) = match strategy.family() {
            crate::optimization::strategy::StrategyFamily::ReturnOnSpend => (target, None),
            crate::optimization::strategy::StrategyFamily::CostPerAcquisition => {
                (None, target.map(|t| t * 1e6))
            }
        };
        BiddingEntity::AdGroup(AdGroup {
            id: "21".into(),
            name: "Test group".into(),
            bidding_strategy_type: strategy,
            effective_target_roas: roas,
            effective_target_cpa_micros: cpa_micros,
        })
    }

    /// Quadratic profit with its vertex at 6, sampled at targets 2..=10.
    fn cpa_points(clicks: impl Fn(f64) -> f64) -> Vec<SimulationPoint> {
        let profit = CurveParams::new(-0.5, 6.0, 5.0);
        (2..=10)
            .map(|i| {
                let x = f64::from(i);
                let cost = 0.2 * x * x + 2.0 * x + 10.0;
                let value = CurveFamily::Quadratic.evaluate(&profit, x) + cost;
                SimulationPoint {
                    target: x,
                    biddable_conversions: 0.3 * x + 1.0,
                    biddable_conversions_value: value,
                    clicks: clicks(x),
                    cost_micros: cost * 1e6,
                    impressions: 100.0 * x + 300.0,
                    top_slot_impressions: 0.0,
                }
            })
            .collect()
    }

    #[test]
    fn too_few_points_mark_every_cell() {
        // Arrange
        let sim = EntitySimulation::new(
            ad_group(BiddingStrategyType::TargetRoas, Some(4.0)),
            vec![SimulationPoint { target: 3.0, ..Default::default() }; 2],
        );

        // Act
        let result = suggest_for_entity(&sim, &SuggestionOptions::default());

        // Assert
        let reason = Unavailable::NoSimulationPoints { points: 2, required: 3 };
        assert_eq!(result.no_data, Some(reason.clone()));
        assert_eq!(result.suggested_target, Err(reason.clone()));
        assert_eq!(result.optimal_target, Err(reason));
        assert_eq!(result.current_target, Some(4.0));
        assert_eq!(result.metrics.len(), 6);
        for m in &result.metrics {
            assert!(matches!(m.current, Err(Unavailable::InsufficientData { .. })));
            assert!(matches!(m.optimal, Err(Unavailable::InsufficientData { .. })));
        }
    }

    #[test]
    fn cpa_entity_moves_toward_profit_vertex() {
        // Arrange
        let sim = EntitySimulation::new(
            ad_group(BiddingStrategyType::TargetCpa, Some(4.0)),
            cpa_points(|x| 5.0 * x + 20.0),
        );

        // Act
        let result = suggest_for_entity(&sim, &SuggestionOptions::default());

        // Assert
        assert!(result.has_data());
        let optimal = result.optimal_target.clone().unwrap();
        let suggested = result.suggested_target.clone().unwrap();
        assert!((optimal - 6.0).abs() < 0.3, "optimal {optimal}");
        assert!(suggested > 4.0 && suggested <= 4.0 + 0.05 * (optimal - 4.0) + 1e-9);

        let profit = result.metric(Metric::Profit).unwrap();
        assert!(profit.r_squared.unwrap() > 0.99);
        assert!((profit.current.clone().unwrap() - 21.0).abs() < 0.5);
        assert!((profit.optimal.clone().unwrap() - 23.0).abs() < 0.5);
    }

    #[test]
    fn missing_current_target_keeps_optimum() {
        let sim = EntitySimulation::new(
            ad_group(BiddingStrategyType::MaximizeConversions, None),
            cpa_points(|x| 5.0 * x + 20.0),
        );
        let result = suggest_for_entity(&sim, &SuggestionOptions::default());

        assert!(result.optimal_target.is_ok());
        assert_eq!(result.suggested_target, Err(Unavailable::NoCurrentTarget));
        let cost = result.metric(Metric::Cost).unwrap();
        assert_eq!(cost.current, Err(Unavailable::NoCurrentTarget));
        assert_eq!(cost.suggested, Err(Unavailable::NoCurrentTarget));
        assert!(cost.optimal.is_ok());
    }

    #[test]
    // Purpose
    // -------
    // A noisy secondary metric is rejected on its own without affecting the
    // primary metric or the targets.
    fn poor_secondary_fit_is_isolated() {
        // Arrange: clicks alternate between two levels, no curve explains them.
        let sim = EntitySimulation::new(
            ad_group(BiddingStrategyType::TargetCpa, Some(4.0)),
            cpa_points(|x| if x as i64 % 2 == 0 { 100.0 } else { 500.0 }),
        );

        // Act
        let result = suggest_for_entity(&sim, &SuggestionOptions::default());

        // Assert
        assert!(result.suggested_target.is_ok());
        let clicks = result.metric(Metric::Clicks).unwrap();
        assert!(matches!(clicks.current, Err(Unavailable::PoorFit { .. })));
        assert!(result.metric(Metric::Profit).unwrap().current.is_ok());
    }

    #[test]
    fn rejected_primary_marks_every_cell() {
        // Only clicks are tracked and chosen as primary; they cannot be fitted.
        let opts = SuggestionOptions::from_names("clicks", &["clicks", "cost"]).unwrap();
        let sim = EntitySimulation::new(
            ad_group(BiddingStrategyType::TargetCpa, Some(4.0)),
            cpa_points(|x| if x as i64 % 2 == 0 { 100.0 } else { 500.0 }),
        );

        let result = suggest_for_entity(&sim, &opts);

        let reason = Unavailable::PrimaryMetricUnavailable { metric: Metric::Clicks };
        assert_eq!(result.no_data, Some(reason.clone()));
        assert_eq!(result.suggested_target, Err(reason.clone()));
        let cost = result.metric(Metric::Cost).unwrap();
        assert!(cost.r_squared.is_some());
        assert_eq!(cost.optimal, Err(reason));
    }

    #[test]
    fn batch_yields_one_result_per_entity() {
        let sims = vec![
            EntitySimulation::new(ad_group(BiddingStrategyType::TargetRoas, Some(4.0)), vec![]),
            EntitySimulation::new(
                ad_group(BiddingStrategyType::TargetCpa, Some(4.0)),
                cpa_points(|x| 5.0 * x + 20.0),
            ),
        ];
        let results = suggest_for_entities(&sims, &SuggestionOptions::default());
        assert_eq!(results.len(), 2);
        assert!(!results[0].has_data());
        assert!(results[1].has_data());
    }
}
