//! Integration tests for the suggestion pipeline.
//!
//! Purpose
//! -------
//! - Validate the path from provider-shaped JSON to rendered rows: entity
//!   deserialization, per-metric curve fitting, target search, suggestion
//!   and prediction, then flattening into the fixed column layout.
//!
//! Coverage
//! --------
//! - Return-on-spend campaign with power-log metrics (optimum at `e²`).
//! - Cost-per-acquisition portfolio strategy with quadratic metrics.
//! - Ad group with too few simulation points (marker row).
//! - Determinism of a full batch.
//!
//! Exclusions
//! ----------
//! - Fine-grained solver and option validation; covered by unit tests.
use approx::assert_relative_eq;
use bid_target_optimizer::{
    optimization::curve_fit::{CurveFamily, CurveParams},
    suggestion::{
        EntitySimulation, Metric, SimulationPoint, SuggestionOptions, Unavailable,
        render::{NO_DATA, NO_SIMULATION_POINTS, RowCell, column_headers, render_row},
        suggest_for_entities, suggest_for_entity,
    },
};
use serde_json::json;

/// Simulation points whose metrics are all multiples of one power-log shape
/// `g(x) = exp(2·ln x − 0.5·ln² x)`, peaking at `x = e²`.
///
/// Profit is `e·g(x)`: value `(e + e^0.5)·g(x)` minus cost `e^0.5·g(x)`.
fn roas_points() -> Vec<SimulationPoint> {
    let shape = |a: f64, x: f64| CurveFamily::PowerLog.evaluate(&CurveParams::new(a, 2.0, -0.5), x);
    [1.5, 2.0, 3.0, 4.0, 5.0, 6.0, 8.0, 10.0, 12.0]
        .into_iter()
        .map(|x| {
            let cost = shape(0.5, x);
            SimulationPoint {
                target: x,
                biddable_conversions: shape(-1.0, x),
                biddable_conversions_value: cost + shape(1.0, x),
                clicks: shape(2.0, x),
                cost_micros: cost * 1e6,
                impressions: shape(3.0, x),
                top_slot_impressions: shape(2.5, x),
            }
        })
        .collect()
}

/// Quadratic metrics over CPA targets `2..=10`; profit peaks at 6.
fn cpa_points() -> Vec<SimulationPoint> {
    (2..=10)
        .map(|i| {
            let x = f64::from(i);
            let cost = 0.2 * x * x + 2.0 * x + 10.0;
            let profit = -0.5 * x * x + 6.0 * x + 5.0;
            SimulationPoint {
                target: x,
                biddable_conversions: 0.3 * x + 1.0,
                biddable_conversions_value: profit + cost,
                clicks: 5.0 * x + 20.0,
                cost_micros: cost * 1e6,
                impressions: 100.0 * x + 300.0,
                top_slot_impressions: 40.0 * x + 100.0,
            }
        })
        .collect()
}

fn roas_campaign() -> EntitySimulation {
    serde_json::from_value(json!({
        "entity": {
            "kind": "campaign",
            "id": "101",
            "name": "Shopping / all products",
            "biddingStrategyType": "TARGET_ROAS",
            "targetRoas": { "targetRoas": 4.0 }
        },
        "points": roas_points(),
    }))
    .unwrap()
}

fn cpa_portfolio() -> EntitySimulation {
    serde_json::from_value(json!({
        "entity": {
            "kind": "portfolioStrategy",
            "id": "202",
            "name": "Lead gen CPA",
            "type": "TARGET_CPA",
            "targetCpa": { "targetCpaMicros": 4_000_000.0 }
        },
        "points": cpa_points(),
    }))
    .unwrap()
}

fn sparse_ad_group() -> EntitySimulation {
    serde_json::from_value(json!({
        "entity": {
            "kind": "adGroup",
            "id": "303",
            "name": "Brand / exact",
            "biddingStrategyType": "TARGET_ROAS",
            "effectiveTargetRoas": 6.0
        },
        "points": [
            { "target": 5.0, "clicks": 120, "costMicros": 80000000 },
            { "target": 6.0, "clicks": 100, "costMicros": 70000000 }
        ],
    }))
    .unwrap()
}

fn number(cell: &RowCell) -> f64 {
    match cell {
        RowCell::Number(v) => *v,
        RowCell::Text(t) => panic!("expected a number, got {t:?}"),
    }
}

#[test]
// Purpose
// -------
// A return-on-spend campaign gets an optimum near the profit peak, a small
// step toward it, and predictions for every tracked metric.
//
// Given
// -----
// - Current target 4.0; all metrics proportional to a power-log shape with
//   its mode at `e² ≈ 7.39`.
//
// Expect
// ------
// - Optimal target within 0.2 of `e²`.
// - Suggested target strictly between 4.0 and 4.0 + 5% of the distance.
// - All six metrics accepted; profit at current ≈ `e·g(4)`.
fn roas_campaign_suggestion() {
    // Arrange
    let sim = roas_campaign();
    let opts = SuggestionOptions::default();

    // Act
    let result = suggest_for_entity(&sim, &opts);

    // Assert
    assert!(result.has_data());
    assert_eq!(result.current_target, Some(4.0));
    let optimal = result.optimal_target.clone().unwrap();
    let suggested = result.suggested_target.clone().unwrap();
    assert!((optimal - 2f64.exp()).abs() < 0.2, "optimal {optimal}");
    assert!(suggested > 4.0, "suggested {suggested}");
    assert!(suggested <= 4.0 + 0.05 * (optimal - 4.0) + 1e-9, "suggested {suggested}");

    for prediction in &result.metrics {
        assert!(prediction.r_squared.unwrap() > 0.8, "{:?}", prediction.metric);
        assert!(prediction.current.is_ok() && prediction.optimal.is_ok());
    }
    let profit = result.metric(Metric::Profit).unwrap();
    let at_current = profit.current.clone().unwrap();
    let expected = (1.0 + 2.0 * 4f64.ln() - 0.5 * 4f64.ln().powi(2)).exp();
    assert_relative_eq!(at_current, expected, max_relative = 0.02);
    assert!(profit.optimal.clone().unwrap() > at_current);
}

#[test]
fn cpa_portfolio_suggestion() {
    let result = suggest_for_entity(&cpa_portfolio(), &SuggestionOptions::default());

    assert_eq!(result.current_target, Some(4.0));
    let optimal = result.optimal_target.clone().unwrap();
    assert!((optimal - 6.0).abs() < 0.3, "optimal {optimal}");
    let suggested = result.suggested_target.clone().unwrap();
    assert!(suggested > 4.0 && suggested <= 4.0 + 0.05 * (optimal - 4.0) + 1e-9);

    let cost = result.metric(Metric::Cost).unwrap();
    assert_relative_eq!(cost.current.clone().unwrap(), 21.2, max_relative = 0.02);
}

#[test]
// Purpose
// -------
// An entity with fewer than three points still yields a full row, with the
// "no points" marker on target cells and "no data" on every metric cell.
fn sparse_entity_renders_marker_row() {
    // Arrange
    let opts = SuggestionOptions::default();

    // Act
    let result = suggest_for_entity(&sparse_ad_group(), &opts);
    let row = render_row(&result);

    // Assert
    assert_eq!(result.no_data, Some(Unavailable::NoSimulationPoints { points: 2, required: 3 }));
    assert_eq!(row.len(), column_headers(opts.tracked()).len());
    assert_eq!(row.len(), 24);
    assert_eq!(row[0], RowCell::Text("303".into()));
    assert_eq!(row[3], RowCell::Number(6.0));
    assert_eq!(row[4], RowCell::Text(NO_SIMULATION_POINTS.into()));
    assert!(row[6..].iter().all(|cell| *cell == RowCell::Text(NO_DATA.into())));
}

#[test]
fn tracked_metrics_can_include_top_slot_impressions() {
    let opts = SuggestionOptions::from_names("profit", &["profit", "topSlotImpressions"]).unwrap();
    let result = suggest_for_entity(&roas_campaign(), &opts);

    assert_eq!(result.metrics.len(), 2);
    assert!(result.metric(Metric::TopSlotImpressions).unwrap().optimal.is_ok());
    assert_eq!(render_row(&result).len(), 12);
}

#[test]
// Purpose
// -------
// The whole batch is deterministic: two runs render identical rows.
fn batch_is_deterministic() {
    // Arrange
    let sims = vec![roas_campaign(), cpa_portfolio(), sparse_ad_group()];
    let opts = SuggestionOptions::default();

    // Act
    let first = suggest_for_entities(&sims, &opts);
    let second = suggest_for_entities(&sims, &opts);

    // Assert
    assert_eq!(first.len(), 3);
    for (a, b) in first.iter().zip(&second) {
        for (x, y) in render_row(a).iter().zip(render_row(b).iter()) {
            match (x, y) {
                (RowCell::Number(_), RowCell::Number(_)) => {
                    assert!((number(x) - number(y)).abs() <= 1e-9)
                }
                _ => assert_eq!(x, y),
            }
        }
    }
}
