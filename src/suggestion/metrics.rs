//! suggestion::metrics — metric registry and per-metric series.
//!
//! Metrics are derived from [`SimulationPoint`] fields. Cost arrives in
//! micros and is reported in currency units; profit is conversion value minus
//! cost. Names parse case-insensitively in camelCase, snake_case or with
//! spaces, so `"conversionValue"`, `"conversion_value"` and
//! `"Conversion value"` are the same metric.
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    optimization::{curve_fit::CurveData, errors::OptResult},
    suggestion::{
        entity::{MICROS_PER_UNIT, SimulationPoint},
        errors::SuggestionError,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    Profit,
    Cost,
    ConversionValue,
    Clicks,
    Impressions,
    Conversions,
    TopSlotImpressions,
}

/// Metrics tracked when the caller does not choose.
pub const DEFAULT_TRACKED_METRICS: [Metric; 6] = [
    Metric::Profit,
    Metric::Cost,
    Metric::ConversionValue,
    Metric::Clicks,
    Metric::Impressions,
    Metric::Conversions,
];

/// Metric the target search maximizes when the caller does not choose.
pub const DEFAULT_PRIMARY_METRIC: Metric = Metric::Profit;

impl Metric {
    pub const ALL: [Metric; 7] = [
        Metric::Profit,
        Metric::Cost,
        Metric::ConversionValue,
        Metric::Clicks,
        Metric::Impressions,
        Metric::Conversions,
        Metric::TopSlotImpressions,
    ];

    /// Canonical camelCase name.
    pub fn name(self) -> &'static str {
        match self {
            Metric::Profit => "profit",
            Metric::Cost => "cost",
            Metric::ConversionValue => "conversionValue",
            Metric::Clicks => "clicks",
            Metric::Impressions => "impressions",
            Metric::Conversions => "conversions",
            Metric::TopSlotImpressions => "topSlotImpressions",
        }
    }

    /// Human-readable label used in column headers.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Profit => "Profit",
            Metric::Cost => "Cost",
            Metric::ConversionValue => "Conversion value",
            Metric::Clicks => "Clicks",
            Metric::Impressions => "Impressions",
            Metric::Conversions => "Conversions",
            Metric::TopSlotImpressions => "Top slot impressions",
        }
    }

    /// Value of this metric at one simulation point.
    pub fn value_at(self, point: &SimulationPoint) -> f64 {
        match self {
            Metric::Profit => {
                point.biddable_conversions_value - point.cost_micros / MICROS_PER_UNIT
            }
            Metric::Cost => point.cost_micros / MICROS_PER_UNIT,
            Metric::ConversionValue => point.biddable_conversions_value,
            Metric::Clicks => point.clicks,
            Metric::Impressions => point.impressions,
            Metric::Conversions => point.biddable_conversions,
            Metric::TopSlotImpressions => point.top_slot_impressions,
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = SuggestionError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        let metric = match key.as_str() {
            "profit" => Metric::Profit,
            "cost" => Metric::Cost,
            "conversionvalue" | "biddableconversionsvalue" => Metric::ConversionValue,
            "clicks" => Metric::Clicks,
            "impressions" => Metric::Impressions,
            "conversions" | "biddableconversions" => Metric::Conversions,
            "topslotimpressions" => Metric::TopSlotImpressions,
            _ => return Err(SuggestionError::InvalidMetricName { name: name.to_string() }),
        };
        Ok(metric)
    }
}

/// `(target, value)` observations of one metric for one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSeries {
    pub metric: Metric,
    pub targets: Vec<f64>,
    pub values: Vec<f64>,
}

impl MetricSeries {
    /// Extract `metric` from every point, in input order.
    pub fn from_points(metric: Metric, points: &[SimulationPoint]) -> Self {
        let (targets, values) = points.iter().map(|p| (p.target, metric.value_at(p))).unzip();
        Self { metric, targets, values }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Validated curve data with the positivity shift applied.
    pub fn to_curve_data(&self) -> OptResult<CurveData> {
        CurveData::with_positivity_shift(&self.targets, &self.values)
    }
}
