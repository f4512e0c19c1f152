//! Configuration of one suggestion run.
use crate::{
    optimization::{curve_fit::FitOptions, target_search::OptimizationConfigs},
    suggestion::{
        errors::SuggestionError,
        metrics::{DEFAULT_PRIMARY_METRIC, DEFAULT_TRACKED_METRICS, Metric},
    },
};

/// SuggestionOptions — what to fit and how to search.
///
/// Fields
/// ------
/// - `primary`: metric whose curve drives the target search (default profit).
/// - `tracked`: metrics fitted and predicted per entity, in output order
///   (default: profit, cost, conversion value, clicks, impressions,
///   conversions).
/// - `fit`: curve-fit options, including the minimum point count and the R²
///   acceptance threshold.
/// - `search`: target-search configuration per strategy family.
///
/// Invariants
/// ----------
/// - `primary` is one of `tracked`; `tracked` has no duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionOptions {
    primary: Metric,
    tracked: Vec<Metric>,
    pub fit: FitOptions,
    pub search: OptimizationConfigs,
}

impl SuggestionOptions {
    /// # Errors
    /// - [`SuggestionError::PrimaryMetricNotTracked`] if `primary ∉ tracked`.
    /// - [`SuggestionError::DuplicateTrackedMetric`] for a repeated metric.
    pub fn new(
        primary: Metric, tracked: Vec<Metric>, fit: FitOptions, search: OptimizationConfigs,
    ) -> Result<Self, SuggestionError> {
        for (i, metric) in tracked.iter().enumerate() {
            if tracked[..i].contains(metric) {
                return Err(SuggestionError::DuplicateTrackedMetric { metric: *metric });
            }
        }
        if !tracked.contains(&primary) {
            return Err(SuggestionError::PrimaryMetricNotTracked { primary });
        }
        Ok(Self { primary, tracked, fit, search })
    }

    /// Build options from metric names with default fit and search settings.
    ///
    /// # Errors
    /// [`SuggestionError::InvalidMetricName`] for the first unknown name, plus
    /// the errors of [`SuggestionOptions::new`].
    pub fn from_names(primary: &str, tracked: &[&str]) -> Result<Self, SuggestionError> {
        let primary: Metric = primary.parse()?;
        let tracked = tracked.iter().map(|name| name.parse::<Metric>()).collect::<Result<_, _>>()?;
        Self::new(primary, tracked, FitOptions::default(), OptimizationConfigs::default())
    }

    pub fn primary(&self) -> Metric {
        self.primary
    }

    pub fn tracked(&self) -> &[Metric] {
        &self.tracked
    }
}

impl Default for SuggestionOptions {
    fn default() -> Self {
        Self {
            primary: DEFAULT_PRIMARY_METRIC,
            tracked: DEFAULT_TRACKED_METRICS.to_vec(),
            fit: FitOptions::default(),
            search: OptimizationConfigs::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tracks_six_metrics_with_profit_primary() {
        let opts = SuggestionOptions::default();
        assert_eq!(opts.primary(), Metric::Profit);
        assert_eq!(opts.tracked(), &DEFAULT_TRACKED_METRICS);
    }

    #[test]
    fn from_names_parses_and_validates() {
        let tracked = ["conversionValue", "cost"];
        let opts = SuggestionOptions::from_names("conversion_value", &tracked).unwrap();
        assert_eq!(opts.primary(), Metric::ConversionValue);
        assert_eq!(opts.tracked(), &[Metric::ConversionValue, Metric::Cost]);

        assert_eq!(
            SuggestionOptions::from_names("profit", &["cost", "revenue"]),
            Err(SuggestionError::InvalidMetricName { name: "revenue".into() })
        );
        assert_eq!(
            SuggestionOptions::from_names("profit", &["cost", "clicks"]),
            Err(SuggestionError::PrimaryMetricNotTracked { primary: Metric::Profit })
        );
        assert_eq!(
            SuggestionOptions::from_names("cost", &["cost", "Cost"]),
            Err(SuggestionError::DuplicateTrackedMetric { metric: Metric::Cost })
        );
    }
}
