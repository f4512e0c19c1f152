//! suggestion::render — flatten results into fixed-layout rows.
//!
//! Layout: strategy id, name and type; current, suggested and optimal
//! target; then current, suggested and optimal prediction for each tracked
//! metric. With the six default metrics a row has 24 cells. Missing values
//! become marker text here and nowhere earlier.
use serde::Serialize;

use crate::suggestion::{
    errors::Unavailable,
    metrics::Metric,
    orchestrator::{Cell, SuggestionResult},
};

/// Marker for target cells of entities without enough simulation points.
pub const NO_SIMULATION_POINTS: &str = "No simulation points";
/// Marker for every other unavailable cell.
pub const NO_DATA: &str = "No data";

const LEADING_HEADERS: [&str; 6] = [
    "Strategy ID",
    "Strategy name",
    "Strategy type",
    "Current target",
    "Suggested target",
    "Optimal target",
];

/// One rendered cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RowCell {
    Text(String),
    Number(f64),
}

impl std::fmt::Display for RowCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowCell::Text(text) => f.write_str(text),
            RowCell::Number(value) => write!(f, "{value}"),
        }
    }
}

/// Marker text for a missing value.
pub fn marker(reason: &Unavailable) -> &'static str {
    match reason {
        Unavailable::NoSimulationPoints { .. } => NO_SIMULATION_POINTS,
        _ => NO_DATA,
    }
}

/// Header row matching [`render_row`] for the given tracked metrics.
pub fn column_headers(metrics: &[Metric]) -> Vec<String> {
    let leading = LEADING_HEADERS.iter().map(|h| h.to_string());
    let per_metric = metrics.iter().flat_map(|m| {
        ["current", "suggested", "optimal"].map(|at| format!("{} ({at})", m.label()))
    });
    leading.chain(per_metric).collect()
}

/// Flatten one result into cells, in [`column_headers`] order.
pub fn render_row(result: &SuggestionResult) -> Vec<RowCell> {
    let mut row = Vec::with_capacity(LEADING_HEADERS.len() + 3 * result.metrics.len());
    row.push(RowCell::Text(result.entity_id.clone()));
    row.push(RowCell::Text(result.entity_name.clone()));
    row.push(RowCell::Text(result.strategy_type.as_str().to_string()));
    row.push(result.current_target.map_or_else(|| RowCell::Text(NO_DATA.into()), RowCell::Number));
    row.push(cell(&result.suggested_target));
    row.push(cell(&result.optimal_target));
    for prediction in &result.metrics {
        row.push(metric_cell(&prediction.current));
        row.push(metric_cell(&prediction.suggested));
        row.push(metric_cell(&prediction.optimal));
    }
    row
}

fn cell(value: &Cell) -> RowCell {
    match value {
        Ok(v) => RowCell::Number(*v),
        Err(reason) => RowCell::Text(marker(reason).to_string()),
    }
}

// Metric cells never show the "no points" marker.
fn metric_cell(value: &Cell) -> RowCell {
    match value {
        Ok(v) => RowCell::Number(*v),
        Err(_) => RowCell::Text(NO_DATA.to_string()),
    }
}
