//! suggestion::entity — bidding entities and their simulation points.
//!
//! Purpose
//! -------
//! Describe what the suggestion layer consumes per entity: the entity itself
//! (campaign, ad group or portfolio bidding strategy), its strategy type and
//! current target, and the platform's "what-if" simulation points.
//!
//! Key behaviors
//! -------------
//! - [`BiddingEntity`] is a tagged union with one extraction function per
//!   kind; no probing for which fields happen to be present.
//! - [`BiddingStrategyType`] maps onto a
//!   [`StrategyFamily`](crate::optimization::strategy::StrategyFamily).
//! - Cost-per-acquisition targets arrive in micros and are converted to
//!   currency units on extraction.
//!
//! Conventions
//! -----------
//! - All shapes deserialize from the provider's camelCase JSON.
//! - Simulation point targets are expected in the same units as the current
//!   target: a ratio for return on spend, currency units for cost per
//!   acquisition.
use serde::{Deserialize, Serialize};

use crate::optimization::strategy::StrategyFamily;

/// Micros per currency unit.
pub const MICROS_PER_UNIT: f64 = 1_000_000.0;

/// One platform-provided simulation sample at a candidate target.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationPoint {
    pub target: f64,
    #[serde(default)]
    pub biddable_conversions: f64,
    #[serde(default)]
    pub biddable_conversions_value: f64,
    #[serde(default)]
    pub clicks: f64,
    #[serde(default)]
    pub cost_micros: f64,
    #[serde(default)]
    pub impressions: f64,
    #[serde(default)]
    pub top_slot_impressions: f64,
}

/// Bidding strategy types the optimizer handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BiddingStrategyType {
    TargetRoas,
    MaximizeConversionValue,
    TargetCpa,
    MaximizeConversions,
}

impl BiddingStrategyType {
    pub fn family(self) -> StrategyFamily {
        match self {
            BiddingStrategyType::TargetRoas | BiddingStrategyType::MaximizeConversionValue => {
                StrategyFamily::ReturnOnSpend
            }
            BiddingStrategyType::TargetCpa | BiddingStrategyType::MaximizeConversions => {
                StrategyFamily::CostPerAcquisition
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BiddingStrategyType::TargetRoas => "TARGET_ROAS",
            BiddingStrategyType::MaximizeConversionValue => "MAXIMIZE_CONVERSION_VALUE",
            BiddingStrategyType::TargetCpa => "TARGET_CPA",
            BiddingStrategyType::MaximizeConversions => "MAXIMIZE_CONVERSIONS",
        }
    }
}

impl std::fmt::Display for BiddingStrategyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoasScheme {
    #[serde(default)]
    pub target_roas: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpaScheme {
    #[serde(default)]
    pub target_cpa_micros: Option<f64>,
}

/// Scheme blocks shared by campaigns and portfolio strategies. Only the block
/// matching the strategy type is read.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiddingSchemes {
    #[serde(default)]
    pub target_roas: Option<RoasScheme>,
    #[serde(default)]
    pub maximize_conversion_value: Option<RoasScheme>,
    #[serde(default)]
    pub target_cpa: Option<CpaScheme>,
    #[serde(default)]
    pub maximize_conversions: Option<CpaScheme>,
}

impl BiddingSchemes {
    fn target_for(&self, strategy_type: BiddingStrategyType) -> Option<f64> {
        match strategy_type {
            BiddingStrategyType::TargetRoas => self.target_roas?.target_roas,
            BiddingStrategyType::MaximizeConversionValue => {
                self.maximize_conversion_value?.target_roas
            }
            BiddingStrategyType::TargetCpa => micros_to_units(self.target_cpa?.target_cpa_micros),
            BiddingStrategyType::MaximizeConversions => {
                micros_to_units(self.maximize_conversions?.target_cpa_micros)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub bidding_strategy_type: BiddingStrategyType,
    #[serde(flatten)]
    pub schemes: BiddingSchemes,
}

/// Ad groups inherit their strategy from the campaign and expose the
/// effective target directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdGroup {
    pub id: String,
    pub name: String,
    pub bidding_strategy_type: BiddingStrategyType,
    #[serde(default)]
    pub effective_target_roas: Option<f64>,
    #[serde(default)]
    pub effective_target_cpa_micros: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioStrategy {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub strategy_type: BiddingStrategyType,
    #[serde(flatten)]
    pub schemes: BiddingSchemes,
}

/// An entity whose bid target can be optimized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BiddingEntity {
    Campaign(Campaign),
    AdGroup(AdGroup),
    PortfolioStrategy(PortfolioStrategy),
}

impl BiddingEntity {
    pub fn id(&self) -> &str {
        match self {
            BiddingEntity::Campaign(c) => &c.id,
            BiddingEntity::AdGroup(g) => &g.id,
            BiddingEntity::PortfolioStrategy(p) => &p.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            BiddingEntity::Campaign(c) => &c.name,
            BiddingEntity::AdGroup(g) => &g.name,
            BiddingEntity::PortfolioStrategy(p) => &p.name,
        }
    }

    pub fn strategy_type(&self) -> BiddingStrategyType {
        match self {
            BiddingEntity::Campaign(c) => c.bidding_strategy_type,
            BiddingEntity::AdGroup(g) => g.bidding_strategy_type,
            BiddingEntity::PortfolioStrategy(p) => p.strategy_type,
        }
    }

    pub fn strategy_family(&self) -> StrategyFamily {
        self.strategy_type().family()
    }

    /// Current bid target in optimizer units (ratio or currency units).
    ///
    /// Returns `None` when the entity does not carry a target for its
    /// strategy type, e.g. a "maximize" strategy without a target set.
    pub fn current_target(&self) -> Option<f64> {
        match self {
            BiddingEntity::Campaign(c) => campaign_target(c),
            BiddingEntity::AdGroup(g) => ad_group_target(g),
            BiddingEntity::PortfolioStrategy(p) => portfolio_target(p),
        }
    }
}

fn campaign_target(campaign: &Campaign) -> Option<f64> {
    campaign.schemes.target_for(campaign.bidding_strategy_type)
}

fn ad_group_target(ad_group: &AdGroup) -> Option<f64> {
    match ad_group.bidding_strategy_type.family() {
        StrategyFamily::ReturnOnSpend => ad_group.effective_target_roas,
        StrategyFamily::CostPerAcquisition => micros_to_units(ad_group.effective_target_cpa_micros),
    }
}

fn portfolio_target(strategy: &PortfolioStrategy) -> Option<f64> {
    strategy.schemes.target_for(strategy.strategy_type)
}

fn micros_to_units(micros: Option<f64>) -> Option<f64> {
    micros.map(|m| m / MICROS_PER_UNIT)
}

/// One entity with the simulation points fetched for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySimulation {
    pub entity: BiddingEntity,
    #[serde(default)]
    pub points: Vec<SimulationPoint>,
}

impl EntitySimulation {
    pub fn new(entity: BiddingEntity, points: Vec<SimulationPoint>) -> Self {
        Self { entity, points }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Deserialization of provider JSON for each entity kind.
    // - Current-target extraction per kind, including micros conversion and
    //   missing targets.
    // - Strategy type to family mapping.
    // -------------------------------------------------------------------------

    #[test]
    fn simulation_point_reads_camel_case_and_defaults_missing_fields() {
        let point: SimulationPoint = serde_json::from_str(
            r#"{"target": 4.0, "biddableConversions": 12.5, "biddableConversionsValue": 640.0,
                "clicks": 310, "costMicros": 150000000, "impressions": 9000}"#,
        )
        .unwrap();
        assert_eq!(point.target, 4.0);
        assert_eq!(point.biddable_conversions_value, 640.0);
        assert_eq!(point.cost_micros, 150_000_000.0);
        assert_eq!(point.top_slot_impressions, 0.0);
    }

    #[test]
    fn campaign_target_roas_is_read_from_matching_scheme() {
        let entity: BiddingEntity = serde_json::from_str(
            r#"{"kind": "campaign", "id": "11", "name": "Brand",
                "biddingStrategyType": "TARGET_ROAS", "targetRoas": {"targetRoas": 4.0}}"#,
        )
        .unwrap();
        assert_eq!(entity.id(), "11");
        assert_eq!(entity.strategy_family(), StrategyFamily::ReturnOnSpend);
        assert_eq!(entity.current_target(), Some(4.0));
    }

    #[test]
    fn cpa_targets_are_converted_from_micros() {
        let campaign = BiddingEntity::Campaign(Campaign {
            id: "12".into(),
            name: "Leads".into(),
            bidding_strategy_type: BiddingStrategyType::MaximizeConversions,
            schemes: BiddingSchemes {
                maximize_conversions: Some(CpaScheme { target_cpa_micros: Some(42_500_000.0) }),
                ..BiddingSchemes::default()
            },
        });
        assert_relative_eq!(campaign.current_target().unwrap(), 42.5);

        let ad_group = BiddingEntity::AdGroup(AdGroup {
            id: "13".into(),
            name: "Leads / generic".into(),
            bidding_strategy_type: BiddingStrategyType::TargetCpa,
            effective_target_roas: None,
            effective_target_cpa_micros: Some(7_000_000.0),
        });
        assert_relative_eq!(ad_group.current_target().unwrap(), 7.0);
    }

    #[test]
    fn portfolio_strategy_reads_type_field() {
        let entity: BiddingEntity = serde_json::from_str(
            r#"{"kind": "portfolioStrategy", "id": "14", "name": "Shared ROAS",
                "type": "MAXIMIZE_CONVERSION_VALUE",
                "maximizeConversionValue": {"targetRoas": 3.5}}"#,
        )
        .unwrap();
        assert_eq!(entity.strategy_type(), BiddingStrategyType::MaximizeConversionValue);
        assert_eq!(entity.current_target(), Some(3.5));
    }

    #[test]
    fn scheme_of_another_strategy_type_is_ignored() {
        // Purpose
        // -------
        // A campaign that switched strategies may still carry the old scheme
        // block; only the block of the current strategy type counts.
        let entity = BiddingEntity::Campaign(Campaign {
            id: "15".into(),
            name: "Switched".into(),
            bidding_strategy_type: BiddingStrategyType::MaximizeConversionValue,
            schemes: BiddingSchemes {
                target_roas: Some(RoasScheme { target_roas: Some(6.0) }),
                ..BiddingSchemes::default()
            },
        });
        assert_eq!(entity.current_target(), None);
    }

    #[test]
    fn entity_simulation_deserializes_with_points() {
        let sim: EntitySimulation = serde_json::from_str(
            r#"{"entity": {"kind": "adGroup", "id": "16", "name": "Shoes",
                           "biddingStrategyType": "TARGET_ROAS", "effectiveTargetRoas": 5.0},
                "points": [{"target": 4.0, "clicks": 100}, {"target": 5.0, "clicks": 80}]}"#,
        )
        .unwrap();
        assert_eq!(sim.points.len(), 2);
        assert_eq!(sim.entity.current_target(), Some(5.0));
    }
}
