//! Profit and margin summary for a crew composition.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PlanningConfig;
use crate::error::EngineResult;
use crate::models::{CrewComposition, Scenario};

use super::capacity::{CapacityResult, capacity, percentage_of};

/// Financial outcome of a composition under one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioFinancials {
    /// Revenue scenario.
    pub scenario: Scenario,
    /// Capacity figures the summary is derived from.
    pub capacity: CapacityResult,
    /// Seasonal revenue.
    pub total_seasonal_revenue: Decimal,
    /// Crew leader labor cost.
    pub total_labor_cost: Decimal,
    /// Materials at the configured share of revenue.
    pub material_cost: Decimal,
    /// Overhead at the configured share of revenue.
    pub operating_costs: Decimal,
    /// Labor plus materials.
    pub direct_costs: Decimal,
    /// Revenue minus direct costs.
    pub gross_profit: Decimal,
    /// Gross profit minus operating costs.
    pub net_profit: Decimal,
    /// Gross profit as a percentage of revenue.
    pub gross_margin: Decimal,
    /// Net profit as a percentage of revenue.
    pub net_margin: Decimal,
}

/// Financial outcome of a composition under every scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialSummary {
    /// The composition evaluated.
    pub composition: CrewComposition,
    /// One entry per scenario, worst case first.
    pub scenarios: Vec<ScenarioFinancials>,
}

/// Builds the profit and margin summary for `composition`.
///
/// # Example
///
/// ```
/// use crew_planner::calculation::financial_summary;
/// use crew_planner::config::PlanningConfig;
/// use crew_planner::models::CrewComposition;
///
/// let summary = financial_summary(&CrewComposition::new(1, 1, 2, 0), &PlanningConfig::default()).unwrap();
/// assert_eq!(summary.scenarios.len(), 3);
/// ```
pub fn financial_summary(
    composition: &CrewComposition,
    config: &PlanningConfig,
) -> EngineResult<FinancialSummary> {
    let scenarios = Scenario::ALL
        .into_iter()
        .map(|scenario| {
            let capacity = capacity(composition, scenario, config)?;
            Ok(scenario_financials(scenario, capacity, config))
        })
        .collect::<EngineResult<Vec<_>>>()?;

    Ok(FinancialSummary {
        composition: *composition,
        scenarios,
    })
}

fn scenario_financials(
    scenario: Scenario,
    capacity: CapacityResult,
    config: &PlanningConfig,
) -> ScenarioFinancials {
    let total_seasonal_revenue = capacity.total_seasonal_revenue;
    let total_labor_cost = capacity.total_labor_cost;
    let material_cost = total_seasonal_revenue * config.financials.material_cost_percentage;
    let operating_costs = total_seasonal_revenue * config.financials.operating_cost_percentage;
    let direct_costs = total_labor_cost + material_cost;
    let gross_profit = total_seasonal_revenue - direct_costs;
    let net_profit = gross_profit - operating_costs;

    ScenarioFinancials {
        scenario,
        capacity,
        total_seasonal_revenue,
        total_labor_cost,
        material_cost,
        operating_costs,
        direct_costs,
        gross_profit,
        net_profit,
        gross_margin: percentage_of(gross_profit, total_seasonal_revenue),
        net_margin: percentage_of(net_profit, total_seasonal_revenue),
    }
}
