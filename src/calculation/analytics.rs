//! Planning analytics built on the capacity calculator.
//!
//! Covers an efficiency matrix over many compositions, a revenue
//! sensitivity sweep, a side-by-side comparison of named compositions, the
//! best composition for each of several revenue targets, and an efficiency
//! ranking of preset compositions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PlanningConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{CrewComposition, Scenario};

use super::capacity::{CapacityResult, capacity, percentage_of, ratio_or_zero};
use super::recommendation::{SearchBounds, recommend_crews};

/// Most revenue targets one optimal crew size request may evaluate.
pub const MAX_REVENUE_TARGETS: usize = 20;

/// One composition in the capacity matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixEntry {
    /// The composition.
    pub composition: CrewComposition,
    /// Sum of crews across tiers.
    pub total_crews: u32,
    /// Seasonal revenue.
    pub total_seasonal_revenue: Decimal,
    /// Crew leader labor cost.
    pub total_labor_cost: Decimal,
    /// Labor as a percentage of revenue.
    pub labor_percentage: Decimal,
    /// Revenue per dollar of labor.
    pub efficiency_score: Decimal,
}

/// Ranks every composition inside `bounds` by efficiency, best first.
///
/// Equal scores keep enumeration order. `bounds.top_n` caps the result.
pub fn capacity_matrix(
    scenario: Scenario,
    bounds: &SearchBounds,
    config: &PlanningConfig,
) -> EngineResult<Vec<MatrixEntry>> {
    bounds.validate()?;

    let mut entries = bounds
        .compositions()
        .into_iter()
        .map(|composition| {
            let result = capacity(&composition, scenario, config)?;
            Ok(MatrixEntry {
                composition,
                total_crews: result.total_crews,
                efficiency_score: ratio_or_zero(
                    result.total_seasonal_revenue,
                    result.total_labor_cost,
                ),
                total_seasonal_revenue: result.total_seasonal_revenue,
                total_labor_cost: result.total_labor_cost,
                labor_percentage: result.labor_percentage,
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    entries.sort_by(|a, b| b.efficiency_score.cmp(&a.efficiency_score));
    entries.truncate(bounds.top_n);
    Ok(entries)
}

/// Default bounds for the capacity matrix: up to five crews per level, ten
/// in total, fifty results.
pub fn matrix_bounds() -> SearchBounds {
    SearchBounds {
        top_n: 50,
        ..SearchBounds::default()
    }
}

/// Revenue scaled by one multiplier with labor held fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    /// Factor applied to seasonal revenue.
    pub performance_multiplier: Decimal,
    /// Scaled revenue.
    pub revenue: Decimal,
    /// Unscaled labor cost.
    pub labor_cost: Decimal,
    /// Labor as a percentage of scaled revenue.
    pub labor_percentage: Decimal,
    /// Scaled revenue minus labor.
    pub profit: Decimal,
}

/// Sensitivity sweep for one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSensitivity {
    /// Revenue scenario.
    pub scenario: Scenario,
    /// One point per multiplier, ascending.
    pub points: Vec<SensitivityPoint>,
}

/// Sensitivity sweep across all scenarios.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitivityAnalysis {
    /// The composition evaluated.
    pub composition: CrewComposition,
    /// Worst, base and best case sweeps.
    pub scenarios: Vec<ScenarioSensitivity>,
}

/// Multipliers swept by [`sensitivity_analysis`]: 0.7 to 1.3 in steps of 0.1.
pub fn sensitivity_multipliers() -> Vec<Decimal> {
    (7..=13).map(|tenths| Decimal::new(tenths, 1)).collect()
}

/// Scales each scenario's seasonal revenue by 0.7 to 1.3 while holding
/// labor cost, showing how profit and labor share move with performance.
///
/// # Example
///
/// ```
/// use crew_planner::calculation::sensitivity_analysis;
/// use crew_planner::config::PlanningConfig;
/// use crew_planner::models::CrewComposition;
///
/// let analysis = sensitivity_analysis(&CrewComposition::new(1, 1, 2, 0), &PlanningConfig::default()).unwrap();
/// assert_eq!(analysis.scenarios.len(), 3);
/// assert_eq!(analysis.scenarios[0].points.len(), 7);
/// ```
pub fn sensitivity_analysis(
    composition: &CrewComposition,
    config: &PlanningConfig,
) -> EngineResult<SensitivityAnalysis> {
    let scenarios = Scenario::ALL
        .into_iter()
        .map(|scenario| {
            let result = capacity(composition, scenario, config)?;
            let points = sensitivity_multipliers()
                .into_iter()
                .map(|multiplier| {
                    let revenue = result.total_seasonal_revenue * multiplier;
                    SensitivityPoint {
                        performance_multiplier: multiplier,
                        revenue,
                        labor_cost: result.total_labor_cost,
                        labor_percentage: percentage_of(result.total_labor_cost, revenue),
                        profit: revenue - result.total_labor_cost,
                    }
                })
                .collect();
            Ok(ScenarioSensitivity { scenario, points })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    Ok(SensitivityAnalysis {
        composition: *composition,
        scenarios,
    })
}

/// A composition with an optional display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedComposition {
    /// Display name; generated from the position when absent.
    #[serde(default)]
    pub name: Option<String>,
    /// Crew counts.
    #[serde(flatten)]
    pub composition: CrewComposition,
}

/// Capacity of one named composition under the compared scenarios.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparedComposition {
    /// Display name.
    pub name: String,
    /// One result per compared scenario, in request order.
    pub results: Vec<CapacityResult>,
}

/// Compares several compositions across scenarios.
///
/// An empty `scenarios` slice compares all three. Unnamed compositions are
/// called "Composition N" by their 1-based position.
///
/// # Errors
///
/// Returns a validation error if no compositions are given or any of them
/// has no crews.
pub fn compare_scenarios(
    compositions: &[NamedComposition],
    scenarios: &[Scenario],
    config: &PlanningConfig,
) -> EngineResult<Vec<ComparedComposition>> {
    if compositions.is_empty() {
        return Err(EngineError::validation(
            "compositions",
            "at least one composition is required",
        ));
    }
    let scenarios: &[Scenario] = if scenarios.is_empty() {
        &Scenario::ALL
    } else {
        scenarios
    };

    compositions
        .iter()
        .enumerate()
        .map(|(index, named)| {
            let results = scenarios
                .iter()
                .map(|scenario| capacity(&named.composition, *scenario, config))
                .collect::<EngineResult<Vec<_>>>()?;
            Ok(ComparedComposition {
                name: named
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("Composition {}", index + 1)),
                results,
            })
        })
        .collect()
}

/// Targets evaluated by [`optimal_crew_sizes`] when none are given.
pub fn default_revenue_targets() -> Vec<Decimal> {
    [1_000_000, 1_200_000, 1_500_000, 1_800_000, 2_000_000]
        .into_iter()
        .map(Decimal::from)
        .collect()
}

/// The best composition found for one revenue target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimalCrewSize {
    /// Revenue the search aimed for.
    pub target_revenue: Decimal,
    /// Top-ranked composition.
    pub recommended_composition: CrewComposition,
    /// Seasonal revenue of that composition.
    pub projected_revenue: Decimal,
    /// Sum of crews across tiers.
    pub total_crews: u32,
    /// Crew leader labor cost.
    pub labor_cost: Decimal,
    /// Labor as a percentage of revenue.
    pub labor_percentage: Decimal,
    /// Gap to the target as a percentage of the target.
    pub revenue_gap_pct: Decimal,
    /// Revenue per dollar of labor.
    pub efficiency_score: Decimal,
}

/// Runs the default recommendation search once per target and keeps the
/// top result of each, in target order.
///
/// An empty `targets` slice evaluates [`default_revenue_targets`].
///
/// # Errors
///
/// Returns a validation error for more than [`MAX_REVENUE_TARGETS`]
/// targets or for any target the recommendation search rejects.
pub fn optimal_crew_sizes(
    targets: &[Decimal],
    scenario: Scenario,
    config: &PlanningConfig,
) -> EngineResult<Vec<OptimalCrewSize>> {
    if targets.len() > MAX_REVENUE_TARGETS {
        return Err(EngineError::validation(
            "revenue_targets",
            format!(
                "at most {} targets can be evaluated, got {}",
                MAX_REVENUE_TARGETS,
                targets.len()
            ),
        ));
    }
    let targets = if targets.is_empty() {
        default_revenue_targets()
    } else {
        targets.to_vec()
    };
    let bounds = SearchBounds {
        top_n: 1,
        ..SearchBounds::default()
    };

    let mut results = Vec::with_capacity(targets.len());
    for target in targets {
        let best = recommend_crews(target, scenario, &bounds, config)?.into_iter().next();
        if let Some(best) = best {
            results.push(OptimalCrewSize {
                target_revenue: target,
                recommended_composition: best.composition,
                projected_revenue: best.capacity.total_seasonal_revenue,
                total_crews: best.capacity.total_crews,
                labor_cost: best.capacity.total_labor_cost,
                labor_percentage: best.capacity.labor_percentage,
                revenue_gap_pct: best.revenue_gap_pct,
                efficiency_score: best.efficiency_score,
            });
        }
    }
    Ok(results)
}

/// Preset compositions ranked by [`crew_efficiency_analysis`].
pub fn efficiency_presets() -> Vec<NamedComposition> {
    [
        ("All Beginners", CrewComposition::new(0, 0, 0, 6)),
        ("Mixed Low", CrewComposition::new(0, 1, 2, 3)),
        ("Balanced", CrewComposition::new(1, 2, 2, 1)),
        ("Mixed High", CrewComposition::new(2, 2, 1, 0)),
        ("All Experts", CrewComposition::new(4, 0, 0, 0)),
    ]
    .into_iter()
    .map(|(name, composition)| NamedComposition {
        name: Some(name.to_string()),
        composition,
    })
    .collect()
}

/// Per-crew revenue and cost of one preset composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionEfficiency {
    /// Preset name.
    pub composition_name: String,
    /// Sum of crews across tiers.
    pub total_crews: u32,
    /// Seasonal revenue.
    pub total_revenue: Decimal,
    /// Crew leader labor cost.
    pub total_labor_cost: Decimal,
    /// Revenue divided by crews.
    pub revenue_per_crew: Decimal,
    /// Labor cost divided by crews.
    pub cost_per_crew: Decimal,
    /// Revenue per crew over cost per crew; zero with no cost.
    pub efficiency_ratio: Decimal,
    /// Labor as a percentage of revenue.
    pub labor_percentage: Decimal,
    /// Crew counts.
    pub composition: CrewComposition,
}

/// Ranks the [`efficiency_presets`] by efficiency ratio, best first.
///
/// Equal ratios keep preset order.
///
/// # Example
///
/// ```
/// use crew_planner::calculation::crew_efficiency_analysis;
/// use crew_planner::config::PlanningConfig;
/// use crew_planner::models::Scenario;
///
/// let ranked = crew_efficiency_analysis(Scenario::BaseCase, &PlanningConfig::default()).unwrap();
/// assert_eq!(ranked.len(), 5);
/// assert!(ranked[0].efficiency_ratio >= ranked[4].efficiency_ratio);
/// ```
pub fn crew_efficiency_analysis(
    scenario: Scenario,
    config: &PlanningConfig,
) -> EngineResult<Vec<CompositionEfficiency>> {
    let mut results = efficiency_presets()
        .into_iter()
        .map(|preset| {
            let result = capacity(&preset.composition, scenario, config)?;
            let crews = Decimal::from(result.total_crews);
            let revenue_per_crew = ratio_or_zero(result.total_seasonal_revenue, crews);
            let cost_per_crew = ratio_or_zero(result.total_labor_cost, crews);
            Ok(CompositionEfficiency {
                composition_name: preset.name.unwrap_or_default(),
                total_crews: result.total_crews,
                total_revenue: result.total_seasonal_revenue,
                total_labor_cost: result.total_labor_cost,
                revenue_per_crew,
                cost_per_crew,
                efficiency_ratio: ratio_or_zero(revenue_per_crew, cost_per_crew),
                labor_percentage: result.labor_percentage,
                composition: preset.composition,
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    results.sort_by(|a, b| b.efficiency_ratio.cmp(&a.efficiency_ratio));
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_matrix_sorted_by_efficiency() {
        let config = PlanningConfig::default();
        let entries = capacity_matrix(Scenario::BaseCase, &matrix_bounds(), &config).unwrap();

        assert_eq!(entries.len(), 50);
        for pair in entries.windows(2) {
            assert!(pair[0].efficiency_score >= pair[1].efficiency_score);
        }
    }

    #[test]
    fn test_matrix_respects_total_bound() {
        let config = PlanningConfig::default();
        let bounds = SearchBounds {
            max_per_level: 2,
            min_total_crews: 1,
            max_total_crews: 3,
            top_n: 1000,
        };
        let entries = capacity_matrix(Scenario::WorstCase, &bounds, &config).unwrap();

        assert!(entries.iter().all(|e| (1..=3).contains(&e.total_crews)));
        // 3^4 compositions minus the empty one and those above 3 crews
        assert_eq!(entries.len(), bounds.compositions().len());
    }

    #[test]
    fn test_sensitivity_holds_labor_cost() {
        let config = PlanningConfig::default();
        let analysis = sensitivity_analysis(&CrewComposition::new(1, 0, 0, 0), &config).unwrap();
        let base = &analysis.scenarios[1];

        assert_eq!(base.scenario, Scenario::BaseCase);
        assert_eq!(base.points[0].performance_multiplier, dec("0.7"));
        assert_eq!(base.points[6].performance_multiplier, dec("1.3"));
        assert!(base.points.iter().all(|p| p.labor_cost == dec("60300")));
        // 465000 * 0.7
        assert_eq!(base.points[0].revenue, dec("325500"));
        assert_eq!(base.points[3].profit, dec("404700"));
    }

    #[test]
    fn test_sensitivity_requires_crews() {
        let config = PlanningConfig::default();
        assert!(sensitivity_analysis(&CrewComposition::default(), &config).is_err());
    }

    #[test]
    fn test_compare_defaults_to_all_scenarios_and_names() {
        let config = PlanningConfig::default();
        let compositions = vec![
            NamedComposition {
                name: Some("Lean".to_string()),
                composition: CrewComposition::new(2, 0, 0, 0),
            },
            NamedComposition {
                name: None,
                composition: CrewComposition::new(0, 1, 2, 3),
            },
        ];

        let compared = compare_scenarios(&compositions, &[], &config).unwrap();

        assert_eq!(compared[0].name, "Lean");
        assert_eq!(compared[1].name, "Composition 2");
        assert_eq!(compared[0].results.len(), 3);
        assert_eq!(compared[0].results[2].scenario, Scenario::BestCase);
    }

    #[test]
    fn test_compare_selected_scenarios() {
        let config = PlanningConfig::default();
        let compositions = vec![NamedComposition {
            name: None,
            composition: CrewComposition::new(1, 0, 0, 0),
        }];

        let compared =
            compare_scenarios(&compositions, &[Scenario::BestCase], &config).unwrap();
        assert_eq!(compared[0].results.len(), 1);
        assert_eq!(compared[0].results[0].total_seasonal_revenue, dec("510000"));
    }

    #[test]
    fn test_compare_rejects_empty_input() {
        let config = PlanningConfig::default();
        assert!(compare_scenarios(&[], &[], &config).is_err());
    }

    #[test]
    fn test_named_composition_deserializes_flat() {
        let named: NamedComposition =
            serde_json::from_str(r#"{"name": "Mixed", "expert_crews": 1, "beginner_crews": 2}"#)
                .unwrap();
        assert_eq!(named.composition, CrewComposition::new(1, 0, 0, 2));
    }

    #[test]
    fn test_optimal_crew_size_per_target() {
        let config = PlanningConfig::default();
        let targets = vec![dec("465000"), dec("930000")];

        let results = optimal_crew_sizes(&targets, Scenario::BaseCase, &config).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].target_revenue, dec("465000"));
        assert_eq!(results[0].recommended_composition, CrewComposition::new(1, 0, 0, 0));
        assert_eq!(results[0].projected_revenue, dec("465000"));
        assert_eq!(results[0].labor_cost, dec("60300"));
        assert_eq!(results[0].revenue_gap_pct, Decimal::ZERO);
        assert_eq!(results[1].recommended_composition, CrewComposition::new(2, 0, 0, 0));
        assert_eq!(results[1].total_crews, 2);
    }

    #[test]
    fn test_optimal_crew_size_defaults_targets() {
        let config = PlanningConfig::default();
        let results = optimal_crew_sizes(&[], Scenario::BaseCase, &config).unwrap();

        let targets: Vec<Decimal> = results.iter().map(|r| r.target_revenue).collect();
        assert_eq!(targets, default_revenue_targets());
    }

    #[test]
    fn test_optimal_crew_size_rejects_bad_targets() {
        let config = PlanningConfig::default();
        let result = optimal_crew_sizes(&[dec("1000000"), dec("-1")], Scenario::BaseCase, &config);
        assert!(matches!(result, Err(EngineError::Validation { .. })));

        let too_many = vec![dec("1000000"); MAX_REVENUE_TARGETS + 1];
        let result = optimal_crew_sizes(&too_many, Scenario::BaseCase, &config);
        assert!(matches!(
            result,
            Err(EngineError::Validation { ref field, .. }) if field == "revenue_targets"
        ));
    }

    #[test]
    fn test_efficiency_presets_ranked_by_ratio() {
        let config = PlanningConfig::default();
        let ranked = crew_efficiency_analysis(Scenario::BaseCase, &config).unwrap();

        let names: Vec<&str> = ranked.iter().map(|r| r.composition_name.as_str()).collect();
        assert_eq!(
            names,
            vec!["All Experts", "Mixed High", "Balanced", "Mixed Low", "All Beginners"]
        );
        for pair in ranked.windows(2) {
            assert!(pair[0].efficiency_ratio >= pair[1].efficiency_ratio);
        }
    }

    #[test]
    fn test_efficiency_per_crew_figures() {
        let config = PlanningConfig::default();
        let ranked = crew_efficiency_analysis(Scenario::BaseCase, &config).unwrap();
        let experts = &ranked[0];

        assert_eq!(experts.composition, CrewComposition::new(4, 0, 0, 0));
        assert_eq!(experts.total_crews, 4);
        assert_eq!(experts.total_revenue, dec("1860000"));
        assert_eq!(experts.revenue_per_crew, dec("465000"));
        assert_eq!(experts.cost_per_crew, dec("60300"));

        let beginners = &ranked[4];
        assert_eq!(beginners.total_crews, 6);
        assert_eq!(beginners.cost_per_crew, dec("29200"));
    }
}
