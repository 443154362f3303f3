//! Integration tests for the crew planner HTTP API.
//!
//! This test suite drives the router end to end:
//! - Configuration reads and updates
//! - Compensation, capacity and break-even
//! - Crew recommendations and financial summaries
//! - Installer tracking, the revenue dashboard and capacity analysis
//! - Analytics endpoints, optimal crew sizes and preset efficiency
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use crew_planner::api::{AppState, create_router};
use crew_planner::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    AppState::from_config(config.into_config()).expect("Default config should be valid")
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Reads a decimal field that may be serialized as a string or a number.
fn decimal_at(value: &Value) -> Decimal {
    match value {
        Value::String(s) => decimal(s),
        Value::Number(n) => decimal(&n.to_string()),
        other => panic!("Expected decimal, got {}", other),
    }
}

fn assert_decimal(value: &Value, expected: &str) {
    assert_eq!(
        decimal_at(value),
        decimal(expected),
        "Expected {}, got {}",
        expected,
        value
    );
}

async fn send(router: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    send(router, "GET", uri, None).await
}

async fn post(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(router, "POST", uri, Some(body)).await
}

fn assert_success(status: StatusCode, body: &Value) {
    assert_eq!(status, StatusCode::OK, "Unexpected response: {}", body);
    assert_eq!(body["success"], true);
}

fn assert_error(status: StatusCode, body: &Value, expected_status: StatusCode, code: &str) {
    assert_eq!(status, expected_status, "Unexpected response: {}", body);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], code);
    assert!(body["message"].is_string());
}

// =============================================================================
// SECTION 1: Configuration
// =============================================================================

#[tokio::test]
async fn test_get_config_returns_all_sections() {
    let (status, body) = get(create_router_for_test(), "/config").await;

    assert_success(status, &body);
    let data = &body["data"];
    assert_eq!(data["seasons"]["in_season"]["start_date"], "2025-09-29");
    assert_decimal(&data["experience_levels"]["expert"]["per_diem_rate"], "300");
    assert_decimal(&data["sliding_scale"]["base_percentage"], "0.10");
    assert_decimal(&data["labor"]["hours_per_day"], "12");
    assert_decimal(&data["revenue_targets"]["base_case"], "1500000");
}

#[tokio::test]
async fn test_partial_config_update_keeps_other_sections() {
    let router = create_router_for_test();

    let (status, body) = send(
        router.clone(),
        "PUT",
        "/config",
        Some(json!({
            "labor": {
                "total_labor_percentage": "0.25",
                "junior_hourly_rate_min": "18",
                "junior_hourly_rate_max": "25",
                "hours_per_day": "10"
            }
        })),
    )
    .await;
    assert_success(status, &body);
    assert_decimal(&body["data"]["labor"]["hours_per_day"], "10");

    let (_, body) = get(router, "/config").await;
    assert_decimal(&body["data"]["labor"]["total_labor_percentage"], "0.25");
    assert_decimal(&body["data"]["experience_levels"]["beginner"]["per_diem_rate"], "200");
}

#[tokio::test]
async fn test_invalid_config_update_is_rejected_and_not_applied() {
    let router = create_router_for_test();

    let (status, body) = send(
        router.clone(),
        "PUT",
        "/config",
        Some(json!({
            "sliding_scale": {
                "base_percentage": "0.10",
                "max_percentage": "0.15",
                "thresholds": [
                    { "performance_ratio": "1.2", "bonus_percentage": "0.12" },
                    { "performance_ratio": "1.1", "bonus_percentage": "0.11" }
                ]
            }
        })),
    )
    .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");

    let (_, body) = get(router, "/config").await;
    let thresholds = body["data"]["sliding_scale"]["thresholds"].as_array().unwrap();
    assert_eq!(thresholds.len(), 6);
}

#[tokio::test]
async fn test_revenue_goals_round_trip_through_store() {
    let router = create_router_for_test();

    let (status, body) = post(
        router.clone(),
        "/revenue-goals",
        json!({ "worst_case": "1000000", "base_case": "1250000", "best_case": "1600000" }),
    )
    .await;
    assert_success(status, &body);

    let (status, body) = get(router, "/revenue-goals").await;
    assert_success(status, &body);
    assert_decimal(&body["data"]["base_case"], "1250000");
}

#[tokio::test]
async fn test_revenue_goals_out_of_order_rejected() {
    let router = create_router_for_test();

    let (status, body) = post(
        router.clone(),
        "/revenue-goals",
        json!({ "worst_case": "2000000", "base_case": "1500000", "best_case": "1800000" }),
    )
    .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
    assert_eq!(body["details"], "revenue_targets");

    // Previous goals remain in effect
    let (_, body) = get(router, "/revenue-goals").await;
    assert_decimal(&body["data"]["worst_case"], "1200000");
}

// =============================================================================
// SECTION 2: Compensation
// =============================================================================

#[tokio::test]
async fn test_compensation_for_explicit_phases() {
    // Expert: 20 days at $300, 12 in-season days at $7,750
    // Gross bonus 10% of $93,000 = $9,300, less 18 production days at $300
    let (status, body) = post(
        create_router_for_test(),
        "/compensation",
        json!({
            "experience_level": "expert",
            "scenario": "base_case",
            "phases": {
                "pre_season": 2,
                "in_season": 12,
                "post_season": 6,
                "off_season": 0
            }
        }),
    )
    .await;

    assert_success(status, &body);
    let data = &body["data"];
    assert_decimal(&data["total_base_pay"], "6000");
    assert_decimal(&data["in_season_revenue"], "93000");
    assert_decimal(&data["production_days_per_diem"], "5400");
    assert_decimal(&data["net_production_bonus"], "3900");
    assert_decimal(&data["total_compensation"], "9900");
    assert_decimal(&data["effective_hourly_rate"], "41.25");
    assert_eq!(data["audit_trace"]["steps"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_crew_leader_full_season_expert() {
    // 146 working days: 30 pre, 60 in, 40 post, 16 off
    let (status, body) = get(create_router_for_test(), "/compensation/expert/base_case").await;

    assert_success(status, &body);
    let data = &body["data"];
    assert_eq!(data["total_days"], 146);
    assert_decimal(&data["total_base_pay"], "43800");
    assert_decimal(&data["in_season_revenue"], "465000");
    assert_decimal(&data["net_production_bonus"], "16500");
    assert_decimal(&data["total_compensation"], "60300");
    assert_decimal(&data["effective_hourly_rate"], "34.42");
}

#[tokio::test]
async fn test_crew_leader_beginner_bonus_floored_at_zero() {
    // $19,500 gross bonus does not cover 100 production days at $200
    let (status, body) = get(create_router_for_test(), "/compensation/beginner/base").await;

    assert_success(status, &body);
    assert_decimal(&body["data"]["net_production_bonus"], "0");
    assert_decimal(&body["data"]["total_compensation"], "29200");
}

#[tokio::test]
async fn test_crew_leader_multiplier_raises_bonus_tier() {
    let (status, body) = get(
        create_router_for_test(),
        "/compensation/expert/base_case?performance_multiplier=1.2",
    )
    .await;

    assert_success(status, &body);
    assert_decimal(&body["data"]["bonus_percentage"], "0.12");
    assert_decimal(&body["data"]["daily_revenue"], "9300");
}

#[tokio::test]
async fn test_crew_leader_rejects_non_positive_multiplier() {
    let (status, body) = get(
        create_router_for_test(),
        "/compensation/expert/base_case?performance_multiplier=0",
    )
    .await;

    assert_error(status, &body, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_crew_leader_unknown_level() {
    let (status, body) = get(create_router_for_test(), "/compensation/master/base_case").await;

    assert_error(status, &body, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_compensation_all_returns_every_level_and_scenario() {
    let (status, body) = post(create_router_for_test(), "/compensation/all", json!({})).await;

    assert_success(status, &body);
    let results = body["data"].as_array().unwrap();
    assert_eq!(results.len(), 12);
    assert_eq!(results[0]["experience_level"], "beginner");
    assert_eq!(results[0]["scenario"], "worst_case");
    assert_eq!(results[11]["experience_level"], "expert");
    assert_eq!(results[11]["scenario"], "best_case");
}

#[tokio::test]
async fn test_compensation_rejects_negative_multiplier() {
    let (status, body) = post(
        create_router_for_test(),
        "/compensation",
        json!({
            "experience_level": "expert",
            "revenue_multiplier": "-1",
            "phases": { "pre_season": 0, "in_season": 10, "post_season": 0, "off_season": 0 }
        }),
    )
    .await;

    assert_error(status, &body, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
    assert_eq!(body["details"], "revenue_multiplier");
}

#[tokio::test]
async fn test_compensation_rejects_huge_multiplier() {
    let (status, body) = post(
        create_router_for_test(),
        "/compensation",
        json!({
            "experience_level": "expert",
            "revenue_multiplier": "10000000000000000000000000",
            "phases": { "pre_season": 0, "in_season": 60, "post_season": 0, "off_season": 0 }
        }),
    )
    .await;

    assert_error(status, &body, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
    assert_eq!(body["details"], "revenue_multiplier");
}

#[tokio::test]
async fn test_compensation_rejects_negative_performance_ratio() {
    let (status, body) = post(
        create_router_for_test(),
        "/compensation",
        json!({
            "experience_level": "advanced",
            "performance_ratio": "-0.2",
            "phases": { "pre_season": 0, "in_season": 10, "post_season": 0, "off_season": 0 }
        }),
    )
    .await;

    assert_error(status, &body, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
    assert_eq!(body["details"], "performance_ratio");
}

#[tokio::test]
async fn test_compensation_rejects_oversized_phases() {
    let (status, body) = post(
        create_router_for_test(),
        "/compensation",
        json!({
            "experience_level": "expert",
            "phases": {
                "pre_season": 1,
                "in_season": 4294967295u32,
                "post_season": 0,
                "off_season": 0
            }
        }),
    )
    .await;

    assert_error(status, &body, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
    assert_eq!(body["details"], "phases");
}

// =============================================================================
// SECTION 3: Capacity and Break-Even
// =============================================================================

#[tokio::test]
async fn test_capacity_single_expert_crew() {
    let (status, body) = post(
        create_router_for_test(),
        "/capacity",
        json!({ "expert_crews": 1, "scenario": "base_case" }),
    )
    .await;

    assert_success(status, &body);
    let data = &body["data"];
    assert_eq!(data["total_crews"], 1);
    assert_eq!(data["in_season_days"], 60);
    assert_decimal(&data["total_daily_capacity"], "7750");
    assert_decimal(&data["total_seasonal_revenue"], "465000");
    assert_decimal(&data["total_labor_cost"], "60300");
    assert_decimal(&data["labor_budget"], "93000");
    assert_eq!(data["within_labor_budget"], true);
    assert_eq!(data["levels"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_capacity_empty_composition_rejected() {
    let (status, body) = post(create_router_for_test(), "/capacity", json!({})).await;

    assert_error(status, &body, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_break_even_expert() {
    // 146 days at $300 = $43,800; / 10% = $438,000; / 60 in-season days
    let (status, body) = get(create_router_for_test(), "/break-even/expert").await;

    assert_success(status, &body);
    assert_decimal(&body["data"]["total_per_diem"], "43800");
    assert_decimal(&body["data"]["break_even_revenue"], "438000");
    assert_decimal(&body["data"]["break_even_daily_revenue"], "7300");
}

#[tokio::test]
async fn test_break_even_all_levels() {
    let (status, body) = get(create_router_for_test(), "/break-even").await;

    assert_success(status, &body);
    assert_eq!(body["data"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_capacity_oversized_crew_count_rejected() {
    let (status, body) = post(
        create_router_for_test(),
        "/capacity",
        json!({ "expert_crews": 4294967295u32, "beginner_crews": 1 }),
    )
    .await;

    assert_error(status, &body, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
    assert!(body["message"].as_str().unwrap().contains("must not exceed"));
}

// =============================================================================
// SECTION 4: Recommendations and Financial Summary
// =============================================================================

#[tokio::test]
async fn test_recommend_crews_exact_match_ranks_first() {
    let (status, body) = post(
        create_router_for_test(),
        "/recommend-crews",
        json!({ "target_revenue": "465000" }),
    )
    .await;

    assert_success(status, &body);
    let ranked = body["data"].as_array().unwrap();
    assert_eq!(ranked.len(), 5);
    assert_eq!(ranked[0]["rank"], 1);
    assert_eq!(ranked[0]["composition"]["expert_crews"], 1);
    assert_eq!(ranked[0]["capacity"]["total_crews"], 1);
    assert_decimal(&ranked[0]["revenue_gap"], "0");
}

#[tokio::test]
async fn test_recommend_crews_rejects_non_positive_target() {
    let (status, body) = post(
        create_router_for_test(),
        "/recommend-crews",
        json!({ "target_revenue": "0" }),
    )
    .await;

    assert_error(status, &body, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_financial_summary_base_case() {
    let (status, body) = post(
        create_router_for_test(),
        "/financial-summary",
        json!({ "expert_crews": 1 }),
    )
    .await;

    assert_success(status, &body);
    let scenarios = body["data"]["scenarios"].as_array().unwrap();
    assert_eq!(scenarios.len(), 3);
    let base = &scenarios[1];
    assert_eq!(base["scenario"], "base_case");
    assert_decimal(&base["total_seasonal_revenue"], "465000");
    assert_decimal(&base["total_labor_cost"], "60300");
    assert_decimal(&base["material_cost"], "139500");
    assert_decimal(&base["operating_costs"], "116250");
    assert_decimal(&base["net_profit"], "148950");
}

#[tokio::test]
async fn test_recruitment_presentation_day_count() {
    let (status, body) = post(
        create_router_for_test(),
        "/recruitment/presentation",
        json!({ "experience_level": "expert", "committed_days": 10 }),
    )
    .await;

    assert_success(status, &body);
    let data = &body["data"];
    assert_eq!(data["committed_days"], 10);
    assert_eq!(data["phases"]["in_season"], 6);
    let base = &data["scenarios"]["base_case"];
    assert_decimal(&base["guaranteed_pay"], "3000");
    assert_decimal(&base["total_revenue_responsibility"], "46500");
}

#[tokio::test]
async fn test_recruitment_presentation_duplicate_dates_rejected() {
    let (status, body) = post(
        create_router_for_test(),
        "/recruitment/presentation",
        json!({
            "experience_level": "advanced",
            "committed_days": ["2025-10-01", "2025-10-01"]
        }),
    )
    .await;

    assert_error(status, &body, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_recruitment_data_for_expert() {
    let (status, body) = get(create_router_for_test(), "/recruitment-data/expert").await;

    assert_success(status, &body);
    let data = &body["data"];
    let scenarios = data["scenarios"].as_object().unwrap();
    assert_eq!(scenarios.len(), 3);

    let worst = &data["scenarios"]["worst_case"];
    assert_decimal(&worst["performance_multiplier"], "0.8");
    assert_decimal(&worst["daily_revenue"], "5600");

    let base = &data["scenarios"]["base_case"];
    assert_decimal(&base["performance_multiplier"], "1");
    assert_decimal(&base["total_compensation"], "60300");
    // $43,800 over 14.6 two-week periods
    assert_decimal(&base["bi_weekly_per_diem"], "3000");

    assert_decimal(&data["scenarios"]["best_case"]["bonus_percentage"], "0.13");
    assert_decimal(&data["break_even"]["break_even_revenue"], "438000");
    assert_decimal(&data["rates"]["per_diem_rate"], "300");
}

#[tokio::test]
async fn test_recruitment_data_unknown_level() {
    let (status, body) = get(create_router_for_test(), "/recruitment-data/master").await;

    assert_error(status, &body, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
}

// =============================================================================
// SECTION 5: Installers and Revenue Tracking
// =============================================================================

#[tokio::test]
async fn test_add_and_list_installers() {
    let router = create_router_for_test();

    let (status, body) = send(
        router.clone(),
        "POST",
        "/installers",
        Some(json!({ "name": "Ana", "experience_level": "expert", "committed_days": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["status"], "active");

    let (status, body) = get(router.clone(), "/installers").await;
    assert_success(status, &body);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = get(router, "/installers/by-experience/beginner").await;
    assert_success(status, &body);
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_soft_delete_hides_installer_from_list() {
    let router = create_router_for_test();
    post(
        router.clone(),
        "/installers",
        json!({ "name": "Ben", "experience_level": "beginner" }),
    )
    .await;

    let (status, body) = send(router.clone(), "DELETE", "/installers/1", None).await;
    assert_success(status, &body);
    assert_eq!(body["data"]["status"], "inactive");

    let (_, body) = get(router.clone(), "/installers").await;
    assert!(body["data"].as_array().unwrap().is_empty());

    // Still retrievable by id
    let (status, body) = get(router, "/installers/1").await;
    assert_success(status, &body);
    assert_eq!(body["data"]["status"], "inactive");
}

#[tokio::test]
async fn test_permanent_delete_removes_installer() {
    let router = create_router_for_test();
    post(
        router.clone(),
        "/installers",
        json!({ "name": "Cy", "experience_level": "advanced" }),
    )
    .await;

    let (status, _) = send(router.clone(), "DELETE", "/installers/1?permanent=true", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(router, "/installers/1").await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "INSTALLER_NOT_FOUND");
}

#[tokio::test]
async fn test_unknown_installer_is_404() {
    let (status, body) = get(create_router_for_test(), "/installers/999").await;

    assert_error(status, &body, StatusCode::NOT_FOUND, "INSTALLER_NOT_FOUND");
}

#[tokio::test]
async fn test_non_numeric_installer_id_is_400() {
    let (status, body) = get(create_router_for_test(), "/installers/abc").await;

    assert_error(status, &body, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_installer_with_empty_name_rejected() {
    let (status, body) = post(
        create_router_for_test(),
        "/installers",
        json!({ "name": "  ", "experience_level": "expert" }),
    )
    .await;

    assert_error(status, &body, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_revenue_dashboard_tracks_commitments() {
    let router = create_router_for_test();
    post(
        router.clone(),
        "/installers",
        json!({ "name": "Ana", "experience_level": "expert", "committed_days": 10 }),
    )
    .await;

    let (status, body) = get(router, "/revenue/dashboard?scenario=base_case").await;

    assert_success(status, &body);
    let data = &body["data"];
    assert_eq!(data["active_installers"], 1);
    assert_decimal(&data["target_revenue"], "1500000");
    assert_decimal(&data["committed_revenue"], "46500");
    assert_decimal(&data["remaining_revenue"], "1453500");
    assert_decimal(&data["percentage_committed"], "3.1");
}

#[tokio::test]
async fn test_revenue_dashboard_with_no_installers() {
    let (status, body) = get(create_router_for_test(), "/revenue/dashboard").await;

    assert_success(status, &body);
    assert_decimal(&body["data"]["committed_revenue"], "0");
    assert_decimal(&body["data"]["percentage_committed"], "0");
}

#[tokio::test]
async fn test_installer_with_oversized_day_count_rejected() {
    let (status, body) = post(
        create_router_for_test(),
        "/installers",
        json!({ "name": "Dee", "experience_level": "expert", "committed_days": 4294967295u32 }),
    )
    .await;

    assert_error(status, &body, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
    assert_eq!(body["details"], "committed_days");
}

#[tokio::test]
async fn test_revenue_dashboard_target_override_and_breakdown() {
    let router = create_router_for_test();
    post(
        router.clone(),
        "/installers",
        json!({ "name": "Ana", "experience_level": "expert", "committed_days": 10 }),
    )
    .await;

    let (status, body) = get(router, "/revenue/dashboard?target_revenue=465000").await;

    assert_success(status, &body);
    let data = &body["data"];
    assert_decimal(&data["target_revenue"], "465000");
    assert_decimal(&data["remaining_revenue"], "418500");
    assert_decimal(&data["percentage_committed"], "10");
    let installers = data["installers"].as_array().unwrap();
    assert_eq!(installers.len(), 1);
    assert_eq!(installers[0]["name"], "Ana");
    assert_eq!(installers[0]["in_season_days"], 6);
    assert_decimal(&installers[0]["committed_revenue"], "46500");
}

#[tokio::test]
async fn test_revenue_dashboard_rejects_invalid_target_override() {
    let (status, body) = get(create_router_for_test(), "/revenue/dashboard?target_revenue=0").await;

    assert_error(status, &body, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
    assert_eq!(body["details"], "target_revenue");
}

#[tokio::test]
async fn test_capacity_analysis_defaults_to_configured_goals() {
    let (status, body) = post(create_router_for_test(), "/revenue/capacity-analysis", json!({})).await;

    assert_success(status, &body);
    let data = &body["data"];
    assert_eq!(data.as_object().unwrap().len(), 3);
    assert_decimal(&data["worst_case"]["target_revenue"], "1200000");
    assert_decimal(&data["best_case"]["remaining_revenue"], "1800000");
    // 1,500,000 / (7750 * 60) rounded down
    assert_eq!(data["base_case"]["levels"][3]["additional_installers_needed"], 3);
}

#[tokio::test]
async fn test_capacity_analysis_with_custom_targets() {
    let router = create_router_for_test();
    post(
        router.clone(),
        "/installers",
        json!({ "name": "Ana", "experience_level": "expert", "committed_days": 10 }),
    )
    .await;

    let (status, body) = post(
        router,
        "/revenue/capacity-analysis",
        json!({ "revenue_targets": { "base_case": "465000" } }),
    )
    .await;

    assert_success(status, &body);
    let data = &body["data"];
    assert_eq!(data.as_object().unwrap().len(), 1);
    assert_decimal(&data["base_case"]["committed_revenue"], "46500");
    assert_decimal(&data["base_case"]["percentage_committed"], "10");
}

// =============================================================================
// SECTION 6: Analytics
// =============================================================================

#[tokio::test]
async fn test_capacity_matrix_sorted_by_efficiency() {
    let (status, body) = post(
        create_router_for_test(),
        "/analytics/capacity-matrix",
        json!({ "scenario": "base_case", "bounds": { "max_per_level": 2, "max_total_crews": 3 } }),
    )
    .await;

    assert_success(status, &body);
    let entries = body["data"].as_array().unwrap();
    assert!(!entries.is_empty());
    let scores: Vec<Decimal> = entries
        .iter()
        .map(|entry| decimal_at(&entry["efficiency_score"]))
        .collect();
    assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[tokio::test]
async fn test_sensitivity_covers_all_scenarios() {
    let (status, body) = post(
        create_router_for_test(),
        "/analytics/sensitivity",
        json!({ "expert_crews": 1 }),
    )
    .await;

    assert_success(status, &body);
    let scenarios = body["data"]["scenarios"].as_array().unwrap();
    assert_eq!(scenarios.len(), 3);
    assert_eq!(scenarios[0]["points"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_sensitivity_empty_composition_rejected() {
    let (status, body) = post(create_router_for_test(), "/analytics/sensitivity", json!({})).await;

    assert_error(status, &body, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_compare_scenarios_names_compositions() {
    let (status, body) = post(
        create_router_for_test(),
        "/scenarios/compare",
        json!({
            "compositions": [
                { "name": "Lean", "expert_crews": 1 },
                { "advanced_crews": 2 }
            ],
            "scenarios": ["best_case"]
        }),
    )
    .await;

    assert_success(status, &body);
    let compared = body["data"].as_array().unwrap();
    assert_eq!(compared[0]["name"], "Lean");
    assert_eq!(compared[1]["name"], "Composition 2");
    assert_eq!(compared[0]["results"].as_array().unwrap().len(), 1);
    assert_eq!(compared[0]["results"][0]["scenario"], "best_case");
}

#[tokio::test]
async fn test_optimal_crew_size_per_target() {
    let (status, body) = post(
        create_router_for_test(),
        "/analytics/optimal-crew-size",
        json!({ "revenue_targets": [465000, 930000], "scenario": "base_case" }),
    )
    .await;

    assert_success(status, &body);
    let results = body["data"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["recommended_composition"]["expert_crews"], 1);
    assert_decimal(&results[0]["projected_revenue"], "465000");
    assert_decimal(&results[0]["labor_cost"], "60300");
    assert_decimal(&results[0]["revenue_gap_pct"], "0");
    assert_eq!(results[1]["total_crews"], 2);
}

#[tokio::test]
async fn test_optimal_crew_size_default_targets() {
    let (status, body) = post(
        create_router_for_test(),
        "/analytics/optimal-crew-size",
        json!({}),
    )
    .await;

    assert_success(status, &body);
    let results = body["data"].as_array().unwrap();
    assert_eq!(results.len(), 5);
    assert_decimal(&results[0]["target_revenue"], "1000000");
    assert_decimal(&results[4]["target_revenue"], "2000000");
}

#[tokio::test]
async fn test_crew_efficiency_analysis_ranks_presets() {
    let (status, body) = post(
        create_router_for_test(),
        "/analytics/crew-efficiency-analysis",
        json!({ "scenario": "base_case" }),
    )
    .await;

    assert_success(status, &body);
    let ranked = body["data"].as_array().unwrap();
    assert_eq!(ranked.len(), 5);
    assert_eq!(ranked[0]["composition_name"], "All Experts");
    assert_eq!(ranked[4]["composition_name"], "All Beginners");
    assert_decimal(&ranked[0]["revenue_per_crew"], "465000");
    assert_decimal(&ranked[0]["cost_per_crew"], "60300");
    let ratios: Vec<Decimal> = ranked
        .iter()
        .map(|entry| decimal_at(&entry["efficiency_ratio"]))
        .collect();
    assert!(ratios.windows(2).all(|pair| pair[0] >= pair[1]));
}

// =============================================================================
// SECTION 7: Request Errors
// =============================================================================

#[tokio::test]
async fn test_malformed_json_rejected() {
    let router = create_router_for_test();
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/capacity")
                .header("Content-Type", "application/json")
                .body(Body::from("{ not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap();

    assert_error(status, &body, StatusCode::BAD_REQUEST, "MALFORMED_JSON");
}

#[tokio::test]
async fn test_missing_required_field_is_validation_error() {
    let (status, body) = post(
        create_router_for_test(),
        "/recruitment/presentation",
        json!({ "committed_days": 5 }),
    )
    .await;

    assert_error(status, &body, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_missing_content_type_rejected() {
    let router = create_router_for_test();
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/capacity")
                .body(Body::from(json!({ "expert_crews": 1 }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
