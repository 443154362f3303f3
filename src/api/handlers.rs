//! HTTP request handlers for the crew planner API.
//!
//! This module contains the handler functions for all API endpoints.
//! Handlers only marshal: they parse the request, take a configuration
//! snapshot, call into [`crate::calculation`] or the stores, and wrap the
//! result.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::Response,
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    CompensationInput, break_even, break_even_all, calculate_compensation, capacity,
    capacity_analysis, capacity_matrix, compare_scenarios, crew_efficiency_analysis,
    crew_leader_compensation, crew_leader_compensation_all, financial_summary, optimal_crew_sizes,
    recommend_crews, recruitment_data, recruitment_presentation, revenue_dashboard,
    sensitivity_analysis,
};
use crate::config::RevenueTargets;
use crate::error::EngineError;
use crate::models::{CrewComposition, ExperienceLevel, NewInstaller, Scenario};
use crate::store::ConfigUpdate;

use super::request::{
    CapacityAnalysisRequest, CapacityMatrixRequest, CapacityRequest, CompareScenariosRequest,
    CrewEfficiencyRequest, MultiplierParams, OptimalCrewSizeRequest, RecommendCrewsRequest,
    RecruitmentRequest, RemoveInstallerParams, ScenarioParams,
};
use super::response::{ApiError, ApiErrorResponse, ApiResponse};
use super::state::AppState;

type HandlerResult = Result<Response, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/config", get(get_config_handler).put(update_config_handler))
        .route(
            "/revenue-goals",
            get(get_revenue_goals_handler).post(save_revenue_goals_handler),
        )
        .route("/compensation", post(compensation_handler))
        .route("/compensation/all", post(compensation_all_handler))
        .route(
            "/compensation/:level/:scenario",
            get(crew_leader_compensation_handler),
        )
        .route("/capacity", post(capacity_handler))
        .route("/recommend-crews", post(recommend_crews_handler))
        .route("/break-even", get(break_even_all_handler))
        .route("/break-even/:level", get(break_even_handler))
        .route("/financial-summary", post(financial_summary_handler))
        .route("/recruitment/presentation", post(recruitment_handler))
        .route("/recruitment-data/:level", get(recruitment_data_handler))
        .route(
            "/installers",
            get(list_installers_handler).post(add_installer_handler),
        )
        .route(
            "/installers/by-experience/:level",
            get(installers_by_level_handler),
        )
        .route(
            "/installers/:id",
            get(get_installer_handler).delete(remove_installer_handler),
        )
        .route("/revenue/dashboard", get(revenue_dashboard_handler))
        .route("/revenue/capacity-analysis", post(capacity_analysis_handler))
        .route("/analytics/capacity-matrix", post(capacity_matrix_handler))
        .route("/analytics/sensitivity", post(sensitivity_handler))
        .route("/analytics/optimal-crew-size", post(optimal_crew_size_handler))
        .route(
            "/analytics/crew-efficiency-analysis",
            post(crew_efficiency_handler),
        )
        .route("/scenarios/compare", post(compare_scenarios_handler))
        .with_state(state)
}

/// Unwraps a JSON body, turning extractor rejections into API errors.
fn json_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiErrorResponse> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // Get the body text which contains the detailed error from serde
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    // Missing and out-of-domain fields are validation errors
                    if body_text.contains("missing field") || body_text.contains("unknown variant")
                    {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err(ApiErrorResponse::bad_request(error))
        }
    }
}

/// Unwraps a query string, turning extractor rejections into API errors.
fn query_params<T>(
    correlation_id: Uuid,
    params: Result<Query<T>, QueryRejection>,
) -> Result<T, ApiErrorResponse> {
    params.map(|Query(params)| params).map_err(|rejection| {
        warn!(
            correlation_id = %correlation_id,
            error = %rejection.body_text(),
            "Invalid query string"
        );
        ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
    })
}

/// Logs an engine failure and converts it to an API error.
fn failure(correlation_id: Uuid, operation: &'static str) -> impl Fn(EngineError) -> ApiErrorResponse {
    move |err| {
        warn!(
            correlation_id = %correlation_id,
            operation,
            error = %err,
            "Request failed"
        );
        err.into()
    }
}

fn parse_level(correlation_id: Uuid, raw: &str) -> Result<ExperienceLevel, ApiErrorResponse> {
    raw.parse().map_err(failure(correlation_id, "parse_level"))
}

fn parse_id(correlation_id: Uuid, raw: &str) -> Result<u64, ApiErrorResponse> {
    raw.parse()
        .map_err(|_| EngineError::validation("id", format!("'{}' is not a valid installer id", raw)))
        .map_err(failure(correlation_id, "parse_id"))
}

fn ok<T: Serialize>(data: T) -> HandlerResult {
    Ok(ApiResponse::ok(data).with_status(StatusCode::OK))
}

/// Handler for GET /config.
async fn get_config_handler(State(state): State<AppState>) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Returning configuration snapshot");
    ok(state.config().snapshot().as_ref())
}

/// Handler for PUT /config.
///
/// Applies a partial update; sections left out keep their values.
async fn update_config_handler(
    State(state): State<AppState>,
    payload: Result<Json<ConfigUpdate>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing configuration update");

    let update = json_body(correlation_id, payload)?;
    let updated = state
        .config()
        .apply(update)
        .map_err(failure(correlation_id, "update_config"))?;
    ok(updated.as_ref())
}

/// Handler for GET /revenue-goals.
async fn get_revenue_goals_handler(State(state): State<AppState>) -> HandlerResult {
    ok(state.config().revenue_targets())
}

/// Handler for POST /revenue-goals.
async fn save_revenue_goals_handler(
    State(state): State<AppState>,
    payload: Result<Json<RevenueTargets>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Saving revenue goals");

    let targets = json_body(correlation_id, payload)?;
    let updated = state
        .config()
        .update_revenue_targets(targets)
        .map_err(failure(correlation_id, "save_revenue_goals"))?;
    ok(&updated.revenue_targets)
}

/// Handler for POST /compensation.
///
/// Computes compensation for an explicit phase breakdown.
async fn compensation_handler(
    State(state): State<AppState>,
    payload: Result<Json<CompensationInput>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let input = json_body(correlation_id, payload)?;
    let config = state.config().snapshot();

    let result = calculate_compensation(&input, &config)
        .map_err(failure(correlation_id, "compensation"))?;
    info!(
        correlation_id = %correlation_id,
        experience_level = %input.experience_level,
        scenario = %input.scenario,
        total_compensation = %result.total_compensation,
        "Compensation calculated"
    );
    ok(result)
}

/// Handler for GET /compensation/:level/:scenario.
async fn crew_leader_compensation_handler(
    State(state): State<AppState>,
    Path((level, scenario)): Path<(String, String)>,
    params: Result<Query<MultiplierParams>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let level = parse_level(correlation_id, &level)?;
    let scenario: Scenario = scenario
        .parse()
        .map_err(failure(correlation_id, "parse_scenario"))?;
    let params = query_params(correlation_id, params)?;
    let config = state.config().snapshot();

    let result = crew_leader_compensation(level, scenario, params.multiplier(), &config)
        .map_err(failure(correlation_id, "crew_leader_compensation"))?;
    info!(
        correlation_id = %correlation_id,
        experience_level = %level,
        scenario = %scenario,
        total_compensation = %result.total_compensation,
        "Crew leader compensation calculated"
    );
    ok(result)
}

/// Handler for POST /compensation/all.
async fn compensation_all_handler(
    State(state): State<AppState>,
    payload: Result<Json<MultiplierParams>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let params = json_body(correlation_id, payload)?;
    let config = state.config().snapshot();

    let results = crew_leader_compensation_all(params.multiplier(), &config)
        .map_err(failure(correlation_id, "compensation_all"))?;
    info!(
        correlation_id = %correlation_id,
        results = results.len(),
        "Compensation grid calculated"
    );
    ok(results)
}

/// Handler for POST /capacity.
async fn capacity_handler(
    State(state): State<AppState>,
    payload: Result<Json<CapacityRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing capacity request");

    let request = json_body(correlation_id, payload)?;
    let config = state.config().snapshot();

    let start_time = Instant::now();
    let result = capacity(&request.composition, request.scenario, &config)
        .map_err(failure(correlation_id, "capacity"))?;
    info!(
        correlation_id = %correlation_id,
        total_crews = result.total_crews,
        total_seasonal_revenue = %result.total_seasonal_revenue,
        duration_us = start_time.elapsed().as_micros(),
        "Capacity calculated"
    );
    ok(result)
}

/// Handler for POST /recommend-crews.
async fn recommend_crews_handler(
    State(state): State<AppState>,
    payload: Result<Json<RecommendCrewsRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing crew recommendation request");

    let request = json_body(correlation_id, payload)?;
    let config = state.config().snapshot();

    let start_time = Instant::now();
    let ranked = recommend_crews(
        request.target_revenue,
        request.scenario,
        &request.bounds,
        &config,
    )
    .map_err(failure(correlation_id, "recommend_crews"))?;
    info!(
        correlation_id = %correlation_id,
        target_revenue = %request.target_revenue,
        returned = ranked.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Crew recommendations ranked"
    );
    ok(ranked)
}

/// Handler for GET /break-even.
async fn break_even_all_handler(State(state): State<AppState>) -> HandlerResult {
    ok(break_even_all(&state.config().snapshot()))
}

/// Handler for GET /break-even/:level.
async fn break_even_handler(
    State(state): State<AppState>,
    Path(level): Path<String>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let level = parse_level(correlation_id, &level)?;
    ok(break_even(level, &state.config().snapshot()))
}

/// Handler for POST /financial-summary.
async fn financial_summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<CrewComposition>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let composition = json_body(correlation_id, payload)?;
    let config = state.config().snapshot();

    let summary = financial_summary(&composition, &config)
        .map_err(failure(correlation_id, "financial_summary"))?;
    info!(
        correlation_id = %correlation_id,
        total_crews = composition.total_crews(),
        "Financial summary calculated"
    );
    ok(summary)
}

/// Handler for POST /recruitment/presentation.
async fn recruitment_handler(
    State(state): State<AppState>,
    payload: Result<Json<RecruitmentRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = json_body(correlation_id, payload)?;
    let config = state.config().snapshot();

    let presentation =
        recruitment_presentation(request.experience_level, &request.committed_days, &config)
            .map_err(failure(correlation_id, "recruitment_presentation"))?;
    info!(
        correlation_id = %correlation_id,
        experience_level = %request.experience_level,
        committed_days = presentation.committed_days,
        "Recruitment presentation prepared"
    );
    ok(presentation)
}

/// Handler for GET /recruitment-data/:level.
async fn recruitment_data_handler(
    State(state): State<AppState>,
    Path(level): Path<String>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let level = parse_level(correlation_id, &level)?;
    let config = state.config().snapshot();

    let data = recruitment_data(level, &config)
        .map_err(failure(correlation_id, "recruitment_data"))?;
    info!(
        correlation_id = %correlation_id,
        experience_level = %level,
        "Recruitment data prepared"
    );
    ok(data)
}

/// Handler for GET /installers.
async fn list_installers_handler(State(state): State<AppState>) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let installers = state
        .installers()
        .list()
        .map_err(failure(correlation_id, "list_installers"))?;
    ok(installers)
}

/// Handler for POST /installers.
async fn add_installer_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewInstaller>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing add installer request");

    let installer = json_body(correlation_id, payload)?;
    let record = state
        .installers()
        .add(installer)
        .map_err(failure(correlation_id, "add_installer"))?;
    Ok(ApiResponse::ok(record).with_status(StatusCode::CREATED))
}

/// Handler for GET /installers/:id.
async fn get_installer_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let id = parse_id(correlation_id, &id)?;
    let record = state
        .installers()
        .get(id)
        .map_err(failure(correlation_id, "get_installer"))?;
    ok(record)
}

/// Handler for DELETE /installers/:id.
///
/// Soft-deletes unless `?permanent=true` is given.
async fn remove_installer_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    params: Result<Query<RemoveInstallerParams>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let id = parse_id(correlation_id, &id)?;
    let params = query_params(correlation_id, params)?;

    let record = state
        .installers()
        .remove(id, params.permanent)
        .map_err(failure(correlation_id, "remove_installer"))?;
    info!(
        correlation_id = %correlation_id,
        installer_id = id,
        permanent = params.permanent,
        "Installer removal processed"
    );
    ok(record)
}

/// Handler for GET /installers/by-experience/:level.
async fn installers_by_level_handler(
    State(state): State<AppState>,
    Path(level): Path<String>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let level = parse_level(correlation_id, &level)?;
    let installers = state
        .installers()
        .list_by_level(level)
        .map_err(failure(correlation_id, "installers_by_level"))?;
    ok(installers)
}

/// Handler for GET /revenue/dashboard.
///
/// `?target_revenue=` replaces the configured goal for the scenario.
async fn revenue_dashboard_handler(
    State(state): State<AppState>,
    params: Result<Query<ScenarioParams>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let params = query_params(correlation_id, params)?;
    let installers = state
        .installers()
        .list()
        .map_err(failure(correlation_id, "revenue_dashboard"))?;
    let config = state.config().snapshot();

    let dashboard = revenue_dashboard(
        &installers,
        params.scenario,
        params.target_revenue,
        &config,
    )
    .map_err(failure(correlation_id, "revenue_dashboard"))?;
    info!(
        correlation_id = %correlation_id,
        scenario = %params.scenario,
        committed_revenue = %dashboard.committed_revenue,
        percentage_committed = %dashboard.percentage_committed,
        "Revenue dashboard computed"
    );
    ok(dashboard)
}

/// Handler for POST /revenue/capacity-analysis.
async fn capacity_analysis_handler(
    State(state): State<AppState>,
    payload: Result<Json<CapacityAnalysisRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = json_body(correlation_id, payload)?;
    let installers = state
        .installers()
        .list()
        .map_err(failure(correlation_id, "capacity_analysis"))?;
    let config = state.config().snapshot();

    let analysis = capacity_analysis(&installers, &request.revenue_targets, &config)
        .map_err(failure(correlation_id, "capacity_analysis"))?;
    info!(
        correlation_id = %correlation_id,
        scenarios = analysis.len(),
        "Capacity analysis computed"
    );
    ok(analysis)
}

/// Handler for POST /analytics/capacity-matrix.
async fn capacity_matrix_handler(
    State(state): State<AppState>,
    payload: Result<Json<CapacityMatrixRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = json_body(correlation_id, payload)?;
    let config = state.config().snapshot();

    let start_time = Instant::now();
    let entries = capacity_matrix(request.scenario, &request.bounds, &config)
        .map_err(failure(correlation_id, "capacity_matrix"))?;
    info!(
        correlation_id = %correlation_id,
        returned = entries.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Capacity matrix generated"
    );
    ok(entries)
}

/// Handler for POST /analytics/sensitivity.
async fn sensitivity_handler(
    State(state): State<AppState>,
    payload: Result<Json<CrewComposition>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let composition = json_body(correlation_id, payload)?;
    let config = state.config().snapshot();

    let analysis = sensitivity_analysis(&composition, &config)
        .map_err(failure(correlation_id, "sensitivity_analysis"))?;
    ok(analysis)
}

/// Handler for POST /analytics/optimal-crew-size.
async fn optimal_crew_size_handler(
    State(state): State<AppState>,
    payload: Result<Json<OptimalCrewSizeRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = json_body(correlation_id, payload)?;
    let config = state.config().snapshot();

    let start_time = Instant::now();
    let results = optimal_crew_sizes(&request.revenue_targets, request.scenario, &config)
        .map_err(failure(correlation_id, "optimal_crew_size"))?;
    info!(
        correlation_id = %correlation_id,
        targets = results.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Optimal crew sizes found"
    );
    ok(results)
}

/// Handler for POST /analytics/crew-efficiency-analysis.
async fn crew_efficiency_handler(
    State(state): State<AppState>,
    payload: Result<Json<CrewEfficiencyRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = json_body(correlation_id, payload)?;
    let config = state.config().snapshot();

    let ranked = crew_efficiency_analysis(request.scenario, &config)
        .map_err(failure(correlation_id, "crew_efficiency_analysis"))?;
    ok(ranked)
}

/// Handler for POST /scenarios/compare.
async fn compare_scenarios_handler(
    State(state): State<AppState>,
    payload: Result<Json<CompareScenariosRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = json_body(correlation_id, payload)?;
    let config = state.config().snapshot();

    let compared = compare_scenarios(&request.compositions, &request.scenarios, &config)
        .map_err(failure(correlation_id, "compare_scenarios"))?;
    info!(
        correlation_id = %correlation_id,
        compositions = compared.len(),
        "Scenario comparison completed"
    );
    ok(compared)
}
