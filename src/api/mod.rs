//! HTTP API module for the crew planner.
//!
//! This module provides the REST endpoints for configuration, compensation,
//! capacity planning, installer tracking and analytics.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CapacityAnalysisRequest, CapacityMatrixRequest, CapacityRequest, CompareScenariosRequest,
    CrewEfficiencyRequest, MultiplierParams, OptimalCrewSizeRequest, RecommendCrewsRequest,
    RecruitmentRequest, RemoveInstallerParams, ScenarioParams,
};
pub use response::{ApiError, ApiErrorResponse, ApiResponse};
pub use state::AppState;
