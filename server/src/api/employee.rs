use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::WithRejection;
use platform_api::{ApiError, ApiResult};
use products_hr::{Employee, EmployeeId, ReportingStructure};
use tracing::debug;

use crate::http::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/employee", post(create_employee))
        .route("/api/employee/{id}", get(get_employee).put(replace_employee))
        .route(
            "/api/employee/reporting-structure/{id}",
            get(get_reporting_structure),
        )
}

async fn create_employee(
    State(state): State<AppState>,
    WithRejection(Json(employee), _): WithRejection<Json<Employee>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    debug!(name = %employee.full_name(), "received employee create request");
    let created = state
        .employee_service()
        .create(employee)
        .await
        .map_err(ApiError::internal)?;
    let id = created
        .id
        .clone()
        .ok_or_else(|| ApiError::internal(anyhow::anyhow!("created employee has no id")))?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/employee/{id}"))],
        Json(created),
    ))
}

async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Employee>> {
    debug!(%id, "received employee get request");
    state
        .employee_service()
        .get_by_id(&EmployeeId::from(id))
        .await
        .map_err(ApiError::internal)?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn replace_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(replacement), _): WithRejection<Json<Employee>, ApiError>,
) -> ApiResult<Json<Employee>> {
    debug!(%id, "received employee update request");
    let employees = state.employee_service();
    let current = employees
        .get_by_id(&EmployeeId::from(id))
        .await
        .map_err(ApiError::internal)?
        .ok_or(ApiError::NotFound)?;
    employees
        .replace(Some(current), Some(replacement))
        .await
        .map_err(ApiError::internal)?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn get_reporting_structure(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ReportingStructure>> {
    debug!(%id, "received reporting structure request");
    state
        .employee_service()
        .get_reporting_structure(&EmployeeId::from(id))
        .await
        .map_err(ApiError::internal)?
        .map(Json)
        .ok_or(ApiError::NotFound)
}
