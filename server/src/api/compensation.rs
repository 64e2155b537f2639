use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::WithRejection;
use platform_api::{ApiError, ApiResult};
use products_hr::{Compensation, EmployeeId};
use tracing::debug;

use crate::http::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/employee/compensation", post(create_compensation))
        .route("/api/employee/compensation/{id}", get(get_compensation))
}

async fn create_compensation(
    State(state): State<AppState>,
    WithRejection(Json(compensation), _): WithRejection<Json<Compensation>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    debug!(
        employee_id = ?compensation.employee.id,
        "received compensation create request"
    );
    let created = state
        .compensation_service()
        .create(compensation)
        .await
        .map_err(ApiError::internal)?;
    // No Location when the compensation names no employee to look it up by.
    let location = created
        .employee
        .id
        .as_ref()
        .filter(|id| !id.is_empty())
        .map(|id| [(header::LOCATION, format!("/api/employee/compensation/{id}"))]);
    Ok((StatusCode::CREATED, location, Json(created)))
}

async fn get_compensation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Compensation>> {
    debug!(%id, "received compensation get request");
    state
        .compensation_service()
        .get_by_employee_id(&EmployeeId::from(id))
        .await
        .map_err(ApiError::internal)?
        .map(Json)
        .ok_or(ApiError::NotFound)
}
