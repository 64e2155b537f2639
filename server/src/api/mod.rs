//! REST handlers under `/api/employee`.

mod compensation;
mod employee;

use axum::Router;

use crate::http::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(employee::routes())
        .merge(compensation::routes())
}
