use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use tower_http::trace::TraceLayer;
use workday_engine::{WorkdayError, WorkdayQuery, WorkdayResponse, WorkdayService};

use crate::error::AppError;

pub fn router(service: Arc<WorkdayService>) -> Router {
    Router::new()
        .route("/workdays", get(workdays))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

pub async fn workdays(
    State(service): State<Arc<WorkdayService>>,
    query: Result<Query<WorkdayQuery>, QueryRejection>,
) -> Result<Json<WorkdayResponse>, AppError> {
    // Undecodable query strings get the same JSON error body as bad values.
    let Query(query) =
        query.map_err(|rejection| WorkdayError::InvalidParameters(rejection.body_text()))?;
    let response = service.handle(&query, Utc::now())?;
    Ok(Json(response))
}
