//! HTTP handlers for list screens
//!
//! The screen handlers are generic over the record type and its filter;
//! each registered screen mounts its own instantiation.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

use crate::core::error::{QueryError, ScreenError, TourdeskError};
use crate::core::query::QueryParams;
use crate::core::record::Record;
use crate::screens::{ListResponse, ScreenFilter, ScreenInfo, ScreenService};

/// GET /api/{screen}
pub async fn list_records<R, F>(
    State(screen): State<Arc<ScreenService<R, F>>>,
    params: Result<Query<QueryParams>, QueryRejection>,
    filter: Result<Query<F>, QueryRejection>,
) -> Result<Json<ListResponse<R>>, TourdeskError>
where
    R: Record,
    F: ScreenFilter<R>,
{
    let Query(params) = params.map_err(|e| rejection("query", e))?;
    let Query(filter) = filter.map_err(|e| rejection("filter", e))?;

    Ok(Json(screen.list(params, filter).await?))
}

/// POST /api/{screen}/refresh
pub async fn refresh_records<R, F>(
    State(screen): State<Arc<ScreenService<R, F>>>,
) -> Result<Json<Value>, TourdeskError>
where
    R: Record,
    F: ScreenFilter<R>,
{
    let count = screen.refresh().await?;
    Ok(Json(json!({ "screen": screen.name(), "count": count })))
}

/// DELETE /api/{screen}/{id}
pub async fn delete_record<R, F>(
    State(screen): State<Arc<ScreenService<R, F>>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, TourdeskError>
where
    R: Record,
    F: ScreenFilter<R>,
{
    screen.delete(id).await?;
    tracing::info!(screen = %screen.name(), id, "record deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/screens
pub async fn list_screens(State(screens): State<Arc<Vec<ScreenInfo>>>) -> Json<Value> {
    Json(json!({ "screens": screens.as_slice() }))
}

/// Any /api/{screen} path with no registered screen
pub async fn unknown_screen(Path(params): Path<HashMap<String, String>>) -> TourdeskError {
    let name = params.get("screen").cloned().unwrap_or_default();
    ScreenError::UnknownScreen { name }.into()
}

/// Health check endpoint handler
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "tourdesk"
    }))
}

fn rejection(name: &str, err: QueryRejection) -> TourdeskError {
    QueryError::InvalidFilter {
        name: name.to_string(),
        message: err.body_text(),
    }
    .into()
}
