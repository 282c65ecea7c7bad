//! Date range control routes
//!
//! The range filters only once both endpoints are set. An empty value clears
//! that endpoint.

use axum::extract::Query;
use axum::http::HeaderMap;
use axum::response::Html;
use axum::Json;
use chrono::NaiveDate;
use finweb_core::{parse_date, DashboardEvent, DateRange};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::routes::dashboard::render_page;
use crate::routes::form_params;
use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

fn range_json(range: DateRange) -> Value {
    json!({
        "start": range.start,
        "end": range.end,
        "active": range.is_active(),
        "description": range.description(),
    })
}

/// Strict endpoint parsing for the JSON API: empty clears, garbage is an error
fn parse_endpoint(name: &str, raw: &str) -> ApiResult<Option<NaiveDate>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    parse_date(raw)
        .map(Some)
        .ok_or_else(|| ApiError::bad_request(format!("Invalid {} date '{}' (expected YYYY-MM-DD)", name, raw)))
}

/// Get current range (JSON API)
pub async fn api_range(state: axum::extract::State<AppState>) -> Json<Value> {
    let snapshot = state.snapshot().await;
    Json(range_json(snapshot.range()))
}

/// Set range (JSON API) - absent parameters leave that endpoint unchanged
pub async fn api_set_range(
    state: axum::extract::State<AppState>,
    Query(query): Query<RangeQuery>,
) -> ApiResult<Json<Value>> {
    let mut events = Vec::new();
    if let Some(start) = query.start.as_deref() {
        events.push(DashboardEvent::StartDateChanged(parse_endpoint("start", start)?));
    }
    if let Some(end) = query.end.as_deref() {
        events.push(DashboardEvent::EndDateChanged(parse_endpoint("end", end)?));
    }

    let snapshot = state.dispatch_all(events).await;
    log::debug!("Date range set: {}", snapshot.range().description());
    Ok(Json(range_json(snapshot.range())))
}

/// HTMX: Date filter form - unparsable input clears that endpoint
pub async fn htmx_set_range(
    state: axum::extract::State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Html<String> {
    let params = form_params(&body);
    let field = |name: &str| params.get(name).map(String::as_str).unwrap_or("");
    let range = DateRange::from_inputs(field("start_date"), field("end_date"));

    let events = if range.start.is_none() && range.end.is_none() {
        vec![DashboardEvent::RangeCleared]
    } else {
        vec![
            DashboardEvent::StartDateChanged(range.start),
            DashboardEvent::EndDateChanged(range.end),
        ]
    };
    state.dispatch_all(events).await;

    render_page(&state, &headers).await
}
