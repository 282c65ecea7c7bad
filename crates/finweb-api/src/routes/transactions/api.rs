//! Transaction API endpoints
//!
//! - api_transactions: Filtered list (JSON)
//! - api_transaction_create: Add a transaction (JSON)
//! - api_reload: Re-fetch from the backend (JSON)
//! - htmx_transaction_store: Add-transaction form (HTMX)

use axum::http::HeaderMap;
use axum::response::Html;
use axum::Json;
use finweb_core::dashboard::SUBMIT_SUCCESS_MESSAGE;
use finweb_core::{DashboardEvent, NewTransaction, TransactionForm};
use serde_json::{json, Value};

use crate::routes::dashboard::render_page;
use crate::routes::form_params;
use crate::{ApiResult, AppState};

/// Filtered transactions plus counts and the active range (JSON API)
pub async fn api_transactions(state: axum::extract::State<AppState>) -> Json<Value> {
    let snapshot = state.snapshot().await;
    let view = snapshot.view();
    Json(json!({
        "transactions": view.filtered,
        "total_count": view.total_count,
        "filtered_count": view.filtered.len(),
        "range": view.range,
        "range_description": view.range.description(),
    }))
}

/// Add a transaction, then re-fetch (JSON API)
pub async fn api_transaction_create(
    state: axum::extract::State<AppState>,
    Json(transaction): Json<NewTransaction>,
) -> ApiResult<Json<Value>> {
    transaction.validate()?;
    state.submit(&transaction).await?;

    let snapshot = state.snapshot().await;
    Ok(Json(json!({
        "success": true,
        "message": SUBMIT_SUCCESS_MESSAGE,
        "total_count": snapshot.transactions().len(),
    })))
}

/// Re-fetch the list from the backend (JSON API)
pub async fn api_reload(state: axum::extract::State<AppState>) -> ApiResult<Json<Value>> {
    let count = state.refresh().await?;
    Ok(Json(json!({
        "success": true,
        "message": format!("Loaded {} transactions", count),
        "total_count": count,
    })))
}

/// HTMX: Store a new transaction from the form, then re-render
pub async fn htmx_transaction_store(
    state: axum::extract::State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Html<String> {
    let params = form_params(&body);
    let field = |name: &str| params.get(name).cloned().unwrap_or_default();

    let mut form = TransactionForm {
        amount: field("amount"),
        description: field("description"),
        date: field("date"),
        ..Default::default()
    };
    if let Some(kind) = params.get("type") {
        form.kind = kind.clone();
    }

    match form.coerce() {
        Ok(transaction) => {
            // outcome lands in the dashboard notice
            let _ = state.submit(&transaction).await;
        }
        Err(e) => {
            log::info!("Rejected transaction form: {}", e);
            state.dispatch(DashboardEvent::SubmitFailed(e.to_string())).await;
        }
    }

    render_page(&state, &headers).await
}
