//! HTTP dashboard server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::dashboard: The dashboard page, refresh and notice handling
//! - routes::transactions: Add-transaction form, JSON list and create
//! - routes::range: Date filter
//! - routes::reports: Summary and chart data (JSON)

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use finweb_client::{ClientResult, TransactionBackend};
use finweb_config::Config;
use finweb_core::{DashboardEvent, DashboardState, NewTransaction};
use tokio::net::TcpListener;
use tokio::sync::{Mutex, RwLock};
use tower_http::cors::CorsLayer;

pub use error::{ApiError, ApiResult};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<RwLock<DashboardState>>,
    pub backend: Arc<dyn TransactionBackend>,
    pub config: Config,
    /// Held for a whole fetch-and-swap so refreshes land in request order
    refresh_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(config: Config, backend: Arc<dyn TransactionBackend>) -> Self {
        Self {
            dashboard: Arc::new(RwLock::new(DashboardState::default())),
            backend,
            config,
            refresh_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Current snapshot
    pub async fn snapshot(&self) -> DashboardState {
        self.dashboard.read().await.clone()
    }

    /// Swap in the snapshot that follows `event`
    pub async fn dispatch(&self, event: DashboardEvent) -> DashboardState {
        self.dispatch_all([event]).await
    }

    pub async fn dispatch_all<I>(&self, events: I) -> DashboardState
    where
        I: IntoIterator<Item = DashboardEvent>,
    {
        let mut dashboard = self.dashboard.write().await;
        let next = dashboard.apply_all(events);
        *dashboard = next.clone();
        next
    }

    /// Fetch the list from the backend and replace the snapshot's list
    ///
    /// A failed fetch keeps the previous list and leaves an error notice.
    /// Overlapping refreshes run one at a time.
    pub async fn refresh(&self) -> ClientResult<usize> {
        let _guard = self.refresh_lock.lock().await;
        match self.backend.fetch_transactions().await {
            Ok(list) => {
                let count = list.len();
                log::info!("Loaded {} transactions from backend", count);
                self.dispatch(DashboardEvent::FetchCompleted(list)).await;
                Ok(count)
            }
            Err(e) => {
                log::warn!("Failed to fetch transactions: {}", e);
                self.dispatch(DashboardEvent::FetchFailed(e.to_string())).await;
                Err(e)
            }
        }
    }

    /// Submit a transaction and re-fetch on success
    pub async fn submit(&self, transaction: &NewTransaction) -> ClientResult<()> {
        match self.backend.add_transaction(transaction).await {
            Ok(_) => {
                log::info!("Added {} transaction of {}", transaction.kind, transaction.amount);
                self.dispatch(DashboardEvent::SubmitSucceeded).await;
                // a failed re-fetch reports itself through the notice
                let _ = self.refresh().await;
                Ok(())
            }
            Err(e) => {
                log::warn!("Failed to add transaction: {}", e);
                self.dispatch(DashboardEvent::SubmitFailed(e.to_string())).await;
                Err(e)
            }
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::dashboard::{htmx_dismiss_notice, htmx_refresh, page_dashboard};
    use routes::range::{api_range, api_set_range, htmx_set_range};
    use routes::reports::{api_chart_bar, api_chart_pie, api_summary};
    use routes::transactions::{api_reload, api_transaction_create, api_transactions, htmx_transaction_store};

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/transactions", get(api_transactions).post(api_transaction_create))
        .route("/api/summary", get(api_summary))
        .route("/api/charts/pie", get(api_chart_pie))
        .route("/api/charts/bar", get(api_chart_bar))
        .route("/api/range", get(api_range).post(api_set_range))
        .route("/api/reload", post(api_reload))
        // HTMX page routes
        .route("/", get(page_dashboard))
        .route("/dashboard", get(page_dashboard))
        .route("/transactions", post(htmx_transaction_store))
        .route("/range", post(htmx_set_range))
        .route("/refresh", post(htmx_refresh))
        .route("/notice/dismiss", post(htmx_dismiss_notice))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    <main class="max-w-5xl mx-auto p-6">{}</main>
</body>
</html>"#,
        finweb_utils::escape_html(title),
        content
    )
}

/// Check if request is from HTMX (partial page update)
pub(crate) fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &axum::http::HeaderMap, title: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        inner_content.to_string()
    } else {
        base_html(title, inner_content)
    }
}

/// Start the HTTP server
///
/// Binds to the configured address and serves until Ctrl-C.
pub async fn start_server(state: AppState) -> anyhow::Result<()> {
    let addr = state.config.bind_address();
    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting finweb server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - / (Dashboard)");
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
}
