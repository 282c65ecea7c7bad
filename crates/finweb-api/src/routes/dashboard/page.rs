//! Dashboard page rendering
//!
//! The whole dashboard lives in one `#dashboard` container. Every HTMX form on
//! the page posts to its handler and swaps that container with the response,
//! so one render function serves the full page and all partial updates.

use axum::http::HeaderMap;
use axum::response::Html;
use finweb_config::Config;
use finweb_core::{DashboardEvent, DashboardState, DashboardView, Notice, NoticeLevel};
use finweb_utils::{escape_html, format_money};

use crate::routes::reports::series_colors;
use crate::{is_htmx_request, page_response, AppState};

/// Dashboard page (`/` and `/dashboard`)
///
/// A full page load re-fetches from the backend; a failed fetch still renders
/// the last list with an error notice.
pub async fn page_dashboard(
    state: axum::extract::State<AppState>,
    headers: HeaderMap,
) -> Html<String> {
    if !is_htmx_request(&headers) {
        let _ = state.refresh().await;
    }
    render_page(&state, &headers).await
}

/// HTMX: Re-fetch the list and re-render
pub async fn htmx_refresh(
    state: axum::extract::State<AppState>,
    headers: HeaderMap,
) -> Html<String> {
    let _ = state.refresh().await;
    render_page(&state, &headers).await
}

/// HTMX: Dismiss the current notice
pub async fn htmx_dismiss_notice(
    state: axum::extract::State<AppState>,
    headers: HeaderMap,
) -> Html<String> {
    state.dispatch(DashboardEvent::NoticeDismissed).await;
    render_page(&state, &headers).await
}

/// Render the current snapshot as a full page or a partial
pub async fn render_page(state: &AppState, headers: &HeaderMap) -> Html<String> {
    let snapshot = state.snapshot().await;
    let content = render_dashboard(&snapshot, &state.config);
    Html(page_response(headers, &state.config.display.title, &content))
}

/// Render the `#dashboard` container
pub fn render_dashboard(snapshot: &DashboardState, config: &Config) -> String {
    let view = snapshot.view();
    format!(
        r#"<div id='dashboard' class='space-y-6'>
    <div class='flex items-center justify-between'>
        <h1 class='text-3xl font-bold text-indigo-600'>{title}</h1>
        <button class='px-3 py-1.5 text-sm border rounded-lg bg-white hover:bg-gray-50'
                hx-post='/refresh' hx-target='#dashboard' hx-swap='outerHTML'>Refresh</button>
    </div>
    {notice}
    {form}
    {summaries}
    {filter}
    {list}
    {charts}
</div>"#,
        title = escape_html(&config.display.title),
        notice = render_notice(snapshot.notice()),
        form = render_transaction_form(),
        summaries = render_summaries(&view, config),
        filter = render_date_filter(&view),
        list = render_transaction_list(&view, config),
        charts = render_charts(&view, config),
    )
}

fn render_notice(notice: Option<&Notice>) -> String {
    let Some(notice) = notice else {
        return String::new();
    };
    let class = match notice.level {
        NoticeLevel::Success => "bg-green-50 border-green-200 text-green-700",
        NoticeLevel::Error => "bg-red-50 border-red-200 text-red-700",
    };
    let detail = notice
        .detail
        .as_deref()
        .map(|d| format!("<span class='text-sm opacity-75'> ({})</span>", escape_html(d)))
        .unwrap_or_default();
    format!(
        r#"<div id='notice' class='flex items-center justify-between p-3 rounded-lg border {}' role='alert'>
        <p>{}{}</p>
        <button class='text-sm underline' hx-post='/notice/dismiss' hx-target='#dashboard' hx-swap='outerHTML'>Dismiss</button>
    </div>"#,
        class,
        escape_html(&notice.message),
        detail
    )
}

fn render_transaction_form() -> String {
    r#"<form id='transaction-form' class='bg-white rounded-xl shadow-sm p-6 grid grid-cols-1 md:grid-cols-5 gap-3 items-end'
          hx-post='/transactions' hx-target='#dashboard' hx-swap='outerHTML'>
        <label class='block'><span class='text-sm text-gray-600'>Type</span>
            <select name='type' class='w-full px-2 py-1.5 border rounded-lg bg-white'>
                <option value='income' selected>Income</option>
                <option value='expense'>Expense</option>
            </select>
        </label>
        <label class='block'><span class='text-sm text-gray-600'>Amount</span>
            <input type='number' name='amount' step='0.01' required placeholder='Amount' class='w-full px-2 py-1.5 border rounded-lg'>
        </label>
        <label class='block'><span class='text-sm text-gray-600'>Description</span>
            <input type='text' name='description' placeholder='Description' class='w-full px-2 py-1.5 border rounded-lg'>
        </label>
        <label class='block'><span class='text-sm text-gray-600'>Date</span>
            <input type='date' name='date' class='w-full px-2 py-1.5 border rounded-lg'>
        </label>
        <button type='submit' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Add Transaction</button>
    </form>"#
        .to_string()
}

fn render_summaries(view: &DashboardView<'_>, config: &Config) -> String {
    let symbol = &config.display.currency_symbol;
    let dp = config.display.decimal_places;
    let summary = &view.summary;
    let net_class = if summary.net_balance < 0.0 { "text-red-700" } else { "text-green-700" };
    format!(
        r#"<section id='summaries'>
        <h2 class='text-xl font-semibold mb-3'>Financial Summaries</h2>
        <div class='grid grid-cols-1 md:grid-cols-3 gap-4'>
            <div class='bg-blue-50 p-4 rounded-lg border border-blue-200'><p class='text-sm text-blue-600'>Total Income</p><p class='text-2xl font-bold text-blue-700'>{}</p></div>
            <div class='bg-red-50 p-4 rounded-lg border border-red-200'><p class='text-sm text-red-600'>Total Expenses</p><p class='text-2xl font-bold text-red-700'>{}</p></div>
            <div class='bg-gray-50 p-4 rounded-lg border'><p class='text-sm text-gray-600'>Net Balance</p><p class='text-2xl font-bold {}'>{}</p></div>
        </div>
    </section>"#,
        escape_html(&format_money(summary.total_income, symbol, dp)),
        escape_html(&format_money(summary.total_expenses, symbol, dp)),
        net_class,
        escape_html(&format_money(summary.net_balance, symbol, dp)),
    )
}

fn render_date_filter(view: &DashboardView<'_>) -> String {
    let start = view.range.start.map(|d| d.to_string()).unwrap_or_default();
    let end = view.range.end.map(|d| d.to_string()).unwrap_or_default();
    format!(
        r#"<form id='date-filter' class='flex flex-wrap items-center gap-3 p-3 bg-white rounded-lg border shadow-sm'
          hx-post='/range' hx-trigger='change' hx-target='#dashboard' hx-swap='outerHTML'>
        <span class='text-sm font-medium text-gray-600'>Date range:</span>
        <input type='date' name='start_date' value='{}' class='px-2 py-1.5 text-sm border rounded-lg'>
        <span class='text-gray-400'>to</span>
        <input type='date' name='end_date' value='{}' class='px-2 py-1.5 text-sm border rounded-lg'>
        <button type='button' class='px-2 py-1 text-sm text-gray-600 underline'
                hx-post='/range' hx-vals='{{"start_date": "", "end_date": ""}}' hx-target='#dashboard' hx-swap='outerHTML'>Clear</button>
        <span class='text-sm text-gray-500'>{}</span>
    </form>"#,
        start,
        end,
        escape_html(&view.range.description())
    )
}

fn render_transaction_list(view: &DashboardView<'_>, config: &Config) -> String {
    let symbol = &config.display.currency_symbol;
    let dp = config.display.decimal_places;

    let items: Vec<String> = view
        .filtered
        .iter()
        .map(|t| {
            format!(
                "<li class='py-2 border-b' data-id='{}'>{}: {} - {}</li>",
                escape_html(&t.id.to_string()),
                escape_html(&t.kind.display_label()),
                escape_html(&format_money(t.amount, symbol, dp)),
                escape_html(&t.description)
            )
        })
        .collect();

    let body = if items.is_empty() {
        "<p class='text-gray-500'>No transactions</p>".to_string()
    } else {
        format!("<ul>{}</ul>", items.join(""))
    };

    format!(
        r#"<section id='transactions' class='bg-white rounded-xl shadow-sm p-6'>
        <h2 class='text-xl font-semibold mb-3'>Transactions <span class='text-sm text-gray-500'>({} of {})</span></h2>
        {}
    </section>"#,
        view.filtered.len(),
        view.total_count,
        body
    )
}

/// Serialize for embedding inside a `<script>` element
fn script_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/")
}

fn render_charts(view: &DashboardView<'_>, config: &Config) -> String {
    let colors = series_colors(config);
    let charts = &config.charts;
    let pie = script_json(&view.pie.to_chart_data(&colors));
    let bar = script_json(&view.bar.to_chart_data(&colors));
    let pie_legend = script_json(&charts.pie_legend);
    let bar_legend = script_json(&charts.bar_legend);

    format!(
        r#"<section id='charts' class='grid grid-cols-1 lg:grid-cols-2 gap-6'>
        <div class='bg-white rounded-xl shadow-sm p-6'>
            <h2 class='text-lg font-semibold mb-4'>Income vs. Expenses</h2>
            <canvas id='pie-chart'></canvas>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6'>
            <h2 class='text-lg font-semibold mb-4'>Transaction Trends</h2>
            <canvas id='bar-chart'></canvas>
        </div>
        <script>
        (function() {{
            window.finwebCharts = window.finwebCharts || {{}};
            function draw(id, type, data, options) {{
                if (window.finwebCharts[id]) {{
                    window.finwebCharts[id].destroy();
                }}
                const canvas = document.getElementById(id);
                if (!canvas || typeof Chart === 'undefined') return;
                window.finwebCharts[id] = new Chart(canvas, {{ type: type, data: data, options: options }});
            }}
            draw('pie-chart', 'pie', {pie}, {{
                plugins: {{ legend: {{ position: {pie_legend} }} }}
            }});
            draw('bar-chart', 'bar', {bar}, {{
                responsive: true,
                plugins: {{ legend: {{ position: {bar_legend} }} }},
                scales: {{ x: {{ beginAtZero: true }}, y: {{ beginAtZero: true }} }}
            }});
        }})();
        </script>
    </section>"#,
        pie = pie,
        bar = bar,
        pie_legend = pie_legend,
        bar_legend = bar_legend,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_router;
    use crate::test_support::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use finweb_core::{Transaction, TransactionId, TransactionType};
    use std::sync::Arc;
    use tower::ServiceExt;

    #[test]
    fn test_render_summaries_and_list() {
        let snapshot = DashboardState::default().apply(DashboardEvent::FetchCompleted(vec![
            tx(1, TransactionType::Income, 100.0, "2024-01-01"),
            tx(2, TransactionType::Expense, 40.0, "2024-01-02"),
        ]));
        let html = render_dashboard(&snapshot, &Config::default());

        assert!(html.contains("AI Financial Platform"));
        assert!(html.contains("Financial Summaries"));
        assert!(html.contains("$100.00"));
        assert!(html.contains("$40.00"));
        assert!(html.contains("$60.00"));
        assert!(html.contains("INCOME: $100.00 - tx 1"));
        assert!(html.contains("EXPENSE: $40.00 - tx 2"));
        assert!(html.contains("Income vs. Expenses"));
        assert!(html.contains("Transaction Trends"));
        assert!(html.contains("beginAtZero: true"));
        assert!(html.contains(r#"position: "bottom""#));
        assert!(html.contains(r#"position: "top""#));
    }

    #[test]
    fn test_render_escapes_descriptions() {
        let snapshot = DashboardState::default().apply(DashboardEvent::FetchCompleted(vec![Transaction {
            id: TransactionId::Int(1),
            kind: TransactionType::Expense,
            amount: 1.0,
            description: "<script>alert(1)</script>".to_string(),
            date: None,
        }]));
        let html = render_dashboard(&snapshot, &Config::default());
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_render_notice() {
        let snapshot = DashboardState::default().apply(DashboardEvent::SubmitSucceeded);
        let html = render_dashboard(&snapshot, &Config::default());
        assert!(html.contains("Transaction added successfully!"));

        let html = render_dashboard(&snapshot.apply(DashboardEvent::NoticeDismissed), &Config::default());
        assert!(!html.contains("id='notice'"));
    }

    #[test]
    fn test_script_json_breaks_closing_tags() {
        assert_eq!(script_json(&"</script>"), r#""<\/script>""#);
    }

    #[tokio::test]
    async fn test_page_full_and_partial() {
        let state = loaded_state(sample_backend()).await;
        let router = create_router(state);

        let response = router
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("id='dashboard'"));

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/dashboard")
                    .header("HX-Request", "true")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let html = body_string(response).await;
        assert!(html.starts_with("<div id='dashboard'"));
    }

    #[tokio::test]
    async fn test_full_page_load_refetches() {
        let backend = Arc::new(sample_backend());
        let state = AppState::new(Config::default(), backend.clone());
        let router = create_router(state);

        let response = router
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let html = body_string(response).await;
        assert!(html.contains("EXPENSE: $20.00 - tx 2"));
        assert!(!html.contains("tx 3"));

        backend.list.lock().unwrap().push(tx(3, TransactionType::Income, 7.0, "2024-03-01"));

        let response = router
            .oneshot(Request::builder().uri("/dashboard").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let html = body_string(response).await;
        assert!(html.contains("INCOME: $7.00 - tx 3"));
        assert!(html.contains("$57.00"));
    }

    #[tokio::test]
    async fn test_dismiss_clears_notice() {
        let state = loaded_state(sample_backend()).await;
        state.dispatch(DashboardEvent::SubmitSucceeded).await;

        let response = create_router(state.clone())
            .oneshot(Request::builder().method("POST").uri("/notice/dismiss").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(state.snapshot().await.notice().is_none());
    }
}
