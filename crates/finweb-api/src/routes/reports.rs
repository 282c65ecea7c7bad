//! Summary and chart routes (JSON)

use axum::Json;
use finweb_config::Config;
use finweb_core::{ChartData, SeriesColors, Summary};

use crate::AppState;

pub(crate) fn series_colors(config: &Config) -> SeriesColors {
    SeriesColors {
        income: config.charts.income_color.clone(),
        expense: config.charts.expense_color.clone(),
    }
}

/// Totals over the filtered list
pub async fn api_summary(state: axum::extract::State<AppState>) -> Json<Summary> {
    let snapshot = state.snapshot().await;
    Json(snapshot.view().summary)
}

/// Pie chart data: income vs. expenses
pub async fn api_chart_pie(state: axum::extract::State<AppState>) -> Json<ChartData> {
    let snapshot = state.snapshot().await;
    Json(snapshot.view().pie.to_chart_data(&series_colors(&state.config)))
}

/// Bar chart data: one position per filtered transaction
pub async fn api_chart_bar(state: axum::extract::State<AppState>) -> Json<ChartData> {
    let snapshot = state.snapshot().await;
    Json(snapshot.view().bar.to_chart_data(&series_colors(&state.config)))
}
