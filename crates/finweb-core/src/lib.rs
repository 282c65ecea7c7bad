//! Core transaction model and aggregation pipeline
//!
//! - models: transactions as received from the backend, and add requests
//! - time: date range selection
//! - aggregator: filter, totals, pie and bar series
//! - reports: the derived view types
//! - dashboard: immutable page snapshots driven by events

pub mod aggregator;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod reports;
pub mod time;

pub use aggregator::{compute_summary, filter_by, filter_by_range, to_bar_series, to_pie_series};
pub use dashboard::{DashboardEvent, DashboardState, DashboardView, Notice, NoticeLevel};
pub use error::{CoreError, CoreResult, ErrorCode, ErrorSeverity};
pub use models::{NewTransaction, Transaction, TransactionForm, TransactionId, TransactionType};
pub use reports::{BarSeries, ChartData, ChartDataset, ColorSpec, PieSeries, SeriesColors, Summary};
pub use time::{parse_date, DateRange, RangeFilter};
