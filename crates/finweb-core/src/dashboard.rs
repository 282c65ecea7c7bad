//! Dashboard state as immutable snapshots
//!
//! The page state is a snapshot of (transaction list, date range, notice).
//! A snapshot never changes in place: each event produces the next one via
//! [`DashboardState::apply`], and every derived view comes from
//! [`DashboardState::view`].

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregator::{compute_summary, filter_by, to_bar_series, to_pie_series};
use crate::models::Transaction;
use crate::reports::{BarSeries, PieSeries, Summary};
use crate::time::DateRange;

pub const SUBMIT_SUCCESS_MESSAGE: &str = "Transaction added successfully!";
pub const SUBMIT_FAILURE_MESSAGE: &str = "Failed to add transaction.";
pub const FETCH_FAILURE_MESSAGE: &str = "Failed to load transactions.";

/// Notice severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// User-visible message left by the last fetch or submit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    /// Underlying cause, for errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into(), detail: None }
    }

    pub fn error(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into(), detail: Some(detail.into()) }
    }
}

/// Everything that can change the dashboard
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// The backend returned a full list
    FetchCompleted(Vec<Transaction>),
    /// The list request failed
    FetchFailed(String),
    /// The backend accepted a new transaction; a fetch follows
    SubmitSucceeded,
    /// The backend rejected the transaction or could not be reached
    SubmitFailed(String),
    StartDateChanged(Option<NaiveDate>),
    EndDateChanged(Option<NaiveDate>),
    RangeCleared,
    NoticeDismissed,
}

/// Immutable dashboard snapshot
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    transactions: Arc<Vec<Transaction>>,
    range: DateRange,
    notice: Option<Notice>,
}

impl DashboardState {
    pub fn new(transactions: Vec<Transaction>, range: DateRange) -> Self {
        Self {
            transactions: Arc::new(transactions),
            range,
            notice: None,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Produce the snapshot that follows `event`
    pub fn apply(&self, event: DashboardEvent) -> DashboardState {
        let mut next = self.clone();
        match event {
            DashboardEvent::FetchCompleted(list) => {
                log::debug!("Dashboard list replaced: {} transactions", list.len());
                next.transactions = Arc::new(list);
            }
            DashboardEvent::FetchFailed(detail) => {
                next.notice = Some(Notice::error(FETCH_FAILURE_MESSAGE, detail));
            }
            DashboardEvent::SubmitSucceeded => {
                next.notice = Some(Notice::success(SUBMIT_SUCCESS_MESSAGE));
            }
            DashboardEvent::SubmitFailed(detail) => {
                next.notice = Some(Notice::error(SUBMIT_FAILURE_MESSAGE, detail));
            }
            DashboardEvent::StartDateChanged(start) => {
                next.range = next.range.with_start(start);
            }
            DashboardEvent::EndDateChanged(end) => {
                next.range = next.range.with_end(end);
            }
            DashboardEvent::RangeCleared => {
                next.range = DateRange::default();
            }
            DashboardEvent::NoticeDismissed => {
                next.notice = None;
            }
        }
        next
    }

    /// Apply several events in order
    pub fn apply_all<I>(&self, events: I) -> DashboardState
    where
        I: IntoIterator<Item = DashboardEvent>,
    {
        events.into_iter().fold(self.clone(), |state, event| state.apply(event))
    }

    /// Derive the filtered list, totals and chart series
    pub fn view(&self) -> DashboardView<'_> {
        let filtered = filter_by(&self.transactions, &self.range);
        let summary = compute_summary(filtered.iter().copied());
        let pie = to_pie_series(filtered.iter().copied());
        let bar = to_bar_series(filtered.iter().copied());
        log::debug!(
            "Dashboard view: {} of {} transactions in range ({})",
            filtered.len(),
            self.transactions.len(),
            self.range.description()
        );
        DashboardView {
            range: self.range,
            total_count: self.transactions.len(),
            filtered,
            summary,
            pie,
            bar,
        }
    }
}

/// Views derived from one snapshot
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView<'a> {
    pub range: DateRange,
    pub total_count: usize,
    pub filtered: Vec<&'a Transaction>,
    pub summary: Summary,
    pub pie: PieSeries,
    pub bar: BarSeries,
}
