//! Transaction aggregator: the filter and summary pipeline
//!
//! Every function here is pure and total. The filtered list feeds three
//! independent consumers (totals, pie series, bar series), and all three are
//! recomputed from scratch whenever the list or the range changes.
//!
//! Types other than `income` and `expense` are excluded from every sum and
//! contribute zero to both bar series.

use chrono::NaiveDate;

use crate::models::Transaction;
use crate::reports::{BarSeries, PieSeries, Summary};
use crate::time::{DateRange, RangeFilter};

/// Keep the transactions inside `[start, end]`, preserving order
///
/// When either endpoint is missing the whole list is returned. A reversed
/// range yields nothing. Undated transactions are dropped by an active range.
pub fn filter_by_range(
    transactions: &[Transaction],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<&Transaction> {
    filter_by(transactions, &DateRange::new(start, end))
}

/// Same as [`filter_by_range`] with a prepared range
pub fn filter_by<'a>(transactions: &'a [Transaction], range: &DateRange) -> Vec<&'a Transaction> {
    if !range.is_active() {
        return transactions.iter().collect();
    }
    transactions.iter().filter(|t| t.in_range(range)).collect()
}

fn sum_by_type<'a, I>(transactions: I) -> (f64, f64)
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .fold((0.0, 0.0), |(income, expense), t| {
            (income + t.income_amount(), expense + t.expense_amount())
        })
}

/// Income, expense and net totals
pub fn compute_summary<'a, I>(transactions: I) -> Summary
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let (income, expense) = sum_by_type(transactions);
    Summary::from_totals(income, expense)
}

/// The two totals, shaped for the pie chart
pub fn to_pie_series<'a, I>(transactions: I) -> PieSeries
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let (income_total, expense_total) = sum_by_type(transactions);
    PieSeries { income_total, expense_total }
}

/// One bar position per transaction, labelled by position
pub fn to_bar_series<'a, I>(transactions: I) -> BarSeries
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut series = BarSeries::default();
    for (index, t) in transactions.into_iter().enumerate() {
        series.labels.push(format!("Transaction {}", index + 1));
        series.income_series.push(t.income_amount());
        series.expense_series.push(t.expense_amount());
    }
    series
}
