//! Derived views: totals and chart-ready series

use serde::{Deserialize, Serialize};

/// Income, expense and net totals over a filtered list
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_balance: f64,
}

impl Summary {
    pub fn from_totals(total_income: f64, total_expenses: f64) -> Self {
        Self {
            total_income,
            total_expenses,
            net_balance: total_income - total_expenses,
        }
    }
}

/// Colours for the income and expense series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesColors {
    pub income: String,
    pub expense: String,
}

impl Default for SeriesColors {
    fn default() -> Self {
        Self {
            income: "#36A2EB".to_string(),
            expense: "#FF6384".to_string(),
        }
    }
}

/// Pie chart input: the two aggregate totals
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PieSeries {
    pub income_total: f64,
    pub expense_total: f64,
}

impl PieSeries {
    pub fn to_chart_data(&self, colors: &SeriesColors) -> ChartData {
        let palette = vec![colors.income.clone(), colors.expense.clone()];
        ChartData {
            labels: vec!["Income".to_string(), "Expenses".to_string()],
            datasets: vec![ChartDataset {
                label: None,
                data: vec![self.income_total, self.expense_total],
                background_color: ColorSpec::PerPoint(palette.clone()),
                hover_background_color: Some(ColorSpec::PerPoint(palette)),
            }],
        }
    }
}

/// Bar chart input: one position per filtered transaction
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BarSeries {
    pub labels: Vec<String>,
    pub income_series: Vec<f64>,
    pub expense_series: Vec<f64>,
}

impl BarSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn to_chart_data(&self, colors: &SeriesColors) -> ChartData {
        ChartData {
            labels: self.labels.clone(),
            datasets: vec![
                ChartDataset {
                    label: Some("Income".to_string()),
                    data: self.income_series.clone(),
                    background_color: ColorSpec::Single(colors.income.clone()),
                    hover_background_color: None,
                },
                ChartDataset {
                    label: Some("Expenses".to_string()),
                    data: self.expense_series.clone(),
                    background_color: ColorSpec::Single(colors.expense.clone()),
                    hover_background_color: None,
                },
            ],
        }
    }
}

/// Chart data in the shape the charting library consumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

/// Chart dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<f64>,
    pub background_color: ColorSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_background_color: Option<ColorSpec>,
}

/// One colour for the whole dataset, or one per data point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Single(String),
    PerPoint(Vec<String>),
}
