//! Transaction records as exchanged with the backend
//!
//! Decoding is forgiving: a record with a missing or odd field
//! still decodes, and the bad field degrades to a neutral value (zero amount,
//! empty description, no date, "other" type) so one broken row never hides
//! the rest of the list.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::time::parse_date;

// ==================== Transaction Type ====================

/// Transaction type enumeration
///
/// Anything other than `income` or `expense` is kept verbatim in `Other`
/// and counted by neither total.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TransactionType {
    Income,
    Expense,
    Other(String),
}

impl Default for TransactionType {
    fn default() -> Self {
        TransactionType::Other(String::new())
    }
}

impl TransactionType {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
            TransactionType::Other(raw) => raw,
        }
    }

    pub fn is_income(&self) -> bool {
        matches!(self, TransactionType::Income)
    }

    pub fn is_expense(&self) -> bool {
        matches!(self, TransactionType::Expense)
    }

    /// Label used in the transaction list, e.g. `INCOME`
    pub fn display_label(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl From<&str> for TransactionType {
    fn from(s: &str) -> Self {
        match s {
            "income" => TransactionType::Income,
            "expense" => TransactionType::Expense,
            other => TransactionType::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for TransactionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TransactionType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) => TransactionType::from(s.as_str()),
            Value::Null => TransactionType::default(),
            other => TransactionType::Other(other.to_string()),
        })
    }
}

// ==================== Transaction Id ====================

/// Backend identifier; only used as a stable list key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TransactionId {
    Int(i64),
    Text(String),
}

impl Default for TransactionId {
    fn default() -> Self {
        TransactionId::Text(String::new())
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionId::Int(id) => write!(f, "{}", id),
            TransactionId::Text(id) => write!(f, "{}", id),
        }
    }
}

impl Serialize for TransactionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TransactionId::Int(id) => serializer.serialize_i64(*id),
            TransactionId::Text(id) => serializer.serialize_str(id),
        }
    }
}

impl<'de> Deserialize<'de> for TransactionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Number(n) => match n.as_i64() {
                Some(id) => TransactionId::Int(id),
                None => TransactionId::Text(n.to_string()),
            },
            Value::String(s) => TransactionId::Text(s),
            Value::Null => TransactionId::default(),
            other => TransactionId::Text(other.to_string()),
        })
    }
}

// ==================== Transaction ====================

/// Transaction information
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Transaction {
    /// Stable list key
    #[serde(default)]
    pub id: TransactionId,
    /// income, expense, or anything else the backend sent
    #[serde(rename = "type", default)]
    pub kind: TransactionType,
    /// Amount in currency units; malformed values decode as 0
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
    /// Free-text label
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    /// Calendar date; `None` when missing or unparsable
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
}

impl Transaction {
    /// Amount counted towards income
    pub fn income_amount(&self) -> f64 {
        if self.kind.is_income() { self.amount } else { 0.0 }
    }

    /// Amount counted towards expenses
    pub fn expense_amount(&self) -> f64 {
        if self.kind.is_expense() { self.amount } else { 0.0 }
    }

    /// Decode a backend list element by element, skipping entries that are not objects
    pub fn decode_list(values: Vec<Value>) -> Vec<Transaction> {
        values
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| {
                // the derived visitor would also take arrays by position
                if !value.is_object() {
                    log::warn!("Skipping non-object transaction at index {}", index);
                    return None;
                }
                match serde_json::from_value::<Transaction>(value) {
                    Ok(tx) => Some(tx),
                    Err(e) => {
                        log::warn!("Skipping malformed transaction at index {}: {}", index, e);
                        None
                    }
                }
            })
            .collect()
    }
}

fn lenient_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let amount = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(if amount.is_finite() { amount } else { 0.0 })
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn lenient_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => parse_date(&s),
        _ => None,
    })
}

// ==================== New Transactions ====================

/// Body of `POST /add_transaction`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    /// Backend stamps today when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl NewTransaction {
    /// Check the fields a JSON caller could get wrong
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.kind.is_income() || self.kind.is_expense()) {
            return Err(CoreError::InvalidType { value: self.kind.to_string() });
        }
        if !self.amount.is_finite() {
            return Err(CoreError::InvalidAmount { value: self.amount.to_string() });
        }
        Ok(())
    }
}

/// Raw add-transaction form fields, exactly as submitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionForm {
    #[serde(rename = "type", default = "default_form_type")]
    pub kind: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: String,
}

fn default_form_type() -> String {
    "income".to_string()
}

impl Default for TransactionForm {
    fn default() -> Self {
        Self {
            kind: default_form_type(),
            amount: String::new(),
            description: String::new(),
            date: String::new(),
        }
    }
}

impl TransactionForm {
    /// Coerce the text fields into a typed request
    pub fn coerce(&self) -> CoreResult<NewTransaction> {
        let kind = TransactionType::from(self.kind.trim());
        if !(kind.is_income() || kind.is_expense()) {
            return Err(CoreError::InvalidType { value: self.kind.clone() });
        }

        let amount = self
            .amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite())
            .ok_or_else(|| CoreError::InvalidAmount { value: self.amount.clone() })?;

        let date = match self.date.trim() {
            "" => None,
            raw => Some(
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| CoreError::InvalidDate { value: self.date.clone() })?,
            ),
        };

        Ok(NewTransaction {
            kind,
            amount,
            description: self.description.trim().to_string(),
            date,
        })
    }
}
