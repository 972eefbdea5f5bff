//! Raw transaction records and their normalization
//!
//! Snapshots coming from storage are not trusted: a record may be missing its
//! amount, carry a date in an unexpected layout, or name a category that does
//! not exist. Normalization turns every well-formed record into a
//! [`Transaction`] and sets the rest aside with a reason, so one bad record
//! never blanks out a whole evaluation.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::{Category, Transaction, TransactionKind};

/// Largest amount a single transaction may carry (one quadrillion)
///
/// Keeps per-category sums far away from the `Decimal` range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// A transaction as it arrives from storage, before validation
///
/// `amount` and `date` are kept as loose JSON values so that a single
/// malformed record does not fail deserialization of the whole snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, alias = "userId")]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub amount: Option<Value>,
    /// `income` or `expense`
    #[serde(default, rename = "type", alias = "kind")]
    pub kind: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub date: Option<Value>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    /// Set when the input row could not be read at all (e.g. invalid UTF-8)
    #[serde(skip)]
    pub unreadable: Option<String>,
}

impl TransactionRecord {
    /// Placeholder for an input row that could not be decoded
    pub fn unreadable(detail: impl Into<String>) -> Self {
        Self {
            unreadable: Some(detail.into()),
            ..Default::default()
        }
    }
}

/// Why a record was left out of the evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason", content = "detail")]
pub enum SkipReason {
    Unreadable(String),
    MissingAmount,
    InvalidAmount(String),
    NegativeAmount(String),
    MissingDate,
    InvalidDate(String),
    InvalidKind(String),
    InvalidCategory(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unreadable(v) => write!(f, "unreadable row: {}", v),
            Self::MissingAmount => write!(f, "missing amount"),
            Self::InvalidAmount(v) => write!(f, "invalid amount: {}", v),
            Self::NegativeAmount(v) => write!(f, "negative amount: {}", v),
            Self::MissingDate => write!(f, "missing date"),
            Self::InvalidDate(v) => write!(f, "invalid date: {}", v),
            Self::InvalidKind(v) => write!(f, "invalid type: {}", v),
            Self::InvalidCategory(v) => write!(f, "invalid category: {}", v),
        }
    }
}

/// A record that did not survive normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRecord {
    /// Position of the record in the input batch
    pub index: usize,
    pub id: Option<String>,
    pub reason: SkipReason,
}

/// Result of normalizing a batch of records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTransactions {
    pub transactions: Vec<Transaction>,
    pub skipped: Vec<SkippedRecord>,
}

impl NormalizedTransactions {
    pub fn skip_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Validate a batch of records
///
/// `default_owner` fills in records that do not carry their own owner
/// reference (snapshots are always for a single owner). Records without an
/// id get a positional one so downstream output stays addressable.
pub fn normalize_records(records: &[TransactionRecord], default_owner: &str) -> NormalizedTransactions {
    let mut out = NormalizedTransactions::default();

    for (index, record) in records.iter().enumerate() {
        match normalize_record(record, index, default_owner) {
            Ok(tx) => out.transactions.push(tx),
            Err(reason) => {
                debug!(index, id = ?record.id, %reason, "Skipping malformed transaction record");
                out.skipped.push(SkippedRecord {
                    index,
                    id: record.id.clone(),
                    reason,
                });
            }
        }
    }

    if !out.skipped.is_empty() {
        warn!(
            skipped = out.skipped.len(),
            kept = out.transactions.len(),
            "Malformed transaction records excluded"
        );
    }

    out
}

fn normalize_record(
    record: &TransactionRecord,
    index: usize,
    default_owner: &str,
) -> std::result::Result<Transaction, SkipReason> {
    if let Some(detail) = &record.unreadable {
        return Err(SkipReason::Unreadable(detail.clone()));
    }

    let amount = match &record.amount {
        None | Some(Value::Null) => return Err(SkipReason::MissingAmount),
        Some(value) => parse_amount_value(value)?,
    };

    let date = match &record.date {
        None | Some(Value::Null) => return Err(SkipReason::MissingDate),
        Some(Value::String(s)) => {
            parse_date(s).ok_or_else(|| SkipReason::InvalidDate(s.clone()))?
        }
        Some(other) => return Err(SkipReason::InvalidDate(other.to_string())),
    };

    // New entries default to expenses
    let kind = match record.kind.as_deref() {
        None => TransactionKind::Expense,
        Some(s) => TransactionKind::from_str(s).map_err(|_| SkipReason::InvalidKind(s.to_string()))?,
    };

    let category = match record.category.as_deref() {
        None => Category::Other,
        Some(s) => Category::from_str(s).map_err(|_| SkipReason::InvalidCategory(s.to_string()))?,
    };

    Ok(Transaction {
        id: record.id.clone().unwrap_or_else(|| format!("record-{}", index)),
        owner_id: record
            .owner_id
            .clone()
            .unwrap_or_else(|| default_owner.to_string()),
        amount,
        kind,
        category,
        date,
        title: non_empty(record.title.as_deref()),
        payment_method: non_empty(record.payment_method.as_deref()),
        note: non_empty(record.note.as_deref()),
    })
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

fn parse_amount_value(value: &Value) -> std::result::Result<Decimal, SkipReason> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => return Err(SkipReason::InvalidAmount(other.to_string())),
    };
    parse_amount(&text)
}

/// Parse an amount string
///
/// Tolerates a leading currency symbol, digit grouping commas and
/// surrounding whitespace. Negative amounts are rejected: direction is
/// carried by the transaction type.
pub fn parse_amount(s: &str) -> std::result::Result<Decimal, SkipReason> {
    let cleaned: String = s
        .trim()
        .trim_start_matches('₹')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return Err(SkipReason::MissingAmount);
    }

    let amount = Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| SkipReason::InvalidAmount(s.to_string()))?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(SkipReason::NegativeAmount(s.to_string()));
    }
    if amount > MAX_AMOUNT {
        return Err(SkipReason::InvalidAmount(s.to_string()));
    }

    Ok(amount.normalize())
}

/// Parse a calendar date
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (the date part is kept as
/// written, without shifting time zones) and `DD/MM/YYYY`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    NaiveDate::parse_from_str(s, "%d/%m/%Y").ok()
}
