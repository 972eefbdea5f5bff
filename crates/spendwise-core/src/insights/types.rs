//! Core types for the Insight Engine

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Category;

/// Spend per category inside a window
///
/// Only categories with at least one matching expense appear as keys.
pub type SpendByCategory = BTreeMap<Category, Decimal>;

/// Half-open date range `[start, end_exclusive)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end_exclusive: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end_exclusive: NaiveDate) -> Self {
        Self {
            start,
            end_exclusive,
        }
    }

    /// First day of `now`'s month up to and including `now`
    pub fn month_to_date(now: NaiveDate) -> Self {
        let start = now.with_day(1).unwrap_or(now);
        let end_exclusive = now.checked_add_days(Days::new(1)).unwrap_or(now);
        Self::new(start, end_exclusive)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end_exclusive
    }

    /// True when no date can fall inside the window
    pub fn is_empty(&self) -> bool {
        self.start >= self.end_exclusive
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end_exclusive)
    }
}

/// Severity level of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational - no action needed
    Info,
    /// Approaching a limit
    Warning,
    /// Over a limit
    Danger,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Severity::Info),
            "warning" => Ok(Severity::Warning),
            "danger" => Ok(Severity::Danger),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// Classification of one budget against its spend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    /// At or under the warning threshold
    Ok,
    /// Above the warning threshold, not over the limit
    Warning,
    /// Over the limit
    Danger,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetStatus::Ok => "ok",
            BudgetStatus::Warning => "warning",
            BudgetStatus::Danger => "danger",
        }
    }

    /// Insight severity for this status, `None` when nothing is worth showing
    pub fn severity(&self) -> Option<Severity> {
        match self {
            BudgetStatus::Ok => None,
            BudgetStatus::Warning => Some(Severity::Warning),
            BudgetStatus::Danger => Some(Severity::Danger),
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Spend compared to one budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetEvaluation {
    pub category: Category,
    pub spent: Decimal,
    pub limit: Decimal,
    pub status: BudgetStatus,
}

/// A human-readable observation about spending vs budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub severity: Severity,
    pub message: String,
    pub category: Category,
}

/// A budget that has been exceeded, ready for a notifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEvent {
    pub owner_id: String,
    pub category: Category,
    pub spent: Decimal,
    pub limit: Decimal,
    pub evaluated_at: DateTime<Utc>,
}
