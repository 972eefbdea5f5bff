//! Domain models for Spendwise

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Spending category
///
/// The set is closed: adding a category means adding a variant here, and the
/// compiler then points at every `match` that has to learn about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Shopping,
    Travel,
    Bills,
    Recharge,
    Rent,
    Salary,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Shopping => "Shopping",
            Self::Travel => "Travel",
            Self::Bills => "Bills",
            Self::Recharge => "Recharge",
            Self::Rent => "Rent",
            Self::Salary => "Salary",
            Self::Other => "Other",
        }
    }

    /// Every category, in display order
    pub fn all() -> &'static [Category] {
        &[
            Self::Food,
            Self::Shopping,
            Self::Travel,
            Self::Bills,
            Self::Recharge,
            Self::Rent,
            Self::Salary,
            Self::Other,
        ]
    }

    /// Categories a budget can be set for (everything except income labels)
    pub fn budgetable() -> impl Iterator<Item = Category> {
        Self::all().iter().copied().filter(|c| *c != Self::Salary)
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "food" => Ok(Self::Food),
            "shopping" => Ok(Self::Shopping),
            "travel" => Ok(Self::Travel),
            "bills" => Ok(Self::Bills),
            "recharge" => Ok(Self::Recharge),
            "rent" => Ok(Self::Rent),
            "salary" => Ok(Self::Salary),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated transaction
///
/// Produced by [`crate::records::normalize_records`]; the engine never
/// mutates one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Storage identifier, opaque to the engine
    pub id: String,
    pub owner_id: String,
    /// Always non-negative; direction comes from `kind`
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub category: Category,
    pub date: NaiveDate,
    pub title: Option<String>,
    /// Cash, UPI, Card, ...
    pub payment_method: Option<String>,
    pub note: Option<String>,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

/// A monthly spending ceiling for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    #[serde(default, alias = "userId", alias = "ownerId")]
    pub owner_id: String,
    pub category: Category,
    /// Expected to be positive; non-positive limits are skipped at evaluation
    #[serde(alias = "amount")]
    pub limit: Decimal,
}

impl Budget {
    pub fn new(owner_id: impl Into<String>, category: Category, limit: Decimal) -> Self {
        Self {
            owner_id: owner_id.into(),
            category,
            limit,
        }
    }
}

/// A savings target the user is working toward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    #[serde(default)]
    pub id: String,
    #[serde(default, alias = "userId", alias = "ownerId")]
    pub owner_id: String,
    pub title: String,
    #[serde(alias = "targetAmount")]
    pub target_amount: Decimal,
    #[serde(default, alias = "currentAmount")]
    pub current_amount: Decimal,
    #[serde(default, deserialize_with = "blank_date_as_none")]
    pub deadline: Option<NaiveDate>,
}

/// Goal forms submit an empty string when no deadline is picked
fn blank_date_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!(Category::from_str("food").unwrap(), Category::Food);
        assert_eq!(Category::from_str(" RENT ").unwrap(), Category::Rent);
        assert!(Category::from_str("Groceries").is_err());
    }

    #[test]
    fn test_category_display_round_trips_label() {
        for cat in Category::all() {
            assert_eq!(Category::from_str(&cat.to_string()).unwrap(), *cat);
        }
    }

    #[test]
    fn test_budgetable_excludes_salary() {
        let cats: Vec<_> = Category::budgetable().collect();
        assert_eq!(cats.len(), 7);
        assert!(!cats.contains(&Category::Salary));
    }

    #[test]
    fn test_transaction_kind_serde() {
        let json = serde_json::to_string(&TransactionKind::Expense).unwrap();
        assert_eq!(json, "\"expense\"");
        let kind: TransactionKind = serde_json::from_str("\"income\"").unwrap();
        assert_eq!(kind, TransactionKind::Income);
    }

    #[test]
    fn test_goal_accepts_blank_deadline() {
        let goal: SavingsGoal = serde_json::from_str(
            r#"{"title": "Laptop", "targetAmount": 80000, "currentAmount": "1500", "deadline": ""}"#,
        )
        .unwrap();
        assert_eq!(goal.deadline, None);
        assert_eq!(goal.current_amount, Decimal::from(1500));
    }

    #[test]
    fn test_budget_accepts_alternate_field_names() {
        let budget: Budget =
            serde_json::from_str(r#"{"userId": "u1", "category": "Food", "amount": 5000}"#).unwrap();
        assert_eq!(budget.owner_id, "u1");
        assert_eq!(budget.limit, Decimal::from(5000));
    }
}
