//! Snapshot input feed
//!
//! A snapshot is everything known about one owner at one moment: raw
//! transaction records, budgets and savings goals, as a single JSON document.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{Budget, SavingsGoal};
use crate::records::{normalize_records, NormalizedTransactions, TransactionRecord};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(alias = "userId")]
    pub owner_id: String,
    #[serde(default, alias = "expenses")]
    pub transactions: Vec<TransactionRecord>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub goals: Vec<SavingsGoal>,
}

impl Snapshot {
    pub fn from_json(content: &str) -> Result<Self> {
        let mut snapshot: Snapshot = serde_json::from_str(content)?;
        if snapshot.owner_id.trim().is_empty() {
            return Err(Error::InvalidData("snapshot has no owner id".into()));
        }
        snapshot.fill_owner();
        Ok(snapshot)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let snapshot = Self::from_json(&content)?;
        tracing::debug!(
            path = %path.display(),
            transactions = snapshot.transactions.len(),
            budgets = snapshot.budgets.len(),
            goals = snapshot.goals.len(),
            "Loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Replace the transaction records (e.g. with rows read from CSV)
    pub fn with_transactions(mut self, records: Vec<TransactionRecord>) -> Self {
        self.transactions = records;
        self
    }

    /// Validate the transaction records, keeping only the snapshot owner's
    pub fn normalized_transactions(&self) -> NormalizedTransactions {
        let mut normalized = normalize_records(&self.transactions, &self.owner_id);
        let before = normalized.transactions.len();
        normalized
            .transactions
            .retain(|tx| tx.owner_id == self.owner_id);
        let foreign = before - normalized.transactions.len();
        if foreign > 0 {
            tracing::debug!(
                owner = %self.owner_id,
                foreign,
                "Ignoring transactions of other owners"
            );
        }
        normalized
    }

    /// Savings goals that belong to the snapshot owner
    pub fn owned_goals(&self) -> impl Iterator<Item = &SavingsGoal> {
        self.goals.iter().filter(move |g| g.owner_id == self.owner_id)
    }

    /// Budgets and goals written without an owner belong to the snapshot owner
    fn fill_owner(&mut self) {
        for budget in self.budgets.iter_mut().filter(|b| b.owner_id.is_empty()) {
            budget.owner_id = self.owner_id.clone();
        }
        for goal in self.goals.iter_mut().filter(|g| g.owner_id.is_empty()) {
            goal.owner_id = self.owner_id.clone();
        }
    }
}
