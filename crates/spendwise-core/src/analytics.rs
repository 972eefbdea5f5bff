//! Dashboard and analytics aggregates
//!
//! Totals shown around the insight list: balance, month-to-date spending,
//! category shares, month-by-month trend and per-budget progress.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::insights::BudgetEvaluation;
use crate::models::{Category, Transaction, TransactionKind};

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Headline totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    /// Income minus expenses, may be negative
    pub balance: Decimal,
    /// Expenses in `now`'s calendar month
    pub this_month_expense: Decimal,
}

/// One category's slice of all-time spending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: Category,
    pub amount: Decimal,
    /// Share of total expenses, 0-100, two decimal places
    pub percentage: Decimal,
}

/// Income and expense for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    /// e.g. "Oct 2026"
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub income: Decimal,
    pub expense: Decimal,
}

/// How far along a budget is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetProgress {
    pub category: Category,
    pub spent: Decimal,
    pub limit: Decimal,
    /// Capped at 100 for display
    pub percentage: Decimal,
    /// Zero once over budget
    pub remaining: Decimal,
    pub is_over: bool,
}

pub fn dashboard_stats(transactions: &[Transaction], now: NaiveDate) -> DashboardStats {
    let mut stats = DashboardStats::default();

    for tx in transactions {
        match tx.kind {
            TransactionKind::Income => accumulate(&mut stats.total_income, tx.amount),
            TransactionKind::Expense => {
                accumulate(&mut stats.total_expenses, tx.amount);
                if tx.date.year() == now.year() && tx.date.month() == now.month() {
                    accumulate(&mut stats.this_month_expense, tx.amount);
                }
            }
        }
    }

    stats.balance = stats.total_income - stats.total_expenses;
    stats
}

/// Expense totals per category, largest first
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryShare> {
    let mut totals: BTreeMap<Category, Decimal> = BTreeMap::new();
    for tx in transactions.iter().filter(|tx| tx.is_expense()) {
        accumulate(totals.entry(tx.category).or_insert(Decimal::ZERO), tx.amount);
    }

    let mut grand_total = Decimal::ZERO;
    for amount in totals.values() {
        accumulate(&mut grand_total, *amount);
    }

    let mut shares: Vec<CategoryShare> = totals
        .into_iter()
        .map(|(category, amount)| CategoryShare {
            category,
            amount,
            percentage: percent_of(amount, grand_total),
        })
        .collect();

    // Stable sort keeps category order for ties
    shares.sort_by(|a, b| b.amount.cmp(&a.amount));
    shares
}

/// Income/expense per month, chronological, limited to the last `months`
/// months that have any activity
pub fn monthly_trend(transactions: &[Transaction], months: usize) -> Vec<MonthlyTotals> {
    let mut by_month: BTreeMap<(i32, u32), (Decimal, Decimal)> = BTreeMap::new();

    for tx in transactions {
        let entry = by_month
            .entry((tx.date.year(), tx.date.month()))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        match tx.kind {
            TransactionKind::Income => accumulate(&mut entry.0, tx.amount),
            TransactionKind::Expense => accumulate(&mut entry.1, tx.amount),
        }
    }

    let skip = by_month.len().saturating_sub(months);
    by_month
        .into_iter()
        .skip(skip)
        .map(|((year, month), (income, expense))| MonthlyTotals {
            label: month_label(year, month),
            year,
            month,
            income,
            expense,
        })
        .collect()
}

/// Progress bars for evaluated budgets
pub fn budget_progress(evaluations: &[BudgetEvaluation]) -> Vec<BudgetProgress> {
    evaluations
        .iter()
        .map(|eval| BudgetProgress {
            category: eval.category,
            spent: eval.spent,
            limit: eval.limit,
            percentage: percent_of(eval.spent, eval.limit).min(Decimal::ONE_HUNDRED),
            remaining: (eval.limit - eval.spent).max(Decimal::ZERO),
            is_over: eval.spent > eval.limit,
        })
        .collect()
}

fn month_label(year: i32, month: u32) -> String {
    let name = MONTH_NAMES
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("???");
    format!("{} {}", name, year)
}

/// Add into a running total, leaving it unchanged on overflow
fn accumulate(total: &mut Decimal, amount: Decimal) {
    match total.checked_add(amount) {
        Some(sum) => *total = sum,
        None => tracing::warn!(%amount, "Skipping amount that would overflow a total"),
    }
}

/// `part / whole * 100`, rounded to two places; zero when `whole` is not positive
///
/// Saturates at `Decimal::MAX` when the ratio is out of range.
pub(crate) fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|pct| pct.round_dp(2))
        .unwrap_or(Decimal::MAX)
}
