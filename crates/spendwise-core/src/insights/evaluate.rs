//! Threshold Evaluator - classifies each budget against its spend

use rust_decimal::Decimal;

use crate::models::Budget;

use super::types::{BudgetEvaluation, BudgetStatus, SpendByCategory};

/// Fraction of a limit above which a budget is flagged as approaching it (0.8)
pub const WARNING_RATIO: Decimal = Decimal::from_parts(8, 0, 0, false, 1);

/// Classify a spend against a positive limit
///
/// The ranges are disjoint: over the limit is `Danger`, above
/// `limit * WARNING_RATIO` up to and including the limit is `Warning`,
/// anything else is `Ok`.
pub fn classify(spent: Decimal, limit: Decimal) -> BudgetStatus {
    if spent > limit {
        BudgetStatus::Danger
    } else if spent > limit * WARNING_RATIO {
        BudgetStatus::Warning
    } else {
        BudgetStatus::Ok
    }
}

/// Whether a budget can take part in evaluation
pub fn has_valid_limit(budget: &Budget) -> bool {
    budget.limit > Decimal::ZERO
}

/// Compare spend to every budget, in the order the budgets were supplied
///
/// Budgets with a zero or negative limit are skipped.
pub fn evaluate(spent_by_category: &SpendByCategory, budgets: &[Budget]) -> Vec<BudgetEvaluation> {
    budgets
        .iter()
        .filter(|budget| {
            let valid = has_valid_limit(budget);
            if !valid {
                tracing::warn!(
                    category = budget.category.as_str(),
                    limit = %budget.limit,
                    "Skipping budget with non-positive limit"
                );
            }
            valid
        })
        .map(|budget| {
            let spent = spent_by_category
                .get(&budget.category)
                .copied()
                .unwrap_or(Decimal::ZERO);

            BudgetEvaluation {
                category: budget.category,
                spent,
                limit: budget.limit,
                status: classify(spent, budget.limit),
            }
        })
        .collect()
}
