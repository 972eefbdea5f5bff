//! Insight Ranker - turns evaluations into a bounded list of messages

use crate::format::{format_amount, Grouping};

use super::types::{BudgetEvaluation, BudgetStatus, Insight};

/// How many insights the dashboard shows
pub const DEFAULT_MAX_INSIGHTS: usize = 3;

/// Select insight-worthy evaluations and phrase them
///
/// Keeps the evaluator's order and truncates to `max_count`. Statuses are not
/// re-sorted by severity, so a warning listed before a danger stays first.
pub fn rank(evaluations: &[BudgetEvaluation], max_count: usize) -> Vec<Insight> {
    rank_with(evaluations, max_count, Grouping::default(), "₹")
}

/// [`rank`] with explicit formatting settings
pub fn rank_with(
    evaluations: &[BudgetEvaluation],
    max_count: usize,
    grouping: Grouping,
    currency_symbol: &str,
) -> Vec<Insight> {
    evaluations
        .iter()
        .filter_map(|eval| {
            let severity = eval.status.severity()?;
            Some(Insight {
                severity,
                message: insight_message(eval, grouping, currency_symbol),
                category: eval.category,
            })
        })
        .take(max_count)
        .collect()
}

fn insight_message(eval: &BudgetEvaluation, grouping: Grouping, currency_symbol: &str) -> String {
    match eval.status {
        BudgetStatus::Danger => format!(
            "Over budget in {} by {}{}!",
            eval.category,
            currency_symbol,
            format_amount(eval.spent - eval.limit, grouping)
        ),
        BudgetStatus::Warning => {
            format!("You've spent 80% of your {} budget!", eval.category)
        }
        BudgetStatus::Ok => String::new(),
    }
}
