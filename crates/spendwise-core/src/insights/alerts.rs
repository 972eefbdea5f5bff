//! Alert Emitter - one event per exceeded budget

use chrono::{DateTime, Utc};

use super::types::{AlertEvent, BudgetEvaluation, BudgetStatus};

/// Build alert events for every `Danger` evaluation
///
/// There is no suppression here: evaluating an unchanged over-budget state
/// twice yields two sets of events. Deduplication, if wanted, belongs to the
/// notification side (see [`crate::notify::DedupPolicy`]).
pub fn emit_alerts(
    owner_id: &str,
    evaluations: &[BudgetEvaluation],
    evaluated_at: DateTime<Utc>,
) -> Vec<AlertEvent> {
    evaluations
        .iter()
        .filter(|eval| eval.status == BudgetStatus::Danger)
        .map(|eval| AlertEvent {
            owner_id: owner_id.to_string(),
            category: eval.category,
            spent: eval.spent,
            limit: eval.limit,
            evaluated_at,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    fn eval(category: Category, spent: i64, status: BudgetStatus) -> BudgetEvaluation {
        BudgetEvaluation {
            category,
            spent: Decimal::from(spent),
            limit: Decimal::from(5000),
            status,
        }
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_only_danger_emits() {
        let evals = vec![
            eval(Category::Food, 100, BudgetStatus::Ok),
            eval(Category::Bills, 4500, BudgetStatus::Warning),
            eval(Category::Rent, 6000, BudgetStatus::Danger),
        ];

        let alerts = emit_alerts("u1", &evals, at());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].category, Category::Rent);
        assert_eq!(alerts[0].spent, Decimal::from(6000));
        assert_eq!(alerts[0].limit, Decimal::from(5000));
        assert_eq!(alerts[0].owner_id, "u1");
        assert_eq!(alerts[0].evaluated_at, at());
    }

    #[test]
    fn test_repeat_evaluation_emits_again() {
        let evals = vec![eval(Category::Food, 6000, BudgetStatus::Danger)];
        let first = emit_alerts("u1", &evals, at());
        let second = emit_alerts("u1", &evals, at());
        assert_eq!(first.len(), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_evaluations_no_alerts() {
        assert!(emit_alerts("u1", &[], at()).is_empty());
    }
}
