//! Savings goal progress

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analytics::percent_of;
use crate::models::SavingsGoal;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub goal_id: String,
    pub title: String,
    /// 0-100, capped
    pub percentage: Decimal,
    pub completed: bool,
    /// Zero once the target is reached
    pub remaining: Decimal,
    /// Days until the deadline; negative when overdue, `None` without one
    pub days_left: Option<i64>,
}

pub fn goal_progress(goal: &SavingsGoal, today: NaiveDate) -> GoalProgress {
    let valid_target = goal.target_amount > Decimal::ZERO;
    let percentage = percent_of(goal.current_amount, goal.target_amount).min(Decimal::ONE_HUNDRED);

    GoalProgress {
        goal_id: goal.id.clone(),
        title: goal.title.clone(),
        percentage,
        completed: valid_target && goal.current_amount >= goal.target_amount,
        remaining: goal
            .target_amount
            .checked_sub(goal.current_amount)
            .unwrap_or(Decimal::MAX)
            .max(Decimal::ZERO),
        days_left: goal
            .deadline
            .map(|deadline| deadline.signed_duration_since(today).num_days()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(target: i64, current: i64, deadline: Option<NaiveDate>) -> SavingsGoal {
        SavingsGoal {
            id: "g1".into(),
            owner_id: "u1".into(),
            title: "Goa trip".into(),
            target_amount: Decimal::from(target),
            current_amount: Decimal::from(current),
            deadline,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_partial_progress() {
        let deadline = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
        let p = goal_progress(&goal(20000, 5000, Some(deadline)), today());
        assert_eq!(p.percentage, Decimal::from(25));
        assert!(!p.completed);
        assert_eq!(p.remaining, Decimal::from(15000));
        assert_eq!(p.days_left, Some(73));
    }

    #[test]
    fn test_overfunded_goal_is_capped() {
        let p = goal_progress(&goal(1000, 1500, None), today());
        assert_eq!(p.percentage, Decimal::ONE_HUNDRED);
        assert!(p.completed);
        assert_eq!(p.remaining, Decimal::ZERO);
        assert_eq!(p.days_left, None);
    }

    #[test]
    fn test_overdue_deadline_is_negative() {
        let deadline = NaiveDate::from_ymd_opt(2026, 10, 9).unwrap();
        let p = goal_progress(&goal(1000, 10, Some(deadline)), today());
        assert_eq!(p.days_left, Some(-10));
    }

    #[test]
    fn test_extreme_amounts_saturate() {
        let mut g = goal(0, 0, None);
        g.target_amount = Decimal::MAX;
        g.current_amount = Decimal::MIN;
        let p = goal_progress(&g, today());
        assert_eq!(p.remaining, Decimal::MAX);
        assert!(!p.completed);

        g.current_amount = Decimal::MAX;
        g.target_amount = Decimal::new(1, 2);
        let p = goal_progress(&g, today());
        assert_eq!(p.percentage, Decimal::ONE_HUNDRED);
        assert!(p.completed);
    }

    #[test]
    fn test_zero_target_never_completes() {
        let p = goal_progress(&goal(0, 0, None), today());
        assert_eq!(p.percentage, Decimal::ZERO);
        assert!(!p.completed);
    }
}
