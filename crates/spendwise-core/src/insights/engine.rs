//! Insight Engine - runs the aggregate → evaluate → rank → emit pipeline

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::models::{Budget, Transaction};

use super::aggregate::aggregate_window;
use super::alerts::emit_alerts;
use super::evaluate::{evaluate, has_valid_limit};
use super::rank::rank_with;
use super::types::{AlertEvent, BudgetEvaluation, DateWindow, Insight, SpendByCategory};

/// Input to one evaluation pass
///
/// Everything the engine looks at is borrowed from the caller's snapshot;
/// "now" is explicit so that results never depend on the wall clock.
pub struct AnalysisContext<'a> {
    pub owner_id: &'a str,
    /// Calendar day the month-to-date window is built from
    pub now: NaiveDate,
    /// Timestamp stamped onto alert events
    pub evaluated_at: DateTime<Utc>,
    pub transactions: &'a [Transaction],
    pub budgets: &'a [Budget],
}

impl<'a> AnalysisContext<'a> {
    pub fn new(
        owner_id: &'a str,
        now: NaiveDate,
        evaluated_at: DateTime<Utc>,
        transactions: &'a [Transaction],
        budgets: &'a [Budget],
    ) -> Self {
        Self {
            owner_id,
            now,
            evaluated_at,
            transactions,
            budgets,
        }
    }

    pub fn window(&self) -> DateWindow {
        DateWindow::month_to_date(self.now)
    }
}

/// Everything one evaluation pass produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub window: DateWindow,
    pub spent: SpendByCategory,
    pub evaluations: Vec<BudgetEvaluation>,
    pub insights: Vec<Insight>,
    pub alerts: Vec<AlertEvent>,
    /// Budgets left out because their limit was not positive
    pub skipped_budgets: usize,
}

impl EvaluationReport {
    /// True when nothing needs the user's attention
    pub fn all_clear(&self) -> bool {
        self.insights.is_empty()
    }
}

/// The main insight engine
///
/// Holds configuration only; every call to [`InsightEngine::evaluate`] is
/// independent, so one engine can serve concurrent evaluations.
#[derive(Debug, Clone, Default)]
pub struct InsightEngine {
    config: EngineConfig,
}

impl InsightEngine {
    /// Create an engine with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate a snapshot for one owner
    ///
    /// Budgets and transactions belonging to other owners are ignored, since
    /// callers sometimes hand over a shared snapshot.
    pub fn evaluate(&self, ctx: &AnalysisContext<'_>) -> EvaluationReport {
        let window = ctx.window();

        let owned_transactions: Vec<Transaction> = ctx
            .transactions
            .iter()
            .filter(|tx| tx.owner_id == ctx.owner_id)
            .cloned()
            .collect();
        let owned_budgets: Vec<Budget> = ctx
            .budgets
            .iter()
            .filter(|b| b.owner_id == ctx.owner_id)
            .cloned()
            .collect();

        let spent = aggregate_window(&owned_transactions, window);
        let evaluations = evaluate(&spent, &owned_budgets);
        let skipped_budgets = owned_budgets.iter().filter(|b| !has_valid_limit(b)).count();

        let insights = rank_with(
            &evaluations,
            self.config.max_insights,
            self.config.grouping,
            &self.config.currency_symbol,
        );
        let alerts = emit_alerts(ctx.owner_id, &evaluations, ctx.evaluated_at);

        tracing::debug!(
            owner = ctx.owner_id,
            %window,
            budgets = evaluations.len(),
            insights = insights.len(),
            alerts = alerts.len(),
            "Budget evaluation complete"
        );

        EvaluationReport {
            window,
            spent,
            evaluations,
            insights,
            alerts,
            skipped_budgets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::types::{BudgetStatus, Severity};
    use crate::models::{Category, TransactionKind};
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(owner: &str, category: Category, amount: i64, on: NaiveDate) -> Transaction {
        Transaction {
            id: format!("{}-{}-{}", owner, category, on),
            owner_id: owner.into(),
            amount: Decimal::from(amount),
            kind: TransactionKind::Expense,
            category,
            date: on,
            title: None,
            payment_method: None,
            note: None,
        }
    }

    fn evaluated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_warning_scenario() {
        let txs = vec![expense("u1", Category::Food, 4200, date(2026, 10, 10))];
        let budgets = vec![Budget::new("u1", Category::Food, Decimal::from(5000))];
        let ctx = AnalysisContext::new("u1", date(2026, 10, 19), evaluated_at(), &txs, &budgets);

        let report = InsightEngine::new().evaluate(&ctx);
        assert_eq!(report.spent.get(&Category::Food), Some(&Decimal::from(4200)));
        assert_eq!(report.evaluations[0].status, BudgetStatus::Warning);
        assert_eq!(report.insights.len(), 1);
        assert_eq!(report.insights[0].message, "You've spent 80% of your Food budget!");
        assert!(report.alerts.is_empty());
    }

    #[test]
    fn test_danger_scenario() {
        let txs = vec![expense("u1", Category::Food, 6000, date(2026, 10, 10))];
        let budgets = vec![Budget::new("u1", Category::Food, Decimal::from(5000))];
        let ctx = AnalysisContext::new("u1", date(2026, 10, 19), evaluated_at(), &txs, &budgets);

        let report = InsightEngine::new().evaluate(&ctx);
        assert_eq!(report.insights[0].severity, Severity::Danger);
        assert_eq!(report.insights[0].message, "Over budget in Food by ₹1,000!");
        assert_eq!(report.alerts.len(), 1);
        assert_eq!(report.alerts[0].spent, Decimal::from(6000));
        assert_eq!(report.alerts[0].evaluated_at, evaluated_at());
    }

    #[test]
    fn test_no_budgets_scenario() {
        let txs = vec![expense("u1", Category::Food, 6000, date(2026, 10, 10))];
        let ctx = AnalysisContext::new("u1", date(2026, 10, 19), evaluated_at(), &txs, &[]);

        let report = InsightEngine::new().evaluate(&ctx);
        assert!(!report.spent.is_empty());
        assert!(report.evaluations.is_empty());
        assert!(report.all_clear());
        assert!(report.alerts.is_empty());
    }

    #[test]
    fn test_last_month_spend_is_ignored() {
        let txs = vec![expense("u1", Category::Food, 9000, date(2026, 9, 28))];
        let budgets = vec![Budget::new("u1", Category::Food, Decimal::from(5000))];
        let ctx = AnalysisContext::new("u1", date(2026, 10, 19), evaluated_at(), &txs, &budgets);

        let report = InsightEngine::new().evaluate(&ctx);
        assert_eq!(report.evaluations[0].status, BudgetStatus::Ok);
        assert!(report.all_clear());
    }

    #[test]
    fn test_other_owners_are_ignored() {
        let txs = vec![
            expense("u1", Category::Food, 100, date(2026, 10, 10)),
            expense("u2", Category::Food, 9000, date(2026, 10, 10)),
        ];
        let budgets = vec![
            Budget::new("u1", Category::Food, Decimal::from(5000)),
            Budget::new("u2", Category::Food, Decimal::from(10)),
        ];
        let ctx = AnalysisContext::new("u1", date(2026, 10, 19), evaluated_at(), &txs, &budgets);

        let report = InsightEngine::new().evaluate(&ctx);
        assert_eq!(report.evaluations.len(), 1);
        assert_eq!(report.evaluations[0].spent, Decimal::from(100));
        assert!(report.alerts.is_empty());
    }

    #[test]
    fn test_respects_configured_max() {
        let txs: Vec<_> = Category::budgetable()
            .map(|c| expense("u1", c, 200, date(2026, 10, 2)))
            .collect();
        let budgets: Vec<_> = Category::budgetable()
            .map(|c| Budget::new("u1", c, Decimal::from(100)))
            .collect();
        let ctx = AnalysisContext::new("u1", date(2026, 10, 19), evaluated_at(), &txs, &budgets);

        let report = InsightEngine::new().evaluate(&ctx);
        assert_eq!(report.insights.len(), 3);
        assert_eq!(report.alerts.len(), 7);

        let config = EngineConfig {
            max_insights: 5,
            ..EngineConfig::default()
        };
        let report = InsightEngine::with_config(config).evaluate(&ctx);
        assert_eq!(report.insights.len(), 5);
    }

    #[test]
    fn test_counts_skipped_budgets() {
        let budgets = vec![
            Budget::new("u1", Category::Food, Decimal::ZERO),
            Budget::new("u1", Category::Rent, Decimal::from(100)),
        ];
        let ctx = AnalysisContext::new("u1", date(2026, 10, 19), evaluated_at(), &[], &budgets);

        let report = InsightEngine::new().evaluate(&ctx);
        assert_eq!(report.skipped_budgets, 1);
        assert_eq!(report.evaluations.len(), 1);
    }

    #[test]
    fn test_evaluation_is_repeatable() {
        let txs = vec![expense("u1", Category::Bills, 950, date(2026, 10, 3))];
        let budgets = vec![Budget::new("u1", Category::Bills, Decimal::from(1000))];
        let ctx = AnalysisContext::new("u1", date(2026, 10, 19), evaluated_at(), &txs, &budgets);

        let engine = InsightEngine::new();
        assert_eq!(engine.evaluate(&ctx), engine.evaluate(&ctx));
    }

    #[test]
    fn test_extreme_amounts_do_not_panic() {
        let mut txs = vec![
            expense("u1", Category::Food, 0, date(2026, 10, 3)),
            expense("u1", Category::Food, 0, date(2026, 10, 4)),
        ];
        for tx in &mut txs {
            tx.amount = Decimal::MAX;
        }
        let budgets = vec![Budget::new("u1", Category::Food, Decimal::from(5000))];
        let ctx = AnalysisContext::new("u1", date(2026, 10, 19), evaluated_at(), &txs, &budgets);

        let report = InsightEngine::new().evaluate(&ctx);
        assert_eq!(report.spent.get(&Category::Food), Some(&Decimal::MAX));
        assert_eq!(report.evaluations[0].status, BudgetStatus::Danger);
        assert_eq!(report.alerts.len(), 1);
    }
}
