//! Integration tests for spendwise-core
//!
//! These tests exercise the full snapshot → normalize → evaluate → dispatch workflow.

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use spendwise_core::{
    budget_progress, dashboard_stats, import::read_transactions_csv, notify::read_outbox,
    AlertDispatcher, AnalysisContext, BudgetStatus, Category, DedupPolicy, EngineConfig,
    InsightEngine, MemoryNotifier, OutboxNotifier, Severity, Snapshot,
};

fn now() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn snapshot_with_food_spend(amount: &str) -> Snapshot {
    let json = format!(
        r#"{{
            "ownerId": "u1",
            "transactions": [
                {{"id": "t1", "amount": "{amount}", "type": "expense", "category": "Food", "date": "2026-10-05"}},
                {{"id": "t2", "amount": 50000, "type": "income", "category": "Salary", "date": "2026-10-01"}},
                {{"id": "t3", "amount": 9999, "type": "expense", "category": "Food", "date": "2026-09-30"}}
            ],
            "budgets": [{{"category": "Food", "limit": 5000}}]
        }}"#
    );
    Snapshot::from_json(&json).expect("snapshot should parse")
}

fn run(snapshot: &Snapshot) -> spendwise_core::EvaluationReport {
    let normalized = snapshot.normalized_transactions();
    let evaluated_at = Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap();
    let ctx = AnalysisContext::new(
        &snapshot.owner_id,
        now(),
        evaluated_at,
        &normalized.transactions,
        &snapshot.budgets,
    );
    InsightEngine::new().evaluate(&ctx)
}

// =============================================================================
// Engine Pipeline Tests
// =============================================================================

#[test]
fn test_warning_workflow() {
    let report = run(&snapshot_with_food_spend("4200"));

    assert_eq!(report.spent.get(&Category::Food), Some(&Decimal::from(4200)));
    assert_eq!(report.evaluations.len(), 1);
    assert_eq!(report.evaluations[0].status, BudgetStatus::Warning);
    assert_eq!(report.insights.len(), 1);
    assert_eq!(report.insights[0].message, "You've spent 80% of your Food budget!");
    assert_eq!(report.insights[0].severity, Severity::Warning);
    assert!(report.alerts.is_empty());
}

#[test]
fn test_danger_workflow() {
    let report = run(&snapshot_with_food_spend("6000"));

    assert_eq!(report.evaluations[0].status, BudgetStatus::Danger);
    assert_eq!(report.insights[0].message, "Over budget in Food by ₹1,000!");
    assert_eq!(report.alerts.len(), 1);
    assert_eq!(report.alerts[0].spent, Decimal::from(6000));
    assert_eq!(report.alerts[0].limit, Decimal::from(5000));
}

#[test]
fn test_no_budgets_means_no_output() {
    let mut snapshot = snapshot_with_food_spend("6000");
    snapshot.budgets.clear();
    let report = run(&snapshot);

    assert!(!report.spent.is_empty());
    assert!(report.evaluations.is_empty());
    assert!(report.all_clear());
    assert!(report.alerts.is_empty());
}

#[test]
fn test_csv_history_replaces_snapshot_transactions() {
    let csv = "Date,Title,Type,Category,Amount,Payment Method,Note
2026-10-03,Dinner,expense,Food,3000,UPI,
2026-10-09,Groceries,expense,Food,\"2,500\",Card,
2026-10-10,Broken,expense,Food,abc,Card,
";
    let records = read_transactions_csv(csv.as_bytes(), "u1").unwrap();
    let snapshot = snapshot_with_food_spend("1").with_transactions(records);

    let normalized = snapshot.normalized_transactions();
    assert_eq!(normalized.transactions.len(), 2);
    assert_eq!(normalized.skip_count(), 1);

    let report = run(&snapshot);
    assert_eq!(report.spent.get(&Category::Food), Some(&Decimal::from(5500)));
    assert_eq!(report.evaluations[0].status, BudgetStatus::Danger);
    assert_eq!(report.insights[0].message, "Over budget in Food by ₹500!");
}

#[test]
fn test_configured_format_flows_into_messages() {
    let snapshot = snapshot_with_food_spend("106000.5");
    let config = EngineConfig::from_toml(
        r#"
        [format]
        grouping = "international"
        currency_symbol = "$"
        "#,
    )
    .unwrap();

    let normalized = snapshot.normalized_transactions();
    let evaluated_at = Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap();
    let ctx = AnalysisContext::new(
        "u1",
        now(),
        evaluated_at,
        &normalized.transactions,
        &snapshot.budgets,
    );
    let report = InsightEngine::with_config(config).evaluate(&ctx);

    assert_eq!(report.insights[0].message, "Over budget in Food by $101,000.5!");
}

// =============================================================================
// Dispatch Tests
// =============================================================================

#[test]
fn test_repeat_runs_alert_every_time_by_default() {
    let snapshot = snapshot_with_food_spend("6000");
    let notifier = MemoryNotifier::new();
    let dispatcher = AlertDispatcher::new(&notifier);

    for _ in 0..3 {
        let report = run(&snapshot);
        let summary = dispatcher.dispatch(&report.alerts);
        assert_eq!(summary.sent, 1);
    }

    let sent = notifier.sent();
    assert_eq!(sent.len(), 3);
    assert_eq!(sent[0].title, "Budget Exceeded!");
    assert_eq!(
        sent[0].message,
        "You have spent ₹6,000 in Food, which exceeds your budget of ₹5,000."
    );
}

#[test]
fn test_per_month_dedup_across_runs_via_outbox() {
    let dir = tempfile::tempdir().unwrap();
    let outbox_path = dir.path().join("outbox.jsonl");
    let snapshot = snapshot_with_food_spend("6000");

    // First run delivers
    {
        let notifier = OutboxNotifier::new(&outbox_path);
        let dispatcher = AlertDispatcher::new(&notifier).with_policy(DedupPolicy::PerMonth);
        let summary = dispatcher.dispatch(&run(&snapshot).alerts);
        assert_eq!(summary.sent, 1);
    }

    // Second run remembers what the outbox already holds
    let previous = read_outbox(&outbox_path).unwrap();
    let notifier = OutboxNotifier::new(&outbox_path);
    let dispatcher = AlertDispatcher::new(&notifier).with_policy(DedupPolicy::PerMonth);
    dispatcher.preload_keys(previous.into_iter().filter_map(|n| n.key));
    let summary = dispatcher.dispatch(&run(&snapshot).alerts);

    assert_eq!(summary.sent, 0);
    assert_eq!(summary.suppressed, 1);
    assert_eq!(read_outbox(&outbox_path).unwrap().len(), 1);
}

// =============================================================================
// Analytics Tests
// =============================================================================

#[test]
fn test_dashboard_and_progress_from_snapshot() {
    let snapshot = snapshot_with_food_spend("4200");
    let normalized = snapshot.normalized_transactions();

    let stats = dashboard_stats(&normalized.transactions, now());
    assert_eq!(stats.total_income, Decimal::from(50000));
    assert_eq!(stats.this_month_expense, Decimal::from(4200));

    let report = run(&snapshot);
    let progress = budget_progress(&report.evaluations);
    assert_eq!(progress[0].percentage, Decimal::from(84));
    assert!(!progress[0].is_over);
}
