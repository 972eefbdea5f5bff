//! Spendwise Core Library
//!
//! Shared functionality for the Spendwise budget tracker:
//! - Record normalization for transaction input (JSON snapshots and CSV)
//! - Insight engine: aggregation, budget thresholds, ranked insights, alerts
//! - Notifier boundary with optional per-month alert suppression
//! - Dashboard analytics and savings goal progress
//! - Layered engine configuration

pub mod analytics;
pub mod config;
pub mod error;
pub mod format;
pub mod goals;
pub mod import;
pub mod insights;
pub mod models;
pub mod notify;
pub mod records;
pub mod snapshot;

pub use analytics::{
    budget_progress, category_breakdown, dashboard_stats, monthly_trend, BudgetProgress,
    CategoryShare, DashboardStats, MonthlyTotals,
};
pub use config::{ConfigSource, EngineConfig};
pub use error::{Error, Result};
pub use format::{format_amount, Grouping};
pub use goals::{goal_progress, GoalProgress};
pub use import::read_transactions_csv;
pub use insights::{
    AlertEvent, AnalysisContext, BudgetEvaluation, BudgetStatus, DateWindow, EvaluationReport,
    Insight, InsightEngine, Severity, SpendByCategory,
};
pub use models::{Budget, Category, SavingsGoal, Transaction, TransactionKind};
pub use notify::{
    AlertDispatcher, DedupPolicy, DispatchSummary, LogNotifier, MemoryNotifier, Notification,
    NotificationTag, Notifier, OutboxNotifier,
};
pub use records::{normalize_records, NormalizedTransactions, SkipReason, SkippedRecord, TransactionRecord};
pub use snapshot::Snapshot;
