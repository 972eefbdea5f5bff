//! Insight Engine - Budget Insights and Alerts
//!
//! Turns a snapshot of transactions and monthly budgets into a short list of
//! spending insights and a list of alert events for exceeded budgets. The
//! whole pipeline is pure: same snapshot and same "now" in, same output out.
//!
//! ## Stages
//!
//! - **Aggregator** - month-to-date expense totals per category
//! - **Threshold Evaluator** - ok / warning (above 80%) / danger (over limit)
//! - **Insight Ranker** - messages for warning and danger, capped at N
//! - **Alert Emitter** - one event per danger, no built-in suppression
//!
//! ## Usage
//!
//! ```rust,ignore
//! use spendwise_core::insights::{AnalysisContext, InsightEngine};
//!
//! let engine = InsightEngine::new();
//! let ctx = AnalysisContext::new("user-1", today, Utc::now(), &transactions, &budgets);
//! let report = engine.evaluate(&ctx);
//! ```

pub mod aggregate;
pub mod alerts;
pub mod engine;
pub mod evaluate;
pub mod rank;
pub mod types;

pub use aggregate::{aggregate, aggregate_window};
pub use alerts::emit_alerts;
pub use engine::{AnalysisContext, EvaluationReport, InsightEngine};
pub use evaluate::{classify, evaluate, WARNING_RATIO};
pub use rank::{rank, rank_with, DEFAULT_MAX_INSIGHTS};
pub use types::{
    AlertEvent, BudgetEvaluation, BudgetStatus, DateWindow, Insight, Severity, SpendByCategory,
};
