//! Evaluate command: insights and budget alerts for the current month

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveTime, Utc};
use spendwise_core::notify::read_outbox;
use spendwise_core::{
    AlertDispatcher, AnalysisContext, DedupPolicy, DispatchSummary, EngineConfig,
    EvaluationReport, InsightEngine, LogNotifier, Notifier, OutboxNotifier, Severity,
    SkippedRecord,
};

use super::core::{load_snapshot, money, resolve_now};
use crate::cli::NotifyTarget;

/// Options for `spendwise evaluate`
#[derive(Debug, Clone)]
pub struct EvaluateOptions {
    pub snapshot: PathBuf,
    pub transactions_csv: Option<PathBuf>,
    pub now: Option<String>,
    pub max: Option<usize>,
    pub notify: Option<NotifyTarget>,
    pub outbox: PathBuf,
    pub dedup: bool,
    pub json: bool,
}

/// Alert delivery result for one run
#[derive(Debug, Clone)]
pub struct Delivery {
    pub notifier: &'static str,
    pub summary: DispatchSummary,
}

/// Everything one `evaluate` run produced
#[derive(Debug, Clone)]
pub struct EvaluateOutcome {
    pub report: EvaluationReport,
    pub skipped_records: Vec<SkippedRecord>,
    pub delivery: Option<Delivery>,
}

pub fn cmd_evaluate(config: &EngineConfig, opts: &EvaluateOptions) -> Result<()> {
    let outcome = run_evaluate(config, opts)?;

    if opts.json {
        println!("{}", render_json(&outcome)?);
        return Ok(());
    }

    let mut config = config.clone();
    if let Some(max) = opts.max {
        config.max_insights = max;
    }
    print_outcome(&outcome, &config);
    Ok(())
}

/// Evaluate and deliver alerts without printing anything
pub fn run_evaluate(config: &EngineConfig, opts: &EvaluateOptions) -> Result<EvaluateOutcome> {
    let mut config = config.clone();
    if let Some(max) = opts.max {
        config.max_insights = max;
    }
    if opts.dedup {
        config.dedup = DedupPolicy::PerMonth;
    }

    let now = resolve_now(opts.now.as_deref())?;
    // A pinned date gets a pinned timestamp so reruns produce identical alerts
    let evaluated_at = match opts.now {
        Some(_) => now.and_time(NaiveTime::MIN).and_utc(),
        None => Utc::now(),
    };

    let loaded = load_snapshot(&opts.snapshot, opts.transactions_csv.as_deref())?;
    let snapshot = &loaded.snapshot;

    let engine = InsightEngine::with_config(config.clone());
    let ctx = AnalysisContext::new(
        &snapshot.owner_id,
        now,
        evaluated_at,
        &loaded.normalized.transactions,
        &snapshot.budgets,
    );
    let report = engine.evaluate(&ctx);

    let delivery = match opts.notify {
        Some(target) => Some(deliver_alerts(&report, &config, target, &opts.outbox)?),
        None => None,
    };

    Ok(EvaluateOutcome {
        report,
        skipped_records: loaded.normalized.skipped,
        delivery,
    })
}

/// The `--json` payload: the report plus skipped records and delivery counts
pub fn render_json(outcome: &EvaluateOutcome) -> Result<String> {
    let mut value = serde_json::to_value(&outcome.report)?;
    if let Some(obj) = value.as_object_mut() {
        obj.insert(
            "skipped_records".into(),
            serde_json::to_value(&outcome.skipped_records)?,
        );
        if let Some(delivery) = &outcome.delivery {
            obj.insert("notifier".into(), delivery.notifier.into());
            obj.insert("dispatch".into(), serde_json::to_value(delivery.summary)?);
        }
    }
    Ok(serde_json::to_string_pretty(&value)?)
}

fn print_outcome(outcome: &EvaluateOutcome, config: &EngineConfig) {
    let report = &outcome.report;

    println!("🔍 Evaluating budgets for {}...", report.window.start.format("%B %Y"));
    if !outcome.skipped_records.is_empty() {
        println!(
            "   ⚠️  Skipped {} malformed transaction record(s)",
            outcome.skipped_records.len()
        );
    }

    println!();
    println!("📊 Month to date ({})", report.window);
    println!("   ─────────────────────────────");

    if report.spent.is_empty() {
        println!("   No spending recorded this month.");
    } else {
        for (category, amount) in &report.spent {
            println!("   {:10} {:>14}", category.as_str(), money(*amount, config));
        }
    }

    if report.skipped_budgets > 0 {
        println!();
        println!(
            "   ⚠️  Ignored {} budget(s) without a positive limit",
            report.skipped_budgets
        );
    }

    println!();
    if report.all_clear() {
        println!("✅ All budgets on track!");
    } else {
        println!("💡 Insights");
        for insight in &report.insights {
            let icon = match insight.severity {
                Severity::Danger => "🚨",
                Severity::Warning => "⚠️ ",
                Severity::Info => "ℹ️ ",
            };
            println!("   {} {}", icon, insight.message);
        }

        if !report.alerts.is_empty() {
            println!();
            println!("🔔 {} budget alert(s) raised", report.alerts.len());
        }
    }

    if let Some(delivery) = &outcome.delivery {
        println!();
        println!("📨 Notifications ({})", delivery.notifier);
        println!("   Sent:       {}", delivery.summary.sent);
        if delivery.summary.suppressed > 0 {
            println!(
                "   Suppressed: {} (already sent this month)",
                delivery.summary.suppressed
            );
        }
        if delivery.summary.failed > 0 {
            println!("   ❌ Failed:  {}", delivery.summary.failed);
        }
    }
}

fn deliver_alerts(
    report: &EvaluationReport,
    config: &EngineConfig,
    target: NotifyTarget,
    outbox: &Path,
) -> Result<Delivery> {
    let notifier: Box<dyn Notifier> = match target {
        NotifyTarget::Log => Box::new(LogNotifier),
        NotifyTarget::Outbox => Box::new(OutboxNotifier::new(outbox)),
    };

    let dispatcher = AlertDispatcher::new(notifier.as_ref())
        .with_policy(config.dedup)
        .with_format(config.grouping, config.currency_symbol.clone());

    // The outbox remembers what earlier runs already delivered
    if config.dedup == DedupPolicy::PerMonth && target == NotifyTarget::Outbox {
        let previous = read_outbox(outbox)
            .with_context(|| format!("Failed to read outbox {}", outbox.display()))?;
        dispatcher.preload_keys(previous.into_iter().filter_map(|n| n.key));
    }

    Ok(Delivery {
        notifier: notifier.name(),
        summary: dispatcher.dispatch(&report.alerts),
    })
}
