//! Budget progress command

use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use spendwise_core::{budget_progress, AnalysisContext, EngineConfig, InsightEngine};

use super::core::{load_snapshot, money, resolve_now};

const BAR_WIDTH: usize = 20;

pub fn cmd_budgets(config: &EngineConfig, snapshot_path: &Path, now: Option<&str>) -> Result<()> {
    let now = resolve_now(now)?;
    let loaded = load_snapshot(snapshot_path, None)?;
    let snapshot = &loaded.snapshot;
    loaded.print_skip_notice();

    let ctx = AnalysisContext::new(
        &snapshot.owner_id,
        now,
        Utc::now(),
        &loaded.normalized.transactions,
        &snapshot.budgets,
    );
    let report = InsightEngine::with_config(config.clone()).evaluate(&ctx);
    let progress = budget_progress(&report.evaluations);

    println!();
    println!("💰 Budgets ({})", report.window);
    println!("   ─────────────────────────────────────────────────────────────");

    if progress.is_empty() {
        println!("   No budgets set. Add some to your snapshot's \"budgets\" list.");
        return Ok(());
    }

    for p in &progress {
        let status = if p.is_over {
            "🚨 over".to_string()
        } else {
            format!("{} left", money(p.remaining, config))
        };
        println!(
            "   {:10} {} {:>6}%  {} / {}  {}",
            p.category.as_str(),
            bar(p.percentage),
            p.percentage.round_dp(0),
            money(p.spent, config),
            money(p.limit, config),
            status
        );
    }

    Ok(())
}

/// Text progress bar for a 0-100 percentage
pub fn bar(percentage: Decimal) -> String {
    let filled = (percentage * Decimal::from(BAR_WIDTH) / Decimal::ONE_HUNDRED)
        .floor()
        .to_usize()
        .unwrap_or(0)
        .min(BAR_WIDTH);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}
