//! Report command implementations

use std::path::Path;

use anyhow::Result;
use spendwise_core::{category_breakdown, dashboard_stats, monthly_trend, EngineConfig};

use super::core::{load_snapshot, money, resolve_now};

pub fn cmd_report_summary(
    config: &EngineConfig,
    snapshot_path: &Path,
    now: Option<&str>,
) -> Result<()> {
    let now = resolve_now(now)?;
    let loaded = load_snapshot(snapshot_path, None)?;
    loaded.print_skip_notice();
    let stats = dashboard_stats(&loaded.normalized.transactions, now);

    println!();
    println!("📊 Summary");
    println!("   ─────────────────────────────");
    println!("   Total income:     {:>14}", money(stats.total_income, config));
    println!("   Total expenses:   {:>14}", money(stats.total_expenses, config));
    println!("   Balance:          {:>14}", money(stats.balance, config));
    println!(
        "   {:17} {:>14}",
        format!("{}:", now.format("%b %Y")),
        money(stats.this_month_expense, config)
    );

    Ok(())
}

pub fn cmd_report_categories(config: &EngineConfig, snapshot_path: &Path) -> Result<()> {
    let loaded = load_snapshot(snapshot_path, None)?;
    loaded.print_skip_notice();
    let shares = category_breakdown(&loaded.normalized.transactions);

    println!();
    println!("📊 Spending by Category");
    println!("   ─────────────────────────────────────────────");

    if shares.is_empty() {
        println!("   No spending found.");
        return Ok(());
    }

    println!("   {:10} │ {:>14} │ {:>7}", "Category", "Amount", "%");
    println!("   ───────────┼────────────────┼────────");
    for share in &shares {
        println!(
            "   {:10} │ {:>14} │ {:>6.1}%",
            share.category.as_str(),
            money(share.amount, config),
            share.percentage
        );
    }

    Ok(())
}

pub fn cmd_report_trends(config: &EngineConfig, snapshot_path: &Path, months: usize) -> Result<()> {
    let loaded = load_snapshot(snapshot_path, None)?;
    loaded.print_skip_notice();
    let trend = monthly_trend(&loaded.normalized.transactions, months);

    println!();
    println!("📈 Monthly Trends");
    println!("   ─────────────────────────────────────────────");

    if trend.is_empty() {
        println!("   No transactions found.");
        return Ok(());
    }

    println!("   {:8} │ {:>14} │ {:>14}", "Month", "Income", "Expenses");
    println!("   ─────────┼────────────────┼────────────────");
    for month in &trend {
        println!(
            "   {:8} │ {:>14} │ {:>14}",
            month.label,
            money(month.income, config),
            money(month.expense, config)
        );
    }

    Ok(())
}
