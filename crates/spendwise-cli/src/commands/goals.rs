//! Savings goal command

use std::path::Path;

use anyhow::Result;
use spendwise_core::{goal_progress, EngineConfig};

use super::budgets::bar;
use super::core::{load_snapshot, money, resolve_now};

pub fn cmd_goals(config: &EngineConfig, snapshot_path: &Path, now: Option<&str>) -> Result<()> {
    let today = resolve_now(now)?;
    let loaded = load_snapshot(snapshot_path, None)?;
    loaded.print_skip_notice();
    let goals: Vec<_> = loaded.snapshot.owned_goals().collect();

    println!();
    println!("🎯 Savings Goals");
    println!("   ─────────────────────────────────────────────────────────────");

    if goals.is_empty() {
        println!("   No savings goals yet.");
        return Ok(());
    }

    for goal in goals {
        let p = goal_progress(goal, today);
        let deadline = match p.days_left {
            None => String::new(),
            Some(d) if d < 0 => format!("  ⏰ {} days overdue", -d),
            Some(d) => format!("  {} days left", d),
        };
        let status = if p.completed {
            "✅ done".to_string()
        } else {
            format!("{} to go", money(p.remaining, config))
        };
        println!(
            "   {:20} {} {:>5}%  {}{}",
            p.title,
            bar(p.percentage),
            p.percentage.round_dp(0),
            status,
            deadline
        );
    }

    Ok(())
}
