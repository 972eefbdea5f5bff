//! Shared command utilities and the config command
//!
//! This module contains:
//! - `load_config` - Resolve the engine config (flag, user override, defaults)
//! - `load_snapshot` - Read a snapshot, optionally with CSV transactions (prints nothing)
//! - `resolve_now` - Parse a --now flag, defaulting to today
//! - `cmd_config` - Show the resolved configuration

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use spendwise_core::config::default_config_path;
use spendwise_core::{
    format_amount, read_transactions_csv, ConfigSource, EngineConfig, NormalizedTransactions,
    Snapshot,
};

/// Load the engine config, logging where it came from
pub fn load_config(path: Option<&Path>) -> Result<(EngineConfig, ConfigSource)> {
    let (config, source) = EngineConfig::load(path).context("Failed to load engine config")?;
    tracing::debug!(source = %source, "Using engine config");
    Ok((config, source))
}

/// A snapshot with its transactions already validated
pub struct LoadedSnapshot {
    pub snapshot: Snapshot,
    pub normalized: NormalizedTransactions,
}

/// Read a snapshot; a CSV history, when given, replaces its transactions
pub fn load_snapshot(path: &Path, transactions_csv: Option<&Path>) -> Result<LoadedSnapshot> {
    let mut snapshot = Snapshot::load(path)
        .with_context(|| format!("Failed to load snapshot {}", path.display()))?;

    if let Some(csv_path) = transactions_csv {
        let file = File::open(csv_path)
            .with_context(|| format!("Failed to open {}", csv_path.display()))?;
        let records = read_transactions_csv(file, &snapshot.owner_id)
            .with_context(|| format!("Failed to read {}", csv_path.display()))?;
        snapshot = snapshot.with_transactions(records);
    }

    let normalized = snapshot.normalized_transactions();
    for skipped in &normalized.skipped {
        tracing::debug!(
            index = skipped.index,
            id = skipped.id.as_deref().unwrap_or("-"),
            reason = %skipped.reason,
            "Skipped record"
        );
    }

    Ok(LoadedSnapshot {
        snapshot,
        normalized,
    })
}

impl LoadedSnapshot {
    /// Tell the user how many records were left out
    pub fn print_skip_notice(&self) {
        if self.normalized.skip_count() > 0 {
            println!(
                "   ⚠️  Skipped {} malformed transaction record(s)",
                self.normalized.skip_count()
            );
        }
    }
}

/// Parse a YYYY-MM-DD date, or take today's local date
pub fn resolve_now(now: Option<&str>) -> Result<NaiveDate> {
    match now {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .context("Invalid --now date format (use YYYY-MM-DD)"),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// Amount with the configured symbol and grouping
pub fn money(amount: Decimal, config: &EngineConfig) -> String {
    format!(
        "{}{}",
        config.currency_symbol,
        format_amount(amount, config.grouping)
    )
}

pub fn cmd_config(config: &EngineConfig, source: &ConfigSource) -> Result<()> {
    println!();
    println!("⚙️  Engine Configuration");
    println!("   ─────────────────────────────");
    println!("   Source:          {}", source);
    if let Some(path) = default_config_path() {
        println!("   Override path:   {}", path.display());
    }
    println!();
    println!("   max_insights:    {}", config.max_insights);
    println!("   grouping:        {}", config.grouping.as_str());
    println!("   currency_symbol: {}", config.currency_symbol);
    println!("   dedup:           {}", config.dedup);

    Ok(())
}
