//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Spendwise - Budget insights for your spending
#[derive(Parser)]
#[command(name = "spendwise")]
#[command(about = "Budget insights and alerts for personal spending", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Engine config file (defaults to ~/.config/spendwise/engine.toml, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate budgets and show insights for the current month
    Evaluate {
        /// Snapshot JSON (owner, transactions, budgets, goals)
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Read transactions from a CSV history export instead of the snapshot
        #[arg(long)]
        transactions_csv: Option<PathBuf>,

        /// Evaluation date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        now: Option<String>,

        /// Maximum number of insights to show (overrides config)
        #[arg(long)]
        max: Option<usize>,

        /// Deliver budget alerts through a notifier
        #[arg(long, value_enum)]
        notify: Option<NotifyTarget>,

        /// Outbox file for --notify outbox
        #[arg(long, default_value = "spendwise-outbox.jsonl")]
        outbox: PathBuf,

        /// Suppress alerts already sent this month (overrides config)
        #[arg(long)]
        dedup: bool,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show progress for every budget this month
    Budgets {
        /// Snapshot JSON
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Evaluation date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        now: Option<String>,
    },

    /// Generate spending reports
    Report {
        #[command(subcommand)]
        report_type: ReportType,
    },

    /// Show savings goal progress
    Goals {
        /// Snapshot JSON
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Date to count deadlines from (YYYY-MM-DD), defaults to today
        #[arg(long)]
        now: Option<String>,
    },

    /// Show the resolved engine configuration
    Config,
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Income, expenses and balance
    Summary {
        /// Snapshot JSON
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Date that defines "this month" (YYYY-MM-DD), defaults to today
        #[arg(long)]
        now: Option<String>,
    },

    /// Spending by category, all time
    Categories {
        /// Snapshot JSON
        #[arg(short, long)]
        snapshot: PathBuf,
    },

    /// Income and expenses month by month
    Trends {
        /// Snapshot JSON
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Number of months to show
        #[arg(long, default_value = "6")]
        months: usize,
    },
}

/// Where budget alerts go
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NotifyTarget {
    /// Log each alert
    Log,
    /// Append alerts as JSON lines to the outbox file
    Outbox,
}
