//! Spendwise CLI - Budget insights and alerts
//!
//! Usage:
//!   spendwise evaluate --snapshot FILE             Show insights for this month
//!   spendwise evaluate --snapshot FILE --notify outbox --dedup
//!   spendwise budgets --snapshot FILE              Budget progress bars
//!   spendwise report trends --snapshot FILE        Monthly income/expense trend
//!   spendwise goals --snapshot FILE                Savings goal progress

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so `--json` output stays machine-readable
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();

    let (config, source) = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Evaluate {
            snapshot,
            transactions_csv,
            now,
            max,
            notify,
            outbox,
            dedup,
            json,
        } => commands::cmd_evaluate(
            &config,
            &commands::EvaluateOptions {
                snapshot,
                transactions_csv,
                now,
                max,
                notify,
                outbox,
                dedup,
                json,
            },
        ),
        Commands::Budgets { snapshot, now } => {
            commands::cmd_budgets(&config, &snapshot, now.as_deref())
        }
        Commands::Report { report_type } => match report_type {
            ReportType::Summary { snapshot, now } => {
                commands::cmd_report_summary(&config, &snapshot, now.as_deref())
            }
            ReportType::Categories { snapshot } => {
                commands::cmd_report_categories(&config, &snapshot)
            }
            ReportType::Trends { snapshot, months } => {
                commands::cmd_report_trends(&config, &snapshot, months)
            }
        },
        Commands::Goals { snapshot, now } => commands::cmd_goals(&config, &snapshot, now.as_deref()),
        Commands::Config => commands::cmd_config(&config, &source),
    }
}
