//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `budgets` - Budget progress bars
//! - `core` - Shared utilities (config, snapshot loading, dates) and the config command
//! - `evaluate` - Insights and budget alert delivery
//! - `goals` - Savings goal progress
//! - `reports` - Summary, category and trend reports

pub mod budgets;
pub mod core;
pub mod evaluate;
pub mod goals;
pub mod reports;

// Re-export command functions for main.rs
pub use budgets::*;
pub use core::*;
pub use evaluate::*;
pub use goals::*;
pub use reports::*;
