//! Notification boundary
//!
//! The engine only produces [`AlertEvent`]s. Turning them into user-facing
//! notifications and handing those to a sender happens here, outside the
//! pure pipeline. Senders are fire-and-forget: a failed send is logged and
//! counted, never returned to the evaluation.

use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::format::{format_amount, Grouping};
use crate::insights::AlertEvent;
use crate::models::Category;

/// Notification kind, used by clients to pick an icon/colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationTag {
    Info,
    Warning,
    Alert,
}

impl NotificationTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Alert => "alert",
        }
    }
}

impl std::fmt::Display for NotificationTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A message destined for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub owner_id: String,
    pub title: String,
    pub message: String,
    pub tag: NotificationTag,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    /// Dedup key for budget alerts (owner + category + month)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl Notification {
    pub fn new(
        owner_id: impl Into<String>,
        title: impl Into<String>,
        message: impl Into<String>,
        tag: NotificationTag,
    ) -> Self {
        Self {
            owner_id: owner_id.into(),
            title: title.into(),
            message: message.into(),
            tag,
            read: false,
            created_at: Utc::now(),
            key: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

/// Something that can deliver a notification
pub trait Notifier: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    fn send(&self, notification: &Notification) -> Result<()>;
}

/// Writes notifications to the log and nowhere else
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn name(&self) -> &'static str {
        "log"
    }

    fn send(&self, notification: &Notification) -> Result<()> {
        tracing::info!(
            owner = %notification.owner_id,
            tag = notification.tag.as_str(),
            title = %notification.title,
            "{}",
            notification.message
        );
        Ok(())
    }
}

/// Keeps notifications in memory
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything sent so far
    pub fn sent(&self) -> Vec<Notification> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

impl Notifier for MemoryNotifier {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn send(&self, notification: &Notification) -> Result<()> {
        self.sent
            .lock()
            .map_err(|_| Error::Notify("memory notifier lock poisoned".into()))?
            .push(notification.clone());
        Ok(())
    }
}

/// Appends notifications to a JSON-lines file
///
/// The file plays the role of the notification store a client would read
/// from; it is created on first send.
#[derive(Debug)]
pub struct OutboxNotifier {
    path: PathBuf,
    lock: Mutex<()>,
}

impl OutboxNotifier {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Notifier for OutboxNotifier {
    fn name(&self) -> &'static str {
        "outbox"
    }

    fn send(&self, notification: &Notification) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::Notify("outbox lock poisoned".into()))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = serde_json::to_string(notification)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }
}

/// Read every notification from an outbox file
///
/// A missing file is an empty outbox. Lines that fail to parse are skipped
/// with a warning.
pub fn read_outbox(path: &Path) -> Result<Vec<Notification>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let reader = BufReader::new(File::open(path)?);
    let mut notifications = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Notification>(&line) {
            Ok(n) => notifications.push(n),
            Err(e) => {
                tracing::warn!(line = line_no + 1, error = %e, "Skipping unreadable outbox line");
            }
        }
    }

    Ok(notifications)
}

/// When to hold back a repeated budget alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupPolicy {
    /// Send every alert, every time
    #[default]
    Never,
    /// At most one alert per owner, category and calendar month (UTC)
    PerMonth,
}

impl DedupPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Never => "never",
            Self::PerMonth => "per_month",
        }
    }
}

impl std::str::FromStr for DedupPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "never" | "none" => Ok(Self::Never),
            "per_month" | "monthly" => Ok(Self::PerMonth),
            _ => Err(format!("Unknown dedup policy: {}", s)),
        }
    }
}

impl std::fmt::Display for DedupPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Dedup key for a budget alert: sha256 of owner, category and `YYYY-MM`
pub fn alert_key(owner_id: &str, category: Category, at: DateTime<Utc>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(owner_id.as_bytes());
    hasher.update(b"|");
    hasher.update(category.as_str().as_bytes());
    hasher.update(b"|");
    hasher.update(at.format("%Y-%m").to_string().as_bytes());
    hex::encode(hasher.finalize())
}

/// Outcome of one dispatch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchSummary {
    pub sent: usize,
    pub suppressed: usize,
    pub failed: usize,
}

/// Turns alert events into notifications and hands them to a notifier
pub struct AlertDispatcher<'a> {
    notifier: &'a dyn Notifier,
    policy: DedupPolicy,
    grouping: Grouping,
    currency_symbol: String,
    seen: Mutex<HashSet<String>>,
}

impl<'a> AlertDispatcher<'a> {
    pub fn new(notifier: &'a dyn Notifier) -> Self {
        Self {
            notifier,
            policy: DedupPolicy::Never,
            grouping: Grouping::default(),
            currency_symbol: "₹".to_string(),
            seen: Mutex::new(HashSet::new()),
        }
    }

    pub fn with_policy(mut self, policy: DedupPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_format(mut self, grouping: Grouping, currency_symbol: impl Into<String>) -> Self {
        self.grouping = grouping;
        self.currency_symbol = currency_symbol.into();
        self
    }

    /// Mark keys as already delivered (e.g. from a previous run's outbox)
    pub fn preload_keys<I, S>(&self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Ok(mut seen) = self.seen.lock() {
            seen.extend(keys.into_iter().map(Into::into));
        }
    }

    /// Notification for one alert, without sending it
    pub fn notification_for(&self, alert: &AlertEvent) -> Notification {
        let message = format!(
            "You have spent {sym}{} in {}, which exceeds your budget of {sym}{}.",
            format_amount(alert.spent, self.grouping),
            alert.category,
            format_amount(alert.limit, self.grouping),
            sym = self.currency_symbol,
        );

        Notification::new(
            alert.owner_id.clone(),
            "Budget Exceeded!",
            message,
            NotificationTag::Alert,
        )
        .with_created_at(alert.evaluated_at)
        .with_key(alert_key(&alert.owner_id, alert.category, alert.evaluated_at))
    }

    /// Send every alert, honouring the dedup policy
    pub fn dispatch(&self, alerts: &[AlertEvent]) -> DispatchSummary {
        let mut summary = DispatchSummary::default();

        for alert in alerts {
            let notification = self.notification_for(alert);

            if self.policy == DedupPolicy::PerMonth && self.already_sent(&notification) {
                tracing::debug!(
                    owner = %alert.owner_id,
                    category = alert.category.as_str(),
                    "Suppressing repeated budget alert"
                );
                summary.suppressed += 1;
                continue;
            }

            match self.notifier.send(&notification) {
                Ok(()) => {
                    summary.sent += 1;
                    if let (Some(key), Ok(mut seen)) = (&notification.key, self.seen.lock()) {
                        seen.insert(key.clone());
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        notifier = self.notifier.name(),
                        category = alert.category.as_str(),
                        error = %e,
                        "Failed to send budget alert"
                    );
                    summary.failed += 1;
                }
            }
        }

        tracing::info!(
            sent = summary.sent,
            suppressed = summary.suppressed,
            failed = summary.failed,
            "Budget alert dispatch complete"
        );
        summary
    }

    fn already_sent(&self, notification: &Notification) -> bool {
        match (&notification.key, self.seen.lock()) {
            (Some(key), Ok(seen)) => seen.contains(key),
            _ => false,
        }
    }
}
