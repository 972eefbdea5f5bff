//! CSV transaction history input
//!
//! Reads the history layout the app exports:
//! `Date,Title,Type,Category,Amount,Payment Method,Note`
//!
//! Headers are matched case-insensitively and may come in any order. Field
//! values are not validated here; rows become [`TransactionRecord`]s and go
//! through [`crate::records::normalize_records`] like any other input. A row
//! the reader cannot decode becomes an unreadable record, so it is skipped
//! and counted there; only header and I/O errors fail the whole read.

use std::io::Read;

use csv::{ErrorKind, ReaderBuilder, StringRecord};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::records::TransactionRecord;

/// Column positions resolved from the header row
#[derive(Debug, Default)]
struct Columns {
    date: Option<usize>,
    title: Option<usize>,
    kind: Option<usize>,
    category: Option<usize>,
    amount: Option<usize>,
    payment_method: Option<usize>,
    note: Option<usize>,
    id: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let mut cols = Columns::default();
        for (i, header) in headers.iter().enumerate() {
            match header.trim().to_lowercase().as_str() {
                "date" => cols.date = Some(i),
                "title" | "description" => cols.title = Some(i),
                "type" | "kind" => cols.kind = Some(i),
                "category" => cols.category = Some(i),
                "amount" => cols.amount = Some(i),
                "payment method" | "payment_method" => cols.payment_method = Some(i),
                "note" | "notes" => cols.note = Some(i),
                "id" => cols.id = Some(i),
                _ => {}
            }
        }

        if cols.date.is_none() || cols.amount.is_none() {
            return Err(Error::InvalidData(
                "CSV header must contain at least Date and Amount columns".into(),
            ));
        }
        Ok(cols)
    }
}

fn field(record: &StringRecord, col: Option<usize>) -> Option<String> {
    col.and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Read CSV rows into raw records for `owner_id`
pub fn read_transactions_csv<R: Read>(reader: R, owner_id: &str) -> Result<Vec<TransactionRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let cols = Columns::from_headers(&headers)?;
    let mut records = Vec::new();

    for (index, result) in rdr.records().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(e) if matches!(e.kind(), ErrorKind::Io(_)) => return Err(e.into()),
            Err(e) => {
                warn!(index, error = %e, "Unreadable CSV row");
                records.push(TransactionRecord::unreadable(e.to_string()));
                continue;
            }
        };
        records.push(TransactionRecord {
            id: field(&row, cols.id),
            owner_id: Some(owner_id.to_string()),
            amount: field(&row, cols.amount).map(Value::String),
            kind: field(&row, cols.kind),
            category: field(&row, cols.category),
            date: field(&row, cols.date).map(Value::String),
            title: field(&row, cols.title),
            payment_method: field(&row, cols.payment_method),
            note: field(&row, cols.note),
            unreadable: None,
        });
    }

    debug!(rows = records.len(), "Read transaction CSV");
    Ok(records)
}
