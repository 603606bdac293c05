// src/sheets/record.rs

use serde::Serialize;
use serde_json::Value;

use super::range::HEADER_OFFSET;
use super::status::{map_status, scalar_to_string, PLACEHOLDER};
use super::timestamp::TimeNormalizer;

/// One data row of the orders tab, rebuilt on every read.
///
/// Columns: A time | B customer | C item | D notes | E amount | F status code
/// | G location | H contact.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub row_number: u32,
    pub time_display: String,
    pub time_raw: Option<String>,
    pub customer: String,
    pub item: String,
    pub quantity: u32,
    pub notes: String,
    pub location: String,
    pub contact: String,
    pub status_display: String,
    pub status_code: String,
    pub amount: Option<Value>,
    pub sheet_title: String,
}

impl OrderRecord {
    /// Map the row at `index` (0-based position in the fetched batch).
    pub fn from_row(index: usize, row: &[Value], sheet_title: &str, times: &TimeNormalizer) -> Self {
        let cell = |col: usize| row.get(col);
        let time = times.normalize(&scalar_to_string(cell(0)));
        let status_code = scalar_to_string(cell(5));

        Self {
            row_number: index as u32 + HEADER_OFFSET,
            time_display: time.display.clone(),
            time_raw: time.iso(),
            customer: or_placeholder(cell(1)),
            item: or_placeholder_blank(cell(2)),
            quantity: 1,
            notes: or_placeholder_blank(cell(3)),
            location: or_placeholder(cell(6)),
            contact: or_placeholder(cell(7)),
            status_display: map_status(&status_code),
            status_code,
            amount: cell(4).filter(|v| !is_empty_cell(v)).cloned(),
            sheet_title: sheet_title.to_string(),
        }
    }
}

/// Map a fetched batch 1:1, preserving order.
pub fn map_rows(rows: &[Vec<Value>], sheet_title: &str, times: &TimeNormalizer) -> Vec<OrderRecord> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| OrderRecord::from_row(i, row, sheet_title, times))
        .collect()
}

fn is_empty_cell(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn raw_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => scalar_to_string(Some(other)),
    }
}

fn or_placeholder(value: Option<&Value>) -> String {
    match value {
        Some(v) if !is_empty_cell(v) => raw_text(v),
        _ => PLACEHOLDER.to_string(),
    }
}

// blank-after-trim counts as empty for these columns
fn or_placeholder_blank(value: Option<&Value>) -> String {
    match value {
        Some(v) if !scalar_to_string(Some(v)).is_empty() => raw_text(v),
        _ => PLACEHOLDER.to_string(),
    }
}
