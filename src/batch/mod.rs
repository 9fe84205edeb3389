//! Tabular batch I/O: parse an uploaded CSV into raw records and write the
//! augmented copy (original columns plus the predicted category) back out.
//! Unknown extra columns pass through untouched.

use crate::error::{Result, ServiceError};
use crate::record::{RawRecord, REQUIRED_COLUMNS};
use std::collections::HashMap;

/// Column appended to the augmented output.
pub const PREDICTION_COLUMN: &str = "predicted_fraud_category";

/// A parsed upload: original header and rows kept verbatim for the augmented
/// output, typed records for the prediction path (one per row, same order).
pub struct BatchTable {
    headers: csv::StringRecord,
    rows: Vec<csv::StringRecord>,
    records: Vec<RawRecord>,
}

impl BatchTable {
    pub fn records(&self) -> &[RawRecord] {
        &self.records
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Parse CSV bytes. The header must be a superset of the required raw
/// columns; any malformed row fails the whole upload with a validation error
/// naming the row.
pub fn parse_csv(bytes: &[u8]) -> Result<BatchTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| ServiceError::Validation(format!("unreadable CSV header: {}", e)))?
        .clone();

    let header_index: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, name)| (name.trim().to_string(), i))
        .collect();

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !header_index.contains_key(**col))
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(ServiceError::Validation(format!(
            "missing required columns: {}",
            missing.join(", ")
        )));
    }

    let mut rows = Vec::new();
    let mut records = Vec::new();
    for (i, row) in reader.records().enumerate() {
        let row = row?;
        // 1-based, counting data rows only.
        let record = RawRecord::from_csv_row(&header_index, &row, i + 1)?;
        rows.push(row);
        records.push(record);
    }

    Ok(BatchTable {
        headers,
        rows,
        records,
    })
}

/// Artifact filename for an uploaded table: `predicted_<stem>.csv`, with the
/// upload's `.csv` extension stripped regardless of case.
pub fn output_filename(upload: &str) -> String {
    let cut = upload.len().saturating_sub(4);
    let stem = if upload.is_char_boundary(cut) && upload[cut..].eq_ignore_ascii_case(".csv") {
        &upload[..cut]
    } else {
        upload
    };
    format!("predicted_{}.csv", stem)
}

/// Serialize the augmented table: every original column in original order,
/// plus the prediction column. `predictions` must have one label per row.
pub fn write_augmented(table: &BatchTable, predictions: &[&str]) -> Result<Vec<u8>> {
    if predictions.len() != table.rows.len() {
        return Err(ServiceError::Storage(format!(
            "{} predictions for {} rows",
            predictions.len(),
            table.rows.len()
        )));
    }

    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header: Vec<&str> = table.headers.iter().collect();
    header.push(PREDICTION_COLUMN);
    writer
        .write_record(&header)
        .map_err(|e| ServiceError::Storage(e.to_string()))?;

    for (row, label) in table.rows.iter().zip(predictions) {
        let mut out: Vec<&str> = row.iter().collect();
        out.push(label);
        writer
            .write_record(&out)
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| ServiceError::Storage(e.to_string()))
}
