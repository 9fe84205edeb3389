//! Raw claim record as received from a client, pre-encoding. Strongly typed:
//! the wire layer deserializes into this struct and everything downstream
//! works with fields, not column-name lookups.

use crate::error::{Result, ServiceError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Columns a batch upload must carry (superset allowed, extras pass through).
pub const REQUIRED_COLUMNS: [&str; 19] = [
    "assured_age",
    "nominee_relation",
    "occupation",
    "policy_sum_assured",
    "premium",
    "premium_payment_mode",
    "annual_income",
    "holder_marital_status",
    "indiv_requirement_flag",
    "policy_term",
    "policy_payment_term",
    "product_type",
    "channel",
    "bank_code",
    "policy_risk_commencement_date",
    "date_of_death",
    "intimation_date",
    "status",
    "sub_status",
];

/// One claim/policy record. Dates and `bank_code` may be absent (the encoder
/// degrades them to sentinels); every other field is required and its absence
/// is a validation error at the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    pub assured_age: f64,
    pub nominee_relation: String,
    pub occupation: String,
    pub policy_sum_assured: f64,
    pub premium: f64,
    pub premium_payment_mode: String,
    pub annual_income: f64,
    pub holder_marital_status: String,
    pub indiv_requirement_flag: String,
    pub policy_term: f64,
    pub policy_payment_term: f64,
    pub product_type: String,
    pub channel: String,
    #[serde(default)]
    pub bank_code: Option<f64>,
    #[serde(default)]
    pub policy_risk_commencement_date: Option<String>,
    #[serde(default)]
    pub date_of_death: Option<String>,
    #[serde(default)]
    pub intimation_date: Option<String>,
    pub status: String,
    pub sub_status: String,
}

fn cell<'r>(
    header_index: &HashMap<String, usize>,
    row: &'r csv::StringRecord,
    column: &str,
) -> Option<&'r str> {
    header_index
        .get(column)
        .and_then(|&i| row.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Verbatim cell: no trimming, no empty filtering. The sub-status vocabulary
/// contains " " and "-" as real categories, so whitespace is significant.
fn verbatim_cell(
    header_index: &HashMap<String, usize>,
    row: &csv::StringRecord,
    column: &str,
    row_no: usize,
) -> Result<String> {
    header_index
        .get(column)
        .and_then(|&i| row.get(i))
        .map(str::to_string)
        .ok_or_else(|| {
            ServiceError::Validation(format!("row {}: missing value for '{}'", row_no, column))
        })
}

fn required_str(
    header_index: &HashMap<String, usize>,
    row: &csv::StringRecord,
    column: &str,
    row_no: usize,
) -> Result<String> {
    cell(header_index, row, column)
        .map(str::to_string)
        .ok_or_else(|| {
            ServiceError::Validation(format!("row {}: missing value for '{}'", row_no, column))
        })
}

fn required_f64(
    header_index: &HashMap<String, usize>,
    row: &csv::StringRecord,
    column: &str,
    row_no: usize,
) -> Result<f64> {
    let raw = cell(header_index, row, column).ok_or_else(|| {
        ServiceError::Validation(format!("row {}: missing value for '{}'", row_no, column))
    })?;
    raw.parse::<f64>().map_err(|_| {
        ServiceError::Validation(format!(
            "row {}: '{}' is not numeric in column '{}'",
            row_no, raw, column
        ))
    })
}

impl RawRecord {
    /// Build a record from one CSV row. `header_index` maps column name to
    /// position and has already been checked against [`REQUIRED_COLUMNS`].
    /// `row_no` is 1-based and only used for error messages.
    pub fn from_csv_row(
        header_index: &HashMap<String, usize>,
        row: &csv::StringRecord,
        row_no: usize,
    ) -> Result<Self> {
        let bank_code = match cell(header_index, row, "bank_code") {
            Some(raw) => Some(raw.parse::<f64>().map_err(|_| {
                ServiceError::Validation(format!(
                    "row {}: '{}' is not numeric in column 'bank_code'",
                    row_no, raw
                ))
            })?),
            None => None,
        };

        Ok(Self {
            assured_age: required_f64(header_index, row, "assured_age", row_no)?,
            nominee_relation: required_str(header_index, row, "nominee_relation", row_no)?,
            occupation: required_str(header_index, row, "occupation", row_no)?,
            policy_sum_assured: required_f64(header_index, row, "policy_sum_assured", row_no)?,
            premium: required_f64(header_index, row, "premium", row_no)?,
            premium_payment_mode: required_str(header_index, row, "premium_payment_mode", row_no)?,
            annual_income: required_f64(header_index, row, "annual_income", row_no)?,
            holder_marital_status: required_str(
                header_index,
                row,
                "holder_marital_status",
                row_no,
            )?,
            indiv_requirement_flag: required_str(
                header_index,
                row,
                "indiv_requirement_flag",
                row_no,
            )?,
            policy_term: required_f64(header_index, row, "policy_term", row_no)?,
            policy_payment_term: required_f64(header_index, row, "policy_payment_term", row_no)?,
            product_type: required_str(header_index, row, "product_type", row_no)?,
            channel: required_str(header_index, row, "channel", row_no)?,
            bank_code,
            policy_risk_commencement_date: cell(
                header_index,
                row,
                "policy_risk_commencement_date",
            )
            .map(str::to_string),
            date_of_death: cell(header_index, row, "date_of_death").map(str::to_string),
            intimation_date: cell(header_index, row, "intimation_date").map(str::to_string),
            status: required_str(header_index, row, "status", row_no)?,
            sub_status: verbatim_cell(header_index, row, "sub_status", row_no)?,
        })
    }
}
