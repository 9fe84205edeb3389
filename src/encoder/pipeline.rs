//! The encoding pipeline: date differencing, then frozen numeric
//! normalization, then categorical encoding, assembled in the exact column
//! order the classifier was trained on. Pure and total: unknown categorical
//! values and missing dates degrade to sentinels instead of failing.

use super::dates::DayCounts;
use super::EncodedVector;
use crate::record::RawRecord;
use crate::schema::tables;

/// Unknown label-encoded or missing optional numeric value.
const UNKNOWN_CODE: f64 = -1.0;

fn round3(x: f64) -> f32 {
    ((x * 1000.0).round() / 1000.0) as f32
}

/// Frozen standardization for the mean/std group.
fn zscore(x: f64, (mean, std): (f64, f64)) -> f32 {
    round3((x - mean) / std)
}

/// Frozen min-max scaling for the min/max group. Applied to the -1 day-count
/// sentinel as well; the model was trained on scaled sentinels.
fn minmax(x: f64, (min, max): (f64, f64)) -> f32 {
    round3((x - min) / (max - min))
}

/// Dense integer code from a fixed vocabulary; -1 for anything unseen.
fn label_code(value: &str, vocabulary: &[&str]) -> f32 {
    vocabulary
        .iter()
        .position(|v| *v == value)
        .map(|i| i as f64)
        .unwrap_or(UNKNOWN_CODE) as f32
}

/// One binary column per known category. An unseen value sets none of them.
fn one_hot(value: &str, categories: &[&str], out: &mut Vec<f32>) {
    for category in categories {
        out.push(if *category == value { 1.0 } else { 0.0 });
    }
}

/// Encode one raw record into the trained column order. Output length always
/// equals `EncodingSchema::v1().len()`; the prediction service still checks
/// it before inference.
pub fn encode(record: &RawRecord) -> EncodedVector {
    let days = DayCounts::derive(
        record.policy_risk_commencement_date.as_deref(),
        record.date_of_death.as_deref(),
        record.intimation_date.as_deref(),
    );

    let mut values: Vec<f32> = Vec::with_capacity(64);

    // Numeric, label, and derived columns, in raw-field order.
    values.push(zscore(record.assured_age, tables::ASSURED_AGE_MEAN_STD));
    values.push(label_code(&record.nominee_relation, &tables::NOMINEE_RELATIONS));
    values.push(label_code(&record.occupation, &tables::OCCUPATIONS));
    values.push(zscore(
        record.policy_sum_assured,
        tables::POLICY_SUM_ASSURED_MEAN_STD,
    ));
    values.push(zscore(record.premium, tables::PREMIUM_MEAN_STD));
    values.push(zscore(record.annual_income, tables::ANNUAL_INCOME_MEAN_STD));
    values.push(minmax(record.policy_term, tables::POLICY_TERM_MIN_MAX));
    values.push(minmax(
        record.policy_payment_term,
        tables::POLICY_PAYMENT_TERM_MIN_MAX,
    ));
    // bank_code carries no frozen scaling; absent becomes the -1 sentinel.
    values.push(round3(record.bank_code.unwrap_or(UNKNOWN_CODE)));
    values.push(minmax(
        days.policy_to_death,
        tables::POLICY_TO_DEATH_DAYS_MIN_MAX,
    ));
    values.push(minmax(
        days.death_to_intimation,
        tables::DEATH_TO_INTIMATION_DAYS_MIN_MAX,
    ));
    values.push(minmax(
        days.policy_to_intimation,
        tables::POLICY_TO_INTIMATION_DAYS_MIN_MAX,
    ));

    // One-hot expansions, appended per field in per-field category order.
    one_hot(
        &record.premium_payment_mode,
        &tables::PREMIUM_PAYMENT_MODES,
        &mut values,
    );
    one_hot(
        &record.holder_marital_status,
        &tables::MARITAL_STATUSES,
        &mut values,
    );
    one_hot(
        &record.indiv_requirement_flag,
        &tables::REQUIREMENT_FLAGS,
        &mut values,
    );
    one_hot(&record.product_type, &tables::PRODUCT_TYPES, &mut values);
    one_hot(&record.channel, &tables::CHANNELS, &mut values);
    one_hot(&record.status, &tables::STATUSES, &mut values);
    one_hot(&record.sub_status, &tables::SUB_STATUSES, &mut values);

    EncodedVector::new(values)
}
