//! Encoder properties: golden vector against the trained schema, sentinel
//! degradation for unknown categories and missing dates, idempotence.

use claimsense::encoder::{encode, parse_date};
use claimsense::record::RawRecord;
use claimsense::schema::EncodingSchema;
use chrono::NaiveDate;

fn golden_record() -> RawRecord {
    RawRecord {
        assured_age: 40.0,
        nominee_relation: "Wife".into(),
        occupation: "Business".into(),
        // Numerics pinned to their training means encode to exactly 0.0.
        policy_sum_assured: 1_090_620.55,
        premium: 190_290.47,
        premium_payment_mode: "Monthly".into(),
        annual_income: 2_259_169.14,
        holder_marital_status: "Married".into(),
        indiv_requirement_flag: "Medical".into(),
        policy_term: 20.0,
        policy_payment_term: 10.0,
        product_type: "ULIP".into(),
        channel: "Retail Agency".into(),
        bank_code: Some(3.0),
        policy_risk_commencement_date: Some("2021-01-01".into()),
        date_of_death: Some("2021-07-20".into()),
        intimation_date: Some("2021-08-19".into()),
        status: "Claim".into(),
        sub_status: "Death Claim Paid".into(),
    }
}

fn assert_value(schema: &EncodingSchema, values: &[f32], column: &str, expected: f32) {
    let i = schema
        .position(column)
        .unwrap_or_else(|| panic!("schema has no column '{}'", column));
    let actual = values[i];
    assert!(
        (actual - expected).abs() < 1e-6,
        "column '{}' (index {}): expected {}, got {}",
        column,
        i,
        expected,
        actual
    );
}

#[test]
fn schema_layout() {
    let schema = EncodingSchema::v1();
    assert_eq!(schema.len(), 59);
    assert_eq!(schema.version(), "v1");
    assert_eq!(schema.position("assured_age"), Some(0));
    assert_eq!(schema.position("bank_code"), Some(8));
    assert_eq!(schema.position("policy_to_death_days"), Some(9));
    assert_eq!(schema.position("premium_payment_mode_Quarterly"), Some(12));
    assert_eq!(schema.position("sub_status_Disinvested Unpaid"), Some(58));
    // Raw dates never appear in the output.
    assert_eq!(schema.position("date_of_death"), None);
    assert_eq!(schema.position("policy_risk_commencement_date"), None);
    assert_eq!(schema.position("intimation_date"), None);
}

#[test]
fn golden_vector_exact() {
    let schema = EncodingSchema::v1();
    let vector = encode(&golden_record());
    assert_eq!(vector.len(), schema.len());

    let v = vector.as_slice();
    // (40 - 46.88) / 10.53, rounded to 3 decimals.
    assert_value(&schema, v, "assured_age", -0.653);
    assert_value(&schema, v, "nominee_relation", 12.0);
    assert_value(&schema, v, "occupation", 2.0);
    assert_value(&schema, v, "policy_sum_assured", 0.0);
    assert_value(&schema, v, "premium", 0.0);
    assert_value(&schema, v, "annual_income", 0.0);
    // (20 - 5) / 75 and (10 - 3) / 7.
    assert_value(&schema, v, "policy_term", 0.2);
    assert_value(&schema, v, "policy_payment_term", 1.0);
    assert_value(&schema, v, "bank_code", 3.0);
    // 200 days → (200 + 31) / 1057; 30 days → (30 + 1) / 421;
    // 230 days → (230 + 1) / 1245.
    assert_value(&schema, v, "policy_to_death_days", 0.219);
    assert_value(&schema, v, "death_to_intimation_days", 0.074);
    assert_value(&schema, v, "policy_to_intimation_days", 0.186);

    assert_value(&schema, v, "premium_payment_mode_Monthly", 1.0);
    assert_value(&schema, v, "premium_payment_mode_Quarterly", 0.0);
    assert_value(&schema, v, "premium_payment_mode_Yearly", 0.0);
    assert_value(&schema, v, "holder_marital_status_Married", 1.0);
    assert_value(&schema, v, "holder_marital_status_Single", 0.0);
    assert_value(&schema, v, "holder_marital_status_widowed", 0.0);
    assert_value(&schema, v, "holder_marital_status_divorced", 0.0);
    assert_value(&schema, v, "indiv_requirement_flag_Medical", 1.0);
    assert_value(&schema, v, "indiv_requirement_flag_Non Medical", 0.0);
    assert_value(&schema, v, "product_type_ULIP", 1.0);
    assert_value(&schema, v, "channel_Retail Agency", 1.0);
    assert_value(&schema, v, "status_Claim", 1.0);
    assert_value(&schema, v, "sub_status_Death Claim Paid", 1.0);

    // Exactly one indicator set per one-hot field: 7 ones across 47 columns.
    let one_hot_ones: f32 = v[12..].iter().sum();
    assert!((one_hot_ones - 7.0).abs() < 1e-6);
}

#[test]
fn unknown_one_hot_value_sets_no_columns() {
    let schema = EncodingSchema::v1();
    let mut record = golden_record();
    record.holder_marital_status = "Widower".into();
    let vector = encode(&record);

    let v = vector.as_slice();
    for status in ["Single", "Married", "widowed", "divorced"] {
        assert_value(&schema, v, &format!("holder_marital_status_{}", status), 0.0);
    }
    // Vector length is unchanged; unknown values never drop columns.
    assert_eq!(vector.len(), schema.len());
}

#[test]
fn unknown_label_value_encodes_sentinel() {
    let schema = EncodingSchema::v1();
    let mut record = golden_record();
    record.nominee_relation = "Cousin".into();
    record.occupation = "Astronaut".into();
    let v = encode(&record);
    assert_value(&schema, v.as_slice(), "nominee_relation", -1.0);
    assert_value(&schema, v.as_slice(), "occupation", -1.0);
}

#[test]
fn missing_death_date_degrades_both_day_counts() {
    let schema = EncodingSchema::v1();
    let mut record = golden_record();
    record.date_of_death = None;
    let v = encode(&record);

    // Sentinel -1 is min-max scaled: (-1 + 31) / 1057 and (-1 + 1) / 421.
    assert_value(&schema, v.as_slice(), "policy_to_death_days", 0.028);
    assert_value(&schema, v.as_slice(), "death_to_intimation_days", 0.0);
    // The commencement→intimation difference is untouched.
    assert_value(&schema, v.as_slice(), "policy_to_intimation_days", 0.186);
}

#[test]
fn unparseable_date_treated_as_missing() {
    let schema = EncodingSchema::v1();
    let mut record = golden_record();
    record.date_of_death = Some("not-a-date".into());
    let v = encode(&record);
    assert_value(&schema, v.as_slice(), "policy_to_death_days", 0.028);
    assert_value(&schema, v.as_slice(), "death_to_intimation_days", 0.0);
}

#[test]
fn day_first_dates_accepted() {
    assert_eq!(
        parse_date("01-02-2021"),
        NaiveDate::from_ymd_opt(2021, 2, 1)
    );
    assert_eq!(
        parse_date("11/02/2021"),
        NaiveDate::from_ymd_opt(2021, 2, 11)
    );
    assert_eq!(
        parse_date("2021-02-01"),
        NaiveDate::from_ymd_opt(2021, 2, 1)
    );
    assert_eq!(parse_date(""), None);
    assert_eq!(parse_date("31-31-2021"), None);

    let mut record = golden_record();
    record.policy_risk_commencement_date = Some("01-02-2021".into());
    record.date_of_death = Some("11-02-2021".into());
    record.intimation_date = None;
    let schema = EncodingSchema::v1();
    let v = encode(&record);
    // 10 days → (10 + 31) / 1057.
    assert_value(&schema, v.as_slice(), "policy_to_death_days", 0.039);
}

#[test]
fn missing_bank_code_encodes_sentinel() {
    let schema = EncodingSchema::v1();
    let mut record = golden_record();
    record.bank_code = None;
    let v = encode(&record);
    assert_value(&schema, v.as_slice(), "bank_code", -1.0);
}

#[test]
fn encoding_is_idempotent() {
    let record = golden_record();
    assert_eq!(encode(&record), encode(&record));
}

#[test]
fn record_json_defaults_optional_fields() {
    // Dates and bank_code may be absent on the wire.
    let json = serde_json::json!({
        "assured_age": 55,
        "nominee_relation": "Son",
        "occupation": "Service",
        "policy_sum_assured": 500000,
        "premium": 12000,
        "premium_payment_mode": "Yearly",
        "annual_income": 800000,
        "holder_marital_status": "Single",
        "indiv_requirement_flag": "Non Medical",
        "policy_term": 10,
        "policy_payment_term": 5,
        "product_type": "Traditional",
        "channel": "Bancassurance",
        "status": "Claim",
        "sub_status": "Intimated Death Claim"
    });
    let record: RawRecord = serde_json::from_value(json).unwrap();
    assert_eq!(record.bank_code, None);
    assert_eq!(record.date_of_death, None);

    let v = encode(&record);
    assert_eq!(v.len(), EncodingSchema::v1().len());
}

#[test]
fn record_json_missing_required_field_rejected() {
    let json = serde_json::json!({ "assured_age": 55 });
    assert!(serde_json::from_value::<RawRecord>(json).is_err());
}
