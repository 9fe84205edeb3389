//! Versioned feature schema: the ordered list of columns the classifier was
//! trained on. Both the encoder and the prediction service reference this one
//! object; nothing else may decide column order.

pub mod tables;

/// Bumped whenever the tables or column layout change together with the
/// model weights.
pub const SCHEMA_VERSION: &str = "v1";

/// Ordered output columns: numeric and label columns in raw-field order with
/// the three derived day-count columns standing in for the raw dates, then
/// one-hot expansions appended per field in per-field category order.
#[derive(Debug, Clone)]
pub struct EncodingSchema {
    version: &'static str,
    columns: Vec<String>,
}

impl EncodingSchema {
    /// The schema the retained model weights were trained on.
    pub fn v1() -> Self {
        let mut columns: Vec<String> = vec![
            "assured_age".into(),
            "nominee_relation".into(),
            "occupation".into(),
            "policy_sum_assured".into(),
            "premium".into(),
            "annual_income".into(),
            "policy_term".into(),
            "policy_payment_term".into(),
            "bank_code".into(),
            "policy_to_death_days".into(),
            "death_to_intimation_days".into(),
            "policy_to_intimation_days".into(),
        ];

        let one_hot_fields: [(&str, &[&str]); 7] = [
            ("premium_payment_mode", &tables::PREMIUM_PAYMENT_MODES),
            ("holder_marital_status", &tables::MARITAL_STATUSES),
            ("indiv_requirement_flag", &tables::REQUIREMENT_FLAGS),
            ("product_type", &tables::PRODUCT_TYPES),
            ("channel", &tables::CHANNELS),
            ("status", &tables::STATUSES),
            ("sub_status", &tables::SUB_STATUSES),
        ];
        for (field, categories) in one_hot_fields {
            for category in categories {
                columns.push(format!("{}_{}", field, category));
            }
        }

        Self {
            version: SCHEMA_VERSION,
            columns,
        }
    }

    pub fn version(&self) -> &str {
        self.version
    }

    /// Number of columns the encoded vector must have.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Index of a column by name, if present.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}
