//! Frozen encoding tables, computed once from the training data and shipped
//! together with the classifier weights. Values here are part of the trained
//! model artifact: changing any of them without retraining silently breaks
//! every prediction.

/// One-hot category vocabularies, in trained per-field order.
pub const PREMIUM_PAYMENT_MODES: [&str; 5] =
    ["Quarterly", "Yearly", "Half yearly", "Monthly", "Single"];

pub const MARITAL_STATUSES: [&str; 4] = ["Single", "Married", "widowed", "divorced"];

pub const REQUIREMENT_FLAGS: [&str; 2] = ["Non Medical", "Medical"];

pub const PRODUCT_TYPES: [&str; 6] =
    ["ULIP", "Traditional", "Pension", "Health", "Non Par", "Variable"];

pub const CHANNELS: [&str; 4] = [
    "Retail Agency",
    "Bancassurance",
    "Institutional Alliance",
    "Mail and Others",
];

pub const STATUSES: [&str; 9] = [
    "Claim",
    "Cancellation",
    "Lapse",
    "Technical Lapse",
    "Inforce",
    "Withdrawal",
    "Rejection",
    "Maturity",
    "Terminated",
];

// The blank and "-" entries are real categories in the source data.
pub const SUB_STATUSES: [&str; 17] = [
    "Death Claim Repudiated",
    "Other Reason",
    "Death Claim Paid",
    " ",
    "Intimated Death Claim",
    "Surrendered Reinvested Auto",
    "-",
    "Free Look Cancellation",
    "Declined",
    "Dishonour",
    "Disinvested Paid",
    "Surrendered",
    "Refunded",
    "Paid Up",
    "Intimated Death Claim-Annuity",
    "Unpaid",
    "Disinvested Unpaid",
];

/// Label-code vocabularies: the dense integer code is the array index.
pub const NOMINEE_RELATIONS: [&str; 13] = [
    "Brother",
    "Daughter",
    "Father",
    "Grand Daughter",
    "Grand Son",
    "Husband",
    "Mother",
    "Nephew",
    "Niece",
    "Sister",
    "Son",
    "Spouse",
    "Wife",
];

pub const OCCUPATIONS: [&str; 13] = [
    "Agriculturist",
    "Army",
    "Business",
    "Construction Labour",
    "Defense Retired",
    "Family Pension",
    "Housewife",
    "Other Arm Forces Except Police",
    "Profession",
    "Retired",
    "Self-Employed",
    "Service",
    "Student",
];

/// Output classes, indexed by classifier class index. The near-duplicate
/// entries ("Misappropriating Funds"/"Misappropriating funds") are distinct
/// classes in the training data.
pub const FRAUD_CATEGORIES: [&str; 12] = [
    "Agent Dual Pan Card",
    "Claims Fraud",
    "Document Tampering",
    "Impersonation",
    "Kickback",
    "Logging in business not sourced by oneself",
    "Misappropriating Funds",
    "Misappropriating funds",
    "Misrepresentation",
    "Misselling",
    "Signature Forgery",
    "Unauthorized activity",
];

/// Standardization constants: (mean, std) per field.
pub const ASSURED_AGE_MEAN_STD: (f64, f64) = (46.88, 10.53);
pub const POLICY_SUM_ASSURED_MEAN_STD: (f64, f64) = (1_090_620.55, 1_976_036.62);
pub const PREMIUM_MEAN_STD: (f64, f64) = (190_290.47, 441_873.88);
pub const ANNUAL_INCOME_MEAN_STD: (f64, f64) = (2_259_169.14, 29_279_866.28);

/// Min-max scaling constants: (min, max) per field. The day-count ranges
/// include the -1 missing-date sentinel observed during training.
pub const POLICY_TERM_MIN_MAX: (f64, f64) = (5.0, 80.0);
pub const POLICY_PAYMENT_TERM_MIN_MAX: (f64, f64) = (3.0, 10.0);
pub const POLICY_TO_DEATH_DAYS_MIN_MAX: (f64, f64) = (-31.0, 1026.0);
pub const DEATH_TO_INTIMATION_DAYS_MIN_MAX: (f64, f64) = (-1.0, 420.0);
pub const POLICY_TO_INTIMATION_DAYS_MIN_MAX: (f64, f64) = (-1.0, 1244.0);
