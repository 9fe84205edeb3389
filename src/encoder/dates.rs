//! Date differencing: the three raw claim dates are never model inputs; only
//! their pairwise day differences are. A missing or unparseable date turns
//! every difference touching it into the -1 sentinel.

use chrono::NaiveDate;

/// Sentinel for a day count touching a missing date. Scaled by min-max like
/// any other value, matching what the model saw during training.
pub const MISSING_DAYS: f64 = -1.0;

/// Accepted textual layouts, day-first where ambiguous.
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%d-%m-%Y",
    "%d/%m/%Y",
    "%Y/%m/%d",
    "%d-%b-%Y",
    "%d %b %Y",
];

/// Parse a textual date, trying each accepted layout in turn. Returns `None`
/// for anything unparseable; callers treat that as a missing date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// The three derived day-count features.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayCounts {
    pub policy_to_death: f64,
    pub death_to_intimation: f64,
    pub policy_to_intimation: f64,
}

fn diff_days(from: Option<NaiveDate>, to: Option<NaiveDate>) -> f64 {
    match (from, to) {
        (Some(from), Some(to)) => (to - from).num_days() as f64,
        _ => MISSING_DAYS,
    }
}

impl DayCounts {
    /// Derive the day counts from the three raw date strings.
    pub fn derive(
        commencement: Option<&str>,
        death: Option<&str>,
        intimation: Option<&str>,
    ) -> Self {
        let commencement = commencement.and_then(parse_date);
        let death = death.and_then(parse_date);
        let intimation = intimation.and_then(parse_date);

        Self {
            policy_to_death: diff_days(commencement, death),
            death_to_intimation: diff_days(death, intimation),
            policy_to_intimation: diff_days(commencement, intimation),
        }
    }
}
