//! Deterministic feature encoding: raw claim record → fixed-length ordered
//! numeric vector matching the trained [`crate::schema::EncodingSchema`].

mod dates;
mod pipeline;

pub use dates::{parse_date, DayCounts};
pub use pipeline::encode;

use serde::{Deserialize, Serialize};

/// Fixed-length numeric vector ready for classifier inference. Column order
/// is owned by the schema; this is just the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedVector {
    values: Vec<f32>,
}

impl EncodedVector {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
