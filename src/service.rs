//! Prediction orchestration: encode, validate against the schema, run the
//! classifier, resolve the arg-max class index to its category label.

use crate::encoder::encode;
use crate::error::{Result, ServiceError};
use crate::model::Classifier;
use crate::record::RawRecord;
use crate::schema::{tables, EncodingSchema};
use std::sync::Arc;

/// Read-only prediction context, built once at startup and shared across
/// requests. Holds no mutable state.
pub struct PredictionService {
    schema: EncodingSchema,
    classifier: Arc<dyn Classifier>,
}

/// First index of the maximum probability, like the training-side arg-max.
fn argmax(probs: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &p) in probs.iter().enumerate() {
        match best {
            Some((_, bp)) if p <= bp => {}
            _ => best = Some((i, p)),
        }
    }
    best.map(|(i, _)| i)
}

impl PredictionService {
    /// Rejects classifiers whose input width disagrees with the schema; a
    /// mismatch here means the model artifact and tables are out of sync.
    pub fn new(schema: EncodingSchema, classifier: Arc<dyn Classifier>) -> Result<Self> {
        if classifier.input_dim() != schema.len() {
            return Err(ServiceError::SchemaMismatch {
                expected: schema.len(),
                actual: classifier.input_dim(),
            });
        }
        if classifier.num_classes() != tables::FRAUD_CATEGORIES.len() {
            return Err(ServiceError::Model(format!(
                "classifier has {} classes, label table has {}",
                classifier.num_classes(),
                tables::FRAUD_CATEGORIES.len()
            )));
        }
        Ok(Self { schema, classifier })
    }

    pub fn schema(&self) -> &EncodingSchema {
        &self.schema
    }

    pub fn class_labels(&self) -> &'static [&'static str] {
        &tables::FRAUD_CATEGORIES
    }

    /// Predict the fraud category for one record.
    pub fn predict(&self, record: &RawRecord) -> Result<&'static str> {
        let vector = encode(record);
        if vector.len() != self.schema.len() {
            return Err(ServiceError::SchemaMismatch {
                expected: self.schema.len(),
                actual: vector.len(),
            });
        }

        let probs = self.classifier.infer(vector.as_slice())?;
        let index = argmax(&probs)
            .ok_or_else(|| ServiceError::Inference("empty class distribution".to_string()))?;
        tables::FRAUD_CATEGORIES.get(index).copied().ok_or_else(|| {
            ServiceError::Inference(format!("class index {} out of label range", index))
        })
    }

    /// Predict row by row with the same per-row contract as [`predict`];
    /// output order matches input order. An empty batch is not an error.
    ///
    /// [`predict`]: PredictionService::predict
    pub fn predict_batch(&self, records: &[RawRecord]) -> Result<Vec<&'static str>> {
        let mut labels = Vec::with_capacity(records.len());
        for record in records {
            labels.push(self.predict(record)?);
        }
        Ok(labels)
    }
}
