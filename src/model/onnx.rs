//! ONNX Runtime backend. The session is loaded once at process start and is
//! immutable for the process lifetime; `Session::run` takes `&self`, so one
//! instance is shared across requests without locking.

use super::Classifier;
use crate::error::{Result, ServiceError};
use ndarray::Array2;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Tensor;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Once;

static ORT_INIT: Once = Once::new();

fn init_runtime() {
    ORT_INIT.call_once(|| {
        if let Err(e) = ort::init().with_name("claimsense").commit() {
            tracing::warn!(error = %e, "ONNX runtime init failed");
        }
    });
}

pub struct OnnxClassifier {
    session: Session,
    input_name: String,
    input_dim: usize,
    num_classes: usize,
}

impl OnnxClassifier {
    /// Load the model from disk. A missing or unreadable model file is a
    /// startup error; the service cannot run without it.
    pub fn load(path: &Path, input_dim: usize, num_classes: usize) -> Result<Self> {
        init_runtime();

        if !path.exists() {
            return Err(ServiceError::Model(format!(
                "model file not found: {}",
                path.display()
            )));
        }

        let session = Session::builder()
            .map_err(|e| ServiceError::Model(e.to_string()))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ServiceError::Model(e.to_string()))?
            .commit_from_file(path)
            .map_err(|e| ServiceError::Model(e.to_string()))?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "input".to_string());

        tracing::info!(
            path = %path.display(),
            input = %input_name,
            input_dim,
            num_classes,
            "classifier loaded"
        );

        Ok(Self {
            session,
            input_name,
            input_dim,
            num_classes,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn input_dim(&self) -> usize {
        self.input_dim
    }

    fn num_classes(&self) -> usize {
        self.num_classes
    }

    fn infer(&self, features: &[f32]) -> Result<Vec<f32>> {
        if features.len() != self.input_dim {
            return Err(ServiceError::SchemaMismatch {
                expected: self.input_dim,
                actual: features.len(),
            });
        }

        let arr = Array2::from_shape_vec((1, self.input_dim), features.to_vec())
            .map_err(|e| ServiceError::Inference(e.to_string()))?;
        let arr = arr.into_dyn();
        let input = arr.as_standard_layout();

        let mut inputs = HashMap::new();
        inputs.insert(
            self.input_name.as_str(),
            Tensor::from_array(&input).map_err(|e| ServiceError::Inference(e.to_string()))?,
        );

        let outputs = self
            .session
            .run(inputs)
            .map_err(|e| ServiceError::Inference(e.to_string()))?;
        let tensor = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| ServiceError::Inference(e.to_string()))?;

        let probs: Vec<f32> = tensor.iter().copied().collect();
        if probs.len() != self.num_classes {
            return Err(ServiceError::Inference(format!(
                "model produced {} outputs, expected {}",
                probs.len(),
                self.num_classes
            )));
        }
        Ok(probs)
    }
}
