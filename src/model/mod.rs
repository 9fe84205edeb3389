//! Classifier inference. The trained network is an opaque capability: a
//! fixed-length numeric vector in, a probability distribution over the fixed
//! class set out.

mod onnx;

pub use onnx::OnnxClassifier;

use crate::error::Result;

/// Seam between the prediction service and the inference backend; tests run
/// the service against fixture implementations.
pub trait Classifier: Send + Sync {
    /// Length of the feature vector the model expects.
    fn input_dim(&self) -> usize;

    /// Number of output classes.
    fn num_classes(&self) -> usize;

    /// Forward inference: returns one probability per class.
    fn infer(&self, features: &[f32]) -> Result<Vec<f32>>;
}
