//! ClaimSense — insurance-claim fraud category prediction service.
//!
//! Modular structure:
//! - [`schema`] — Frozen encoding tables and the versioned feature schema
//! - [`record`] — Strongly typed raw claim record
//! - [`encoder`] — Deterministic feature-encoding pipeline
//! - [`model`] — ONNX classifier inference
//! - [`service`] — Prediction orchestration (single and batch)
//! - [`batch`] — Tabular batch parsing and augmented output
//! - [`artifacts`] — Job-keyed batch result store
//! - [`verify`] — Third-party signature verification client
//! - [`api`] — HTTP surface
//! - [`logging`] — Structured JSON logging

pub mod api;
pub mod artifacts;
pub mod batch;
pub mod config;
pub mod encoder;
pub mod error;
pub mod logging;
pub mod model;
pub mod record;
pub mod schema;
pub mod service;
pub mod verify;

pub use artifacts::ArtifactStore;
pub use config::ServiceConfig;
pub use encoder::{encode, EncodedVector};
pub use error::{Result, ServiceError};
pub use logging::StructuredLogger;
pub use model::{Classifier, OnnxClassifier};
pub use record::RawRecord;
pub use schema::EncodingSchema;
pub use service::PredictionService;
