//! Structured JSON logging for requests and batch jobs.

mod format;

pub use format::StructuredLogger;
