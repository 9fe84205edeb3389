//! HTTP surface: request routing, shape validation, and file plumbing around
//! the prediction service.

mod rest;

pub use rest::{AppState, RestApi};
