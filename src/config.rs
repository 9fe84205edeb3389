//! Service configuration. The model path and the frozen encoding tables form
//! one atomic trained artifact; the config only points at the weights.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Path to the ONNX classifier weights
    pub model_path: PathBuf,
    /// Directory for batch result artifacts (job registry + payloads)
    pub artifacts_dir: PathBuf,
    /// HTTP surface
    pub http: HttpConfig,
    /// Inference limits
    pub inference: InferenceConfig,
    /// Third-party signature verification forwarding
    pub verify: VerifyConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Per-request inference timeout (milliseconds)
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyConfig {
    pub enabled: bool,
    /// Provider endpoint when enabled
    pub endpoint: Option<String>,
    /// Provider request timeout (seconds)
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("model.onnx"),
            artifacts_dir: PathBuf::from(".claimsense/artifacts"),
            http: HttpConfig::default(),
            inference: InferenceConfig::default(),
            verify: VerifyConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self { timeout_ms: 5_000 }
    }
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: None,
            timeout_secs: 15,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

impl ServiceConfig {
    /// Load from JSON file if present; otherwise return default
    pub fn load(path: &std::path::Path) -> Self {
        if path.exists() {
            if let Ok(data) = std::fs::read_to_string(path) {
                if let Ok(c) = serde_json::from_str::<ServiceConfig>(&data) {
                    return c;
                }
            }
        }
        Self::default()
    }
}
