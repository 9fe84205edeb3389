//! Client for the third-party signature-image verification service. The
//! provider returns free text; the parse is a best-effort pattern match and
//! must not be trusted to track provider wording across versions.

use crate::error::{Result, ServiceError};
use serde::Serialize;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct VerificationOutcome {
    /// "genuine", "forged", or "unknown" when the text matched neither.
    pub verdict: String,
    /// Similarity in [0, 1] when the provider text carried one.
    pub similarity: Option<f32>,
    /// Provider text, verbatim, for auditing.
    pub raw: String,
}

/// First number after `start`, with a flag for a trailing percent sign.
fn leading_number(text: &str) -> Option<(f32, bool)> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let tail = &text[start..];
    let end = tail
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(tail.len());
    let value: f32 = tail[..end].parse().ok()?;
    let percent = tail[end..].trim_start().starts_with('%');
    Some((value, percent))
}

fn extract_similarity(lower: &str) -> Option<f32> {
    for key in ["similarity", "score", "confidence"] {
        if let Some(pos) = lower.find(key) {
            if let Some((value, percent)) = leading_number(&lower[pos + key.len()..]) {
                let value = if percent || value > 1.0 {
                    value / 100.0
                } else {
                    value
                };
                return Some(value.clamp(0.0, 1.0));
            }
        }
    }
    None
}

impl VerificationOutcome {
    /// Best-effort parse of the provider's free-text response.
    pub fn parse(text: &str) -> Self {
        let lower = text.to_lowercase();
        let verdict = if lower.contains("forg") || lower.contains("fake") {
            "forged"
        } else if lower.contains("genuine") || lower.contains("match") {
            "genuine"
        } else {
            "unknown"
        };
        Self {
            verdict: verdict.to_string(),
            similarity: extract_similarity(&lower),
            raw: text.to_string(),
        }
    }
}

pub struct SignatureVerifier {
    client: reqwest::Client,
    endpoint: String,
}

impl SignatureVerifier {
    /// Build from config; `None` when no endpoint is configured.
    pub fn new(config: &crate::config::VerifyConfig) -> Option<Self> {
        if !config.enabled {
            return None;
        }
        let endpoint = config.endpoint.as_ref()?.trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .ok()?;
        Some(Self { client, endpoint })
    }

    /// Forward one signature image and its reference identifier; parse the
    /// textual result.
    pub async fn verify(
        &self,
        image: Vec<u8>,
        filename: &str,
        reference: &str,
    ) -> Result<VerificationOutcome> {
        let part = reqwest::multipart::Part::bytes(image).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new()
            .part("image", part)
            .text("reference", reference.to_string());

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ServiceError::Verification(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ServiceError::Verification(e.to_string()))?;
        if !status.is_success() {
            return Err(ServiceError::Verification(format!("{} {}", status, text)));
        }

        let outcome = VerificationOutcome::parse(&text);
        info!(verdict = %outcome.verdict, similarity = ?outcome.similarity, "signature verified");
        Ok(outcome)
    }
}
