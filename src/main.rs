//! ClaimSense server entrypoint: load the trained artifact (encoding schema
//! plus classifier weights) once, build the read-only prediction context, and
//! serve it over HTTP.

use claimsense::{
    api::{AppState, RestApi},
    artifacts::ArtifactStore,
    config::ServiceConfig,
    logging::StructuredLogger,
    model::OnnxClassifier,
    schema::{tables, EncodingSchema},
    service::PredictionService,
    verify::SignatureVerifier,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::var("CLAIMSENSE_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from("config.json"));
    let config = ServiceConfig::load(&config_path);

    StructuredLogger::init(config.log.json, &config.log.level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        model = ?config.model_path,
        artifacts = ?config.artifacts_dir,
        "claimsense starting"
    );

    let schema = EncodingSchema::v1();
    let classifier = Arc::new(OnnxClassifier::load(
        &config.model_path,
        schema.len(),
        tables::FRAUD_CATEGORIES.len(),
    )?);
    let service = Arc::new(PredictionService::new(schema, classifier)?);
    let artifacts = Arc::new(ArtifactStore::open(&config.artifacts_dir)?);
    let verifier = SignatureVerifier::new(&config.verify).map(Arc::new);
    if verifier.is_none() {
        info!("signature verification disabled");
    }

    let state = AppState {
        service,
        artifacts,
        verifier,
        inference_timeout: Duration::from_millis(config.inference.timeout_ms),
    };

    info!(bind = %config.http.bind, port = config.http.port, "HTTP server starting");
    RestApi::start(state, &config.http.bind, config.http.port).await?;
    info!("claimsense stopped");

    Ok(())
}
