//! REST API over the prediction service. Handlers are thin: deserialize,
//! delegate, map errors to JSON `{"error": ...}` responses via the
//! taxonomy in [`crate::error`]. Inference runs on the blocking pool under an
//! explicit timeout.

use crate::artifacts::{ArtifactMeta, ArtifactStore};
use crate::batch;
use crate::error::ServiceError;
use crate::record::RawRecord;
use crate::service::PredictionService;
use crate::verify::SignatureVerifier;
use actix_cors::Cors;
use actix_multipart::Multipart;
use actix_web::{web, App, HttpResponse, HttpServer};
use futures_util::TryStreamExt;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PredictionService>,
    pub artifacts: Arc<ArtifactStore>,
    pub verifier: Option<Arc<SignatureVerifier>>,
    pub inference_timeout: Duration,
}

#[derive(Serialize)]
struct PredictionResponse {
    prediction: &'static str,
}

#[derive(Serialize)]
struct BatchResponse {
    message: &'static str,
    job_id: String,
    rows: usize,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    schema_version: String,
    feature_count: usize,
    class_count: usize,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(state: AppState, bind: &str, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            // Body deserialization failures use the same {"error": ...} shape
            // as the taxonomy errors.
            let json_cfg = web::JsonConfig::default().error_handler(|err, _req| {
                let msg = err.to_string();
                actix_web::error::InternalError::from_response(
                    err,
                    HttpResponse::BadRequest().json(serde_json::json!({ "error": msg })),
                )
                .into()
            });

            App::new()
                .wrap(cors)
                .app_data(json_cfg)
                .app_data(web::Data::new(state.clone()))
                .route("/health", web::get().to(health))
                .route("/predict", web::post().to(predict))
                .route("/predict/file", web::post().to(predict_file))
                .route("/results/latest", web::get().to(download_latest))
                .route("/results/{job_id}", web::get().to(download_result))
                .route("/verify/signature", web::post().to(verify_signature))
        })
        .bind((bind, port))?
        .run()
        .await
    }
}

/// Run a blocking prediction under the configured timeout.
async fn run_blocking<T, F>(budget: Duration, f: F) -> Result<T, ServiceError>
where
    F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::time::timeout(budget, web::block(f)).await {
        Err(_) => Err(ServiceError::Inference("inference timed out".to_string())),
        Ok(Ok(result)) => result,
        Ok(Err(_)) => Err(ServiceError::Inference(
            "inference task cancelled".to_string(),
        )),
    }
}

async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        schema_version: state.service.schema().version().to_string(),
        feature_count: state.service.schema().len(),
        class_count: state.service.class_labels().len(),
    })
}

async fn predict(
    state: web::Data<AppState>,
    record: web::Json<RawRecord>,
) -> Result<HttpResponse, ServiceError> {
    let service = state.service.clone();
    let record = record.into_inner();
    let label = run_blocking(state.inference_timeout, move || service.predict(&record)).await?;
    Ok(HttpResponse::Ok().json(PredictionResponse { prediction: label }))
}

/// Read one named file field out of a multipart payload: (filename, bytes).
async fn read_file_field(
    payload: &mut Multipart,
    field_name: &str,
) -> Result<Option<(String, Vec<u8>)>, ServiceError> {
    let invalid = |e: &dyn std::fmt::Display| {
        ServiceError::Validation(format!("invalid multipart payload: {}", e))
    };
    while let Some(mut field) = payload.try_next().await.map_err(|e| invalid(&e))? {
        if field.name() != field_name {
            while field.try_next().await.map_err(|e| invalid(&e))?.is_some() {}
            continue;
        }
        let filename = field
            .content_disposition()
            .get_filename()
            .unwrap_or("upload")
            .to_string();
        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(|e| invalid(&e))? {
            bytes.extend_from_slice(&chunk);
        }
        return Ok(Some((filename, bytes)));
    }
    Ok(None)
}

/// Collect a whole multipart payload: field name → (filename, bytes).
/// Field order on the wire is client-controlled, so everything is gathered
/// in one pass.
async fn collect_fields(
    payload: &mut Multipart,
) -> Result<std::collections::HashMap<String, (String, Vec<u8>)>, ServiceError> {
    let invalid = |e: &dyn std::fmt::Display| {
        ServiceError::Validation(format!("invalid multipart payload: {}", e))
    };
    let mut fields = std::collections::HashMap::new();
    while let Some(mut field) = payload.try_next().await.map_err(|e| invalid(&e))? {
        let name = field.name().to_string();
        let filename = field
            .content_disposition()
            .get_filename()
            .unwrap_or("upload")
            .to_string();
        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(|e| invalid(&e))? {
            bytes.extend_from_slice(&chunk);
        }
        fields.insert(name, (filename, bytes));
    }
    Ok(fields)
}

async fn predict_file(
    state: web::Data<AppState>,
    mut payload: Multipart,
) -> Result<HttpResponse, ServiceError> {
    let (filename, bytes) = read_file_field(&mut payload, "file")
        .await?
        .ok_or_else(|| ServiceError::Validation("no file uploaded".to_string()))?;

    let lower = filename.to_lowercase();
    if lower.ends_with(".xls") || lower.ends_with(".xlsx") {
        return Err(ServiceError::Validation(
            "spreadsheet uploads are not supported; convert to CSV".to_string(),
        ));
    }
    if !lower.ends_with(".csv") {
        return Err(ServiceError::Validation(
            "unsupported file type; only CSV files are allowed".to_string(),
        ));
    }

    let table = batch::parse_csv(&bytes)?;
    let rows = table.row_count();

    // Per-row inference budget; a 0-row upload still gets one slot.
    let budget = state.inference_timeout * (rows.max(1) as u32);
    let service = state.service.clone();
    let augmented = run_blocking(budget, move || {
        let labels = service.predict_batch(table.records())?;
        batch::write_augmented(&table, &labels)
    })
    .await?;

    let meta = state.artifacts.put(
        &batch::output_filename(&filename),
        "text/csv",
        rows,
        &augmented,
    )?;
    info!(job_id = %meta.job_id, rows, "batch processed");

    Ok(HttpResponse::Ok().json(BatchResponse {
        message: "Successfully processed the file",
        job_id: meta.job_id,
        rows,
    }))
}

fn serve_artifact(state: &AppState, meta: ArtifactMeta) -> Result<HttpResponse, ServiceError> {
    let bytes = state.artifacts.read(&meta)?;
    Ok(HttpResponse::Ok()
        .content_type(meta.content_type.clone())
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", meta.filename),
        ))
        .body(bytes))
}

async fn download_result(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let job_id = path.into_inner();
    let meta = state
        .artifacts
        .get(&job_id)?
        .ok_or(ServiceError::ResultNotFound(job_id))?;
    serve_artifact(&state, meta)
}

async fn download_latest(state: web::Data<AppState>) -> Result<HttpResponse, ServiceError> {
    let meta = state.artifacts.latest()?.ok_or_else(|| {
        ServiceError::ResultNotFound("no batch has been processed yet".to_string())
    })?;
    serve_artifact(&state, meta)
}

async fn verify_signature(
    state: web::Data<AppState>,
    mut payload: Multipart,
) -> Result<HttpResponse, ServiceError> {
    let verifier = state.verifier.clone().ok_or_else(|| {
        ServiceError::Unavailable("signature verification is not configured".to_string())
    })?;

    let mut fields = collect_fields(&mut payload).await?;
    let (filename, image) = fields
        .remove("image")
        .ok_or_else(|| ServiceError::Validation("missing 'image' field".to_string()))?;
    let reference = fields
        .remove("reference")
        .map(|(_, bytes)| String::from_utf8_lossy(&bytes).trim().to_string())
        .filter(|r| !r.is_empty())
        .ok_or_else(|| ServiceError::Validation("missing 'reference' field".to_string()))?;

    let outcome = verifier.verify(image, &filename, &reference).await?;
    Ok(HttpResponse::Ok().json(outcome))
}
