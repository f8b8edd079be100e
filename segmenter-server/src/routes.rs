//! API routes for the segmentation dashboard.
//!
//! Analyze and export endpoints all take the same multipart form
//! (`file` = CSV bytes, `k` = cluster count) and re-run the pipeline
//! from scratch, mirroring the per-interaction re-execution model of
//! the dashboard.

use axum::{
    extract::{DefaultBodyLimit, Multipart},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{error, info};

use segmenter_pipeline::export::{
    to_csv_bytes, to_xlsx_bytes, CSV_EXPORT_FILENAME, XLSX_EXPORT_FILENAME,
};
use segmenter_pipeline::pipelines::segmentation::{SegmentationPipeline, DEFAULT_K};
use segmenter_pipeline::sales_loader::load_sales;
use segmenter_pipeline::types::AnalysisReport;
use segmenter_pipeline::PipelineError;

const INDEX_HTML: &str = include_str!("assets/index.html");

/// Uploads above this size are rejected outright.
const UPLOAD_LIMIT_BYTES: usize = 20 * 1024 * 1024;

pub fn router() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/analyze", post(analyze))
        .route("/api/export/csv", post(export_csv))
        .route("/api/export/xlsx", post(export_xlsx))
        .layer(DefaultBodyLimit::max(UPLOAD_LIMIT_BYTES))
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn analyze(multipart: Multipart) -> Result<Json<AnalysisReport>, (StatusCode, String)> {
    let report = run_analysis(multipart).await?;
    Ok(Json(report))
}

async fn export_csv(multipart: Multipart) -> Result<Response, (StatusCode, String)> {
    let report = run_analysis(multipart).await?;
    let bytes = to_csv_bytes(&report.products).map_err(reject)?;
    Ok(attachment(bytes, CSV_EXPORT_FILENAME, "text/csv"))
}

async fn export_xlsx(multipart: Multipart) -> Result<Response, (StatusCode, String)> {
    let report = run_analysis(multipart).await?;
    let bytes = to_xlsx_bytes(&report.products).map_err(reject)?;
    Ok(attachment(
        bytes,
        XLSX_EXPORT_FILENAME,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ))
}

/// Shared analyze/export body: read the form, run the pipeline.
async fn run_analysis(mut multipart: Multipart) -> Result<AnalysisReport, (StatusCode, String)> {
    let mut file: Option<Vec<u8>> = None;
    let mut k = DEFAULT_K;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("Malformed upload: {}", e),
        )
    })? {
        match field.name() {
            Some("file") => {
                let bytes = field.bytes().await.map_err(|e| {
                    (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        format!("Failed to read uploaded file: {}", e),
                    )
                })?;
                file = Some(bytes.to_vec());
            }
            Some("k") => {
                let text = field.text().await.map_err(|e| {
                    (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        format!("Failed to read cluster count: {}", e),
                    )
                })?;
                k = parse_k(&text).map_err(|msg| (StatusCode::UNPROCESSABLE_ENTITY, msg))?;
            }
            _ => {}
        }
    }

    let file = file.ok_or((
        StatusCode::UNPROCESSABLE_ENTITY,
        "No CSV file in the upload; expected a 'file' form field".to_string(),
    ))?;

    info!("Analysis request: {} upload bytes, k={}", file.len(), k);

    let rows = load_sales(file.as_slice()).map_err(reject)?;
    let pipeline = SegmentationPipeline::new(k).map_err(reject)?;
    let report = pipeline.run(rows).map_err(reject)?;

    info!(
        "Analysis done: {} products in {} clusters ({} ms)",
        report.products.len(),
        report.cluster_count,
        report.pipeline_ms
    );
    Ok(report)
}

fn parse_k(text: &str) -> Result<usize, String> {
    text.trim()
        .parse::<usize>()
        .map_err(|_| format!("Cluster count must be a whole number, got '{}'", text.trim()))
}

fn reject(err: PipelineError) -> (StatusCode, String) {
    error!("Analysis rejected: {}", err);
    (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
}

fn attachment(bytes: Vec<u8>, filename: &str, content_type: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_k_accepts_slider_values() {
        assert_eq!(parse_k("4"), Ok(4));
        assert_eq!(parse_k(" 10 "), Ok(10));
    }

    #[test]
    fn parse_k_rejects_junk() {
        assert!(parse_k("four").is_err());
        assert!(parse_k("-2").is_err());
        assert!(parse_k("2.5").is_err());
    }
}
