//! Report endpoint.

use axum::extract::State;
use axum::Json;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::compass::{CuspWarning, Zone};
use crate::report::{self, ReportMode, ScanData};

#[derive(Deserialize)]
pub struct ReportRequest {
    /// Depth selector; defaults to the standard assessment.
    #[serde(default)]
    pub mode: ReportMode,
    pub scan: ScanData,
}

#[derive(Serialize)]
pub struct ReportResponse {
    pub request_id: String,
    pub generated_at: String,
    pub mode: ReportMode,
    pub zone: Option<Zone>,
    pub cusp: Option<CuspWarning>,
    pub report: String,
}

/// `POST /api/report` — run the two-stage pipeline for one scan.
///
/// Fails as a whole: any stage failure returns a single error response and
/// no partial document.
pub async fn generate(
    State(ctx): State<ApiContext>,
    Json(req): Json<ReportRequest>,
) -> Result<Json<ReportResponse>, ApiError> {
    let model = ctx.model()?;
    validate_frames(&req.scan)?;

    let request_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(
        %request_id,
        room = %req.scan.room_label,
        frames = req.scan.frames.len(),
        "report requested"
    );

    let report = report::generate_report(model, &req.scan, req.mode).await?;

    Ok(Json(ReportResponse {
        request_id,
        generated_at: report.generated_at,
        mode: report.mode,
        zone: report.zone,
        cusp: report.cusp,
        report: report.report,
    }))
}

/// Reject frames whose image payload is not valid base64 before anything
/// goes on the wire; the hosted API would reject them mid-pipeline with a
/// far less useful error.
fn validate_frames(scan: &ScanData) -> Result<(), ApiError> {
    for (index, frame) in scan.frames.iter().enumerate() {
        if base64::engine::general_purpose::STANDARD
            .decode(&frame.image_data)
            .is_err()
        {
            return Err(ApiError::BadRequest(format!(
                "frame {} image data is not valid base64",
                index + 1
            )));
        }
    }
    Ok(())
}
