//! Report pipeline sequencing.
//!
//! Strictly sequential per request: build context → visual assessment call →
//! positional tagging → elaboration call → stitch. Stage 2 cannot start
//! before stage 1 settles because its prompt embeds stage 1's text. Any
//! stage failure aborts the whole request; a partial report is never
//! returned.

use std::time::Duration;

use crate::compass;
use crate::model::{Content, ModelClient, ModelError, ModelRequest, Part};

use super::prompts::{self, ElaborationContext};
use super::tagging::tag_findings;
use super::types::{FinalReport, ReportMode, ScanData};

/// Stage 1 carries every frame inline; the hosted model gets up to ten
/// minutes before the request is abandoned.
const STAGE1_TIMEOUT: Duration = Duration::from_secs(600);

/// Stage 2 is text-only and settles far sooner.
const STAGE2_TIMEOUT: Duration = Duration::from_secs(180);

/// Substituted when a successful response carries no text.
const MISSING_TEXT_FALLBACK: &str = "[no assessment text was returned]";

/// Placed between the tagged findings and the elaborated document.
const REPORT_SEPARATOR: &str = "\n\n---\n\n";

/// Pipeline failures, collapsed per stage. The caller surfaces these as one
/// generic failure with the upstream message attached.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("visual assessment stage failed: {0}")]
    VisualStage(#[source] ModelError),
    #[error("elaboration stage failed: {0}")]
    ElaborationStage(#[source] ModelError),
}

/// Run the full two-stage pipeline for one scan.
pub async fn generate_report(
    client: &dyn ModelClient,
    scan: &ScanData,
    mode: ReportMode,
) -> Result<FinalReport, ReportError> {
    let cusp = compass::detect_cusp(scan.location_angle);
    let zone = scan
        .location_angle
        .filter(|a| a.is_finite() && *a != 0.0)
        .map(compass::classify_zone);

    tracing::info!(
        room = %scan.room_label,
        frames = scan.frames.len(),
        ?mode,
        ?zone,
        cusp = cusp.is_some(),
        "report pipeline starting"
    );

    // Stage 1 — visual assessment over all frames
    let start = std::time::Instant::now();
    let stage1_request = ModelRequest {
        contents: vec![Content::user(stage1_parts(scan, mode))],
        system_instruction: None,
        timeout: STAGE1_TIMEOUT,
    };
    let stage1_text = client
        .generate(stage1_request)
        .await
        .map_err(ReportError::VisualStage)?
        .unwrap_or_else(|| MISSING_TEXT_FALLBACK.to_string());
    tracing::info!(
        elapsed_ms = %start.elapsed().as_millis(),
        chars = stage1_text.len(),
        "visual assessment complete"
    );

    let tagged = tag_findings(&stage1_text);

    // Stage 2 — text-only elaboration over the tagged findings
    let start = std::time::Instant::now();
    let context = ElaborationContext {
        scan,
        mode,
        tagged_findings: &tagged,
        cusp,
    };
    let stage2_request = ModelRequest {
        contents: vec![Content::user(vec![Part::text(prompts::elaboration_prompt(
            &context,
        ))])],
        system_instruction: None,
        timeout: STAGE2_TIMEOUT,
    };
    let stage2_text = client
        .generate(stage2_request)
        .await
        .map_err(ReportError::ElaborationStage)?
        .unwrap_or_else(|| MISSING_TEXT_FALLBACK.to_string());
    tracing::info!(
        elapsed_ms = %start.elapsed().as_millis(),
        chars = stage2_text.len(),
        "elaboration complete"
    );

    Ok(FinalReport {
        report: format!("{tagged}{REPORT_SEPARATOR}{stage2_text}"),
        mode,
        zone,
        cusp,
        generated_at: chrono::Utc::now().to_rfc3339(),
    })
}

/// Stage-1 content parts: the instruction, then one caption + image pair
/// per frame in capture order. An empty scan still produces a placeholder
/// part so the visual pass executes.
fn stage1_parts(scan: &ScanData, mode: ReportMode) -> Vec<Part> {
    let mut parts = vec![Part::text(prompts::visual_assessment_prompt(scan, mode))];

    if scan.frames.is_empty() {
        parts.push(Part::text(prompts::NO_VISUAL_DATA));
        return parts;
    }

    for (index, frame) in scan.frames.iter().enumerate() {
        let zone = frame
            .zone
            .unwrap_or_else(|| compass::classify_zone(frame.heading));
        parts.push(Part::text(prompts::frame_caption(
            index,
            frame.heading,
            zone,
        )));
        parts.push(Part::inline_image(&frame.mime_type, &frame.image_data));
    }

    parts
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
