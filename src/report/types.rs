//! Scan submission and report types. All of this is request-scoped; nothing
//! here is ever persisted.

use serde::{Deserialize, Serialize};

use crate::compass::{CuspWarning, Zone};

/// One photograph of the scan plus the compass heading it was taken at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapturedFrame {
    /// Base64-encoded image bytes.
    pub image_data: String,
    /// Image MIME type; phone clients omit it and get JPEG.
    #[serde(default = "default_mime_type")]
    pub mime_type: String,
    /// Compass heading in degrees at capture time.
    pub heading: f64,
    /// Zone the client classified the frame into at capture time. Recomputed
    /// from the heading when absent.
    #[serde(default)]
    pub zone: Option<Zone>,
}

fn default_mime_type() -> String {
    "image/jpeg".to_string()
}

/// A full scan submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanData {
    pub room_label: String,
    /// Angle of the room within the larger structure, in degrees.
    /// Absent or exactly 0.0 means "not set" and skips cusp detection.
    pub location_angle: Option<f64>,
    /// Free-text location tag used when no angle is available.
    pub location_tag: Option<String>,
    pub floor: Option<String>,
    /// Free-text concerns the occupant wants addressed.
    pub concerns: Option<String>,
    /// Free-text description of the building's surroundings.
    pub surroundings: Option<String>,
    /// Frames in capture order.
    pub frames: Vec<CapturedFrame>,
}

/// Report depth selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportMode {
    #[default]
    Standard,
    DeepStructural,
}

/// The assembled document plus per-request metadata.
#[derive(Debug, Clone, Serialize)]
pub struct FinalReport {
    pub report: String,
    pub mode: ReportMode,
    /// Zone of the room's location angle, when one was supplied.
    pub zone: Option<Zone>,
    pub cusp: Option<CuspWarning>,
    /// ISO 8601 generation timestamp.
    pub generated_at: String,
}
