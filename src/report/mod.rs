//! Two-stage report pipeline: visual assessment over the captured frames,
//! positional tagging of its numbered findings, then a text-only elaboration
//! pass that expands them into a structured document.

pub mod orchestrator;
pub mod prompts;
pub mod tagging;
pub mod types;

pub use orchestrator::{generate_report, ReportError};
pub use types::{CapturedFrame, FinalReport, ReportMode, ScanData};

use crate::compass::Zone;

/// Canonical slot order for the visual assessment: the 8 principal zones,
/// clockwise from north. The stage-1 prompt numbers its findings in this
/// order and the tagging step rewrites those numbers into positional
/// markers, so both sides must read from this one constant.
pub const SLOT_ZONES: [Zone; 8] = [
    Zone::N,
    Zone::NE,
    Zone::E,
    Zone::SE,
    Zone::S,
    Zone::SW,
    Zone::W,
    Zone::NW,
];
