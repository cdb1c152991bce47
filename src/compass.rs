//! Compass zone classification and cusp detection.
//!
//! A heading is classified into one of 16 fixed 22.5°-wide zones. Heading
//! sensors drift by several degrees in practice, so a reading close to a
//! zone boundary is flagged as a cusp: the downstream report must disclose
//! the neighboring zone instead of presenting a single zone as certain.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Width of one zone arc in degrees.
const ZONE_ARC_DEG: f64 = 22.5;

/// Half an arc. Added before flooring so boundaries fall between zone
/// centers, keeping N centered on 0°.
const HALF_ARC_DEG: f64 = 11.25;

/// Assumed sensor pointing error when probing for boundary ambiguity.
const CUSP_PROBE_DEG: f64 = 10.0;

// ──────────────────────────────────────────────
// Zone
// ──────────────────────────────────────────────

/// One of the 16 fixed directional zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum Zone {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

/// Zone table in compass order starting at north.
/// Index = floor((heading + 11.25°) / 22.5°) mod 16.
pub const ZONES: [Zone; 16] = [
    Zone::N,
    Zone::NNE,
    Zone::NE,
    Zone::ENE,
    Zone::E,
    Zone::ESE,
    Zone::SE,
    Zone::SSE,
    Zone::S,
    Zone::SSW,
    Zone::SW,
    Zone::WSW,
    Zone::W,
    Zone::WNW,
    Zone::NW,
    Zone::NNW,
];

impl Zone {
    /// Short compass token, as serialized on the wire.
    pub fn abbrev(&self) -> &'static str {
        match self {
            Self::N => "N",
            Self::NNE => "NNE",
            Self::NE => "NE",
            Self::ENE => "ENE",
            Self::E => "E",
            Self::ESE => "ESE",
            Self::SE => "SE",
            Self::SSE => "SSE",
            Self::S => "S",
            Self::SSW => "SSW",
            Self::SW => "SW",
            Self::WSW => "WSW",
            Self::W => "W",
            Self::WNW => "WNW",
            Self::NW => "NW",
            Self::NNW => "NNW",
        }
    }

    /// Long-form name used in prompt text.
    pub fn long_name(&self) -> &'static str {
        match self {
            Self::N => "north",
            Self::NNE => "north-northeast",
            Self::NE => "northeast",
            Self::ENE => "east-northeast",
            Self::E => "east",
            Self::ESE => "east-southeast",
            Self::SE => "southeast",
            Self::SSE => "south-southeast",
            Self::S => "south",
            Self::SSW => "south-southwest",
            Self::SW => "southwest",
            Self::WSW => "west-southwest",
            Self::W => "west",
            Self::WNW => "west-northwest",
            Self::NW => "northwest",
            Self::NNW => "north-northwest",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbrev())
    }
}

// ──────────────────────────────────────────────
// Classification
// ──────────────────────────────────────────────

/// Classify a heading in degrees into its zone.
///
/// The input is normalized into [0, 360) first, so negative headings and
/// values past a full turn are valid. Each zone is a contiguous half-open
/// arc of exactly 22.5°: N covers [348.75°, 360°) ∪ [0°, 11.25°).
pub fn classify_zone(degrees: f64) -> Zone {
    let normalized = degrees.rem_euclid(360.0);
    let index = ((normalized + HALF_ARC_DEG) / ZONE_ARC_DEG).floor() as usize % ZONES.len();
    ZONES[index]
}

// ──────────────────────────────────────────────
// Cusp detection
// ──────────────────────────────────────────────

/// Boundary-ambiguity warning: the primary zone plus the neighbor a small
/// heading perturbation would land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuspWarning {
    pub zone: Zone,
    pub alternate: Zone,
}

/// Decide whether a location angle sits close enough to a zone boundary
/// that sensor error could relabel the room.
///
/// The angle is classified as-is and perturbed by ±10°; if either perturbed
/// classification differs from the primary one, the reading is ambiguous.
/// When both differ, the +10° neighbor is reported.
///
/// An absent, non-finite, or exactly-zero angle means "not set" and skips
/// detection entirely.
pub fn detect_cusp(location_angle: Option<f64>) -> Option<CuspWarning> {
    let angle = location_angle.filter(|a| a.is_finite() && *a != 0.0)?;

    let zone = classify_zone(angle);
    let plus = classify_zone(angle + CUSP_PROBE_DEG);
    let minus = classify_zone((angle - CUSP_PROBE_DEG).rem_euclid(360.0));

    if plus != zone {
        Some(CuspWarning {
            zone,
            alternate: plus,
        })
    } else if minus != zone {
        Some(CuspWarning {
            zone,
            alternate: minus,
        })
    } else {
        None
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
