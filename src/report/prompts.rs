//! Model-facing instruction text for both pipeline stages.
//!
//! Pure builders — nothing here touches the network or mutates shared
//! state. Missing free-text fields interpolate "N/A" instead of erroring;
//! the model is told to work with what it gets.

use crate::compass::CuspWarning;

use super::types::{ReportMode, ScanData};
use super::SLOT_ZONES;

/// Interpolated wherever a scan field was left blank.
const MISSING_FIELD: &str = "N/A";

/// Fixed section sequence for the elaboration document.
pub const SECTION_TITLES: [&str; 5] = [
    "Summary",
    "Technical Findings",
    "Priority Recommendations",
    "Secondary Recommendations",
    "General Tips",
];

/// Title of the conditional section appended when the reading is ambiguous.
pub const CUSP_SECTION_TITLE: &str = "Boundary Ambiguity";

fn field(value: &Option<String>) -> &str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(MISSING_FIELD)
}

fn label_or_na(label: &str) -> &str {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        MISSING_FIELD
    } else {
        trimmed
    }
}

// ──────────────────────────────────────────────
// Stage 1 — visual assessment
// ──────────────────────────────────────────────

/// Instruction for the visual pass: examine the ordered segments and answer
/// as a numbered list of exactly 8 items, one per canonical slot zone.
///
/// The numbering contract is load-bearing: the tagging step rewrites item
/// `k` into `[IMAGE_k_ANALYSIS]`, so item `k` must describe the `k`-th zone
/// of [`SLOT_ZONES`] regardless of the order the frames were captured in.
pub fn visual_assessment_prompt(scan: &ScanData, mode: ReportMode) -> String {
    let slot_list = SLOT_ZONES
        .iter()
        .enumerate()
        .map(|(i, zone)| format!("{}. {} ({})", i + 1, zone.long_name(), zone))
        .collect::<Vec<_>>()
        .join("\n");

    let depth = match mode {
        ReportMode::Standard => {
            "Assess the general condition of each direction: layout, light, \
             clutter, surface wear, and anything that looks out of place."
        }
        ReportMode::DeepStructural => {
            "Perform a deep structural assessment of each direction: look for \
             cracks, damp, subsidence signs, misaligned frames, ceiling \
             deflection, and compromised load paths."
        }
    };

    format!(
        "You are a building assessor reviewing a directional scan of a single \
         room. Each image that follows is captioned with the compass heading \
         and zone it was captured in.\n\n\
         Room: {room}\n\
         Floor: {floor}\n\n\
         {depth}\n\n\
         Respond with a numbered list of EXACTLY 8 items, one per direction, \
         in this fixed order even if a direction has no matching image:\n\
         {slot_list}\n\n\
         Each item must start with the number and a period (for example \
         \"3.\"), then give a short description of what is visible in that \
         direction followed by 1-2 identified defects. If no image covers a \
         direction, say so in that item and move on. Do not add headings, \
         preamble, or any text outside the 8 numbered items.",
        room = label_or_na(&scan.room_label),
        floor = field(&scan.floor),
    )
}

/// Caption text placed directly before each inline image part.
pub fn frame_caption(index: usize, heading: f64, zone: crate::compass::Zone) -> String {
    format!(
        "Segment {n} — captured facing {heading:.1}° ({zone})",
        n = index + 1
    )
}

/// Stands in for the image parts when a scan carries no frames, so the
/// visual pass still executes and reports every slot as uncovered.
pub const NO_VISUAL_DATA: &str =
    "No visual data was captured for this scan. Report every direction as not covered.";

// ──────────────────────────────────────────────
// Stage 2 — elaboration
// ──────────────────────────────────────────────

/// Everything the elaboration builder needs. The orchestrator assembles one
/// of these per request so the builder itself stays a pure function.
pub struct ElaborationContext<'a> {
    pub scan: &'a ScanData,
    pub mode: ReportMode,
    /// Stage-1 output after positional tagging.
    pub tagged_findings: &'a str,
    pub cusp: Option<CuspWarning>,
}

/// Boundary-ambiguity notice. Injected ahead of all other context so the
/// model treats it as the first thing to address.
pub fn cusp_notice(cusp: &CuspWarning) -> String {
    format!(
        "IMPORTANT — address this before anything else: the room's location \
         reading sits within sensor error of a zone boundary. It was \
         classified as {zone} ({zone_long}) but may belong to {alt} \
         ({alt_long}). The report must disclose this ambiguity instead of \
         presenting {zone} as certain, and must close with a section titled \
         \"{section}: {zone} / {alt}\" explaining what changes if the room \
         is actually in {alt}.",
        zone = cusp.zone,
        zone_long = cusp.zone.long_name(),
        alt = cusp.alternate,
        alt_long = cusp.alternate.long_name(),
        section = CUSP_SECTION_TITLE,
    )
}

/// Instruction for the elaboration pass: expand the tagged findings into a
/// structured document with a fixed sequence of titled sections.
pub fn elaboration_prompt(ctx: &ElaborationContext<'_>) -> String {
    let mut prompt = String::new();

    if let Some(cusp) = &ctx.cusp {
        prompt.push_str(&cusp_notice(cusp));
        prompt.push_str("\n\n");
    }

    let depth = match ctx.mode {
        ReportMode::Standard => "a practical room assessment",
        ReportMode::DeepStructural => "a detailed structural condition report",
    };

    let mut sections = SECTION_TITLES
        .iter()
        .enumerate()
        .map(|(i, title)| format!("{}. {title}", i + 1))
        .collect::<Vec<_>>();
    if let Some(cusp) = &ctx.cusp {
        sections.push(format!(
            "{}. {CUSP_SECTION_TITLE}: {} / {}",
            sections.len() + 1,
            cusp.zone,
            cusp.alternate
        ));
    }

    let scan = ctx.scan;
    prompt.push_str(&format!(
        "You are writing {depth} based on the directional findings below. \
         Produce one document organized into exactly these titled sections, \
         in order:\n{sections}\n\n\
         Ground every statement in the findings; do not invent defects that \
         are not there. Keep the positional markers like [IMAGE_1_ANALYSIS] \
         out of your prose.\n\n\
         Room: {room}\n\
         Location within structure: {location}\n\
         Floor: {floor}\n\
         Occupant concerns: {concerns}\n\
         Surroundings: {surroundings}\n\n\
         Directional findings:\n{findings}",
        sections = sections.join("\n"),
        room = label_or_na(&scan.room_label),
        location = location_line(scan),
        floor = field(&scan.floor),
        concerns = field(&scan.concerns),
        surroundings = field(&scan.surroundings),
        findings = ctx.tagged_findings,
    ));

    prompt
}

/// The room's placement: degrees when an angle was supplied, the free-text
/// tag otherwise, "N/A" when neither.
fn location_line(scan: &ScanData) -> String {
    match scan.location_angle.filter(|a| a.is_finite() && *a != 0.0) {
        Some(angle) => format!(
            "{angle:.1}° ({})",
            crate::compass::classify_zone(angle)
        ),
        None => field(&scan.location_tag).to_string(),
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compass::Zone;

    fn scan() -> ScanData {
        ScanData {
            room_label: "Master bedroom".into(),
            location_angle: Some(50.0),
            location_tag: None,
            floor: Some("2".into()),
            concerns: Some("Damp smell near the window".into()),
            surroundings: Some("Detached house, tree line to the west".into()),
            frames: Vec::new(),
        }
    }

    // ── visual assessment prompt ──

    #[test]
    fn visual_prompt_lists_slots_in_canonical_order() {
        let prompt = visual_assessment_prompt(&scan(), ReportMode::Standard);
        let positions: Vec<usize> = SLOT_ZONES
            .iter()
            .enumerate()
            .map(|(i, zone)| {
                let line = format!("{}. {} ({})", i + 1, zone.long_name(), zone);
                prompt.find(&line).unwrap_or_else(|| panic!("missing: {line}"))
            })
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn visual_prompt_requires_exactly_eight_items() {
        let prompt = visual_assessment_prompt(&scan(), ReportMode::Standard);
        assert!(prompt.contains("EXACTLY 8 items"));
        assert!(prompt.contains("Master bedroom"));
    }

    #[test]
    fn visual_prompt_depth_follows_mode() {
        let standard = visual_assessment_prompt(&scan(), ReportMode::Standard);
        let deep = visual_assessment_prompt(&scan(), ReportMode::DeepStructural);
        assert_ne!(standard, deep);
        assert!(deep.contains("structural"));
        assert!(deep.contains("load paths"));
    }

    #[test]
    fn missing_fields_become_na() {
        let prompt = visual_assessment_prompt(&ScanData::default(), ReportMode::Standard);
        assert!(prompt.contains("Room: N/A"));
        assert!(prompt.contains("Floor: N/A"));
    }

    #[test]
    fn frame_caption_names_heading_and_zone() {
        let caption = frame_caption(0, 123.456, Zone::ESE);
        assert_eq!(caption, "Segment 1 — captured facing 123.5° (ESE)");
    }

    // ── elaboration prompt ──

    fn context<'a>(scan: &'a ScanData, tagged: &'a str) -> ElaborationContext<'a> {
        ElaborationContext {
            scan,
            mode: ReportMode::Standard,
            tagged_findings: tagged,
            cusp: crate::compass::detect_cusp(scan.location_angle),
        }
    }

    #[test]
    fn cusp_notice_comes_before_all_other_context() {
        let scan = scan();
        let prompt = elaboration_prompt(&context(&scan, "[IMAGE_1_ANALYSIS] fine"));
        let notice_at = prompt.find("IMPORTANT — address this").expect("notice");
        let room_at = prompt.find("Master bedroom").expect("room");
        let findings_at = prompt.find("[IMAGE_1_ANALYSIS]").expect("findings");
        assert!(notice_at < room_at);
        assert!(notice_at < findings_at);
        assert_eq!(notice_at, 0);
    }

    #[test]
    fn cusp_section_heading_names_both_zones() {
        let scan = scan(); // 50.0° → NE with ENE alternate
        let prompt = elaboration_prompt(&context(&scan, "findings"));
        assert!(prompt.contains("Boundary Ambiguity: NE / ENE"));
    }

    #[test]
    fn no_cusp_means_no_conditional_section() {
        let mut scan = scan();
        scan.location_angle = Some(45.0); // interior of NE
        let prompt = elaboration_prompt(&context(&scan, "findings"));
        assert!(!prompt.contains(CUSP_SECTION_TITLE));
        assert!(!prompt.contains("IMPORTANT — address this"));
    }

    #[test]
    fn section_titles_appear_in_order() {
        let scan = scan();
        let prompt = elaboration_prompt(&context(&scan, "findings"));
        let positions: Vec<usize> = SECTION_TITLES
            .iter()
            .map(|t| prompt.find(t).unwrap_or_else(|| panic!("missing: {t}")))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn tagged_findings_are_embedded_verbatim() {
        let scan = scan();
        let tagged = "[IMAGE_3_ANALYSIS] East wall: hairline crack above lintel.";
        let prompt = elaboration_prompt(&context(&scan, tagged));
        assert!(prompt.contains(tagged));
    }

    #[test]
    fn location_line_prefers_angle_over_tag() {
        let mut scan = scan();
        scan.location_tag = Some("rear left".into());
        let prompt = elaboration_prompt(&context(&scan, ""));
        assert!(prompt.contains("50.0° (NE)"));

        scan.location_angle = None;
        let prompt = elaboration_prompt(&context(&scan, ""));
        assert!(prompt.contains("Location within structure: rear left"));
    }

    #[test]
    fn empty_scan_interpolates_na_everywhere() {
        let scan = ScanData::default();
        let prompt = elaboration_prompt(&ElaborationContext {
            scan: &scan,
            mode: ReportMode::Standard,
            tagged_findings: "",
            cusp: None,
        });
        assert!(prompt.contains("Location within structure: N/A"));
        assert!(prompt.contains("Occupant concerns: N/A"));
        assert!(prompt.contains("Surroundings: N/A"));
    }
}
