//! Positional tagging of the visual assessment's numbered findings.
//!
//! Stage 1 is instructed to answer as a numbered list, one item per
//! canonical slot zone. This pass rewrites each `k.` line label into a
//! fixed `[IMAGE_k_ANALYSIS]` marker so later formatting can address
//! findings by position no matter how the surrounding prose shifts.
//!
//! The pass assumes the items appear in increasing numeric order with no
//! gaps. A slot the model omitted simply produces no marker; nothing here
//! ever errors. Running the pass twice is a no-op.

use super::SLOT_ZONES;

/// Marker substituted for slot `k`'s numeric label.
pub fn slot_marker(slot: usize) -> String {
    format!("[IMAGE_{slot}_ANALYSIS]")
}

/// Rewrite numbered findings into positional markers, then strip any
/// leading `digits.` labels the model left on other lines.
pub fn tag_findings(raw: &str) -> String {
    let mut text = raw.to_string();
    for slot in 1..=SLOT_ZONES.len() {
        text = tag_slot(&text, slot);
    }
    strip_residual_labels(&text)
}

/// Replace the first line starting with `{slot}.` with the slot marker
/// followed by the line's remaining content.
fn tag_slot(text: &str, slot: usize) -> String {
    let label = format!("{slot}.");
    let mut replaced = false;
    let lines: Vec<String> = text
        .lines()
        .map(|line| {
            if replaced {
                return line.to_string();
            }
            match line.trim_start().strip_prefix(&label) {
                Some(rest) => {
                    replaced = true;
                    format!("{} {}", slot_marker(slot), rest.trim_start())
                }
                None => line.to_string(),
            }
        })
        .collect();
    lines.join("\n")
}

/// Cleanup for model non-compliance: any line still carrying a leading
/// `digits.` label (out-of-order, duplicated, or beyond slot 8) keeps its
/// content but loses the label.
fn strip_residual_labels(text: &str) -> String {
    text.lines()
        .map(|line| match split_leading_label(line) {
            Some(rest) => rest,
            None => line,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Content after a leading `digits.` label, or `None` when the line does
/// not start with one.
fn split_leading_label(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let digits = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let rest = trimmed[digits..].strip_prefix('.')?;
    Some(rest.trim_start())
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
