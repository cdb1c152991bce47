//! User-message sanitation for the chat channel.
//!
//! Pictographs and decorative symbols in user turns degrade the model's
//! topic matching, so user-authored entries are stripped of a fixed Unicode
//! ruleset before forwarding. Model-authored turns pass through untouched;
//! the handler enforces that split.

/// Code-point ranges removed from user-authored messages (inclusive).
const STRIPPED_RANGES: &[(u32, u32)] = &[
    (0x00A9, 0x00A9),   // copyright sign
    (0x00AE, 0x00AE),   // registered sign
    (0x20A0, 0x20CF),   // currency symbols block
    (0x2600, 0x26FF),   // miscellaneous symbols
    (0x2700, 0x27BF),   // dingbats
    (0xFE00, 0xFE0F),   // variation selectors (emoji presentation)
    (0x1F000, 0x1FAFF), // supplementary-plane pictographs: emoji, transport, symbols
];

/// Strip the fixed ruleset from one user-authored message.
pub fn sanitize_user_text(text: &str) -> String {
    text.chars().filter(|c| !is_stripped(*c)).collect()
}

fn is_stripped(c: char) -> bool {
    let code_point = c as u32;
    STRIPPED_RANGES
        .iter()
        .any(|(lo, hi)| (*lo..=*hi).contains(&code_point))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_emoji() {
        assert_eq!(sanitize_user_text("is my room ok? 😀🏠"), "is my room ok? ");
        assert_eq!(sanitize_user_text("🚀 launch"), " launch");
    }

    #[test]
    fn strips_symbols_and_dingbats() {
        assert_eq!(sanitize_user_text("sunny ☀ day ✂ here"), "sunny  day  here");
    }

    #[test]
    fn strips_currency_and_marks() {
        assert_eq!(sanitize_user_text("price ₿ © brand ®"), "price  brand ");
    }

    #[test]
    fn strips_variation_selectors() {
        // Heavy check mark with emoji presentation selector
        assert_eq!(sanitize_user_text("done \u{2714}\u{FE0F}!"), "done !");
    }

    #[test]
    fn keeps_plain_text_and_accents() {
        let text = "Why is the SE corner damp? Température: 19.5°C";
        assert_eq!(sanitize_user_text(text), text);
    }

    #[test]
    fn keeps_cjk_text() {
        let text = "南東の角はどうですか";
        assert_eq!(sanitize_user_text(text), text);
    }

    #[test]
    fn empty_and_emoji_only_messages() {
        assert_eq!(sanitize_user_text(""), "");
        assert_eq!(sanitize_user_text("🎉🎊✨"), "");
    }
}
