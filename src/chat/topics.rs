//! Fixed topic→link table for the chat channel.
//!
//! The model is only ever allowed to hand out links from this table. The
//! system instruction renders it verbatim and forbids inventing anything
//! outside it; an unknown topic gets an explicit "no link available".

pub struct TopicLink {
    pub topic: &'static str,
    pub url: &'static str,
}

/// The complete set of topics the assistant may link to.
pub const TOPIC_LINKS: &[TopicLink] = &[
    TopicLink {
        topic: "booking a follow-up consultation",
        url: "https://orienta.app/consultation",
    },
    TopicLink {
        topic: "remedies and corrections guide",
        url: "https://orienta.app/guides/remedies",
    },
    TopicLink {
        topic: "understanding zone classifications",
        url: "https://orienta.app/guides/zones",
    },
    TopicLink {
        topic: "how to capture a better scan",
        url: "https://orienta.app/guides/scanning",
    },
    TopicLink {
        topic: "compass calibration help",
        url: "https://orienta.app/support/calibration",
    },
    TopicLink {
        topic: "pricing and plans",
        url: "https://orienta.app/pricing",
    },
];

/// Render the table for the system instruction, one `topic: url` per line.
pub fn knowledge_base() -> String {
    TOPIC_LINKS
        .iter()
        .map(|entry| format!("- {}: {}", entry.topic, entry.url))
        .collect::<Vec<_>>()
        .join("\n")
}
