pub mod api; // HTTP surface: report, chat, health
pub mod chat; // follow-up Q&A over a prior report
pub mod compass; // zone classification + cusp detection
pub mod config;
pub mod model; // hosted multimodal model boundary
pub mod report; // two-stage report pipeline
