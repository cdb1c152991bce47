//! External model boundary — the hosted multimodal generation API.
//!
//! The rest of the service treats the model as an opaque capability: submit
//! a list of content parts (text and inline image data) with an optional
//! system instruction, get text back, subject to a per-call timeout. The
//! `ModelClient` trait is the seam; production code uses `GeminiClient`,
//! tests use `MockModelClient`.

pub mod client;
pub mod types;

pub use client::{GeminiClient, MockModelClient, ModelClient};
pub use types::{
    Content, GenerateContentRequest, GenerateContentResponse, ModelError, ModelRequest, Part,
};
