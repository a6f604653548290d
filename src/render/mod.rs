//! Rendering module for turning analysis reports into text or JSON.

mod json;
mod text;

pub use json::{to_json, JsonFormat};
pub use text::to_text;
