//! Rendering of document outlines.

pub mod json;

pub use json::{to_json, JsonFormat};
