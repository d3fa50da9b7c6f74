//! Custom extractors for Axum handlers.
//!
//! These standardize error handling for path ids and validated JSON bodies
//! so individual handlers never see malformed input.

pub mod id_path;
pub mod validated_json;

pub use id_path::IdPath;
pub use validated_json::ValidatedJson;
