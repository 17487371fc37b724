//! Custom extractors for Axum handlers.
//!
//! Both extractors reject with [`crate::AppError`], so failures render as the
//! standard JSON error body instead of axum's plain-text rejections.

pub mod id_path;
pub mod validated_json;

pub use id_path::IdPath;
pub use validated_json::ValidatedJson;
