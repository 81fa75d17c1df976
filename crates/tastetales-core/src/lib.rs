//! # tastetales-core
//!
//! Core types, traits, and abstractions for the tastetales recipe service.
//!
//! This crate provides the foundational data structures and trait definitions
//! that the other tastetales crates depend on.

pub mod error;
pub mod file_safety;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use file_safety::{is_allowed_image, sanitize_filename, ALLOWED_IMAGE_EXTENSIONS};
pub use models::*;
pub use traits::*;
