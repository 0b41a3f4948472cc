//! Error handling for codec operations
//!
//! This module re-exports the error types used throughout the crate. The
//! variants themselves live in [`crate::common`] next to the types they
//! describe; `thiserror` provides the `Display`/`Error` plumbing.

pub use crate::common::LztError;
pub use crate::common::Result;
