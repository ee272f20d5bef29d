//! Error Types
//!
//! This module defines the error types used throughout the runtime.
//!
//! # Overview
//!
//! The main error type [`ManikinError`] covers the failure modes of the
//! construction path:
//! - Malformed hierarchy ordering and out-of-range indices
//! - Vertex layout problems during mesh consolidation
//!
//! Per-frame evaluation never returns errors: armature evaluation, skin
//! palette updates and batch ordering resolve bad inputs to documented
//! fallback values instead of destabilizing a running frame loop.
//!
//! # Usage
//!
//! All fallible public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, ManikinError>`.

use thiserror::Error;

/// The main error type for the runtime.
///
/// Every variant is a construction-time failure; once templates are
/// built, evaluation is total.
#[derive(Error, Debug)]
pub enum ManikinError {
    /// An out-of-range index, a malformed hierarchy ordering, or a
    /// channel length mismatch detected at template build time.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A vertex layout signature with no supported attributes, or a
    /// primitive referencing a joint outside the valid range.
    #[error("Unsupported layout: {0}")]
    UnsupportedLayout(String),
}

/// Alias for `Result<T, ManikinError>`.
pub type Result<T> = std::result::Result<T, ManikinError>;
