//! Event handling module.
//!
//! This module contains handlers for the two background operations the form
//! performs:
//! - Submit events: validation, network dispatch, and reconciliation
//! - Preview events: background image decoding

pub mod preview;
pub mod submit;

pub use preview::ImagePreviewLoader;
pub use submit::{SubmissionController, SubmissionOutcome};
