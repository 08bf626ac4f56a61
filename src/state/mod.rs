//! Form state management module.
//!
//! This module contains the core state for the registration form, including:
//! - `FormState`, the single owner of form data, errors, and the preview
//! - The tagged `Action` reducer input
//! - Form data types (`Field`, `FormData`, `Preview`, `ErrorMap`)
//! - State error handling

mod error;
mod form;
mod store;

pub use error::StateError;
pub use form::{ErrorMap, Field, FormData, Preview};
pub use store::{Action, FormState};
