//! Form state error types.

/// Errors that can occur while updating form state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// A change event referenced a field the form does not have
    #[error("Unknown form field: {0}")]
    UnknownField(String),
}
