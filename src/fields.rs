//! Field descriptors for the presentation collaborator.
//!
//! The renderer receives, per field, everything it needs to draw an input:
//! name, input kind, label, current value, a validity-derived style class,
//! and the current error message. It renders these without participating in
//! validation or submission.

use crate::state::{Field, FormState};

/// How a field should be rendered.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Password,
    File,
}

/// Everything the renderer needs for one field.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub field: Field,
    pub name: &'static str,
    pub kind: InputKind,
    pub label: &'static str,
    pub value: String,
    /// `is-invalid` when the field has an error, `is-valid` when it holds a
    /// non-empty clean value, empty otherwise.
    pub class: &'static str,
    pub error: Option<String>,
}

/// Label shown on the submit control.
pub const SUBMIT_LABEL: &str = "Sign Up";

fn input_kind(field: Field) -> InputKind {
    match field {
        Field::Username | Field::DisplayName => InputKind::Text,
        Field::Password | Field::ConfirmPassword => InputKind::Password,
        Field::ProfilePictureRef => InputKind::File,
    }
}

fn display_label(field: Field) -> &'static str {
    match field {
        Field::Username => "Username",
        Field::Password => "Password",
        Field::ConfirmPassword => "Confirm Password",
        Field::DisplayName => "Display Name",
        Field::ProfilePictureRef => "Profile Picture",
    }
}

/// Build the descriptor bundle for every field in form order.
///
pub fn descriptors(state: &FormState) -> Vec<FieldDescriptor> {
    Field::ALL
        .into_iter()
        .map(|field| {
            let value = state.data().get(field).to_string();
            let error = state.errors().get(field.name()).cloned();
            let class = if error.is_some() {
                "is-invalid"
            } else if !value.is_empty() {
                "is-valid"
            } else {
                ""
            };
            FieldDescriptor {
                field,
                name: field.name(),
                kind: input_kind(field),
                label: display_label(field),
                value,
                class,
                error,
            }
        })
        .collect()
}
