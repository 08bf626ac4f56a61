//! Form state and its reducer.
//!
//! All form data, the error map, and the preview are owned here and change
//! only through [`FormState::apply`], so the submit and preview state
//! machines are testable without any rendering harness. Both background
//! operations (image decode, network submission) are tagged with a
//! monotonically increasing generation; a completion whose tag no longer
//! matches the current generation is stale and is dropped, giving
//! last-requested-wins semantics across resets and re-selections.

use log::*;
use std::str::FromStr;
use std::sync::Arc;

use crate::directory::UserDirectory;
use crate::validate::{validate_all, validate_field};

use super::error::StateError;
use super::form::{ErrorMap, Field, FormData, Preview};

/// Tagged state transition applied by the reducer.
///
#[derive(Clone, Debug)]
pub enum Action {
    /// A field received new input; store it raw and revalidate that field.
    FieldChanged { field: Field, value: String },
    /// Revalidate every field against the current snapshot.
    ValidateAll,
    /// A submission passed validation and is about to be dispatched.
    SubmitStarted,
    /// The backend accepted the submission.
    SubmitSucceeded { generation: u64 },
    /// The submission concluded without acceptance. `errors` carries the
    /// server's per-field map when the backend rejected the payload, and is
    /// `None` for transport failures, which leave the error map untouched.
    SubmitFailed {
        generation: u64,
        errors: Option<ErrorMap>,
    },
    /// A new file was selected; supersede any decode still running.
    PreviewRequested,
    /// A background decode finished.
    PreviewLoaded { generation: u64, preview: Preview },
    /// The file selection was cleared.
    PreviewCleared,
    /// The registration modal was opened.
    ModalOpened,
    /// The registration modal was dismissed; equivalent to a reset.
    ModalClosed,
    /// Restore default empty values, clear errors, revert the preview.
    Reset,
}

/// Houses all data owned by the registration form.
///
pub struct FormState {
    data: FormData,
    errors: ErrorMap,
    preview: Preview,
    modal_open: bool,
    in_flight: bool,
    preview_generation: u64,
    submit_generation: u64,
    directory: Arc<dyn UserDirectory>,
}

impl FormState {
    /// Return a new default state consulting the given username directory.
    ///
    pub fn new(directory: Arc<dyn UserDirectory>) -> FormState {
        FormState {
            data: FormData::default(),
            errors: ErrorMap::new(),
            preview: Preview::Placeholder,
            modal_open: false,
            in_flight: false,
            preview_generation: 0,
            submit_generation: 0,
            directory,
        }
    }

    /// Apply one action, producing the next state in place.
    ///
    pub fn apply(&mut self, action: Action) {
        debug!("Applying form action '{:?}'...", action);
        match action {
            Action::FieldChanged { field, value } => {
                self.data.set(field, value);
                // Revalidate against the latest values of all fields so
                // cross-field rules stay correct even when the other field
                // changed most recently.
                let error =
                    validate_field(field, self.data.get(field), &self.data, &*self.directory);
                match error {
                    Some(message) => {
                        self.errors.insert(field.name().to_string(), message);
                    }
                    None => {
                        self.errors.remove(field.name());
                    }
                }
            }
            Action::ValidateAll => {
                self.errors = validate_all(&self.data, &*self.directory);
            }
            Action::SubmitStarted => {
                self.submit_generation += 1;
                self.in_flight = true;
            }
            Action::SubmitSucceeded { generation } => {
                if generation != self.submit_generation {
                    debug!("Dropping stale submission success (generation {})", generation);
                    return;
                }
                self.in_flight = false;
                self.reset_form();
                self.modal_open = false;
            }
            Action::SubmitFailed { generation, errors } => {
                if generation != self.submit_generation {
                    debug!("Dropping stale submission failure (generation {})", generation);
                    return;
                }
                self.in_flight = false;
                if let Some(server_errors) = errors {
                    self.errors = server_errors;
                }
            }
            Action::PreviewRequested => {
                self.preview_generation += 1;
            }
            Action::PreviewLoaded { generation, preview } => {
                if generation != self.preview_generation {
                    debug!("Dropping stale preview (generation {})", generation);
                    return;
                }
                self.preview = preview;
            }
            Action::PreviewCleared => {
                self.preview_generation += 1;
                self.preview = Preview::Placeholder;
            }
            Action::ModalOpened => {
                self.modal_open = true;
            }
            Action::ModalClosed => {
                self.modal_open = false;
                self.invalidate_background_work();
                self.reset_form();
            }
            Action::Reset => {
                self.invalidate_background_work();
                self.reset_form();
            }
        }
    }

    /// Apply a change event keyed by wire field name, as dispatched by the
    /// field renderer.
    ///
    pub fn update_field(&mut self, name: &str, value: &str) -> Result<(), StateError> {
        let field = Field::from_str(name)?;
        self.apply(Action::FieldChanged {
            field,
            value: value.to_string(),
        });
        Ok(())
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    pub fn modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn submit_generation(&self) -> u64 {
        self.submit_generation
    }

    pub fn preview_generation(&self) -> u64 {
        self.preview_generation
    }

    fn reset_form(&mut self) {
        self.data = FormData::default();
        self.errors.clear();
        self.preview = Preview::Placeholder;
    }

    // Any decode or submission still running was begun against discarded
    // state; bumping both counters makes its completion stale.
    fn invalidate_background_work(&mut self) {
        self.preview_generation += 1;
        self.submit_generation += 1;
        self.in_flight = false;
    }
}
