//! Registration form data types.
//!
//! This module contains the field enumeration, the form snapshot struct,
//! and the profile picture preview representation.

use fake::Dummy;
use std::collections::HashMap;
use std::str::FromStr;

use super::error::StateError;

/// Maps field names to human-readable error messages. Absence of an entry
/// means the field is currently valid.
pub type ErrorMap = HashMap<String, String>;

/// Identifies one user-editable field of the registration form.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Username,
    Password,
    ConfirmPassword,
    DisplayName,
    ProfilePictureRef,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 5] = [
        Field::Username,
        Field::Password,
        Field::ConfirmPassword,
        Field::DisplayName,
        Field::ProfilePictureRef,
    ];

    /// Wire name, used as ErrorMap key and in the submission payload.
    ///
    pub fn name(&self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmpassword",
            Field::DisplayName => "displayname",
            Field::ProfilePictureRef => "profilepic",
        }
    }

    /// Wire name with the first letter capitalized, as it appears in the
    /// required-field message.
    ///
    pub fn message_label(&self) -> &'static str {
        match self {
            Field::Username => "Username",
            Field::Password => "Password",
            Field::ConfirmPassword => "Confirmpassword",
            Field::DisplayName => "Displayname",
            Field::ProfilePictureRef => "Profilepic",
        }
    }
}

impl FromStr for Field {
    type Err = StateError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.name() == name)
            .ok_or_else(|| StateError::UnknownField(name.to_owned()))
    }
}

/// One consistent snapshot of all current field values.
///
#[derive(Clone, Debug, Default, Dummy, PartialEq, Eq)]
pub struct FormData {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub display_name: String,
    pub profile_picture_ref: String,
}

impl FormData {
    /// Return the current value of the given field.
    ///
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Username => &self.username,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
            Field::DisplayName => &self.display_name,
            Field::ProfilePictureRef => &self.profile_picture_ref,
        }
    }

    /// Store the raw value for the given field unconditionally.
    ///
    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Username => self.username = value,
            Field::Password => self.password = value,
            Field::ConfirmPassword => self.confirm_password = value,
            Field::DisplayName => self.display_name = value,
            Field::ProfilePictureRef => self.profile_picture_ref = value,
        }
    }
}

/// Displayable representation of the selected profile picture. Presentation
/// only; never part of the submitted payload.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Preview {
    #[default]
    Placeholder,
    /// A decoded `data:` URL for the selected file.
    Image(String),
}

impl Preview {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Preview::Placeholder)
    }
}
