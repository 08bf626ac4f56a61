//! Registration backend interface.
//!
//! Responsible for asynchronous interaction with the registration endpoint,
//! including serialization of the submission payload and interpretation of
//! the server's per-field rejection body.

mod client;
mod error;

pub use error::BackendError;

use client::Client;
use log::*;
use serde::{Deserialize, Serialize};

use crate::state::{ErrorMap, FormData};

const REGISTER_PATH: &str = "register";

/// JSON payload sent to the registration endpoint. The password is sent as
/// entered; hashing is the backend's responsibility.
///
#[derive(Debug, Serialize)]
struct RegistrationRequest<'a> {
    username: &'a str,
    password: &'a str,
    displayname: &'a str,
    profilepic: &'a str,
}

/// Per-field rejection body returned on a non-success status. The shape is
/// a v1 boundary contract: a flat object of field name to message.
///
#[derive(Debug, Deserialize)]
struct RejectionBody {
    errors: ErrorMap,
}

/// The backend's verdict on a submission that completed over the wire.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegisterResponse {
    /// The account was created.
    Accepted,
    /// The backend refused the payload with per-field messages.
    Rejected(ErrorMap),
}

/// High-level API over the registration endpoint.
///
pub struct RegistrationApi {
    client: Client,
}

impl RegistrationApi {
    /// Returns a new instance for the given base URL.
    ///
    pub fn new(base_url: &str) -> RegistrationApi {
        debug!("Initializing registration client for {}...", base_url);
        RegistrationApi {
            client: Client::new(base_url),
        }
    }

    /// Submit the registration payload. A success status means the account
    /// was created; the success body carries no contract beyond the status.
    /// A failure status must carry an `errors` object, which is passed
    /// through verbatim.
    ///
    pub async fn register(&self, data: &FormData) -> Result<RegisterResponse, BackendError> {
        debug!("Submitting registration for username '{}'...", data.username);
        let payload = RegistrationRequest {
            username: &data.username,
            password: &data.password,
            displayname: &data.display_name,
            profilepic: &data.profile_picture_ref,
        };

        let response = self.client.post(REGISTER_PATH, &payload).await?;
        let status = response.status();

        if status.is_success() {
            info!("Registration accepted (status {}).", status);
            return Ok(RegisterResponse::Accepted);
        }

        let body = response.text().await?;
        match serde_json::from_str::<RejectionBody>(&body) {
            Ok(rejection) => {
                warn!(
                    "Registration rejected (status {}) with {} field error(s).",
                    status,
                    rejection.errors.len()
                );
                Ok(RegisterResponse::Rejected(rejection.errors))
            }
            Err(e) => {
                error!(
                    "Registration rejected (status {}) but the error body could not be read: {}. Body: {}",
                    status, e, body
                );
                Err(BackendError::MalformedErrorBody {
                    status: status.as_u16(),
                })
            }
        }
    }
}
