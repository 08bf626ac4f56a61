//! Submission handling.
//!
//! Orchestrates the submit attempt: full-form revalidation, the single
//! network dispatch, and reconciliation of the outcome back into form state.

use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::backend::{RegisterResponse, RegistrationApi};
use crate::state::{Action, ErrorMap, FormState};

/// Tagged result of one submit attempt, consumed by the presentation layer
/// (e.g. to show a banner or close the modal). Never persisted.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The account was created; form state has been reset and the modal
    /// should close.
    Success,
    /// Local validation failed; no network call was made. Carries the
    /// aggregate error map for a "please correct the errors" notice.
    Invalid(ErrorMap),
    /// The backend refused the payload with per-field messages, now in the
    /// error map. The form stays open and populated for correction.
    ServerValidationFailure(ErrorMap),
    /// The request failed without a structured verdict; nothing was changed
    /// and the attempt may be retried.
    TransportFailure(String),
    /// A submission is already in flight; this attempt was rejected without
    /// validating or dispatching anything.
    AlreadyInFlight,
}

/// Drives the submit state machine against shared form state.
///
pub struct SubmissionController<'a> {
    state: &'a Arc<Mutex<FormState>>,
    api: &'a RegistrationApi,
}

impl<'a> SubmissionController<'a> {
    /// Return new instance with reference to state and backend API.
    ///
    pub fn new(state: &'a Arc<Mutex<FormState>>, api: &'a RegistrationApi) -> Self {
        SubmissionController { state, api }
    }

    /// Run one submit attempt to completion and return its outcome.
    ///
    /// Validation always completes before any network dispatch; an invalid
    /// form produces zero network calls. The lock is never held across the
    /// network await, so change events stay responsive while the request is
    /// in flight.
    ///
    pub async fn submit(&self) -> SubmissionOutcome {
        let (snapshot, generation) = {
            let mut state = self.state.lock().await;
            if state.is_in_flight() {
                warn!("Ignoring submit request while another is in flight.");
                return SubmissionOutcome::AlreadyInFlight;
            }

            // Never trust previously cached per-field errors; a dependent
            // field may have changed since its error was last computed.
            state.apply(Action::ValidateAll);
            if !state.errors().is_empty() {
                info!(
                    "Submission blocked by {} local validation error(s).",
                    state.errors().len()
                );
                return SubmissionOutcome::Invalid(state.errors().clone());
            }

            state.apply(Action::SubmitStarted);
            (state.data().clone(), state.submit_generation())
        };

        info!("Submitting registration request...");
        let result = self.api.register(&snapshot).await;

        let mut state = self.state.lock().await;
        match result {
            Ok(RegisterResponse::Accepted) => {
                info!("Registration successful.");
                state.apply(Action::SubmitSucceeded { generation });
                SubmissionOutcome::Success
            }
            Ok(RegisterResponse::Rejected(errors)) => {
                warn!("Registration rejected by the backend.");
                state.apply(Action::SubmitFailed {
                    generation,
                    errors: Some(errors.clone()),
                });
                SubmissionOutcome::ServerValidationFailure(errors)
            }
            Err(e) => {
                error!("Registration request failed: {}", e);
                state.apply(Action::SubmitFailed {
                    generation,
                    errors: None,
                });
                SubmissionOutcome::TransportFailure(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::InMemoryDirectory;
    use crate::state::{FormData, Preview};
    use httpmock::MockServer;
    use serde_json::json;

    fn shared_state(users: &[&str]) -> Arc<Mutex<FormState>> {
        let directory: InMemoryDirectory = users.iter().copied().collect();
        Arc::new(Mutex::new(FormState::new(Arc::new(directory))))
    }

    async fn fill_valid(state: &Arc<Mutex<FormState>>) {
        let mut state = state.lock().await;
        state.apply(Action::ModalOpened);
        for (name, value) in [
            ("username", "bob"),
            ("password", "abcdefg1"),
            ("confirmpassword", "abcdefg1"),
            ("displayname", "Bob"),
            ("profilepic", "pic.png"),
        ] {
            state.update_field(name, value).unwrap();
        }
    }

    #[tokio::test]
    async fn invalid_form_makes_no_network_call() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/register");
                then.status(200);
            })
            .await;

        let state = shared_state(&[]);
        {
            // Password too weak, confirmation missing
            let mut state = state.lock().await;
            state.update_field("username", "bob").unwrap();
            state.update_field("password", "abc").unwrap();
            state.update_field("displayname", "Bob").unwrap();
            state.update_field("profilepic", "pic.png").unwrap();
        }

        let api = RegistrationApi::new(&server.base_url());
        let outcome = SubmissionController::new(&state, &api).submit().await;

        match outcome {
            SubmissionOutcome::Invalid(errors) => {
                assert!(errors.contains_key("password"));
                assert!(errors.contains_key("confirmpassword"));
            }
            other => panic!("Expected local validation failure, got {:?}", other),
        }
        assert_eq!(mock.hits_async().await, 0);
        // Data retained untouched
        let state = state.lock().await;
        assert_eq!(state.data().username, "bob");
    }

    #[tokio::test]
    async fn successful_submission_resets_and_closes_modal() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/register").json_body(json!({
                    "username": "bob",
                    "password": "abcdefg1",
                    "displayname": "Bob",
                    "profilepic": "pic.png",
                }));
                then.status(200).json_body(json!({ "id": 7 }));
            })
            .await;

        let state = shared_state(&[]);
        fill_valid(&state).await;

        let api = RegistrationApi::new(&server.base_url());
        let outcome = SubmissionController::new(&state, &api).submit().await;

        assert_eq!(outcome, SubmissionOutcome::Success);
        mock.assert_async().await;

        let state = state.lock().await;
        assert_eq!(state.data(), &FormData::default());
        assert!(state.errors().is_empty());
        assert!(state.preview().is_placeholder());
        assert!(!state.modal_open());
        assert!(!state.is_in_flight());
    }

    #[tokio::test]
    async fn server_rejection_is_reconciled_into_errors() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("POST").path("/register");
                then.status(409).json_body(json!({
                    "errors": { "username": "Username is already taken." }
                }));
            })
            .await;

        let state = shared_state(&[]);
        fill_valid(&state).await;

        let api = RegistrationApi::new(&server.base_url());
        let outcome = SubmissionController::new(&state, &api).submit().await;

        match outcome {
            SubmissionOutcome::ServerValidationFailure(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors["username"], "Username is already taken.");
            }
            other => panic!("Expected server validation failure, got {:?}", other),
        }

        let state = state.lock().await;
        assert_eq!(state.errors().len(), 1);
        assert_eq!(state.errors()["username"], "Username is already taken.");
        assert_eq!(state.data().username, "bob");
        assert!(state.modal_open());
    }

    #[tokio::test]
    async fn transport_failure_retains_everything() {
        let state = shared_state(&[]);
        fill_valid(&state).await;

        // Nothing listening on this port
        let api = RegistrationApi::new("http://127.0.0.1:9");
        let outcome = SubmissionController::new(&state, &api).submit().await;

        assert!(matches!(outcome, SubmissionOutcome::TransportFailure(_)));

        let state = state.lock().await;
        assert_eq!(state.data().username, "bob");
        assert!(state.errors().is_empty());
        assert!(state.modal_open());
        assert!(!state.is_in_flight());
    }

    #[tokio::test]
    async fn second_submit_while_in_flight_is_rejected() {
        let state = shared_state(&[]);
        fill_valid(&state).await;
        {
            let mut state = state.lock().await;
            state.apply(Action::ValidateAll);
            assert!(state.errors().is_empty());
            state.apply(Action::SubmitStarted);
        }

        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/register");
                then.status(200);
            })
            .await;

        let api = RegistrationApi::new(&server.base_url());
        let outcome = SubmissionController::new(&state, &api).submit().await;

        assert_eq!(outcome, SubmissionOutcome::AlreadyInFlight);
        assert_eq!(mock.hits_async().await, 0);
    }

    #[tokio::test]
    async fn outcome_after_modal_close_does_not_touch_state() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("POST").path("/register");
                then.status(200).delay(std::time::Duration::from_millis(200));
            })
            .await;

        let state = shared_state(&[]);
        fill_valid(&state).await;

        let api = Arc::new(RegistrationApi::new(&server.base_url()));
        let task_state = Arc::clone(&state);
        let task_api = Arc::clone(&api);
        let handle = tokio::spawn(async move {
            SubmissionController::new(&task_state, &task_api)
                .submit()
                .await
        });

        // Give the request time to leave, then close the modal mid-flight
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        {
            let mut state = state.lock().await;
            state.apply(Action::ModalClosed);
            state.update_field("username", "carol").unwrap();
        }

        let outcome = handle.await.unwrap();
        assert_eq!(outcome, SubmissionOutcome::Success);

        // The stale success must not have reset the post-close edits
        let state = state.lock().await;
        assert_eq!(state.data().username, "carol");
        assert!(!state.modal_open());
    }

    #[tokio::test]
    async fn preview_survives_failed_submission() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("POST").path("/register");
                then.status(409)
                    .json_body(json!({ "errors": { "username": "Username is already taken." } }));
            })
            .await;

        let state = shared_state(&[]);
        fill_valid(&state).await;
        {
            let mut state = state.lock().await;
            state.apply(Action::PreviewLoaded {
                generation: 0,
                preview: Preview::Image("data:image/png;base64,AA==".to_string()),
            });
        }

        let api = RegistrationApi::new(&server.base_url());
        SubmissionController::new(&state, &api).submit().await;

        let state = state.lock().await;
        assert!(!state.preview().is_placeholder());
    }
}
