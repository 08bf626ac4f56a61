//! Client-side registration workflow: field validation, form state, image
//! preview, and asynchronous submission to a registration backend.
//!
//! The crate is headless. A presentation layer (modal and field renderer)
//! drives it by dispatching change events into [`state::FormState`],
//! requesting previews through [`events::ImagePreviewLoader`], and running
//! submit attempts through [`events::SubmissionController`], which returns a
//! [`events::SubmissionOutcome`] for the UI to act on.
//!
//! ```no_run
//! use signup_form::backend::RegistrationApi;
//! use signup_form::directory::InMemoryDirectory;
//! use signup_form::events::{SubmissionController, SubmissionOutcome};
//! use signup_form::state::FormState;
//! use std::sync::Arc;
//! use tokio::sync::Mutex;
//!
//! # async fn run() {
//! let directory: InMemoryDirectory = ["alice"].into_iter().collect();
//! let state = Arc::new(Mutex::new(FormState::new(Arc::new(directory))));
//!
//! state.lock().await.update_field("username", "bob").unwrap();
//! // ... remaining change events from the renderer ...
//!
//! let api = RegistrationApi::new("http://localhost:8080");
//! match SubmissionController::new(&state, &api).submit().await {
//!     SubmissionOutcome::Success => { /* close the modal */ }
//!     _outcome => { /* render errors or a failure notice */ }
//! }
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod directory;
pub mod error;
pub mod events;
pub mod fields;
pub mod state;
pub mod validate;

pub use backend::{RegisterResponse, RegistrationApi};
pub use directory::{InMemoryDirectory, UserDirectory};
pub use error::{AppError, AppResult};
pub use events::{ImagePreviewLoader, SubmissionController, SubmissionOutcome};
pub use state::{Action, ErrorMap, Field, FormData, FormState, Preview};
