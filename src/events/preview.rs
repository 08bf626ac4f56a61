//! Profile picture preview loading.
//!
//! Converts a selected file into a displayable `data:` URL off the event
//! path. Clearing the selection reverts the preview synchronously; a
//! selected file is decoded by a fire-and-forget background task whose
//! completion is dropped if a newer selection or a reset superseded it.

use anyhow::{Context, Result};
use base64::Engine;
use log::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::state::{Action, FormState, Preview};

/// Loads image previews into shared form state.
///
pub struct ImagePreviewLoader {
    state: Arc<Mutex<FormState>>,
}

impl ImagePreviewLoader {
    /// Return new instance with shared ownership of state.
    ///
    pub fn new(state: Arc<Mutex<FormState>>) -> Self {
        ImagePreviewLoader { state }
    }

    /// React to a file selection change. `None` reverts the preview to the
    /// placeholder before returning; `Some` starts a background decode and
    /// returns its handle. The caller is free to drop the handle.
    ///
    pub async fn select(&self, file: Option<PathBuf>) -> Option<JoinHandle<()>> {
        let path = match file {
            None => {
                let mut state = self.state.lock().await;
                state.apply(Action::PreviewCleared);
                return None;
            }
            Some(path) => path,
        };

        let generation = {
            let mut state = self.state.lock().await;
            state.apply(Action::PreviewRequested);
            state.preview_generation()
        };

        debug!("Decoding preview for '{}'...", path.display());
        let state = Arc::clone(&self.state);
        Some(tokio::spawn(async move {
            match decode_data_url(&path).await {
                Ok(url) => {
                    let mut state = state.lock().await;
                    state.apply(Action::PreviewLoaded {
                        generation,
                        preview: Preview::Image(url),
                    });
                }
                Err(e) => {
                    // Preview is cosmetic; a failed decode leaves whatever
                    // preview is currently shown.
                    error!("Failed to decode preview for '{}': {}", path.display(), e);
                }
            }
        }))
    }
}

/// Read the file and encode it as a base64 `data:` URL.
///
async fn decode_data_url(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
    Ok(format!("data:{};base64,{}", mime_for(path), encoded))
}

// Extension-based approximation; the backend never sees the preview, so a
// wrong guess only affects local display.
fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
