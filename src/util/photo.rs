//! Photo loading for form drafts
//!
//! Converts a selected image file into a `data:` URI off the event loop.
//! Each form field owns one `PhotoSlot`: selecting a new file aborts and
//! supersedes any unfinished load, so only the most recent selection can
//! ever land in the draft.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

/// Photo loading errors
#[derive(Debug, thiserror::Error)]
pub enum PhotoError {
    #[error("failed to read photo file: {0}")]
    Read(#[from] std::io::Error),
}

/// MIME type inferred from the file extension
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
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Read a file and encode it as a data URI
pub async fn load_data_uri(path: impl AsRef<Path>) -> Result<String, PhotoError> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    Ok(format!(
        "data:{};base64,{}",
        mime_for(path),
        STANDARD.encode(bytes)
    ))
}

/// Single-slot pending photo result for one form field
///
/// Holds at most one completed result and at most one in-flight load. A new
/// selection bumps the generation, aborts the previous task, and overwrites
/// whatever was there once it completes.
pub struct PhotoSlot {
    generation: Arc<AtomicU64>,
    result: Arc<Mutex<Option<Result<String, PhotoError>>>>,
    pending: Option<JoinHandle<()>>,
}

impl PhotoSlot {
    pub fn new() -> Self {
        Self {
            generation: Arc::new(AtomicU64::new(0)),
            result: Arc::new(Mutex::new(None)),
            pending: None,
        }
    }

    /// Start loading the file at `path`, superseding any earlier selection
    pub fn select(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(previous) = self.pending.take() {
            previous.abort();
        }

        let slot_generation = self.generation.clone();
        let slot_result = self.result.clone();
        self.pending = Some(tokio::spawn(async move {
            let loaded = load_data_uri(&path).await;
            // A later selection may have superseded this one mid-read
            if slot_generation.load(Ordering::SeqCst) == generation {
                *slot_result.lock() = Some(loaded);
            } else {
                debug!(path = %path.display(), "Stale photo load discarded");
            }
        }));
    }

    /// Whether a load is still in flight
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Take the latest completed result, leaving the slot empty
    pub fn take(&mut self) -> Option<Result<String, PhotoError>> {
        self.result.lock().take()
    }

    /// Drop any pending load and completed result
    pub fn clear(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(previous) = self.pending.take() {
            previous.abort();
        }
        *self.result.lock() = None;
    }
}

impl Default for PhotoSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PhotoSlot {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}
