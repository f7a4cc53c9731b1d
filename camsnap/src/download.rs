//! Download-trigger collaborator
//!
//! The sink receives encoded bytes under a chosen filename and persists them
//! however the host environment sees fit. The handoff is one-way: delivery
//! outcome is neither awaited nor reported back to the capture path.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// One-way receiver for exported captures
pub trait DownloadSink: Send + Sync {
    /// Hand off encoded bytes under the given filename. Fire-and-forget.
    fn deliver(&self, filename: &str, bytes: Vec<u8>);
}

/// Sink that writes each delivery into a target directory
#[derive(Debug, Clone)]
pub struct DirDownloadSink {
    dir: PathBuf,
}

impl DirDownloadSink {
    /// Create a sink writing into the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory deliveries are written into
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirDownloadSink {
    fn deliver(&self, filename: &str, bytes: Vec<u8>) {
        let path = self.dir.join(filename);
        match fs::write(&path, &bytes) {
            Ok(()) => {
                info!(path = %path.display(), size = bytes.len(), "capture saved");
            }
            Err(err) => {
                // Delivery is fire-and-forget; failures are logged and dropped.
                warn!(path = %path.display(), error = %err, "failed to save capture");
            }
        }
    }
}
