//! # camsnap
//!
//! A webcam capture screen: acquire the user's camera, keep a live preview
//! bound while the screen is mounted, and export still frames as timestamped
//! PNG files on demand.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use camsnap::{CaptureScreen, DirDownloadSink, ScreenState};
//! use camsnap_media::{StreamRequest, SystemCamera};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let screen = CaptureScreen::new(Arc::new(SystemCamera::new()), StreamRequest::default());
//!
//!     // Mount acquires the camera and binds the live preview.
//!     if screen.mount().await == ScreenState::Failed {
//!         eprintln!("{}", screen.error_notice().unwrap_or_default());
//!         return Ok(());
//!     }
//!
//!     // Capture the current frame to webcam-capture-<timestamp>.png.
//!     let sink = DirDownloadSink::new(".");
//!     screen.capture_photo(&sink)?;
//!
//!     // Unmount releases the camera exactly once.
//!     screen.unmount();
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

// Re-export the media layer for convenience
pub use camsnap_media::{
    CameraSelector, CameraSource, CameraStream, MediaError, MediaResult, MockCamera, MockFailure,
    PreviewSurface, StreamRequest, SystemCamera, VideoDevice, VideoFrame, VideoResolution,
};

// Public API modules
pub mod config;
pub mod download;
pub mod event;
pub mod screen;
pub mod snapshot;

// Re-export main API types
pub use config::ScreenConfig;
pub use download::{DirDownloadSink, DownloadSink};
pub use event::ScreenEvent;
pub use screen::{CaptureScreen, ScreenState, ACQUISITION_FAILURE_NOTICE};
pub use snapshot::{capture_filename, FrameBuffer, CAPTURE_FILE_PREFIX};
