//! # camsnap-media
//!
//! Camera acquisition and frame handling for camsnap. This crate owns the
//! device-facing side of the system: acquisition requests, live stream
//! handles with exactly-once release, frame types, and the preview surface
//! a stream presents on.

#![warn(clippy::all)]

pub mod capture;
pub mod error;
pub mod frame;
pub mod preview;
pub mod track;

// Re-export main types
pub use capture::{
    CameraSelector, CameraSource, CameraStream, FrameCell, MockCamera, MockFailure, StreamRequest,
    SystemCamera, VideoDevice,
};
pub use error::{MediaError, MediaResult};
pub use frame::{VideoFrame, VideoResolution};
pub use preview::PreviewSurface;
pub use track::MediaTrack;
