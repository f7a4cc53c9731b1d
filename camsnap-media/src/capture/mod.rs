//! Camera stream acquisition
//!
//! This module defines the acquisition request, the live stream handle, and
//! the [`CameraSource`] trait that backends implement. The system backend
//! ([`SystemCamera`]) drives real hardware through `nokhwa`; the mock backend
//! ([`MockCamera`]) produces synthetic frames for tests and camera-less
//! environments.

pub mod mock;
pub mod system;

use crate::error::MediaError;
use crate::frame::{VideoFrame, VideoResolution};
use crate::track::MediaTrack;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

pub use mock::{MockCamera, MockFailure};
pub use system::SystemCamera;

/// Which camera an acquisition request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraSelector {
    /// The platform's default camera
    Default,
    /// A specific camera by enumeration index
    Index(u32),
}

impl Default for CameraSelector {
    fn default() -> Self {
        Self::Default
    }
}

/// A video-only acquisition request.
///
/// Audio is never requested; this layer only deals in camera video.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamRequest {
    /// Camera to open
    pub camera: CameraSelector,
    /// Preferred resolution; `None` lets the device pick its native format
    pub resolution: Option<VideoResolution>,
}

impl StreamRequest {
    /// Validate the request
    pub fn validate(&self) -> Result<(), MediaError> {
        if let Some(resolution) = self.resolution {
            if resolution.width == 0 || resolution.height == 0 {
                return Err(MediaError::InvalidConfiguration {
                    message: "Requested resolution has a zero dimension".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Information about an attached camera
#[derive(Debug, Clone, Serialize)]
pub struct VideoDevice {
    /// Backend-specific identifier
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Whether this is the platform's default camera
    pub is_default: bool,
}

/// Shared cell holding the most recent frame produced by a stream.
///
/// Backends publish into it; the preview surface reads from it. Cloning the
/// cell clones the handle, not the frame.
#[derive(Debug, Clone, Default)]
pub struct FrameCell {
    inner: Arc<RwLock<Option<VideoFrame>>>,
}

impl FrameCell {
    /// Create an empty cell
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current frame
    pub fn publish(&self, frame: VideoFrame) {
        *self.inner.write() = Some(frame);
    }

    /// Clone out the most recent frame, if any
    pub fn latest(&self) -> Option<VideoFrame> {
        self.inner.read().clone()
    }

    /// Drop the current frame
    pub fn clear(&self) {
        *self.inner.write() = None;
    }
}

/// A live camera stream: the revocable handle obtained from acquisition.
///
/// Holds the tracks backing the device resource. `stop` releases every track
/// exactly once; dropping an unstopped stream releases it as well, so the
/// camera lock can never outlive the handle.
pub struct CameraStream {
    id: Uuid,
    resolution: VideoResolution,
    frames: FrameCell,
    tracks: Vec<Box<dyn MediaTrack>>,
    stopped: bool,
}

impl CameraStream {
    /// Assemble a stream from its parts. Backends call this once acquisition
    /// has succeeded.
    pub fn new(
        resolution: VideoResolution,
        frames: FrameCell,
        tracks: Vec<Box<dyn MediaTrack>>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            resolution,
            frames,
            tracks,
            stopped: false,
        }
    }

    /// Unique identifier for this stream
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Native resolution the device is delivering
    pub fn resolution(&self) -> VideoResolution {
        self.resolution
    }

    /// Handle to the latest-frame cell, for preview binding
    pub fn frames(&self) -> FrameCell {
        self.frames.clone()
    }

    /// Most recent frame delivered by the device, if any
    pub fn latest_frame(&self) -> Option<VideoFrame> {
        self.frames.latest()
    }

    /// Whether the stream still owns the device
    pub fn is_live(&self) -> bool {
        !self.stopped
    }

    /// Number of tracks inside this stream
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Stop every track and release the device.
    ///
    /// Idempotent: only the first call does anything.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        for track in &mut self.tracks {
            debug!(stream = %self.id, track = track.id(), "stopping track");
            track.stop();
        }
        self.frames.clear();
        self.stopped = true;
    }
}

impl Drop for CameraStream {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for CameraStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraStream")
            .field("id", &self.id)
            .field("resolution", &self.resolution)
            .field("tracks", &self.tracks.len())
            .field("stopped", &self.stopped)
            .finish()
    }
}

/// Asynchronous source of live camera streams.
///
/// Acquisition is the only suspending operation in the system: it resolves to
/// a [`CameraStream`] or rejects with an acquisition-class [`MediaError`].
#[async_trait]
pub trait CameraSource: Send + Sync {
    /// Request a video-only stream. One call per screen mount.
    async fn acquire(&self, request: &StreamRequest) -> Result<CameraStream, MediaError>;

    /// Enumerate attached cameras
    fn list_devices(&self) -> Result<Vec<VideoDevice>, MediaError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_validation() {
        let ok = StreamRequest {
            camera: CameraSelector::Default,
            resolution: Some(VideoResolution::VGA),
        };
        assert!(ok.validate().is_ok());

        let unconstrained = StreamRequest::default();
        assert!(unconstrained.validate().is_ok());

        let zero = StreamRequest {
            camera: CameraSelector::Index(1),
            resolution: Some(VideoResolution::new(0, 480)),
        };
        assert!(matches!(
            zero.validate(),
            Err(MediaError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_frame_cell_publish_and_clear() {
        let cell = FrameCell::new();
        assert!(cell.latest().is_none());

        cell.publish(VideoFrame {
            width: 2,
            height: 1,
            data: vec![0; 6],
            timestamp_ms: 42,
        });
        let frame = cell.latest().expect("frame published");
        assert_eq!(frame.timestamp_ms, 42);

        cell.clear();
        assert!(cell.latest().is_none());
    }
}
