//! Mock camera source for tests and camera-less environments
//!
//! Produces synthetic frames at a configured resolution and counts every
//! track stop, so callers can assert that a stream was released exactly once.

use super::{CameraSource, CameraStream, FrameCell, StreamRequest, VideoDevice};
use crate::error::MediaError;
use crate::frame::{VideoFrame, VideoResolution};
use crate::track::MediaTrack;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Acquisition failure kinds a mock camera can be configured to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    /// The user denied camera access
    PermissionDenied,
    /// No camera is attached
    DeviceNotFound,
    /// Another process holds the camera
    DeviceBusy,
}

impl MockFailure {
    fn into_error(self) -> MediaError {
        match self {
            MockFailure::PermissionDenied => MediaError::PermissionDenied {
                device: "mock".to_string(),
            },
            MockFailure::DeviceNotFound => MediaError::DeviceNotFound {
                device: "mock".to_string(),
            },
            MockFailure::DeviceBusy => MediaError::DeviceBusy {
                device: "mock".to_string(),
            },
        }
    }
}

/// Camera source that synthesizes frames instead of opening hardware
pub struct MockCamera {
    resolution: VideoResolution,
    track_count: usize,
    failure: Option<MockFailure>,
    resolve_delay: Option<Duration>,
    stop_calls: Arc<AtomicUsize>,
    tracks_created: Arc<AtomicUsize>,
    acquisitions: AtomicUsize,
}

impl MockCamera {
    /// Create a mock camera delivering frames at the given resolution
    pub fn new(resolution: VideoResolution) -> Self {
        Self {
            resolution,
            track_count: 1,
            failure: None,
            resolve_delay: None,
            stop_calls: Arc::new(AtomicUsize::new(0)),
            tracks_created: Arc::new(AtomicUsize::new(0)),
            acquisitions: AtomicUsize::new(0),
        }
    }

    /// Make every acquisition reject with the given failure
    pub fn failing(resolution: VideoResolution, failure: MockFailure) -> Self {
        let mut camera = Self::new(resolution);
        camera.failure = Some(failure);
        camera
    }

    /// Number of tracks each acquired stream carries (default 1)
    pub fn with_tracks(mut self, count: usize) -> Self {
        self.track_count = count;
        self
    }

    /// Delay acquisition resolution, to exercise pending/teardown races
    pub fn with_resolve_delay(mut self, delay: Duration) -> Self {
        self.resolve_delay = Some(delay);
        self
    }

    /// Total stop calls observed across all tracks ever created
    pub fn stop_calls(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }

    /// Total tracks handed out across all acquisitions
    pub fn tracks_created(&self) -> usize {
        self.tracks_created.load(Ordering::SeqCst)
    }

    /// Number of acquisition attempts observed
    pub fn acquisitions(&self) -> usize {
        self.acquisitions.load(Ordering::SeqCst)
    }

    /// Build one synthetic frame: a vertical gray gradient
    fn synthetic_frame(&self) -> VideoFrame {
        let VideoResolution { width, height } = self.resolution;
        let mut data = Vec::with_capacity(width as usize * height as usize * 3);
        for y in 0..height {
            let shade = if height > 1 {
                (y * 255 / (height - 1).max(1)) as u8
            } else {
                128
            };
            for _ in 0..width {
                data.extend_from_slice(&[shade, shade, shade]);
            }
        }
        VideoFrame {
            width,
            height,
            data,
            timestamp_ms: 0,
        }
    }
}

#[async_trait]
impl CameraSource for MockCamera {
    async fn acquire(&self, request: &StreamRequest) -> Result<CameraStream, MediaError> {
        request.validate()?;
        self.acquisitions.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.resolve_delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(failure) = self.failure {
            return Err(failure.into_error());
        }

        let frames = FrameCell::new();
        frames.publish(self.synthetic_frame());

        let tracks = (0..self.track_count)
            .map(|n| {
                self.tracks_created.fetch_add(1, Ordering::SeqCst);
                Box::new(MockTrack {
                    id: format!("mock-video-{}", n),
                    stop_calls: self.stop_calls.clone(),
                    ended: false,
                }) as Box<dyn MediaTrack>
            })
            .collect();

        Ok(CameraStream::new(self.resolution, frames, tracks))
    }

    fn list_devices(&self) -> Result<Vec<VideoDevice>, MediaError> {
        Ok(vec![VideoDevice {
            id: "mock".to_string(),
            name: "Mock Camera".to_string(),
            is_default: true,
        }])
    }
}

struct MockTrack {
    id: String,
    stop_calls: Arc<AtomicUsize>,
    ended: bool,
}

impl MediaTrack for MockTrack {
    fn id(&self) -> &str {
        &self.id
    }

    fn stop(&mut self) {
        if self.ended {
            return;
        }
        self.ended = true;
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn is_ended(&self) -> bool {
        self.ended
    }
}
