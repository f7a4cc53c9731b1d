//! Live preview binding
//!
//! The preview surface is where a live stream presents frames to the user.
//! Binding stores a handle to the stream's latest-frame cell, mirroring how a
//! video element is pointed at a media stream; it does not take ownership of
//! the stream itself.

use crate::capture::{CameraStream, FrameCell};
use crate::frame::{VideoFrame, VideoResolution};
use tracing::debug;
use uuid::Uuid;

/// The surface a live camera stream presents frames on
#[derive(Debug, Default)]
pub struct PreviewSurface {
    source: Option<PreviewSource>,
}

#[derive(Debug)]
struct PreviewSource {
    stream_id: Uuid,
    resolution: VideoResolution,
    frames: FrameCell,
}

impl PreviewSurface {
    /// Create an unbound surface
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the surface to a live stream's frame source
    pub fn bind(&mut self, stream: &CameraStream) {
        debug!(stream = %stream.id(), "binding preview surface");
        self.source = Some(PreviewSource {
            stream_id: stream.id(),
            resolution: stream.resolution(),
            frames: stream.frames(),
        });
    }

    /// Detach the surface from its stream
    pub fn unbind(&mut self) {
        if let Some(source) = self.source.take() {
            debug!(stream = %source.stream_id, "unbinding preview surface");
        }
    }

    /// Whether a stream is currently bound
    pub fn is_bound(&self) -> bool {
        self.source.is_some()
    }

    /// Identifier of the bound stream, if any
    pub fn bound_stream(&self) -> Option<Uuid> {
        self.source.as_ref().map(|s| s.stream_id)
    }

    /// Native resolution of the bound stream, if any
    pub fn resolution(&self) -> Option<VideoResolution> {
        self.source.as_ref().map(|s| s.resolution)
    }

    /// The frame currently being presented, if one has arrived
    pub fn current_frame(&self) -> Option<VideoFrame> {
        self.source.as_ref().and_then(|s| s.frames.latest())
    }
}
