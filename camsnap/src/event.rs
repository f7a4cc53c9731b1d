//! Screen lifecycle and capture events

use camsnap_media::VideoResolution;
use uuid::Uuid;

/// Events emitted by a capture screen over its lifetime
#[derive(Debug, Clone)]
pub enum ScreenEvent {
    /// Acquisition succeeded and the preview surface is bound
    StreamBound {
        /// Identifier of the bound stream
        stream_id: Uuid,
        /// Native resolution the device is delivering
        resolution: VideoResolution,
    },
    /// Acquisition failed; the screen holds an error notice
    AcquisitionFailed {
        /// The user-visible notice text
        notice: String,
    },
    /// A still frame was captured and handed to the download sink
    PhotoCaptured {
        /// Filename the capture was delivered under
        filename: String,
        /// Dimensions of the exported image
        resolution: VideoResolution,
    },
    /// The screen was torn down and any held stream released
    TornDown {
        /// Identifier of the released stream, if one was held
        stream_id: Option<Uuid>,
    },
}

impl ScreenEvent {
    /// Get the event type as a string
    pub fn event_type(&self) -> &'static str {
        match self {
            ScreenEvent::StreamBound { .. } => "stream_bound",
            ScreenEvent::AcquisitionFailed { .. } => "acquisition_failed",
            ScreenEvent::PhotoCaptured { .. } => "photo_captured",
            ScreenEvent::TornDown { .. } => "torn_down",
        }
    }
}
