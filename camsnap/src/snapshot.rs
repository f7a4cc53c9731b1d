//! Still-frame capture and PNG export
//!
//! A capture copies the current preview frame into an offscreen buffer at the
//! frame's native resolution, encodes it losslessly, and names the result
//! after the capture moment. The buffer is built fresh per capture and
//! consumed by encoding.

use camsnap_media::{MediaError, VideoFrame, VideoResolution};
use chrono::{DateTime, Utc};
use image::{DynamicImage, ImageFormat, RgbImage};
use std::io::Cursor;

/// Filename prefix for exported captures
pub const CAPTURE_FILE_PREFIX: &str = "webcam-capture-";

/// Offscreen raster copy of a single video frame
#[derive(Debug)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl FrameBuffer {
    /// Copy a frame into a buffer of exactly its native dimensions.
    ///
    /// The frame is painted at origin (0,0) over its full extent; the buffer
    /// never scales or crops.
    pub fn from_frame(frame: &VideoFrame) -> Result<Self, MediaError> {
        frame.validate()?;
        Ok(Self {
            width: frame.width,
            height: frame.height,
            data: frame.data.clone(),
        })
    }

    /// Buffer width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Buffer dimensions as a resolution
    pub fn resolution(&self) -> VideoResolution {
        VideoResolution::new(self.width, self.height)
    }

    /// Encode the buffer as PNG, consuming it
    pub fn encode_png(self) -> Result<Vec<u8>, MediaError> {
        let image =
            RgbImage::from_raw(self.width, self.height, self.data).ok_or_else(|| {
                MediaError::EncodingFailed {
                    reason: "pixel buffer does not match its dimensions".to_string(),
                }
            })?;

        let mut bytes: Vec<u8> = Vec::new();
        DynamicImage::ImageRgb8(image)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| MediaError::EncodingFailed {
                reason: e.to_string(),
            })?;
        Ok(bytes)
    }
}

/// Build the export filename for a capture taken at the given moment:
/// `webcam-capture-<ISO-8601 UTC timestamp>.png`
pub fn capture_filename(at: DateTime<Utc>) -> String {
    format!(
        "{}{}.png",
        CAPTURE_FILE_PREFIX,
        at.format("%Y-%m-%dT%H:%M:%S%.3fZ")
    )
}
