//! System camera backend built on `nokhwa`
//!
//! Opening the device and pumping frames both happen on a dedicated capture
//! thread, since camera handles cannot be moved across threads on every
//! platform. Acquisition awaits a readiness signal from that thread; stopping
//! the stream's track signals the thread and joins it, which closes the
//! device.

use super::{
    CameraSelector, CameraSource, CameraStream, FrameCell, StreamRequest, VideoDevice,
};
use crate::error::MediaError;
use crate::frame::{VideoFrame, VideoResolution};
use crate::track::MediaTrack;
use async_trait::async_trait;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{ApiBackend, CameraIndex, RequestedFormat, RequestedFormatType, Resolution};
use nokhwa::{query, Camera, NokhwaError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

/// Camera source backed by the host's real capture devices
#[derive(Debug, Default)]
pub struct SystemCamera;

impl SystemCamera {
    /// Create a system camera source
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CameraSource for SystemCamera {
    async fn acquire(&self, request: &StreamRequest) -> Result<CameraStream, MediaError> {
        request.validate()?;

        let device_label = device_label(request.camera);
        let (ready_tx, ready_rx) = oneshot::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let frames = FrameCell::new();

        let pump_request = request.clone();
        let pump_frames = frames.clone();
        let pump_stop = stop.clone();
        let handle = std::thread::Builder::new()
            .name("camsnap-camera".to_string())
            .spawn(move || pump_frames_loop(pump_request, pump_frames, pump_stop, ready_tx))
            .map_err(|e| MediaError::AcquisitionFailed {
                reason: format!("failed to spawn capture thread: {}", e),
            })?;

        match ready_rx.await {
            Ok(Ok(resolution)) => {
                info!(
                    device = %device_label,
                    width = resolution.width,
                    height = resolution.height,
                    "camera stream opened"
                );
                let track: Box<dyn MediaTrack> = Box::new(SystemVideoTrack {
                    id: format!("video:{}", device_label),
                    stop,
                    handle: Some(handle),
                });
                Ok(CameraStream::new(resolution, frames, vec![track]))
            }
            Ok(Err(err)) => {
                let _ = handle.join();
                Err(err)
            }
            Err(_) => {
                let _ = handle.join();
                Err(MediaError::AcquisitionFailed {
                    reason: "capture thread exited before reporting readiness".to_string(),
                })
            }
        }
    }

    fn list_devices(&self) -> Result<Vec<VideoDevice>, MediaError> {
        let infos = query(ApiBackend::Auto).map_err(|e| MediaError::DeviceEnumerationFailed {
            reason: e.to_string(),
        })?;
        Ok(infos
            .iter()
            .enumerate()
            .map(|(position, info)| VideoDevice {
                id: info.index().to_string(),
                name: info.human_name(),
                is_default: position == 0,
            })
            .collect())
    }
}

/// Track handle owning the capture thread
struct SystemVideoTrack {
    id: String,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl MediaTrack for SystemVideoTrack {
    fn id(&self) -> &str {
        &self.id
    }

    fn stop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!(track = %self.id, "capture thread panicked during shutdown");
            }
        }
    }

    fn is_ended(&self) -> bool {
        self.handle.is_none()
    }
}

/// Capture-thread body: open the device, report readiness, then pump frames
/// into the shared cell until asked to stop.
fn pump_frames_loop(
    request: StreamRequest,
    frames: FrameCell,
    stop: Arc<AtomicBool>,
    ready_tx: oneshot::Sender<Result<VideoResolution, MediaError>>,
) {
    let device_label = device_label(request.camera);
    let index = match request.camera {
        CameraSelector::Default => CameraIndex::Index(0),
        CameraSelector::Index(i) => CameraIndex::Index(i),
    };
    let requested = match request.resolution {
        Some(r) => RequestedFormat::new::<RgbFormat>(RequestedFormatType::HighestResolution(
            Resolution::new(r.width, r.height),
        )),
        None => RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution),
    };

    let mut camera = match Camera::new(index, requested) {
        Ok(camera) => camera,
        Err(err) => {
            let _ = ready_tx.send(Err(map_acquire_error(err, &device_label)));
            return;
        }
    };
    if let Err(err) = camera.open_stream() {
        let _ = ready_tx.send(Err(map_acquire_error(err, &device_label)));
        return;
    }

    let native = camera.resolution();
    let resolution = VideoResolution::new(native.width(), native.height());
    if ready_tx.send(Ok(resolution)).is_err() {
        // Acquirer went away before we became ready; close immediately.
        let _ = camera.stop_stream();
        return;
    }

    while !stop.load(Ordering::Acquire) {
        match camera.frame() {
            Ok(buffer) => match buffer.decode_image::<RgbFormat>() {
                Ok(image) => {
                    let frame = VideoFrame {
                        width: image.width(),
                        height: image.height(),
                        data: image.into_raw(),
                        timestamp_ms: unix_millis(),
                    };
                    frames.publish(frame);
                }
                Err(err) => {
                    warn!(device = %device_label, error = %err, "frame decode failed");
                }
            },
            Err(err) => {
                warn!(device = %device_label, error = %err, "camera read failed");
                break;
            }
        }
    }

    if let Err(err) = camera.stop_stream() {
        warn!(device = %device_label, error = %err, "failed to close camera stream");
    }
    debug!(device = %device_label, "capture thread exited");
}

fn device_label(selector: CameraSelector) -> String {
    match selector {
        CameraSelector::Default => "default".to_string(),
        CameraSelector::Index(i) => i.to_string(),
    }
}

/// Classify a `nokhwa` failure into the acquisition error taxonomy.
///
/// `nokhwa` reports platform errors as strings, so classification keys off
/// the message text.
fn map_acquire_error(err: NokhwaError, device: &str) -> MediaError {
    let text = err.to_string();
    let lower = text.to_lowercase();
    if lower.contains("permission")
        || lower.contains("access denied")
        || lower.contains("not authorized")
    {
        MediaError::PermissionDenied {
            device: device.to_string(),
        }
    } else if lower.contains("busy") || lower.contains("in use") {
        MediaError::DeviceBusy {
            device: device.to_string(),
        }
    } else if lower.contains("not found") || lower.contains("no such") || lower.contains("no device")
    {
        MediaError::DeviceNotFound {
            device: device.to_string(),
        }
    } else {
        MediaError::AcquisitionFailed { reason: text }
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
