//! Capture screen lifecycle and operations
//!
//! The screen owns the live camera stream for as long as it is mounted and
//! guarantees its release exactly once, whether it is unmounted, replaced, or
//! torn down while acquisition is still pending. State moves through
//! `Unmounted -> Initializing -> {Bound, Failed}`; a failed mount is terminal
//! until the screen is mounted again.

use crate::download::DownloadSink;
use crate::event::ScreenEvent;
use crate::snapshot::{capture_filename, FrameBuffer};
use camsnap_media::{
    CameraSource, CameraStream, MediaError, PreviewSurface, StreamRequest, VideoResolution,
};
use chrono::Utc;
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

/// The one user-visible notice, shown for every acquisition failure alike
pub const ACQUISITION_FAILURE_NOTICE: &str =
    "Could not access webcam. Please ensure you have granted permission.";

/// Lifecycle state of a capture screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenState {
    /// No stream held, no acquisition in progress
    Unmounted,
    /// Acquisition in flight; the preview renders unbound
    Initializing,
    /// A live stream is held and bound to the preview surface
    Bound,
    /// Acquisition failed; the error notice is set
    Failed,
}

/// The capture screen: live preview plus snapshot-to-file.
///
/// Cheap to clone; clones share the same screen instance.
#[derive(Clone)]
pub struct CaptureScreen {
    inner: Arc<ScreenInner>,
}

struct ScreenInner {
    source: Arc<dyn CameraSource>,
    request: StreamRequest,
    state: RwLock<ScreenStateData>,
    /// Serializes acquisitions: at most one in flight per screen instance
    acquire_gate: Mutex<()>,
    /// Bumped by unmount so a stale acquisition cannot commit state
    epoch: AtomicU64,
    event_tx: broadcast::Sender<ScreenEvent>,
}

struct ScreenStateData {
    state: ScreenState,
    stream: Option<CameraStream>,
    preview: PreviewSurface,
    error_notice: Option<String>,
}

impl CaptureScreen {
    /// Create a screen over the given camera source. The screen starts
    /// unmounted; nothing happens until [`mount`](Self::mount).
    pub fn new(source: Arc<dyn CameraSource>, request: StreamRequest) -> Self {
        let (event_tx, _) = broadcast::channel(32);
        Self {
            inner: Arc::new(ScreenInner {
                source,
                request,
                state: RwLock::new(ScreenStateData {
                    state: ScreenState::Unmounted,
                    stream: None,
                    preview: PreviewSurface::new(),
                    error_notice: None,
                }),
                acquire_gate: Mutex::new(()),
                epoch: AtomicU64::new(0),
                event_tx,
            }),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> ScreenState {
        self.inner.state.read().state
    }

    /// The error surface: last acquisition failure notice, if any
    pub fn error_notice(&self) -> Option<String> {
        self.inner.state.read().error_notice.clone()
    }

    /// Whether the preview surface currently has a bound stream
    pub fn preview_bound(&self) -> bool {
        self.inner.state.read().preview.is_bound()
    }

    /// Native resolution of the bound stream, if any
    pub fn preview_resolution(&self) -> Option<VideoResolution> {
        self.inner.state.read().preview.resolution()
    }

    /// Subscribe to lifecycle and capture events
    pub fn subscribe_events(&self) -> broadcast::Receiver<ScreenEvent> {
        self.inner.event_tx.subscribe()
    }

    /// Mount the screen: acquire a live stream and bind the preview.
    ///
    /// This is the system's only suspension point. Any previously held
    /// stream is released before the new acquisition starts, so at most one
    /// stream is ever live. Returns the state the screen settled in.
    pub async fn mount(&self) -> ScreenState {
        let _gate = self.inner.acquire_gate.lock().await;

        let epoch = {
            let mut data = self.inner.state.write();
            if let Some(mut stream) = data.stream.take() {
                debug!(stream = %stream.id(), "releasing stream superseded by remount");
                stream.stop();
            }
            data.preview.unbind();
            // A fresh mount cycle starts with a clean error surface.
            data.error_notice = None;
            data.state = ScreenState::Initializing;
            self.inner.epoch.fetch_add(1, Ordering::SeqCst) + 1
        };

        debug!("requesting video-only camera stream");
        let result = self.inner.source.acquire(&self.inner.request).await;

        let mut data = self.inner.state.write();
        if self.inner.epoch.load(Ordering::SeqCst) != epoch {
            // The screen was torn down while acquisition was pending. The
            // late stream must still be released; state stays untouched.
            if let Ok(mut stream) = result {
                debug!(stream = %stream.id(), "stopping stream that resolved after teardown");
                stream.stop();
            }
            return data.state;
        }

        match result {
            Ok(stream) => {
                let stream_id = stream.id();
                let resolution = stream.resolution();
                data.preview.bind(&stream);
                data.stream = Some(stream);
                data.state = ScreenState::Bound;
                info!(
                    stream = %stream_id,
                    width = resolution.width,
                    height = resolution.height,
                    "camera stream bound to preview"
                );
                let _ = self.inner.event_tx.send(ScreenEvent::StreamBound {
                    stream_id,
                    resolution,
                });
                ScreenState::Bound
            }
            Err(err) => {
                warn!(error = %err, "webcam acquisition failed");
                data.error_notice = Some(ACQUISITION_FAILURE_NOTICE.to_string());
                data.state = ScreenState::Failed;
                let _ = self.inner.event_tx.send(ScreenEvent::AcquisitionFailed {
                    notice: ACQUISITION_FAILURE_NOTICE.to_string(),
                });
                ScreenState::Failed
            }
        }
    }

    /// Tear the screen down, releasing any held stream exactly once.
    ///
    /// Safe to call in any state; an acquisition still in flight will find
    /// its epoch stale and release its stream on arrival.
    pub fn unmount(&self) {
        self.inner.epoch.fetch_add(1, Ordering::SeqCst);

        let mut data = self.inner.state.write();
        let stream_id = data.stream.as_ref().map(|s| s.id());
        if let Some(mut stream) = data.stream.take() {
            stream.stop();
            info!(stream = %stream.id(), "camera stream released");
        }
        data.preview.unbind();
        data.state = ScreenState::Unmounted;

        let _ = self
            .inner
            .event_tx
            .send(ScreenEvent::TornDown { stream_id });
    }

    /// Unmount and mount again, as when navigating away and back
    pub async fn remount(&self) -> ScreenState {
        self.unmount();
        self.mount().await
    }

    /// Capture the current preview frame and export it through the sink.
    ///
    /// With no bound stream (or no frame presented yet) this is a silent
    /// no-op and the sink is never invoked. Encoding failures propagate to
    /// the caller; they are never written to the error surface. Returns the
    /// delivered filename, or `None` for the no-op case.
    pub fn capture_photo(&self, sink: &dyn DownloadSink) -> Result<Option<String>, MediaError> {
        let frame = {
            let data = self.inner.state.read();
            if data.state != ScreenState::Bound {
                debug!(state = ?data.state, "capture ignored: no bound stream");
                return Ok(None);
            }
            match data.preview.current_frame() {
                Some(frame) => frame,
                None => {
                    debug!("capture ignored: preview has not presented a frame yet");
                    return Ok(None);
                }
            }
        };

        let buffer = FrameBuffer::from_frame(&frame)?;
        let resolution = buffer.resolution();
        let bytes = buffer.encode_png()?;
        let filename = capture_filename(Utc::now());

        sink.deliver(&filename, bytes);
        info!(
            filename = %filename,
            width = resolution.width,
            height = resolution.height,
            "capture exported"
        );
        let _ = self.inner.event_tx.send(ScreenEvent::PhotoCaptured {
            filename: filename.clone(),
            resolution,
        });
        Ok(Some(filename))
    }
}

impl std::fmt::Debug for CaptureScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let data = self.inner.state.read();
        f.debug_struct("CaptureScreen")
            .field("state", &data.state)
            .field("preview_bound", &data.preview.is_bound())
            .field("error_notice", &data.error_notice)
            .finish()
    }
}
