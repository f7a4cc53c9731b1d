//! Capture screen walkthrough against the mock camera source
//!
//! Demonstrates the full lifecycle without camera hardware: mount, capture,
//! remount, and the failure path with its user-visible notice.

use camsnap::{CaptureScreen, DirDownloadSink, ScreenState};
use camsnap_media::{MockCamera, MockFailure, StreamRequest, VideoResolution};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    // Happy path: mount, capture one photo into the current directory.
    let camera = Arc::new(MockCamera::new(VideoResolution::VGA));
    let screen = CaptureScreen::new(camera.clone(), StreamRequest::default());

    let mut events = screen.subscribe_events();
    assert_eq!(screen.mount().await, ScreenState::Bound);
    println!("mounted: {:?}", events.recv().await?.event_type());

    let sink = DirDownloadSink::new(".");
    if let Some(filename) = screen.capture_photo(&sink)? {
        println!("captured {}", filename);
    }

    // Navigating away and back never leaks a stream.
    screen.remount().await;
    screen.unmount();
    println!(
        "tracks created: {}, stop calls: {}",
        camera.tracks_created(),
        camera.stop_calls()
    );

    // Failure path: the screen converts the rejection into a notice.
    let denied = Arc::new(MockCamera::failing(
        VideoResolution::VGA,
        MockFailure::PermissionDenied,
    ));
    let failed_screen = CaptureScreen::new(denied, StreamRequest::default());
    assert_eq!(failed_screen.mount().await, ScreenState::Failed);
    println!(
        "failure notice: {}",
        failed_screen.error_notice().unwrap_or_default()
    );

    Ok(())
}
