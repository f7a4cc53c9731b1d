//! Integration tests for camera stream acquisition and release
//!
//! These use the mock camera source throughout, since test machines have no
//! camera hardware; the mock counts track stops so release semantics can be
//! asserted precisely.

use camsnap_media::{
    CameraSelector, CameraSource, MediaError, MockCamera, MockFailure, StreamRequest,
    VideoResolution,
};
use std::time::Duration;

// ============================================================================
// ACQUISITION TESTS
// ============================================================================

#[tokio::test]
async fn test_acquire_delivers_live_stream() {
    let camera = MockCamera::new(VideoResolution::VGA);
    let stream = camera
        .acquire(&StreamRequest::default())
        .await
        .expect("mock acquisition succeeds");

    assert!(stream.is_live());
    assert_eq!(stream.resolution(), VideoResolution::VGA);
    assert_eq!(stream.track_count(), 1);

    let frame = stream.latest_frame().expect("a frame is available");
    assert_eq!(frame.width, 640);
    assert_eq!(frame.height, 480);
    assert_eq!(frame.data.len(), 640 * 480 * 3);
}

#[tokio::test]
async fn test_acquire_rejects_invalid_request() {
    let camera = MockCamera::new(VideoResolution::VGA);
    let request = StreamRequest {
        camera: CameraSelector::Default,
        resolution: Some(VideoResolution::new(0, 0)),
    };
    let err = camera.acquire(&request).await.expect_err("zero dimensions");
    assert!(matches!(err, MediaError::InvalidConfiguration { .. }));
    // A rejected request never creates tracks.
    assert_eq!(camera.tracks_created(), 0);
}

#[tokio::test]
async fn test_acquire_failure_kinds() {
    for (failure, check) in [
        (
            MockFailure::PermissionDenied,
            (|e: &MediaError| matches!(e, MediaError::PermissionDenied { .. }))
                as fn(&MediaError) -> bool,
        ),
        (MockFailure::DeviceNotFound, |e| {
            matches!(e, MediaError::DeviceNotFound { .. })
        }),
        (MockFailure::DeviceBusy, |e| {
            matches!(e, MediaError::DeviceBusy { .. })
        }),
    ] {
        let camera = MockCamera::failing(VideoResolution::VGA, failure);
        let err = camera
            .acquire(&StreamRequest::default())
            .await
            .expect_err("configured to fail");
        assert!(check(&err), "unexpected error for {:?}: {:?}", failure, err);
        assert!(err.is_acquisition_failure());
    }
}

#[tokio::test]
async fn test_delayed_acquisition_resolves() {
    let camera =
        MockCamera::new(VideoResolution::HD).with_resolve_delay(Duration::from_millis(10));
    let stream = camera
        .acquire(&StreamRequest::default())
        .await
        .expect("delayed acquisition still succeeds");
    assert_eq!(stream.resolution(), VideoResolution::HD);
    assert_eq!(camera.acquisitions(), 1);
}

// ============================================================================
// RELEASE TESTS
// ============================================================================

#[tokio::test]
async fn test_stop_releases_each_track_exactly_once() {
    let camera = MockCamera::new(VideoResolution::VGA).with_tracks(2);
    let mut stream = camera
        .acquire(&StreamRequest::default())
        .await
        .expect("mock acquisition succeeds");

    assert_eq!(stream.track_count(), 2);
    stream.stop();
    assert!(!stream.is_live());
    assert_eq!(camera.stop_calls(), 2);

    // A second stop must not release anything again.
    stream.stop();
    assert_eq!(camera.stop_calls(), 2);
}

#[tokio::test]
async fn test_drop_releases_stream() {
    let camera = MockCamera::new(VideoResolution::VGA);
    {
        let _stream = camera
            .acquire(&StreamRequest::default())
            .await
            .expect("mock acquisition succeeds");
        assert_eq!(camera.stop_calls(), 0);
    }
    assert_eq!(camera.stop_calls(), camera.tracks_created());
}

#[tokio::test]
async fn test_stop_then_drop_releases_once() {
    let camera = MockCamera::new(VideoResolution::VGA);
    {
        let mut stream = camera
            .acquire(&StreamRequest::default())
            .await
            .expect("mock acquisition succeeds");
        stream.stop();
    }
    assert_eq!(camera.stop_calls(), 1);
}

// ============================================================================
// DEVICE ENUMERATION TESTS
// ============================================================================

#[tokio::test]
async fn test_mock_device_listing() {
    let camera = MockCamera::new(VideoResolution::VGA);
    let devices = camera.list_devices().expect("mock enumeration succeeds");
    assert_eq!(devices.len(), 1);
    assert!(devices[0].is_default);
    assert_eq!(devices[0].name, "Mock Camera");
}
