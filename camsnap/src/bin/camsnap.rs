//! Command-line webcam capture screen
//!
//! Mounts the capture screen on startup, then takes a photo for every line
//! read on stdin until EOF. `camsnap list` prints the attached cameras as
//! JSON instead. Pass `--mock` to run against the synthetic camera source.

use anyhow::Result;
use camsnap::{CaptureScreen, DirDownloadSink, ScreenConfig, ScreenState};
use camsnap_media::{CameraSource, MockCamera, SystemCamera, VideoResolution};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let use_mock = args.iter().any(|a| a == "--mock");
    let source: Arc<dyn CameraSource> = if use_mock {
        Arc::new(MockCamera::new(VideoResolution::VGA))
    } else {
        Arc::new(SystemCamera::new())
    };

    if args.iter().any(|a| a == "list") {
        let devices = source.list_devices()?;
        println!("{}", serde_json::to_string_pretty(&devices)?);
        return Ok(());
    }

    let config = ScreenConfig::from_env();
    let screen = CaptureScreen::new(source, config.request.clone());

    match screen.mount().await {
        ScreenState::Bound => {
            let resolution = screen
                .preview_resolution()
                .unwrap_or(VideoResolution::VGA);
            println!(
                "Live preview bound at {}x{}. Press Enter to capture, Ctrl-D to quit.",
                resolution.width, resolution.height
            );
        }
        ScreenState::Failed => {
            eprintln!("{}", screen.error_notice().unwrap_or_default());
            return Ok(());
        }
        state => {
            eprintln!("Unexpected screen state after mount: {:?}", state);
            return Ok(());
        }
    }

    let sink = DirDownloadSink::new(config.output_dir.clone());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while lines.next_line().await?.is_some() {
        match screen.capture_photo(&sink)? {
            Some(filename) => println!("Saved {}", config.output_dir.join(filename).display()),
            None => println!("No live preview to capture."),
        }
    }

    screen.unmount();
    Ok(())
}
