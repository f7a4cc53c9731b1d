//! Configuration types and defaults

use camsnap_media::{CameraSelector, StreamRequest, VideoResolution};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

/// Environment variable naming the capture output directory
pub const ENV_OUTPUT_DIR: &str = "CAMSNAP_OUTPUT_DIR";
/// Environment variable selecting a camera by index
pub const ENV_CAMERA_INDEX: &str = "CAMSNAP_CAMERA_INDEX";
/// Environment variable for the preferred capture width
pub const ENV_WIDTH: &str = "CAMSNAP_WIDTH";
/// Environment variable for the preferred capture height
pub const ENV_HEIGHT: &str = "CAMSNAP_HEIGHT";

/// Capture screen configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenConfig {
    /// Directory exported captures are delivered into
    pub output_dir: PathBuf,
    /// Acquisition request issued on every mount
    pub request: StreamRequest,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            request: StreamRequest::default(),
        }
    }
}

impl ScreenConfig {
    /// Build a configuration from `CAMSNAP_*` environment variables,
    /// falling back to defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var(ENV_OUTPUT_DIR) {
            if !dir.is_empty() {
                config.output_dir = PathBuf::from(dir);
            }
        }

        if let Some(index) = parse_var::<u32>(ENV_CAMERA_INDEX) {
            config.request.camera = CameraSelector::Index(index);
        }

        let width = parse_var::<u32>(ENV_WIDTH);
        let height = parse_var::<u32>(ENV_HEIGHT);
        match (width, height) {
            (Some(width), Some(height)) => {
                config.request.resolution = Some(VideoResolution::new(width, height));
            }
            (None, None) => {}
            _ => {
                warn!(
                    "{} and {} must both be set; ignoring resolution preference",
                    ENV_WIDTH, ENV_HEIGHT
                );
            }
        }

        config
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(variable = name, value = %raw, "ignoring unparsable environment variable");
            None
        }
    }
}
