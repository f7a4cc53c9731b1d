//! Media error types and handling
//!
//! This module defines the error types used throughout the camera and
//! capture layer, providing clear messages and context for error handling.

use thiserror::Error;

/// Main error type for camera and media operations
#[derive(Error, Debug)]
pub enum MediaError {
    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Access to the camera was denied by the user or the platform
    #[error("Permission denied for device: {device}")]
    PermissionDenied {
        /// Device identifier
        device: String,
    },

    /// No camera matching the request exists
    #[error("Device not found: {device}")]
    DeviceNotFound {
        /// Device identifier
        device: String,
    },

    /// The camera exists but is held by another process
    #[error("Device is busy: {device}")]
    DeviceBusy {
        /// Device identifier
        device: String,
    },

    /// Stream acquisition failed for a reason other than the above
    #[error("Acquisition failed: {reason}")]
    AcquisitionFailed {
        /// Failure reason
        reason: String,
    },

    /// Device enumeration failed
    #[error("Device enumeration failed: {reason}")]
    DeviceEnumerationFailed {
        /// Failure reason
        reason: String,
    },

    /// The device produced frames in a format the pipeline cannot handle
    #[error("Unsupported format: {format}")]
    UnsupportedFormat {
        /// Format description
        format: String,
    },

    /// Frame payload does not match its declared dimensions
    #[error("Invalid frame data: expected {expected} bytes, got {actual}")]
    InvalidFrameData {
        /// Expected data size
        expected: usize,
        /// Actual data size
        actual: usize,
    },

    /// Image encoding failed
    #[error("Encoding failed: {reason}")]
    EncodingFailed {
        /// Failure reason
        reason: String,
    },

    /// Invalid configuration provided
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// Error message
        message: String,
    },
}

/// Result type alias for media operations
pub type MediaResult<T> = Result<T, MediaError>;

impl MediaError {
    /// Whether this error arose while acquiring a live camera stream.
    ///
    /// Acquisition failures are the one error class surfaced to the user;
    /// everything else stays internal.
    pub fn is_acquisition_failure(&self) -> bool {
        matches!(
            self,
            MediaError::PermissionDenied { .. }
                | MediaError::DeviceNotFound { .. }
                | MediaError::DeviceBusy { .. }
                | MediaError::AcquisitionFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquisition_failure_classification() {
        let denied = MediaError::PermissionDenied {
            device: "0".to_string(),
        };
        assert!(denied.is_acquisition_failure());

        let busy = MediaError::DeviceBusy {
            device: "0".to_string(),
        };
        assert!(busy.is_acquisition_failure());

        let encode = MediaError::EncodingFailed {
            reason: "bad buffer".to_string(),
        };
        assert!(!encode.is_acquisition_failure());
    }

    #[test]
    fn test_error_display() {
        let error = MediaError::InvalidFrameData {
            expected: 1024,
            actual: 512,
        };
        assert_eq!(
            error.to_string(),
            "Invalid frame data: expected 1024 bytes, got 512"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let media_error = MediaError::from(io_error);

        match media_error {
            MediaError::Io { .. } => (),
            _ => panic!("Expected Io error variant"),
        }
    }
}
