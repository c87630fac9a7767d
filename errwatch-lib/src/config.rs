//! Capture configuration.

use crate::error::CaptureError;
use crate::stack::DEFAULT_MAX_FRAMES;

/// Placeholder message browsers substitute for cross-origin script errors.
pub const CROSS_ORIGIN_MESSAGE: &str = "Script error.";

/// Configuration for [`ErrorCapture`](crate::ErrorCapture).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureConfig {
    /// Stack segments kept by the normalizer.
    pub max_frames: usize,

    /// Script error message that is dropped when no source file is known.
    pub cross_origin_message: String,

    /// Fill the record's `time` field with the capture timestamp.
    pub stamp_time: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            max_frames: DEFAULT_MAX_FRAMES,
            cross_origin_message: CROSS_ORIGIN_MESSAGE.to_string(),
            stamp_time: false,
        }
    }
}

impl CaptureConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of stack segments to keep.
    pub fn max_frames(mut self, max: usize) -> Self {
        self.max_frames = max;
        self
    }

    /// Set the cross-origin placeholder message.
    pub fn cross_origin_message(mut self, message: impl Into<String>) -> Self {
        self.cross_origin_message = message.into();
        self
    }

    /// Stamp every record with the capture time.
    pub fn stamp_time(mut self) -> Self {
        self.stamp_time = true;
        self
    }

    /// Check that all values are usable.
    pub fn validate(&self) -> Result<(), CaptureError> {
        if self.max_frames == 0 {
            return Err(CaptureError::config("max_frames must be at least 1"));
        }
        if self.cross_origin_message.is_empty() {
            return Err(CaptureError::config("cross_origin_message must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = CaptureConfig::default();
        assert_eq!(config.max_frames, 9);
        assert_eq!(config.cross_origin_message, "Script error.");
        assert!(!config.stamp_time);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_frames_rejected() {
        let err = CaptureConfig::new().max_frames(0).validate().unwrap_err();
        assert!(matches!(err, CaptureError::InvalidConfig(_)));
    }

    #[test]
    fn test_empty_cross_origin_message_rejected() {
        assert!(CaptureConfig::new().cross_origin_message("").validate().is_err());
    }
}
