//! Error types for the voice-dots engine
//!
//! Per-frame code never returns errors; everything here surfaces at
//! construction, resize, configuration or export time.

use thiserror::Error;

/// Engine errors
#[derive(Error, Debug, Clone)]
pub enum VoiceDotsError {
    /// Width/height too small to produce a dot grid or a positive disc radius
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Configuration file missing, malformed or out of range
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Scenario file missing, malformed or failing an assertion
    #[error("Scenario error: {0}")]
    ScenarioError(String),

    /// Frame encoding error while exporting a snapshot
    #[error("Image error: {0}")]
    ImageError(String),

    /// File system I/O error
    #[error("IO error: {0}")]
    IOError(String),
}

impl From<std::io::Error> for VoiceDotsError {
    fn from(e: std::io::Error) -> Self {
        VoiceDotsError::IOError(e.to_string())
    }
}

impl From<image::ImageError> for VoiceDotsError {
    fn from(e: image::ImageError) -> Self {
        VoiceDotsError::ImageError(e.to_string())
    }
}

impl VoiceDotsError {
    /// Check if this error is recoverable
    ///
    /// Recoverable errors leave the widget in its previous, still renderable
    /// state; the host can keep calling `update()`.
    pub fn is_recoverable(&self) -> bool {
        match self {
            // A rejected resize keeps the old geometry
            VoiceDotsError::InvalidGeometry(_) => true,
            // Config errors require user intervention
            VoiceDotsError::ConfigError(_) => false,
            VoiceDotsError::ScenarioError(_) => false,
            // A failed export does not touch the engine
            VoiceDotsError::ImageError(_) => true,
            VoiceDotsError::IOError(_) => false,
        }
    }

    /// Get a user-friendly description of the error
    pub fn user_message(&self) -> String {
        match self {
            VoiceDotsError::InvalidGeometry(_) => {
                "The indicator area is too small to draw. Please enlarge the window.".to_string()
            }
            VoiceDotsError::ConfigError(_) => {
                "Configuration error. Please check settings.".to_string()
            }
            VoiceDotsError::ScenarioError(_) => {
                "Scenario could not be played. Please check the scenario file.".to_string()
            }
            VoiceDotsError::ImageError(_) => "Failed to export the frame image.".to_string(),
            VoiceDotsError::IOError(_) => "File system error occurred.".to_string(),
        }
    }
}

/// Result type alias for voice-dots operations
pub type Result<T> = std::result::Result<T, VoiceDotsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_error_is_recoverable() {
        let err = VoiceDotsError::InvalidGeometry("2x2".to_string());
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("2x2"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.toml");
        let err: VoiceDotsError = io.into();
        assert!(matches!(err, VoiceDotsError::IOError(_)));
        assert!(!err.is_recoverable());
        assert_eq!(err.user_message(), "File system error occurred.");
    }
}
