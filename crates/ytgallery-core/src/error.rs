//! Error types for ytgallery core operations.

use thiserror::Error;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or driving a gallery.
#[derive(Debug, Error)]
pub enum Error {
    /// The element meant to host the player or gallery does not exist.
    #[error("Container element not found: {0}")]
    ContainerNotFound(String),

    /// A playback command was issued before the embedded player signalled readiness.
    #[error("Player is not ready: cannot {command}")]
    PlayerNotReady {
        /// Name of the rejected command.
        command: &'static str,
    },

    /// The iframe player API script could not be loaded.
    #[error("Player API failed to load: {0}")]
    ApiLoadFailed(String),

    /// A configuration value is out of range.
    #[error("Invalid config value for {field}: {reason}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Configuration could not be parsed.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A browser API call raised an exception.
    #[error("Browser error: {0}")]
    Browser(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_container_not_found_display() {
        let err = Error::ContainerNotFound("video-player".to_string());
        assert_eq!(err.to_string(), "Container element not found: video-player");
    }

    #[test]
    fn test_player_not_ready_display() {
        let err = Error::PlayerNotReady { command: "pause" };
        assert_eq!(err.to_string(), "Player is not ready: cannot pause");
    }

    #[test]
    fn test_invalid_config_display() {
        let err = Error::InvalidConfig {
            field: "width",
            reason: "must be greater than zero".to_string(),
        };
        assert!(err.to_string().contains("width"));
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn test_serde_error_conversion() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
