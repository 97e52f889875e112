//! Error types for configuration loading and validation.

/// Errors that can occur when loading or validating an `argstore.toml` configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the configuration file.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A required field is missing from the configuration.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A configuration value failed validation.
    #[error("validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_missing_field() {
        let err = ConfigError::MissingField("store.root".to_string());
        assert_eq!(format!("{err}"), "missing required field: store.root");
    }

    #[test]
    fn parse_error_names_the_bad_value() {
        let err = ConfigError::ParseError("unknown variant `keep`, expected `reclaim` or `orphan`".to_string());
        assert_eq!(
            err.to_string(),
            "failed to parse configuration: unknown variant `keep`, expected `reclaim` or `orphan`"
        );
    }

    #[test]
    fn io_error_keeps_os_message() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "argstore.toml: permission denied");
        let err = ConfigError::from(io_err);
        assert_eq!(
            err.to_string(),
            "failed to read configuration: argstore.toml: permission denied"
        );
    }

    #[test]
    fn validation_error_display() {
        let err = ConfigError::ValidationError("store.root 'data/..' must not end in '..'".to_string());
        assert_eq!(err.to_string(), "validation error: store.root 'data/..' must not end in '..'");
    }
}
