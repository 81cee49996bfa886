//! Configuration validation.

use crate::config::Config;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_markers(config)?;
    validate_engine(config)?;
    validate_split(config)?;
    Ok(())
}

fn validate_markers(config: &Config) -> Result<()> {
    let extension = config.markers.extension.trim();
    if extension.is_empty() || extension.contains(['/', '\\']) {
        return Err(Error::ConfigValidation {
            message: format!(
                "markers.extension must be a bare extension, got '{}'",
                config.markers.extension
            ),
        });
    }

    Ok(())
}

fn validate_engine(config: &Config) -> Result<()> {
    if config.engine.timeout_secs == 0 {
        return Err(Error::ConfigValidation {
            message: "engine.timeout_secs must be at least 1".to_string(),
        });
    }

    Ok(())
}

/// Validate uniform split settings.
pub fn validate_split(config: &Config) -> Result<()> {
    let split = &config.split;

    if split.parts == 0 {
        return Err(Error::ConfigValidation {
            message: "split.parts must be at least 1".to_string(),
        });
    }

    if split.min_size_mb > split.max_size_mb {
        return Err(Error::ConfigValidation {
            message: format!(
                "split.min_size_mb ({}) must not exceed split.max_size_mb ({})",
                split.min_size_mb, split.max_size_mb
            ),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = Config::default();
        config.engine.timeout_secs = 0;
        assert!(matches!(
            validate_config(&config),
            Err(Error::ConfigValidation { .. })
        ));
    }

    #[test]
    fn test_validate_empty_extension() {
        let mut config = Config::default();
        config.markers.extension = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_extension_with_separator() {
        let mut config = Config::default();
        config.markers.extension = "../pbf".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_parts() {
        let mut config = Config::default();
        config.split.parts = 0;
        assert!(validate_split(&config).is_err());
    }

    #[test]
    fn test_validate_inverted_size_bounds() {
        let mut config = Config::default();
        config.split.min_size_mb = 500;
        config.split.max_size_mb = 100;
        assert!(validate_split(&config).is_err());
    }
}
