//! Validation utilities.

use std::fmt::Write;

use hubsync_config::{ApiDriver, Config};
use thiserror::Error;

enum ApiConfigError {
    MissingToken,
    MissingClientId,
    MissingClientSecret,
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Errors on environment variables:\n{}", errors)]
    EnvVarsError { errors: String },
}

fn validate_env_vars(config: &Config) -> Result<(), ValidationError> {
    #[inline]
    fn _missing(error: &mut String, name: &str) {
        error.push('\n');
        write!(error, "  - Missing env. var.: {}", name).unwrap();
    }

    let mut error = String::new();

    // Check server configuration
    if config.server.bind_ip.is_empty() {
        _missing(&mut error, "HUBSYNC_SERVER_BIND_IP");
    }
    if config.server.bind_port == 0 {
        _missing(&mut error, "HUBSYNC_SERVER_BIND_PORT");
    }
    if config.organization.is_empty() {
        _missing(&mut error, "HUBSYNC_ORGANIZATION");
    }

    // Check API credentials: token or OAuth client pair
    if config.api.driver == ApiDriver::GitHub {
        match validate_api_credentials(config) {
            Err(ApiConfigError::MissingToken) => {
                _missing(&mut error, "HUBSYNC_API_GITHUB_TOKEN");
            }
            Err(ApiConfigError::MissingClientId) => {
                _missing(&mut error, "HUBSYNC_API_GITHUB_CLIENT_ID");
            }
            Err(ApiConfigError::MissingClientSecret) => {
                _missing(&mut error, "HUBSYNC_API_GITHUB_CLIENT_SECRET");
            }
            _ => (),
        }
    }

    if error.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::EnvVarsError { errors: error })
    }
}

fn validate_api_credentials(config: &Config) -> Result<(), ApiConfigError> {
    // Check token first
    if config.api.github.token.is_empty() {
        match (
            config.api.github.client_id.is_empty(),
            config.api.github.client_secret.is_empty(),
        ) {
            // If the whole client pair is missing, you might want to use a token instead.
            (true, true) => Err(ApiConfigError::MissingToken),
            (true, false) => Err(ApiConfigError::MissingClientId),
            (false, true) => Err(ApiConfigError::MissingClientSecret),
            (false, false) => Ok(()),
        }
    } else {
        Ok(())
    }
}

/// Validate configuration.
pub fn validate_configuration(config: &Config) -> Result<(), ValidationError> {
    validate_env_vars(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_api_credentials() {
        let mut config = Config::from_env_no_version();

        macro_rules! test {
            ($val_tok: tt, $val_id: tt, $val_sec: tt, $($res: tt)+) => {{
                config.api.github.token = $val_tok.into();
                config.api.github.client_id = $val_id.into();
                config.api.github.client_secret = $val_sec.into();
                assert!(matches!(validate_api_credentials(&config), $($res)+));
            }};
        }

        test!("", "", "", Err(ApiConfigError::MissingToken));
        test!("", "iamaclientid", "", Err(ApiConfigError::MissingClientSecret));
        test!("", "", "iamasecret", Err(ApiConfigError::MissingClientId));
        test!("", "iamaclientid", "iamasecret", Ok(()));
        test!("iamatoken", "", "", Ok(()));
        test!("iamatoken", "iamaclientid", "", Ok(()));
        test!("iamatoken", "iamaclientid", "iamasecret", Ok(()));
    }
}
