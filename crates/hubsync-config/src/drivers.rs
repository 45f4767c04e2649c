use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Unsupported API driver: {0}")]
    UnsupportedApiDriver(String),

    #[error("Unsupported lock driver: {0}")]
    UnsupportedLockDriver(String),
}

/// API driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiDriver {
    /// GitHub REST API.
    GitHub,
    /// No-op driver.
    Null,
}

impl FromStr for ApiDriver {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "github" => Ok(Self::GitHub),
            "null" => Ok(Self::Null),
            other => Err(DriverError::UnsupportedApiDriver(other.into())),
        }
    }
}

/// Lock driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockDriver {
    /// In-process lock driver.
    Local,
    /// No-op driver.
    Null,
}

impl FromStr for LockDriver {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Self::Local),
            "null" => Ok(Self::Null),
            other => Err(DriverError::UnsupportedLockDriver(other.into())),
        }
    }
}
