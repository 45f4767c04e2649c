use thiserror::Error;

/// Crypto error.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Signature is not valid hex.
    #[error("Invalid signature format: {}", sig)]
    InvalidSignatureFormat { sig: String },

    /// Secret key has an invalid length.
    #[error("Invalid secret key length")]
    InvalidSecretKeyLength,
}

/// Result alias for `CryptoError`.
pub type Result<T> = core::result::Result<T, CryptoError>;
