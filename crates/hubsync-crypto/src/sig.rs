use hmac::{Mac, SimpleHmac};
use sha2::Sha256;

use super::errors::CryptoError;

/// Webhook signature, hex-encoded HMAC-SHA256 over the raw request body.
pub struct Signature<'a>(pub &'a str);

impl<'a> Signature<'a> {
    /// Check if the signature matches `body` for the given shared secret.
    pub fn is_valid(&self, body: &[u8], secret: &str) -> Result<bool, CryptoError> {
        let decoded_signature =
            &hex::decode(self.0).map_err(|_| CryptoError::InvalidSignatureFormat {
                sig: self.0.to_string(),
            })?;
        let mut hmac = SimpleHmac::<Sha256>::new_from_slice(secret.as_bytes())
            .map_err(|_| CryptoError::InvalidSecretKeyLength)?;

        hmac.update(body);
        Ok(hmac.verify_slice(decoded_signature).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::Signature;

    const BODY: &[u8] = br#"{"secret": "hello"}"#;
    const SECRET: &str = "iAmAsEcReTkEy";
    const GOOD_SIG: &str = "a2b41e3bb9a09babb36b42e145eacc38916d078ba378d60db679f6ac79cd1408";

    #[test]
    fn matching_signature_is_valid() {
        assert!(Signature(GOOD_SIG).is_valid(BODY, SECRET).unwrap());
    }

    #[test]
    fn tampered_signature_is_invalid() {
        let bad_sig = "a2b41e3bb9a09babb36b42e145eacc38916d078ba378d60db679f6ac79cd1409";
        assert!(!Signature(bad_sig).is_valid(BODY, SECRET).unwrap());
    }

    #[test]
    fn tampered_body_is_invalid() {
        assert!(!Signature(GOOD_SIG)
            .is_valid(br#"{"secret": "h3llo"}"#, SECRET)
            .unwrap());
    }

    #[test]
    fn non_hex_signature_is_an_error() {
        assert!(Signature("not-hex").is_valid(BODY, SECRET).is_err());
    }
}
