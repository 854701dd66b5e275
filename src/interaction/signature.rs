//! LINE webhook signature verification.

use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::base::error::SignatureError;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the base64 HMAC-SHA256 of the raw request body.
pub const SIGNATURE_HEADER: &str = "x-line-signature";

/// Checks `signature` against the HMAC-SHA256 of `body` keyed by the channel secret.
///
/// The comparison is constant-time.
pub fn verify(channel_secret: &str, signature: Option<&str>, body: &[u8]) -> Result<(), SignatureError> {
    let signature = signature.map(str::trim).filter(|s| !s.is_empty()).ok_or(SignatureError::Missing)?;
    let provided = B64.decode(signature).map_err(|_| SignatureError::Malformed)?;

    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes()).map_err(|_| SignatureError::InvalidSecret)?;
    mac.update(body);

    mac.verify_slice(&provided).map_err(|_| SignatureError::Mismatch)
}

/// Computes the signature LINE would send for `body`.
pub fn sign(channel_secret: &str, body: &[u8]) -> Result<String, SignatureError> {
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes()).map_err(|_| SignatureError::InvalidSecret)?;
    mac.update(body);

    Ok(B64.encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_signature() {
        assert_eq!(verify("channel_secret", Some("QcVhNFsoYq8eKlh/3wPt/P3+TcL96Vu8a+JQHF4PbD4="), b"test body"), Ok(()));
    }

    #[test]
    fn test_sign_then_verify() {
        let body = br#"{"destination":"U0001","events":[]}"#;
        let signature = sign("secret", body).unwrap();

        assert_eq!(verify("secret", Some(&signature), body), Ok(()));
    }

    #[test]
    fn test_tampered_body_is_rejected() {
        let signature = sign("secret", b"original").unwrap();

        assert_eq!(verify("secret", Some(&signature), b"tampered"), Err(SignatureError::Mismatch));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let signature = sign("other", b"body").unwrap();

        assert_eq!(verify("secret", Some(&signature), b"body"), Err(SignatureError::Mismatch));
    }

    #[test]
    fn test_missing_signature_is_rejected() {
        assert_eq!(verify("secret", None, b"body"), Err(SignatureError::Missing));
        assert_eq!(verify("secret", Some(""), b"body"), Err(SignatureError::Missing));
    }

    #[test]
    fn test_non_base64_signature_is_rejected() {
        assert_eq!(verify("secret", Some("not base64!"), b"body"), Err(SignatureError::Malformed));
    }
}
