//! HMAC-signed session tokens.
//!
//! A token is `base64url(username) . base64url(hmac_sha256(secret, username))`.
//! The server keeps no session state; logout is the client discarding the
//! token. The username inside a verified token is still only a claim — write
//! handlers re-check it against the account store.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Issues and verifies session tokens with one shared secret.
#[derive(Clone)]
pub struct SessionSigner {
    secret: String,
}

impl SessionSigner {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    fn mac(&self, payload: &[u8]) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(payload);
        mac
    }

    /// Mint a token for a username.
    pub fn issue(&self, username: &str) -> String {
        let payload = URL_SAFE_NO_PAD.encode(username.as_bytes());
        let signature = self.mac(username.as_bytes()).finalize().into_bytes();
        format!("{}.{}", payload, URL_SAFE_NO_PAD.encode(signature))
    }

    /// Verify a token and extract the username it carries.
    ///
    /// Any structural defect (missing dot, bad base64, non-UTF-8 payload) or
    /// signature mismatch yields `None`; callers treat all of these as
    /// "not logged in".
    pub fn verify(&self, token: &str) -> Option<String> {
        let (payload, signature) = token.split_once('.')?;
        let username_bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
        let signature_bytes = URL_SAFE_NO_PAD.decode(signature).ok()?;

        self.mac(&username_bytes)
            .verify_slice(&signature_bytes)
            .ok()?;

        String::from_utf8(username_bytes).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_verify_roundtrip() {
        let signer = SessionSigner::new("test-secret");
        let token = signer.issue("alice");
        assert_eq!(signer.verify(&token), Some("alice".to_string()));
    }

    #[test]
    fn test_issue_is_deterministic_per_user() {
        let signer = SessionSigner::new("test-secret");
        assert_eq!(signer.issue("alice"), signer.issue("alice"));
        assert_ne!(signer.issue("alice"), signer.issue("bob"));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = SessionSigner::new("secret-a").issue("alice");
        assert_eq!(SessionSigner::new("secret-b").verify(&token), None);
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let signer = SessionSigner::new("test-secret");
        let token = signer.issue("alice");
        let (_, signature) = token.split_once('.').unwrap();
        let forged = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode("mallory".as_bytes()),
            signature
        );
        assert_eq!(signer.verify(&forged), None);
    }

    #[test]
    fn test_garbage_tokens_rejected() {
        let signer = SessionSigner::new("test-secret");
        assert_eq!(signer.verify(""), None);
        assert_eq!(signer.verify("no-dot-here"), None);
        assert_eq!(signer.verify("bad base64!.bad base64!"), None);
    }

    #[test]
    fn test_unicode_username_roundtrip() {
        let signer = SessionSigner::new("test-secret");
        let token = signer.issue("chef-émile");
        assert_eq!(signer.verify(&token), Some("chef-émile".to_string()));
    }
}
