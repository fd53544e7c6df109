//! Admin token verification
//!
//! The admin API authenticates with a single pre-shared token. Tokens are
//! compared through their SHA-256 digests so accepted and rejected requests
//! never branch on a byte-by-byte string comparison of the secret.

use sha2::{Digest, Sha256};
use std::fmt;

use crate::domain::DomainError;

/// Verifier for the pre-shared admin token
#[derive(Clone)]
pub struct AdminTokenVerifier {
    token_digest: [u8; 32],
}

impl AdminTokenVerifier {
    /// Create a verifier for the given token
    pub fn new(token: &str) -> Result<Self, DomainError> {
        if token.len() < 16 {
            return Err(DomainError::configuration(
                "Admin token must be at least 16 characters",
            ));
        }

        Ok(Self {
            token_digest: digest(token),
        })
    }

    /// Check whether a presented token matches
    pub fn verify(&self, presented: &str) -> bool {
        digest(presented) == self.token_digest
    }
}

impl fmt::Debug for AdminTokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The digest stays out of debug output
        f.debug_struct("AdminTokenVerifier").finish_non_exhaustive()
    }
}

fn digest(token: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().into()
}

/// Generate a random admin token for bootstrap
pub fn generate_admin_token() -> String {
    let mut bytes = [0u8; 24];
    rand::Rng::fill(&mut rand::thread_rng(), &mut bytes[..]);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_accepts_matching_token() {
        let verifier = AdminTokenVerifier::new("a-long-enough-admin-token").unwrap();

        assert!(verifier.verify("a-long-enough-admin-token"));
        assert!(!verifier.verify("a-different-admin-token!!"));
        assert!(!verifier.verify(""));
    }

    #[test]
    fn test_rejects_short_token() {
        assert!(AdminTokenVerifier::new("short").is_err());
    }

    #[test]
    fn test_generate_admin_token() {
        let token = generate_admin_token();
        assert_eq!(token.len(), 48);
        assert_ne!(token, generate_admin_token());

        // Generated tokens are long enough to configure a verifier
        assert!(AdminTokenVerifier::new(&token).is_ok());
    }

    #[test]
    fn test_debug_hides_digest() {
        let verifier = AdminTokenVerifier::new("a-long-enough-admin-token").unwrap();
        let debug = format!("{:?}", verifier);
        assert!(!debug.contains("token_digest"));
    }
}
