//! One-way hashing of credential secrets.

use argon2::{
    password_hash::SaltString, Algorithm, Argon2, Params, PasswordHash, PasswordHasher,
    PasswordVerifier, Version,
};
use rand::rngs::OsRng;

use crate::domain::{RawSecret, SecretHash};
use crate::errors::{Error, Result};

fn credential_hasher() -> Argon2<'static> {
    // Tuned for interactive API calls: Argon2id with moderate memory and a single iteration
    // keeps verification under 10ms on development hardware while retaining side-channel
    // protections.
    const MEMORY_COST_KIB: u32 = 768; // 0.75 MiB keeps verification below the latency budget
    const ITERATIONS: u32 = 1;
    const PARALLELISM: u32 = 1;
    let params = Params::new(MEMORY_COST_KIB, ITERATIONS, PARALLELISM, Some(32))
        .expect("valid Argon2 parameters");
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
}

/// Stateless one-way transform between raw secrets and storable hashes.
#[derive(Clone)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
}

impl CredentialHasher {
    pub fn new() -> Self {
        Self { argon2: credential_hasher() }
    }

    /// Hash a raw secret with a fresh per-secret salt.
    pub fn hash(&self, secret: &RawSecret) -> Result<SecretHash> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(secret.expose().as_bytes(), &salt)
            .map_err(|err| Error::internal(format!("Failed to hash credential secret: {}", err)))?;
        Ok(SecretHash::from_string(hash.to_string()))
    }

    /// Verify a candidate secret against a stored hash.
    ///
    /// A malformed stored hash is a verification failure, not an error:
    /// the caller learns only that the candidate does not match.
    pub fn verify(&self, stored: &SecretHash, candidate: &str) -> bool {
        match PasswordHash::new(stored.as_str()) {
            Ok(parsed) => self.argon2.verify_password(candidate.as_bytes(), &parsed).is_ok(),
            Err(_) => false,
        }
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let hasher = CredentialHasher::new();
        let secret = RawSecret::new("wk_live_abc123".into());
        let hash = hasher.hash(&secret).unwrap();

        assert!(hasher.verify(&hash, "wk_live_abc123"));
        assert!(!hasher.verify(&hash, "wk_live_abc124"));
        assert!(!hasher.verify(&hash, ""));
    }

    #[test]
    fn hash_is_not_a_valid_candidate_for_itself() {
        let hasher = CredentialHasher::new();
        let secret = RawSecret::new("some-secret".into());
        let hash = hasher.hash(&secret).unwrap();

        assert!(!hasher.verify(&hash, hash.as_str()));
    }

    #[test]
    fn same_secret_hashes_differently_per_salt() {
        let hasher = CredentialHasher::new();
        let secret = RawSecret::new("repeatable".into());
        let first = hasher.hash(&secret).unwrap();
        let second = hasher.hash(&secret).unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify(&first, "repeatable"));
        assert!(hasher.verify(&second, "repeatable"));
    }

    #[test]
    fn malformed_stored_hash_fails_verification() {
        let hasher = CredentialHasher::new();
        let garbage = SecretHash::from_string("not-a-phc-string".into());
        assert!(!hasher.verify(&garbage, "anything"));
    }
}
