//! Project identifier generation.
//!
//! An id is the first 8 hex characters of SHA-256 over the project name, a
//! per-ledger nonce and a random salt. Callers retry on collision.

use rand::RngCore;
use sha2::{Digest, Sha256};

use super::types::ProjectId;

/// Hex characters kept from the digest
pub const PROJECT_ID_LEN: usize = 8;

/// Attempts before `IdSpaceExhausted` is reported
pub const MAX_ID_ATTEMPTS: u32 = 64;

#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    nonce: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce a fresh candidate id for `name`. Never repeats a nonce.
    pub fn next(&mut self, name: &str) -> ProjectId {
        let mut salt = [0u8; 16];
        rand::rngs::OsRng.fill_bytes(&mut salt);

        let mut hasher = Sha256::new();
        hasher.update(name.as_bytes());
        hasher.update(self.nonce.to_le_bytes());
        hasher.update(salt);
        self.nonce = self.nonce.wrapping_add(1);

        let digest = hex::encode(hasher.finalize());
        ProjectId::new(digest[..PROJECT_ID_LEN].to_string())
    }

    /// Next id for which `taken` is false
    pub fn next_unique<F>(&mut self, name: &str, taken: F) -> Option<ProjectId>
    where
        F: Fn(&ProjectId) -> bool,
    {
        (0..MAX_ID_ATTEMPTS)
            .map(|_| self.next(name))
            .find(|candidate| !taken(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_id_shape() {
        let mut ids = IdGenerator::new();
        let id = ids.next("SafeDeFi");
        assert_eq!(id.as_str().len(), PROJECT_ID_LEN);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_same_name_distinct_ids() {
        let mut ids = IdGenerator::new();
        let mut seen = HashSet::new();
        for _ in 0..100 {
            let id = ids
                .next_unique("RugCoin", |candidate| seen.contains(candidate))
                .unwrap();
            assert!(seen.insert(id));
        }
    }

    #[test]
    fn test_gives_up_when_everything_is_taken() {
        let mut ids = IdGenerator::new();
        assert!(ids.next_unique("Full", |_| true).is_none());
    }
}
