//! Username and hashed secret used to authenticate account lookups.

use sha2::{Digest, Sha256};

/// Login credentials for an account.
///
/// The raw secret is hashed with SHA-256 on construction and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    username: String,
    hashed_secret: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, secret: &str) -> Self {
        Self {
            username: username.into(),
            hashed_secret: hash_secret(secret),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Lowercase hex digest of the secret.
    pub fn hashed_secret(&self) -> &str {
        &self.hashed_secret
    }

    /// True iff both the username and the hashed secret match exactly.
    pub fn validate(&self, other: &Credential) -> bool {
        self.username == other.username && self.hashed_secret == other.hashed_secret
    }
}

fn hash_secret(secret: &str) -> String {
    hex::encode(Sha256::digest(secret.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_is_not_stored_raw() {
        let credential = Credential::new("dave.green", "secret1234");
        assert_ne!(credential.hashed_secret(), "secret1234");
        assert_eq!(credential.hashed_secret().len(), 64);
    }

    #[test]
    fn hashing_is_deterministic() {
        let a = Credential::new("dave.green", "secret1234");
        let b = Credential::new("dave.green", "secret1234");
        assert_eq!(a.hashed_secret(), b.hashed_secret());
    }

    #[test]
    fn known_digest() {
        let credential = Credential::new("anyone", "abc");
        assert_eq!(
            credential.hashed_secret(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn validate_requires_both_fields() {
        let credential = Credential::new("dave.green", "secret1234");
        assert!(credential.validate(&Credential::new("dave.green", "secret1234")));
        assert!(!credential.validate(&Credential::new("dave.green", "wrong")));
        assert!(!credential.validate(&Credential::new("steve.green", "secret1234")));
    }

    #[test]
    fn validate_is_case_sensitive() {
        let credential = Credential::new("dave.green", "secret1234");
        assert!(!credential.validate(&Credential::new("Dave.Green", "secret1234")));
        assert!(!credential.validate(&Credential::new("dave.green", "SECRET1234")));
    }
}
