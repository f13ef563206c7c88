//! bcrypt password hashing and verification.
//!
//! Hashes use the modular crypt format (`$2b$<cost>$<salt><hash>`) so the
//! work factor and random salt travel with the hash itself.

/// Default bcrypt work factor.
pub const DEFAULT_BCRYPT_COST: u32 = 12;

/// Lowest work factor bcrypt accepts.
pub const MIN_BCRYPT_COST: u32 = 4;

/// Highest work factor bcrypt accepts.
pub const MAX_BCRYPT_COST: u32 = 31;

/// Failure inside the hashing primitive. Always a server fault.
#[derive(Debug, thiserror::Error)]
#[error("Password hashing failed: {0}")]
pub struct HashError(#[from] bcrypt::BcryptError);

/// One-way password hashing.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password with a fresh random salt.
    fn hash(&self, password: &str) -> Result<String, HashError>;

    /// Check a plaintext password against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch and an error only when the stored hash
    /// cannot be parsed.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, HashError>;
}

/// [`PasswordHasher`] using bcrypt with a fixed work factor.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    /// Build a hasher with the given work factor.
    ///
    /// Fails when `cost` is outside `MIN_BCRYPT_COST..=MAX_BCRYPT_COST`.
    pub fn new(cost: u32) -> Result<Self, HashError> {
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
            return Err(HashError(bcrypt::BcryptError::CostNotAllowed(cost)));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self {
            cost: DEFAULT_BCRYPT_COST,
        }
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, password: &str) -> Result<String, HashError> {
        Ok(bcrypt::hash(password, self.cost)?)
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        // bcrypt compares digests in constant time.
        Ok(bcrypt::verify(password, hash)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimum cost keeps the tests fast; the algorithm is the same.
    fn hasher() -> BcryptHasher {
        BcryptHasher::new(MIN_BCRYPT_COST).unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let password = "correct-horse-battery-staple";
        let hash = hasher().hash(password).expect("hashing should succeed");

        assert!(hash.starts_with("$2b$04$"), "expected bcrypt prefix with cost");

        let verified = hasher().verify(password, &hash).expect("verify should succeed");
        assert!(verified, "correct password should verify as true");
    }

    #[test]
    fn test_wrong_password_fails() {
        let hash = hasher().hash("real-password").expect("hashing should succeed");
        let verified = hasher().verify("wrong-password", &hash).expect("verify should succeed");
        assert!(!verified, "wrong password should verify as false");
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let a = hasher().hash("longenough1").unwrap();
        let b = hasher().hash("longenough1").unwrap();
        assert_ne!(a, b, "random salt must make every hash unique");
        assert!(hasher().verify("longenough1", &a).unwrap());
        assert!(hasher().verify("longenough1", &b).unwrap());
    }

    #[test]
    fn test_default_cost_is_twelve() {
        assert_eq!(BcryptHasher::default().cost(), 12);
    }

    #[test]
    fn test_cost_out_of_range_rejected() {
        assert!(BcryptHasher::new(3).is_err());
        assert!(BcryptHasher::new(32).is_err());
        assert!(BcryptHasher::new(10).is_ok());
    }

    #[test]
    fn test_corrupt_hash_is_an_error() {
        assert!(hasher().verify("longenough1", "not-a-bcrypt-hash").is_err());
    }
}
