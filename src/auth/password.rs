use bcrypt::BcryptError;

/// Same work factor the original deployment used.
const HASH_COST: u32 = 10;

/// Hash a plaintext password with a salted one-way function.
pub fn hash_password(plain: &str) -> Result<String, BcryptError> {
    bcrypt::hash(plain, HASH_COST)
}

/// Check a plaintext password against a stored hash.
pub fn verify_password(plain: &str, hashed: &str) -> Result<bool, BcryptError> {
    bcrypt::verify(plain, hashed)
}
